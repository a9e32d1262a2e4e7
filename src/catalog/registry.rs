//! Definition catalog
//!
//! The `DefinitionCatalog` owns every item definition and the tag interner
//! that compiled them. It is built once and then shared read-only by all
//! placement sessions.

use ahash::AHashMap;
use std::path::Path;

use super::definition::{ItemDefinition, PlacementRule};
use super::loader::{parse_catalog, DefinitionSpec};
use super::tags::{TagRegistry, TagSet};
use crate::core::error::{PlacerError, Result};
use crate::core::types::DefinitionId;

/// Registry of item definitions
#[derive(Debug, Clone, Default)]
pub struct DefinitionCatalog {
    definitions: Vec<ItemDefinition>,
    by_identifier: AHashMap<String, DefinitionId>,
    tags: TagRegistry,
}

impl DefinitionCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile a spec and register it, returning its assigned ID.
    ///
    /// Registering an identifier twice replaces the earlier definition but
    /// keeps its ID.
    pub fn register(&mut self, spec: DefinitionSpec) -> Result<DefinitionId> {
        // Nothing is interned until the whole spec is known to be valid
        let identifier = validate_spec(&spec)?;

        let mut tags = self.tags.intern_set(spec.tags.iter().map(String::as_str));
        tags.insert(self.tags.intern(&identifier));

        let mut rules = Vec::with_capacity(spec.preferred_containers.len());
        for rule in &spec.preferred_containers {
            let primary = self.tags.intern_set(rule.primary.iter().map(String::as_str));
            let secondary = self
                .tags
                .intern_set(rule.secondary.iter().map(String::as_str));
            rules.push(PlacementRule::new(
                primary,
                secondary,
                rule.spawn_probability,
                rule.min_amount,
                rule.max_amount,
            )?);
        }

        let id = match self.by_identifier.get(&identifier) {
            Some(id) => *id,
            None => DefinitionId(self.definitions.len() as u32),
        };

        let definition = ItemDefinition {
            id,
            identifier: identifier.clone(),
            tags,
            rules,
            container: spec.container.map(Into::into),
        };

        if id.index() < self.definitions.len() {
            self.definitions[id.index()] = definition;
        } else {
            self.definitions.push(definition);
            self.by_identifier.insert(identifier, id);
        }

        Ok(id)
    }

    /// Parse TOML text and register every item it describes
    pub fn load_str(&mut self, content: &str) -> Result<Vec<DefinitionId>> {
        let file = parse_catalog(content)?;
        // All or nothing: a bad item leaves the catalog untouched
        for spec in &file.items {
            validate_spec(spec)?;
        }
        file.items.into_iter().map(|spec| self.register(spec)).collect()
    }

    /// Load a catalog from a TOML file
    pub fn load_file(&mut self, path: &Path) -> Result<Vec<DefinitionId>> {
        let content = std::fs::read_to_string(path)?;
        self.load_str(&content)
    }

    /// Get a definition by ID
    pub fn get(&self, id: DefinitionId) -> Option<&ItemDefinition> {
        self.definitions.get(id.index())
    }

    /// Get a definition by identifier
    pub fn get_by_identifier(&self, identifier: &str) -> Option<&ItemDefinition> {
        self.id_by_identifier(identifier).and_then(|id| self.get(id))
    }

    /// Get a definition ID by identifier
    pub fn id_by_identifier(&self, identifier: &str) -> Option<DefinitionId> {
        self.by_identifier
            .get(&identifier.trim().to_lowercase())
            .copied()
    }

    /// All definition IDs in registration order
    pub fn ids(&self) -> impl Iterator<Item = DefinitionId> + '_ {
        self.definitions.iter().map(|d| d.id)
    }

    /// Iterate over all definitions
    pub fn iter(&self) -> impl Iterator<Item = &ItemDefinition> {
        self.definitions.iter()
    }

    /// Tag interner used to compile this catalog
    pub fn tags(&self) -> &TagRegistry {
        &self.tags
    }

    /// Intern ad-hoc tags (e.g. extra container tags from a layout)
    pub fn intern_tags<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) -> TagSet {
        self.tags.intern_set(names)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Check a spec and return its normalized identifier
fn validate_spec(spec: &DefinitionSpec) -> Result<String> {
    let identifier = spec.identifier.trim().to_lowercase();
    if identifier.is_empty() {
        return Err(PlacerError::InvalidRule(
            "item definition has an empty identifier".into(),
        ));
    }
    for rule in &spec.preferred_containers {
        PlacementRule::check(rule.spawn_probability, rule.min_amount, rule.max_amount).map_err(
            |e| match e {
                PlacerError::InvalidRule(msg) => {
                    PlacerError::InvalidRule(format!("{}: {}", identifier, msg))
                }
                other => other,
            },
        )?;
    }
    Ok(identifier)
}
