//! Build a `World` from a layout fixture
//!
//! This module provides `LayoutLoader`, which resolves the definition
//! identifiers a layout mentions against a `DefinitionCatalog` and places the
//! listed items on their structures.

use glam::Vec2;
use std::path::Path;

use crate::catalog::{DefinitionCatalog, TagSet};
use crate::core::error::{PlacerError, Result};
use crate::core::types::ContainerId;
use crate::world::placement::LayoutFile;
use crate::world::World;

/// Loader that converts layout files into a `World`
pub struct LayoutLoader<'a> {
    catalog: &'a DefinitionCatalog,
}

impl<'a> LayoutLoader<'a> {
    pub fn new(catalog: &'a DefinitionCatalog) -> Self {
        Self { catalog }
    }

    /// Load a layout from TOML text
    pub fn load_from_toml(&self, content: &str) -> Result<World> {
        let file: LayoutFile = toml::from_str(content)?;
        self.load_from_layout(&file)
    }

    /// Load a layout from a TOML file on disk
    pub fn load_from_file(&self, path: &Path) -> Result<World> {
        let content = std::fs::read_to_string(path)?;
        self.load_from_toml(&content)
    }

    /// Create structures, dock them, then place their items
    pub fn load_from_layout(&self, file: &LayoutFile) -> Result<World> {
        let mut world = World::new();

        let mut ids = Vec::with_capacity(file.structures.len());
        for structure in &file.structures {
            if world.structures.id_by_name(&structure.name).is_some() {
                return Err(PlacerError::DuplicateStructure(structure.name.clone()));
            }
            ids.push(world.structures.add(structure.name.clone(), structure.kind));
        }

        for (structure, &id) in file.structures.iter().zip(&ids) {
            for other in &structure.docked_to {
                let other_id = world
                    .structures
                    .id_by_name(other)
                    .ok_or_else(|| PlacerError::StructureNotFound(other.clone()))?;
                if !world.structures.dock(id, other_id) {
                    return Err(PlacerError::InvalidDocking(format!(
                        "{} cannot dock to {}",
                        structure.name, other
                    )));
                }
            }

            for placement in &structure.items {
                let definition = self
                    .catalog
                    .get_by_identifier(&placement.definition)
                    .ok_or_else(|| PlacerError::DefinitionNotFound(placement.definition.clone()))?;

                // Tags no rule mentions can never match, so unknown ones are dropped
                let extra_tags: TagSet = placement
                    .tags
                    .iter()
                    .filter_map(|t| self.catalog.tags().get(t))
                    .collect();

                let position = Vec2::new(placement.position[0], placement.position[1]);
                let item = world.place_item_with_tags(definition, id, position, extra_tags)?;

                if let (Some(auto_fill), Some(container)) = (
                    placement.auto_fill,
                    world.items.container_mut(ContainerId(item)),
                ) {
                    container.auto_fill = auto_fill;
                }
            }
        }

        tracing::debug!(
            "Loaded layout with {} structures and {} items",
            world.structures.len(),
            world.items.len()
        );

        Ok(world)
    }
}
