//! TOML schema for item definition fixtures
//!
//! A catalog file is a list of `[[items]]` tables:
//!
//! ```toml
//! [[items]]
//! identifier = "smg"
//! tags = ["weapon", "smallitem"]
//! container = { capacity = 1 }
//!
//! [[items.preferred_containers]]
//! primary = ["weaponholder"]
//! secondary = ["crate"]
//! spawn_probability = 0.5
//! min_amount = 1
//! max_amount = 1
//! ```
//!
//! Specs hold plain strings; `DefinitionCatalog::register` interns them.

use serde::{Deserialize, Serialize};

use super::definition::ContainerSpec;

/// Root of a catalog file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub items: Vec<DefinitionSpec>,
}

/// Uncompiled item definition
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DefinitionSpec {
    pub identifier: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub container: Option<ContainerSpecToml>,
    #[serde(default)]
    pub preferred_containers: Vec<RuleSpec>,
}

/// Container section of a definition; `auto_fill` defaults to true
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContainerSpecToml {
    pub capacity: u32,
    #[serde(default = "default_auto_fill")]
    pub auto_fill: bool,
}

impl From<ContainerSpecToml> for ContainerSpec {
    fn from(spec: ContainerSpecToml) -> Self {
        ContainerSpec {
            capacity: spec.capacity,
            auto_fill: spec.auto_fill,
        }
    }
}

/// Uncompiled placement rule
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuleSpec {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub secondary: Vec<String>,
    #[serde(default = "default_probability")]
    pub spawn_probability: f32,
    #[serde(default = "default_amount")]
    pub min_amount: u32,
    #[serde(default = "default_amount")]
    pub max_amount: u32,
}

fn default_auto_fill() -> bool {
    true
}

fn default_probability() -> f32 {
    1.0
}

fn default_amount() -> u32 {
    1
}

impl DefinitionSpec {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            tags: Vec::new(),
            container: None,
            preferred_containers: Vec::new(),
        }
    }

    pub fn with_tags<'a>(mut self, tags: impl IntoIterator<Item = &'a str>) -> Self {
        self.tags.extend(tags.into_iter().map(str::to_string));
        self
    }

    pub fn with_container(mut self, capacity: u32) -> Self {
        self.container = Some(ContainerSpecToml {
            capacity,
            auto_fill: true,
        });
        self
    }

    /// Container that exists but is never a placement target
    pub fn with_sealed_container(mut self, capacity: u32) -> Self {
        self.container = Some(ContainerSpecToml {
            capacity,
            auto_fill: false,
        });
        self
    }

    pub fn with_rule(mut self, rule: RuleSpec) -> Self {
        self.preferred_containers.push(rule);
        self
    }
}

impl RuleSpec {
    /// Rule targeting containers tagged with any of `primary`
    pub fn targeting<'a>(primary: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            primary: primary.into_iter().map(str::to_string).collect(),
            secondary: Vec::new(),
            spawn_probability: default_probability(),
            min_amount: default_amount(),
            max_amount: default_amount(),
        }
    }

    pub fn or_else<'a>(mut self, secondary: impl IntoIterator<Item = &'a str>) -> Self {
        self.secondary = secondary.into_iter().map(str::to_string).collect();
        self
    }

    pub fn probability(mut self, spawn_probability: f32) -> Self {
        self.spawn_probability = spawn_probability;
        self
    }

    pub fn amount(mut self, min_amount: u32, max_amount: u32) -> Self {
        self.min_amount = min_amount;
        self.max_amount = max_amount;
        self
    }
}

/// Parse a catalog file from TOML text
pub fn parse_catalog(content: &str) -> crate::core::error::Result<CatalogFile> {
    Ok(toml::from_str(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_with_defaults() {
        let catalog = parse_catalog(
            r#"
[[items]]
identifier = "smg"
tags = ["weapon"]
container = { capacity = 1 }

[[items.preferred_containers]]
primary = ["weaponholder"]
secondary = ["crate"]
spawn_probability = 0.5
max_amount = 2

[[items]]
identifier = "bandage"
"#,
        )
        .unwrap();

        assert_eq!(catalog.items.len(), 2);
        let smg = &catalog.items[0];
        assert_eq!(smg.identifier, "smg");
        assert_eq!(
            smg.container,
            Some(ContainerSpecToml {
                capacity: 1,
                auto_fill: true
            })
        );
        let rule = &smg.preferred_containers[0];
        assert_eq!(rule.secondary, vec!["crate".to_string()]);
        assert!((rule.spawn_probability - 0.5).abs() < f32::EPSILON);
        assert_eq!(rule.min_amount, 1);
        assert_eq!(rule.max_amount, 2);

        let bandage = &catalog.items[1];
        assert!(bandage.container.is_none());
        assert!(bandage.preferred_containers.is_empty());
    }

    #[test]
    fn test_parse_catalog_rejects_bad_toml() {
        assert!(parse_catalog("[[items]]\nidentifier = ").is_err());
    }

    #[test]
    fn test_builders() {
        let spec = DefinitionSpec::new("magazine")
            .with_tags(["ammo"])
            .with_container(10)
            .with_rule(RuleSpec::targeting(["smg"]).or_else(["crate"]).amount(0, 2));

        assert_eq!(spec.tags, vec!["ammo".to_string()]);
        assert_eq!(spec.preferred_containers[0].primary, vec!["smg".to_string()]);
        assert_eq!(spec.preferred_containers[0].max_amount, 2);
    }
}
