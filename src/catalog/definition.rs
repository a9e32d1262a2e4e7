//! Item definitions and their placement rules

use serde::{Deserialize, Serialize};

use super::tags::TagSet;
use crate::core::error::{PlacerError, Result};
use crate::core::types::DefinitionId;

/// One placement opportunity for an item type.
///
/// A rule names the containers it wants (primary tags, falling back to
/// secondary tags), how likely the item is to appear in each matching
/// container, and how many units to put there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRule {
    pub primary: TagSet,
    pub secondary: TagSet,
    pub spawn_probability: f32,
    pub min_amount: u32,
    pub max_amount: u32,
}

impl PlacementRule {
    /// Create a validated rule
    pub fn new(
        primary: TagSet,
        secondary: TagSet,
        spawn_probability: f32,
        min_amount: u32,
        max_amount: u32,
    ) -> Result<Self> {
        Self::check(spawn_probability, min_amount, max_amount)?;
        Ok(Self {
            primary,
            secondary,
            spawn_probability,
            min_amount,
            max_amount,
        })
    }

    /// Validate the numeric part of a rule without building it
    pub fn check(spawn_probability: f32, min_amount: u32, max_amount: u32) -> Result<()> {
        if !spawn_probability.is_finite() || !(0.0..=1.0).contains(&spawn_probability) {
            return Err(PlacerError::InvalidRule(format!(
                "spawn probability {} is outside [0, 1]",
                spawn_probability
            )));
        }
        if min_amount > max_amount {
            return Err(PlacerError::InvalidRule(format!(
                "min amount {} exceeds max amount {}",
                min_amount, max_amount
            )));
        }
        Ok(())
    }

    /// Rules that can never place anything are skipped by the engine
    pub fn is_inert(&self) -> bool {
        self.spawn_probability <= 0.0 || self.max_amount == 0
    }

    /// Tags to match against, depending on which pass of the fallback we are in
    pub fn tags(&self, use_primary: bool) -> &TagSet {
        if use_primary {
            &self.primary
        } else {
            &self.secondary
        }
    }
}

/// Container slots an item type exposes once spawned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub capacity: u32,
    pub auto_fill: bool,
}

/// Immutable template for an item type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: DefinitionId,
    pub identifier: String,
    /// Identifying tags; always includes the interned identifier
    pub tags: TagSet,
    /// Placement rules in priority order
    pub rules: Vec<PlacementRule>,
    pub container: Option<ContainerSpec>,
}

impl ItemDefinition {
    /// Whether spawned instances of this type can receive other items
    pub fn provides_container(&self) -> bool {
        self.container.is_some()
    }

    /// Rules the engine will actually evaluate
    pub fn active_rules(&self) -> impl Iterator<Item = &PlacementRule> {
        self.rules.iter().filter(|r| !r.is_inert())
    }
}
