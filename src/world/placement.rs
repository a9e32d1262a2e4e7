//! TOML schema for world layout fixtures
//!
//! A layout lists structures, how they dock, and the items that are already
//! on them before any supplies are placed (cabinets, lockers, racks).

use serde::{Deserialize, Serialize};

use super::structure::StructureKind;

/// Root structure for layout files
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LayoutFile {
    #[serde(default)]
    pub structures: Vec<StructureLayout>,
}

/// One structure and its pre-placed items
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StructureLayout {
    pub name: String,
    #[serde(default)]
    pub kind: StructureKind,
    /// Names of structures this one is docked to
    #[serde(default)]
    pub docked_to: Vec<String>,
    #[serde(default)]
    pub items: Vec<ItemPlacement>,
}

/// A pre-placed item
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemPlacement {
    /// Identifier of the item definition to instantiate
    pub definition: String,
    /// Position [x, y] on the structure
    #[serde(default)]
    pub position: [f32; 2],
    /// Extra container tags (e.g. the room a cabinet is in)
    #[serde(default)]
    pub tags: Vec<String>,
    /// Overrides the definition's auto-fill setting
    #[serde(default)]
    pub auto_fill: Option<bool>,
}
