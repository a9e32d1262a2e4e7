//! Collaborator interfaces the placement subsystem consumes
//!
//! Placement never touches a world directly. It asks a `StructureTopology`
//! which structures are in scope and an `ItemSpawner` to find containers and
//! create items. `crate::world::World` implements both.

use crate::catalog::{ItemDefinition, TagSet};
use crate::core::error::Result;
use crate::core::types::{ContainerId, ItemId, StructureId};

/// A container as the placement subsystem sees it
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerInfo {
    pub id: ContainerId,
    pub tags: TagSet,
    pub auto_fill: bool,
}

/// Result of creating one item inside a container
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnedItem {
    pub item: ItemId,
    /// Container exposed by the new item, if its definition provides one
    pub container: Option<ContainerInfo>,
}

/// Item instantiation service
pub trait ItemSpawner {
    /// Containers owned by items currently on the given structures
    fn containers_on(&self, structures: &[StructureId]) -> Vec<ContainerInfo>;

    /// Create one item of `definition` and put it into `container`.
    ///
    /// The new item lives on the container owner's structure, at its position.
    fn spawn_into(
        &mut self,
        definition: &ItemDefinition,
        container: ContainerId,
    ) -> Result<SpawnedItem>;

    /// Unknown containers report full
    fn is_full(&self, container: ContainerId) -> bool;
}

/// Structure/topology query service
pub trait StructureTopology {
    /// Roots of supply runs
    fn main_structures(&self) -> Vec<StructureId>;

    /// Structures rigidly attached to `structure`
    fn docked_to(&self, structure: StructureId) -> Vec<StructureId>;

    fn is_outpost(&self, structure: StructureId) -> bool;
}
