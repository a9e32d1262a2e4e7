//! In-memory world: structures, items and containers
//!
//! `World` is the reference implementation of the collaborator services the
//! placement subsystem consumes (`ItemSpawner`, `StructureTopology`). The
//! binary and the tests run sessions against it.

pub mod loader;
pub mod objects;
pub mod placement;
pub mod structure;

pub use loader::LayoutLoader;
pub use objects::{Container, ItemInstance, ItemStore};
pub use placement::{ItemPlacement, LayoutFile, StructureLayout};
pub use structure::{Structure, StructureKind, Structures};

use glam::Vec2;

use crate::catalog::{ItemDefinition, TagSet};
use crate::core::error::{PlacerError, Result};
use crate::core::types::{ContainerId, ItemId, StructureId};
use crate::placement::services::{ContainerInfo, ItemSpawner, SpawnedItem, StructureTopology};

/// Structures plus every item on them
#[derive(Debug, Clone, Default)]
pub struct World {
    pub structures: Structures,
    pub items: ItemStore,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place an item directly on a structure (not inside a container)
    pub fn place_item(
        &mut self,
        definition: &ItemDefinition,
        structure: StructureId,
        position: Vec2,
    ) -> Result<ItemId> {
        self.place_item_with_tags(definition, structure, position, TagSet::new())
    }

    /// Place an item whose container carries tags beyond its definition's
    pub fn place_item_with_tags(
        &mut self,
        definition: &ItemDefinition,
        structure: StructureId,
        position: Vec2,
        extra_tags: TagSet,
    ) -> Result<ItemId> {
        if self.structures.get(structure).is_none() {
            return Err(PlacerError::UnknownStructure(structure));
        }
        let container = make_container(definition, extra_tags);
        Ok(self.items.spawn(definition.id, structure, position, container))
    }

    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.items.container(id)
    }

    /// Items inside a container
    pub fn contents_of(&self, id: ContainerId) -> &[ItemId] {
        self.container(id).map(|c| c.contents()).unwrap_or(&[])
    }

    fn container_info(&self, item: &ItemInstance) -> Option<ContainerInfo> {
        item.container.as_ref().map(|c| ContainerInfo {
            id: ContainerId(item.id),
            tags: c.tags.clone(),
            auto_fill: c.auto_fill,
        })
    }
}

fn make_container(definition: &ItemDefinition, extra_tags: TagSet) -> Option<Container> {
    definition.container.map(|spec| {
        let tags = definition.tags.iter().chain(extra_tags.iter()).collect();
        Container::new(spec.capacity, spec.auto_fill, tags)
    })
}

impl ItemSpawner for World {
    fn containers_on(&self, structures: &[StructureId]) -> Vec<ContainerInfo> {
        self.items
            .on_structures(structures)
            .filter_map(|item| self.container_info(item))
            .collect()
    }

    fn spawn_into(
        &mut self,
        definition: &ItemDefinition,
        container: ContainerId,
    ) -> Result<SpawnedItem> {
        let owner = self
            .items
            .get(container.owner())
            .ok_or(PlacerError::ContainerNotFound(container))?;
        let target = owner
            .container
            .as_ref()
            .ok_or(PlacerError::ContainerNotFound(container))?;
        if target.is_full() {
            return Err(PlacerError::ContainerFull(container));
        }
        let (structure, position) = (owner.structure, owner.position);

        let new_container = make_container(definition, TagSet::new());
        let item = self
            .items
            .spawn(definition.id, structure, position, new_container);

        if let Some(spawned) = self.items.get_mut(item) {
            spawned.parent = Some(container);
        }
        self.items
            .container_mut(container)
            .ok_or(PlacerError::ContainerNotFound(container))?
            .try_insert(container.owner(), item)?;

        let info = self.items.get(item).and_then(|i| self.container_info(i));
        Ok(SpawnedItem {
            item,
            container: info,
        })
    }

    fn is_full(&self, container: ContainerId) -> bool {
        self.container(container).map_or(true, |c| c.is_full())
    }
}

impl StructureTopology for World {
    fn main_structures(&self) -> Vec<StructureId> {
        self.structures.main_structures()
    }

    fn docked_to(&self, structure: StructureId) -> Vec<StructureId> {
        self.structures
            .get(structure)
            .map(|s| s.docked_to.clone())
            .unwrap_or_default()
    }

    fn is_outpost(&self, structure: StructureId) -> bool {
        self.structures
            .get(structure)
            .map_or(false, |s| s.is_outpost())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DefinitionCatalog, DefinitionSpec};

    fn setup() -> (DefinitionCatalog, World, StructureId) {
        let mut catalog = DefinitionCatalog::new();
        catalog
            .register(DefinitionSpec::new("crate").with_container(2))
            .unwrap();
        catalog
            .register(DefinitionSpec::new("toolbox").with_container(4))
            .unwrap();
        catalog.register(DefinitionSpec::new("wrench")).unwrap();

        let mut world = World::new();
        let sub = world.structures.add("Humpback", StructureKind::Main);
        (catalog, world, sub)
    }

    #[test]
    fn test_spawn_into_inherits_owner_location() {
        let (catalog, mut world, sub) = setup();
        let crate_def = catalog.get_by_identifier("crate").unwrap();
        let toolbox = catalog.get_by_identifier("toolbox").unwrap();

        let crate_item = world
            .place_item(crate_def, sub, Vec2::new(4.0, -2.0))
            .unwrap();
        let spawned = world.spawn_into(toolbox, ContainerId(crate_item)).unwrap();

        let instance = world.items.get(spawned.item).unwrap();
        assert_eq!(instance.structure, sub);
        assert_eq!(instance.position, Vec2::new(4.0, -2.0));
        assert_eq!(instance.parent, Some(ContainerId(crate_item)));
        assert_eq!(world.contents_of(ContainerId(crate_item)), &[spawned.item]);

        let nested = spawned.container.unwrap();
        assert_eq!(nested.id, ContainerId(spawned.item));
        assert!(nested.auto_fill);
    }

    #[test]
    fn test_spawn_into_full_container_fails_without_creating_items() {
        let (catalog, mut world, sub) = setup();
        let crate_def = catalog.get_by_identifier("crate").unwrap();
        let wrench = catalog.get_by_identifier("wrench").unwrap();

        let crate_item = world.place_item(crate_def, sub, Vec2::ZERO).unwrap();
        world.spawn_into(wrench, ContainerId(crate_item)).unwrap();
        world.spawn_into(wrench, ContainerId(crate_item)).unwrap();
        assert!(world.is_full(ContainerId(crate_item)));

        let before = world.items.len();
        assert!(matches!(
            world.spawn_into(wrench, ContainerId(crate_item)),
            Err(PlacerError::ContainerFull(_))
        ));
        assert_eq!(world.items.len(), before);
    }

    #[test]
    fn test_spawn_into_non_container() {
        let (catalog, mut world, sub) = setup();
        let wrench = catalog.get_by_identifier("wrench").unwrap();
        let item = world.place_item(wrench, sub, Vec2::ZERO).unwrap();

        assert!(world.is_full(ContainerId(item)));
        assert!(matches!(
            world.spawn_into(wrench, ContainerId(item)),
            Err(PlacerError::ContainerNotFound(_))
        ));
    }

    #[test]
    fn test_containers_on_filters_by_structure() {
        let (catalog, mut world, sub) = setup();
        let outpost = world.structures.add("Station", StructureKind::Outpost);
        let crate_def = catalog.get_by_identifier("crate").unwrap();
        let wrench = catalog.get_by_identifier("wrench").unwrap();

        let on_sub = world.place_item(crate_def, sub, Vec2::ZERO).unwrap();
        world.place_item(crate_def, outpost, Vec2::ZERO).unwrap();
        world.place_item(wrench, sub, Vec2::ZERO).unwrap();

        let found = world.containers_on(&[sub]);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ContainerId(on_sub));
        assert!(world.is_outpost(outpost));
    }

    #[test]
    fn test_place_item_on_unknown_structure() {
        let (catalog, mut world, _) = setup();
        let wrench = catalog.get_by_identifier("wrench").unwrap();
        assert!(matches!(
            world.place_item(wrench, StructureId(42), Vec2::ZERO),
            Err(PlacerError::UnknownStructure(_))
        ));
    }
}
