//! Item instances and their containers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::catalog::TagSet;
use crate::core::error::{PlacerError, Result};
use crate::core::types::{ContainerId, DefinitionId, ItemId, StructureId};

/// Capacity-bounded slots belonging to one item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub capacity: u32,
    /// Containers with auto-fill disabled are never placement targets
    pub auto_fill: bool,
    /// Identifying tags rules are matched against
    pub tags: TagSet,
    contents: Vec<ItemId>,
}

impl Container {
    pub fn new(capacity: u32, auto_fill: bool, tags: TagSet) -> Self {
        Self {
            capacity,
            auto_fill,
            tags,
            contents: Vec::new(),
        }
    }

    pub fn occupancy(&self) -> u32 {
        self.contents.len() as u32
    }

    pub fn free_slots(&self) -> u32 {
        self.capacity.saturating_sub(self.occupancy())
    }

    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    pub fn contents(&self) -> &[ItemId] {
        &self.contents
    }

    /// Put an item into a free slot
    pub fn try_insert(&mut self, owner: ItemId, item: ItemId) -> Result<()> {
        if self.is_full() {
            return Err(PlacerError::ContainerFull(ContainerId(owner)));
        }
        self.contents.push(item);
        Ok(())
    }
}

/// A concrete item in the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemInstance {
    pub id: ItemId,
    pub definition: DefinitionId,
    pub structure: StructureId,
    pub position: Vec2,
    /// Container this item was put into, if any
    pub parent: Option<ContainerId>,
    pub container: Option<Container>,
}

/// Arena of all item instances; IDs are indices and never reused
#[derive(Debug, Clone, Default)]
pub struct ItemStore {
    items: Vec<ItemInstance>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an item and return its ID
    pub fn spawn(
        &mut self,
        definition: DefinitionId,
        structure: StructureId,
        position: Vec2,
        container: Option<Container>,
    ) -> ItemId {
        let id = ItemId(self.items.len() as u32);
        self.items.push(ItemInstance {
            id,
            definition,
            structure,
            position,
            parent: None,
            container,
        });
        id
    }

    pub fn get(&self, id: ItemId) -> Option<&ItemInstance> {
        self.items.get(id.index())
    }

    pub fn get_mut(&mut self, id: ItemId) -> Option<&mut ItemInstance> {
        self.items.get_mut(id.index())
    }

    /// Container owned by an item
    pub fn container(&self, id: ContainerId) -> Option<&Container> {
        self.get(id.owner()).and_then(|item| item.container.as_ref())
    }

    pub fn container_mut(&mut self, id: ContainerId) -> Option<&mut Container> {
        self.get_mut(id.owner()).and_then(|item| item.container.as_mut())
    }

    /// Items placed on any of the given structures
    pub fn on_structures<'a>(
        &'a self,
        structures: &'a [StructureId],
    ) -> impl Iterator<Item = &'a ItemInstance> + 'a {
        self.items
            .iter()
            .filter(move |item| structures.contains(&item.structure))
    }

    /// Number of instances of a definition
    pub fn count_of(&self, definition: DefinitionId) -> usize {
        self.items
            .iter()
            .filter(|item| item.definition == definition)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemInstance> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_capacity() {
        let mut container = Container::new(2, true, TagSet::new());
        assert!(container.try_insert(ItemId(0), ItemId(1)).is_ok());
        assert!(container.try_insert(ItemId(0), ItemId(2)).is_ok());
        assert!(container.is_full());
        assert!(matches!(
            container.try_insert(ItemId(0), ItemId(3)),
            Err(PlacerError::ContainerFull(ContainerId(ItemId(0))))
        ));
        assert_eq!(container.occupancy(), 2);
        assert_eq!(container.contents(), &[ItemId(1), ItemId(2)]);
    }

    #[test]
    fn test_zero_capacity_container_is_full() {
        let container = Container::new(0, true, TagSet::new());
        assert!(container.is_full());
        assert_eq!(container.free_slots(), 0);
    }

    #[test]
    fn test_store_spawn_and_filter() {
        let mut store = ItemStore::new();
        let crate_id = store.spawn(
            DefinitionId(0),
            StructureId(0),
            Vec2::new(1.0, 2.0),
            Some(Container::new(4, true, TagSet::new())),
        );
        store.spawn(DefinitionId(1), StructureId(1), Vec2::ZERO, None);

        assert_eq!(store.len(), 2);
        assert!(store.container(ContainerId(crate_id)).is_some());
        assert!(store.container(ContainerId(ItemId(1))).is_none());

        let main_only = [StructureId(0)];
        let on_main: Vec<_> = store.on_structures(&main_only).collect();
        assert_eq!(on_main.len(), 1);
        assert_eq!(on_main[0].id, crate_id);
        assert_eq!(store.count_of(DefinitionId(1)), 1);
    }
}
