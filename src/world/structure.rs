//! Structures (vessels, shuttles, outposts) and how they dock together

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::StructureId;

/// What role a structure plays in a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureKind {
    /// The crew's own vessel; supply runs start from these
    Main,
    /// Anything the crew owns that can dock to a main structure
    #[default]
    Auxiliary,
    /// Stations and other structures the crew does not own
    Outpost,
}

/// A structure items are placed on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Structure {
    pub id: StructureId,
    pub name: String,
    pub kind: StructureKind,
    /// Structures rigidly attached to this one (kept symmetric)
    pub docked_to: Vec<StructureId>,
}

impl Structure {
    pub fn is_outpost(&self) -> bool {
        self.kind == StructureKind::Outpost
    }
}

/// All structures of a round and their docking links
#[derive(Debug, Clone, Default)]
pub struct Structures {
    list: Vec<Structure>,
    by_name: AHashMap<String, StructureId>,
}

impl Structures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a structure and return its ID
    pub fn add(&mut self, name: impl Into<String>, kind: StructureKind) -> StructureId {
        let name = name.into();
        let id = StructureId(self.list.len() as u32);
        self.by_name.insert(name.clone(), id);
        self.list.push(Structure {
            id,
            name,
            kind,
            docked_to: Vec::new(),
        });
        id
    }

    /// Dock two structures to each other. Returns false if either is unknown.
    pub fn dock(&mut self, a: StructureId, b: StructureId) -> bool {
        if a == b || self.get(a).is_none() || self.get(b).is_none() {
            return false;
        }
        for (from, to) in [(a, b), (b, a)] {
            let links = &mut self.list[from.0 as usize].docked_to;
            if !links.contains(&to) {
                links.push(to);
            }
        }
        true
    }

    pub fn get(&self, id: StructureId) -> Option<&Structure> {
        self.list.get(id.0 as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<StructureId> {
        self.by_name.get(name).copied()
    }

    /// Main structures in creation order
    pub fn main_structures(&self) -> Vec<StructureId> {
        self.list
            .iter()
            .filter(|s| s.kind == StructureKind::Main)
            .map(|s| s.id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Structure> {
        self.list.iter()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dock_is_symmetric_and_deduplicated() {
        let mut structures = Structures::new();
        let sub = structures.add("Humpback", StructureKind::Main);
        let drone = structures.add("Drone", StructureKind::Auxiliary);

        assert!(structures.dock(sub, drone));
        assert!(structures.dock(drone, sub));

        assert_eq!(structures.get(sub).unwrap().docked_to, vec![drone]);
        assert_eq!(structures.get(drone).unwrap().docked_to, vec![sub]);
    }

    #[test]
    fn test_dock_rejects_unknown_and_self() {
        let mut structures = Structures::new();
        let sub = structures.add("Humpback", StructureKind::Main);
        assert!(!structures.dock(sub, sub));
        assert!(!structures.dock(sub, StructureId(9)));
    }

    #[test]
    fn test_main_structures() {
        let mut structures = Structures::new();
        let coalition = structures.add("Coalition", StructureKind::Main);
        structures.add("Station", StructureKind::Outpost);
        let separatists = structures.add("Separatists", StructureKind::Main);

        assert_eq!(structures.main_structures(), vec![coalition, separatists]);
        assert_eq!(structures.id_by_name("Station"), Some(StructureId(1)));
        assert!(structures.get(StructureId(1)).unwrap().is_outpost());
    }
}
