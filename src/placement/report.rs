//! Diagnostics of a placement session

use serde::{Deserialize, Serialize};

use crate::catalog::DefinitionCatalog;
use crate::core::types::{ContainerId, DefinitionId, ItemId, SessionId, StructureId};

/// Engine stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Container-bearing definitions, shuffled
    Containers,
    /// Container-bearing definitions that placed nothing in the first pass
    ContainerRetry,
    /// Definitions without containers, shuffled
    Containerless,
}

/// One spawned item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRecord {
    pub item: ItemId,
    pub definition: DefinitionId,
    pub container: ContainerId,
    pub pass: Pass,
}

/// Per-pass counters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    pub pass: Pass,
    /// Definitions evaluated
    pub attempted: u32,
    /// Definitions that placed at least one unit
    pub succeeded: u32,
    /// Units placed
    pub units: u32,
}

impl PassStats {
    pub fn new(pass: Pass) -> Self {
        Self {
            pass,
            attempted: 0,
            succeeded: 0,
            units: 0,
        }
    }
}

/// Complete session output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementReport {
    pub session_id: SessionId,
    /// Structures the session was scoped to, root first
    pub structures: Vec<StructureId>,
    /// Containers in the pool when placement started
    pub initial_containers: usize,
    pub spawned: Vec<SpawnRecord>,
    /// Definitions that could not be resolved
    pub faults: Vec<DefinitionId>,
    pub passes: Vec<PassStats>,
}

impl PlacementReport {
    pub fn new(session_id: SessionId, structures: Vec<StructureId>) -> Self {
        Self {
            session_id,
            structures,
            initial_containers: 0,
            spawned: Vec::new(),
            faults: Vec::new(),
            passes: Vec::new(),
        }
    }

    /// Units spawned for one definition
    pub fn count_of(&self, definition: DefinitionId) -> usize {
        self.spawned
            .iter()
            .filter(|r| r.definition == definition)
            .count()
    }

    /// Spawn counts per definition, in order of first appearance
    pub fn counts_by_definition(&self) -> Vec<(DefinitionId, usize)> {
        let mut counts: Vec<(DefinitionId, usize)> = Vec::new();
        for record in &self.spawned {
            match counts.iter_mut().find(|(d, _)| *d == record.definition) {
                Some((_, n)) => *n += 1,
                None => counts.push((record.definition, 1)),
            }
        }
        counts
    }

    pub fn pass(&self, pass: Pass) -> Option<&PassStats> {
        self.passes.iter().find(|p| p.pass == pass)
    }

    /// Human-readable list of placed items, one " - name xN" line each
    pub fn summary(&self, catalog: &DefinitionCatalog) -> String {
        let mut out = format!(
            "Automatically placed items ({} units, {} containers at start):",
            self.spawned.len(),
            self.initial_containers
        );
        for (definition, count) in self.counts_by_definition() {
            let name = catalog
                .get(definition)
                .map(|d| d.identifier.as_str())
                .unwrap_or("<unknown>");
            out.push_str(&format!("\n - {} x{}", name, count));
        }
        out
    }
}
