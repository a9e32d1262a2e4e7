//! Live set of containers a session may still place into
//!
//! The pool is an append-only arena with a tombstone set. Candidate lists are
//! snapshots of `ContainerId`s, so containers discovered while a snapshot is
//! being worked through are appended safely and only show up in later
//! queries.

use ahash::AHashSet;

use super::matcher::matches_rule;
use super::services::{ContainerInfo, ItemSpawner};
use crate::catalog::PlacementRule;
use crate::core::types::{ContainerId, StructureId};

/// Containers eligible for placement within one session
#[derive(Debug, Clone, Default)]
pub struct ContainerPool {
    entries: Vec<ContainerInfo>,
    known: AHashSet<ContainerId>,
    evicted: AHashSet<ContainerId>,
}

impl ContainerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the auto-fill containers of every item on `structures`
    pub fn discover<S: ItemSpawner + ?Sized>(spawner: &S, structures: &[StructureId]) -> Self {
        let mut pool = Self::new();
        pool.add(spawner.containers_on(structures));
        pool
    }

    /// Merge newly found containers.
    ///
    /// Auto-fill disabled, already known and evicted containers are ignored.
    pub fn add(&mut self, containers: impl IntoIterator<Item = ContainerInfo>) {
        for container in containers {
            if !container.auto_fill
                || self.evicted.contains(&container.id)
                || !self.known.insert(container.id)
            {
                continue;
            }
            self.entries.push(container);
        }
    }

    /// Evict a container for the rest of the session. Idempotent.
    pub fn remove(&mut self, container: ContainerId) {
        if self.known.contains(&container) {
            self.evicted.insert(container);
        }
    }

    pub fn contains(&self, container: ContainerId) -> bool {
        self.known.contains(&container) && !self.evicted.contains(&container)
    }

    /// Live containers matching the rule's primary (or secondary) tags, in
    /// discovery order, each paired with the rule that selected it
    pub fn find_candidates<'r>(
        &self,
        rule: &'r PlacementRule,
        use_primary: bool,
    ) -> Vec<(ContainerId, &'r PlacementRule)> {
        self.iter()
            .filter(|c| matches_rule(rule, use_primary, c))
            .map(|c| (c.id, rule))
            .collect()
    }

    /// Live containers in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &ContainerInfo> {
        self.entries
            .iter()
            .filter(move |c| !self.evicted.contains(&c.id))
    }

    /// Number of live containers
    pub fn len(&self) -> usize {
        self.known.len() - self.evicted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
