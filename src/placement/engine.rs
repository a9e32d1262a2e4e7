//! Multi-pass supply placement
//!
//! The engine places items in three passes over the pool:
//!
//! 1. Definitions whose items provide a container, in random order. Spawning
//!    these first means the items placed later can go inside them (oxygen
//!    tanks inside diving masks, magazines inside guns).
//! 2. The container-bearing definitions that placed nothing in pass 1, once
//!    more. Pass 1 may have created the containers they were waiting for.
//! 3. Definitions without containers, in random order.
//!
//! Nothing is rolled back. A definition that finds no container, or loses
//! every probability draw, is simply absent from the result.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

use super::pool::ContainerPool;
use super::report::{Pass, PassStats, PlacementReport, SpawnRecord};
use super::services::ItemSpawner;
use crate::catalog::{DefinitionCatalog, ItemDefinition, PlacementRule};
use crate::core::types::{ContainerId, DefinitionId};

/// Places items into the containers of a pool
pub struct PlacementEngine<'a, S: ItemSpawner + ?Sized, R: Rng> {
    spawner: &'a mut S,
    rng: R,
    pool: ContainerPool,
    report: PlacementReport,
    pass: Pass,
}

impl<'a, S: ItemSpawner + ?Sized, R: Rng> PlacementEngine<'a, S, R> {
    pub fn new(spawner: &'a mut S, rng: R, pool: ContainerPool, mut report: PlacementReport) -> Self {
        report.initial_containers = pool.len();
        Self {
            spawner,
            rng,
            pool,
            report,
            pass: Pass::Containers,
        }
    }

    pub fn pool(&self) -> &ContainerPool {
        &self.pool
    }

    pub fn report(&self) -> &PlacementReport {
        &self.report
    }

    /// Consume the engine, returning its diagnostics
    pub fn finish(self) -> PlacementReport {
        self.report
    }

    /// Run all three passes over `definitions`
    pub fn run(&mut self, catalog: &DefinitionCatalog, definitions: &[DefinitionId]) {
        let mut with_container: Vec<&ItemDefinition> = Vec::new();
        let mut without_container: Vec<&ItemDefinition> = Vec::new();

        for &id in definitions {
            match catalog.get(id) {
                Some(definition) if definition.provides_container() => {
                    with_container.push(definition)
                }
                Some(definition) => without_container.push(definition),
                None => {
                    self.spawn_for_definition(id, None);
                }
            }
        }

        with_container.shuffle(&mut self.rng);
        let placed = self.run_pass(Pass::Containers, &with_container);

        with_container.retain(|d| !placed.contains(&d.id));
        self.run_pass(Pass::ContainerRetry, &with_container);

        without_container.shuffle(&mut self.rng);
        self.run_pass(Pass::Containerless, &without_container);
    }

    /// Returns the definitions that placed at least one unit
    fn run_pass(&mut self, pass: Pass, definitions: &[&ItemDefinition]) -> AHashSet<DefinitionId> {
        self.pass = pass;
        let mut stats = PassStats::new(pass);
        let mut placed = AHashSet::new();
        let units_before = self.report.spawned.len();

        for &definition in definitions {
            stats.attempted += 1;
            if self.spawn_for_definition(definition.id, Some(definition)) {
                stats.succeeded += 1;
                placed.insert(definition.id);
            }
        }

        stats.units = (self.report.spawned.len() - units_before) as u32;
        tracing::debug!(
            "{:?} pass: {}/{} definitions placed {} units, {} containers left",
            pass,
            stats.succeeded,
            stats.attempted,
            stats.units,
            self.pool.len()
        );
        self.report.passes.push(stats);
        placed
    }

    /// Walk a definition's rules in declared order and place into every
    /// matching container.
    ///
    /// A missing definition is a configuration fault: it is logged and
    /// skipped, never fatal.
    pub fn spawn_for_definition(
        &mut self,
        id: DefinitionId,
        definition: Option<&ItemDefinition>,
    ) -> bool {
        let Some(definition) = definition else {
            tracing::error!("Item definition {:?} is missing, skipping its placement", id);
            self.report.faults.push(id);
            return false;
        };

        let mut success = false;
        for rule in definition.active_rules() {
            let mut candidates = self.pool.find_candidates(rule, true);
            if candidates.is_empty() {
                candidates = self.pool.find_candidates(rule, false);
            }
            for (container, rule) in candidates {
                if self.spawn_one(definition, container, rule) {
                    success = true;
                }
            }
        }
        success
    }

    /// Roll the rule's probability once for this container, then place up to
    /// a random count of units while the container has room.
    pub fn spawn_one(
        &mut self,
        definition: &ItemDefinition,
        container: ContainerId,
        rule: &PlacementRule,
    ) -> bool {
        if rule.is_inert() || self.rng.gen::<f32>() > rule.spawn_probability {
            return false;
        }
        let count = self
            .rng
            .gen_range(rule.min_amount.min(rule.max_amount)..=rule.max_amount);

        let mut success = false;
        for _ in 0..count {
            if !self.pool.contains(container) || self.spawner.is_full(container) {
                self.pool.remove(container);
                break;
            }

            match self.spawner.spawn_into(definition, container) {
                Ok(spawned) => {
                    tracing::debug!(
                        "Placed {} ({:?}) into {:?}",
                        definition.identifier,
                        spawned.item,
                        container
                    );
                    self.report.spawned.push(SpawnRecord {
                        item: spawned.item,
                        definition: definition.id,
                        container,
                        pass: self.pass,
                    });
                    if let Some(nested) = spawned.container {
                        self.pool.add([nested]);
                    }
                    success = true;

                    if self.spawner.is_full(container) {
                        self.pool.remove(container);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to place {} into {:?}: {}",
                        definition.identifier,
                        container,
                        e
                    );
                    self.pool.remove(container);
                    break;
                }
            }
        }
        success
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DefinitionSpec, RuleSpec};
    use crate::core::types::{ItemId, SessionId, StructureId};
    use crate::world::{StructureKind, World};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    struct Fixture {
        catalog: DefinitionCatalog,
        world: World,
        sub: StructureId,
    }

    impl Fixture {
        fn new(specs: Vec<DefinitionSpec>) -> Self {
            let mut catalog = DefinitionCatalog::new();
            for spec in specs {
                catalog.register(spec).unwrap();
            }
            let mut world = World::new();
            let sub = world.structures.add("Humpback", StructureKind::Main);
            Self { catalog, world, sub }
        }

        fn place(&mut self, identifier: &str) -> ContainerId {
            let definition = self.catalog.get_by_identifier(identifier).unwrap();
            ContainerId(self.world.place_item(definition, self.sub, Vec2::ZERO).unwrap())
        }

        fn engine(&mut self, seed: u64) -> PlacementEngine<'_, World, ChaCha8Rng> {
            let pool = ContainerPool::discover(&self.world, &[self.sub]);
            PlacementEngine::new(
                &mut self.world,
                ChaCha8Rng::seed_from_u64(seed),
                pool,
                PlacementReport::new(SessionId::new(), vec![self.sub]),
            )
        }

        fn id(&self, identifier: &str) -> DefinitionId {
            self.catalog.id_by_identifier(identifier).unwrap()
        }
    }

    #[test]
    fn test_certain_rule_places_exact_count() {
        let mut fx = Fixture::new(vec![
            DefinitionSpec::new("locker").with_container(10),
            DefinitionSpec::new("flare").with_rule(RuleSpec::targeting(["locker"]).amount(4, 4)),
        ]);
        let locker = fx.place("locker");
        let flare = fx.catalog.get_by_identifier("flare").unwrap().clone();

        let mut engine = fx.engine(1);
        assert!(engine.spawn_for_definition(flare.id, Some(&flare)));
        let report = engine.finish();

        assert_eq!(report.count_of(flare.id), 4);
        assert_eq!(fx.world.contents_of(locker).len(), 4);
    }

    #[test]
    fn test_full_container_evicted_mid_loop() {
        let mut fx = Fixture::new(vec![
            DefinitionSpec::new("locker").with_container(2),
            DefinitionSpec::new("flare").with_rule(RuleSpec::targeting(["locker"]).amount(5, 5)),
        ]);
        let locker = fx.place("locker");
        let flare = fx.catalog.get_by_identifier("flare").unwrap().clone();

        let mut engine = fx.engine(2);
        assert!(engine.spawn_for_definition(flare.id, Some(&flare)));
        assert!(!engine.pool().contains(locker));
        engine.finish();

        assert_eq!(fx.world.contents_of(locker).len(), 2);
    }

    #[test]
    fn test_primary_tags_take_precedence() {
        let mut fx = Fixture::new(vec![
            DefinitionSpec::new("medcabinet").with_container(10),
            DefinitionSpec::new("crate").with_container(10),
            DefinitionSpec::new("bandage")
                .with_rule(RuleSpec::targeting(["medcabinet"]).or_else(["crate"])),
        ]);
        let cabinet = fx.place("medcabinet");
        let crate_box = fx.place("crate");
        let bandage = fx.catalog.get_by_identifier("bandage").unwrap().clone();

        let mut engine = fx.engine(3);
        engine.spawn_for_definition(bandage.id, Some(&bandage));
        engine.finish();

        assert_eq!(fx.world.contents_of(cabinet).len(), 1);
        assert!(fx.world.contents_of(crate_box).is_empty());
    }

    #[test]
    fn test_secondary_tags_used_when_no_primary_match() {
        let mut fx = Fixture::new(vec![
            DefinitionSpec::new("crate").with_container(10),
            DefinitionSpec::new("bandage")
                .with_rule(RuleSpec::targeting(["medcabinet"]).or_else(["crate"])),
        ]);
        let crate_box = fx.place("crate");
        let bandage = fx.catalog.get_by_identifier("bandage").unwrap().clone();

        let mut engine = fx.engine(4);
        assert!(engine.spawn_for_definition(bandage.id, Some(&bandage)));
        engine.finish();

        assert_eq!(fx.world.contents_of(crate_box).len(), 1);
    }

    #[test]
    fn test_missing_definition_is_recorded_fault() {
        let mut fx = Fixture::new(vec![DefinitionSpec::new("crate").with_container(1)]);
        fx.place("crate");

        let mut engine = fx.engine(5);
        assert!(!engine.spawn_for_definition(DefinitionId(77), None));
        let report = engine.finish();
        assert_eq!(report.faults, vec![DefinitionId(77)]);
        assert!(report.spawned.is_empty());
    }

    #[test]
    fn test_nested_container_joins_pool() {
        let mut fx = Fixture::new(vec![
            DefinitionSpec::new("weaponholder").with_container(1),
            DefinitionSpec::new("smg")
                .with_container(1)
                .with_rule(RuleSpec::targeting(["weaponholder"])),
            DefinitionSpec::new("smgmagazine").with_rule(RuleSpec::targeting(["smg"])),
        ]);
        let holder = fx.place("weaponholder");
        let smg = fx.id("smg");
        let magazine = fx.id("smgmagazine");

        let catalog = fx.catalog.clone();
        let mut engine = fx.engine(6);
        engine.run(&catalog, &[magazine, smg]);
        let report = engine.finish();

        assert_eq!(report.count_of(smg), 1);
        assert_eq!(report.count_of(magazine), 1);

        let gun = fx.world.contents_of(holder)[0];
        assert_eq!(fx.world.contents_of(ContainerId(gun)).len(), 1);
    }

    #[test]
    fn test_retry_pass_reaches_containers_created_in_first_pass() {
        // The magazine is itself a container, so both definitions land in the
        // shuffled first pass; whichever order they run in, the magazine ends
        // up inside the gun by the end of the retry pass.
        for seed in 0..20 {
            let mut fx = Fixture::new(vec![
                DefinitionSpec::new("weaponholder").with_container(1),
                DefinitionSpec::new("smg")
                    .with_container(1)
                    .with_rule(RuleSpec::targeting(["weaponholder"])),
                DefinitionSpec::new("smgmagazine")
                    .with_container(20)
                    .with_rule(RuleSpec::targeting(["smg"])),
            ]);
            fx.place("weaponholder");
            let smg = fx.id("smg");
            let magazine = fx.id("smgmagazine");

            let catalog = fx.catalog.clone();
            let mut engine = fx.engine(seed);
            engine.run(&catalog, &[smg, magazine]);
            let report = engine.finish();

            assert_eq!(report.count_of(magazine), 1, "seed {}", seed);
            let retry = report.pass(Pass::ContainerRetry).unwrap();
            assert!(retry.attempted <= 1);
        }
    }

    #[test]
    fn test_run_records_three_passes() {
        let mut fx = Fixture::new(vec![DefinitionSpec::new("crate").with_container(3)]);
        fx.place("crate");
        let crate_id = fx.id("crate");

        let catalog = fx.catalog.clone();
        let mut engine = fx.engine(7);
        engine.run(&catalog, &[crate_id]);
        let report = engine.finish();

        let passes: Vec<Pass> = report.passes.iter().map(|p| p.pass).collect();
        assert_eq!(
            passes,
            vec![Pass::Containers, Pass::ContainerRetry, Pass::Containerless]
        );
        assert_eq!(report.initial_containers, 1);
        assert_eq!(report.pass(Pass::Containers).unwrap().attempted, 1);
        assert_eq!(report.pass(Pass::ContainerRetry).unwrap().attempted, 1);
    }

    #[test]
    fn test_spawn_one_zero_count_places_nothing() {
        let mut fx = Fixture::new(vec![
            DefinitionSpec::new("crate").with_container(3),
            DefinitionSpec::new("coin").with_rule(RuleSpec::targeting(["crate"]).amount(0, 0)),
        ]);
        let crate_box = fx.place("crate");
        let coin = fx.catalog.get_by_identifier("coin").unwrap().clone();
        let rule = coin.rules[0].clone();

        let mut engine = fx.engine(8);
        assert!(!engine.spawn_one(&coin, crate_box, &rule));
        assert!(engine.pool().contains(crate_box));
        engine.finish();
        assert!(fx.world.contents_of(crate_box).is_empty());
        assert_eq!(fx.world.items.get(ItemId(0)).unwrap().definition, fx.id("crate"));
    }
}
