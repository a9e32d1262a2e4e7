//! Placement sessions and the collaborator-facing entry point
//!
//! A session places supplies on one main structure and everything docked to
//! it. `place_if_needed` runs one session per main structure, at most once
//! per campaign, and only on the authoritative participant.

pub mod context;

pub use context::{CampaignState, GameModeContext, NetworkRole};

use ahash::AHashSet;
use rand::Rng;
use std::collections::VecDeque;

use crate::catalog::DefinitionCatalog;
use crate::core::config::PlacerConfig;
use crate::core::error::{PlacerError, Result};
use crate::core::types::{DefinitionId, SessionId, StructureId};
use crate::placement::engine::PlacementEngine;
use crate::placement::pool::ContainerPool;
use crate::placement::report::PlacementReport;
use crate::placement::services::{ItemSpawner, StructureTopology};

/// Validated runner for placement sessions
#[derive(Debug, Clone)]
pub struct PlacementSession<'c> {
    config: &'c PlacerConfig,
}

impl<'c> PlacementSession<'c> {
    /// Fails on a non-authoritative participant
    pub fn new(role: NetworkRole, config: &'c PlacerConfig) -> Result<Self> {
        if !role.is_authoritative() {
            return Err(PlacerError::InvalidExecutionContext(role));
        }
        Ok(Self { config })
    }

    /// `root` plus every structure docked to it, directly or through another
    /// docked structure. Outposts are left out (and not walked through) unless
    /// the config says otherwise.
    pub fn scope<T: StructureTopology + ?Sized>(
        &self,
        topology: &T,
        root: StructureId,
    ) -> Vec<StructureId> {
        let mut scope = vec![root];
        let mut seen: AHashSet<StructureId> = AHashSet::new();
        seen.insert(root);
        let mut queue = VecDeque::from([root]);

        while let Some(current) = queue.pop_front() {
            for docked in topology.docked_to(current) {
                if self.config.exclude_outposts && topology.is_outpost(docked) {
                    continue;
                }
                if seen.insert(docked) {
                    scope.push(docked);
                    queue.push_back(docked);
                }
            }
        }
        scope
    }

    /// Place every definition of the catalog on `root`'s scope
    pub fn run<W, R>(
        &self,
        catalog: &DefinitionCatalog,
        world: &mut W,
        root: StructureId,
        rng: R,
    ) -> PlacementReport
    where
        W: ItemSpawner + StructureTopology + ?Sized,
        R: Rng,
    {
        let definitions: Vec<DefinitionId> = catalog.ids().collect();
        self.run_definitions(catalog, &definitions, world, root, rng)
    }

    /// Place only the given definitions on `root`'s scope
    pub fn run_definitions<W, R>(
        &self,
        catalog: &DefinitionCatalog,
        definitions: &[DefinitionId],
        world: &mut W,
        root: StructureId,
        rng: R,
    ) -> PlacementReport
    where
        W: ItemSpawner + StructureTopology + ?Sized,
        R: Rng,
    {
        let structures = self.scope(&*world, root);
        let pool = ContainerPool::discover(&*world, &structures);
        let report = PlacementReport::new(SessionId::new(), structures);

        tracing::debug!(
            "Session {} discovered {} containers on {} structures",
            report.session_id,
            pool.len(),
            report.structures.len()
        );

        let mut engine = PlacementEngine::new(world, rng, pool, report);
        engine.run(catalog, definitions);
        let report = engine.finish();

        if self.config.output_debug_info {
            for line in report.summary(catalog).lines() {
                tracing::info!("{}", line);
            }
        }
        tracing::info!(
            "Session {} placed {} items ({} faults)",
            report.session_id,
            report.spawned.len(),
            report.faults.len()
        );
        report
    }
}

/// Run one session per main structure, sharing one random source
pub fn supply_main_structures<W>(
    role: NetworkRole,
    catalog: &DefinitionCatalog,
    world: &mut W,
    config: &PlacerConfig,
) -> Result<Vec<PlacementReport>>
where
    W: ItemSpawner + StructureTopology + ?Sized,
{
    let session = PlacementSession::new(role, config)?;
    config.validate()?;
    let mut rng = config.make_rng();

    let mut reports = Vec::new();
    for root in world.main_structures() {
        reports.push(session.run(catalog, &mut *world, root, &mut rng));
    }
    Ok(reports)
}

/// Place starting supplies if this context has not received them yet.
///
/// Non-authoritative participants are refused with an error log and no
/// state change. Campaigns are marked afterwards so later calls are no-ops.
pub fn place_if_needed<W>(
    context: &mut GameModeContext,
    catalog: &DefinitionCatalog,
    world: &mut W,
    config: &PlacerConfig,
) where
    W: ItemSpawner + StructureTopology + ?Sized,
{
    if !context.role.is_authoritative() {
        tracing::error!("{}", PlacerError::InvalidExecutionContext(context.role));
        return;
    }
    if context.supplies_already_placed() {
        tracing::debug!("Initial supplies already placed, skipping");
        return;
    }

    match supply_main_structures(context.role, catalog, world, config) {
        Ok(reports) => {
            let total: usize = reports.iter().map(|r| r.spawned.len()).sum();
            tracing::info!(
                "Placed {} initial supply items across {} structures",
                total,
                reports.len()
            );
        }
        Err(e) => {
            tracing::error!("Initial supply placement failed: {}", e);
            return;
        }
    }
    context.mark_supplies_placed();
}
