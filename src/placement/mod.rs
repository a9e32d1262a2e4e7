//! Automatic supply placement
//!
//! Matching, the container pool, the multi-pass engine and its diagnostics.
//! The services module declares what placement needs from the outside world.

pub mod engine;
pub mod matcher;
pub mod pool;
pub mod report;
pub mod services;

pub use engine::PlacementEngine;
pub use matcher::{matches, matches_rule};
pub use pool::ContainerPool;
pub use report::{Pass, PassStats, PlacementReport, SpawnRecord};
pub use services::{ContainerInfo, ItemSpawner, SpawnedItem, StructureTopology};
