//! Supply Placer - automatic initial supply placement for vessel containers

pub mod catalog;
pub mod core;
pub mod placement;
pub mod session;
pub mod world;

pub use crate::core::{PlacerConfig, PlacerError, RandSync, Result};
pub use session::{place_if_needed, supply_main_structures, GameModeContext, NetworkRole, PlacementSession};
