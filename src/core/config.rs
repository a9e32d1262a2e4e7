//! Placement run configuration
//!
//! Everything a caller can tune about a placement session lives here. The
//! engine itself reads nothing from ambient state; a `PlacerConfig` is passed
//! explicitly to every session.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::error::{PlacerError, Result};

/// How the random source of a session is seeded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandSync {
    /// Seeded from `PlacerConfig::seed`, so every participant that runs the
    /// same session with the same seed draws the same numbers
    Synced,
    /// Seeded from OS entropy
    #[default]
    Unsynced,
}

/// Configuration for placement sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacerConfig {
    /// Seed used when `rand_sync` is `Synced`
    pub seed: u64,

    /// Whether sessions draw from a seeded or an entropy-seeded source
    pub rand_sync: RandSync,

    /// Log a per-definition summary of spawned items after each session
    ///
    /// Off by default; placement shortfalls are not errors and stay silent
    /// unless this is requested.
    pub output_debug_info: bool,

    /// Leave outpost-like structures docked to a main structure out of scope
    pub exclude_outposts: bool,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            seed: 12345,
            rand_sync: RandSync::Unsynced,
            output_debug_info: false,
            exclude_outposts: true,
        }
    }
}

impl PlacerConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PlacerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !self.exclude_outposts {
            tracing::warn!("exclude_outposts is disabled, outposts will receive supplies");
        }
        if self.rand_sync == RandSync::Synced && self.seed == 0 {
            return Err(PlacerError::InvalidConfig(
                "synced placement needs a non-zero seed".into(),
            ));
        }
        Ok(())
    }

    /// Build the random source a session draws from
    pub fn make_rng(&self) -> ChaCha8Rng {
        match self.rand_sync {
            RandSync::Synced => ChaCha8Rng::seed_from_u64(self.seed),
            RandSync::Unsynced => ChaCha8Rng::from_entropy(),
        }
    }
}
