pub mod config;
pub mod error;
pub mod types;

pub use config::{PlacerConfig, RandSync};
pub use error::{PlacerError, Result};
