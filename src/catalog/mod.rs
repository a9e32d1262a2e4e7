//! Item definitions, placement rules and the catalog that owns them

pub mod definition;
pub mod loader;
pub mod registry;
pub mod tags;

pub use definition::{ContainerSpec, ItemDefinition, PlacementRule};
pub use loader::{parse_catalog, CatalogFile, DefinitionSpec, RuleSpec};
pub use registry::DefinitionCatalog;
pub use tags::{TagRegistry, TagSet};
