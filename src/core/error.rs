use thiserror::Error;

use crate::core::types::{ContainerId, StructureId};
use crate::session::NetworkRole;

#[derive(Error, Debug)]
pub enum PlacerError {
    #[error("Item definition not found: {0}")]
    DefinitionNotFound(String),

    #[error("Structure not found: {0}")]
    StructureNotFound(String),

    #[error("Structure defined twice: {0}")]
    DuplicateStructure(String),

    #[error("Invalid docking link: {0}")]
    InvalidDocking(String),

    #[error("Unknown structure id: {0:?}")]
    UnknownStructure(StructureId),

    #[error("Container not found: {0:?}")]
    ContainerNotFound(ContainerId),

    #[error("Container is full: {0:?}")]
    ContainerFull(ContainerId),

    #[error("Invalid placement rule: {0}")]
    InvalidRule(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Placement is not allowed on a {0:?} participant")]
    InvalidExecutionContext(NetworkRole),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PlacerError>;
