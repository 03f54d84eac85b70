use thiserror::Error;

use crate::core::types::UnitId;

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Unit not found: {0:?}")]
    UnitNotFound(UnitId),

    #[error("No unit matching: {0}")]
    MissingUnit(String),

    #[error("Invalid direction: ({dx}, {dy}) is not a single axis-aligned step")]
    InvalidDirection { dx: i32, dy: i32 },

    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    #[error("Scenario error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;
