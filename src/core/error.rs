use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColonyError {
    #[error("Unknown terrain kind code: {0}")]
    UnknownTerrain(u8),

    #[error("Unknown unit class code: {0}")]
    UnknownUnitClass(u8),

    #[error("Unknown resource kind code: {0}")]
    UnknownResourceKind(u8),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ColonyError>;
