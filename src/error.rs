use thiserror::Error;

#[derive(Error, Debug)]
pub enum BeerNoterError {
    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown brewery: {0}")]
    UnknownGroup(u64),

    #[error("Unknown beer {entry_id} in brewery {group_id}")]
    UnknownEntry { group_id: u64, entry_id: u64 },

    #[error("Beer {entry_id} in brewery {group_id} is part of the bundled catalog and cannot be removed")]
    NotUserAuthored { group_id: u64, entry_id: u64 },

    #[error("CLI error: {0}")]
    Cli(String),

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, BeerNoterError>;
