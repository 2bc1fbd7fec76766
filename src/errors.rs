// src/errors.rs

//! Crate-wide error aliases and helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExecHookError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Item {item_id} has no status field '{field}'")]
    FieldMissing { item_id: String, field: String },

    #[error("Item {item_id} status field '{field}' has an unexpected type")]
    FieldType { item_id: String, field: String },

    #[error("No pre-removal snapshot for item: {0}")]
    SnapshotNotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ExecHookError {
    /// True for the lookup class of errors (item, field or snapshot missing).
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ExecHookError::ItemNotFound(_)
                | ExecHookError::FieldMissing { .. }
                | ExecHookError::SnapshotNotFound(_)
        )
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ExecHookError>;
