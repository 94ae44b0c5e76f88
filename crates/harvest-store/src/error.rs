//! Store error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when using the store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open or create the store directory.
    #[error("Failed to open store at {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to serialize or deserialize a value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A read or write against one key failed.
    #[error("Store operation failed for key '{key}': {source}")]
    Operation {
        key: String,
        source: std::io::Error,
    },

    /// Key contains path separators or other rejected characters.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}
