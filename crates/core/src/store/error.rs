//! Error types for the key-value store.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Keys become file names, so they are restricted to `[A-Za-z0-9_-]`.
    #[error("Invalid store key '{0}': only letters, digits, '-' and '_' are allowed")]
    InvalidKey(String),

    #[error("Failed to access store file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize value for key '{key}': {source}")]
    Serialize {
        key: String,
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;
