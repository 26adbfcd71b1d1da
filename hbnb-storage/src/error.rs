//! Error types for the storage layer.

use hbnb_model::ModelError;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backing file could not be encoded or parsed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Type resolution or entity construction failed.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl StorageError {
    /// True when the error is an unregistered type name.
    pub fn is_unknown_type(&self) -> bool {
        matches!(self, Self::Model(ModelError::UnknownType(_)))
    }
}
