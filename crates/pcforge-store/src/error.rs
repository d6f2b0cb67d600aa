//! Store error types.

use pcforge_core::{BuildId, PcForgeError};
use thiserror::Error;

/// Errors that can occur when reading or writing builds.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No build with this id.
    #[error("Build not found: {0}")]
    NotFound(BuildId),

    /// The store file could not be read or written.
    #[error("I/O error: {0}")]
    Io(String),

    /// The store file could not be parsed or produced.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A workflow rule refused the operation.
    #[error("Policy violation: {0}")]
    PolicyViolation(String),

    /// The domain model refused the operation.
    #[error(transparent)]
    Domain(#[from] PcForgeError),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
