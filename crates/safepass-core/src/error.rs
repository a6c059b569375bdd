//! Error types for safepass-core

use thiserror::Error;

/// Result type alias using safepass-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in safepass-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Required credential fields missing or empty
    #[error("Invalid credential: {0}")]
    Validation(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Key/value storage error
    #[error("Storage error: {0}")]
    Storage(String),
}
