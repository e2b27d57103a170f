//! Error types for rekor-types

use thiserror::Error;

/// Errors that can occur while decoding Rekor records
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid hex or base64 data
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// Invalid checkpoint format
    #[error("Invalid checkpoint format: {0}")]
    InvalidCheckpoint(String),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Result type for rekor-types operations
pub type Result<T> = std::result::Result<T, Error>;
