//! Error types for rekor-client

use thiserror::Error;

/// Errors that can occur in Rekor operations
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(String),

    /// API error
    #[error("API error: {0}")]
    Api(String),

    /// Malformed record
    #[error("Invalid record: {0}")]
    Types(#[from] rekor_types::Error),

    /// Merkle proof error
    #[error("Merkle proof error: {0}")]
    Merkle(#[from] rekor_merkle::Error),

    /// Log entry came back without an inclusion proof
    #[error("log entry {0} has no inclusion proof")]
    MissingInclusionProof(String),

    /// Two descriptions of the same tree head disagree
    #[error("checkpoint mismatch: {0}")]
    CheckpointMismatch(String),
}

/// Result type for Rekor operations
pub type Result<T> = std::result::Result<T, Error>;
