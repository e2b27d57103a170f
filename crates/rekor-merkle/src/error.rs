//! Error types for rekor-merkle

use thiserror::Error;

/// Reasons a Merkle proof is rejected
///
/// Every variant is terminal: it describes a malformed or fraudulent proof,
/// never a transient condition worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Claimed leaf index is not inside the claimed tree
    #[error("index is beyond size: {index} >= {size}")]
    IndexOutOfRange { index: u64, size: u64 },

    /// Leaf hash length differs from the hasher's digest size
    #[error("leaf hash has unexpected size {got}, want {want}")]
    InvalidLeafHashSize { got: usize, want: usize },

    /// Proof length differs from the length dictated by the tree shape
    #[error("wrong proof size {got}, want {want}")]
    WrongProofSize { got: usize, want: usize },

    /// Consistency proof is empty although the trees differ
    #[error("empty consistency proof")]
    EmptyProof,

    /// Proof carries hashes where none are expected
    #[error("expected empty proof, but got {got} components")]
    UnexpectedProofData { got: usize },

    /// New tree is smaller than the old tree
    #[error("new tree size {new_size} < old tree size {old_size}")]
    SizeRegression { old_size: u64, new_size: u64 },

    /// Recomputed root differs from the claimed root
    #[error(
        "calculated root {} does not match expected root {}",
        hex::encode(calculated),
        hex::encode(expected)
    )]
    RootMismatch {
        expected: Vec<u8>,
        calculated: Vec<u8>,
    },
}

/// Result type for Merkle proof operations
pub type Result<T> = std::result::Result<T, Error>;
