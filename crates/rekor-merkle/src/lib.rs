//! RFC 6962 Merkle tree verification for transparency logs
//!
//! This crate implements Merkle tree operations as specified in RFC 6962,
//! including inclusion proof and consistency proof verification. It performs
//! no I/O: callers decode hashes to raw bytes and get back a typed [`Error`]
//! naming why a proof was rejected.

pub mod error;
pub mod hasher;
pub mod proof;
pub mod tree;

pub use error::{Error, Result};
pub use hasher::{
    compute_leaf_hash, LogHasher, Rfc6962Hasher, Sha256Hasher, DEFAULT_HASHER, LEAF_HASH_PREFIX,
    NODE_HASH_PREFIX,
};
pub use proof::{root_from_inclusion_proof, verify_consistency, verify_inclusion, verify_match};
pub use tree::{decompose_inclusion_proof, inner_proof_size};
