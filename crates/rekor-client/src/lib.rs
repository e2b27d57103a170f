//! Rekor transparency log client
//!
//! This crate fetches tree heads, log entries and consistency proofs from a
//! Rekor instance and checks them against the Merkle tree they commit to.

pub mod client;
pub mod error;
pub mod verify;

pub use client::{RekorClient, PUBLIC_REKOR_URL, STAGING_REKOR_URL};
pub use error::{Error, Result};
pub use verify::{verify_consistency_with, verify_entry_inclusion, verify_log_info};
