//! Record types for the Rekor transparency log API
//!
//! This crate provides the data structures exchanged with a Rekor log:
//! log entries with their inclusion proofs, tree heads (checkpoints) and
//! consistency proofs. Hashes stay in their wire encoding until decoded.

pub mod checkpoint;
pub mod encoding;
pub mod entry;
pub mod error;
pub mod log;

pub use checkpoint::{Checkpoint, CheckpointSignature, SignedCheckpoint, TreeId};
pub use encoding::{decode_hashes, Base64, Hex};
pub use entry::{
    parse_log_entry_response, single_entry, InclusionProof, LogEntry, LogEntryResponse,
    Verification,
};
pub use error::{Error, Result};
pub use log::{ConsistencyProof, InactiveShard, LogInfo};
