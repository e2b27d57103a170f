//! Rekor log entry types

use crate::checkpoint::SignedCheckpoint;
use crate::encoding::{decode_hashes, Base64, Hex};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A log entry from Rekor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    /// UUID of the entry (the key in the response map)
    #[serde(skip)]
    pub uuid: String,
    /// Body of the entry (base64 encoded canonicalized body)
    pub body: Base64,
    /// Integrated time (Unix timestamp)
    pub integrated_time: i64,
    /// Log ID (hex-encoded SHA-256 of the log's public key)
    #[serde(rename = "logID")]
    pub log_id: Hex,
    /// Log index
    pub log_index: u64,
    /// Verification data
    #[serde(default)]
    pub verification: Option<Verification>,
}

impl LogEntry {
    /// The inclusion proof, if Rekor returned one
    pub fn inclusion_proof(&self) -> Option<&InclusionProof> {
        self.verification
            .as_ref()
            .and_then(|v| v.inclusion_proof.as_ref())
    }
}

/// Verification data for a log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Verification {
    /// Inclusion proof
    #[serde(default)]
    pub inclusion_proof: Option<InclusionProof>,
    /// Signed entry timestamp (SET)
    #[serde(default)]
    pub signed_entry_timestamp: Option<Base64>,
}

/// Inclusion proof from the Rekor V1 API.
///
/// Hashes are hex-encoded and ordered from the leaf upwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InclusionProof {
    /// Checkpoint (signed tree head) the proof was computed against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkpoint: Option<String>,
    /// Hashes in the proof path
    pub hashes: Vec<Hex>,
    /// Log index of the entry within its shard
    pub log_index: u64,
    /// Root hash
    pub root_hash: Hex,
    /// Tree size
    pub tree_size: u64,
}

impl InclusionProof {
    /// Decode the proof hashes to raw bytes
    pub fn decode_hashes(&self) -> Result<Vec<Vec<u8>>> {
        decode_hashes(&self.hashes)
    }

    /// Decode the root hash to raw bytes
    pub fn decode_root_hash(&self) -> Result<Vec<u8>> {
        self.root_hash.decode()
    }

    /// Parse the attached checkpoint, if there is one
    pub fn signed_checkpoint(&self) -> Result<Option<SignedCheckpoint>> {
        self.checkpoint
            .as_deref()
            .map(SignedCheckpoint::from_text)
            .transpose()
    }
}

/// Response from fetching or creating a log entry (map of UUID to LogEntry)
pub type LogEntryResponse = HashMap<String, LogEntry>;

/// Extract the single entry of a response, filling in its UUID
pub fn single_entry(response: LogEntryResponse) -> Result<LogEntry> {
    let (uuid, mut entry) = response
        .into_iter()
        .next()
        .ok_or_else(|| Error::MissingField("log entry".to_string()))?;

    entry.uuid = uuid;
    Ok(entry)
}

/// Parse a log entry response body
pub fn parse_log_entry_response(json: &str) -> Result<LogEntry> {
    let response: LogEntryResponse = serde_json::from_str(json)?;
    single_entry(response)
}
