//! Checkpoint (signed tree head) types
//!
//! A checkpoint is a commitment to the state of a transparency log: a tree
//! size and the root hash of the tree at that size.
//! Note format specified in: https://github.com/transparency-dev/formats/blob/main/log/README.md

use crate::encoding::{Base64, Hex};
use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a log shard
///
/// Rekor reports tree IDs as strings, older responses and hand-written
/// checkpoints use integers. Both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TreeId(String);

impl TreeId {
    pub fn new(id: impl Into<String>) -> Self {
        TreeId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TreeId {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Text(String),
            Number(u64),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Text(s) => TreeId(s),
            Repr::Number(n) => TreeId(n.to_string()),
        })
    }
}

impl std::fmt::Display for TreeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The state of a log at some point: which tree, how many leaves, which root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    /// Tree ID of the shard
    #[serde(rename = "treeID")]
    pub tree_id: TreeId,
    /// Tree size (number of leaves)
    pub tree_size: u64,
    /// Root hash of the tree at `tree_size` (hex-encoded)
    pub root_hash: Hex,
}

impl Checkpoint {
    /// Load a checkpoint previously saved as JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A checkpoint in signed-note form, as carried in `signedTreeHead`
///
/// Signatures are parsed but not verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedCheckpoint {
    /// The origin string identifying the log
    pub origin: String,
    /// Tree size (number of leaves)
    pub tree_size: u64,
    /// Root hash of the Merkle tree
    pub root_hash: Vec<u8>,
    /// Other data lines (optional extension data)
    pub other_content: Vec<String>,
    /// Signatures over the checkpoint
    pub signatures: Vec<CheckpointSignature>,
}

/// A signature line of a signed note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointSignature {
    /// Name of the signer
    pub name: String,
    /// Key hint followed by the signature, as written in the note
    pub signature: Base64,
}

impl SignedCheckpoint {
    /// Parse a checkpoint from its text representation
    ///
    /// Format:
    /// ```text
    /// <origin>
    /// <tree_size>
    /// <root_hash_base64>
    /// [other_content...]
    ///
    /// — <name> <key_id_and_sig_base64>
    /// [additional signatures...]
    /// ```
    pub fn from_text(text: &str) -> Result<Self> {
        let mut lines = text.lines();

        let origin = lines
            .next()
            .filter(|line| !line.is_empty())
            .ok_or_else(|| Error::InvalidCheckpoint("missing origin".to_string()))?
            .to_string();

        let tree_size = lines
            .next()
            .ok_or_else(|| Error::InvalidCheckpoint("missing tree size".to_string()))?
            .parse()
            .map_err(|_| Error::InvalidCheckpoint("invalid tree size".to_string()))?;

        let root_hash_b64 = lines
            .next()
            .ok_or_else(|| Error::InvalidCheckpoint("missing root hash".to_string()))?;
        let root_hash = Base64::new(root_hash_b64)
            .decode()
            .map_err(|_| Error::InvalidCheckpoint("invalid root hash base64".to_string()))?;

        let mut other_content = Vec::new();
        let mut signatures = Vec::new();

        for line in lines {
            if line.is_empty() {
                continue;
            }

            match line.strip_prefix("\u{2014} ") {
                Some(content) => signatures.push(parse_signature_line(content)?),
                None => other_content.push(line.to_string()),
            }
        }

        Ok(SignedCheckpoint {
            origin,
            tree_size,
            root_hash,
            other_content,
            signatures,
        })
    }
}

// Format: <name> <base64 key hint and signature>
fn parse_signature_line(content: &str) -> Result<CheckpointSignature> {
    let (name, signature) = content
        .split_once(' ')
        .filter(|(name, signature)| !name.is_empty() && !signature.is_empty())
        .ok_or_else(|| {
            Error::InvalidCheckpoint(format!("malformed signature line: {}", content))
        })?;

    Ok(CheckpointSignature {
        name: name.to_string(),
        signature: Base64::new(signature),
    })
}
