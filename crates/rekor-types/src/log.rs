//! Log-level responses: the current tree head and consistency proofs

use crate::checkpoint::{Checkpoint, SignedCheckpoint, TreeId};
use crate::encoding::{decode_hashes, Hex};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Log info response (`GET /api/v1/log`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogInfo {
    /// Root hash of the tree (hex-encoded)
    pub root_hash: Hex,
    /// Signed tree head (checkpoint in signed-note form)
    pub signed_tree_head: String,
    /// Tree ID of the active shard
    #[serde(rename = "treeID")]
    pub tree_id: TreeId,
    /// Tree size
    pub tree_size: u64,
    /// Inactive shards
    #[serde(default)]
    pub inactive_shards: Vec<InactiveShard>,
}

impl LogInfo {
    /// The compact checkpoint describing this tree head
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            tree_id: self.tree_id.clone(),
            tree_size: self.tree_size,
            root_hash: self.root_hash.clone(),
        }
    }

    /// Parse the signed tree head
    pub fn signed_checkpoint(&self) -> Result<SignedCheckpoint> {
        SignedCheckpoint::from_text(&self.signed_tree_head)
    }

    /// The latest checkpoint of the given tree, active or inactive
    pub fn checkpoint_for(&self, tree_id: &TreeId) -> Option<Checkpoint> {
        if &self.tree_id == tree_id {
            return Some(self.checkpoint());
        }
        self.inactive_shards
            .iter()
            .find(|shard| &shard.tree_id == tree_id)
            .map(InactiveShard::checkpoint)
    }
}

/// Inactive shard info
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InactiveShard {
    /// Root hash
    pub root_hash: Hex,
    /// Signed tree head
    pub signed_tree_head: String,
    /// Tree ID
    #[serde(rename = "treeID")]
    pub tree_id: TreeId,
    /// Tree size
    pub tree_size: u64,
}

impl InactiveShard {
    /// The final checkpoint of this shard
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            tree_id: self.tree_id.clone(),
            tree_size: self.tree_size,
            root_hash: self.root_hash.clone(),
        }
    }
}

/// Consistency proof response (`GET /api/v1/log/proof`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyProof {
    /// Hashes bridging the older tree to the newer one, in proof order
    pub hashes: Vec<Hex>,
    /// Root hash of the newer tree, when the log reports it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_hash: Option<Hex>,
}

impl ConsistencyProof {
    /// Decode the proof hashes to raw bytes
    pub fn decode_hashes(&self) -> Result<Vec<Vec<u8>>> {
        decode_hashes(&self.hashes)
    }
}
