//! # Consistency Subcommand
//!
//! Proves that the log's current tree extends an earlier checkpoint, given
//! either on the command line or as a file written by `checkpoint --out`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rekor_client::{verify_consistency_with, verify_log_info, RekorClient};
use rekor_merkle::DEFAULT_HASHER;
use rekor_types::{Checkpoint, ConsistencyProof, Hex, LogInfo, TreeId};

use crate::checkpoint::read_checkpoint;

/// Arguments for the `consistency` subcommand.
#[derive(Args, Debug)]
pub struct ConsistencyArgs {
    /// Tree ID of the previous checkpoint.
    #[arg(long, required_unless_present = "from", conflicts_with = "from")]
    pub tree_id: Option<String>,

    /// Tree size of the previous checkpoint.
    #[arg(long, required_unless_present = "from", conflicts_with = "from")]
    pub tree_size: Option<u64>,

    /// Hex-encoded root hash of the previous checkpoint.
    #[arg(long, required_unless_present = "from", conflicts_with = "from")]
    pub root_hash: Option<String>,

    /// Read the previous checkpoint from a file written by `checkpoint --out`.
    #[arg(long, value_name = "FILE")]
    pub from: Option<PathBuf>,
}

impl ConsistencyArgs {
    /// The checkpoint the log must be consistent with
    pub fn previous_checkpoint(&self) -> Result<Checkpoint> {
        if let Some(path) = &self.from {
            return read_checkpoint(path);
        }

        match (&self.tree_id, self.tree_size, &self.root_hash) {
            (Some(tree_id), Some(tree_size), Some(root_hash)) => Ok(Checkpoint {
                tree_id: TreeId::new(tree_id.as_str()),
                tree_size,
                root_hash: Hex::new(root_hash.to_lowercase()),
            }),
            _ => anyhow::bail!(
                "--tree-id, --tree-size and --root-hash are required without --from"
            ),
        }
    }
}

/// Execute the consistency subcommand.
pub async fn run_consistency(args: &ConsistencyArgs, client: &RekorClient) -> Result<()> {
    let previous = args.previous_checkpoint()?;

    let info = client
        .get_log_info()
        .await
        .context("failed to fetch log info")?;
    verify_log_info(&info).context("signed tree head does not match log info")?;

    let latest = latest_checkpoint(&info, &previous.tree_id);

    // Only a strictly growing, non-empty old tree has a proof to fetch. Every
    // other case is decided by the verifier on an empty proof.
    let proof = if 0 < previous.tree_size && previous.tree_size < latest.tree_size {
        client
            .get_consistency_proof(
                previous.tree_size,
                Some(latest.tree_size),
                Some(&previous.tree_id),
            )
            .await
            .context("failed to fetch consistency proof")?
    } else {
        ConsistencyProof {
            hashes: Vec::new(),
            root_hash: None,
        }
    };

    tracing::info!(
        tree_id = %previous.tree_id,
        "checking {} -> {}",
        previous.tree_size,
        latest.tree_size
    );

    verify_consistency_with(&DEFAULT_HASHER, &previous, &latest, &proof).with_context(|| {
        format!(
            "log is not consistent with checkpoint at tree size {}",
            previous.tree_size
        )
    })?;

    println!("Consistency verification successful.");
    Ok(())
}

/// The newest checkpoint of the tree `tree_id`
///
/// Falls back to the active shard when the tree is unknown to the log, which
/// then fails verification on the tree ID.
pub fn latest_checkpoint(info: &LogInfo, tree_id: &TreeId) -> Checkpoint {
    match info.checkpoint_for(tree_id) {
        Some(checkpoint) => checkpoint,
        None => {
            tracing::warn!(%tree_id, "tree is not served by this log");
            info.checkpoint()
        }
    }
}
