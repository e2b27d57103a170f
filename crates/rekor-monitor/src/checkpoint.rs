//! # Checkpoint Subcommand
//!
//! Fetches the latest stable tree head and optionally saves it so a later
//! `consistency` run can prove the log grew append-only since.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rekor_client::{verify_log_info, RekorClient};
use rekor_types::Checkpoint;

/// Arguments for the `checkpoint` subcommand.
#[derive(Args, Debug)]
pub struct CheckpointArgs {
    /// Write the compact checkpoint to this file.
    #[arg(long, short, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

/// Execute the checkpoint subcommand.
pub async fn run_checkpoint(args: &CheckpointArgs, client: &RekorClient) -> Result<()> {
    let info = client
        .get_log_info()
        .await
        .context("failed to fetch log info")?;
    verify_log_info(&info).context("signed tree head does not match log info")?;

    println!("{}", serde_json::to_string_pretty(&info)?);

    if let Some(out) = &args.out {
        write_checkpoint(&info.checkpoint(), out)?;
        tracing::info!(
            tree_size = info.tree_size,
            "checkpoint saved to {}",
            out.display()
        );
    }

    Ok(())
}

/// Save a checkpoint as JSON
pub fn write_checkpoint(checkpoint: &Checkpoint, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(checkpoint)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write checkpoint: {}", path.display()))
}

/// Load a checkpoint saved by [`write_checkpoint`]
pub fn read_checkpoint(path: &Path) -> Result<Checkpoint> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read checkpoint: {}", path.display()))?;
    Checkpoint::from_json(&json)
        .with_context(|| format!("failed to parse checkpoint: {}", path.display()))
}
