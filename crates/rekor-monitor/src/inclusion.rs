//! # Inclusion Subcommand
//!
//! Fetches one entry by its global log index and checks its inclusion proof.

use anyhow::{Context, Result};
use clap::Args;
use rekor_client::{verify_entry_inclusion, RekorClient};
use rekor_merkle::DEFAULT_HASHER;

/// Arguments for the `inclusion` subcommand.
#[derive(Args, Debug)]
pub struct InclusionArgs {
    /// Global index of the entry in the log.
    #[arg(value_name = "LOG_INDEX")]
    pub log_index: u64,
}

/// Execute the inclusion subcommand.
pub async fn run_inclusion(args: &InclusionArgs, client: &RekorClient) -> Result<()> {
    let entry = client
        .get_entry_by_index(args.log_index)
        .await
        .with_context(|| format!("failed to fetch entry at index {}", args.log_index))?;

    tracing::debug!(uuid = %entry.uuid, integrated_time = entry.integrated_time, "fetched entry");

    verify_entry_inclusion(&DEFAULT_HASHER, &entry)
        .with_context(|| format!("inclusion proof for entry {} is invalid", entry.uuid))?;

    println!("Inclusion verification successful.");
    Ok(())
}
