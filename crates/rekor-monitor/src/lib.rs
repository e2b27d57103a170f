//! # rekor-monitor
//!
//! Watches a Rekor log from the outside: records tree heads, checks that
//! entries are included in the tree and that the tree only ever grows.

pub mod checkpoint;
pub mod consistency;
pub mod inclusion;

use clap::{Parser, Subcommand};
use rekor_client::{RekorClient, PUBLIC_REKOR_URL};

use checkpoint::CheckpointArgs;
use consistency::ConsistencyArgs;
use inclusion::InclusionArgs;

/// Verify inclusion and consistency proofs served by a Rekor log.
#[derive(Parser, Debug)]
#[command(name = "rekor-monitor", version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the Rekor instance.
    #[arg(long, global = true, env = "REKOR_URL", default_value = PUBLIC_REKOR_URL)]
    pub url: String,

    /// Log proof details at debug level.
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and print the latest stable checkpoint.
    Checkpoint(CheckpointArgs),

    /// Verify that an entry is included in the log.
    Inclusion(InclusionArgs),

    /// Verify that the log is consistent with an earlier checkpoint.
    Consistency(ConsistencyArgs),
}

impl Cli {
    /// Run the selected subcommand against the configured log
    pub async fn run(&self) -> anyhow::Result<()> {
        let client = RekorClient::new(&self.url);
        tracing::debug!(url = client.url(), "using rekor instance");

        match &self.command {
            Commands::Checkpoint(args) => checkpoint::run_checkpoint(args, &client).await,
            Commands::Inclusion(args) => inclusion::run_inclusion(args, &client).await,
            Commands::Consistency(args) => consistency::run_consistency(args, &client).await,
        }
    }
}
