//! # CLI Interface
//!
//! Command-line argument structure for `fluwix-node` using `clap` derive.
//! Supports three subcommands: `run`, `init`, and `version`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fluwix ledger node.
///
/// Hosts a permissioned token ledger and serves its operation surface
/// over HTTP. Caller identities are taken from the request body as
/// already-authenticated values -- put a real authentication proxy in
/// front of this before exposing it anywhere.
#[derive(Parser, Debug)]
#[command(
    name = "fluwix-node",
    about = "Fluwix permissioned token ledger node",
    version,
    propagate_version = true
)]
pub struct FluwixNodeCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the node binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the ledger node.
    Run(RunArgs),
    /// Write a sample genesis configuration file.
    Init(InitArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the genesis configuration file (JSON).
    #[arg(long, short = 'c', env = "FLUWIX_GENESIS", default_value = "genesis.json")]
    pub genesis: PathBuf,

    /// Identity that executes genesis. Becomes owner and first admin.
    #[arg(long, env = "FLUWIX_OPERATOR")]
    pub operator: String,

    /// Socket address the HTTP API binds to.
    #[arg(long, env = "FLUWIX_LISTEN", default_value = "127.0.0.1:8791")]
    pub listen: String,

    /// Log output format: "pretty" or "json".
    #[arg(long, env = "FLUWIX_LOG_FORMAT", default_value = "pretty")]
    pub log_format: String,
}

/// Arguments for the `init` subcommand.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Where to write the sample genesis file.
    #[arg(long, short = 'o', default_value = "genesis.json")]
    pub output: PathBuf,
}
