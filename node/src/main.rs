// Copyright (c) 2026 Fluwix Labs. MIT License.
// See LICENSE for details.

//! # Fluwix Ledger Node
//!
//! Entry point for the `fluwix-node` binary. Parses CLI arguments,
//! initializes logging, seeds the ledger from a genesis configuration
//! file, and serves the HTTP API until shut down.
//!
//! Subcommands:
//!
//! - `run`     -- start the ledger node
//! - `init`    -- write a sample genesis configuration file
//! - `version` -- print build version information

mod api;
mod cli;
mod logging;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tokio::signal;

use fluwix_ledger::config::GenesisConfig;
use fluwix_ledger::identity::{Address, ADDRESS_LEN};
use fluwix_ledger::ledger::Ledger;
use fluwix_ledger::service::TokenService;

use cli::{Commands, FluwixNodeCli};
use logging::LogFormat;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = FluwixNodeCli::parse();

    match cli.command {
        Commands::Run(args) => run_node(args).await,
        Commands::Init(args) => init_genesis(args),
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the node: loads genesis, builds the service, serves the API.
async fn run_node(args: cli::RunArgs) -> Result<()> {
    let format = args
        .log_format
        .parse::<LogFormat>()
        .unwrap_or(LogFormat::Pretty);
    logging::init_logging("fluwix_node=info,fluwix_ledger=info,tower_http=info", format);

    let operator: Address = args
        .operator
        .parse()
        .with_context(|| format!("invalid operator address '{}'", args.operator))?;

    let raw = std::fs::read_to_string(&args.genesis)
        .with_context(|| format!("failed to read genesis file {}", args.genesis.display()))?;
    let config = GenesisConfig::from_json(&raw)
        .with_context(|| format!("failed to parse genesis file {}", args.genesis.display()))?;

    tracing::info!(
        listen = %args.listen,
        operator = %operator,
        genesis = %args.genesis.display(),
        "starting fluwix-node"
    );

    let ledger = Ledger::genesis(operator, config);
    let service = TokenService::new(ledger);

    let state = api::AppState {
        service,
        version: env!("CARGO_PKG_VERSION").to_string(),
        started_at: Utc::now(),
    };

    let router = api::create_router(state);
    let listener = tokio::net::TcpListener::bind(&args.listen)
        .await
        .with_context(|| format!("failed to bind API listener on {}", args.listen))?;
    tracing::info!("API server listening on {}", args.listen);

    tokio::select! {
        res = axum::serve(listener, router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    tracing::info!("fluwix-node stopped");
    Ok(())
}

/// Writes a sample genesis configuration the operator can edit.
fn init_genesis(args: cli::InitArgs) -> Result<()> {
    let sample = GenesisConfig {
        token_name: "FluwixToken".to_string(),
        token_symbol: "FWX".to_string(),
        decimals: 18,
        initial_account: Address::from_bytes([0x11; ADDRESS_LEN]),
        initial_supply: 1_000_000_000,
    };

    let json = serde_json::to_string_pretty(&sample).context("failed to serialize sample genesis")?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("failed to write genesis file {}", args.output.display()))?;

    println!("Sample genesis written to {}", args.output.display());
    println!("Edit initial_account before starting the node -- it is a placeholder.");
    Ok(())
}

/// Prints version information to stdout.
fn print_version() {
    println!("fluwix-node {}", env!("CARGO_PKG_VERSION"));
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
