//! # Structured Logging
//!
//! Sets up the `tracing` subscriber for the node binary. Output format is
//! selectable (pretty for terminals, JSON lines for log aggregation), and
//! filtering follows `RUST_LOG` when set. Logs go to stderr so stdout
//! stays clean for command output.

use std::str::FromStr;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output for local development.
    Pretty,
    /// Machine-parseable JSON lines for production aggregation.
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{other}' (expected pretty or json)")),
        }
    }
}

/// Initializes the global subscriber. Call exactly once, early in `main`.
///
/// `default_filter` applies when the `RUST_LOG` environment variable is
/// not set; the variable takes precedence otherwise, using the usual
/// `EnvFilter` directive syntax
/// (e.g. `RUST_LOG=fluwix_node=debug,fluwix_ledger=info`).
pub fn init_logging(default_filter: &str, format: LogFormat) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    match format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .json()
                        .with_target(true)
                        .with_writer(std::io::stderr),
                )
                .init();
        }
    }

    tracing::info!("logging initialized (format={:?})", format);
}
