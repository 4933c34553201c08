//! # atomset - Fixture Query Runner
//!
//! The main binary for the atomset handle-set engine.
//!
//! ## Usage
//!
//! ```bash
//! # Print the atom table a fixture describes
//! atomset inspect -f pets.toml
//!
//! # Evaluate every stored query, or a single one
//! atomset eval -f pets.toml
//! atomset eval -f pets.toml --query cat-first --json
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, default `atomset=info`;
//! `ATOMSET_LOG_FORMAT=json` for machine-parseable output). Results go to
//! stdout.

use atomset::cli;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing: ATOMSET_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("ATOMSET_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "atomset=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Execute command
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = cli::execute(cli, &mut stdout) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
