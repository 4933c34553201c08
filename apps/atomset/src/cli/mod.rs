//! # atomset CLI Module
//!
//! This module implements the CLI interface for atomset.
//!
//! ## Available Commands
//!
//! - `inspect` - Print the atom table a fixture describes
//! - `eval` - Run the fixture's stored queries

mod commands;

use crate::error::CliError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// atomset - handle-set queries over hypergraph atom fixtures
///
/// Loads a TOML fixture into an in-memory atom table and evaluates filter
/// pipelines against it.
#[derive(Parser, Debug)]
#[command(name = "atomset")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress headers, print results only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long = "json", global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every atom of a fixture
    Inspect {
        /// Path to the fixture file
        #[arg(short, long)]
        fixture: PathBuf,
    },

    /// Evaluate stored queries
    Eval {
        /// Path to the fixture file
        #[arg(short, long)]
        fixture: PathBuf,

        /// Run only the query with this name
        #[arg(long)]
        query: Option<String>,
    },
}

/// Output switches shared by every command.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputMode {
    pub json: bool,
    pub quiet: bool,
    pub verbose: bool,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments, writing results to `out`.
pub fn execute(cli: Cli, out: &mut impl std::io::Write) -> Result<(), CliError> {
    let mode = OutputMode {
        json: cli.json_mode,
        quiet: cli.quiet,
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Inspect { fixture } => cmd_inspect(&fixture, mode, out),
        Commands::Eval { fixture, query } => cmd_eval(&fixture, query.as_deref(), mode, out),
    }
}
