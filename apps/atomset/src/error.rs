//! # CLI Errors

use atomset_core::AtomSetError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the command-line runner.
#[derive(Debug, Error)]
pub enum CliError {
    /// The fixture file could not be read.
    #[error("Cannot read '{}': {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// Results could not be written.
    #[error("Cannot write output: {0}")]
    Output(String),

    /// The fixture file is not valid TOML for the fixture schema.
    #[error("Fixture parse error: {0}")]
    Parse(String),

    /// No stored query carries the requested name.
    #[error("Unknown query: {0}")]
    UnknownQuery(String),

    /// The engine rejected the fixture or a query.
    #[error(transparent)]
    Core(#[from] AtomSetError),
}
