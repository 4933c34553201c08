//! # atomset
//!
//! Command-line runner for the atomset handle-set engine.
//!
//! - `fixture`: TOML atom tables, type hierarchies and stored queries
//! - `cli`: clap commands that inspect fixtures and evaluate queries

pub mod cli;
pub mod error;
pub mod fixture;

pub use error::CliError;
pub use fixture::Fixture;
