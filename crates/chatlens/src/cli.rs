//! Command line arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "chatlens", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path; built-in defaults are used when omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database file, overriding the configuration
    #[arg(short, long, global = true)]
    pub database: Option<PathBuf>,

    /// Include records flagged out of scope
    #[arg(long, global = true)]
    pub all_records: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// What to print
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Build the full report
    Report {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the queries that mention one location
    Location {
        /// Location name, matched case-insensitively
        name: String,
    },

    /// List the locations that have at least one matching query
    Locations,

    /// List the distinct queries containing a term
    Search {
        /// Search term, matched case-insensitively
        term: String,
    },
}

/// Report output formats.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text tables
    Text,
    /// The full report as JSON
    Json,
    /// Chart specifications as JSON
    Charts,
}
