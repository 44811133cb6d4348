//! # Ordo CLI Module
//!
//! This module implements the CLI interface for Ordo.
//!
//! ## Available Commands
//!
//! - `enumerate` - Print the lightest derivations of a grammar
//! - `check` - Validate a grammar file and summarize it

mod commands;

use crate::error::OrdoError;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Ordo - lazy, weight-ordered grammar enumeration
///
/// Derivations are produced on demand, lightest first, without
/// materializing the grammar's language.
#[derive(Parser, Debug)]
#[command(name = "ordo")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Enumerate derivations in non-decreasing weight order
    Enumerate {
        /// Path to the grammar file (TOML)
        #[arg(short, long)]
        grammar: PathBuf,

        /// Nonterminal to enumerate (defaults to the grammar's start)
        #[arg(short, long)]
        start: Option<String>,

        /// Maximum number of derivations to print
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Maximum nesting depth of nonterminal expansions
        #[arg(short, long, default_value = "8")]
        depth: usize,
    },

    /// Validate a grammar file
    Check {
        /// Path to the grammar file (TOML)
        #[arg(short, long)]
        grammar: PathBuf,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), OrdoError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Enumerate {
            grammar,
            start,
            limit,
            depth,
        } => cmd_enumerate(&grammar, start.as_deref(), limit, depth, json_mode),
        Commands::Check { grammar } => cmd_check(&grammar, json_mode),
    }
}
