//! # Ordo - Weight-Ordered Grammar Enumeration
//!
//! The main binary for the Ordo enumeration engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                apps/ordo (THE DRIVER)           │
//! │                                                 │
//! │  ┌─────────────┐        ┌──────────────────┐    │
//! │  │    CLI      │───────▶│ Grammar → Stream │    │
//! │  │   (clap)    │        │   (Enumerator)   │    │
//! │  └─────────────┘        └────────┬─────────┘    │
//! │                                  ▼              │
//! │                          ┌───────────────┐      │
//! │                          │   ordo-core   │      │
//! │                          │ (THE ENGINE)  │      │
//! │                          └───────────────┘      │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! ordo check -g grammars/arith.toml
//! ordo enumerate -g grammars/arith.toml -n 10 -d 6
//! ordo --json-mode enumerate -g grammars/arith.toml -s term
//! ```

use clap::Parser;
use ordo::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // ORDO_LOG_FORMAT=json enables machine-parseable logs.
    // Logs go to stderr; stdout carries derivations.
    let log_format = std::env::var("ORDO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ordo=info".into());

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

    // Banner goes to stderr so JSON output on stdout stays parseable
    if !cli.quiet && !cli.json_mode {
        eprintln!(
            "ordo v{} - lazy, weight-ordered enumeration",
            env!("CARGO_PKG_VERSION")
        );
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}
