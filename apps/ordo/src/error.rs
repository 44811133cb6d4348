//! # Driver Errors
//!
//! Everything that can go wrong between reading a grammar file and
//! printing its derivations.

use thiserror::Error;

/// Errors that can occur in the Ordo driver.
#[derive(Debug, Error)]
pub enum OrdoError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// The input file is larger than the driver accepts.
    #[error("File size {size} bytes exceeds maximum allowed {max} bytes")]
    FileTooLarge { size: u64, max: u64 },

    /// The grammar file is not valid TOML for a grammar.
    #[error("Grammar parse error: {0}")]
    Parse(String),

    /// The grammar parsed but is not usable.
    #[error("Invalid grammar: {0}")]
    InvalidGrammar(String),

    /// A nonterminal was requested that no rule defines.
    #[error("Unknown nonterminal: {0}")]
    UnknownNonterminal(String),

    /// The derivation stream answered `Pending` and cannot make progress.
    #[error("Enumeration stalled after {produced} derivations")]
    Stalled { produced: usize },

    /// Output serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for OrdoError {
    fn from(e: toml::de::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<serde_json::Error> for OrdoError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
