//! # Weighted Grammars
//!
//! A grammar file is TOML:
//!
//! ```toml
//! start = "list"
//!
//! [[rule]]
//! name = "list"
//! weight = 1
//! symbols = []
//!
//! [[rule]]
//! name = "list"
//! symbols = ["item", "list"]
//! ```
//!
//! A symbol naming a rule is a nonterminal; any other symbol is a terminal
//! token. Every use of a rule adds its weight (default 1) to a derivation.

mod derive;

pub use derive::{ByWeight, Derivation, Enumerator, take};

use crate::error::OrdoError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Weight of a rule that does not state one.
pub const DEFAULT_RULE_WEIGHT: u64 = 1;

fn default_weight() -> u64 {
    DEFAULT_RULE_WEIGHT
}

/// One production: `name -> symbols`, costing `weight`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    /// Nonterminal this rule produces.
    pub name: String,
    /// Cost added to every derivation using this rule.
    #[serde(default = "default_weight")]
    pub weight: u64,
    /// Right-hand side. Empty derives the empty string.
    #[serde(default)]
    pub symbols: Vec<String>,
}

/// A weighted grammar with a designated start symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Grammar {
    /// Nonterminal enumerated when none is requested explicitly.
    pub start: String,
    /// All productions, in file order.
    #[serde(rename = "rule", default)]
    pub rules: Vec<Rule>,
}

impl Grammar {
    /// Parse and validate a grammar from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, OrdoError> {
        let grammar: Self = toml::from_str(text)?;
        grammar.validate()?;
        Ok(grammar)
    }

    /// Check the structural requirements the enumerator relies on.
    pub fn validate(&self) -> Result<(), OrdoError> {
        if self.rules.is_empty() {
            return Err(OrdoError::InvalidGrammar("grammar has no rules".into()));
        }

        for (position, rule) in self.rules.iter().enumerate() {
            if rule.name.trim().is_empty() {
                return Err(OrdoError::InvalidGrammar(format!(
                    "rule #{} has an empty name",
                    position + 1
                )));
            }
            if rule.symbols.iter().any(|s| s.is_empty()) {
                return Err(OrdoError::InvalidGrammar(format!(
                    "rule '{}' contains an empty symbol",
                    rule.name
                )));
            }
        }

        if !self.defines(&self.start) {
            return Err(OrdoError::UnknownNonterminal(self.start.clone()));
        }
        Ok(())
    }

    /// True if some rule produces `name`.
    pub fn defines(&self, name: &str) -> bool {
        self.rules.iter().any(|rule| rule.name == name)
    }

    /// Rules grouped by nonterminal, each group in file order.
    pub fn alternatives(&self) -> BTreeMap<&str, Vec<&Rule>> {
        let mut index: BTreeMap<&str, Vec<&Rule>> = BTreeMap::new();
        for rule in &self.rules {
            index.entry(rule.name.as_str()).or_default().push(rule);
        }
        index
    }

    /// Distinct terminal tokens, sorted.
    pub fn terminals(&self) -> Vec<&str> {
        let mut terminals: Vec<&str> = self
            .rules
            .iter()
            .flat_map(|rule| rule.symbols.iter())
            .map(String::as_str)
            .filter(|symbol| !self.defines(symbol))
            .collect();
        terminals.sort_unstable();
        terminals.dedup();
        terminals
    }
}

// =============================================================================
// TESTS
// =============================================================================
