//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::error::OrdoError;
use crate::grammar::{Derivation, Enumerator, Grammar, take};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum grammar file size (1 MB).
///
/// Grammars are small; anything larger is almost certainly the wrong file.
pub const MAX_GRAMMAR_FILE_SIZE: u64 = 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), OrdoError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| OrdoError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(OrdoError::FileTooLarge {
            size: metadata.len(),
            max: max_size,
        });
    }
    Ok(())
}

/// Validate file path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it
/// names an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, OrdoError> {
    let canonical = path.canonicalize().map_err(|e| {
        OrdoError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(OrdoError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Read, parse and validate a grammar file.
pub fn load_grammar(path: &Path) -> Result<Grammar, OrdoError> {
    let validated_path = validate_file_path(path)?;
    validate_file_size(&validated_path, MAX_GRAMMAR_FILE_SIZE)?;

    let text = std::fs::read_to_string(&validated_path)
        .map_err(|e| OrdoError::Io(format!("Read file: {}", e)))?;
    let grammar = Grammar::from_toml(&text)?;

    tracing::info!(
        "Loaded grammar from {:?} ({} rules, start '{}')",
        validated_path,
        grammar.rules.len(),
        grammar.start
    );
    Ok(grammar)
}

/// The `limit` lightest derivations of `start` (or the grammar's start).
pub fn enumerate(
    grammar: &Grammar,
    start: Option<&str>,
    limit: usize,
    depth: usize,
) -> Result<Vec<Derivation>, OrdoError> {
    let start = start.unwrap_or(&grammar.start);
    tracing::debug!(start, limit, depth, "Building derivation stream");

    let enumerator = Enumerator::new(grammar)?;
    let stream = enumerator.derivations(start, depth)?;
    take(stream, limit)
}

// =============================================================================
// ENUMERATE COMMAND
// =============================================================================

/// Print the lightest derivations of a grammar.
pub fn cmd_enumerate(
    path: &Path,
    start: Option<&str>,
    limit: usize,
    depth: usize,
    json_mode: bool,
) -> Result<(), OrdoError> {
    let grammar = load_grammar(path)?;
    let derivations = enumerate(&grammar, start, limit, depth)?;
    let start = start.unwrap_or(&grammar.start);

    if json_mode {
        let output = serde_json::json!({
            "start": start,
            "depth": depth,
            "limit": limit,
            "count": derivations.len(),
            "derivations": derivations,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if derivations.is_empty() {
        println!("No derivations of '{}' within depth {}", start, depth);
        return Ok(());
    }

    for derivation in &derivations {
        println!("{}\t{}", derivation.weight, derivation.text());
    }

    Ok(())
}

// =============================================================================
// CHECK COMMAND
// =============================================================================

/// Validate a grammar file and print a summary.
pub fn cmd_check(path: &Path, json_mode: bool) -> Result<(), OrdoError> {
    let grammar = load_grammar(path)?;
    let alternatives = grammar.alternatives();
    let terminals = grammar.terminals();

    if json_mode {
        let nonterminals: Vec<_> = alternatives
            .iter()
            .map(|(name, rules)| serde_json::json!({ "name": name, "rules": rules.len() }))
            .collect();
        let output = serde_json::json!({
            "valid": true,
            "start": grammar.start,
            "rules": grammar.rules.len(),
            "nonterminals": nonterminals,
            "terminals": terminals,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Grammar OK");
    println!("==========");
    println!("Start:        {}", grammar.start);
    println!("Rules:        {}", grammar.rules.len());
    println!("Nonterminals: {}", alternatives.len());
    for (name, rules) in &alternatives {
        println!("  {:<12} {} alternative(s)", name, rules.len());
    }
    println!("Terminals:    {}", terminals.join(" "));

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
