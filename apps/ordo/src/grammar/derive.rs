//! # Derivation Enumerator
//!
//! Builds an ordo-core stream of derivations for a nonterminal:
//!
//! | Grammar construct      | Stream                                   |
//! |------------------------|------------------------------------------|
//! | terminal `t`           | `single(t)`                              |
//! | nonterminal `N`        | `deferred(N)`, or `empty` past the depth |
//! | sequence `a b c`       | `product(a, product(b, c))`              |
//! | alternatives of `N`    | `union_all(...)`                         |
//! | rule weight `w`        | `map(+w)`                                |
//!
//! Every construct keeps its input non-decreasing by weight, so the
//! resulting stream yields derivations lightest first.

use super::{Grammar, Rule};
use crate::error::OrdoError;
use ordo_core::{
    BoxStream, Join, Order, Stream, StreamError, deferred, empty, product, single, union_all,
};
use serde::Serialize;
use std::collections::BTreeMap;

// =============================================================================
// DERIVATION
// =============================================================================

/// A terminal string produced by the grammar, with its total rule weight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    /// Sum of the weights of every rule used.
    pub weight: u64,
    /// Terminal tokens, left to right.
    pub tokens: Vec<String>,
}

impl Derivation {
    /// The empty string, weightless.
    pub fn epsilon() -> Self {
        Self {
            weight: 0,
            tokens: Vec::new(),
        }
    }

    /// A single terminal token, weightless.
    pub fn terminal(token: &str) -> Self {
        Self {
            weight: 0,
            tokens: vec![token.to_string()],
        }
    }

    /// Tokens joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.join(" ")
    }
}

/// Orders derivations by weight; joining concatenates and adds weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByWeight;

impl Order<Derivation> for ByWeight {
    fn less_equals(&self, x: &Derivation, y: &Derivation) -> bool {
        x.weight <= y.weight
    }
}

impl Join<Derivation> for ByWeight {
    fn join(&self, x: &Derivation, y: &Derivation) -> Derivation {
        let mut tokens = Vec::with_capacity(x.tokens.len() + y.tokens.len());
        tokens.extend_from_slice(&x.tokens);
        tokens.extend_from_slice(&y.tokens);
        Derivation {
            weight: x.weight.saturating_add(y.weight),
            tokens,
        }
    }
}

// =============================================================================
// ENUMERATOR
// =============================================================================

/// Builds derivation streams for a validated grammar.
///
/// Nested nonterminals are expanded at most `depth` levels deep; deeper
/// references contribute nothing. Streams borrow the enumerator.
#[derive(Debug)]
pub struct Enumerator<'g> {
    alternatives: BTreeMap<&'g str, Vec<&'g Rule>>,
}

impl<'g> Enumerator<'g> {
    /// Validate and index `grammar`.
    pub fn new(grammar: &'g Grammar) -> Result<Self, OrdoError> {
        grammar.validate()?;
        Ok(Self {
            alternatives: grammar.alternatives(),
        })
    }

    /// All derivations of `nonterminal`, lightest first.
    pub fn derivations<'e>(
        &'e self,
        nonterminal: &str,
        depth: usize,
    ) -> Result<BoxStream<'e, Derivation>, OrdoError> {
        let (&name, _) = self
            .alternatives
            .get_key_value(nonterminal)
            .ok_or_else(|| OrdoError::UnknownNonterminal(nonterminal.to_string()))?;
        Ok(self.nonterminal(name, depth))
    }

    fn nonterminal<'e>(&'e self, name: &'g str, depth: usize) -> BoxStream<'e, Derivation> {
        let rules = self.alternatives.get(name).map(Vec::as_slice).unwrap_or_default();
        let streams: Vec<BoxStream<'e, Derivation>> =
            rules.iter().map(|&rule| self.rule(rule, depth)).collect();
        union_all(streams, ByWeight)
    }

    fn rule<'e>(&'e self, rule: &'g Rule, depth: usize) -> BoxStream<'e, Derivation> {
        let weight = rule.weight;
        self.sequence(&rule.symbols, depth)
            .map(move |mut derivation: Derivation| {
                derivation.weight = derivation.weight.saturating_add(weight);
                derivation
            })
            .boxed()
    }

    fn sequence<'e>(&'e self, symbols: &'g [String], depth: usize) -> BoxStream<'e, Derivation> {
        match symbols {
            [] => single(Derivation::epsilon()).boxed(),
            [only] => self.symbol(only, depth),
            [first, rest @ ..] => product(
                self.symbol(first, depth),
                self.sequence(rest, depth),
                ByWeight,
            )
            .boxed(),
        }
    }

    fn symbol<'e>(&'e self, symbol: &'g str, depth: usize) -> BoxStream<'e, Derivation> {
        if !self.alternatives.contains_key(symbol) {
            return single(Derivation::terminal(symbol)).boxed();
        }
        if depth == 0 {
            return empty().boxed();
        }
        deferred(move || self.nonterminal(symbol, depth - 1)).boxed()
    }
}

// =============================================================================
// DRAINING
// =============================================================================

/// Take up to `limit` derivations from `stream`.
///
/// A stream that ends early yields fewer; one that cannot answer is
/// reported as [`OrdoError::Stalled`].
pub fn take<S>(stream: S, limit: usize) -> Result<Vec<Derivation>, OrdoError>
where
    S: Stream<Item = Derivation>,
{
    let mut iter = stream.iter();
    let mut out = Vec::new();
    while out.len() < limit {
        match iter.take_next() {
            Ok(derivation) => {
                tracing::trace!(weight = derivation.weight, text = %derivation.text(), "derived");
                out.push(derivation);
            }
            Err(StreamError::Exhausted) => break,
            Err(StreamError::Pending) => {
                return Err(OrdoError::Stalled {
                    produced: out.len(),
                });
            }
        }
    }
    Ok(out)
}

// =============================================================================
// TESTS
// =============================================================================
