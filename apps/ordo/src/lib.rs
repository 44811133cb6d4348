//! # ordo
//!
//! The Ordo driver - THE CONSUMER.
//!
//! Reads weighted grammar files and enumerates their derivations in
//! weight order using the ordo-core streams. All I/O and logging of the
//! workspace lives here; the engine stays pure.

pub mod cli;
pub mod error;
pub mod grammar;

pub use error::OrdoError;
pub use grammar::{ByWeight, Derivation, Enumerator, Grammar, Rule};
