//! # Error Types
//!
//! Two failure classes exist in the engine:
//!
//! - Usage errors of the iteration bridge, returned as [`StreamError`].
//! - Broken query/advance contracts. These are programming errors and
//!   abort immediately through [`contract_violation`].
//!
//! `Ended` is not an error; it is a normal terminal status.

use thiserror::Error;

/// Errors reported by [`Iter::take_next`](crate::Iter::take_next).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The stream is exhausted; there is no element to take.
    #[error("stream has ended; no element to take")]
    Exhausted,

    /// The stream cannot answer yet; there is no element to take.
    #[error("stream is pending; no element is available yet")]
    Pending,
}

/// Abort on `advance()` without a preceding `Ready` observation.
#[cold]
#[track_caller]
#[allow(clippy::panic)]
pub(crate) fn contract_violation(operation: &'static str) -> ! {
    panic!("{operation} called without a preceding Ready observation")
}
