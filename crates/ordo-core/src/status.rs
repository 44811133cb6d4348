//! # Status
//!
//! The three-way answer of a [`Stream`](crate::Stream) query.
//!
//! - `Ready(value)`: the element at the current position
//! - `Ended`: the stream is permanently exhausted
//! - `Pending`: not yet determined, ask again later
//!
//! `Ready` and `Ended` are *stable*: repeating the query without an
//! intervening `advance()` yields the same answer. `Pending` is *unstable*
//! and must never be cached by a consumer.

/// Result of querying a stream at its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status<T> {
    /// An element is available at the current position.
    Ready(T),
    /// The stream is exhausted. This answer never changes.
    Ended,
    /// The answer is not known yet. Query again later.
    Pending,
}

impl<T> Status<T> {
    /// True if an element is available.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// True if the stream is exhausted.
    #[must_use]
    pub const fn is_ended(&self) -> bool {
        matches!(self, Self::Ended)
    }

    /// True if the answer is not known yet.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True for `Ready` and `Ended`, the answers that may be cached.
    #[must_use]
    pub const fn is_stable(&self) -> bool {
        !self.is_pending()
    }

    /// Extract the ready value, if any.
    pub fn ready(self) -> Option<T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Ended | Self::Pending => None,
        }
    }

    /// Borrow the ready value without consuming the status.
    pub const fn as_ref(&self) -> Status<&T> {
        match self {
            Self::Ready(value) => Status::Ready(value),
            Self::Ended => Status::Ended,
            Self::Pending => Status::Pending,
        }
    }

    /// Transform the ready value, passing `Ended`/`Pending` through.
    pub fn map<U, F>(self, f: F) -> Status<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Ready(value) => Status::Ready(f(value)),
            Self::Ended => Status::Ended,
            Self::Pending => Status::Pending,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
