//! # Map
//!
//! Element-wise transformation of a stream. The mapped answer is cached
//! while stable, so `f` runs once per element no matter how often the
//! position is queried.

use crate::error::contract_violation;
use crate::status::Status;
use crate::stream::Stream;

/// A stream applying `f` to every element of `stream`.
///
/// Created by [`Stream::map`].
pub struct Map<S, F, U> {
    stream: S,
    f: F,
    cached: Option<Status<U>>,
}

impl<S, F, U> Map<S, F, U>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
    U: Clone,
{
    pub(crate) fn new(stream: S, f: F) -> Self {
        Self {
            stream,
            f,
            cached: None,
        }
    }

    /// Get a reference to the upstream stream.
    pub fn get_ref(&self) -> &S {
        &self.stream
    }
}

impl<S, F, U> Stream for Map<S, F, U>
where
    S: Stream,
    F: FnMut(S::Item) -> U,
    U: Clone,
{
    type Item = U;

    fn query(&mut self) -> Status<U> {
        if let Some(status) = &self.cached {
            return status.clone();
        }

        let status = match self.stream.query() {
            Status::Ready(value) => Status::Ready((self.f)(value)),
            Status::Ended => Status::Ended,
            // Unstable: never cached, the next query asks upstream again
            Status::Pending => return Status::Pending,
        };
        self.cached = Some(status.clone());
        status
    }

    fn advance(&mut self) {
        match self.cached.take() {
            Some(Status::Ready(_)) => self.stream.advance(),
            other => {
                self.cached = other;
                contract_violation("Map::advance");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
