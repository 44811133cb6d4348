//! # Iteration Bridge
//!
//! Adapts the query/advance protocol to a "has next / take next" pull
//! interface, and to [`Iterator`].
//!
//! A stream handed to [`Iter`] must only be driven through it afterwards;
//! ownership of the stream makes that the default.

use crate::error::StreamError;
use crate::status::Status;
use crate::stream::Stream;

/// Pull-style consumer of a [`Stream`].
///
/// Stable answers are cached between `has_next` and `take_next`; `Pending`
/// is never cached, so a later call asks the stream again.
///
/// As an [`Iterator`] it yields elements until the stream is `Ended` *or*
/// `Pending`. Use [`Iter::is_pending`] afterwards to tell the two apart.
pub struct Iter<S: Stream> {
    stream: S,
    peeked: Option<Status<S::Item>>,
}

impl<S: Stream> Iter<S> {
    /// Wrap a stream.
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            peeked: None,
        }
    }

    /// Current status, querying the stream if nothing stable is cached.
    pub fn peek(&mut self) -> Status<S::Item> {
        if let Some(status) = &self.peeked {
            return status.clone();
        }
        let status = self.stream.query();
        if status.is_stable() {
            self.peeked = Some(status.clone());
        }
        status
    }

    /// True if an element can be taken right now.
    pub fn has_next(&mut self) -> bool {
        self.peek().is_ready()
    }

    /// True if the stream cannot answer yet.
    pub fn is_pending(&mut self) -> bool {
        self.peek().is_pending()
    }

    /// Take the next element and advance the stream.
    ///
    /// Fails with [`StreamError::Exhausted`] or [`StreamError::Pending`]
    /// when no element is available; the stream is left untouched.
    pub fn take_next(&mut self) -> Result<S::Item, StreamError> {
        match self.peek() {
            Status::Ready(value) => {
                self.peeked = None;
                self.stream.advance();
                Ok(value)
            }
            Status::Ended => Err(StreamError::Exhausted),
            Status::Pending => Err(StreamError::Pending),
        }
    }

    /// Give the stream back. A cached status is dropped; the stream itself
    /// has not been advanced past it.
    pub fn into_inner(self) -> S {
        self.stream
    }
}

/// `next` returns `None` on `Pending` as well as on `Ended`, and may return
/// `Some` again once a pending stream answers. This iterator is therefore
/// not fused: do not mark it `FusedIterator`, and treat `count`, `last` or
/// `collect` over a stream that can report `Pending` as a partial result.
impl<S: Stream> Iterator for Iter<S> {
    type Item = S::Item;

    fn next(&mut self) -> Option<S::Item> {
        self.take_next().ok()
    }
}

// =============================================================================
// TESTS
// =============================================================================
