//! # Stream Contract
//!
//! A [`Stream`] is a stateful, single-consumer cursor over a (possibly
//! infinite) ordered sequence. It exposes exactly two primitives:
//!
//! - `query()`: non-destructive, idempotent while the answer is stable
//! - `advance()`: consumes the currently observed `Ready` element
//!
//! ## Contract
//!
//! - `advance()` may only be called after a `query()` returned `Ready`,
//!   and at most once per such observation. Violations are programming
//!   errors and fail loudly.
//! - A stream never rewinds: advanced elements are gone from that handle.
//! - While the last answer was `Ready` or `Ended` and no `advance()` has
//!   intervened, `query()` returns the same answer again.

use crate::iter::Iter;
use crate::map::Map;
use crate::multiplex::Multiplexer;
use crate::status::Status;

/// A type-erased stream, used to build heterogeneous or recursive definitions.
pub type BoxStream<'a, T> = Box<dyn Stream<Item = T> + 'a>;

/// A demand-driven producer of an ordered sequence.
pub trait Stream {
    /// Element type. Queries hand out copies, so elements must be cloneable;
    /// wrap expensive payloads in `Rc` to keep this cheap.
    type Item: Clone;

    /// Report the element at the current position without consuming it.
    fn query(&mut self) -> Status<Self::Item>;

    /// Consume the element last reported as `Ready` and move forward.
    fn advance(&mut self);

    /// Apply `f` to every element.
    fn map<U, F>(self, f: F) -> Map<Self, F, U>
    where
        Self: Sized,
        F: FnMut(Self::Item) -> U,
        U: Clone,
    {
        Map::new(self, f)
    }

    /// Erase the concrete type.
    fn boxed<'a>(self) -> BoxStream<'a, Self::Item>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    /// Hand this stream to a [`Multiplexer`] so many readers can share it.
    fn multiplex(self) -> Multiplexer<Self>
    where
        Self: Sized,
    {
        Multiplexer::new(self)
    }

    /// Adapt to a conventional pull interface.
    fn iter(self) -> Iter<Self>
    where
        Self: Sized,
    {
        Iter::new(self)
    }
}

impl<S: Stream + ?Sized> Stream for Box<S> {
    type Item = S::Item;

    fn query(&mut self) -> Status<Self::Item> {
        (**self).query()
    }

    fn advance(&mut self) {
        (**self).advance();
    }
}

impl<S: Stream + ?Sized> Stream for &mut S {
    type Item = S::Item;

    fn query(&mut self) -> Status<Self::Item> {
        (**self).query()
    }

    fn advance(&mut self) {
        (**self).advance();
    }
}

// =============================================================================
// TESTS
// =============================================================================
