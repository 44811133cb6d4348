//! # Source Constructors
//!
//! Leaf streams that do not consume another stream:
//!
//! - [`empty`]: always `Ended`
//! - [`single`]: one element, then `Ended`
//! - [`deferred`]: builds its stream on first demand
//! - [`from_iter`]: lifts an ordinary iterator
//!
//! `deferred` is what makes mutually recursive definitions possible: a
//! cycle between definitions is only unrolled as far as consumers demand.

use crate::error::contract_violation;
use crate::status::Status;
use crate::stream::Stream;
use std::marker::PhantomData;

// =============================================================================
// EMPTY
// =============================================================================

/// A stream with no elements. See [`empty`].
#[derive(Debug, Clone, Copy)]
pub struct Empty<T> {
    _item: PhantomData<T>,
}

/// A stream that is `Ended` from the start.
pub const fn empty<T>() -> Empty<T> {
    Empty { _item: PhantomData }
}

impl<T: Clone> Stream for Empty<T> {
    type Item = T;

    fn query(&mut self) -> Status<T> {
        Status::Ended
    }

    fn advance(&mut self) {
        contract_violation("Empty::advance");
    }
}

// =============================================================================
// SINGLE
// =============================================================================

/// A stream with exactly one element. See [`single`].
#[derive(Debug, Clone)]
pub struct Single<T> {
    value: Option<T>,
}

/// A stream reporting `Ready(value)` until advanced once, then `Ended`.
pub const fn single<T>(value: T) -> Single<T> {
    Single { value: Some(value) }
}

impl<T: Clone> Stream for Single<T> {
    type Item = T;

    fn query(&mut self) -> Status<T> {
        match &self.value {
            Some(value) => Status::Ready(value.clone()),
            None => Status::Ended,
        }
    }

    fn advance(&mut self) {
        if self.value.take().is_none() {
            contract_violation("Single::advance");
        }
    }
}

// =============================================================================
// DEFERRED
// =============================================================================

/// A stream built on first demand. See [`deferred`].
pub struct Deferred<S, F> {
    thunk: Option<F>,
    stream: Option<S>,
}

/// Wrap a stream constructor so it runs at most once, on the first
/// `query()` or `advance()`, never at definition time.
pub fn deferred<S, F>(thunk: F) -> Deferred<S, F>
where
    S: Stream,
    F: FnOnce() -> S,
{
    Deferred {
        thunk: Some(thunk),
        stream: None,
    }
}

impl<S, F> Deferred<S, F>
where
    S: Stream,
    F: FnOnce() -> S,
{
    /// True once the inner stream has been built.
    pub fn is_forced(&self) -> bool {
        self.stream.is_some()
    }

    fn force(&mut self) -> &mut S {
        if let Some(build) = self.thunk.take() {
            return self.stream.insert(build());
        }
        match self.stream.as_mut() {
            Some(stream) => stream,
            // Only after the constructor itself panicked.
            None => unreachable!("deferred stream has no constructor left"),
        }
    }
}

impl<S, F> Stream for Deferred<S, F>
where
    S: Stream,
    F: FnOnce() -> S,
{
    type Item = S::Item;

    fn query(&mut self) -> Status<S::Item> {
        self.force().query()
    }

    fn advance(&mut self) {
        self.force().advance();
    }
}

// =============================================================================
// FROM ITERATOR
// =============================================================================

/// A stream over the elements of an iterator. See [`from_iter`].
pub struct FromIter<I: Iterator> {
    iter: I,
    head: Option<Option<I::Item>>,
}

/// Lift any iterable into a stream. The iterator is pulled one element at
/// a time, only when the current head has been consumed.
pub fn from_iter<I>(iter: I) -> FromIter<I::IntoIter>
where
    I: IntoIterator,
{
    FromIter {
        iter: iter.into_iter(),
        head: None,
    }
}

impl<I> Stream for FromIter<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    fn query(&mut self) -> Status<I::Item> {
        let iter = &mut self.iter;
        match self.head.get_or_insert_with(|| iter.next()) {
            Some(value) => Status::Ready(value.clone()),
            None => Status::Ended,
        }
    }

    fn advance(&mut self) {
        match self.head.take() {
            Some(Some(_)) => {}
            other => {
                self.head = other;
                contract_violation("FromIter::advance");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
