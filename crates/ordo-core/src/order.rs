//! # Ordering Capability
//!
//! Caller-supplied ordering attached to a value type from outside.
//! [`Stream`](crate::Stream) itself is agnostic to ordering; only
//! [`union`](crate::union()) and [`product`](crate::product()) need it.
//!
//! - [`Order::less_equals`]: a total preorder used for merge decisions
//! - [`Join::join`]: combines two values into one that is `less_equals`-above
//!   both, used by `product`
//!
//! Inputs to the combinators must be non-decreasing under `less_equals`;
//! this is a precondition, not something the combinators verify.

use std::marker::PhantomData;
use std::ops::Add;

/// A total preorder over `T`.
pub trait Order<T> {
    /// True if `x` may be emitted before `y`.
    fn less_equals(&self, x: &T, y: &T) -> bool;
}

/// An [`Order`] with a monotone combination of two values.
///
/// `join(x, y)` must be `less_equals`-above both `x` and `y`, and
/// monotone in both arguments.
pub trait Join<T>: Order<T> {
    /// Combine one left-hand and one right-hand element.
    fn join(&self, x: &T, y: &T) -> T;
}

impl<T, O: Order<T> + ?Sized> Order<T> for &O {
    fn less_equals(&self, x: &T, y: &T) -> bool {
        (**self).less_equals(x, y)
    }
}

impl<T, O: Join<T> + ?Sized> Join<T> for &O {
    fn join(&self, x: &T, y: &T) -> T {
        (**self).join(x, y)
    }
}

// =============================================================================
// READY-MADE CAPABILITIES
// =============================================================================

/// The type's own [`Ord`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Order<T> for Natural {
    fn less_equals(&self, x: &T, y: &T) -> bool {
        x <= y
    }
}

/// [`Ord`] for ordering, `+` for joining. Suitable for non-negative
/// weights, where `x + y` is never below either operand.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Additive;

impl<T: Ord> Order<T> for Additive {
    fn less_equals(&self, x: &T, y: &T) -> bool {
        x <= y
    }
}

impl<T> Join<T> for Additive
where
    T: Ord + Clone + Add<Output = T>,
{
    fn join(&self, x: &T, y: &T) -> T {
        x.clone() + y.clone()
    }
}

/// Order values by a derived key.
#[derive(Debug, Clone, Copy)]
pub struct ByKey<F, K> {
    key: F,
    _key: PhantomData<fn() -> K>,
}

impl<F, K> ByKey<F, K> {
    /// Order by `key(value)` using the key's [`Ord`].
    pub const fn new(key: F) -> Self {
        Self {
            key,
            _key: PhantomData,
        }
    }
}

impl<T, K, F> Order<T> for ByKey<F, K>
where
    F: Fn(&T) -> K,
    K: Ord,
{
    fn less_equals(&self, x: &T, y: &T) -> bool {
        (self.key)(x) <= (self.key)(y)
    }
}

/// A capability assembled from two closures.
#[derive(Debug, Clone, Copy)]
pub struct Capability<L, J> {
    less_equals: L,
    join: J,
}

impl<L, J> Capability<L, J> {
    /// Pair a `less_equals` closure with a `join` closure.
    pub const fn new(less_equals: L, join: J) -> Self {
        Self { less_equals, join }
    }
}

impl<T, L, J> Order<T> for Capability<L, J>
where
    L: Fn(&T, &T) -> bool,
{
    fn less_equals(&self, x: &T, y: &T) -> bool {
        (self.less_equals)(x, y)
    }
}

impl<T, L, J> Join<T> for Capability<L, J>
where
    L: Fn(&T, &T) -> bool,
    J: Fn(&T, &T) -> T,
{
    fn join(&self, x: &T, y: &T) -> T {
        (self.join)(x, y)
    }
}

// =============================================================================
// TESTS
// =============================================================================
