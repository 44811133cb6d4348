//! # Order-Preserving Union
//!
//! Merges two non-decreasing streams into one non-decreasing stream.
//!
//! ## Decision Table
//!
//! | left      | right     | result                            |
//! |-----------|-----------|-----------------------------------|
//! | Ready(x)  | Ready(y)  | smaller of the two, ties to left  |
//! | Ready(x)  | Ended     | Ready(x)                          |
//! | Ended     | Ready(y)  | Ready(y)                          |
//! | Ended     | Ended     | Ended                             |
//! | otherwise |           | Pending                           |
//!
//! A `Pending` side may still hold an element smaller than the other side's
//! head, so the union cannot choose until it knows.

use crate::error::contract_violation;
use crate::order::Order;
use crate::source::empty;
use crate::status::Status;
use crate::stream::{BoxStream, Stream};

/// The cached, stable decision for the current position.
enum Verdict<T> {
    Left(T),
    Right(T),
    Ended,
}

/// Merge of two ordered streams. Created by [`union`].
pub struct Union<L, R, O>
where
    L: Stream,
{
    left: L,
    right: R,
    order: O,
    verdict: Option<Verdict<L::Item>>,
}

/// Merge `left` and `right`, both non-decreasing under `order`.
///
/// When neither side is strictly smaller the left element comes first.
pub fn union<L, R, O>(left: L, right: R, order: O) -> Union<L, R, O>
where
    L: Stream,
    R: Stream<Item = L::Item>,
    O: Order<L::Item>,
{
    Union {
        left,
        right,
        order,
        verdict: None,
    }
}

/// Merge any number of ordered streams, earlier streams winning ties.
///
/// No streams at all gives an empty stream.
pub fn union_all<'a, T, I, O>(streams: I, order: O) -> BoxStream<'a, T>
where
    T: Clone + 'a,
    I: IntoIterator<Item = BoxStream<'a, T>>,
    I::IntoIter: DoubleEndedIterator,
    O: Order<T> + Clone + 'a,
{
    // Fold from the right so the first stream sits leftmost in every union.
    streams
        .into_iter()
        .rev()
        .reduce(|right, left| union(left, right, order.clone()).boxed())
        .unwrap_or_else(|| empty().boxed())
}

impl<L, R, O> Stream for Union<L, R, O>
where
    L: Stream,
    R: Stream<Item = L::Item>,
    O: Order<L::Item>,
{
    type Item = L::Item;

    fn query(&mut self) -> Status<L::Item> {
        match &self.verdict {
            Some(Verdict::Left(value) | Verdict::Right(value)) => {
                return Status::Ready(value.clone());
            }
            Some(Verdict::Ended) => return Status::Ended,
            None => {}
        }

        let verdict = match (self.left.query(), self.right.query()) {
            (Status::Ready(x), Status::Ready(y)) => {
                if self.order.less_equals(&x, &y) {
                    Verdict::Left(x)
                } else {
                    Verdict::Right(y)
                }
            }
            (Status::Ready(x), Status::Ended) => Verdict::Left(x),
            (Status::Ended, Status::Ready(y)) => Verdict::Right(y),
            (Status::Ended, Status::Ended) => Verdict::Ended,
            _ => return Status::Pending,
        };

        let status = match &verdict {
            Verdict::Left(value) | Verdict::Right(value) => Status::Ready(value.clone()),
            Verdict::Ended => Status::Ended,
        };
        self.verdict = Some(verdict);
        status
    }

    fn advance(&mut self) {
        match self.verdict.take() {
            Some(Verdict::Left(_)) => self.left.advance(),
            Some(Verdict::Right(_)) => self.right.advance(),
            other => {
                self.verdict = other;
                contract_violation("Union::advance");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
