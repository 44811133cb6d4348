//! # Order-Preserving Product
//!
//! Joins every left element with every right element and emits the joins
//! in non-decreasing order, without materializing the cross product.
//!
//! ## Working Set
//!
//! The product keeps one *lane* per left element seen so far. Lane `k`
//! is `map(view_k, |y| join(x_k, y))`, where `view_k` is an independent
//! [`View`] of the right-hand stream. The right-hand stream sits behind a
//! [`Multiplexer`], so it is computed once and replayed by every lane.
//!
//! ```text
//!   left:  x0     x1     x2 (not pulled yet)
//!          │      │
//!   lane0: j(x0,y0) j(x0,y1) j(x0,y2) ...
//!   lane1: j(x1,y0) j(x1,y1) ...
//! ```
//!
//! Each query takes the minimum over all lane heads. A new left element is
//! pulled only after the newest lane has moved past its first element:
//! until then that head, `join(x_k, y0)`, lower-bounds everything a later
//! lane could produce, because inputs are non-decreasing and `join` is
//! monotone.
//!
//! Lanes that report `Ended` can never produce again and are dropped from
//! the working set. Equal heads resolve to the lane of the earlier left
//! element.

use crate::error::contract_violation;
use crate::map::Map;
use crate::multiplex::{Multiplexer, View};
use crate::order::Join;
use crate::status::Status;
use crate::stream::Stream;
use std::rc::Rc;

/// One left element joined against its own view of the right stream.
struct Lane<'a, R: Stream> {
    /// Position of the left element this lane was built from.
    ordinal: usize,
    stream: Map<View<R>, Box<dyn FnMut(R::Item) -> R::Item + 'a>, R::Item>,
}

/// The cached, stable decision for the current position.
enum Choice<T> {
    /// Minimum head and the index of the lane holding it.
    Ready(T, usize),
    Ended,
}

/// Ordered product of two streams. Created by [`product`].
pub struct Product<'a, L, R, O>
where
    L: Stream,
    R: Stream<Item = L::Item>,
{
    left: L,
    left_ended: bool,
    right: Multiplexer<R>,
    order: Rc<O>,
    lanes: Vec<Lane<'a, R>>,
    /// Number of lanes ever created, including dropped ones.
    appended: usize,
    /// The newest lane moved past its first element; pull another left element.
    needs_left: bool,
    choice: Option<Choice<L::Item>>,
}

/// All pairwise `order.join(x, y)` for `x` in `left` and `y` in `right`,
/// in non-decreasing order.
///
/// Both inputs must be non-decreasing under `order`, and `join` must be
/// monotone in both arguments.
pub fn product<'a, L, R, O>(left: L, right: R, order: O) -> Product<'a, L, R, O>
where
    L: Stream,
    L::Item: 'a,
    R: Stream<Item = L::Item>,
    O: Join<L::Item> + 'a,
{
    Product {
        left,
        left_ended: false,
        right: Multiplexer::new(right),
        order: Rc::new(order),
        lanes: Vec::new(),
        appended: 0,
        needs_left: true,
        choice: None,
    }
}

impl<'a, L, R, O> Product<'a, L, R, O>
where
    L: Stream,
    L::Item: 'a,
    R: Stream<Item = L::Item>,
    O: Join<L::Item> + 'a,
{
    /// Number of lanes currently in the working set.
    pub fn lanes(&self) -> usize {
        self.lanes.len()
    }

    fn push_lane(&mut self, x: L::Item) {
        let order = Rc::clone(&self.order);
        let join: Box<dyn FnMut(L::Item) -> L::Item + 'a> =
            Box::new(move |y: L::Item| order.join(&x, &y));
        self.lanes.push(Lane {
            ordinal: self.appended,
            stream: self.right.view().map(join),
        });
        self.appended += 1;
    }

    /// Pull one more left element if the working set needs it.
    /// Returns `false` if the left stream cannot answer yet.
    fn grow(&mut self) -> bool {
        if !self.needs_left || self.left_ended {
            return true;
        }
        match self.left.query() {
            Status::Ready(x) => {
                self.left.advance();
                self.push_lane(x);
            }
            Status::Ended => self.left_ended = true,
            Status::Pending => return false,
        }
        self.needs_left = false;
        true
    }
}

impl<'a, L, R, O> Stream for Product<'a, L, R, O>
where
    L: Stream,
    L::Item: 'a,
    R: Stream<Item = L::Item>,
    O: Join<L::Item> + 'a,
{
    type Item = L::Item;

    fn query(&mut self) -> Status<L::Item> {
        match &self.choice {
            Some(Choice::Ready(value, _)) => return Status::Ready(value.clone()),
            Some(Choice::Ended) => return Status::Ended,
            None => {}
        }

        if !self.grow() {
            return Status::Pending;
        }

        let mut best: Option<(usize, L::Item)> = None;
        let mut pending = false;
        let mut index = 0;
        while index < self.lanes.len() {
            match self.lanes[index].stream.query() {
                Status::Ready(value) => {
                    let better = best
                        .as_ref()
                        .is_none_or(|(_, current)| !self.order.less_equals(current, &value));
                    if better {
                        best = Some((index, value));
                    }
                    index += 1;
                }
                Status::Ended => {
                    self.lanes.remove(index);
                }
                Status::Pending => {
                    pending = true;
                    index += 1;
                }
            }
        }

        // A pending lane might hold something smaller than the current best.
        if pending {
            return Status::Pending;
        }

        // No lane left: either the left stream ended, or the newest lane
        // ended at its first element, meaning the right stream is empty.
        let (choice, status) = match best {
            Some((index, value)) => (Choice::Ready(value.clone(), index), Status::Ready(value)),
            None => (Choice::Ended, Status::Ended),
        };
        self.choice = Some(choice);
        status
    }

    fn advance(&mut self) {
        match self.choice.take() {
            Some(Choice::Ready(_, index)) => {
                let lane = &mut self.lanes[index];
                lane.stream.advance();
                if lane.ordinal + 1 == self.appended {
                    self.needs_left = true;
                }
            }
            other => {
                self.choice = other;
                contract_violation("Product::advance");
            }
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{Additive, Capability};
    use crate::source::{empty, from_iter, single};
    use std::cell::Cell;

    fn drain<S: Stream>(mut stream: S) -> Vec<S::Item> {
        let mut out = Vec::new();
        while let Status::Ready(value) = stream.query() {
            out.push(value);
            stream.advance();
        }
        out
    }

    #[test]
    fn sums_in_order() {
        let sums = product(from_iter([0, 10, 20]), from_iter([0, 1, 2]), Additive);
        assert_eq!(drain(sums), vec![0, 1, 2, 10, 11, 12, 20, 21, 22]);
    }

    #[test]
    fn interleaves_when_ranges_overlap() {
        let sums = product(from_iter([0, 1]), from_iter([0, 1, 5]), Additive);
        assert_eq!(drain(sums), vec![0, 1, 1, 2, 5, 6]);
    }

    #[test]
    fn empty_side_gives_empty_product() {
        assert!(drain(product(empty::<u32>(), from_iter([1, 2]), Additive)).is_empty());
        assert!(drain(product(from_iter([1, 2]), empty::<u32>(), Additive)).is_empty());
    }

    #[test]
    fn empty_right_does_not_exhaust_infinite_left() {
        let mut sums = product(from_iter(0u64..), empty(), Additive);
        assert_eq!(sums.query(), Status::Ended);
        assert_eq!(sums.query(), Status::Ended);
    }

    #[test]
    fn left_pulled_in_step_with_consumption() {
        let pulled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulled);
        let left = from_iter((0u64..).map(|x| x * 100).inspect(move |_| {
            counter.set(counter.get() + 1);
        }));
        let mut sums = product(left, from_iter([0, 1, 2]), Additive);

        assert_eq!(sums.query(), Status::Ready(0));
        assert_eq!(pulled.get(), 1);
        assert_eq!(sums.lanes(), 1);

        sums.advance();
        assert_eq!(sums.query(), Status::Ready(1));
        assert_eq!(sums.lanes(), 2);

        // Older lanes are consumed without pulling the left stream further
        sums.advance();
        assert_eq!(sums.query(), Status::Ready(2));
        sums.advance();
        assert_eq!(sums.query(), Status::Ready(100));
        assert_eq!(pulled.get(), 2);
    }

    #[test]
    fn exhausted_lanes_are_dropped() {
        let mut sums = product(from_iter([0, 10]), single(0), Additive);
        assert_eq!(sums.query(), Status::Ready(0));
        sums.advance();
        assert_eq!(sums.query(), Status::Ready(10));
        assert_eq!(sums.lanes(), 1);
        sums.advance();
        assert_eq!(sums.query(), Status::Ended);
        assert_eq!(sums.lanes(), 0);
    }

    #[test]
    fn ties_resolve_to_earlier_left_element() {
        // Order by weight only; payload records which side produced it.
        let capability = Capability::new(
            |x: &(u32, String), y: &(u32, String)| x.0 <= y.0,
            |x: &(u32, String), y: &(u32, String)| (x.0 + y.0, format!("{}{}", x.1, y.1)),
        );
        let left = from_iter([(0, "a".to_string()), (0, "b".to_string())]);
        let right = from_iter([(1, "x".to_string()), (1, "y".to_string())]);
        let names: Vec<String> = drain(product(left, right, capability))
            .into_iter()
            .map(|(_, name)| name)
            .collect();
        assert_eq!(names, vec!["ax", "ay", "bx", "by"]);
    }

    /// `Pending` while `open` is unset, otherwise behaves like `inner`.
    struct Gate<S> {
        open: Rc<Cell<bool>>,
        inner: S,
    }

    impl<S: Stream> Stream for Gate<S> {
        type Item = S::Item;

        fn query(&mut self) -> Status<S::Item> {
            if self.open.get() {
                self.inner.query()
            } else {
                Status::Pending
            }
        }

        fn advance(&mut self) {
            self.inner.advance();
        }
    }

    fn gate<S: Stream>(inner: S) -> (Gate<S>, Rc<Cell<bool>>) {
        let open = Rc::new(Cell::new(true));
        let gate = Gate {
            open: Rc::clone(&open),
            inner,
        };
        (gate, open)
    }

    /// Answers `Pending` once before every element and before the end.
    struct Stutter<S> {
        inner: S,
        primed: bool,
    }

    impl<S: Stream> Stream for Stutter<S> {
        type Item = S::Item;

        fn query(&mut self) -> Status<S::Item> {
            if !self.primed {
                self.primed = true;
                return Status::Pending;
            }
            self.inner.query()
        }

        fn advance(&mut self) {
            self.primed = false;
            self.inner.advance();
        }
    }

    #[test]
    fn pending_left_blocks_until_it_answers() {
        let (left, open) = gate(from_iter([0, 10]));
        let mut sums = product(left, from_iter([0, 1, 2]), Additive);

        assert_eq!(sums.query(), Status::Ready(0));
        open.set(false);
        sums.advance();

        // The next left element could undercut every lane head
        assert_eq!(sums.query(), Status::Pending);
        assert_eq!(sums.query(), Status::Pending);
        assert_eq!(sums.lanes(), 1);

        open.set(true);
        assert_eq!(sums.query(), Status::Ready(1));
        assert_eq!(sums.lanes(), 2);
        sums.advance();
        assert_eq!(drain(sums), vec![2, 10, 11, 12]);
    }

    #[test]
    fn pending_lane_blocks_ready_minimum() {
        let (right, open) = gate(from_iter([0, 1, 2]));
        let mut sums = product(from_iter([0, 100]), right, Additive);

        assert_eq!(sums.query(), Status::Ready(0));
        sums.advance();
        assert_eq!(sums.query(), Status::Ready(1));
        sums.advance();

        // Lane 0 waits on an unbuffered right element; lane 1 holds 100
        open.set(false);
        assert_eq!(sums.query(), Status::Pending);
        assert_eq!(sums.lanes(), 2);

        open.set(true);
        assert_eq!(drain(sums), vec![2, 100, 101, 102]);
    }

    #[test]
    fn intermittently_pending_inputs_give_every_sum_in_order() {
        let left = Stutter {
            inner: from_iter([0, 1, 5, 9]),
            primed: false,
        };
        let right = Stutter {
            inner: from_iter([0, 2, 3, 7]),
            primed: false,
        };
        let mut sums = product(left, right, Additive);

        let mut seen = Vec::new();
        let mut retries = 0;
        loop {
            match sums.query() {
                Status::Ready(value) => {
                    seen.push(value);
                    sums.advance();
                }
                Status::Pending => {
                    retries += 1;
                    assert!(retries < 1000, "product stopped making progress");
                }
                Status::Ended => break,
            }
        }

        let mut expected: Vec<u32> = [0, 1, 5, 9]
            .into_iter()
            .flat_map(|x| [0, 2, 3, 7].into_iter().map(move |y| x + y))
            .collect();
        expected.sort_unstable();
        assert_eq!(seen, expected);
        assert!(retries > 0);
    }

    #[test]
    #[should_panic(expected = "Product::advance")]
    fn advance_without_ready_is_rejected() {
        let mut sums = product(from_iter([1u8]), from_iter([1u8]), Additive);
        sums.advance();
    }
}
