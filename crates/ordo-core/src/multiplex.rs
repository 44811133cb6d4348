//! # Memoizing Multiplexer
//!
//! Turns a single-consumer stream into a many-reader source without
//! re-running the underlying computation per reader.
//!
//! ```text
//!              ┌──────────────────────────────┐
//!   source ──▶ │ buffer: [v0, v1, v2, ...]    │
//!              │ ended / head_buffered flags  │
//!              └──────────────────────────────┘
//!                 ▲          ▲          ▲
//!             Multiplexer   View       View
//!             (index 3)   (index 0)  (index 2)
//! ```
//!
//! Every reader is an index into one shared, append-only buffer. Reading
//! a buffered index never touches the source. Reading one past the end
//! pulls exactly one element from the source. Each source element is
//! therefore produced, buffered and advanced past exactly once.
//!
//! ## Re-entrant growth
//!
//! A recursive definition may ask a view for a not-yet-buffered element
//! while the source is itself busy producing the next element for the
//! same buffer. That request cannot be answered without recursing
//! forever, so it reports `Pending`.

use crate::error::contract_violation;
use crate::status::Status;
use crate::stream::Stream;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// =============================================================================
// SHARED BUFFER
// =============================================================================

/// The single owner of the source stream and of everything it produced.
struct Shared<S: Stream> {
    source: RefCell<S>,
    buffer: RefCell<Vec<S::Item>>,
    /// The source reported `Ended`; the buffer is complete.
    ended: Cell<bool>,
    /// The source's current `Ready` element is already the buffer's last
    /// entry; the source must be advanced before the next pull.
    head_buffered: Cell<bool>,
}

impl<S: Stream> Shared<S> {
    fn new(source: S) -> Self {
        Self {
            source: RefCell::new(source),
            buffer: RefCell::new(Vec::new()),
            ended: Cell::new(false),
            head_buffered: Cell::new(false),
        }
    }

    fn len(&self) -> usize {
        self.buffer.borrow().len()
    }

    fn get(&self, index: usize) -> Option<S::Item> {
        self.buffer.borrow().get(index).cloned()
    }

    /// Extend the buffer by one element.
    fn pull(&self) -> Status<S::Item> {
        let Ok(mut source) = self.source.try_borrow_mut() else {
            // Re-entrant: the source is already producing for this buffer
            return Status::Pending;
        };

        if self.head_buffered.get() {
            source.advance();
            self.head_buffered.set(false);
        }

        // No buffer borrow is held while the source runs, so views of this
        // buffer stay readable from inside `query`.
        match source.query() {
            Status::Ready(value) => {
                self.buffer.borrow_mut().push(value.clone());
                self.head_buffered.set(true);
                Status::Ready(value)
            }
            Status::Ended => {
                self.ended.set(true);
                Status::Ended
            }
            Status::Pending => Status::Pending,
        }
    }

    fn query_at(&self, index: usize) -> Status<S::Item> {
        if let Some(value) = self.get(index) {
            return Status::Ready(value);
        }
        if self.ended.get() {
            return Status::Ended;
        }
        // A reader only advances past buffered elements, so `index` is the
        // buffer length and the pulled element lands exactly there.
        self.pull()
    }
}

// =============================================================================
// VIEW
// =============================================================================

/// An independent read cursor into a multiplexer's buffer.
///
/// A view owns nothing but its index. Cloning a view forks a new cursor at
/// the same position.
pub struct View<S: Stream> {
    shared: Rc<Shared<S>>,
    index: usize,
    /// The last query at `index` answered `Ready`.
    observed: bool,
}

impl<S: Stream> View<S> {
    /// Number of elements this view has consumed.
    pub fn position(&self) -> usize {
        self.index
    }
}

impl<S: Stream> Clone for View<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            index: self.index,
            observed: self.observed,
        }
    }
}

impl<S: Stream> Stream for View<S> {
    type Item = S::Item;

    fn query(&mut self) -> Status<S::Item> {
        let status = self.shared.query_at(self.index);
        self.observed = status.is_ready();
        status
    }

    fn advance(&mut self) {
        if !self.observed {
            contract_violation("View::advance");
        }
        self.observed = false;
        self.index += 1;
    }
}

// =============================================================================
// MULTIPLEXER
// =============================================================================

/// A shared, buffered, many-reader wrapper around a stream.
///
/// The multiplexer is itself a [`Stream`] (the main reader) and a factory
/// for further [`View`]s. Building one takes ownership of the source, so
/// the source can no longer be driven directly.
pub struct Multiplexer<S: Stream> {
    main: View<S>,
}

impl<S: Stream> Multiplexer<S> {
    /// Take sole ownership of `source`.
    pub fn new(source: S) -> Self {
        Self {
            main: View {
                shared: Rc::new(Shared::new(source)),
                index: 0,
                observed: false,
            },
        }
    }

    /// A new reader positioned at the first element of the sequence.
    pub fn view(&self) -> View<S> {
        View {
            shared: Rc::clone(&self.main.shared),
            index: 0,
            observed: false,
        }
    }

    /// Number of source elements produced so far.
    pub fn buffered(&self) -> usize {
        self.main.shared.len()
    }

    /// True once the source has reported `Ended`; the buffer will not grow.
    pub fn is_exhausted(&self) -> bool {
        self.main.shared.ended.get()
    }
}

impl<S: Stream> Stream for Multiplexer<S> {
    type Item = S::Item;

    fn query(&mut self) -> Status<S::Item> {
        self.main.query()
    }

    fn advance(&mut self) {
        self.main.advance();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{deferred, from_iter, single};
    use crate::stream::BoxStream;

    /// Counts how often the wrapped stream is queried and advanced.
    struct Probe<S> {
        inner: S,
        queries: Rc<Cell<usize>>,
        advances: Rc<Cell<usize>>,
    }

    impl<S: Stream> Stream for Probe<S> {
        type Item = S::Item;

        fn query(&mut self) -> Status<S::Item> {
            self.queries.set(self.queries.get() + 1);
            self.inner.query()
        }

        fn advance(&mut self) {
            self.advances.set(self.advances.get() + 1);
            self.inner.advance();
        }
    }

    fn probe<S: Stream>(inner: S) -> (Probe<S>, Rc<Cell<usize>>, Rc<Cell<usize>>) {
        let queries = Rc::new(Cell::new(0));
        let advances = Rc::new(Cell::new(0));
        let probe = Probe {
            inner,
            queries: Rc::clone(&queries),
            advances: Rc::clone(&advances),
        };
        (probe, queries, advances)
    }

    fn drain<S: Stream>(stream: &mut S) -> Vec<S::Item> {
        let mut out = Vec::new();
        while let Status::Ready(value) = stream.query() {
            out.push(value);
            stream.advance();
        }
        out
    }

    #[test]
    fn main_reader_sees_source_sequence() {
        let mut mux = Multiplexer::new(from_iter([1, 2, 3]));
        assert_eq!(drain(&mut mux), vec![1, 2, 3]);
        assert_eq!(mux.query(), Status::Ended);
        assert!(mux.is_exhausted());
    }

    #[test]
    fn views_replay_from_the_start() {
        let mut mux = Multiplexer::new(from_iter(['a', 'b']));
        assert_eq!(drain(&mut mux), vec!['a', 'b']);

        let mut late = mux.view();
        assert_eq!(late.position(), 0);
        assert_eq!(drain(&mut late), vec!['a', 'b']);
        assert_eq!(late.position(), 2);
    }

    #[test]
    fn source_advanced_once_per_element() {
        let (source, queries, advances) = probe(from_iter(0..4));
        let mut mux = Multiplexer::new(source);
        let mut first = mux.view();
        let mut second = mux.view();

        // Repeated queries at the head do not re-pull or double-buffer
        assert_eq!(first.query(), Status::Ready(0));
        assert_eq!(second.query(), Status::Ready(0));
        assert_eq!(mux.query(), Status::Ready(0));
        assert_eq!(mux.buffered(), 1);
        assert_eq!(queries.get(), 1);
        assert_eq!(advances.get(), 0);

        assert_eq!(drain(&mut first), vec![0, 1, 2, 3]);
        assert_eq!(drain(&mut second), vec![0, 1, 2, 3]);
        assert_eq!(drain(&mut mux), vec![0, 1, 2, 3]);
        assert_eq!(advances.get(), 4);
    }

    #[test]
    fn forked_view_keeps_position() {
        let mux = Multiplexer::new(from_iter([5, 6, 7]));
        let mut view = mux.view();
        let _ = view.query();
        view.advance();

        let mut fork = view.clone();
        assert_eq!(fork.position(), 1);
        assert_eq!(drain(&mut fork), vec![6, 7]);
        assert_eq!(view.query(), Status::Ready(6));
    }

    #[test]
    #[should_panic(expected = "View::advance")]
    fn view_advance_past_buffer_is_rejected() {
        let mux = Multiplexer::new(single(1));
        let mut view = mux.view();
        view.advance();
    }

    /// A stream that reads from a view of the multiplexer it feeds.
    struct Echo {
        slot: Rc<RefCell<Option<View<BoxStream<'static, u32>>>>>,
    }

    impl Stream for Echo {
        type Item = u32;

        fn query(&mut self) -> Status<u32> {
            match self.slot.borrow_mut().as_mut() {
                Some(view) => view.query(),
                None => Status::Ended,
            }
        }

        fn advance(&mut self) {
            if let Some(view) = self.slot.borrow_mut().as_mut() {
                view.advance();
            }
        }
    }

    #[test]
    fn self_reference_reports_pending() {
        let slot = Rc::new(RefCell::new(None));
        let echo_slot = Rc::clone(&slot);
        let source: BoxStream<'static, u32> = deferred(move || Echo { slot: echo_slot }).boxed();

        let mut mux = Multiplexer::new(source);
        *slot.borrow_mut() = Some(mux.view());

        assert_eq!(mux.query(), Status::Pending);
        assert_eq!(mux.query(), Status::Pending);
        assert_eq!(mux.buffered(), 0);
        assert!(!mux.is_exhausted());
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

    /// Drain, retrying `Pending` answers a bounded number of times.
    fn drain_retrying<S: Stream>(stream: &mut S) -> Vec<S::Item> {
        let mut out = Vec::new();
        for _ in 0..100 {
            match stream.query() {
                Status::Ready(value) => {
                    out.push(value);
                    stream.advance();
                }
                Status::Pending => {}
                Status::Ended => return out,
            }
        }
        out
    }

    #[test]
    fn pending_source_recovers_for_every_view() {
        let stutter = Stutter {
            inner: from_iter([1, 2, 3]),
            primed: false,
        };
        let (source, _, advances) = probe(stutter);
        let mux = Multiplexer::new(source);
        let mut first = mux.view();
        let mut second = mux.view();

        // The source's Pending passes through, then the same element resumes
        assert_eq!(first.query(), Status::Pending);
        assert_eq!(mux.buffered(), 0);
        assert_eq!(first.query(), Status::Ready(1));
        assert_eq!(second.query(), Status::Ready(1));

        assert_eq!(drain_retrying(&mut first), vec![1, 2, 3]);
        assert_eq!(drain_retrying(&mut second), vec![1, 2, 3]);
        assert_eq!(advances.get(), 3);
    }

    #[test]
    #[should_panic(expected = "View::advance")]
    fn view_advance_over_element_buffered_by_another_reader_is_rejected() {
        let mux = Multiplexer::new(from_iter([1, 2]));
        let mut reader = mux.view();
        let mut other = mux.view();
        assert_eq!(reader.query(), Status::Ready(1));
        other.advance();
    }

    #[test]
    #[should_panic(expected = "View::advance")]
    fn view_advance_after_pending_is_rejected() {
        let mux = Multiplexer::new(Stutter {
            inner: from_iter([1]),
            primed: false,
        });
        let mut view = mux.view();
        assert_eq!(view.query(), Status::Pending);
        view.advance();
    }

    #[test]
    #[should_panic(expected = "View::advance")]
    fn view_second_advance_per_observation_is_rejected() {
        let mux = Multiplexer::new(from_iter([1, 2]));
        let mut view = mux.view();
        assert_eq!(view.query(), Status::Ready(1));
        view.advance();
        view.advance();
    }
}
