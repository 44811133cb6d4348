//! # ordo-core
//!
//! The lazy enumeration engine for Ordo - THE ENGINE.
//!
//! This crate produces the elements of (possibly infinite, possibly
//! mutually recursive) sequences one at a time, on demand, and combines
//! ordered sequences into ordered sequences.
//!
//! ## Building Blocks
//!
//! - [`Status`] / [`Stream`]: the query/advance contract
//! - [`empty`], [`single`], [`deferred`], [`from_iter`]: sources
//! - [`Stream::map`], [`Iter`]: transformation and the pull bridge
//! - [`Multiplexer`] / [`View`]: one computation, many readers
//! - [`union`], [`product`]: order-preserving combinators over an
//!   [`Order`] / [`Join`] capability
//!
//! ## Example
//!
//! ```
//! use ordo_core::{Additive, Stream, from_iter, product};
//!
//! let sums = product(from_iter([0, 10, 20]), from_iter([0, 1, 2]), Additive);
//! let all: Vec<u32> = sums.iter().collect();
//! assert_eq!(all, vec![0, 1, 2, 10, 11, 12, 20, 21, 22]);
//! ```
//!
//! ## Architectural Constraints
//!
//! - Single-threaded and synchronous: "not yet" is `Status::Pending`,
//!   never a blocked thread
//! - No I/O and no logging; the app layer owns both
//! - No bound on internal buffers: that is the caller's concern

// =============================================================================
// MODULES
// =============================================================================

pub mod error;
pub mod iter;
pub mod map;
pub mod multiplex;
pub mod order;
pub mod product;
pub mod source;
pub mod status;
pub mod stream;
pub mod union;

// =============================================================================
// RE-EXPORTS: Contract
// =============================================================================

pub use error::StreamError;
pub use status::Status;
pub use stream::{BoxStream, Stream};

// =============================================================================
// RE-EXPORTS: Sources and Adapters
// =============================================================================

pub use iter::Iter;
pub use map::Map;
pub use multiplex::{Multiplexer, View};
pub use source::{Deferred, Empty, FromIter, Single, deferred, empty, from_iter, single};

// =============================================================================
// RE-EXPORTS: Ordered Combinators
// =============================================================================

pub use order::{Additive, ByKey, Capability, Join, Natural, Order};
pub use product::{Product, product};
pub use union::{Union, union, union_all};
