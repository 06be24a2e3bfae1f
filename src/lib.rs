//! # Pile
//!
//! A growable double-ended queue for `Copy` elements, stored in one contiguous
//! ring buffer.
//!
//! [`Pile`] supports amortized O(1) pushes and pops at both ends without any
//! per-element allocation. When a push finds the buffer full, the capacity is
//! doubled and a wrapped run is relocated into the new space. [`Pile::shrink_to_fit`]
//! repacks the contents into a minimal, non-wrapped layout.
//!
//! ## Key Features
//!
//! * **One allocation:** all elements live in a single buffer owned by the pile.
//! * **Recoverable underflow:** popping an empty pile returns [`PileError::Underflow`]
//!   instead of aborting.
//! * **Fail-fast growth:** running out of memory aborts like any std collection;
//!   [`Pile::try_push_back`] and [`Pile::try_push_front`] report it instead.
//! * **No hidden state changes:** a failed `try_*` growth leaves the pile exactly
//!   as it was, capacity included.
//!
//! ## Configuration
//!
//! * [`DEFAULT_CAPACITY`] slots are allocated by [`Pile::new`]; use
//!   [`Pile::with_capacity`] to pick another starting size.
//! * The buffer grows by [`GROWTH_FACTOR`], which is at least 2.
//!
//! ## Logging
//!
//! Growth and compaction are reported through `tracing` at `debug` level. The
//! crate never installs a subscriber.
//!
//! ## Examples
//!
//! ```rust
//! use pile::{Pile, PileError};
//!
//! let mut pile: Pile<i32> = Pile::new();
//! pile.push_back(1);
//! pile.push_back(2);
//! pile.push_front(0);
//!
//! assert_eq!(pile.len(), 3);
//! assert_eq!(pile.pop_front(), Ok(0));
//! assert_eq!(pile.pop_back(), Ok(2));
//! assert_eq!(pile.pop_back(), Ok(1));
//! assert_eq!(pile.pop_back(), Err(PileError::Underflow));
//! ```
//!
//! ### Compaction
//!
//! ```rust
//! use pile::Pile;
//!
//! let mut pile = Pile::from_slice(&[1u8, 2, 3]);
//! assert_eq!(pile.capacity(), 8);
//!
//! pile.shrink_to_fit();
//! assert_eq!(pile.capacity(), 3);
//! assert!(pile.is_full());
//!
//! // The next push grows the buffer again.
//! pile.push_back(4);
//! assert_eq!(pile.capacity(), 6);
//! ```

// --- Module Declarations ---

pub mod error;
mod pile;
mod utils;

// --- Re-exports ---

pub use error::{PileError, Result};
pub use pile::{DEFAULT_CAPACITY, GROWTH_FACTOR, Pile};
