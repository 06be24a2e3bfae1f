//! Error type for fallible pile operations.

use thiserror::Error;

/// Errors returned by [`Pile`](crate::Pile) operations.
///
/// Popping from an empty pile is the only error callers are expected to see in
/// normal use. The growth errors are only surfaced by
/// [`try_push_back`](crate::Pile::try_push_back) and
/// [`try_push_front`](crate::Pile::try_push_front); the plain pushes treat them
/// as fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PileError {
    /// A pop was attempted on an empty pile.
    #[error("tried to pop an element of an empty pile")]
    Underflow,
    /// The grown capacity does not fit in `usize` or exceeds `isize::MAX` bytes.
    #[error("pile capacity overflow")]
    CapacityOverflow,
    /// The allocator could not provide storage for the grown capacity.
    #[error("allocation of {capacity} slots failed")]
    AllocFailed {
        /// Capacity (in elements) that was requested.
        capacity: usize,
    },
}

/// Result alias defaulting to [`PileError`].
pub type Result<T, E = PileError> = core::result::Result<T, E>;
