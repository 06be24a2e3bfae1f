//! Logical/physical index arithmetic for the pile's ring buffer.
//!
//! A pile tracks two logical indices, `front` and `back`, over [`Wrapping<usize>`].
//! The element count is the wrapping difference `back - front`, and logical index
//! `i` lives in physical slot `i % capacity`. Every operation that moves `front`
//! across zero or across the end of the buffer goes through [`RingIndex`], so the
//! relabeling tricks are written (and tested) exactly once.
//!
//! Between operations `front < capacity` always holds, which keeps `back` below
//! `2 * capacity` and away from the top of the integer range.

use core::num::Wrapping;

/// Front/back cursor pair for a ring buffer of a given capacity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct RingIndex {
    front: Wrapping<usize>,
    back: Wrapping<usize>,
}

impl RingIndex {
    /// An empty range starting at slot 0.
    #[inline(always)]
    pub(crate) const fn new() -> Self {
        Self::with_len(0)
    }

    /// A range of `len` elements starting at slot 0.
    #[inline(always)]
    pub(crate) const fn with_len(len: usize) -> Self {
        Self {
            front: Wrapping(0),
            back: Wrapping(len),
        }
    }

    /// Number of elements between `front` and `back`.
    #[inline(always)]
    pub(crate) fn len(&self) -> usize {
        (self.back - self.front).0
    }

    /// Raw logical front index.
    #[inline(always)]
    pub(crate) fn front(&self) -> usize {
        self.front.0
    }

    /// Raw logical back index (one past the last element).
    #[inline(always)]
    pub(crate) fn back(&self) -> usize {
        self.back.0
    }

    /// Maps a logical index to its physical slot.
    #[inline(always)]
    pub(crate) fn slot(logical: usize, capacity: usize) -> usize {
        debug_assert!(capacity != 0);
        logical % capacity
    }

    /// Physical slot of the element `offset` positions behind the front.
    #[inline(always)]
    pub(crate) fn slot_of(&self, offset: usize, capacity: usize) -> usize {
        Self::slot((self.front + Wrapping(offset)).0, capacity)
    }

    /// Whether the valid range crosses the end of the buffer.
    #[inline(always)]
    pub(crate) fn is_wrapped(&self, capacity: usize) -> bool {
        self.len() != 0 && self.back.0 > capacity
    }

    /// Claims the slot at the back and returns it.
    #[inline(always)]
    pub(crate) fn push_back(&mut self, capacity: usize) -> usize {
        let slot = Self::slot(self.back.0, capacity);
        self.back += 1;
        slot
    }

    /// Claims the slot in front of `front` and returns it.
    ///
    /// When `front` is 0 both indices are first shifted up by `capacity`; the
    /// physical slots they address are unchanged, and the decrement then stays
    /// inside `0..capacity`.
    #[inline(always)]
    pub(crate) fn push_front(&mut self, capacity: usize) -> usize {
        if self.front.0 == 0 {
            self.front += capacity;
            self.back += capacity;
        }
        self.front -= 1;
        Self::slot(self.front.0, capacity)
    }

    /// Releases the last slot and returns it. The range must be non-empty.
    #[inline(always)]
    pub(crate) fn pop_back(&mut self, capacity: usize) -> usize {
        debug_assert!(self.len() != 0);
        self.back -= 1;
        Self::slot(self.back.0, capacity)
    }

    /// Releases the front slot and returns it. The range must be non-empty.
    ///
    /// Popping the last physical slot relabels `front` to the wrapped value `-1`
    /// and pulls `back` down by `capacity` before advancing, so `front` lands on 0
    /// with the same length and the same physical mapping.
    #[inline(always)]
    pub(crate) fn pop_front(&mut self, capacity: usize) -> usize {
        debug_assert!(self.len() != 0);
        let slot = Self::slot(self.front.0, capacity);
        if (self.front + Wrapping(1)).0 == capacity {
            tracing::trace!(capacity, len = self.len(), "pile front index wrapped");
            self.front = Wrapping(usize::MAX);
            self.back -= capacity;
        }
        self.front += 1;
        slot
    }

    /// Re-anchors the range at physical `front_slot` with `len` elements.
    ///
    /// Used after the capacity changes, when the old `i % capacity` mapping no
    /// longer holds for indices beyond one cycle.
    #[inline(always)]
    pub(crate) fn rebase(&mut self, front_slot: usize, len: usize) {
        self.front = Wrapping(front_slot);
        self.back = Wrapping(front_slot) + Wrapping(len);
    }
}
