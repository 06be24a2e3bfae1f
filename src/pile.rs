//! Growable double-ended queue over one contiguous ring buffer.
//!
//! [`Pile`] keeps its elements in a single heap region used as a circular buffer.
//! Both ends accept pushes and pops in amortized O(1); the region doubles when it
//! fills up, and [`Pile::shrink_to_fit`] repacks it into a minimal, non-wrapped
//! layout on demand.
//!
//! # Layout
//!
//! ```text
//! not wrapped:   |   |   | A | B | C | D |   |   |
//!                        ^front          ^back
//!
//! wrapped:       | E | F |   |   |   | A | B | C | D |
//!                        ^back % cap ^front
//! ```
//!
//! The logical indices live in `utils::ring_index`; this module only moves bytes.

use core::fmt;
use core::mem::MaybeUninit;
use core::slice;
use std::alloc::{Layout, handle_alloc_error};

use tracing::{debug, warn};

use crate::error::{PileError, Result};
use crate::utils::ring_index::RingIndex;

/// Capacity of a pile created by [`Pile::new`] or [`Pile::from_slice`] with fewer elements.
pub const DEFAULT_CAPACITY: usize = 8;

/// Factor the capacity is multiplied by whenever a push finds the pile full.
///
/// Growth relocates the wrapped prefix into the freshly added space, which is only
/// guaranteed to fit when the factor is at least 2.
pub const GROWTH_FACTOR: usize = 2;

const _: () = assert!(GROWTH_FACTOR >= 2, "pile growth factor must be at least 2");
const _: () = assert!(DEFAULT_CAPACITY >= 1, "pile default capacity must be non-zero");

// ─── Pile ─────────────────────────────────────────────────────────────────────

/// A growable double-ended queue of `Copy` elements backed by one ring buffer.
///
/// # Storage
/// `storage` always has `len() == capacity`; every slot exists, but only the
/// slots between the logical `front` and `back` hold initialized values. Since
/// `T: Copy`, slots are overwritten and abandoned without running destructors.
///
/// # Growth
/// A push on a full pile multiplies the capacity by [`GROWTH_FACTOR`]. If the
/// contents were wrapped, the run that sat at the start of the buffer is copied
/// into the new space right after the old end, making the contents contiguous
/// again without moving the front run.
///
/// # Errors
/// Pops on an empty pile return [`PileError::Underflow`]. Running out of memory
/// while growing aborts, like every other std collection; the `try_*` pushes
/// report it as an error instead.
pub struct Pile<T: Copy> {
    index: RingIndex,
    storage: Vec<MaybeUninit<T>>,
}

impl<T: Copy> Pile<T> {
    /// Creates an empty pile with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty pile with room for `capacity` elements (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: RingIndex::new(),
            storage: vec![MaybeUninit::uninit(); capacity.max(1)],
        }
    }

    /// Creates a pile holding copies of `items`, front to back.
    ///
    /// The capacity is `max(items.len(), DEFAULT_CAPACITY)`.
    pub fn from_slice(items: &[T]) -> Self {
        let capacity = items.len().max(DEFAULT_CAPACITY);
        let mut storage = Vec::with_capacity(capacity);
        storage.extend(items.iter().copied().map(MaybeUninit::new));
        storage.resize(capacity, MaybeUninit::uninit());
        Self {
            index: RingIndex::with_len(items.len()),
            storage,
        }
    }

    /// Returns the number of elements currently in the pile.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns `true` if the pile contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the backing buffer.
    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if the next push will grow the buffer.
    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity()
    }

    /// Returns `true` if the contents currently cross the end of the buffer.
    #[inline(always)]
    pub fn is_wrapped(&self) -> bool {
        self.index.is_wrapped(self.capacity())
    }

    /// Returns a shared reference to the element at logical `index`, or `None`.
    ///
    /// Index 0 is the front.
    #[inline(always)]
    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len() {
            let slot = self.index.slot_of(index, self.capacity());
            // SAFETY: `index < len`, so `slot` lies inside the initialized range.
            Some(unsafe { self.storage[slot].assume_init_ref() })
        } else {
            None
        }
    }

    /// Returns the front element, or `None` if empty.
    #[inline(always)]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns the back element, or `None` if empty.
    #[inline(always)]
    pub fn back(&self) -> Option<&T> {
        self.len().checked_sub(1).and_then(|last| self.get(last))
    }

    /// Appends `value` to the back, growing the buffer if it is full.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize`; aborts if the allocation fails.
    #[inline(always)]
    pub fn push_back(&mut self, value: T) {
        if self.is_full() {
            self.grow_or_abort();
        }
        self.write_back(value);
    }

    /// Prepends `value` to the front, growing the buffer if it is full.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize`; aborts if the allocation fails.
    #[inline(always)]
    pub fn push_front(&mut self, value: T) {
        if self.is_full() {
            self.grow_or_abort();
        }
        self.write_front(value);
    }

    /// Appends `value` to the back, reporting growth failures instead of aborting.
    ///
    /// On error the pile is left exactly as it was.
    pub fn try_push_back(&mut self, value: T) -> Result<()> {
        self.try_grow_if_full()?;
        self.write_back(value);
        Ok(())
    }

    /// Prepends `value` to the front, reporting growth failures instead of aborting.
    ///
    /// On error the pile is left exactly as it was.
    pub fn try_push_front(&mut self, value: T) -> Result<()> {
        self.try_grow_if_full()?;
        self.write_front(value);
        Ok(())
    }

    /// Removes and returns the back element.
    ///
    /// Returns [`PileError::Underflow`] if the pile is empty.
    #[inline(always)]
    pub fn pop_back(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(PileError::Underflow);
        }
        let slot = self.index.pop_back(self.capacity());
        // SAFETY: the slot was the last initialized element.
        Ok(unsafe { self.storage[slot].assume_init() })
    }

    /// Removes and returns the front element.
    ///
    /// Returns [`PileError::Underflow`] if the pile is empty.
    #[inline(always)]
    pub fn pop_front(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(PileError::Underflow);
        }
        let slot = self.index.pop_front(self.capacity());
        // SAFETY: the slot was the first initialized element.
        Ok(unsafe { self.storage[slot].assume_init() })
    }

    /// Removes all elements, keeping the current capacity.
    pub fn clear(&mut self) {
        self.index = RingIndex::new();
    }

    /// Grows the buffer until at least `additional` more elements fit.
    ///
    /// # Panics
    /// Panics if the new capacity overflows `usize`; aborts if the allocation fails.
    pub fn reserve(&mut self, additional: usize) {
        if let Err(err) = self.try_reserve(additional) {
            growth_failed::<T>(err);
        }
    }

    /// Fallible counterpart of [`reserve`](Pile::reserve).
    ///
    /// The target capacity is the smallest `capacity * GROWTH_FACTOR^k` that fits,
    /// and it is allocated in one step. On error the pile is left exactly as it was.
    pub fn try_reserve(&mut self, additional: usize) -> Result<()> {
        self.reserve_target(additional)
            .and_then(|target| match target {
                Some(new_capacity) => self.grow_to(new_capacity),
                None => Ok(()),
            })
            .inspect_err(|err| self.log_growth_failure(err))
    }

    /// Repacks the contents to start at slot 0, with capacity equal to the length.
    ///
    /// A non-empty pile is full afterwards, so the next push grows it again. An
    /// empty pile keeps a single slot. The backing allocation is shrunk as well.
    /// Calling this on an already compacted pile does nothing.
    pub fn shrink_to_fit(&mut self) {
        let len = self.len();
        let old_capacity = self.capacity();
        let new_capacity = len.max(1);
        let front = self.index.front();
        if front == 0 && old_capacity == new_capacity {
            return;
        }

        if self.index.is_wrapped(old_capacity) {
            // EEE....ABCD  ->  EEEABCD....  ->  ABCDEEE....
            let tail_len = self.index.back() - old_capacity;
            self.storage.copy_within(front..old_capacity, tail_len);
            self.storage[..len].rotate_left(tail_len);
        } else if front != 0 {
            // ..ABCD..  ->  ABCD....
            self.storage.copy_within(front..front + len, 0);
        }

        self.index.rebase(0, len);
        self.storage.truncate(new_capacity);
        self.storage.shrink_to_fit();
        debug!(old_capacity, new_capacity, "pile compacted");
    }

    /// Returns the contents as two slices in logical order.
    ///
    /// The second slice is empty unless the contents are wrapped.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let capacity = self.capacity();
        let front = RingIndex::slot(self.index.front(), capacity);
        let len = self.len();
        if front + len <= capacity {
            // SAFETY: `front..front + len` is the initialized range.
            (unsafe { assume_init_slice(&self.storage[front..front + len]) }, &[])
        } else {
            let head_len = capacity - front;
            // SAFETY: the initialized range is `front..capacity` followed by `0..len - head_len`.
            unsafe {
                (
                    assume_init_slice(&self.storage[front..]),
                    assume_init_slice(&self.storage[..len - head_len]),
                )
            }
        }
    }

    #[inline(always)]
    fn write_back(&mut self, value: T) {
        debug_assert!(!self.is_full());
        let slot = self.index.push_back(self.capacity());
        self.storage[slot] = MaybeUninit::new(value);
    }

    #[inline(always)]
    fn write_front(&mut self, value: T) {
        debug_assert!(!self.is_full());
        let slot = self.index.push_front(self.capacity());
        self.storage[slot] = MaybeUninit::new(value);
    }

    /// Cold path of the infallible pushes.
    #[inline(never)]
    fn grow_or_abort(&mut self) {
        if let Err(err) = self.grow() {
            growth_failed::<T>(err);
        }
    }

    fn try_grow_if_full(&mut self) -> Result<()> {
        if !self.is_full() {
            return Ok(());
        }
        self.grow().inspect_err(|err| self.log_growth_failure(err))
    }

    fn log_growth_failure(&self, err: &PileError) {
        warn!(capacity = self.capacity(), len = self.len(), error = %err, "pile growth failed");
    }

    /// Capacity needed to hold `additional` more elements, or `None` if they
    /// already fit.
    fn reserve_target(&self, additional: usize) -> Result<Option<usize>> {
        let needed = self
            .len()
            .checked_add(additional)
            .ok_or(PileError::CapacityOverflow)?;
        if needed <= self.capacity() {
            return Ok(None);
        }
        let mut target = self.capacity();
        while target < needed {
            target = target
                .checked_mul(GROWTH_FACTOR)
                .ok_or(PileError::CapacityOverflow)?;
        }
        Ok(Some(target))
    }

    /// Multiplies the capacity by [`GROWTH_FACTOR`].
    fn grow(&mut self) -> Result<()> {
        let new_capacity = self
            .capacity()
            .checked_mul(GROWTH_FACTOR)
            .ok_or(PileError::CapacityOverflow)?;
        self.grow_to(new_capacity)
    }

    /// Moves to `new_capacity` slots, keeping every element at its logical position.
    ///
    /// `new_capacity` must be at least `GROWTH_FACTOR` times the current capacity,
    /// so the wrapped prefix always fits past the old end. Memory is reserved
    /// before any index or slot is touched, so an error leaves the pile unchanged.
    fn grow_to(&mut self, new_capacity: usize) -> Result<()> {
        let old_capacity = self.capacity();
        let len = self.len();
        debug_assert!(new_capacity >= old_capacity * GROWTH_FACTOR);
        if Layout::array::<T>(new_capacity).is_err() {
            return Err(PileError::CapacityOverflow);
        }

        self.storage
            .try_reserve_exact(new_capacity - old_capacity)
            .map_err(|_| PileError::AllocFailed {
                capacity: new_capacity,
            })?;
        self.storage.resize(new_capacity, MaybeUninit::uninit());

        let front = RingIndex::slot(self.index.front(), old_capacity);
        let wrapped = self.index.is_wrapped(old_capacity);
        if wrapped {
            // The run at the start of the old buffer moves to just past its old end.
            let prefix_len = self.index.back() - old_capacity;
            self.storage.copy_within(..prefix_len, old_capacity);
        }
        self.index.rebase(front, len);

        debug!(old_capacity, new_capacity, len, wrapped, "pile grown");
        Ok(())
    }
}

/// Reports a growth failure from one of the infallible entry points.
#[cold]
#[inline(never)]
fn growth_failed<T>(err: PileError) -> ! {
    match err {
        PileError::AllocFailed { capacity } => match Layout::array::<T>(capacity) {
            Ok(layout) => handle_alloc_error(layout),
            Err(_) => panic!("{}", PileError::CapacityOverflow),
        },
        err => panic!("{err}"),
    }
}

/// # Safety
/// Every element of `run` must be initialized.
#[inline(always)]
unsafe fn assume_init_slice<T>(run: &[MaybeUninit<T>]) -> &[T] {
    // SAFETY: `MaybeUninit<T>` has the layout of `T`; the caller guarantees initialization.
    unsafe { slice::from_raw_parts(run.as_ptr().cast::<T>(), run.len()) }
}

impl<T: Copy> Clone for Pile<T> {
    fn clone(&self) -> Self {
        Self {
            index: self.index,
            storage: self.storage.clone(),
        }
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Pile<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s1, s2) = self.as_slices();
        f.debug_list().entries(s1.iter().chain(s2.iter())).finish()
    }
}

impl<T: Copy> Default for Pile<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq> PartialEq for Pile<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (s1_a, s2_a) = self.as_slices();
        let (s1_b, s2_b) = other.as_slices();
        s1_a.iter()
            .chain(s2_a.iter())
            .zip(s1_b.iter().chain(s2_b.iter()))
            .all(|(a, b)| a == b)
    }
}
impl<T: Copy + Eq> Eq for Pile<T> {}

impl<T: Copy> Extend<T> for Pile<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<T: Copy> FromIterator<T> for Pile<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut pile = Self::new();
        pile.extend(iter);
        pile
    }
}

impl<T: Copy> From<&[T]> for Pile<T> {
    fn from(items: &[T]) -> Self {
        Self::from_slice(items)
    }
}
