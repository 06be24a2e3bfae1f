//! Internal helpers shared by the pile implementation.

pub(crate) mod ring_index;
