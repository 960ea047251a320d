//! Test utilities for void-arena development.
//!
//! Provides sentinel helpers and a [`GuardedBuffer`] for checking that a
//! bulk write stays inside its target range. Nothing here depends on the
//! arena itself: callers carve the backing slice from wherever they like.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{GuardedBuffer, ZERO_FILL_SIZES};

/// Value written to every slot that must not be touched.
///
/// Non-zero in every byte so a partial overwrite is also visible.
pub const SENTINEL: i32 = 0x5A5A_5A5A;

/// Overwrite every slot of `buf` with [`SENTINEL`].
pub fn fill_sentinel(buf: &mut [i32]) {
    buf.fill(SENTINEL);
}

/// Whether every slot of `buf` still holds [`SENTINEL`].
pub fn all_sentinel(buf: &[i32]) -> bool {
    buf.iter().all(|&v| v == SENTINEL)
}

/// Whether every slot of `buf` is zero.
pub fn all_zero(buf: &[i32]) -> bool {
    buf.iter().all(|&v| v == 0)
}

/// Index and value of the first non-zero slot, for assertion messages.
pub fn first_nonzero(buf: &[i32]) -> Option<(usize, i32)> {
    buf.iter().copied().enumerate().find(|&(_, v)| v != 0)
}
