//! Benchmark profiles and utilities for the void-arena allocator.
//!
//! Provides pre-sized [`ZeroFillProfile`]s for benchmarks and examples:
//!
//! - [`ZeroFillProfile::reference`]: 100M ints (~400MB), the headline comparison
//! - [`ZeroFillProfile::small`]: 1M ints (~4MB), for quick criterion runs
//! - [`reference_fill`]: the baseline a streaming zero is measured against

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use void_arena::{Arena, ArenaConfig};

/// Size of a zero-fill benchmark run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZeroFillProfile {
    /// Number of `i32` slots to zero.
    pub elements: usize,
}

impl ZeroFillProfile {
    /// 100M ints: large enough that the buffer dwarfs every cache level.
    pub fn reference() -> Self {
        Self {
            elements: 100_000_000,
        }
    }

    /// 1M ints: fits in a large L3, fast enough for criterion sampling.
    pub fn small() -> Self {
        Self { elements: 1_000_000 }
    }

    /// Bytes occupied by the buffer.
    pub fn bytes(&self) -> usize {
        self.elements * std::mem::size_of::<i32>()
    }

    /// An arena just large enough for one buffer of this profile,
    /// rounded up to whole 2 MiB blocks.
    pub fn arena(&self) -> Arena {
        const BLOCK: usize = 2 << 20;
        let capacity = self.bytes().div_ceil(BLOCK).max(1) * BLOCK;
        Arena::new(ArenaConfig::new(capacity))
    }
}

/// Baseline bulk zero: ordinary stores through `slice::fill`.
pub fn reference_fill(buf: &mut [i32]) {
    buf.fill(0);
}
