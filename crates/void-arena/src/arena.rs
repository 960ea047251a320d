//! The bump-allocated region arena.
//!
//! An [`Arena`] owns one [`Region`] and a cursor holding the offset of the
//! next free byte. Allocation rounds the cursor's address up to the
//! requested alignment and advances it past the new range; nothing is
//! freed individually. [`Arena::reset`] moves the cursor back to the start
//! without touching the bytes.

#![allow(unsafe_code)]

use std::cell::Cell;
use std::fmt;
use std::mem;
use std::ptr::NonNull;

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::pod::Pod;
use crate::region::Region;
use crate::zero::{self, ZeroStrategy};

/// A fixed-capacity region allocator.
///
/// Sub-allocations borrow the arena, so they cannot outlive it, and
/// [`reset`](Self::reset) needs `&mut self`, so none can be used after
/// the region is reclaimed.
///
/// If the reservation failed the arena is *inert*: it holds no region
/// and every allocation returns [`ArenaError::Inert`].
pub struct Arena {
    /// Backing mapping. `None` when inert.
    region: Option<Region>,
    /// First byte of the region; dangling when inert.
    base: NonNull<u8>,
    /// Usable bytes; 0 when inert.
    capacity: usize,
    /// Capacity the arena was configured with, reported by `Inert`.
    requested: usize,
    /// Bump pointer: offset of the next free byte, `0..=capacity`.
    cursor: Cell<usize>,
    strategy: ZeroStrategy,
}

// SAFETY: the arena exclusively owns its mapping and `base` points into
// it. Moving the arena to another thread moves that ownership; the
// `Cell` cursor keeps it `!Sync`.
unsafe impl Send for Arena {}

impl Arena {
    /// Reserve a region as described by `config`.
    ///
    /// Never fails: if the platform refuses the reservation the failure
    /// is logged and the arena is inert.
    pub fn new(config: ArenaConfig) -> Self {
        let strategy = config.resolved_zero_strategy();
        if config.capacity == 0 {
            tracing::debug!("zero-capacity arena is inert");
            return Self::inert(0, strategy);
        }
        match Region::reserve(config.capacity, config.populate) {
            Ok(region) => Self::from_region(region, strategy),
            Err(err) => {
                tracing::warn!(
                    capacity = config.capacity,
                    error = %err,
                    "arena reservation failed, arena is inert"
                );
                Self::inert(config.capacity, strategy)
            }
        }
    }

    /// Reserve `capacity` bytes with default options.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::new(ArenaConfig::new(capacity))
    }

    /// Like [`new`](Self::new) but reports a failed reservation.
    ///
    /// Returns [`ArenaError::ReservationFailed`] if the platform refuses
    /// the mapping or the capacity is zero.
    pub fn try_new(config: ArenaConfig) -> Result<Self, ArenaError> {
        let strategy = config.resolved_zero_strategy();
        let region = Region::reserve(config.capacity, config.populate)?;
        Ok(Self::from_region(region, strategy))
    }

    fn from_region(region: Region, strategy: ZeroStrategy) -> Self {
        let base = region.base();
        let capacity = region.len();
        Self {
            region: Some(region),
            base,
            capacity,
            requested: capacity,
            cursor: Cell::new(0),
            strategy,
        }
    }

    fn inert(requested: usize, strategy: ZeroStrategy) -> Self {
        Self {
            region: None,
            base: NonNull::dangling(),
            capacity: 0,
            requested,
            cursor: Cell::new(0),
            strategy,
        }
    }

    /// Allocate `count` contiguous elements of `T`.
    ///
    /// The returned slice starts at a multiple of `align_of::<T>()` and
    /// holds whatever bytes the region contains: zero on first use,
    /// stale values after a [`reset`](Self::reset). On failure the cursor
    /// is unchanged.
    ///
    /// # Errors
    ///
    /// - [`ArenaError::Inert`] if the arena has no region.
    /// - [`ArenaError::SizeOverflow`] if `count * size_of::<T>()` overflows.
    /// - [`ArenaError::CapacityExceeded`] if the aligned range does not fit.
    #[allow(clippy::mut_from_ref)]
    pub fn allocate<T: Pod>(&self, count: usize) -> Result<&mut [T], ArenaError> {
        self.check_live()?;
        let elem_size = mem::size_of::<T>();
        let bytes = count
            .checked_mul(elem_size)
            .ok_or(ArenaError::SizeOverflow { count, elem_size })?;
        let offset = self.bump(bytes, mem::align_of::<T>())?;
        // SAFETY: `bump` reserved `bytes` bytes at `offset`, aligned for `T`,
        // inside the mapping and disjoint from every other live allocation
        // (the cursor only moves forward until `reset`, which needs
        // `&mut self`). `T: Pod` accepts whatever bytes are there.
        let slice = unsafe {
            std::slice::from_raw_parts_mut(self.base.as_ptr().add(offset).cast::<T>(), count)
        };
        Ok(slice)
    }

    /// Allocate `len` raw bytes aligned to `align`.
    ///
    /// # Errors
    ///
    /// [`ArenaError::InvalidAlignment`] if `align` is zero or not a power
    /// of two, otherwise as for [`allocate`](Self::allocate).
    #[allow(clippy::mut_from_ref)]
    pub fn allocate_bytes(&self, len: usize, align: usize) -> Result<&mut [u8], ArenaError> {
        self.check_live()?;
        if !align.is_power_of_two() {
            return Err(ArenaError::InvalidAlignment { align });
        }
        let offset = self.bump(len, align)?;
        // SAFETY: as in `allocate`, with `u8` elements.
        let slice =
            unsafe { std::slice::from_raw_parts_mut(self.base.as_ptr().add(offset), len) };
        Ok(slice)
    }

    /// Zero every element of `buf` with this arena's [`ZeroStrategy`].
    ///
    /// Intended for slices handed out by [`allocate`](Self::allocate), but
    /// any slice is accepted. Streaming stores are fenced before return.
    pub fn zero_fill<T: Pod>(&self, buf: &mut [T]) {
        zero::zero_fill_with(self.strategy, buf);
    }

    /// Reclaim the whole region.
    ///
    /// The cursor returns to the start; region contents are left as they
    /// are. No-op on an inert arena.
    pub fn reset(&mut self) {
        tracing::debug!(used = self.cursor.get(), "arena reset");
        self.cursor.set(0);
    }

    /// Whether the arena failed to reserve a region.
    pub fn is_inert(&self) -> bool {
        self.region.is_none()
    }

    /// Total usable bytes; 0 when inert.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Bytes consumed so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.cursor.get()
    }

    /// Bytes left between the cursor and the end of the region.
    pub fn remaining(&self) -> usize {
        self.capacity - self.cursor.get()
    }

    /// Strategy used by [`zero_fill`](Self::zero_fill).
    pub fn zero_strategy(&self) -> ZeroStrategy {
        self.strategy
    }

    fn check_live(&self) -> Result<(), ArenaError> {
        if self.region.is_none() {
            tracing::trace!(capacity = self.requested, "allocation from inert arena");
            return Err(ArenaError::Inert {
                capacity: self.requested,
            });
        }
        Ok(())
    }

    /// Advance the cursor past `size` bytes aligned to `align`.
    ///
    /// Returns the offset of the aligned start. `align` must be a power
    /// of two.
    fn bump(&self, size: usize, align: usize) -> Result<usize, ArenaError> {
        debug_assert!(align.is_power_of_two());
        let cursor = self.cursor.get();
        let remaining = self.capacity - cursor;
        let base = self.base.as_ptr() as usize;
        // Alignment is applied to the address, not the offset, so
        // alignments above the page size are honoured too.
        let start = align_up(base + cursor, align)
            .map(|addr| addr - base)
            .and_then(|start| start.checked_add(size).map(|end| (start, end)));
        match start {
            Some((start, end)) if end <= self.capacity => {
                self.cursor.set(end);
                Ok(start)
            }
            Some((_, end)) => {
                tracing::trace!(requested = end - cursor, remaining, "arena exhausted");
                Err(ArenaError::CapacityExceeded {
                    requested: end - cursor,
                    remaining,
                })
            }
            None => Err(ArenaError::CapacityExceeded {
                requested: usize::MAX,
                remaining,
            }),
        }
    }
}

/// Round `addr` up to the next multiple of `align` (a power of two).
///
/// `None` if the result does not fit in `usize`.
fn align_up(addr: usize, align: usize) -> Option<usize> {
    addr.checked_add(align - 1).map(|v| v & !(align - 1))
}

impl Default for Arena {
    /// A 1 GiB arena.
    fn default() -> Self {
        Self::new(ArenaConfig::default())
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        if self.region.is_some() {
            tracing::debug!(capacity = self.capacity, "releasing arena region");
        }
    }
}

impl fmt::Debug for Arena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("region", &self.region)
            .field("capacity", &self.capacity)
            .field("used", &self.cursor.get())
            .field("strategy", &self.strategy)
            .finish()
    }
}
