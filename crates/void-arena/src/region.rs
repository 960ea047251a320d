//! Anonymous memory reservation backing an arena.
//!
//! A [`Region`] is a private, zero-initialised, read/write mapping not
//! backed by any file. The mapping is released exactly once when the
//! region is dropped, on every exit path including unwinding.

#![allow(unsafe_code)]

use std::io;
use std::ptr::NonNull;

use memmap2::{MmapMut, MmapOptions};

use crate::error::ArenaError;

/// An owned anonymous mapping of a fixed number of bytes.
pub struct Region {
    map: MmapMut,
    /// First byte of `map`, taken once from its mutable pointer.
    base: NonNull<u8>,
}

// SAFETY: `base` points into `map`, which the region owns exclusively;
// moving the region moves that ownership with it.
unsafe impl Send for Region {}

impl Region {
    /// Reserve `capacity` bytes from the platform.
    ///
    /// The memory reads as zero until written. With `populate` set the
    /// pages are faulted in immediately (Linux only).
    ///
    /// A zero capacity is rejected with `ReservationFailed` and
    /// [`io::ErrorKind::InvalidInput`].
    pub fn reserve(capacity: usize, populate: bool) -> Result<Self, ArenaError> {
        if capacity == 0 {
            return Err(ArenaError::ReservationFailed {
                capacity,
                kind: io::ErrorKind::InvalidInput,
            });
        }
        let mut options = MmapOptions::new();
        options.len(capacity);
        if populate {
            options.populate();
        }
        let mut map = options
            .map_anon()
            .map_err(|e| ArenaError::ReservationFailed {
                capacity,
                kind: e.kind(),
            })?;
        // SAFETY: a successful non-empty anonymous mapping never starts
        // at address zero.
        let base = unsafe { NonNull::new_unchecked(map.as_mut_ptr()) };
        tracing::debug!(capacity, populate, "reserved arena region");
        Ok(Self { map, base })
    }

    /// Address of the first byte of the mapping.
    ///
    /// Stable for the lifetime of the region. The mapping is page-aligned.
    /// Writable for all [`len`](Self::len) bytes; the caller is
    /// responsible for not aliasing writes through it.
    pub fn base(&self) -> NonNull<u8> {
        self.base
    }

    /// Length of the mapping in bytes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the mapping is empty. Never true for a reserved region.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("base", &self.base)
            .field("len", &self.map.len())
            .finish()
    }
}
