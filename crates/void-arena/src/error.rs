//! Arena-specific error types.

use std::error::Error;
use std::fmt;
use std::io;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The platform refused to reserve the region.
    ReservationFailed {
        /// Number of bytes that were requested.
        capacity: usize,
        /// Error kind reported by the platform.
        kind: io::ErrorKind,
    },
    /// The arena has no region (reservation failed or capacity was zero).
    Inert {
        /// Capacity the arena was configured with.
        capacity: usize,
    },
    /// Not enough space left in the region for the request.
    CapacityExceeded {
        /// Number of bytes requested, including alignment padding.
        requested: usize,
        /// Bytes left between the cursor and the end of the region.
        remaining: usize,
    },
    /// `count * elem_size` does not fit in `usize`.
    SizeOverflow {
        /// Number of elements requested.
        count: usize,
        /// Size of one element in bytes.
        elem_size: usize,
    },
    /// Alignment is zero or not a power of two.
    InvalidAlignment {
        /// The rejected alignment.
        align: usize,
    },
}

impl ArenaError {
    /// Whether this error means the request could not fit in the region.
    ///
    /// Both plain exhaustion and an overflowing size computation count:
    /// the caller may reset the arena or use a larger one.
    pub fn is_exhausted(&self) -> bool {
        matches!(
            self,
            Self::CapacityExceeded { .. } | Self::SizeOverflow { .. }
        )
    }
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReservationFailed { capacity, kind } => {
                write!(f, "failed to reserve {capacity} bytes: {kind}")
            }
            Self::Inert { capacity } => {
                write!(f, "arena is inert: no region of {capacity} bytes was reserved")
            }
            Self::CapacityExceeded {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, remaining {remaining} bytes"
                )
            }
            Self::SizeOverflow { count, elem_size } => {
                write!(
                    f,
                    "allocation size overflow: {count} elements of {elem_size} bytes"
                )
            }
            Self::InvalidAlignment { align } => {
                write!(f, "alignment {align} is not a power of two")
            }
        }
    }
}

impl Error for ArenaError {}
