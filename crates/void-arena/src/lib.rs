//! Fixed-capacity region allocation with streaming bulk zero-fill.
//!
//! An [`Arena`] reserves one large anonymous mapping up front and serves
//! typed sub-allocations by bumping a cursor. Nothing is freed
//! individually: [`Arena::reset`] reclaims the whole region at once and
//! dropping the arena returns the mapping to the operating system.
//!
//! # Architecture
//!
//! ```text
//! Arena
//! ├── Region (anonymous RW mapping, unmapped on drop)
//! ├── cursor: offset of the next free byte, 0 ..= capacity
//! └── ZeroStrategy (AVX2 / SSE2 streaming stores, or portable)
//! ```
//!
//! # Failure model
//!
//! [`Arena::new`] never fails. If the platform refuses the reservation the
//! arena is *inert*: every allocation returns [`ArenaError::Inert`]. Use
//! [`Arena::try_new`] to observe the reservation error directly.
//!
//! # Threading
//!
//! `Arena` is `Send` but not `Sync`. The cursor is unsynchronized; use one
//! arena per thread.
//!
//! # Example
//!
//! ```
//! use void_arena::Arena;
//!
//! let arena = Arena::with_capacity(1 << 20);
//! let ints = arena.allocate::<i32>(100).unwrap();
//! ints.fill(7);
//! arena.zero_fill(ints);
//! assert!(ints.iter().all(|&v| v == 0));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod pod;
pub mod region;
pub mod zero;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use pod::Pod;
pub use region::Region;
pub use zero::{zero_fill, zero_fill_with, ZeroStrategy};
