//! Arena configuration parameters.

use crate::zero::ZeroStrategy;

/// Configuration for an [`Arena`](crate::Arena).
///
/// Controls the size of the reservation and how it is backed. All values
/// are fixed once the arena is constructed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Size of the reserved region in bytes.
    ///
    /// Default: 1 GiB. A capacity of zero produces an inert arena.
    pub capacity: usize,

    /// Pre-fault the whole mapping at reservation time.
    ///
    /// Only honoured on Linux (`MAP_POPULATE`). Trades a slower
    /// construction for no page faults on first touch. Default: `false`.
    pub populate: bool,

    /// Bulk-zero strategy to use instead of runtime detection.
    ///
    /// A strategy the CPU does not support is ignored in favour of
    /// [`ZeroStrategy::detect`]. Default: `None`.
    pub zero_strategy: Option<ZeroStrategy>,
}

impl ArenaConfig {
    /// Default reservation size: 1 GiB.
    pub const DEFAULT_CAPACITY: usize = 1 << 30;

    /// Create a config reserving `capacity` bytes with default options.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            populate: false,
            zero_strategy: None,
        }
    }

    /// Request that the mapping be pre-faulted.
    pub fn with_populate(mut self, populate: bool) -> Self {
        self.populate = populate;
        self
    }

    /// Force a particular bulk-zero strategy.
    pub fn with_zero_strategy(mut self, strategy: ZeroStrategy) -> Self {
        self.zero_strategy = Some(strategy);
        self
    }

    /// Strategy the arena will actually use on this CPU.
    pub fn resolved_zero_strategy(&self) -> ZeroStrategy {
        match self.zero_strategy {
            Some(s) if s.is_supported() => s,
            Some(s) => {
                tracing::warn!(
                    requested = ?s,
                    "zero strategy not supported on this CPU, falling back to detection"
                );
                ZeroStrategy::detect()
            }
            None => ZeroStrategy::detect(),
        }
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
