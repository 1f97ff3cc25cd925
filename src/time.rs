//! Time abstraction for platform-agnostic cycle counting.

use crate::config::ClockConfig;

/// A consistent reading of the hardware counter and the rollover count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Snapshot {
    /// Raw down-counter value.
    pub counter: u32,

    /// Number of counter wraps seen so far.
    pub rollovers: u64,
}

impl Snapshot {
    /// The snapshot an unstarted timer measures from.
    pub const ZERO: Self = Self {
        counter: 0,
        rollovers: 0,
    };

    #[inline]
    pub const fn new(counter: u32, rollovers: u64) -> Self {
        Self { counter, rollovers }
    }

    /// Cycles elapsed between `earlier` and `self`.
    ///
    /// The counter counts down, so within one period the elapsed count is
    /// `earlier.counter - self.counter`. Arithmetic wraps like the hardware does.
    pub fn cycles_since(&self, earlier: Snapshot, period_cycles: u64) -> u64 {
        self.rollovers
            .wrapping_sub(earlier.rollovers)
            .wrapping_mul(period_cycles)
            .wrapping_add(earlier.counter as u64)
            .wrapping_sub(self.counter as u64)
    }
}

/// Trait for abstracting cycle sources.
pub trait TimeSource {
    /// Returns the current snapshot.
    fn now(&self) -> Snapshot;

    /// Returns the timing configuration the source runs with.
    fn config(&self) -> &ClockConfig;
}
