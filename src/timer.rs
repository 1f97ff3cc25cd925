//! Software timers measured against an [`ElapsedTimeClock`](crate::ElapsedTimeClock).

use crate::config::ClockConfig;
use crate::time::{Snapshot, TimeSource};

/// A single countdown measured in hardware counter cycles.
///
/// Plain value type: construct it with a duration, [`start`](Self::start) it,
/// then poll it. A timer that is no longer needed is simply overwritten.
///
/// Until started, the reference point is [`Snapshot::ZERO`], so queries
/// measure against the zero snapshot ("since process start") rather than
/// failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoftwareTimer {
    start: Snapshot,
    cycles_to_wait: u64,
    started: bool,
}

impl SoftwareTimer {
    /// Creates an unstarted timer that expires after `duration_ms`.
    pub fn new(duration_ms: u64, config: &ClockConfig) -> Self {
        Self {
            start: Snapshot::ZERO,
            cycles_to_wait: config.cycles_per_ms().saturating_mul(duration_ms),
            started: false,
        }
    }

    /// Captures the current counter value and rollover count as the reference point.
    pub fn start<T: TimeSource>(&mut self, source: &T) {
        self.start_at(source.now());
    }

    /// Uses an already-taken snapshot as the reference point.
    pub fn start_at(&mut self, snapshot: Snapshot) {
        self.start = snapshot;
        self.started = true;
    }

    /// Cycles elapsed since the reference point.
    pub fn elapsed_cycles<T: TimeSource>(&self, source: &T) -> u64 {
        self.elapsed_cycles_at(source.now(), source.config())
    }

    /// Cycles elapsed between the reference point and `now`.
    pub fn elapsed_cycles_at(&self, now: Snapshot, config: &ClockConfig) -> u64 {
        now.cycles_since(self.start, config.period_cycles())
    }

    /// Returns true once the full duration has elapsed.
    pub fn expired<T: TimeSource>(&self, source: &T) -> bool {
        self.expired_at(source.now(), source.config())
    }

    /// Returns true if the full duration has elapsed at `now`.
    pub fn expired_at(&self, now: Snapshot, config: &ClockConfig) -> bool {
        self.elapsed_cycles_at(now, config) >= self.cycles_to_wait
    }

    /// Elapsed time in whole microseconds; sub-microsecond remainders are dropped.
    pub fn elapsed_micros<T: TimeSource>(&self, source: &T) -> u64 {
        self.elapsed_cycles(source) / source.config().cycles_per_us()
    }

    /// Progress through the duration, from 0.0 to 1.0.
    ///
    /// Clamped to 1.0 once expired. A zero-length timer is always complete.
    pub fn percent_elapsed<T: TimeSource>(&self, source: &T) -> f64 {
        if self.cycles_to_wait == 0 {
            return 1.0;
        }

        let progress = self.elapsed_cycles(source) as f64 / self.cycles_to_wait as f64;
        if progress > 1.0 { 1.0 } else { progress }
    }

    pub fn cycles_to_wait(&self) -> u64 {
        self.cycles_to_wait
    }

    pub fn start_snapshot(&self) -> Snapshot {
        self.start
    }

    /// Returns true if [`start`](Self::start) has been called.
    pub fn is_started(&self) -> bool {
        self.started
    }
}
