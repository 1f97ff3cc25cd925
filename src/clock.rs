//! Elapsed-time service backed by one free-running hardware counter.
//!
//! Provides [`ElapsedTimeClock`], which pairs a down-counting hardware timer
//! with a rollover count kept by the timer's wrap interrupt. Every
//! [`SoftwareTimer`](crate::SoftwareTimer) measures time against snapshots of
//! this clock. Also defines the [`HardwareCounter`] and [`SystemTiming`] traits
//! for hardware abstraction.

use crate::config::ClockConfig;
use crate::time::{Snapshot, TimeSource};
use core::sync::atomic::{AtomicBool, Ordering};
use portable_atomic::AtomicU64;

/// Trait for abstracting the free-running hardware counter.
///
/// The counter counts down from the configured load value to zero and then
/// reloads, raising the rollover interrupt once per wrap.
pub trait HardwareCounter {
    /// Returns the current raw counter value.
    fn value(&self) -> u32;

    /// Clears the pending rollover interrupt flag.
    fn clear_rollover_flag(&self);
}

/// Trait for the one-time clock and counter bring-up sequence.
///
/// [`ElapsedTimeClock::initialize`] calls these in the only safe order.
/// Implementations should perform exactly the named register writes and
/// nothing else.
pub trait SystemTiming {
    /// Masks all interrupts.
    fn disable_interrupts(&mut self);

    /// Sets flash wait states for every flash bank.
    fn set_flash_wait_states(&mut self, wait_states: u8);

    /// Switches the core clock (and the clock tree fed from it) to `hz`.
    fn set_core_clock(&mut self, hz: u32);

    /// Configures the counter as periodic with the given prescaler and load
    /// value, and starts it with its wrap interrupt enabled.
    fn start_counter(&mut self, prescaler: u32, load_value: u32);

    /// Unmasks interrupts, including the counter's wrap interrupt.
    fn enable_interrupts(&mut self);
}

/// Monotonic, wrap-safe cycle clock.
///
/// The rollover count is written only by [`on_rollover`](Self::on_rollover),
/// which must be invoked from the counter's wrap interrupt and nowhere else.
/// Readers may be preempted by that interrupt at any point; reads use
/// read-compare-retry so a snapshot never mixes a counter value with the
/// wrong rollover count.
///
/// The rollover count is a `portable_atomic::AtomicU64`. On cores without
/// native 64-bit atomics, enable the `critical-section` feature so the
/// interrupt and the main loop never contend for a spinlock.
///
/// # Type Parameters
/// * `C` - Hardware counter implementation type
pub struct ElapsedTimeClock<C: HardwareCounter> {
    counter: C,
    config: ClockConfig,
    rollovers: AtomicU64,
    initialized: AtomicBool,
}

impl<C: HardwareCounter> ElapsedTimeClock<C> {
    /// Creates a clock with zero rollovers. Usable in a `static`.
    pub const fn new(counter: C, config: ClockConfig) -> Self {
        Self {
            counter,
            config,
            rollovers: AtomicU64::new(0),
            initialized: AtomicBool::new(false),
        }
    }

    /// Brings up the system clock and starts the counter.
    ///
    /// Must run once at process start before any timer is started. Interrupts
    /// stay masked until the counter is fully configured. Flash wait states
    /// are raised before the core clock changes; the reverse order leaves the
    /// part fetching garbage instructions and cannot be recovered from software.
    ///
    /// # Returns
    /// * `true` - Bring-up performed
    /// * `false` - Clock was already initialized, nothing touched
    pub fn initialize<S: SystemTiming>(&self, bring_up: &mut S) -> bool {
        if self.initialized.load(Ordering::Acquire) {
            #[cfg(feature = "defmt")]
            defmt::warn!("clock: initialize called twice, ignoring");
            return false;
        }

        bring_up.disable_interrupts();
        bring_up.set_flash_wait_states(self.config.flash_wait_states());
        bring_up.set_core_clock(self.config.system_clock_hz());
        bring_up.start_counter(self.config.prescaler(), self.config.load_value());
        self.initialized.store(true, Ordering::Release);
        bring_up.enable_interrupts();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "clock: running at {=u32} Hz, load {=u32}",
            self.config.counter_hz(),
            self.config.load_value()
        );

        true
    }

    /// Counter wrap interrupt callback.
    ///
    /// Increments the rollover count by exactly one and clears the interrupt
    /// flag. Never call this from application code: every extra call shifts
    /// every running timer by a full counter period.
    #[inline]
    pub fn on_rollover(&self) {
        self.rollovers.fetch_add(1, Ordering::AcqRel);
        self.counter.clear_rollover_flag();
    }

    /// Returns the raw hardware counter value.
    #[inline]
    pub fn counter_value(&self) -> u32 {
        self.counter.value()
    }

    /// Returns the number of counter wraps since start.
    pub fn rollover_count(&self) -> u64 {
        self.rollovers.load(Ordering::Acquire)
    }

    /// Returns true once [`initialize`](Self::initialize) has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Returns a reference to the hardware counter.
    pub fn counter(&self) -> &C {
        &self.counter
    }
}

impl<C: HardwareCounter> TimeSource for ElapsedTimeClock<C> {
    fn now(&self) -> Snapshot {
        loop {
            let rollovers = self.rollover_count();
            let counter = self.counter.value();
            if self.rollover_count() == rollovers {
                return Snapshot::new(counter, rollovers);
            }
        }
    }

    fn config(&self) -> &ClockConfig {
        &self.config
    }
}
