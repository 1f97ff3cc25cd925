//! Shared test infrastructure for guess-the-color integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use guess_the_color::{
    Button, Buttons, ClockConfig, Color, Display, ElapsedTimeClock, HardwareCounter, Image,
    Leds, SystemTiming, TimeSource,
};

// ============================================================================
// Mock Hardware Counter
// ============================================================================

/// Down-counter whose value the test sets directly
pub struct MockCounter {
    value: Cell<u32>,
    flag_clears: Cell<u32>,
}

impl MockCounter {
    pub fn new(value: u32) -> Self {
        Self {
            value: Cell::new(value),
            flag_clears: Cell::new(0),
        }
    }

    pub fn set(&self, value: u32) {
        self.value.set(value);
    }

    pub fn flag_clears(&self) -> u32 {
        self.flag_clears.get()
    }
}

impl HardwareCounter for MockCounter {
    fn value(&self) -> u32 {
        self.value.get()
    }

    fn clear_rollover_flag(&self) {
        self.flag_clears.set(self.flag_clears.get() + 1);
    }
}

pub type MockClock = ElapsedTimeClock<MockCounter>;

/// 1 MHz counter, 1000-cycle period: 1 cycle per microsecond, one rollover per millisecond
pub fn test_config() -> ClockConfig {
    ClockConfig::new(1_000_000, 1, 999, 0).unwrap()
}

/// Clock with its counter freshly loaded, as right after bring-up
pub fn test_clock() -> MockClock {
    clock_with(test_config())
}

pub fn clock_with(config: ClockConfig) -> MockClock {
    ElapsedTimeClock::new(MockCounter::new(config.load_value()), config)
}

/// Counts the hardware down by `cycles`, firing the rollover interrupt on every wrap
pub fn advance_cycles(clock: &MockClock, cycles: u64) {
    let reload = clock.config().load_value() as u64;
    let mut value = clock.counter_value() as u64;
    let mut remaining = cycles;

    while remaining > value {
        remaining -= value + 1;
        clock.on_rollover();
        value = reload;
    }

    clock.counter().set((value - remaining) as u32);
}

pub fn advance_ms(clock: &MockClock, millis: u64) {
    advance_cycles(clock, millis * clock.config().cycles_per_ms());
}

// ============================================================================
// Counter That Wraps Mid-Read
// ============================================================================

/// Down-counter that reaches zero during its next read.
///
/// The read reloads the counter and raises the rollover interrupt before it
/// returns, so the value it reports already belongs to the next period.
pub struct WrapDuringRead<'a> {
    clock: Cell<Option<&'a WrapClock<'a>>>,
    value: Cell<u32>,
    reload: u32,
    armed: Cell<bool>,
    reads: Cell<u32>,
}

pub type WrapClock<'a> = ElapsedTimeClock<WrapDuringRead<'a>>;

impl<'a> WrapDuringRead<'a> {
    pub fn new(value: u32, reload: u32) -> Self {
        Self {
            clock: Cell::new(None),
            value: Cell::new(value),
            reload,
            armed: Cell::new(false),
            reads: Cell::new(0),
        }
    }

    /// Connects the counter to the clock whose interrupt it raises.
    pub fn attach(&self, clock: &'a WrapClock<'a>) {
        self.clock.set(Some(clock));
    }

    /// Makes the next read wrap.
    pub fn arm(&self) {
        self.armed.set(true);
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }
}

impl HardwareCounter for WrapDuringRead<'_> {
    fn value(&self) -> u32 {
        self.reads.set(self.reads.get() + 1);
        if self.armed.replace(false) {
            self.value.set(self.reload);
            if let Some(clock) = self.clock.get() {
                clock.on_rollover();
            }
        }
        self.value.get()
    }

    fn clear_rollover_flag(&self) {}
}

// ============================================================================
// Mock Bring-Up
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BringUpStep {
    DisableInterrupts,
    FlashWaitStates(u8),
    CoreClock(u32),
    StartCounter { prescaler: u32, load_value: u32 },
    EnableInterrupts,
}

/// Records every bring-up call in order
pub struct RecordingBringUp {
    pub steps: heapless::Vec<BringUpStep, 16>,
}

impl RecordingBringUp {
    pub fn new() -> Self {
        Self {
            steps: heapless::Vec::new(),
        }
    }
}

impl SystemTiming for RecordingBringUp {
    fn disable_interrupts(&mut self) {
        let _ = self.steps.push(BringUpStep::DisableInterrupts);
    }

    fn set_flash_wait_states(&mut self, wait_states: u8) {
        let _ = self.steps.push(BringUpStep::FlashWaitStates(wait_states));
    }

    fn set_core_clock(&mut self, hz: u32) {
        let _ = self.steps.push(BringUpStep::CoreClock(hz));
    }

    fn start_counter(&mut self, prescaler: u32, load_value: u32) {
        let _ = self.steps.push(BringUpStep::StartCounter {
            prescaler,
            load_value,
        });
    }

    fn enable_interrupts(&mut self) {
        let _ = self.steps.push(BringUpStep::EnableInterrupts);
    }
}

// ============================================================================
// Mock Display
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Clear,
    Print {
        text: heapless::String<32>,
        row: u8,
        col: u8,
    },
    Image {
        image: Image,
        x: u16,
        y: u16,
    },
}

/// Display that records every call since the last clear
pub struct MockDisplay {
    calls: heapless::Vec<DrawCall, 64>,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            calls: heapless::Vec::new(),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn printed(&self, text: &str, row: u8, col: u8) -> bool {
        self.calls.iter().any(|call| match call {
            DrawCall::Print { text: t, row: r, col: c } => t.as_str() == text && *r == row && *c == col,
            _ => false,
        })
    }

    pub fn drew(&self, image: Image) -> bool {
        self.calls
            .iter()
            .any(|call| matches!(call, DrawCall::Image { image: i, .. } if *i == image))
    }

    pub fn cleared(&self) -> bool {
        self.calls.iter().any(|call| *call == DrawCall::Clear)
    }
}

impl Display for MockDisplay {
    fn clear(&mut self) {
        // A clear wipes the screen, so earlier calls no longer matter
        self.calls.clear();
        let _ = self.calls.push(DrawCall::Clear);
    }

    fn print(&mut self, text: &str, row: u8, col: u8) {
        let mut owned = heapless::String::new();
        let _ = owned.push_str(text);
        let _ = self.calls.push(DrawCall::Print {
            text: owned,
            row,
            col,
        });
    }

    fn draw_image(&mut self, image: Image, x: u16, y: u16) {
        let _ = self.calls.push(DrawCall::Image { image, x, y });
    }
}

// ============================================================================
// Mock LEDs
// ============================================================================

pub struct MockLeds {
    lit: [bool; 3],
    pub writes: u32,
}

impl MockLeds {
    pub fn new() -> Self {
        Self {
            lit: [false; 3],
            writes: 0,
        }
    }

    pub fn lit(&self) -> [bool; 3] {
        self.lit
    }
}

impl Leds for MockLeds {
    fn turn_on(&mut self, led: Color) {
        self.lit[led.index()] = true;
        self.writes += 1;
    }

    fn turn_off(&mut self, led: Color) {
        self.lit[led.index()] = false;
        self.writes += 1;
    }

    fn is_lit(&self, led: Color) -> bool {
        self.lit[led.index()]
    }
}

// ============================================================================
// Mock Buttons
// ============================================================================

/// Buttons with pending taps queued by the test; reading clears the tap
pub struct MockButtons {
    s1: bool,
    s2: bool,
}

impl MockButtons {
    pub fn new() -> Self {
        Self { s1: false, s2: false }
    }

    pub fn tap(&mut self, button: Button) {
        match button {
            Button::S1 => self.s1 = true,
            Button::S2 => self.s2 = true,
        }
    }
}

impl Buttons for MockButtons {
    fn is_tapped(&mut self, button: Button) -> bool {
        let slot = match button {
            Button::S1 => &mut self.s1,
            Button::S2 => &mut self.s2,
        };
        core::mem::replace(slot, false)
    }
}
