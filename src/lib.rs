#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ElapsedTimeClock`**: One down-counting hardware timer plus the rollover count its wrap interrupt keeps
//! - **`HardwareCounter`**: Trait to implement for your counter peripheral
//! - **`SystemTiming`**: Trait to implement for the one-time clock bring-up
//! - **`SoftwareTimer`**: A started-at snapshot and a duration; expiry and progress queries
//! - **`GameSession`**: The four-screen polled state machine, hardware-free
//! - **`Effect`**: What a transition asks the display and LEDs to do
//! - **`Display`**, **`Leds`**, **`Buttons`**: Traits to implement for your peripherals
//! - **`App`**: Glues a session to peripherals; call `poll()` from the main loop
//!
//! All timing is in counter cycles. Durations are given in milliseconds and
//! converted with the [`ClockConfig`] the clock runs at.

pub mod app;
pub mod board;
pub mod clock;
pub mod config;
pub mod game;
pub mod screens;
pub mod time;
pub mod timer;

pub use app::App;
pub use board::{Button, Buttons, Color, Display, Image, Leds};
pub use clock::{ElapsedTimeClock, HardwareCounter, SystemTiming};
pub use config::{
    ClockConfig, ConfigError, GameConfig, NUM_RANDOM_NUMBERS, NUM_TEST_OPTIONS,
    RESULT_SCREEN_WAIT_MS, TITLE_SCREEN_WAIT_MS,
};
pub use game::{
    Cursor, Effect, Effects, Event, GameSession, LedPattern, Outcome, Screen, Selections, Taps,
};
pub use time::{Snapshot, TimeSource};
pub use timer::SoftwareTimer;

// Re-export Srgb from palette for LedPattern::color users
pub use palette::Srgb;
