#![no_std]
#![no_main]

use cortex_m_rt::entry;
use guess_the_color::{
    App, Button, Buttons, ClockConfig, Color, Display, ElapsedTimeClock, GameConfig,
    HardwareCounter, Image, Leds, SystemTiming,
};
use panic_halt as _;

// ============================================================================
// Minimal Hardware Counter
// ============================================================================

/// Counter that reads through `black_box` so the optimizer keeps the reads
pub struct MinimalCounter;

impl HardwareCounter for MinimalCounter {
    fn value(&self) -> u32 {
        core::hint::black_box(0)
    }

    fn clear_rollover_flag(&self) {
        core::hint::black_box(());
    }
}

static CLOCK: ElapsedTimeClock<MinimalCounter> =
    ElapsedTimeClock::new(MinimalCounter, ClockConfig::DEFAULT);

pub struct MinimalBringUp;

impl SystemTiming for MinimalBringUp {
    fn disable_interrupts(&mut self) {
        cortex_m::interrupt::disable();
    }

    fn set_flash_wait_states(&mut self, wait_states: u8) {
        core::hint::black_box(wait_states);
    }

    fn set_core_clock(&mut self, hz: u32) {
        core::hint::black_box(hz);
    }

    fn start_counter(&mut self, prescaler: u32, load_value: u32) {
        core::hint::black_box((prescaler, load_value));
    }

    fn enable_interrupts(&mut self) {
        // SAFETY: bring-up is complete, nothing relies on interrupts staying masked
        unsafe { cortex_m::interrupt::enable() };
    }
}

// ============================================================================
// Minimal Peripherals
// ============================================================================

/// Zero-size display implementation for measuring library overhead
pub struct MinimalDisplay;

impl Display for MinimalDisplay {
    fn clear(&mut self) {
        core::hint::black_box(());
    }

    fn print(&mut self, text: &str, row: u8, col: u8) {
        core::hint::black_box((text, row, col));
    }

    fn draw_image(&mut self, image: Image, x: u16, y: u16) {
        core::hint::black_box((image, x, y));
    }
}

pub struct MinimalLeds {
    lit: heapless::Vec<Color, 3>,
}

impl Leds for MinimalLeds {
    fn turn_on(&mut self, led: Color) {
        if !self.lit.contains(&led) {
            let _ = self.lit.push(led);
        }
    }

    fn turn_off(&mut self, led: Color) {
        self.lit.retain(|lit| *lit != led);
    }

    fn is_lit(&self, led: Color) -> bool {
        self.lit.contains(&led)
    }
}

pub struct MinimalButtons;

impl Buttons for MinimalButtons {
    fn is_tapped(&mut self, button: Button) -> bool {
        core::hint::black_box(matches!(button, Button::S2))
    }
}

#[entry]
fn main() -> ! {
    CLOCK.initialize(&mut MinimalBringUp);

    let leds = MinimalLeds {
        lit: heapless::Vec::new(),
    };
    let mut app = App::new(
        GameConfig::DEFAULT,
        &CLOCK,
        MinimalDisplay,
        leds,
        MinimalButtons,
    );

    // Size analysis binary: the loop body pulls in the whole game
    loop {
        let screen = app.poll();
        core::hint::black_box(screen);
        CLOCK.on_rollover();
    }
}
