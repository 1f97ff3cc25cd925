//! Guess the RGB Color state machine.
//!
//! Provides [`GameSession`], a polled four-screen state machine. Each poll is
//! an [`Event`] (a clock snapshot plus the button taps seen since the last
//! poll); [`GameSession::handle`] updates the session and returns the
//! [`Effects`] the display and LEDs must show. The session never touches
//! hardware itself, which is what [`App`](crate::App) is for.

use crate::board::Color;
use crate::config::{ClockConfig, GameConfig, NUM_RANDOM_NUMBERS, NUM_TEST_OPTIONS};
use crate::time::{Snapshot, TimeSource};
use crate::timer::SoftwareTimer;
use palette::Srgb;

/// Upper bound on effects produced by one transition.
pub const MAX_EFFECTS: usize = 8;

/// Effects produced by one poll, in the order they must be applied.
pub type Effects = heapless::Vec<Effect, MAX_EFFECTS>;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Splash shown once after power-on.
    Title,
    /// Rules; waits for S2 to start a round.
    Instructions,
    /// Guessing: move the arrow, select colors, end guessing.
    Game,
    /// Right/wrong verdict, held for the result wait.
    Result,
}

/// Arrow position on the game screen.
///
/// Rows 0-2 are the red, green and blue choices; row 3 ends guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor(u8);

impl Cursor {
    pub const FIRST: Self = Cursor(0);

    /// The row that ends guessing.
    pub const DONE: Self = Cursor(NUM_TEST_OPTIONS as u8 - 1);

    /// Next row, wrapping back to the first after "done".
    #[inline]
    pub const fn next(self) -> Self {
        Cursor((self.0 + 1) % NUM_TEST_OPTIONS as u8)
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// The color this row selects, or `None` on the "done" row.
    pub const fn color(self) -> Option<Color> {
        match self.0 {
            0 => Some(Color::Red),
            1 => Some(Color::Green),
            2 => Some(Color::Blue),
            _ => None,
        }
    }
}

/// The player's guess so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Selections {
    pub red: bool,
    pub green: bool,
    pub blue: bool,
}

impl Selections {
    pub const NONE: Self = Self {
        red: false,
        green: false,
        blue: false,
    };

    pub fn select(&mut self, color: Color) {
        match color {
            Color::Red => self.red = true,
            Color::Green => self.green = true,
            Color::Blue => self.blue = true,
        }
    }

    pub fn is_selected(&self, color: Color) -> bool {
        match color {
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Blue => self.blue,
        }
    }
}

/// Which of the three LEDs are lit, as bits 0 (red), 1 (green) and 2 (blue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LedPattern(u8);

impl LedPattern {
    pub const OFF: Self = LedPattern(0);

    /// Pattern from the low three bits of a random value.
    #[inline]
    pub const fn from_random(value: u8) -> Self {
        LedPattern(value & 0b111)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_lit(self, color: Color) -> bool {
        self.0 & color.mask() != 0
    }

    /// The color the three LEDs mix to.
    pub fn color(self) -> Srgb {
        let channel = |color: Color| if self.is_lit(color) { 1.0 } else { 0.0 };
        Srgb::new(
            channel(Color::Red),
            channel(Color::Green),
            channel(Color::Blue),
        )
    }
}

/// Verdict on a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    Right,
    Wrong,
}

impl Outcome {
    /// Right only if every color's selection matches its LED exactly.
    pub fn judge(selections: Selections, lit: LedPattern) -> Self {
        let all_match = Color::ALL
            .iter()
            .all(|&color| selections.is_selected(color) == lit.is_lit(color));

        if all_match { Outcome::Right } else { Outcome::Wrong }
    }
}

/// Edge-triggered button taps seen during one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Taps {
    /// S1: select the highlighted choice.
    pub select: bool,
    /// S2: start a round / move the arrow.
    pub advance: bool,
}

impl Taps {
    pub const NONE: Self = Self {
        select: false,
        advance: false,
    };
}

/// Input to one transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    /// Clock reading for this poll.
    pub now: Snapshot,
    pub taps: Taps,
}

/// Output of a transition, applied to the display and LEDs in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    ShowTitle,
    ShowInstructions,
    /// Full redraw of the game screen.
    ShowGame {
        cursor: Cursor,
        selections: Selections,
    },
    /// Redraw of the arrow and selection markers only.
    UpdateGame {
        cursor: Cursor,
        selections: Selections,
    },
    ShowResult(Outcome),
    LedOn(Color),
    LedOff(Color),
}

/// State owned by the game for the lifetime of the process.
///
/// The session judges each round from the LED pattern it lit itself, so the
/// LEDs must only be driven through the effects it returns.
#[derive(Debug, Clone)]
pub struct GameSession {
    screen: Screen,
    timer: SoftwareTimer,
    cursor: Cursor,
    selections: Selections,
    lit: LedPattern,
    random_index: usize,
    config: GameConfig,
    clock: ClockConfig,
}

impl GameSession {
    /// Creates a session on the title screen with the title timer running.
    pub fn new<T: TimeSource>(config: GameConfig, source: &T) -> Self {
        let clock = *source.config();
        let mut timer = SoftwareTimer::new(config.title_wait_ms, &clock);
        timer.start(source);

        Self {
            screen: Screen::Title,
            timer,
            cursor: Cursor::FIRST,
            selections: Selections::NONE,
            lit: LedPattern::OFF,
            random_index: 0,
            config,
            clock,
        }
    }

    /// Effects that put the hardware in the power-on state: LEDs off, title drawn.
    pub fn power_on_effects(&self) -> Effects {
        let mut effects = Effects::new();
        for color in Color::ALL {
            emit(&mut effects, Effect::LedOff(color));
        }
        emit(&mut effects, Effect::ShowTitle);
        effects
    }

    /// Samples the clock and runs one transition.
    pub fn tick<T: TimeSource>(&mut self, taps: Taps, source: &T) -> Effects {
        self.handle(Event {
            now: source.now(),
            taps,
        })
    }

    /// Runs one transition. Taps that mean nothing on the current screen are ignored.
    pub fn handle(&mut self, event: Event) -> Effects {
        let mut effects = Effects::new();
        #[cfg(feature = "defmt")]
        let previous = self.screen;

        match self.screen {
            Screen::Title => {
                if self.timer.expired_at(event.now, &self.clock) {
                    self.screen = Screen::Instructions;
                    emit(&mut effects, Effect::ShowInstructions);
                }
            }
            Screen::Instructions => {
                if event.taps.advance {
                    self.begin_round(&mut effects);
                }
            }
            Screen::Game => {
                if event.taps.advance {
                    self.cursor = self.cursor.next();
                    emit(&mut effects, self.update_game());
                }
                if event.taps.select {
                    match self.cursor.color() {
                        Some(color) => {
                            self.selections.select(color);
                            emit(&mut effects, self.update_game());
                        }
                        None => self.finish_round(event.now, &mut effects),
                    }
                }
            }
            Screen::Result => {
                if self.timer.expired_at(event.now, &self.clock) {
                    self.screen = Screen::Instructions;
                    self.reset_round(&mut effects);
                    emit(&mut effects, Effect::ShowInstructions);
                }
            }
        }

        #[cfg(feature = "defmt")]
        if self.screen != previous {
            defmt::debug!("game: {} -> {}", previous, self.screen);
        }

        effects
    }

    fn begin_round(&mut self, effects: &mut Effects) {
        self.screen = Screen::Game;

        self.lit = LedPattern::from_random(self.config.random_numbers[self.random_index]);
        for color in Color::ALL {
            if self.lit.is_lit(color) {
                emit(effects, Effect::LedOn(color));
            }
        }
        self.random_index = (self.random_index + 1) % NUM_RANDOM_NUMBERS;

        #[cfg(feature = "defmt")]
        {
            let mix = self.lit.color();
            defmt::info!(
                "game: round start, mix ({=f32}, {=f32}, {=f32})",
                mix.red,
                mix.green,
                mix.blue
            );
        }

        emit(
            effects,
            Effect::ShowGame {
                cursor: self.cursor,
                selections: self.selections,
            },
        );
    }

    fn finish_round(&mut self, now: Snapshot, effects: &mut Effects) {
        self.screen = Screen::Result;

        self.timer = SoftwareTimer::new(self.config.result_wait_ms, &self.clock);
        self.timer.start_at(now);

        let outcome = Outcome::judge(self.selections, self.lit);
        #[cfg(feature = "defmt")]
        defmt::info!("game: round over, {}", outcome);
        emit(effects, Effect::ShowResult(outcome));
    }

    fn reset_round(&mut self, effects: &mut Effects) {
        self.cursor = Cursor::FIRST;
        self.selections = Selections::NONE;
        self.lit = LedPattern::OFF;
        for color in Color::ALL {
            emit(effects, Effect::LedOff(color));
        }
    }

    fn update_game(&self) -> Effect {
        Effect::UpdateGame {
            cursor: self.cursor,
            selections: self.selections,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selections(&self) -> Selections {
        self.selections
    }

    /// The LED state the player is guessing.
    pub fn lit_leds(&self) -> LedPattern {
        self.lit
    }

    /// Index of the random number the next round will use.
    pub fn random_index(&self) -> usize {
        self.random_index
    }

    pub fn timer(&self) -> &SoftwareTimer {
        &self.timer
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
}

fn emit(effects: &mut Effects, effect: Effect) {
    // MAX_EFFECTS covers the largest transition: three LEDs plus one screen.
    let pushed = effects.push(effect);
    debug_assert!(pushed.is_ok());
}
