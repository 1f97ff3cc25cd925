//! The super-loop body: poll buttons, tick the game, drive the peripherals.

use crate::board::{Button, Buttons, Display, Leds};
use crate::config::GameConfig;
use crate::game::{Effects, GameSession, Screen, Taps};
use crate::screens;
use crate::time::TimeSource;

/// Runs a [`GameSession`] against real (or mock) peripherals.
///
/// Owns the display, LEDs and buttons, and borrows the clock. Call
/// [`poll`](Self::poll) once per main-loop iteration; it never blocks.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `T` - Time source implementation type
/// * `D` - Display implementation type
/// * `L` - LED implementation type
/// * `B` - Button implementation type
pub struct App<'t, T: TimeSource, D: Display, L: Leds, B: Buttons> {
    session: GameSession,
    time_source: &'t T,
    display: D,
    leds: L,
    buttons: B,
}

impl<'t, T: TimeSource, D: Display, L: Leds, B: Buttons> App<'t, T, D, L, B> {
    /// Starts a game: switches the LEDs off and draws the title screen.
    pub fn new(config: GameConfig, time_source: &'t T, display: D, leds: L, buttons: B) -> Self {
        let session = GameSession::new(config, time_source);
        let mut app = Self {
            session,
            time_source,
            display,
            leds,
            buttons,
        };

        let effects = app.session.power_on_effects();
        app.apply(&effects);
        app
    }

    /// Runs one iteration of the game loop.
    ///
    /// # Returns
    /// The screen showing after this iteration.
    pub fn poll(&mut self) -> Screen {
        let taps = Taps {
            advance: self.buttons.is_tapped(Button::S2),
            select: self.buttons.is_tapped(Button::S1),
        };

        let effects = self.session.tick(taps, self.time_source);
        self.apply(&effects);
        self.session.screen()
    }

    fn apply(&mut self, effects: &Effects) {
        for effect in effects {
            screens::apply(effect, &mut self.display, &mut self.leds);
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn buttons_mut(&mut self) -> &mut B {
        &mut self.buttons
    }
}
