//! Peripheral traits the game drives: display, LEDs and buttons.
//!
//! Implement these for your board's drivers. The game only ever talks to the
//! hardware through them.

/// One of the three discrete LEDs, and the matching guess option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    Red,
    Green,
    Blue,
}

impl Color {
    /// All colors in cursor order.
    pub const ALL: [Color; 3] = [Color::Red, Color::Green, Color::Blue];

    /// Bit of a random value that lights this LED.
    #[inline]
    pub const fn mask(self) -> u8 {
        1 << self.index()
    }

    /// Position in [`Color::ALL`], also the cursor row that selects it.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Red => 0,
            Color::Green => 1,
            Color::Blue => 2,
        }
    }
}

/// The two push-buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Select the highlighted choice.
    S1,
    /// Start a round from the instructions; move the cursor during a round.
    S2,
}

/// Full-screen images the game draws, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Image {
    /// Title screen backdrop.
    Colors,
    /// Shown with a right guess.
    Happy,
    /// Shown with a wrong guess.
    Sad,
}

/// Trait for abstracting the character/graphics display.
pub trait Display {
    /// Blanks the whole screen.
    fn clear(&mut self);

    /// Prints `text` starting at the given character row and column.
    fn print(&mut self, text: &str, row: u8, col: u8);

    /// Draws a named image with its top-left corner at pixel `(x, y)`.
    fn draw_image(&mut self, image: Image, x: u16, y: u16);
}

/// Trait for abstracting the three discrete LEDs.
pub trait Leds {
    /// Lights an LED.
    fn turn_on(&mut self, led: Color);

    /// Switches an LED off.
    fn turn_off(&mut self, led: Color);

    /// Returns whether an LED is lit.
    fn is_lit(&self, led: Color) -> bool;

    /// Inverts an LED.
    fn toggle(&mut self, led: Color) {
        if self.is_lit(led) {
            self.turn_off(led);
        } else {
            self.turn_on(led);
        }
    }
}

/// Trait for abstracting debounced button input.
pub trait Buttons {
    /// Returns true once per press. Reading clears the tap.
    fn is_tapped(&mut self, button: Button) -> bool;
}
