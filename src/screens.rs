//! Screen layouts: turns game [`Effect`]s into display and LED calls.

use crate::board::{Color, Display, Image, Leds};
use crate::game::{Cursor, Effect, Outcome, Selections};

/// First row of the choice list on the game screen.
const FIRST_CHOICE_ROW: u8 = 2;

/// Column of the `*` marker next to a selected color.
const MARKER_COL: u8 = 8;

/// Pixel position of the happy/sad face on the result screen.
const RESULT_IMAGE_POS: (u16, u16) = (60, 60);

const RULE: &str = "---------------------";

/// Applies one effect to the hardware.
pub fn apply<D: Display, L: Leds>(effect: &Effect, display: &mut D, leds: &mut L) {
    match *effect {
        Effect::ShowTitle => show_title(display),
        Effect::ShowInstructions => show_instructions(display),
        Effect::ShowGame { cursor, selections } => show_game(display, cursor, selections),
        Effect::UpdateGame { cursor, selections } => update_game(display, cursor, selections),
        Effect::ShowResult(outcome) => show_result(display, outcome),
        Effect::LedOn(color) => leds.turn_on(color),
        Effect::LedOff(color) => leds.turn_off(color),
    }
}

fn show_title<D: Display>(display: &mut D) {
    display.clear();
    display.draw_image(Image::Colors, 0, 0);

    display.print("Guess the RGB color  ", 0, 0);
    display.print(RULE, 1, 0);
}

fn show_instructions<D: Display>(display: &mut D) {
    display.clear();

    display.print("Instructions         ", 0, 0);
    display.print(RULE, 1, 0);
    display.print("Guess the RGB mix.   ", 2, 0);
    display.print("Controls during guessing:", 3, 0);

    display.print("B1: Select choice    ", 5, 0);
    display.print("B2: Move arrow       ", 6, 0);

    display.print("Press B2 to start.   ", 8, 0);
}

fn show_game<D: Display>(display: &mut D, cursor: Cursor, selections: Selections) {
    display.clear();

    display.print("Game                 ", 0, 0);
    display.print(RULE, 1, 0);
    display.print("  Red                ", 2, 0);
    display.print("  Green              ", 3, 0);
    display.print("  Blue               ", 4, 0);
    display.print("  End Guessing       ", 5, 0);

    display.print("B1: Select choice    ", 7, 0);
    display.print("B2: Move arrow       ", 8, 0);

    draw_markers(display, cursor, selections);
}

/// Redraws only the arrow column and the selection markers.
fn update_game<D: Display>(display: &mut D, cursor: Cursor, selections: Selections) {
    for row in 0..Cursor::DONE.index() + 1 {
        display.print("  ", FIRST_CHOICE_ROW + row, 0);
    }

    draw_markers(display, cursor, selections);
}

fn draw_markers<D: Display>(display: &mut D, cursor: Cursor, selections: Selections) {
    display.print(">", FIRST_CHOICE_ROW + cursor.index(), 0);

    for color in Color::ALL {
        if selections.is_selected(color) {
            display.print("*", FIRST_CHOICE_ROW + color.index() as u8, MARKER_COL);
        }
    }
}

fn show_result<D: Display>(display: &mut D, outcome: Outcome) {
    display.clear();
    display.print("Result               ", 0, 0);
    display.print(RULE, 1, 0);

    let (x, y) = RESULT_IMAGE_POS;
    match outcome {
        Outcome::Right => {
            display.print("Right!", 2, 0);
            display.draw_image(Image::Happy, x, y);
        }
        Outcome::Wrong => {
            display.print("Wrong!", 2, 0);
            display.draw_image(Image::Sad, x, y);
        }
    }
}
