//! GPIO pin assignments for the oven retrofit board.
//!
//! Single source of truth: the firmware entry point builds every pin
//! driver from these numbers.  Each button output drives an opto-isolator
//! wired across the corresponding membrane switch on the oven panel.

use crate::app::ports::Button;

// ---------------------------------------------------------------------------
// Panel button outputs (active HIGH = button held)
// ---------------------------------------------------------------------------

/// "Bake" — selects bake mode and loads the 350 °F default setpoint.
pub const BAKE_BUTTON_GPIO: i32 = 16;
/// "Start" — commits the displayed setpoint and ignites the element.
pub const START_BUTTON_GPIO: i32 = 19;
/// "+" — raises the displayed setpoint by one step.
pub const INCREMENT_BUTTON_GPIO: i32 = 25;
/// "−" — lowers the displayed setpoint by one step.
pub const DECREMENT_BUTTON_GPIO: i32 = 32;
/// "Cancel/Off" — aborts whatever the oven is doing.
pub const CANCEL_BUTTON_GPIO: i32 = 33;

// ---------------------------------------------------------------------------
// Heating element sense input
// ---------------------------------------------------------------------------

/// Digital input from the bake-element sense circuit.
/// LOW = element energised (see `OvenConfig::sense_active_low`).
pub const ELEMENT_SENSE_GPIO: i32 = 5;

/// Button → GPIO mapping, in [`Button::ALL`] order.
pub const BUTTON_GPIOS: [(Button, i32); Button::COUNT] = [
    (Button::Bake, BAKE_BUTTON_GPIO),
    (Button::Start, START_BUTTON_GPIO),
    (Button::Increment, INCREMENT_BUTTON_GPIO),
    (Button::Decrement, DECREMENT_BUTTON_GPIO),
    (Button::Cancel, CANCEL_BUTTON_GPIO),
];
