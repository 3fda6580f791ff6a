//! Hardware adapter — bridges the panel and sense drivers to the domain
//! port traits.
//!
//! Owns the [`ButtonPanel`] and [`SenseLine`] and exposes them through
//! [`ButtonPort`] and [`SensePort`].  This is the only place the engine's
//! actions turn into pin activity.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{Button, ButtonPort, SensePort};
use crate::drivers::panel::ButtonPanel;
use crate::drivers::sense::SenseLine;

/// Concrete adapter that combines all oven I/O behind the port traits.
pub struct HardwareAdapter<P, D, I> {
    panel: ButtonPanel<P, D>,
    sense: SenseLine<I>,
}

impl<P, D, I> HardwareAdapter<P, D, I>
where
    P: OutputPin,
    D: DelayNs,
    I: InputPin,
{
    pub fn new(panel: ButtonPanel<P, D>, sense: SenseLine<I>) -> Self {
        Self { panel, sense }
    }
}

// ── ButtonPort implementation ─────────────────────────────────

impl<P, D, I> ButtonPort for HardwareAdapter<P, D, I>
where
    P: OutputPin,
    D: DelayNs,
    I: InputPin,
{
    fn press(&mut self, button: Button) {
        self.panel.press(button);
    }

    fn release_all(&mut self) {
        self.panel.release_all();
    }
}

// ── SensePort implementation ──────────────────────────────────

impl<P, D, I> SensePort for HardwareAdapter<P, D, I>
where
    P: OutputPin,
    D: DelayNs,
    I: InputPin,
{
    fn heating_element_on(&mut self) -> bool {
        self.sense.read()
    }
}
