//! Heating-element sense line.
//!
//! A single digital input follows the oven's element relay.  On the
//! reference board the optocoupler pulls the input LOW while the element
//! is energised, hence the configurable polarity.

use embedded_hal::digital::{Error as _, InputPin};
use log::warn;

pub struct SenseLine<I> {
    pin: I,
    active_low: bool,
    /// Returned when a read fails.
    last: bool,
}

impl<I: InputPin> SenseLine<I> {
    pub fn new(pin: I, active_low: bool) -> Self {
        Self {
            pin,
            active_low,
            last: false,
        }
    }

    /// `true` while the element is energised.  A failed read repeats the
    /// last good sample.
    pub fn read(&mut self) -> bool {
        match self.pin.is_high() {
            Ok(high) => {
                self.last = high != self.active_low;
                self.last
            }
            Err(e) => {
                warn!("sense: read failed ({:?}), holding {}", e.kind(), self.last);
                self.last
            }
        }
    }
}
