//! Button panel driver.
//!
//! Each oven button is bridged by an output (opto-isolator or transistor
//! across the membrane contact).  Driving the output high for the dwell
//! time registers one press; the same dwell after release keeps the
//! oven's keypad scanner from merging consecutive presses.
//!
//! Generic over embedded-hal 1.0 pins and delay so the exact same code
//! runs against `PinDriver`/`FreeRtos` on the device and mocks on the host.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};
use log::{debug, warn};

use crate::app::ports::Button;

pub struct ButtonPanel<P, D> {
    /// Outputs indexed by [`Button::index`].
    pins: [P; Button::COUNT],
    delay: D,
    dwell_ms: u32,
}

impl<P, D> ButtonPanel<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(pins: [P; Button::COUNT], delay: D, dwell_ms: u32) -> Self {
        Self {
            pins,
            delay,
            dwell_ms,
        }
    }

    /// High, dwell, low, dwell.  Blocks for `2 × dwell_ms`.
    pub fn press(&mut self, button: Button) {
        debug!("panel: press {:?}", button);
        let pin = &mut self.pins[button.index()];

        if let Err(e) = pin.set_high() {
            warn!("panel: {:?} set_high failed: {:?}", button, e.kind());
        }
        self.delay.delay_ms(self.dwell_ms);

        if let Err(e) = pin.set_low() {
            warn!("panel: {:?} set_low failed: {:?}", button, e.kind());
        }
        self.delay.delay_ms(self.dwell_ms);
    }

    /// Drive every output low.
    pub fn release_all(&mut self) {
        for (button, pin) in Button::ALL.iter().zip(self.pins.iter_mut()) {
            if let Err(e) = pin.set_low() {
                warn!("panel: {:?} release failed: {:?}", button, e.kind());
            }
        }
    }
}
