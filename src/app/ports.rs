//! Port traits — the hexagonal boundary between domain logic and the oven.
//!
//! ```text
//!   HardwareAdapter ──▶ Port trait ──▶ OvenEngine (domain)
//! ```
//!
//! The oven offers no programmatic readout, so the domain sees exactly two
//! physical capabilities: pressing a panel button and sampling the heating
//! element sense line.  Time comes through [`ClockPort`] so the engine can
//! be stepped deterministically on the host.

// ───────────────────────────────────────────────────────────────
// Panel buttons
// ───────────────────────────────────────────────────────────────

/// Physical buttons on the oven panel that the controller can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Button {
    Bake = 0,
    Start = 1,
    Increment = 2,
    Decrement = 3,
    Cancel = 4,
}

impl Button {
    /// Number of wired buttons — sizes per-button arrays.
    pub const COUNT: usize = 5;

    /// Every button, indexed by discriminant.
    pub const ALL: [Button; Button::COUNT] = [
        Button::Bake,
        Button::Start,
        Button::Increment,
        Button::Decrement,
        Button::Cancel,
    ];

    /// Index into per-button arrays.
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ───────────────────────────────────────────────────────────────
// Button port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Write-side port: emulated button presses.
pub trait ButtonPort {
    /// Press and release `button`, blocking for the full actuation dwell.
    ///
    /// Fire-and-forget: the oven gives no acknowledgement, so there is
    /// nothing to return.
    fn press(&mut self, button: Button);

    /// Drive every button output to its released level.
    fn release_all(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Sense port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the heating element sense line.
pub trait SensePort {
    /// `true` while the heating element is energised.
    fn heating_element_on(&mut self) -> bool;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source for the elapsed-time thresholds.
pub trait ClockPort {
    /// Milliseconds since an arbitrary fixed origin (monotonic).
    fn now_ms(&self) -> u64;
}
