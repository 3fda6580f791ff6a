//! Shared mutable context threaded through every FSM handler.
//!
//! `OvenContext` is the blackboard that state handlers read from and write
//! to: the current sense sample and time, the element-off debounce timer,
//! the setpoint the oven was last commanded to, and configuration.  Only
//! the polling loop ever touches it.

use crate::config::OvenConfig;

// ---------------------------------------------------------------------------
// Element-off debounce timer
// ---------------------------------------------------------------------------

/// Measures how long the heating element has been continuously off.
///
/// Arms on the first off sample that follows an on sample and disarms on
/// any on sample.  Elapsed time is measured from the arming instant, so a
/// run of off samples accumulates toward one threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OffTimer {
    armed_at_ms: Option<u64>,
    seen_on: bool,
}

impl OffTimer {
    /// Feed one sample.  Returns how long the element has been off, or
    /// `None` while the timer is disarmed.
    pub fn observe(&mut self, element_on: bool, now_ms: u64) -> Option<u64> {
        if element_on {
            self.seen_on = true;
            self.armed_at_ms = None;
            return None;
        }
        if !self.seen_on {
            return None;
        }
        let armed_at = *self.armed_at_ms.get_or_insert(now_ms);
        Some(now_ms.saturating_sub(armed_at))
    }

    /// Disarm and forget any earlier on sample; `element_on` seeds the
    /// "seen on" flag for the sample that caused the restart.
    pub fn restart(&mut self, element_on: bool) {
        self.armed_at_ms = None;
        self.seen_on = element_on;
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at_ms.is_some()
    }
}

// ---------------------------------------------------------------------------
// OvenContext
// ---------------------------------------------------------------------------

/// The shared context passed to every state handler function.
pub struct OvenContext {
    // -- Timing --
    /// Monotonic time of the current sample.
    pub now_ms: u64,

    // -- Inputs for this cycle --
    /// Latest sense-line sample.
    pub element_on: bool,
    /// A caller has asked for turn-on and the engine has not consumed it
    /// yet.  Distinguishes our own ignition from a manual start.
    pub turn_on_pending: bool,

    // -- Model --
    /// Setpoint (°F) the oven was last commanded to.
    pub current_setpoint_f: f32,
    /// Element-off debounce.
    pub off_timer: OffTimer,
    /// Set by the Off handler when someone started the oven at the panel.
    manual_start: bool,

    // -- Configuration --
    pub config: OvenConfig,
}

impl OvenContext {
    pub fn new(config: OvenConfig) -> Self {
        Self {
            now_ms: 0,
            element_on: false,
            turn_on_pending: false,
            current_setpoint_f: config.default_setpoint_f,
            off_timer: OffTimer::default(),
            manual_start: false,
            config,
        }
    }

    /// Record a panel start: the real setpoint is unknown, so fall back to
    /// the oven's default.
    pub fn note_manual_start(&mut self) {
        self.manual_start = true;
        self.current_setpoint_f = self.config.default_setpoint_f;
    }

    /// Consume the manual-start marker.
    pub fn take_manual_start(&mut self) -> bool {
        core::mem::take(&mut self.manual_start)
    }

    /// Feed the current sample into the off timer and return elapsed
    /// off-time in whole seconds, if armed.
    pub fn off_secs(&mut self) -> Option<u64> {
        self.off_timer
            .observe(self.element_on, self.now_ms)
            .map(|ms| ms / 1000)
    }
}
