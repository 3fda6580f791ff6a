//! Controller configuration parameters
//!
//! All tunable parameters for the oven controller.  Defaults match the
//! retrofitted countertop oven: 350 °F after "bake", 5 °F steps, a
//! 200–500 °F range and a 200 ms button dwell.  A JSON override can be
//! supplied at build time (see `main.rs`).

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Core controller configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OvenConfig {
    // --- Setpoints (°F) ---
    /// Setpoint the oven assumes immediately after "bake" is pressed
    pub default_setpoint_f: f32,
    /// Lowest setpoint the panel accepts
    pub min_setpoint_f: f32,
    /// Highest setpoint the panel accepts
    pub max_setpoint_f: f32,
    /// Change per increment/decrement press
    pub step_f: f32,

    // --- Actuation ---
    /// Time each emulated press holds the output high, and the gap after it
    pub button_dwell_ms: u32,

    // --- Polling ---
    /// Polling loop cadence
    pub poll_interval_ms: u32,

    // --- Inference thresholds ---
    /// Continuous element-off time that marks preheat as complete
    pub preheat_complete_secs: u32,
    /// Continuous element-off time after which a running oven is assumed
    /// to have been switched off at the panel.  `None` disables the check.
    pub assumed_off_secs: Option<u32>,

    // --- Sense line ---
    /// The sense input reads LOW while the heating element is energised
    pub sense_active_low: bool,

    // --- Polling task ---
    /// Stack size for the polling task
    pub task_stack_kb: usize,
    /// Task watchdog timeout; must exceed the longest press sequence
    pub watchdog_timeout_ms: u32,
}

impl Default for OvenConfig {
    fn default() -> Self {
        Self {
            // Setpoints
            default_setpoint_f: 350.0,
            min_setpoint_f: 200.0,
            max_setpoint_f: 500.0,
            step_f: 5.0,

            // Actuation
            button_dwell_ms: 200,

            // Polling
            poll_interval_ms: 1000, // 1 Hz

            // Thresholds
            preheat_complete_secs: 30,
            assumed_off_secs: Some(10 * 60),

            // Sense line
            sense_active_low: true,

            // Polling task
            task_stack_kb: 4,
            watchdog_timeout_ms: 30_000,
        }
    }
}

impl OvenConfig {
    /// Parse a (possibly partial) JSON override and validate it.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| {
            log::warn!("Config JSON rejected: {}", e);
            Error::Config("malformed JSON")
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if !(self.step_f.is_finite() && self.step_f > 0.0) {
            return Err(Error::Config("step_f must be > 0"));
        }
        if !(self.min_setpoint_f <= self.default_setpoint_f
            && self.default_setpoint_f <= self.max_setpoint_f)
        {
            return Err(Error::Config(
                "default_setpoint_f must lie within [min_setpoint_f, max_setpoint_f]",
            ));
        }
        if !(self.is_on_step_grid(self.min_setpoint_f) && self.is_on_step_grid(self.max_setpoint_f)) {
            return Err(Error::Config(
                "min/max_setpoint_f must be whole steps from default_setpoint_f",
            ));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::Config("poll_interval_ms must be > 0"));
        }
        if self.preheat_complete_secs == 0 {
            return Err(Error::Config("preheat_complete_secs must be > 0"));
        }
        if let Some(off) = self.assumed_off_secs {
            if off <= self.preheat_complete_secs {
                return Err(Error::Config(
                    "assumed_off_secs must exceed preheat_complete_secs",
                ));
            }
        }
        if self.task_stack_kb == 0 {
            return Err(Error::Config("task_stack_kb must be > 0"));
        }
        if u64::from(self.watchdog_timeout_ms) <= self.worst_case_sequence_ms() {
            return Err(Error::Config(
                "watchdog_timeout_ms must exceed the longest press sequence",
            ));
        }
        Ok(())
    }

    /// Clamp a requested setpoint to the panel range and snap it to the
    /// nearest step reachable from the default.  Returns `None` for
    /// non-finite input.
    pub fn normalize_setpoint(&self, fahrenheit: f32) -> Option<f32> {
        if !fahrenheit.is_finite() {
            return None;
        }
        let clamped = fahrenheit.clamp(self.min_setpoint_f, self.max_setpoint_f);
        let steps = ((clamped - self.default_setpoint_f) / self.step_f).round();
        let snapped = self.default_setpoint_f + steps * self.step_f;
        Some(snapped.clamp(self.min_setpoint_f, self.max_setpoint_f))
    }

    /// Duration of the longest possible re-apply: cancel, bake, every step
    /// to the farther range end, start.  Saturates instead of overflowing.
    pub fn worst_case_sequence_ms(&self) -> u64 {
        let up = self.max_setpoint_f - self.default_setpoint_f;
        let down = self.default_setpoint_f - self.min_setpoint_f;
        let steps = (up.max(down) / self.step_f).round() as u64;
        steps
            .saturating_add(3)
            .saturating_mul(u64::from(self.button_dwell_ms))
            .saturating_mul(2)
    }

    fn is_on_step_grid(&self, fahrenheit: f32) -> bool {
        let steps = (fahrenheit - self.default_setpoint_f) / self.step_f;
        (steps - steps.round()).abs() < 1e-3
    }
}
