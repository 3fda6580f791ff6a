//! Button-press sequencer.
//!
//! The panel has no numeric entry.  Pressing "bake" loads a fixed default
//! setpoint (350 °F) and each "+"/"−" press moves it by one step (5 °F), so
//! reaching an arbitrary setpoint means:
//!
//! ```text
//!   BAKE ──▶ (INCREMENT | DECREMENT) × n ──▶ START
//! ```
//!
//! where `n = round(|target − default| / step)`.  Rounding is half away
//! from zero, so a target midway between two steps lands on the farther
//! one.  Presses are fire-and-forget; the engine verifies the outcome on
//! the sense line.

use log::info;

use crate::app::ports::{Button, ButtonPort};
use crate::config::OvenConfig;

/// Step presses needed to move from the default to a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressPlan {
    /// `Increment`, `Decrement`, or `None` when the target is the default.
    pub step_button: Option<Button>,
    /// Number of step presses.
    pub steps: u32,
}

impl PressPlan {
    /// Total presses including bake and start.
    pub fn total_presses(&self) -> u32 {
        self.steps + 2
    }
}

/// Translates setpoints into press sequences.
#[derive(Debug, Clone, Copy)]
pub struct Sequencer {
    default_f: f32,
    step_f: f32,
}

impl Sequencer {
    pub fn new(config: &OvenConfig) -> Self {
        Self {
            default_f: config.default_setpoint_f,
            step_f: config.step_f,
        }
    }

    /// Compute the step presses for `target_f` without pressing anything.
    pub fn plan(&self, target_f: f32) -> PressPlan {
        let delta = target_f - self.default_f;
        let steps = (delta.abs() / self.step_f).round() as u32;
        let step_button = match steps {
            0 => None,
            _ if delta > 0.0 => Some(Button::Increment),
            _ => Some(Button::Decrement),
        };
        PressPlan { step_button, steps }
    }

    /// Setpoint the panel actually shows after executing `plan`.
    pub fn landed_setpoint(&self, plan: &PressPlan) -> f32 {
        let offset = plan.steps as f32 * self.step_f;
        match plan.step_button {
            Some(Button::Decrement) => self.default_f - offset,
            Some(_) => self.default_f + offset,
            None => self.default_f,
        }
    }

    /// Press bake, the step button `n` times, then start.
    /// Blocks for the whole sequence.  Returns the plan that was executed.
    pub fn apply(&self, buttons: &mut impl ButtonPort, target_f: f32) -> PressPlan {
        let plan = self.plan(target_f);
        info!(
            "Sequencer: {}\u{00b0}F = bake + {} x {:?} + start",
            target_f, plan.steps, plan.step_button
        );

        buttons.press(Button::Bake);
        if let Some(step) = plan.step_button {
            for _ in 0..plan.steps {
                buttons.press(step);
            }
        }
        buttons.press(Button::Start);

        plan
    }
}
