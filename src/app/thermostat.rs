//! Thermostat view of the controller.
//!
//! Home-automation bridges model the oven as a heating-only thermostat.
//! This module maps the controller onto that shape: a two-value heating
//! mode, a target temperature in Celsius, and a *current* temperature that
//! has to be estimated because the oven has no temperature readout.
//!
//! | Oven state                  | Mode   | Current temperature estimate |
//! |-----------------------------|--------|------------------------------|
//! | `Off`                       | `Off`  | ambient (20 °C)              |
//! | `BeginPreheat`/`Preheating` | `Heat` | half the setpoint            |
//! | `On`                        | `Heat` | the setpoint                 |

use core::sync::atomic::{AtomicU8, Ordering};

use crate::controller::OvenController;
use crate::error::Result;
use crate::fsm::OvenState;
use crate::units;

/// Reported while the oven is off.
pub const AMBIENT_C: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatingMode {
    Off,
    Heat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum DisplayUnit {
    Celsius = 0,
    Fahrenheit = 1,
}

/// Everything a bridge republishes after a state change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermostatSnapshot {
    pub mode: HeatingMode,
    pub current_c: f32,
    pub target_c: f32,
}

impl ThermostatSnapshot {
    fn derive(state: OvenState, setpoint_f: f32) -> Self {
        let target_c = units::to_celsius(setpoint_f);
        let current_c = match state {
            OvenState::Off => AMBIENT_C,
            OvenState::BeginPreheat | OvenState::Preheating => target_c / 2.0,
            OvenState::On => target_c,
        };
        let mode = if state.is_running() {
            HeatingMode::Heat
        } else {
            HeatingMode::Off
        };
        Self {
            mode,
            current_c,
            target_c,
        }
    }
}

pub struct ThermostatView {
    controller: OvenController,
    display_unit: AtomicU8,
}

impl ThermostatView {
    pub fn new(controller: OvenController) -> Self {
        Self {
            controller,
            display_unit: AtomicU8::new(DisplayUnit::Celsius as u8),
        }
    }

    pub fn snapshot(&self) -> ThermostatSnapshot {
        ThermostatSnapshot::derive(
            self.controller.current_state(),
            self.controller.temperature_fahrenheit(),
        )
    }

    pub fn heating_mode(&self) -> HeatingMode {
        self.snapshot().mode
    }

    /// `Heat` queues a turn-on, `Off` a turn-off.
    pub fn set_heating_mode(&self, mode: HeatingMode) {
        match mode {
            HeatingMode::Off => self.controller.turn_off(),
            HeatingMode::Heat => self.controller.turn_on(),
        }
    }

    pub fn current_temperature_c(&self) -> f32 {
        self.snapshot().current_c
    }

    pub fn target_temperature_c(&self) -> f32 {
        self.controller.temperature_celsius()
    }

    pub fn set_target_temperature_c(&self, celsius: f32) {
        self.controller.set_temperature_celsius(celsius);
    }

    pub fn display_unit(&self) -> DisplayUnit {
        match self.display_unit.load(Ordering::Relaxed) {
            1 => DisplayUnit::Fahrenheit,
            _ => DisplayUnit::Celsius,
        }
    }

    pub fn set_display_unit(&self, unit: DisplayUnit) {
        self.display_unit.store(unit as u8, Ordering::Relaxed);
    }

    /// `(min, max, step)` in Celsius for characteristic metadata.
    pub fn range_c(&self) -> (f32, f32, f32) {
        (
            self.controller.min_temperature_celsius(),
            self.controller.max_temperature_celsius(),
            self.controller.temperature_step_celsius(),
        )
    }

    /// Call `f` with a fresh snapshot after every state change.  Runs on
    /// the polling task.
    pub fn subscribe(&self, f: impl Fn(ThermostatSnapshot) + Send + 'static) -> Result<()> {
        let controller = self.controller.clone();
        self.controller.add_state_listener(move |state| {
            f(ThermostatSnapshot::derive(
                state,
                controller.temperature_fahrenheit(),
            ));
        })
    }
}
