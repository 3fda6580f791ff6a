//! Oven controller firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │   HardwareAdapter (ButtonPort + SensePort)   MonotonicClock  │
//! │   ButtonPanel<PinDriver, FreeRtos>   SenseLine<PinDriver>    │
//! │                                                              │
//! │  ──────────────── Port Trait Boundary ───────────────────    │
//! │                                                              │
//! │   ┌──────────────────────────────────────────────────────┐   │
//! │   │  OvenEngine (polling task): FSM · Sequencer · Timer  │   │
//! │   └──────────────────────────────────────────────────────┘   │
//! │                                                              │
//! │   OvenController handle ◀── ThermostatView / main heartbeat  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyIOPin, AnyOutputPin, Output, PinDriver, Pull};
use log::{debug, info, warn};

use ovenctl::OvenController;
use ovenctl::adapters::hardware::HardwareAdapter;
use ovenctl::adapters::time::MonotonicClock;
use ovenctl::app::ports::Button;
use ovenctl::app::thermostat::ThermostatView;
use ovenctl::config::OvenConfig;
use ovenctl::drivers::panel::ButtonPanel;
use ovenctl::drivers::sense::SenseLine;
use ovenctl::pins;

const ACCESSORY_NAME: &str = "Countertop Oven";
const HEARTBEAT: Duration = Duration::from_secs(60);

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  ovenctl v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = load_config();
    let controller = OvenController::new(ACCESSORY_NAME, config.clone())?;

    // ── 3. Panel outputs ──────────────────────────────────────
    let mut outputs: heapless::Vec<PinDriver<'static, AnyOutputPin, Output>, { Button::COUNT }> =
        heapless::Vec::new();
    for (button, gpio) in pins::BUTTON_GPIOS {
        // SAFETY: each GPIO number appears once in BUTTON_GPIOS and is not
        // claimed anywhere else in the firmware.
        let pin = PinDriver::output(unsafe { AnyOutputPin::new(gpio) })
            .with_context(|| format!("{:?} button on GPIO{}", button, gpio))?;
        outputs
            .push(pin)
            .map_err(|_| anyhow!("too many button outputs"))?;
    }
    let outputs = outputs
        .into_array()
        .map_err(|_| anyhow!("expected {} button outputs", Button::COUNT))?;

    // ── 4. Sense input ────────────────────────────────────────
    // SAFETY: ELEMENT_SENSE_GPIO is distinct from every button GPIO.  The
    // pull-up needs an IO-capable pin handle.
    let mut sense_pin = PinDriver::input(unsafe { AnyIOPin::new(pins::ELEMENT_SENSE_GPIO) })
        .context("element sense input")?;
    sense_pin.set_pull(Pull::Up).context("sense pull-up")?;

    let hw = HardwareAdapter::new(
        ButtonPanel::new(outputs, FreeRtos, config.button_dwell_ms),
        SenseLine::new(sense_pin, config.sense_active_low),
    );

    // ── 5. Listeners ──────────────────────────────────────────
    let thermostat = ThermostatView::new(controller.clone());
    thermostat.subscribe(|snap| {
        info!(
            "thermostat: mode={:?} current={}\u{00b0}C target={}\u{00b0}C",
            snap.mode, snap.current_c, snap.target_c
        );
    })?;
    controller.add_heating_element_listener(|on| debug!("element: {}", on))?;

    // ── 6. Start polling ──────────────────────────────────────
    let _poll = controller.initialize(hw, MonotonicClock::new())?;
    let (min_c, max_c, step_c) = thermostat.range_c();
    info!(
        "'{}' ready: {}..{}\u{00b0}C step {:.2}\u{00b0}C",
        controller.name(),
        min_c,
        max_c,
        step_c
    );

    // ── 7. Heartbeat ──────────────────────────────────────────
    loop {
        std::thread::sleep(HEARTBEAT);
        info!(
            "heartbeat: state={:?} setpoint={}\u{00b0}F element={} cycles={} presses={}",
            controller.current_state(),
            controller.temperature_fahrenheit(),
            controller.heating_element_on(),
            controller.cycle_count(),
            controller.press_count()
        );
    }
}

/// Compile-time JSON override, falling back to defaults when absent or
/// invalid.
fn load_config() -> OvenConfig {
    let Some(json) = option_env!("OVENCTL_CONFIG_JSON") else {
        return OvenConfig::default();
    };
    match OvenConfig::from_json(json) {
        Ok(config) => {
            info!("Config: using OVENCTL_CONFIG_JSON override");
            config
        }
        Err(e) => {
            warn!("Config override rejected ({}), using defaults", e);
            OvenConfig::default()
        }
    }
}
