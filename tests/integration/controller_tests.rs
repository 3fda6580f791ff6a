//! Integration tests for `OvenController::initialize()` and the polling
//! task it spawns.
//!
//! These use a real thread and the host `MonotonicClock`, so assertions
//! poll with a generous deadline instead of counting cycles.

use std::sync::mpsc;
use std::time::{Duration, Instant};

use ovenctl::adapters::time::MonotonicClock;
use ovenctl::app::ports::Button;
use ovenctl::app::thermostat::{HeatingMode, ThermostatView};
use ovenctl::config::OvenConfig;
use ovenctl::{Error, OvenController, OvenState};

use crate::mock_hw::MockHardware;

const DEADLINE: Duration = Duration::from_secs(5);

fn fast_config() -> OvenConfig {
    OvenConfig {
        poll_interval_ms: 10,
        ..OvenConfig::default()
    }
}

fn wait_for(mut cond: impl FnMut() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < DEADLINE {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    false
}

#[test]
fn initialize_resyncs_then_polls_in_the_background() {
    let controller = OvenController::new("Threaded Oven", fast_config()).unwrap();
    let (tx, rx) = mpsc::channel();
    controller
        .add_state_listener(move |s| {
            let _ = tx.send(s);
        })
        .unwrap();

    let hw = MockHardware::new();
    let _task = controller
        .initialize(hw.clone(), MonotonicClock::new())
        .unwrap();

    // Resync runs before initialize() returns.
    assert_eq!(hw.releases(), 1);
    assert_eq!(hw.presses(), vec![Button::Cancel]);
    assert_eq!(rx.recv_timeout(DEADLINE), Ok(OvenState::Off));

    assert!(wait_for(|| controller.cycle_count() > 0), "polling never ran");

    controller.set_temperature_fahrenheit(360.0);
    controller.turn_on();
    assert_eq!(rx.recv_timeout(DEADLINE), Ok(OvenState::BeginPreheat));
    assert_eq!(
        hw.presses(),
        vec![
            Button::Cancel,
            Button::Bake,
            Button::Increment,
            Button::Increment,
            Button::Start,
        ]
    );

    hw.set_element(true);
    assert_eq!(rx.recv_timeout(DEADLINE), Ok(OvenState::Preheating));
    assert!(wait_for(|| controller.heating_element_on()));

    controller.turn_off();
    assert_eq!(rx.recv_timeout(DEADLINE), Ok(OvenState::Off));
    assert_eq!(hw.presses().last(), Some(&Button::Cancel));
}

#[test]
fn second_initialize_is_rejected_without_touching_hardware() {
    let controller = OvenController::new("Once", fast_config()).unwrap();
    let first = MockHardware::new();
    let _task = controller
        .initialize(first.clone(), MonotonicClock::new())
        .unwrap();

    let second = MockHardware::new();
    let again = controller.initialize(second.clone(), MonotonicClock::new());
    assert!(matches!(again, Err(Error::AlreadyInitialized)));
    assert_eq!(second.releases(), 0);
    assert!(second.presses().is_empty());
}

#[test]
fn thermostat_view_drives_the_controller() {
    let controller = OvenController::new("Thermostat", fast_config()).unwrap();
    let view = ThermostatView::new(controller.clone());
    let (tx, rx) = mpsc::channel();
    view.subscribe(move |snap| {
        let _ = tx.send(snap);
    })
    .unwrap();

    let hw = MockHardware::new();
    let _task = controller
        .initialize(hw.clone(), MonotonicClock::new())
        .unwrap();
    let resynced = rx.recv_timeout(DEADLINE).unwrap();
    assert_eq!(resynced.mode, HeatingMode::Off);
    assert_eq!(resynced.current_c, 20.0);

    // 200 °C = 392 °F, which the panel can only reach as 390 °F (199 °C).
    view.set_target_temperature_c(200.0);
    view.set_heating_mode(HeatingMode::Heat);

    let started = rx.recv_timeout(DEADLINE).unwrap();
    assert_eq!(started.mode, HeatingMode::Heat);
    assert_eq!(started.target_c, 199.0);
    assert_eq!(started.current_c, 99.5);
    assert_eq!(view.heating_mode(), HeatingMode::Heat);

    view.set_heating_mode(HeatingMode::Off);
    let stopped = rx.recv_timeout(DEADLINE).unwrap();
    assert_eq!(stopped.mode, HeatingMode::Off);
}
