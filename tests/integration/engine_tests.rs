//! Integration tests for the controller → engine → panel pipeline.
//!
//! Each test steps an `OvenEngine` by hand against `MockHardware` and a
//! manual clock (one cycle = one second), asserting on the exact press
//! history, the published state and the listener notifications.

use ovenctl::OvenState;
use ovenctl::app::ports::Button;
use ovenctl::config::OvenConfig;

use crate::mock_hw::{CYCLE_MS, Rig, sequence};

const MINUTE: u64 = 60 * CYCLE_MS;

// ── Turn on ───────────────────────────────────────────────────

#[test]
fn turn_on_at_default_presses_bake_then_start() {
    let mut rig = Rig::new();
    rig.controller.turn_on();
    assert!(rig.hw.presses().is_empty(), "turn_on must only queue");

    rig.cycle();

    assert_eq!(rig.hw.presses(), vec![Button::Bake, Button::Start]);
    assert_eq!(rig.state(), OvenState::BeginPreheat);
    assert_eq!(rig.states(), vec![OvenState::BeginPreheat]);
    assert_eq!(rig.controller.temperature_fahrenheit(), 350.0);
}

#[test]
fn setpoint_set_after_turn_on_goes_out_in_one_sequence() {
    let mut rig = Rig::new();
    rig.controller.turn_on();
    rig.controller.set_temperature_fahrenheit(400.0);

    rig.cycle();

    assert_eq!(rig.hw.presses(), sequence(Button::Increment, 10));
    assert_eq!(rig.controller.temperature_fahrenheit(), 400.0);
    assert_eq!(rig.controller.temperature_celsius(), 204.0);
}

#[test]
fn low_setpoint_uses_decrement() {
    let mut rig = Rig::new();
    rig.controller.set_temperature_fahrenheit(300.0);
    rig.controller.turn_on();
    rig.cycle();
    assert_eq!(rig.hw.presses(), sequence(Button::Decrement, 10));
}

#[test]
fn setpoint_while_off_is_staged_without_presses() {
    let mut rig = Rig::new();
    rig.controller.set_temperature_fahrenheit(450.0);
    rig.cycles(3);
    assert!(rig.hw.presses().is_empty());
    assert_eq!(rig.state(), OvenState::Off);
    // Readout follows the staged setpoint.
    assert_eq!(rig.controller.temperature_fahrenheit(), 450.0);
}

#[test]
fn turn_on_while_running_is_ignored() {
    let mut rig = Rig::new();
    rig.preheating();
    rig.controller.turn_on();
    rig.cycle();
    assert!(rig.hw.presses().is_empty());
    assert_eq!(rig.state(), OvenState::Preheating);
}

#[test]
fn no_presses_once_setpoint_is_reached() {
    let mut rig = Rig::new();
    rig.controller.set_temperature_fahrenheit(425.0);
    rig.controller.turn_on();
    rig.cycle();
    let after_start = rig.hw.presses().len();

    rig.hw.set_element(true);
    rig.cycles(20);
    rig.hw.set_element(false);
    rig.cycles(20);

    assert_eq!(rig.hw.presses().len(), after_start);
    // Plus the cancel pressed by resync.
    assert_eq!(rig.controller.press_count(), after_start as u32 + 1);
}

// ── Ignition and preheat ──────────────────────────────────────

#[test]
fn begin_preheat_waits_for_the_element() {
    let mut rig = Rig::new();
    rig.controller.turn_on();
    rig.cycles(5);
    assert_eq!(rig.state(), OvenState::BeginPreheat);

    rig.hw.set_element(true);
    rig.cycle();
    assert_eq!(rig.state(), OvenState::Preheating);
    assert_eq!(
        rig.states(),
        vec![OvenState::BeginPreheat, OvenState::Preheating]
    );
}

#[test]
fn preheat_completes_after_thirty_seconds_off() {
    let mut rig = Rig::new();
    rig.preheating();
    rig.hw.set_element(false);

    // Off samples at 0 s .. 29 s after the element dropped.
    rig.cycles(30);
    assert_eq!(rig.state(), OvenState::Preheating);

    // 30 s.
    rig.cycle();
    assert_eq!(rig.state(), OvenState::On);
    assert!(rig.hw.presses().is_empty());
}

#[test]
fn one_cycle_flicker_does_not_complete_preheat() {
    let mut rig = Rig::new();
    rig.preheating();

    rig.hw.set_element(false);
    rig.cycles(20);
    rig.hw.set_element(true);
    rig.cycle();
    rig.hw.set_element(false);
    rig.cycles(25);

    assert_eq!(rig.state(), OvenState::Preheating);
}

// ── Inferred panel interaction ────────────────────────────────

#[test]
fn element_on_while_off_is_a_manual_start() {
    let mut rig = Rig::new();
    rig.controller.set_temperature_fahrenheit(400.0);
    rig.cycle();

    rig.hw.set_element(true);
    rig.cycle();

    assert_eq!(rig.state(), OvenState::Preheating);
    assert_eq!(rig.controller.temperature_fahrenheit(), 350.0);
    assert_eq!(rig.engine.shared().commands.target(), 350.0);
    assert!(rig.hw.presses().is_empty());

    // The stale 400 °F request is gone, so nothing is re-applied.
    rig.cycles(5);
    assert!(rig.hw.presses().is_empty());
}

#[test]
fn on_survives_nine_minutes_fifty_nine_off() {
    let mut rig = Rig::new();
    let off_at = rig.heated_to_on();

    while rig.now_ms() <= off_at + 9 * MINUTE + 59 * CYCLE_MS {
        rig.cycle();
    }
    assert_eq!(rig.state(), OvenState::On);

    rig.hw.set_element(true);
    rig.cycles(2);
    assert_eq!(rig.state(), OvenState::On);
}

#[test]
fn on_assumed_off_after_ten_minutes() {
    let mut rig = Rig::new();
    let off_at = rig.heated_to_on();

    while rig.now_ms() <= off_at + 10 * MINUTE + CYCLE_MS {
        rig.cycle();
    }

    assert_eq!(rig.state(), OvenState::Off);
    assert_eq!(rig.states().last(), Some(&OvenState::Off));
    // Inferred, so nothing was pressed.
    assert!(rig.hw.presses().is_empty());
}

#[test]
fn duty_cycling_keeps_the_oven_on() {
    let mut rig = Rig::new();
    rig.heated_to_on();

    for _ in 0..10 {
        rig.hw.set_element(true);
        rig.cycles(60);
        rig.hw.set_element(false);
        rig.cycles(240);
    }
    assert_eq!(rig.state(), OvenState::On);
}

#[test]
fn assumed_off_threshold_is_configurable() {
    let mut rig = Rig::with_config(OvenConfig {
        assumed_off_secs: Some(120),
        ..OvenConfig::default()
    });
    let off_at = rig.heated_to_on();
    while rig.now_ms() <= off_at + 2 * MINUTE {
        rig.cycle();
    }
    assert_eq!(rig.state(), OvenState::Off);
}

#[test]
fn disabled_assumed_off_keeps_the_oven_on() {
    let mut rig = Rig::with_config(OvenConfig {
        assumed_off_secs: None,
        ..OvenConfig::default()
    });
    rig.heated_to_on();
    rig.cycles(30 * 60);
    assert_eq!(rig.state(), OvenState::On);
}

// ── Turn off ──────────────────────────────────────────────────

#[test]
fn turn_off_presses_cancel_from_any_running_state() {
    let mut rig = Rig::new();
    rig.heated_to_on();
    rig.controller.turn_off();
    rig.cycle();
    assert_eq!(rig.hw.presses(), vec![Button::Cancel]);
    assert_eq!(rig.state(), OvenState::Off);
}

#[test]
fn turn_off_while_off_still_presses_cancel() {
    let mut rig = Rig::new();
    rig.controller.turn_off();
    rig.cycle();
    assert_eq!(rig.hw.presses(), vec![Button::Cancel]);
    assert!(rig.states().is_empty());
}

#[test]
fn turn_off_is_serviced_before_turn_on() {
    let mut rig = Rig::new();
    rig.preheating();

    rig.controller.turn_on();
    rig.controller.turn_off();
    rig.cycle();

    let mut expected = vec![Button::Cancel];
    expected.extend(sequence(Button::Increment, 0));
    assert_eq!(rig.hw.presses(), expected);
    assert_eq!(rig.state(), OvenState::BeginPreheat);
    assert_eq!(
        rig.states(),
        vec![
            OvenState::BeginPreheat,
            OvenState::Preheating,
            OvenState::Off,
            OvenState::BeginPreheat,
        ]
    );
}

// ── Setpoint changes while running ────────────────────────────

#[test]
fn setpoint_change_while_running_restarts_the_sequence() {
    let mut rig = Rig::new();
    rig.heated_to_on();
    let before = rig.states().len();

    rig.controller.set_temperature_fahrenheit(425.0);
    rig.cycle();

    let mut expected = vec![Button::Cancel];
    expected.extend(sequence(Button::Increment, 15));
    assert_eq!(rig.hw.presses(), expected);
    assert_eq!(rig.state(), OvenState::On);
    assert_eq!(rig.states().len(), before, "no state change to report");
    assert_eq!(rig.controller.temperature_fahrenheit(), 425.0);

    rig.cycles(5);
    assert_eq!(rig.hw.presses().len(), expected.len());
}

#[test]
fn celsius_setpoint_is_converted_before_pressing() {
    let mut rig = Rig::new();
    // 180 °C = 356 °F, snapped to 355 °F.
    rig.controller.set_temperature_celsius(180.0);
    rig.controller.turn_on();
    rig.cycle();
    assert_eq!(rig.hw.presses(), sequence(Button::Increment, 1));
    assert_eq!(rig.controller.temperature_fahrenheit(), 355.0);
}

// ── Notifications ─────────────────────────────────────────────

#[test]
fn element_listeners_receive_every_sample() {
    let mut rig = Rig::new();
    rig.cycles(3);
    rig.hw.set_element(true);
    rig.cycles(3);
    rig.hw.set_element(false);
    rig.cycles(3);

    // One reading per cycle, repeats included.
    assert_eq!(
        rig.elements(),
        vec![false, false, false, true, true, true, false, false, false]
    );
    assert!(!rig.controller.heating_element_on());
}

#[test]
fn status_counters_track_cycles_and_presses() {
    let mut rig = Rig::new();
    rig.controller.turn_on();
    rig.cycles(4);
    assert_eq!(rig.controller.cycle_count(), 4);
    // Resync's cancel plus bake and start.
    assert_eq!(rig.controller.press_count(), 3);
}
