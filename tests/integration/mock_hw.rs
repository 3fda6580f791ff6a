//! Mock hardware adapter and manual clock for integration tests.
//!
//! Records every button press so tests can assert on the full press
//! history without touching real GPIO.  Both mocks are cheap clones over
//! shared state: the engine owns one copy, the test keeps another as a
//! probe, and either can cross into the polling thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use ovenctl::app::ports::{Button, ButtonPort, ClockPort, SensePort};
use ovenctl::app::service::OvenEngine;
use ovenctl::config::OvenConfig;
use ovenctl::{OvenController, OvenState};

// ── MockHardware ──────────────────────────────────────────────

#[derive(Default)]
struct Bench {
    presses: Vec<Button>,
    element_on: bool,
    releases: u32,
}

#[derive(Clone, Default)]
pub struct MockHardware {
    bench: Arc<Mutex<Bench>>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self::default()
    }

    /// Level the sense line reports from now on.
    pub fn set_element(&self, on: bool) {
        self.bench.lock().unwrap().element_on = on;
    }

    pub fn presses(&self) -> Vec<Button> {
        self.bench.lock().unwrap().presses.clone()
    }

    pub fn clear_presses(&self) {
        self.bench.lock().unwrap().presses.clear();
    }

    pub fn releases(&self) -> u32 {
        self.bench.lock().unwrap().releases
    }
}

impl ButtonPort for MockHardware {
    fn press(&mut self, button: Button) {
        self.bench.lock().unwrap().presses.push(button);
    }

    fn release_all(&mut self) {
        self.bench.lock().unwrap().releases += 1;
    }
}

impl SensePort for MockHardware {
    fn heating_element_on(&mut self) -> bool {
        self.bench.lock().unwrap().element_on
    }
}

// ── ManualClock ───────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct ManualClock {
    now_ms: Arc<AtomicU64>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::Relaxed);
    }
}

impl ClockPort for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::Relaxed)
    }
}

// ── Rig ───────────────────────────────────────────────────────

pub const CYCLE_MS: u64 = 1000;

/// A controller with an attached engine that the test steps by hand.
pub struct Rig {
    pub controller: OvenController,
    pub engine: OvenEngine<MockHardware, ManualClock>,
    pub hw: MockHardware,
    pub clock: ManualClock,
    /// Every state delivered to a state listener, in order.
    pub states: Arc<Mutex<Vec<OvenState>>>,
    /// Every reading delivered to an element listener, in order.
    pub elements: Arc<Mutex<Vec<bool>>>,
}

#[allow(dead_code)]
impl Rig {
    /// Resynced, with the resync's press and notification cleared.
    pub fn new() -> Self {
        Self::with_config(OvenConfig::default())
    }

    pub fn with_config(config: OvenConfig) -> Self {
        let controller = OvenController::new("Test Oven", config).unwrap();
        let hw = MockHardware::new();
        let clock = ManualClock::default();

        let states = Arc::new(Mutex::new(Vec::new()));
        let elements = Arc::new(Mutex::new(Vec::new()));
        {
            let states = states.clone();
            controller
                .add_state_listener(move |s| states.lock().unwrap().push(s))
                .unwrap();
        }
        {
            let elements = elements.clone();
            controller
                .add_heating_element_listener(move |on| elements.lock().unwrap().push(on))
                .unwrap();
        }

        let mut engine = controller.attach(hw.clone(), clock.clone());
        engine.resync();
        hw.clear_presses();
        states.lock().unwrap().clear();

        Self {
            controller,
            engine,
            hw,
            clock,
            states,
            elements,
        }
    }

    /// Run one cycle at the current time, then advance one cycle period.
    pub fn cycle(&mut self) {
        self.engine.run_cycle();
        self.clock.advance(CYCLE_MS);
    }

    pub fn cycles(&mut self, n: usize) {
        for _ in 0..n {
            self.cycle();
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.clock.now_ms()
    }

    pub fn state(&self) -> OvenState {
        self.controller.current_state()
    }

    pub fn states(&self) -> Vec<OvenState> {
        self.states.lock().unwrap().clone()
    }

    pub fn elements(&self) -> Vec<bool> {
        self.elements.lock().unwrap().clone()
    }

    /// Turn on at the default setpoint and confirm ignition.
    /// Leaves the element on in `Preheating`; presses are cleared.
    pub fn preheating(&mut self) {
        self.controller.turn_on();
        self.cycle();
        self.hw.set_element(true);
        self.cycle();
        assert_eq!(self.state(), OvenState::Preheating);
        self.hw.clear_presses();
    }

    /// From `preheating()`, switch the element off and run until the
    /// preheat threshold passes.  Returns the time the element went off.
    pub fn heated_to_on(&mut self) -> u64 {
        self.preheating();
        self.hw.set_element(false);
        let off_at = self.now_ms();
        while self.state() != OvenState::On {
            assert!(self.now_ms() - off_at <= 60 * CYCLE_MS, "preheat never completed");
            self.cycle();
        }
        off_at
    }
}

/// `Bake`, `n` × `step`, `Start`.
#[allow(dead_code)]
pub fn sequence(step: Button, n: usize) -> Vec<Button> {
    let mut v = vec![Button::Bake];
    v.extend(std::iter::repeat_n(step, n));
    v.push(Button::Start);
    v
}
