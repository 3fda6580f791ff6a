//! Oven controller handle and polling-loop driver.
//!
//! [`OvenController`] is the public surface: a cheap, clonable handle over
//! the shared block.  Every method is safe to call from any thread and
//! returns immediately; commands are only *requested* here and carried out
//! by the polling task on its next cycle.
//!
//! ```text
//!   caller threads                      polling task (core 1)
//!   ──────────────                      ─────────────────────
//!   turn_on() ───────┐              ┌──▶ OvenEngine::run_cycle()
//!   turn_off() ──────┼─▶ mailbox ───┤      │
//!   set_temperature ─┘              │      ├─▶ ButtonPort presses
//!                                   │      ▼
//!   current_state() ◀── status ◀────┴── publish + listeners
//! ```

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use log::{error, info, warn};

use crate::app::ports::{ButtonPort, ClockPort, SensePort};
use crate::app::service::{NAME_CAPACITY, OvenEngine, OvenShared};
use crate::config::OvenConfig;
use crate::drivers::task_pin::{Core, spawn_on_core};
use crate::drivers::watchdog::Watchdog;
use crate::error::{Error, Result};
use crate::fsm::OvenState;
use crate::units;

/// FreeRTOS priority of the polling task.
const POLL_TASK_PRIORITY: u8 = 5;

#[derive(Clone)]
pub struct OvenController {
    shared: Arc<OvenShared>,
}

impl OvenController {
    /// Create a controller named `name` (≤ 32 bytes).  Nothing touches the
    /// hardware until [`initialize`](Self::initialize).
    pub fn new(name: &str, config: OvenConfig) -> Result<Self> {
        config.validate()?;
        let name = heapless::String::<NAME_CAPACITY>::try_from(name)
            .map_err(|_| Error::Config("name longer than 32 bytes"))?;
        Ok(Self {
            shared: Arc::new(OvenShared::new(name, config)),
        })
    }

    pub fn name(&self) -> &str {
        &self.shared.name
    }

    pub fn config(&self) -> &OvenConfig {
        &self.shared.config
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Release all outputs, resync to `Off` and start the polling task.
    ///
    /// Must be called exactly once; a second call returns
    /// [`Error::AlreadyInitialized`] without touching the hardware.
    /// Failure to spawn the task is fatal to startup.
    pub fn initialize<H, C>(&self, hw: H, clock: C) -> Result<JoinHandle<()>>
    where
        H: ButtonPort + SensePort + Send + 'static,
        C: ClockPort + Send + 'static,
    {
        if !self.shared.claim_initialization() {
            warn!("{}: initialize() called twice", self.shared.name);
            return Err(Error::AlreadyInitialized);
        }

        let mut engine = self.attach(hw, clock);
        engine.resync();

        let stack_kb = self.shared.config.task_stack_kb;
        spawn_on_core(Core::App, POLL_TASK_PRIORITY, stack_kb, "oven-poll\0", move || {
            poll_loop(engine);
        })
        .map_err(|e| {
            error!("{}: polling task spawn failed: {}", self.shared.name, e);
            Error::TaskSpawn
        })
    }

    /// Build an engine over this controller's shared state without
    /// starting a task.  The caller drives it with `run_cycle()`.
    ///
    /// Bypasses the init-once guard; for host-side stepping only.  Never
    /// run an attached engine alongside [`initialize`](Self::initialize).
    #[doc(hidden)]
    pub fn attach<H, C>(&self, hw: H, clock: C) -> OvenEngine<H, C>
    where
        H: ButtonPort + SensePort,
        C: ClockPort,
    {
        OvenEngine::new(hw, clock, Arc::clone(&self.shared))
    }

    // ── Commands ──────────────────────────────────────────────

    /// Ask the polling loop to start the oven at the target setpoint.
    pub fn turn_on(&self) {
        info!("{}: turn on requested", self.shared.name);
        self.shared.commands.request_turn_on();
    }

    /// Ask the polling loop to cancel the oven.
    pub fn turn_off(&self) {
        info!("{}: turn off requested", self.shared.name);
        self.shared.commands.request_turn_off();
    }

    /// Set the target setpoint.  Out-of-range values are clamped and
    /// off-step values snapped to the nearest step; non-finite values are
    /// ignored.
    pub fn set_temperature_fahrenheit(&self, fahrenheit: f32) {
        let Some(normalized) = self.shared.config.normalize_setpoint(fahrenheit) else {
            warn!("{}: ignoring setpoint {}", self.shared.name, fahrenheit);
            return;
        };
        if normalized != fahrenheit {
            warn!(
                "{}: setpoint {}\u{00b0}F adjusted to {}\u{00b0}F",
                self.shared.name, fahrenheit, normalized
            );
        }
        self.shared.commands.set_target(normalized);
    }

    pub fn set_temperature_celsius(&self, celsius: f32) {
        self.set_temperature_fahrenheit(units::to_fahrenheit(celsius));
    }

    /// Register a callback for state changes.  Runs on the polling task.
    pub fn add_state_listener(&self, listener: impl Fn(OvenState) + Send + 'static) -> Result<()> {
        self.shared.listeners().add_state_listener(Box::new(listener))
    }

    /// Register a callback for heating-element changes.  Runs on the
    /// polling task.
    pub fn add_heating_element_listener(
        &self,
        listener: impl Fn(bool) + Send + 'static,
    ) -> Result<()> {
        self.shared
            .listeners()
            .add_element_listener(Box::new(listener))
    }

    // ── Readouts ──────────────────────────────────────────────

    pub fn current_state(&self) -> OvenState {
        self.shared.status.state()
    }

    /// Setpoint the oven was last commanded to (°F).
    pub fn temperature_fahrenheit(&self) -> f32 {
        self.shared.status.setpoint_f()
    }

    pub fn temperature_celsius(&self) -> f32 {
        units::to_celsius(self.temperature_fahrenheit())
    }

    pub fn heating_element_on(&self) -> bool {
        self.shared.status.element_on()
    }

    pub fn cycle_count(&self) -> u32 {
        self.shared.status.cycles()
    }

    pub fn press_count(&self) -> u32 {
        self.shared.status.presses()
    }

    // ── Range metadata ────────────────────────────────────────

    pub fn max_temperature_fahrenheit(&self) -> f32 {
        self.shared.config.max_setpoint_f
    }

    pub fn min_temperature_fahrenheit(&self) -> f32 {
        self.shared.config.min_setpoint_f
    }

    pub fn temperature_step_fahrenheit(&self) -> f32 {
        self.shared.config.step_f
    }

    pub fn max_temperature_celsius(&self) -> f32 {
        units::to_celsius(self.max_temperature_fahrenheit())
    }

    pub fn min_temperature_celsius(&self) -> f32 {
        units::to_celsius(self.min_temperature_fahrenheit())
    }

    pub fn temperature_step_celsius(&self) -> f32 {
        units::delta_to_celsius(self.temperature_step_fahrenheit())
    }
}

/// Body of the polling task.  Never returns.
fn poll_loop<H, C>(mut engine: OvenEngine<H, C>)
where
    H: ButtonPort + SensePort,
    C: ClockPort,
{
    let config = engine.shared().config.clone();
    let watchdog = Watchdog::new(config.watchdog_timeout_ms);
    let interval = Duration::from_millis(u64::from(config.poll_interval_ms));

    info!(
        "{}: polling every {}ms",
        engine.shared().name,
        config.poll_interval_ms
    );

    loop {
        engine.run_cycle();
        watchdog.feed();
        std::thread::sleep(interval);
    }
}
