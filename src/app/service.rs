//! Oven engine — the hexagonal core.
//!
//! [`OvenEngine`] owns the FSM, its context, the press sequencer and the
//! hardware/clock adapters.  It is driven exclusively by the polling task;
//! callers on other threads only touch the [`OvenShared`] block (command
//! mailbox in, published status and listener callbacks out).
//!
//! ```text
//!  CommandMailbox ──▶ ┌──────────────────────────┐ ──▶ PublishedStatus
//!                     │        OvenEngine        │
//!     SensePort  ──▶  │  FSM · Sequencer · Timer │ ──▶ ListenerSet
//!                     └────────────┬─────────────┘
//!                                  ▼
//!                             ButtonPort
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};

use crate::config::OvenConfig;
use crate::control::sequencer::Sequencer;
use crate::fsm::context::OvenContext;
use crate::fsm::states::build_state_table;
use crate::fsm::{Fsm, OvenState};

use super::commands::CommandMailbox;
use super::events::OvenEvent;
use super::listeners::ListenerSet;
use super::ports::{Button, ButtonPort, ClockPort, SensePort};
use super::status::PublishedStatus;

/// Display-name capacity.
pub const NAME_CAPACITY: usize = 32;

// ───────────────────────────────────────────────────────────────
// Shared block
// ───────────────────────────────────────────────────────────────

/// State shared between the controller handle and the polling task.
pub struct OvenShared {
    pub name: heapless::String<NAME_CAPACITY>,
    pub config: OvenConfig,
    pub commands: CommandMailbox,
    pub status: PublishedStatus,
    listeners: Mutex<ListenerSet>,
    initialized: AtomicBool,
}

impl OvenShared {
    pub fn new(name: heapless::String<NAME_CAPACITY>, config: OvenConfig) -> Self {
        let default_f = config.default_setpoint_f;
        Self {
            name,
            config,
            commands: CommandMailbox::new(default_f),
            status: PublishedStatus::new(default_f),
            listeners: Mutex::new(ListenerSet::new()),
            initialized: AtomicBool::new(false),
        }
    }

    /// Lock the listener registry.  A listener that panicked poisons the
    /// mutex; the registry itself is still intact, so keep using it.
    pub fn listeners(&self) -> MutexGuard<'_, ListenerSet> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claim the one-time initialization.  `false` if already claimed.
    pub fn claim_initialization(&self) -> bool {
        !self.initialized.swap(true, Ordering::AcqRel)
    }
}

// ───────────────────────────────────────────────────────────────
// OvenEngine
// ───────────────────────────────────────────────────────────────

pub struct OvenEngine<H, C> {
    hw: H,
    clock: C,
    fsm: Fsm,
    ctx: OvenContext,
    sequencer: Sequencer,
    shared: Arc<OvenShared>,
    /// Previous sense reading, for edge logging; `None` before the first
    /// cycle.
    last_element: Option<bool>,
    cycles: u32,
    presses: u32,
}

impl<H, C> OvenEngine<H, C>
where
    H: ButtonPort + SensePort,
    C: ClockPort,
{
    /// Build an engine in `Off`.  Does not touch the hardware; call
    /// [`resync`](Self::resync) before the first cycle.
    pub fn new(hw: H, clock: C, shared: Arc<OvenShared>) -> Self {
        let config = shared.config.clone();
        let sequencer = Sequencer::new(&config);
        let ctx = OvenContext::new(config);
        let fsm = Fsm::new(build_state_table(), OvenState::Off);

        Self {
            hw,
            clock,
            fsm,
            ctx,
            sequencer,
            shared,
            last_element: None,
            cycles: 0,
            presses: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Release every output, press cancel and force `Off`.
    ///
    /// Whatever the oven was doing before we booted is unknown, so the only
    /// safe baseline is a cancelled panel.  State listeners are told `Off`
    /// even when the model already was.
    pub fn resync(&mut self) {
        let from = self.fsm.current_state();
        info!("{}: resync from {:?}", self.shared.name, from);

        self.hw.release_all();
        self.press(Button::Cancel);
        self.fsm.force_transition(OvenState::Off, &mut self.ctx);
        self.ctx.off_timer.restart(false);
        let _ = self.fsm.take_transitions();

        self.publish();
        self.shared.listeners().dispatch(&OvenEvent::StateChanged {
            from,
            to: OvenState::Off,
        });
    }

    // ── Per-cycle orchestration ───────────────────────────────

    /// Run one polling cycle:
    ///
    /// 1. sample the clock and the sense line
    /// 2. let the FSM react to the sample
    /// 3. service turn-off, then setpoint changes, then turn-on
    /// 4. publish status and notify listeners
    pub fn run_cycle(&mut self) {
        // 1. Inputs
        let now_ms = self.clock.now_ms();
        let element_on = self.hw.heating_element_on();
        if self.last_element != Some(element_on) {
            info!("ELEMENT | {}", if element_on { "energised" } else { "idle" });
            self.last_element = Some(element_on);
        }
        self.shared.status.publish_element(element_on);

        debug!(
            "cycle {}: t={}ms element={} state={:?}",
            self.cycles,
            now_ms,
            element_on,
            self.fsm.current_state()
        );

        // 2. Sense-driven transitions
        self.ctx.now_ms = now_ms;
        self.ctx.element_on = element_on;
        self.ctx.turn_on_pending = self.shared.commands.turn_on_pending();
        self.fsm.tick(&mut self.ctx);

        if self.ctx.take_manual_start() {
            self.shared
                .commands
                .set_target(self.ctx.config.default_setpoint_f);
        }

        // 3. Commands
        if self.shared.commands.take_turn_off() {
            info!("{}: turn off", self.shared.name);
            self.press(Button::Cancel);
            self.fsm.force_transition(OvenState::Off, &mut self.ctx);
        }

        self.reconcile_setpoint();

        if self.shared.commands.take_turn_on() {
            self.start();
        }

        // 4. Outputs
        self.cycles = self.cycles.wrapping_add(1);
        self.publish();
        self.notify(element_on);
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> OvenState {
        self.fsm.current_state()
    }

    /// Setpoint (°F) the oven was last commanded to.
    pub fn current_setpoint_f(&self) -> f32 {
        self.ctx.current_setpoint_f
    }

    /// Completed cycles since construction (wrapping).
    pub fn cycle_count(&self) -> u32 {
        self.cycles
    }

    /// Button presses issued since construction (wrapping).
    pub fn press_count(&self) -> u32 {
        self.presses
    }

    pub fn shared(&self) -> &Arc<OvenShared> {
        &self.shared
    }

    pub fn hardware(&self) -> &H {
        &self.hw
    }

    // ── Internal ──────────────────────────────────────────────

    fn start(&mut self) {
        let state = self.fsm.current_state();
        if state.is_running() {
            info!("{}: turn on ignored, already {:?}", self.shared.name, state);
            return;
        }

        let target = self.shared.commands.target();
        info!("{}: turn on at {}\u{00b0}F", self.shared.name, target);
        self.apply_setpoint(target);
        self.fsm
            .force_transition(OvenState::BeginPreheat, &mut self.ctx);
    }

    /// Bring the commanded setpoint in line with the caller's target.
    fn reconcile_setpoint(&mut self) {
        let target = self.shared.commands.target();
        if target == self.ctx.current_setpoint_f {
            return;
        }

        // Nothing to press while the oven is off; turn-on applies it.
        if !self.fsm.current_state().is_running() {
            debug!("setpoint {}\u{00b0}F staged for next start", target);
            self.ctx.current_setpoint_f = target;
            return;
        }

        info!(
            "{}: setpoint {}\u{00b0}F -> {}\u{00b0}F while {:?}",
            self.shared.name,
            self.ctx.current_setpoint_f,
            target,
            self.fsm.current_state()
        );
        self.press(Button::Cancel);
        self.apply_setpoint(target);
        // The restart interrupts the element.  While preheating, wait for
        // it to relight before timing; once On, keep the assumed-off guard
        // armed in case it never does.
        let guard = self.fsm.current_state() == OvenState::On;
        self.ctx.off_timer.restart(guard);
    }

    /// Press the sequence for `target_f` and record where the panel lands.
    fn apply_setpoint(&mut self, target_f: f32) {
        let plan = self.sequencer.apply(&mut self.hw, target_f);
        self.presses = self.presses.wrapping_add(plan.total_presses());

        let landed = self.sequencer.landed_setpoint(&plan);
        if landed != target_f {
            // Off-grid target: adopt the panel's value so the next cycle
            // does not re-apply.
            warn!(
                "{}: {}\u{00b0}F is off the step grid, panel shows {}\u{00b0}F",
                self.shared.name, target_f, landed
            );
            self.shared.commands.set_target(landed);
        }
        self.ctx.current_setpoint_f = landed;
    }

    fn press(&mut self, button: Button) {
        self.hw.press(button);
        self.presses = self.presses.wrapping_add(1);
    }

    fn publish(&self) {
        let status = &self.shared.status;
        status.publish_state(self.fsm.current_state());
        status.publish_setpoint(self.ctx.current_setpoint_f);
        status.publish_counters(self.cycles, self.presses);
    }

    /// Every cycle's sample reaches the element listeners, then each
    /// committed transition reaches the state listeners.
    fn notify(&mut self, element_on: bool) {
        let transitions = self.fsm.take_transitions();
        let listeners = self.shared.listeners();
        listeners.dispatch(&OvenEvent::HeatingElement(element_on));
        for t in &transitions {
            listeners.dispatch(&OvenEvent::StateChanged {
                from: t.from,
                to: t.to,
            });
        }
    }
}
