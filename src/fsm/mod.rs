//! Function-pointer finite state machine for the oven's inferred mode.
//!
//! Classic embedded FSM pattern:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │  StateTable                                                │
//! │  ┌──────────────┬───────────┬───────────────────────────┐  │
//! │  │ OvenState    │ on_enter  │ on_update                 │  │
//! │  ├──────────────┼───────────┼───────────────────────────┤  │
//! │  │ Off          │ fn(ctx)   │ fn(ctx) -> Option<next>   │  │
//! │  │ BeginPreheat │ fn(ctx)   │ fn(ctx) -> Option<next>   │  │
//! │  │ Preheating   │ fn(ctx)   │ fn(ctx) -> Option<next>   │  │
//! │  │ On           │ fn(ctx)   │ fn(ctx) -> Option<next>   │  │
//! │  └──────────────┴───────────┴───────────────────────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! `on_update` handles the transitions the oven makes on its own (seen
//! through the sense line).  Command-driven transitions (turn on, turn off,
//! resync) are applied by the engine through [`Fsm::force_transition`].
//! Every committed transition is queued so the engine can notify listeners
//! after the cycle's actuation has finished.

pub mod context;
pub mod states;

use context::OvenContext;
use heapless::Vec;
use log::{info, warn};

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Inferred operating mode of the physical oven.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OvenState {
    /// Not heating.  Initial state after resync.
    Off = 0,
    /// Start was pressed; ignition not yet seen on the sense line.
    BeginPreheat = 1,
    /// Element confirmed on; oven climbing to its setpoint.
    Preheating = 2,
    /// Setpoint reached; element duty-cycling to hold it.
    On = 3,
}

impl OvenState {
    /// Total number of states — sizes the table array.
    pub const COUNT: usize = 4;

    /// Convert a `u8` back to `OvenState`.  Out-of-range values map to
    /// `Off` (debug-asserted).
    pub fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Off,
            1 => Self::BeginPreheat,
            2 => Self::Preheating,
            3 => Self::On,
            _ => {
                debug_assert!(false, "invalid oven state: {raw}");
                Self::Off
            }
        }
    }

    /// `true` in every state where the oven has been started.
    pub fn is_running(self) -> bool {
        self != Self::Off
    }
}

// ---------------------------------------------------------------------------
// Function-pointer type aliases
// ---------------------------------------------------------------------------

/// Signature for `on_enter` actions.  Runs once per transition.
pub type StateActionFn = fn(&mut OvenContext);

/// Per-cycle update handler.  `Some(next)` requests a transition.
pub type StateUpdateFn = fn(&mut OvenContext) -> Option<OvenState>;

/// Static descriptor for a single state.
pub struct StateDescriptor {
    pub id: OvenState,
    pub name: &'static str,
    pub on_enter: Option<StateActionFn>,
    pub on_update: StateUpdateFn,
}

/// A committed `from → to` change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: OvenState,
    pub to: OvenState,
}

/// Upper bound on transitions in one cycle: sense-driven, turn-off,
/// turn-on, plus a spare.
pub const MAX_TRANSITIONS_PER_CYCLE: usize = 4;

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The finite state machine engine.
pub struct Fsm {
    table: [StateDescriptor; OvenState::COUNT],
    current: usize,
    pending: Vec<Transition, MAX_TRANSITIONS_PER_CYCLE>,
}

impl Fsm {
    /// Construct a new FSM with the given state table, starting in `initial`.
    pub fn new(table: [StateDescriptor; OvenState::COUNT], initial: OvenState) -> Self {
        Self {
            table,
            current: initial as usize,
            pending: Vec::new(),
        }
    }

    /// Advance by one polling cycle: run `on_update` for the current state
    /// and follow any transition it returns.
    pub fn tick(&mut self, ctx: &mut OvenContext) {
        if let Some(next) = (self.table[self.current].on_update)(ctx) {
            self.transition(next, ctx);
        }
    }

    /// Jump to `next` regardless of what `on_update` would say.
    /// A no-op when already in `next`.
    pub fn force_transition(&mut self, next: OvenState, ctx: &mut OvenContext) {
        if next as usize != self.current {
            self.transition(next, ctx);
        }
    }

    /// The current state's identity.
    pub fn current_state(&self) -> OvenState {
        self.table[self.current].id
    }

    /// Drain transitions committed since the last call, oldest first.
    pub fn take_transitions(&mut self) -> Vec<Transition, MAX_TRANSITIONS_PER_CYCLE> {
        core::mem::take(&mut self.pending)
    }

    // -----------------------------------------------------------------------
    // Internal
    // -----------------------------------------------------------------------

    fn transition(&mut self, next: OvenState, ctx: &mut OvenContext) {
        let next_idx = next as usize;
        let from = self.current_state();

        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next_idx].name
        );

        self.current = next_idx;

        if let Some(enter) = self.table[self.current].on_enter {
            enter(ctx);
        }

        if self.pending.push(Transition { from, to: next }).is_err() {
            warn!("FSM: transition log full, dropping {:?} -> {:?}", from, next);
        }
    }
}
