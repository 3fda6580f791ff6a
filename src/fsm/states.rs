//! Concrete state handler functions and table builder.
//!
//! Each state is two plain `fn` pointers — no closures, no dynamic
//! dispatch.  The handlers only cover what the oven does on its own;
//! command-driven transitions live in the engine.
//!
//! ```text
//!          ┌──[element on, no turn-on pending]──────────┐
//!          │                                            ▼
//!   OFF ──[turn on]──▶ BEGIN_PREHEAT ──[element on]──▶ PREHEATING
//!    ▲                                                  │
//!    │                                   [element off ≥ 30 s]
//!    │                                                  ▼
//!    └─────────────[element off ≥ 10 min]────────────── ON
//!
//!  Any state ──[turn off]──▶ OFF
//! ```

use super::context::OvenContext;
use super::{OvenState, StateDescriptor};
use log::{info, warn};

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Build the static state table.  Called once at startup.
pub fn build_state_table() -> [StateDescriptor; OvenState::COUNT] {
    [
        // Index 0 — Off
        StateDescriptor {
            id: OvenState::Off,
            name: "Off",
            on_enter: Some(off_enter),
            on_update: off_update,
        },
        // Index 1 — BeginPreheat
        StateDescriptor {
            id: OvenState::BeginPreheat,
            name: "BeginPreheat",
            on_enter: Some(begin_preheat_enter),
            on_update: begin_preheat_update,
        },
        // Index 2 — Preheating
        StateDescriptor {
            id: OvenState::Preheating,
            name: "Preheating",
            on_enter: Some(preheating_enter),
            on_update: preheating_update,
        },
        // Index 3 — On
        StateDescriptor {
            id: OvenState::On,
            name: "On",
            on_enter: None,
            on_update: on_update,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════════════════
//  OFF
// ═══════════════════════════════════════════════════════════════════════════

fn off_enter(ctx: &mut OvenContext) {
    ctx.off_timer.restart(false);
}

fn off_update(ctx: &mut OvenContext) -> Option<OvenState> {
    // Our own ignition is handled through BeginPreheat; anything else that
    // lights the element was a person at the panel.
    if ctx.element_on && !ctx.turn_on_pending {
        ctx.note_manual_start();
        warn!(
            "OFF: element energised without a command, assuming manual start at {}\u{00b0}F",
            ctx.current_setpoint_f
        );
        return Some(OvenState::Preheating);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  BEGIN_PREHEAT — start pressed, waiting to see the element light
// ═══════════════════════════════════════════════════════════════════════════

fn begin_preheat_enter(ctx: &mut OvenContext) {
    ctx.off_timer.restart(false);
    info!(
        "BEGIN_PREHEAT: start pressed for {}\u{00b0}F, waiting for ignition",
        ctx.current_setpoint_f
    );
}

fn begin_preheat_update(ctx: &mut OvenContext) -> Option<OvenState> {
    if ctx.element_on {
        info!("BEGIN_PREHEAT: ignition confirmed");
        return Some(OvenState::Preheating);
    }
    None
}

// ═══════════════════════════════════════════════════════════════════════════
//  PREHEATING — element on until the oven first reaches its setpoint
// ═══════════════════════════════════════════════════════════════════════════

fn preheating_enter(ctx: &mut OvenContext) {
    // Always entered on an element-on sample.
    ctx.off_timer.restart(ctx.element_on);
}

fn preheating_update(ctx: &mut OvenContext) -> Option<OvenState> {
    let threshold = u64::from(ctx.config.preheat_complete_secs);
    match ctx.off_secs() {
        // Either the oven reached temperature and began duty-cycling, or
        // someone used the panel.  Both count as preheat complete.
        Some(off) if off >= threshold => {
            info!("PREHEATING: element off for {}s, preheat complete", off);
            Some(OvenState::On)
        }
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  ON — holding temperature
// ═══════════════════════════════════════════════════════════════════════════

// No on_enter: the off timer keeps running from Preheating so the
// assumed-off threshold counts from when the element actually went off.

fn on_update(ctx: &mut OvenContext) -> Option<OvenState> {
    let threshold = u64::from(ctx.config.assumed_off_secs?);
    match ctx.off_secs() {
        Some(off) if off >= threshold => {
            warn!(
                "ON: element off for {}s, assuming the oven was switched off at the panel",
                off
            );
            Some(OvenState::Off)
        }
        _ => None,
    }
}
