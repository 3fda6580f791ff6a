//! Inbound command mailbox.
//!
//! Callers on any thread (the accessory bridge, a console, tests) post
//! requests here; the polling loop consumes them once per cycle.  Each
//! field is an independent atomic with exactly one meaning:
//!
//! | Field          | Writer(s)                 | Consumed by             |
//! |----------------|---------------------------|-------------------------|
//! | `turn_on`      | callers                   | `take_turn_on()` (swap) |
//! | `turn_off`     | callers                   | `take_turn_off()` (swap)|
//! | `target_bits`  | callers, manual-start reset| compared, never cleared |
//!
//! Last write wins.  There is no ordering between fields: a reader must
//! never assume that two fields were written together.

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Pending caller requests.
pub struct CommandMailbox {
    turn_on: AtomicBool,
    turn_off: AtomicBool,
    /// `f32::to_bits` of the requested setpoint (°F).
    target_bits: AtomicU32,
}

impl CommandMailbox {
    /// Empty mailbox whose target is `initial_target_f`.
    pub fn new(initial_target_f: f32) -> Self {
        Self {
            turn_on: AtomicBool::new(false),
            turn_off: AtomicBool::new(false),
            target_bits: AtomicU32::new(initial_target_f.to_bits()),
        }
    }

    // ── Caller side ───────────────────────────────────────────

    /// Request that the oven be started at the target setpoint.
    pub fn request_turn_on(&self) {
        self.turn_on.store(true, Ordering::Release);
    }

    /// Request that the oven be cancelled.
    pub fn request_turn_off(&self) {
        self.turn_off.store(true, Ordering::Release);
    }

    /// Replace the target setpoint (°F).
    pub fn set_target(&self, fahrenheit: f32) {
        self.target_bits
            .store(fahrenheit.to_bits(), Ordering::Release);
    }

    // ── Polling-loop side ─────────────────────────────────────

    /// Consume a pending turn-on request.
    pub fn take_turn_on(&self) -> bool {
        self.turn_on.swap(false, Ordering::AcqRel)
    }

    /// Consume a pending turn-off request.
    pub fn take_turn_off(&self) -> bool {
        self.turn_off.swap(false, Ordering::AcqRel)
    }

    /// Peek at the turn-on flag without consuming it.
    pub fn turn_on_pending(&self) -> bool {
        self.turn_on.load(Ordering::Acquire)
    }

    /// Latest requested setpoint (°F).
    pub fn target(&self) -> f32 {
        f32::from_bits(self.target_bits.load(Ordering::Acquire))
    }
}
