//! Published status readouts.
//!
//! The polling loop is the only writer; any thread may read.  Each field is
//! a relaxed atomic scalar, so a reader always sees a whole value but two
//! reads are never a consistent snapshot of each other.

use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU32, Ordering};

use crate::fsm::OvenState;

pub struct PublishedStatus {
    state: AtomicU8,
    /// `f32::to_bits` of the current setpoint (°F).
    setpoint_bits: AtomicU32,
    element_on: AtomicBool,
    cycles: AtomicU32,
    presses: AtomicU32,
}

impl PublishedStatus {
    pub fn new(setpoint_f: f32) -> Self {
        Self {
            state: AtomicU8::new(OvenState::Off as u8),
            setpoint_bits: AtomicU32::new(setpoint_f.to_bits()),
            element_on: AtomicBool::new(false),
            cycles: AtomicU32::new(0),
            presses: AtomicU32::new(0),
        }
    }

    // ── Writer (polling loop) ─────────────────────────────────

    pub fn publish_state(&self, state: OvenState) {
        self.state.store(state as u8, Ordering::Relaxed);
    }

    pub fn publish_setpoint(&self, fahrenheit: f32) {
        self.setpoint_bits
            .store(fahrenheit.to_bits(), Ordering::Relaxed);
    }

    pub fn publish_element(&self, on: bool) {
        self.element_on.store(on, Ordering::Relaxed);
    }

    pub fn publish_counters(&self, cycles: u32, presses: u32) {
        self.cycles.store(cycles, Ordering::Relaxed);
        self.presses.store(presses, Ordering::Relaxed);
    }

    // ── Readers ───────────────────────────────────────────────

    pub fn state(&self) -> OvenState {
        OvenState::from_u8(self.state.load(Ordering::Relaxed))
    }

    pub fn setpoint_f(&self) -> f32 {
        f32::from_bits(self.setpoint_bits.load(Ordering::Relaxed))
    }

    pub fn element_on(&self) -> bool {
        self.element_on.load(Ordering::Relaxed)
    }

    /// Completed polling cycles since start (wrapping).
    pub fn cycles(&self) -> u32 {
        self.cycles.load(Ordering::Relaxed)
    }

    /// Button presses issued since start (wrapping).
    pub fn presses(&self) -> u32 {
        self.presses.load(Ordering::Relaxed)
    }
}
