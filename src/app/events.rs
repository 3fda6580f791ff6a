//! Outbound controller events.
//!
//! The engine emits these after each cycle's actuation has finished.  The
//! [`ListenerSet`](super::listeners::ListenerSet) fans each one out to the
//! registered callbacks.

use crate::fsm::OvenState;

/// Structured events emitted by the polling loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OvenEvent {
    /// The inferred state changed (or was reasserted by resync).
    StateChanged { from: OvenState, to: OvenState },

    /// Heating-element reading sampled this cycle.
    HeatingElement(bool),
}
