//! Control algorithms that turn a requested setpoint into panel actions.

pub mod sequencer;
