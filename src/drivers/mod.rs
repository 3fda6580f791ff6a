//! Peripheral drivers and task helpers.

pub mod panel;
pub mod sense;
pub mod task_pin;
pub mod watchdog;
