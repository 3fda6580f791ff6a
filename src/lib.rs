//! Oven retrofit controller library.
//!
//! Drives a countertop oven's membrane panel from an ESP32 by emulating
//! button presses, and infers the oven's mode from a single sense line on
//! the heating element.  Everything except `main.rs` builds on the host;
//! ESP-IDF calls are gated behind the `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod control;
pub mod controller;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod units;

pub use controller::OvenController;
pub use error::{Error, Result};
pub use fsm::OvenState;
