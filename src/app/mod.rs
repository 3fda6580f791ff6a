//! Application core — domain logic behind port traits.
//!
//! Everything the oven controller decides lives here: the command mailbox
//! callers write into, the status block they read from, the listener
//! registry, and the engine that runs one polling cycle at a time.  All
//! hardware access goes through the traits in [`ports`], so the whole
//! layer runs on the host against mock adapters.

pub mod commands;
pub mod events;
pub mod listeners;
pub mod ports;
pub mod service;
pub mod status;
pub mod thermostat;
