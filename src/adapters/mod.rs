//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements  | Connects to                     |
//! |------------|-------------|---------------------------------|
//! | `hardware` | ButtonPort  | Panel outputs (embedded-hal)    |
//! |            | SensePort   | Element sense input             |
//! | `time`     | ClockPort   | ESP32 system timer / `Instant`  |

pub mod hardware;
pub mod time;
