//! Unified error type for the oven controller.
//!
//! Button presses cannot fail observably, so nothing on the polling path
//! returns an error.  What remains are setup-time failures: bad
//! configuration, a full listener registry, a second `initialize()`, and
//! failure to start the polling task.  All variants are `Copy`.

use core::fmt;

/// Every fallible controller operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid or could not be parsed.
    /// The `&'static str` names the offending field and why.
    Config(&'static str),
    /// `initialize()` was called more than once.
    AlreadyInitialized,
    /// The listener registry has no free slot.
    ListenerCapacity,
    /// The polling task could not be created.  Fatal at startup.
    TaskSpawn,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::AlreadyInitialized => write!(f, "controller already initialized"),
            Self::ListenerCapacity => write!(f, "listener registry full"),
            Self::TaskSpawn => write!(f, "polling task could not be started"),
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
