//! Notification dispatcher.
//!
//! Append-only registry of state and heating-element callbacks.  Callbacks
//! run synchronously on the polling task, in registration order, so they
//! must return quickly: a slow listener delays the next cycle.  A listener
//! must not register further listeners from inside its callback.

use heapless::Vec;
use log::info;

use crate::error::{Error, Result};
use crate::fsm::OvenState;

use super::events::OvenEvent;

/// Slots per listener kind.
pub const MAX_LISTENERS: usize = 8;

pub type StateListener = Box<dyn Fn(OvenState) + Send>;
pub type ElementListener = Box<dyn Fn(bool) + Send>;

/// Registered callbacks, in registration order.
#[derive(Default)]
pub struct ListenerSet {
    state: Vec<StateListener, MAX_LISTENERS>,
    element: Vec<ElementListener, MAX_LISTENERS>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_state_listener(&mut self, listener: StateListener) -> Result<()> {
        self.state
            .push(listener)
            .map_err(|_| Error::ListenerCapacity)
    }

    pub fn add_element_listener(&mut self, listener: ElementListener) -> Result<()> {
        self.element
            .push(listener)
            .map_err(|_| Error::ListenerCapacity)
    }

    /// Number of registered (state, element) listeners.
    pub fn len(&self) -> (usize, usize) {
        (self.state.len(), self.element.len())
    }

    /// Invoke every listener of the matching kind.  State changes are
    /// logged.
    pub fn dispatch(&self, event: &OvenEvent) {
        match *event {
            OvenEvent::StateChanged { from, to } => {
                info!("STATE | {:?} -> {:?}", from, to);
                for listener in &self.state {
                    listener(to);
                }
            }
            // Sent every cycle; the engine logs edges itself.
            OvenEvent::HeatingElement(on) => {
                for listener in &self.element {
                    listener(on);
                }
            }
        }
    }
}
