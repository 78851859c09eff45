//! Manual input events from the operator

use serde::{Deserialize, Serialize};

/// Discrete operator triggers forwarded by the capture sidecar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Send the TEST pattern immediately, bypassing the vote
    Test,
    /// Clear gesture history and finger snapshot
    Reset,
    /// End the session
    Quit,
}

impl InputEvent {
    /// Returns true if this event ends the session
    pub fn is_quit(&self) -> bool {
        matches!(self, InputEvent::Quit)
    }
}
