//! State machine definition
//!
//! The conceptual output state is a function of the previous state and an
//! event. Unknown combinations keep the current state.

use super::events::Event;
use crate::gesture::GestureLabel;

/// Voter output states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoterState {
    /// Actuator off (or never commanded)
    #[default]
    Idle,
    /// Accumulating votes toward a candidate gesture
    Tracking,
    /// A gesture was dispatched and is the steady output
    Locked(GestureLabel),
}

impl VoterState {
    /// Check if the actuator is running a gesture's effect
    pub fn is_output_on(&self) -> bool {
        matches!(self, VoterState::Locked(_))
    }

    /// Gesture currently driving the actuator
    pub fn locked_gesture(&self) -> Option<GestureLabel> {
        match self {
            VoterState::Locked(label) => Some(*label),
            _ => None,
        }
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use VoterState::*;

        match (self, event) {
            // Forced-off wins from any state
            (_, ForcedOff(_)) => Idle,

            (_, GestureDispatched(label)) => Locked(label),

            // Holding the dispatched gesture keeps the lock
            (Locked(current), SampleRecorded(label)) if label == current => Locked(current),
            (_, SampleRecorded(_)) => Tracking,

            // Reset abandons a candidate but does not switch the actuator
            (Tracking, Reset) => Idle,

            _ => self,
        }
    }
}
