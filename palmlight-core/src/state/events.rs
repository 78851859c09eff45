//! Events that trigger state transitions

use crate::gesture::GestureLabel;
use crate::hand::Digit;

/// Why the hand is considered lost for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LossCause {
    /// The pose model found no hand
    NoHand,
    /// Lighting overload made the detection untrustworthy
    Overload,
}

/// Why the voter forced the actuator off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OffReason {
    /// A digit went from up to down
    DigitReleased(Digit),
    /// Every digit is down
    NoDigitsUp,
    /// Digits are up but match no gesture
    UndefinedGesture,
    /// Hand tracking lost
    HandLost(LossCause),
}

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// `ALL_OFF` was issued, bypassing the vote
    ForcedOff(OffReason),
    /// A frame's label was added to the vote window
    SampleRecorded(GestureLabel),
    /// A gesture won the vote and its command was issued
    GestureDispatched(GestureLabel),
    /// Operator reset of history and finger snapshot
    Reset,
}

impl Event {
    /// Check if this event issued a command
    pub fn is_dispatch(&self) -> bool {
        matches!(self, Event::ForcedOff(_) | Event::GestureDispatched(_))
    }

    /// Check if this event is a forced-off
    pub fn is_forced_off(&self) -> bool {
        matches!(self, Event::ForcedOff(_))
    }
}
