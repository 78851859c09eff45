//! Finger vector to gesture label mapping

use palmlight_protocol::Command;

use crate::hand::{Digit, FingerVector};

/// Recognised gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GestureLabel {
    /// Open hand
    AllOn,
    /// Fist
    AllOff,
    /// Thumb only
    Blink,
    /// Index only
    Running,
    /// Middle only
    Breathing,
    /// Ring only
    Rainbow,
    /// Pinky only
    Wave,
    /// Thumb and index
    Fade,
    /// Index and middle
    Strobe,
    /// Any other three digits
    Twinkle,
    /// No rule matched
    None,
}

impl GestureLabel {
    /// Number of labels, for per-label counters
    pub const COUNT: usize = 11;

    /// Dense index in 0..COUNT
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Actuator command for this gesture
    ///
    /// [`GestureLabel::None`] has no command.
    pub fn command(self) -> Option<Command> {
        match self {
            GestureLabel::AllOn => Some(Command::AllOn),
            GestureLabel::AllOff => Some(Command::AllOff),
            GestureLabel::Blink => Some(Command::Blink),
            GestureLabel::Running => Some(Command::Chase),
            GestureLabel::Breathing => Some(Command::Breathe),
            GestureLabel::Rainbow => Some(Command::Rainbow),
            GestureLabel::Wave => Some(Command::Wave),
            GestureLabel::Fade => Some(Command::Fade),
            GestureLabel::Strobe => Some(Command::Strobe),
            GestureLabel::Twinkle => Some(Command::Twinkle),
            GestureLabel::None => None,
        }
    }

    /// Snake-case name for logs
    pub fn name(self) -> &'static str {
        match self {
            GestureLabel::AllOn => "all_on",
            GestureLabel::AllOff => "all_off",
            GestureLabel::Blink => "blink",
            GestureLabel::Running => "running",
            GestureLabel::Breathing => "breathing",
            GestureLabel::Rainbow => "rainbow",
            GestureLabel::Wave => "wave",
            GestureLabel::Fade => "fade",
            GestureLabel::Strobe => "strobe",
            GestureLabel::Twinkle => "twinkle",
            GestureLabel::None => "none",
        }
    }

    /// Check if this label names a gesture
    pub fn is_defined(self) -> bool {
        self != GestureLabel::None
    }
}

/// Single-digit and two-digit patterns, checked after the all-up and
/// all-down rules and before the three-digit rule
const EXACT_PATTERNS: [(&[Digit], GestureLabel); 7] = [
    (&[Digit::Thumb], GestureLabel::Blink),
    (&[Digit::Index], GestureLabel::Running),
    (&[Digit::Middle], GestureLabel::Breathing),
    (&[Digit::Ring], GestureLabel::Rainbow),
    (&[Digit::Pinky], GestureLabel::Wave),
    (&[Digit::Thumb, Digit::Index], GestureLabel::Fade),
    (&[Digit::Index, Digit::Middle], GestureLabel::Strobe),
];

/// Classify a finger vector; first matching rule wins
pub fn classify(fingers: &FingerVector) -> GestureLabel {
    match fingers.count_up() {
        5 => return GestureLabel::AllOn,
        0 => return GestureLabel::AllOff,
        _ => {}
    }

    if let Some(&(_, label)) = EXACT_PATTERNS
        .iter()
        .find(|(digits, _)| FingerVector::only(digits) == *fingers)
    {
        return label;
    }

    if fingers.count_up() == 3 {
        GestureLabel::Twinkle
    } else {
        GestureLabel::None
    }
}
