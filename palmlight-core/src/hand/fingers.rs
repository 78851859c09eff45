//! Finger up/down extraction
//!
//! The thumb folds sideways across the palm, so it is judged on the
//! horizontal axis; the other four digits fold downwards and are judged
//! on the vertical axis. Image coordinates put y = 0 at the top, so an
//! extended finger has its tip *above* (smaller y than) its joint.

use crate::error::{MalformedInput, PipelineError};

use super::landmarks::HandLandmarks;

/// Confidence reported for a digit judged up
pub const CONFIDENCE_UP: f32 = 0.8;

/// Confidence reported for a digit judged down
pub const CONFIDENCE_DOWN: f32 = 0.2;

/// The five digits in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Digit {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Digit {
    /// All digits in canonical order
    pub const ALL: [Digit; 5] = [
        Digit::Thumb,
        Digit::Index,
        Digit::Middle,
        Digit::Ring,
        Digit::Pinky,
    ];

    /// Position in a [`FingerVector`]
    pub const fn position(self) -> usize {
        self as usize
    }

    /// Landmark index of the fingertip
    pub const fn tip(self) -> usize {
        match self {
            Digit::Thumb => 4,
            Digit::Index => 8,
            Digit::Middle => 12,
            Digit::Ring => 16,
            Digit::Pinky => 20,
        }
    }

    /// Landmark index of the reference joint
    ///
    /// For the thumb this is the IP joint, one below the tip. For the
    /// other digits it is the PIP joint, two below the tip.
    pub const fn joint(self) -> usize {
        match self {
            Digit::Thumb => 3,
            Digit::Index => 6,
            Digit::Middle => 10,
            Digit::Ring => 14,
            Digit::Pinky => 18,
        }
    }

    /// Lowercase name for logs
    pub fn name(self) -> &'static str {
        match self {
            Digit::Thumb => "thumb",
            Digit::Index => "index",
            Digit::Middle => "middle",
            Digit::Ring => "ring",
            Digit::Pinky => "pinky",
        }
    }
}

/// Per-digit transition between two frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Down to up
    Rising,
    /// Up to down
    Falling,
}

/// Up/down state of all five digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FingerVector([bool; 5]);

impl FingerVector {
    /// Every digit down
    pub const ALL_DOWN: FingerVector = FingerVector([false; 5]);

    /// Every digit up
    pub const ALL_UP: FingerVector = FingerVector([true; 5]);

    /// Create from states in canonical order
    pub const fn new(states: [bool; 5]) -> Self {
        Self(states)
    }

    /// Vector with exactly the listed digits up
    pub fn only(digits: &[Digit]) -> Self {
        let mut states = [false; 5];
        for digit in digits {
            states[digit.position()] = true;
        }
        Self(states)
    }

    /// Validate a slice of unknown length
    pub fn from_slice(states: &[bool]) -> Result<Self, MalformedInput> {
        states
            .try_into()
            .map(Self)
            .map_err(|_| MalformedInput::DigitCount(states.len()))
    }

    /// States in canonical order
    pub const fn states(&self) -> [bool; 5] {
        self.0
    }

    /// Check if a digit is up
    pub fn is_up(&self, digit: Digit) -> bool {
        self.0[digit.position()]
    }

    /// Number of digits up
    pub fn count_up(&self) -> usize {
        self.0.iter().filter(|&&up| up).count()
    }

    /// Check if at least one digit is up
    pub fn any_up(&self) -> bool {
        self.0.iter().any(|&up| up)
    }

    /// Check if every digit is down
    pub fn is_all_down(&self) -> bool {
        !self.any_up()
    }

    /// Transition of `digit` going from `previous` to `self`
    pub fn edge_from(&self, previous: &FingerVector, digit: Digit) -> Option<Edge> {
        match (previous.is_up(digit), self.is_up(digit)) {
            (false, true) => Some(Edge::Rising),
            (true, false) => Some(Edge::Falling),
            _ => None,
        }
    }

    /// First digit (canonical order) that went from up to down
    pub fn first_release_from(&self, previous: &FingerVector) -> Option<Digit> {
        Digit::ALL
            .into_iter()
            .find(|&digit| self.edge_from(previous, digit) == Some(Edge::Falling))
    }
}

/// Per-digit confidence of the up/down call, in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FingerConfidence([f32; 5]);

impl FingerConfidence {
    /// Confidence for one digit
    pub fn get(&self, digit: Digit) -> f32 {
        self.0[digit.position()]
    }

    /// Confidence derived from the binary up/down call
    pub fn from_vector(fingers: &FingerVector) -> Self {
        let mut values = [CONFIDENCE_DOWN; 5];
        for digit in Digit::ALL {
            if fingers.is_up(digit) {
                values[digit.position()] = CONFIDENCE_UP;
            }
        }
        Self(values)
    }
}

/// Result of extracting one frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FingerReading {
    pub fingers: FingerVector,
    /// Telemetry only; no decision thresholds on it
    pub confidence: FingerConfidence,
}

/// Judge every digit up or down from one frame's landmarks
///
/// Returns [`PipelineError::NoHandDetected`] when `hand` is None; the
/// caller must then feed an all-down vector through the forced-off path.
pub fn extract_fingers(hand: Option<&HandLandmarks>) -> Result<FingerReading, PipelineError> {
    let hand = hand.ok_or(PipelineError::NoHandDetected)?;

    let mut states = [false; 5];
    for digit in Digit::ALL {
        let tip = hand.point(digit.tip())?;
        let joint = hand.point(digit.joint())?;

        states[digit.position()] = match digit {
            Digit::Thumb => tip.x > joint.x,
            _ => tip.y < joint.y,
        };
    }

    let fingers = FingerVector::new(states);
    Ok(FingerReading {
        fingers,
        confidence: FingerConfidence::from_vector(&fingers),
    })
}
