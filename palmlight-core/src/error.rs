//! Frame pipeline error taxonomy

/// Conditions that interrupt normal processing of a frame
///
/// Only [`PipelineError::MalformedInput`] is a contract violation. The
/// others are ordinary inputs that route the frame to the forced-off path
/// or degrade the actuator to a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PipelineError {
    /// The pose model reported no hand
    NoHandDetected,
    /// Lighting overload; detections for this frame are untrusted
    OverloadDetected,
    /// The outbound link is not open
    ChannelUnavailable,
    /// Input violated a shape contract; the frame is discarded
    MalformedInput(MalformedInput),
}

/// Shape violations detected in frame input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MalformedInput {
    /// Landmark list does not hold exactly 21 points
    LandmarkCount(usize),
    /// Landmark lookup outside the 21-point index scheme
    LandmarkIndex(usize),
    /// Finger vector does not hold exactly five digits
    DigitCount(usize),
}

impl From<MalformedInput> for PipelineError {
    fn from(e: MalformedInput) -> Self {
        PipelineError::MalformedInput(e)
    }
}

impl PipelineError {
    /// Check if this error should be handled as a lost hand
    pub fn is_hand_loss(&self) -> bool {
        matches!(
            self,
            PipelineError::NoHandDetected | PipelineError::OverloadDetected
        )
    }
}

impl core::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PipelineError::NoHandDetected => f.write_str("no hand detected"),
            PipelineError::OverloadDetected => f.write_str("lighting overload"),
            PipelineError::ChannelUnavailable => f.write_str("outbound channel unavailable"),
            PipelineError::MalformedInput(MalformedInput::LandmarkCount(n)) => {
                write!(f, "expected 21 landmarks, got {}", n)
            }
            PipelineError::MalformedInput(MalformedInput::LandmarkIndex(i)) => {
                write!(f, "landmark index {} out of range", i)
            }
            PipelineError::MalformedInput(MalformedInput::DigitCount(n)) => {
                write!(f, "expected 5 digits, got {}", n)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hand_loss_errors() {
        assert!(PipelineError::NoHandDetected.is_hand_loss());
        assert!(PipelineError::OverloadDetected.is_hand_loss());
        assert!(!PipelineError::ChannelUnavailable.is_hand_loss());
        assert!(!PipelineError::from(MalformedInput::DigitCount(4)).is_hand_loss());
    }
}
