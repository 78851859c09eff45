//! Validated 21-point hand landmark set

pub use palmlight_protocol::Landmark;
use palmlight_protocol::LANDMARK_COUNT;

use crate::error::MalformedInput;

/// One hand's landmarks in the pose model's fixed index scheme
///
/// Index 0 is the wrist; each digit then contributes four points from
/// base to tip (thumb 1-4, index 5-8, middle 9-12, ring 13-16, pinky 17-20).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// Wrap a full landmark array
    pub const fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Validate a landmark slice of unknown length
    pub fn from_points(points: &[Landmark]) -> Result<Self, MalformedInput> {
        let points: [Landmark; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| MalformedInput::LandmarkCount(points.len()))?;
        Ok(Self { points })
    }

    /// Get a landmark by index
    pub fn point(&self, index: usize) -> Result<Landmark, MalformedInput> {
        self.points
            .get(index)
            .copied()
            .ok_or(MalformedInput::LandmarkIndex(index))
    }

    /// All landmarks in index order
    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }
}
