//! Previous/current finger vectors for edge detection

use crate::hand::{Digit, Edge, FingerVector};

/// Last two finger vectors seen by the voter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FingerSnapshot {
    previous: FingerVector,
    current: FingerVector,
}

impl FingerSnapshot {
    /// Both vectors all-down
    pub const fn new() -> Self {
        Self {
            previous: FingerVector::ALL_DOWN,
            current: FingerVector::ALL_DOWN,
        }
    }

    /// Shift in this frame's vector
    pub fn advance(&mut self, fingers: FingerVector) {
        self.previous = self.current;
        self.current = fingers;
    }

    pub fn previous(&self) -> FingerVector {
        self.previous
    }

    pub fn current(&self) -> FingerVector {
        self.current
    }

    /// First digit released between the two frames
    pub fn released(&self) -> Option<Digit> {
        self.current.first_release_from(&self.previous)
    }

    /// Every digit that changed, in canonical order
    pub fn edges(&self) -> impl Iterator<Item = (Digit, Edge)> + '_ {
        Digit::ALL.into_iter().filter_map(move |digit| {
            self.current
                .edge_from(&self.previous, digit)
                .map(|edge| (digit, edge))
        })
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_starts_all_down() {
        let snapshot = FingerSnapshot::new();
        assert_eq!(snapshot.previous(), FingerVector::ALL_DOWN);
        assert_eq!(snapshot.current(), FingerVector::ALL_DOWN);
        assert_eq!(snapshot.edges().count(), 0);
    }

    #[test]
    fn test_rising_edges_are_not_releases() {
        let mut snapshot = FingerSnapshot::new();
        snapshot.advance(FingerVector::only(&[Digit::Index, Digit::Middle]));

        assert_eq!(snapshot.released(), None);
        let edges: Vec<_> = snapshot.edges().collect();
        assert_eq!(
            edges,
            [(Digit::Index, Edge::Rising), (Digit::Middle, Edge::Rising)]
        );
    }

    #[test]
    fn test_release_detected() {
        let mut snapshot = FingerSnapshot::new();
        snapshot.advance(FingerVector::only(&[Digit::Thumb, Digit::Pinky]));
        snapshot.advance(FingerVector::only(&[Digit::Thumb]));

        assert_eq!(snapshot.released(), Some(Digit::Pinky));
    }

    #[test]
    fn test_reset_forgets_history() {
        let mut snapshot = FingerSnapshot::new();
        snapshot.advance(FingerVector::ALL_UP);
        snapshot.reset();
        snapshot.advance(FingerVector::ALL_DOWN);

        assert_eq!(snapshot.released(), None);
    }
}
