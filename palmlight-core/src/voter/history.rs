//! Bounded gesture label history

use heapless::Deque;

use crate::config::HISTORY_CAPACITY;
use crate::gesture::GestureLabel;

/// Result of counting the history window
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vote {
    /// Most frequent label
    pub label: GestureLabel,
    /// Occurrences of `label`
    pub count: usize,
    /// Window length at the time of the count
    pub window: usize,
}

impl Vote {
    /// Fraction of the window held by the leader
    pub fn share(&self) -> f32 {
        if self.window == 0 {
            return 0.0;
        }
        self.count as f32 / self.window as f32
    }
}

/// Most recent per-frame labels, oldest first
///
/// Once full, pushing drops the oldest label.
#[derive(Debug, Clone, Default)]
pub struct GestureHistory {
    labels: Deque<GestureLabel, HISTORY_CAPACITY>,
}

impl GestureHistory {
    pub fn new() -> Self {
        Self {
            labels: Deque::new(),
        }
    }

    /// Append a label, evicting the oldest when full
    pub fn push(&mut self, label: GestureLabel) {
        if self.labels.is_full() {
            self.labels.pop_front();
        }
        let _ = self.labels.push_back(label);
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Labels oldest first
    pub fn iter(&self) -> impl Iterator<Item = &GestureLabel> {
        self.labels.iter()
    }

    /// Count the window and return the most frequent label
    ///
    /// Ties go to the label that appears first in the window.
    pub fn leader(&self) -> Option<Vote> {
        let mut counts = [0usize; GestureLabel::COUNT];
        for label in self.labels.iter() {
            counts[label.index()] += 1;
        }

        let mut best: Option<Vote> = None;
        for &label in self.labels.iter() {
            let count = counts[label.index()];
            match best {
                Some(vote) if vote.count >= count => {}
                _ => {
                    best = Some(Vote {
                        label,
                        count,
                        window: self.labels.len(),
                    })
                }
            }
        }
        best
    }
}
