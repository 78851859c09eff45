//! Lighting overload guard
//!
//! Strong light washes out the hand and makes the pose model report
//! phantom finger states. The guard keeps a short window of frame
//! brightness and flags the frame when the recent average is too high.
//! The decision is recomputed from the window every frame; there is no
//! hysteresis between states.

use heapless::Deque;

use crate::config::{OverloadConfig, BRIGHTNESS_WINDOW};

/// Lighting condition of the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OverloadStatus {
    /// Detections can be trusted
    Normal,
    /// Recent mean brightness exceeded the threshold
    Overloaded { mean: f32 },
}

impl OverloadStatus {
    pub fn is_overloaded(&self) -> bool {
        matches!(self, OverloadStatus::Overloaded { .. })
    }
}

/// Rolling brightness monitor
#[derive(Debug, Clone)]
pub struct OverloadGuard {
    config: OverloadConfig,
    /// Oldest sample at the front
    samples: Deque<f32, BRIGHTNESS_WINDOW>,
}

impl Default for OverloadGuard {
    fn default() -> Self {
        Self::new(OverloadConfig::default())
    }
}

impl OverloadGuard {
    /// Create a new guard
    pub fn new(config: OverloadConfig) -> Self {
        Self {
            config,
            samples: Deque::new(),
        }
    }

    /// Record one frame's mean luminance and evaluate the window
    pub fn update(&mut self, luminance: f32) -> OverloadStatus {
        if self.samples.is_full() {
            self.samples.pop_front();
        }
        // Cannot fail: a slot was freed above
        let _ = self.samples.push_back(luminance);

        self.check()
    }

    /// Evaluate the current window without recording a sample
    pub fn check(&self) -> OverloadStatus {
        match self.recent_mean() {
            Some(mean) if mean > self.config.threshold => OverloadStatus::Overloaded { mean },
            _ => OverloadStatus::Normal,
        }
    }

    /// Mean of the most recent samples
    ///
    /// None until the window holds at least `recent_samples` entries.
    pub fn recent_mean(&self) -> Option<f32> {
        let recent = self.config.recent_samples as usize;
        let len = self.samples.len();
        if recent == 0 || len < recent {
            return None;
        }

        let sum: f32 = self.samples.iter().skip(len - recent).sum();
        Some(sum / recent as f32)
    }

    /// Number of samples currently held
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Drop all samples
    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
