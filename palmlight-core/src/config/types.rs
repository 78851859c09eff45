//! Configuration type definitions
//!
//! These types are deserialized from the host's TOML file when the `serde`
//! feature is enabled. Every field has a default, so a partial file only
//! overrides what it names.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gesture history capacity (frames)
pub const HISTORY_CAPACITY: usize = 15;

/// Brightness samples retained by the overload guard
pub const BRIGHTNESS_WINDOW: usize = 10;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `min_samples` is zero or exceeds the history capacity
    MinSamplesOutOfRange,
    /// `stability_ratio` is not in (0.0, 1.0]
    StabilityRatioOutOfRange,
    /// `recent_samples` is zero or exceeds the brightness window
    RecentSamplesOutOfRange,
    /// `threshold` is not within the 0-255 luminance scale
    ThresholdOutOfRange,
    /// A drain interval is zero
    ZeroInterval,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::MinSamplesOutOfRange => {
                write!(f, "min_samples must be in 1..={}", HISTORY_CAPACITY)
            }
            ConfigError::StabilityRatioOutOfRange => {
                f.write_str("stability_ratio must be in (0.0, 1.0]")
            }
            ConfigError::RecentSamplesOutOfRange => {
                write!(f, "recent_samples must be in 1..={}", BRIGHTNESS_WINDOW)
            }
            ConfigError::ThresholdOutOfRange => f.write_str("threshold must be in 0.0..=255.0"),
            ConfigError::ZeroInterval => f.write_str("drain intervals must be non-zero"),
        }
    }
}

/// Stability voter tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VoterConfig {
    /// Samples required in the history before any vote
    pub min_samples: u8,
    /// Share of the window the leading label must hold
    pub stability_ratio: f32,
}

impl Default for VoterConfig {
    fn default() -> Self {
        Self {
            min_samples: 3,
            stability_ratio: 0.5,
        }
    }
}

impl VoterConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_samples == 0 || self.min_samples as usize > HISTORY_CAPACITY {
            return Err(ConfigError::MinSamplesOutOfRange);
        }
        if !(self.stability_ratio > 0.0 && self.stability_ratio <= 1.0) {
            return Err(ConfigError::StabilityRatioOutOfRange);
        }
        Ok(())
    }
}

/// Lighting overload detection tuning
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverloadConfig {
    /// Mean luminance above which the frame is overloaded (0-255)
    pub threshold: f32,
    /// Number of most recent samples averaged
    pub recent_samples: u8,
}

impl Default for OverloadConfig {
    fn default() -> Self {
        Self {
            threshold: 180.0,
            recent_samples: 5,
        }
    }
}

impl OverloadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recent_samples == 0 || self.recent_samples as usize > BRIGHTNESS_WINDOW {
            return Err(ConfigError::RecentSamplesOutOfRange);
        }
        if !(0.0..=255.0).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange);
        }
        Ok(())
    }
}

/// Drain flow pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Pause after each written command, for the driver to keep up
    pub write_delay_ms: u32,
    /// Queue poll interval while idle
    pub poll_interval_ms: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            write_delay_ms: 100,
            poll_interval_ms: 20,
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.write_delay_ms == 0 || self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }
}

/// Complete control configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlConfig {
    pub voter: VoterConfig,
    pub overload: OverloadConfig,
    pub dispatch: DispatchConfig,
}

impl ControlConfig {
    /// Validate every section
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.voter.validate()?;
        self.overload.validate()?;
        self.dispatch.validate()
    }
}
