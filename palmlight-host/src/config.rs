//! Configuration loading
//!
//! Reads the host configuration from a TOML file, or falls back to the
//! defaults compiled into the binary.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use palmlight_core::config::ControlConfig;
use palmlight_hal::UartConfig;
use serde::Deserialize;

/// Embedded default configuration
/// Edit palmlight.toml and rebuild to change the defaults
pub const EMBEDDED_CONFIG: &str = include_str!("../palmlight.toml");

/// Serial link settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Device path or port name
    pub port: String,
    pub baudrate: u32,
    /// Per-write I/O timeout
    pub timeout_ms: u64,
    /// Wait after opening the port before the first write
    pub settle_ms: u64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: String::from("/dev/ttyUSB0"),
            baudrate: 115200,
            timeout_ms: 100,
            settle_ms: 2000,
        }
    }
}

impl SerialConfig {
    /// Line settings (8N1 at the configured rate)
    pub fn uart(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

/// Complete host configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub serial: SerialConfig,
    pub control: ControlConfig,
}

impl HostConfig {
    /// Load from `path`, or from the embedded defaults when None
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                Self::parse(&text).with_context(|| format!("in config {}", path.display()))
            }
            None => Self::parse(EMBEDDED_CONFIG).context("in embedded config"),
        }
    }

    /// Parse and validate TOML text
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.serial.port.is_empty() {
            bail!("serial.port must not be empty");
        }
        if self.serial.baudrate == 0 {
            bail!("serial.baudrate must be non-zero");
        }
        self.control
            .validate()
            .map_err(|err| anyhow!("invalid control settings: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = HostConfig::load(None).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = HostConfig::parse(
            r#"
            [serial]
            port = "COM5"

            [control.voter]
            min_samples = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.serial.port, "COM5");
        assert_eq!(config.serial.baudrate, 115200);
        assert_eq!(config.serial.settle(), Duration::from_secs(2));
        assert_eq!(config.control.voter.min_samples, 5);
        assert_eq!(config.control.voter.stability_ratio, 0.5);
        assert_eq!(config.control.overload.threshold, 180.0);
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(HostConfig::parse("").unwrap(), HostConfig::default());
    }

    #[test]
    fn test_invalid_control_rejected() {
        let result = HostConfig::parse(
            r#"
            [control.overload]
            recent_samples = 11
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_baudrate_rejected() {
        let result = HostConfig::parse(
            r#"
            [serial]
            baudrate = 0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(HostConfig::parse("[serial\nport = ").is_err());
    }

    #[test]
    fn test_uart_settings() {
        let serial = SerialConfig {
            baudrate: 9600,
            ..SerialConfig::default()
        };
        assert_eq!(serial.uart().baudrate, 9600);
        assert_eq!(serial.timeout(), Duration::from_millis(100));
    }

    proptest! {
        #[test]
        fn prop_voter_settings_parse(min_samples in 0u8..=30, percent in 1u32..=150) {
            let ratio = percent as f64 / 100.0;
            let text = format!(
                "[control.voter]\nmin_samples = {min_samples}\nstability_ratio = {ratio:?}\n"
            );

            let valid = (1..=15).contains(&min_samples) && ratio <= 1.0;
            match HostConfig::parse(&text) {
                Ok(config) => {
                    prop_assert!(valid);
                    prop_assert_eq!(config.control.voter.min_samples, min_samples);
                    prop_assert_eq!(config.control.voter.stability_ratio, ratio as f32);
                }
                Err(_) => prop_assert!(!valid),
            }
        }
    }
}
