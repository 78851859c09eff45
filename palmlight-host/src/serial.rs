//! Serial link to the LED driver board

use std::io::{self, Write};
use std::thread;

use palmlight_core::PipelineError;
use palmlight_hal::{DataBits, LineTx, Parity, StopBits};
use serialport::SerialPort;
use tracing::{info, warn};

use crate::config::SerialConfig;

/// Serial port that may be absent
///
/// When the port could not be opened the link stays disconnected and the
/// drain flow discards commands instead of failing.
pub struct SerialLink {
    port: Option<Box<dyn SerialPort>>,
}

impl SerialLink {
    /// Open the configured port and wait for the board to settle
    ///
    /// Failure to open is logged once and yields a disconnected link.
    pub fn open(config: &SerialConfig) -> Self {
        let uart = config.uart();
        let result = serialport::new(config.port.as_str(), uart.baudrate)
            .data_bits(match uart.data_bits {
                DataBits::Seven => serialport::DataBits::Seven,
                DataBits::Eight => serialport::DataBits::Eight,
            })
            .parity(match uart.parity {
                Parity::None => serialport::Parity::None,
                Parity::Even => serialport::Parity::Even,
                Parity::Odd => serialport::Parity::Odd,
            })
            .stop_bits(match uart.stop_bits {
                StopBits::One => serialport::StopBits::One,
                StopBits::Two => serialport::StopBits::Two,
            })
            .timeout(config.timeout())
            .open();

        match result {
            Ok(port) => {
                info!(port = %config.port, baudrate = uart.baudrate, "serial link open");
                // Opening the port resets the board
                thread::sleep(config.settle());
                Self { port: Some(port) }
            }
            Err(err) => {
                warn!(
                    port = %config.port,
                    error = %err,
                    "{}, commands will be discarded",
                    PipelineError::ChannelUnavailable
                );
                Self::disconnected()
            }
        }
    }

    pub fn disconnected() -> Self {
        Self { port: None }
    }
}

impl LineTx for SerialLink {
    type Error = io::Error;

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        match self.port.as_mut() {
            Some(port) => port.write_all(data),
            None => Err(io::ErrorKind::NotConnected.into()),
        }
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        match self.port.as_mut() {
            Some(port) => port.flush(),
            None => Err(io::ErrorKind::NotConnected.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_link_rejects_writes() {
        let mut link = SerialLink::disconnected();
        assert!(!link.is_connected());

        let err = link.write_line(b"ALL_ON\n").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotConnected);
    }

    #[test]
    fn test_missing_port_yields_disconnected_link() {
        let config = SerialConfig {
            port: String::from("/dev/palmlight-does-not-exist"),
            settle_ms: 0,
            ..SerialConfig::default()
        };
        assert!(!SerialLink::open(&config).is_connected());
    }
}
