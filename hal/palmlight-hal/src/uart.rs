//! UART serial communication abstractions
//!
//! The actuator accepts newline-terminated ASCII commands. The transmitter
//! trait is blocking because only the dedicated drain flow ever calls it.

/// Line-oriented UART transmitter
pub trait LineTx {
    /// Error type for transmit operations
    type Error;

    /// Whether the underlying link is open
    ///
    /// A disconnected link accepts no writes; callers drop their data
    /// instead of waiting for a reconnect.
    fn is_connected(&self) -> bool;

    /// Write raw bytes to the link
    ///
    /// Blocks until all data has been written or the link's own I/O
    /// timeout expires.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Write one line and flush it
    ///
    /// `line` must already carry its terminator.
    fn write_line(&mut self, line: &[u8]) -> Result<(), Self::Error> {
        self.write_blocking(line)?;
        self.flush()
    }
}

/// Line settings for the LED board link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Bits per second; the board firmware expects 115200
    pub baudrate: u32,
    /// Data bits per character
    pub data_bits: DataBits,
    /// Parity bit, if any
    pub parity: Parity,
    /// Stop bits per character
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115200,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Default framing at the given baud rate
    pub fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            ..Self::default()
        }
    }
}

/// Character width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity checking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Stop bit count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingTx {
        written: [u8; 16],
        len: usize,
        flushes: u8,
    }

    impl LineTx for RecordingTx {
        type Error = ();

        fn is_connected(&self) -> bool {
            true
        }

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            let end = self.len + data.len();
            if end > self.written.len() {
                return Err(());
            }
            self.written[self.len..end].copy_from_slice(data);
            self.len = end;
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_write_line_flushes() {
        let mut tx = RecordingTx {
            written: [0; 16],
            len: 0,
            flushes: 0,
        };
        tx.write_line(b"BLINK\n").unwrap();

        assert_eq!(&tx.written[..tx.len], b"BLINK\n");
        assert_eq!(tx.flushes, 1);
    }

    #[test]
    fn test_write_error_skips_flush() {
        let mut tx = RecordingTx {
            written: [0; 16],
            len: 0,
            flushes: 0,
        };
        assert!(tx.write_line(b"A_VERY_LONG_COMMAND\n").is_err());
        assert_eq!(tx.flushes, 0);
    }

    #[test]
    fn test_default_config() {
        let config = UartConfig::default();
        assert_eq!(config.baudrate, 115200);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);

        assert_eq!(UartConfig::with_baudrate(9600).baudrate, 9600);
    }
}
