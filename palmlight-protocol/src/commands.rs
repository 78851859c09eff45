//! Actuator command vocabulary
//!
//! The LED driver reads one ASCII command per line. The firmware executes
//! the animation; this side only decides which name to send and when.

/// Longest encoded line, terminator included
pub const MAX_LINE_LEN: usize = 16;

/// Line terminator expected by the driver firmware
pub const LINE_TERMINATOR: u8 = b'\n';

/// Errors that can occur while encoding or parsing a command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Buffer too small for the encoded line
    BufferTooSmall,
    /// Line does not name a known command
    UnknownCommand,
}

/// Commands accepted by the LED driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// All LEDs on
    AllOn,
    /// All LEDs off
    AllOff,
    /// Blink all LEDs
    Blink,
    /// Running light
    Chase,
    /// Breathing fade in and out
    Breathe,
    /// Colour cycle
    Rainbow,
    /// Wave across the strip
    Wave,
    /// Slow fade
    Fade,
    /// Fast strobe
    Strobe,
    /// Random twinkle
    Twinkle,
    /// Manual self-test pattern
    Test,
}

impl Command {
    /// Every command, in wire-table order
    pub const ALL: [Command; 11] = [
        Command::AllOn,
        Command::AllOff,
        Command::Blink,
        Command::Chase,
        Command::Breathe,
        Command::Rainbow,
        Command::Wave,
        Command::Fade,
        Command::Strobe,
        Command::Twinkle,
        Command::Test,
    ];

    /// Wire name of this command
    pub fn as_str(self) -> &'static str {
        match self {
            Command::AllOn => "ALL_ON",
            Command::AllOff => "ALL_OFF",
            Command::Blink => "BLINK",
            Command::Chase => "CHASE",
            Command::Breathe => "BREATHE",
            Command::Rainbow => "RAINBOW",
            Command::Wave => "WAVE",
            Command::Fade => "FADE",
            Command::Strobe => "STROBE",
            Command::Twinkle => "TWINKLE",
            Command::Test => "TEST",
        }
    }

    /// Parse a command from its wire name
    ///
    /// A trailing `\n` or `\r\n` is ignored. Names are case-sensitive.
    pub fn from_wire(line: &str) -> Result<Self, LineError> {
        let name = line.trim_end_matches(['\r', '\n']);
        Self::ALL
            .into_iter()
            .find(|command| command.as_str() == name)
            .ok_or(LineError::UnknownCommand)
    }

    /// Check if this command switches the actuator off
    pub fn is_off(self) -> bool {
        matches!(self, Command::AllOff)
    }

    /// Encode this command as a terminated line
    ///
    /// Returns the number of bytes written
    pub fn encode(self, buffer: &mut [u8]) -> Result<usize, LineError> {
        let name = self.as_str().as_bytes();
        let len = name.len() + 1;
        if buffer.len() < len {
            return Err(LineError::BufferTooSmall);
        }

        buffer[..name.len()].copy_from_slice(name);
        buffer[name.len()] = LINE_TERMINATOR;
        Ok(len)
    }
}

impl core::fmt::Display for Command {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
