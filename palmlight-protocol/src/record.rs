//! Record encoding and decoding for the landmark stream.
//!
//! The pose sidecar writes one [`HostMessage`] per captured frame (or per
//! operator key press). Records are postcard-serialized and COBS-encoded;
//! the encoded form never contains a zero byte, so `0x00` terminates every
//! record and a reader can resynchronise after corruption by skipping to
//! the next delimiter.

use heapless::Vec;
use serde::{Deserialize, Serialize};

use crate::events::InputEvent;

/// Record delimiter byte
pub const RECORD_DELIMITER: u8 = 0x00;

/// Landmarks per hand in the pose model's index scheme
pub const LANDMARK_COUNT: usize = 21;

/// Capacity for landmark lists on the wire
///
/// Larger than [`LANDMARK_COUNT`] so that a malformed sample still decodes
/// and can be rejected by the consumer instead of failing the stream.
pub const MAX_LANDMARKS: usize = 32;

/// Capacity for pre-computed digit lists on the wire
pub const MAX_DIGITS: usize = 8;

/// Maximum encoded record size, delimiter excluded
pub const MAX_RECORD_SIZE: usize = 384;

/// Errors that can occur during record encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecordError {
    /// Buffer too small for encoding
    BufferTooSmall,
    /// Record exceeded [`MAX_RECORD_SIZE`] before its delimiter
    TooLong,
    /// Record bytes did not decode to a message
    Decode,
}

/// One normalized 2-D landmark
///
/// Coordinates are in image space: `x` grows to the right, `y` grows
/// downwards, both in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Hand observation carried by a frame record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandSample {
    /// Raw landmarks from the pose model
    Landmarks(Vec<Landmark, MAX_LANDMARKS>),
    /// Finger up/down states already computed by the sidecar
    /// (thumb, index, middle, ring, pinky)
    Digits(Vec<bool, MAX_DIGITS>),
}

/// Per-frame observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FrameRecord {
    /// Mean grey level of the frame (0.0 - 255.0)
    pub luminance: f32,
    /// Detected hand, or None if the pose model found none
    pub hand: Option<HandSample>,
}

/// Messages from the capture sidecar to the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostMessage {
    /// One processed camera frame
    Frame(FrameRecord),
    /// Operator key press
    Input(InputEvent),
}

impl HostMessage {
    /// Encode this message into a byte buffer, delimiter included
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, RecordError> {
        postcard::to_slice_cobs(self, buffer)
            .map(|encoded| encoded.len())
            .map_err(|_| RecordError::BufferTooSmall)
    }
}

/// Incremental decoder for the record stream
#[derive(Debug, Clone)]
pub struct RecordDecoder {
    buffer: Vec<u8, MAX_RECORD_SIZE>,
    /// Set when the current record overran the buffer; bytes are
    /// discarded until the next delimiter
    overflowed: bool,
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordDecoder {
    /// Create a new record decoder
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Reset the decoder state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a single byte to the decoder
    ///
    /// Returns `Ok(Some(message))` when a delimiter completes a valid record,
    /// `Ok(None)` when more bytes are needed, or `Err` when the completed
    /// record was oversized or undecodable. The decoder is ready for the
    /// next record after an error.
    pub fn feed(&mut self, byte: u8) -> Result<Option<HostMessage>, RecordError> {
        if byte != RECORD_DELIMITER {
            if !self.overflowed && self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return Ok(None);
        }

        if self.overflowed {
            self.reset();
            return Err(RecordError::TooLong);
        }

        // Back-to-back delimiters carry no record
        if self.buffer.is_empty() {
            return Ok(None);
        }

        let decoded = postcard::from_bytes_cobs::<HostMessage>(&mut self.buffer);
        self.reset();
        decoded.map(Some).map_err(|_| RecordError::Decode)
    }
}
