//! Palmlight Communication Protocol
//!
//! This crate defines both edges of the gesture controller:
//!
//! - **Outbound**: the ASCII command vocabulary understood by the LED driver
//!   firmware. Every command is a single newline-terminated line.
//! - **Inbound**: the record stream produced by the pose-estimation sidecar.
//!   Each record is postcard-serialized and COBS-framed, so a zero byte
//!   always marks a record boundary.
//!
//! # Record Stream
//!
//! ```text
//! ┌──────────────────────────────┬──────┐
//! │ COBS(postcard(HostMessage))  │ 0x00 │
//! │ 1–384B                       │ 1B   │
//! └──────────────────────────────┴──────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod commands;
pub mod events;
pub mod record;

pub use commands::{Command, LineError, MAX_LINE_LEN};
pub use events::InputEvent;
pub use record::{
    FrameRecord, HandSample, HostMessage, Landmark, RecordDecoder, RecordError, LANDMARK_COUNT,
    MAX_RECORD_SIZE, RECORD_DELIMITER,
};
