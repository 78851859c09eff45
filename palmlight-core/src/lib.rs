//! Board-agnostic core logic for the Palmlight gesture controller
//!
//! This crate contains all decision logic that does not depend on the
//! camera, the pose model or the serial port:
//!
//! - Finger state extraction from hand landmarks
//! - Static gesture classification
//! - Lighting overload detection
//! - Stability voting with forced-off safety rules
//! - Command queue shared with the serial drain flow
//! - Tuning configuration types

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod gesture;
pub mod hand;
pub mod safety;
pub mod state;
pub mod voter;

pub use error::{MalformedInput, PipelineError};
