//! Hand landmark handling
//!
//! Converts one frame's pose landmarks into per-digit up/down states.

pub mod fingers;
pub mod landmarks;

pub use fingers::{
    extract_fingers, Digit, Edge, FingerConfidence, FingerReading, FingerVector, CONFIDENCE_DOWN,
    CONFIDENCE_UP,
};
pub use landmarks::{HandLandmarks, Landmark};
