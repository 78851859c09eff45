//! Stability voting
//!
//! Debounces per-frame gesture labels into commands and enforces the
//! forced-off rules.

pub mod history;
pub mod snapshot;
pub mod stability;

pub use history::{GestureHistory, Vote};
pub use snapshot::FingerSnapshot;
pub use stability::{Decision, Observation, StabilityVoter};
