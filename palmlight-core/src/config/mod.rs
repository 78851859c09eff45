//! Configuration types
//!
//! Tuning knobs for the voter, the overload guard and the drain flow.
//! Buffer capacities are compile-time constants and not configurable.

pub mod types;

pub use types::*;
