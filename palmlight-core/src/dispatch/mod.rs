//! Outbound command queue
//!
//! The frame flow enqueues; a separate drain flow writes one command per
//! call to the LED link.

pub mod dispatcher;

pub use dispatcher::{CommandDispatcher, DrainOutcome};
