//! Output state machine
//!
//! Tracks what the actuator is conceptually doing. The voter drives it;
//! nothing in the decision rules reads it back, so it exists for
//! observation and logging.

pub mod events;
pub mod machine;

pub use events::{Event, LossCause, OffReason};
pub use machine::VoterState;
