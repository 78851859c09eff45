//! Safety monitoring
//!
//! Detects conditions under which hand detections cannot be trusted.

pub mod overload;

pub use overload::{OverloadGuard, OverloadStatus};
