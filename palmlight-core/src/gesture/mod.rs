//! Static gesture classification
//!
//! Gestures are a pure function of which digits are extended. There is no
//! motion, timing or history at this layer.

pub mod classifier;

pub use classifier::{classify, GestureLabel};
