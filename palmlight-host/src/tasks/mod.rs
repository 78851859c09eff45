//! Background threads
//!
//! Each task runs independently and talks to the frame flow only through
//! the command queue.

pub mod serial_tx;

pub use serial_tx::{spawn_serial_tx, wait_for_drain};
