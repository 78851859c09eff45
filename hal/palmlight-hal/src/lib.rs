//! Palmlight Hardware Abstraction Layer
//!
//! This crate defines the link traits the gesture controller writes
//! commands through. The host binary implements them over a serial port;
//! tests implement them with in-memory recorders.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (palmlight-host)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  palmlight-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  serial port  │       │  test mocks   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::LineTx`] - Line-oriented serial transmit with a connectivity flag

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{DataBits, LineTx, Parity, StopBits, UartConfig};
