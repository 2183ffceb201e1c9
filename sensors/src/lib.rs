//! Sensor backend drivers for the autopilot.
//!
//! Each backend converts a raw hardware signal stream into calibrated
//! physical measurements read by the navigation layer. Backends are driven
//! synchronously by the autopilot scheduler (nominally ~20 Hz): every
//! update call drains whatever bytes have arrived and returns the latest
//! good measurement.
//!
//! # Features
//!
//! - `serial` - serialport-backed byte source for live instruments.
//!   Everything else is hardware-free and runs in CI.

pub mod byte_source;
mod error;
pub mod windvane;

pub use error::SensorError;
