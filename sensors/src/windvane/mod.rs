//! Wind vane backends.
//!
//! A wind vane backend owns one physical sensor connection and exposes the
//! latest wind measurement to the navigation layer. The backend set is
//! fixed at build time; [`WindVaneKind`] selects one at configuration
//! time. Update entry points are called by the scheduler and must never
//! block: they drain whatever bytes have arrived and return the current
//! best estimate.

mod nmea;

pub use nmea::NmeaWindVane;

use crate::byte_source::ByteSource;
use crate::SensorError;

/// Capability contract every wind vane backend satisfies.
pub trait WindVaneBackend {
    /// One-time setup after construction.
    fn init(&mut self) -> Result<(), SensorError>;

    /// Latest wind direction in degrees. Drains pending input first.
    fn update_direction(&mut self) -> f32;

    /// Latest wind speed in meters/second. Drains pending input first.
    fn update_speed(&mut self) -> f32;
}

/// Backend selection, decided by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindVaneKind {
    /// Serial NMEA 0183 wind instrument (MWV/XDR sentences)
    Nmea,
}

impl WindVaneKind {
    /// Construct the selected backend over a byte source.
    pub fn build<S: ByteSource + 'static>(self, source: S) -> Box<dyn WindVaneBackend> {
        match self {
            WindVaneKind::Nmea => Box::new(NmeaWindVane::new(source)),
        }
    }
}
