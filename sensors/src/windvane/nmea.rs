//! NMEA 0183 wind instrument backend.
//!
//! Wraps a [`SentenceDecoder`] around a byte source and folds accepted
//! sentences into the latest measurement state. All state is owned by one
//! backend instance per connection and touched only from the scheduler's
//! execution context, so no synchronization is needed.

use nmea_wind::{DecoderStats, Sentence, SentenceDecoder, TransducerKind};
use tracing::{debug, trace};

use super::WindVaneBackend;
use crate::byte_source::ByteSource;
use crate::SensorError;

/// Wind vane backend decoding MWV/XDR sentences from a serial stream.
///
/// Measurements start at zero and are overwritten in place by each
/// accepted sentence of the matching type; stale values persist until the
/// next good sentence arrives. Wind reports the instrument flags invalid,
/// and fields that failed to parse, leave state untouched.
pub struct NmeaWindVane<S> {
    source: S,
    decoder: SentenceDecoder,
    direction_deg: f32,
    speed_mps: f32,
    transducer_readings: [f32; 3],
}

impl<S: ByteSource> NmeaWindVane<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            decoder: SentenceDecoder::new(),
            direction_deg: 0.0,
            speed_mps: 0.0,
            transducer_readings: [0.0; 3],
        }
    }

    /// Latest reading reported for a transducer type, in the instrument's
    /// unit (Celsius passthrough for temperature).
    pub fn transducer_reading(&self, kind: TransducerKind) -> f32 {
        self.transducer_readings[kind.slot()]
    }

    /// Decoder drop counters for this connection.
    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    /// Consume everything the connection has buffered. Bounded by what has
    /// already arrived; never waits for more.
    fn drain(&mut self) {
        while let Some(byte) = self.source.next_byte() {
            if let Some(sentence) = self.decoder.feed(byte) {
                self.apply(sentence);
            }
        }
    }

    fn apply(&mut self, sentence: Sentence) {
        match sentence {
            Sentence::Wind(report) => {
                if !report.is_valid() {
                    trace!("wind report flagged invalid, measurement unchanged");
                    return;
                }
                if let Some(angle) = report.angle_deg {
                    self.direction_deg = angle;
                }
                if let Some(speed) = report.speed_mps() {
                    self.speed_mps = speed;
                }
            }
            Sentence::Transducer(report) => {
                for reading in report.readings.iter().flatten() {
                    self.transducer_readings[reading.kind.slot()] = reading.value;
                }
            }
        }
    }
}

impl<S: ByteSource> WindVaneBackend for NmeaWindVane<S> {
    fn init(&mut self) -> Result<(), SensorError> {
        debug!("NMEA wind vane backend ready");
        Ok(())
    }

    fn update_direction(&mut self) -> f32 {
        self.drain();
        self.direction_deg
    }

    fn update_speed(&mut self) -> f32 {
        self.drain();
        self.speed_mps
    }
}
