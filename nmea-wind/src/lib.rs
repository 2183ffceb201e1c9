//! NMEA 0183 wind instrument protocol parsing
//!
//! This crate provides the streaming sentence decoder and typed records
//! for the two sentence families emitted by masthead wind transducers:
//! MWV (wind angle and speed) and XDR (generic transducer measurements).

mod checksum;
mod decoder;
pub mod sentences;
mod units;

pub use checksum::{compute_checksum, frame_sentence, verify_sentence};
pub use decoder::{DecoderStats, SentenceDecoder, TERM_CAPACITY};
pub use sentences::{
    Reference, Sentence, SentenceType, Status, TransducerKind, TransducerReading,
    TransducerReport, WindReport,
};
pub use units::{SpeedUnits, KMH_TO_MPS, KNOTS_TO_MPS};
