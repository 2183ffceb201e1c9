//! Typed records for recognized wind instrument sentences

mod transducer;
mod wind;

pub use transducer::{TransducerKind, TransducerReading, TransducerReport};
pub use wind::{Reference, Status, WindReport};

pub(crate) use transducer::TransducerAccumulator;

/// Sentence family, determined from the identifier term.
///
/// The identifier is five characters: a two-character talker prefix
/// followed by a three-character formatter. Recognition matches on the
/// formatter only, so `WIMWV`, `IIMWV` and friends all decode the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentenceType {
    /// MWV - wind angle and speed report
    Wind,
    /// XDR - generic transducer measurement report
    Transducer,
}

impl SentenceType {
    /// Recognize an identifier term. Unknown formatters return `None`.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        let formatter = identifier.get(identifier.len().checked_sub(3)?..)?;
        match formatter {
            "MWV" => Some(SentenceType::Wind),
            "XDR" => Some(SentenceType::Transducer),
            _ => None,
        }
    }
}

/// One complete, checksum-validated sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum Sentence {
    Wind(WindReport),
    Transducer(TransducerReport),
}
