//! Streaming sentence decoder
//!
//! Consumes a serial byte stream one byte at a time and produces complete,
//! checksum-validated sentence records. Framing follows NMEA 0183: `$`
//! starts a sentence, `,` separates terms, `*` introduces a two-hex-digit
//! checksum, CR/LF terminates.
//!
//! Terms are interpreted incrementally as they complete, so no
//! variable-length sentence buffer is needed; only the current term is
//! buffered, in a fixed-capacity buffer that drops overflowing characters.
//! The interpreted values accumulate in a pending record owned by the
//! decoder and are surrendered to the caller only once the trailing
//! checksum matches — a corrupted sentence can never partially leak into
//! measurement state.
//!
//! Nothing in the decode path is fatal: checksum mismatches, overlong
//! terms, malformed checksum hex, and unknown identifiers all degrade to
//! "drop the sentence and resynchronize on the next `$`". The statistics
//! counters record what was dropped.

use tracing::{debug, trace};

use crate::sentences::{Sentence, SentenceType, TransducerAccumulator, WindReport};

/// Capacity of the term buffer. Characters beyond this are dropped, and
/// the truncated term still goes through interpretation.
pub const TERM_CAPACITY: usize = 14;

/// Counters for sentences dropped on the decode path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecoderStats {
    /// Complete sentences that passed checksum validation
    pub accepted: u32,
    /// Sentences dropped for a checksum mismatch or malformed checksum
    pub checksum_failures: u32,
    /// Checksum-valid sentences with an identifier we do not decode
    pub unrecognized: u32,
}

/// Bounded buffer for the term currently being assembled.
#[derive(Debug, Default)]
struct TermBuffer {
    buf: [u8; TERM_CAPACITY],
    len: usize,
}

impl TermBuffer {
    fn clear(&mut self) {
        self.len = 0;
    }

    fn push(&mut self, byte: u8) {
        if self.len < TERM_CAPACITY {
            self.buf[self.len] = byte;
            self.len += 1;
        }
        // overflow: drop, never grow
    }

    fn as_str(&self) -> &str {
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DecodeState {
    /// Waiting for a `$` start marker; also the recovery state
    #[default]
    WaitStart,
    /// Accumulating an ordinary term
    InField,
    /// Accumulating the two-hex-digit checksum
    InChecksum,
}

/// Interpretation in flight for the sentence being assembled.
#[derive(Debug)]
enum Pending {
    Wind(WindReport),
    Transducer(TransducerAccumulator),
}

/// Byte-at-a-time sentence decoder for one serial connection.
#[derive(Debug, Default)]
pub struct SentenceDecoder {
    state: DecodeState,
    term: TermBuffer,
    term_number: u8,
    /// Running XOR of the sentence body (after `$`, before `*`)
    checksum: u8,
    checksum_value: u8,
    checksum_digits: u8,
    checksum_malformed: bool,
    pending: Option<Pending>,
    unknown_identifier: bool,
    stats: DecoderStats,
}

impl SentenceDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters for sentences dropped so far.
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Consume one byte of the stream.
    ///
    /// Returns a completed sentence record when `byte` terminates a valid
    /// sentence; `None` otherwise. The result is independent of how the
    /// stream is chunked across calls.
    pub fn feed(&mut self, byte: u8) -> Option<Sentence> {
        match byte {
            // Start marker resynchronizes from any state
            b'$' => {
                self.begin_sentence();
                None
            }
            b'\r' | b'\n' => self.end_sentence(),
            b',' if self.state == DecodeState::InField => {
                self.checksum ^= byte;
                self.end_term();
                self.term_number = self.term_number.saturating_add(1);
                None
            }
            b'*' if self.state == DecodeState::InField => {
                self.end_term();
                self.state = DecodeState::InChecksum;
                None
            }
            byte => {
                match self.state {
                    DecodeState::WaitStart => {}
                    DecodeState::InField => {
                        self.checksum ^= byte;
                        self.term.push(byte);
                    }
                    DecodeState::InChecksum => self.accept_checksum_digit(byte),
                }
                None
            }
        }
    }

    fn begin_sentence(&mut self) {
        self.state = DecodeState::InField;
        self.term.clear();
        self.term_number = 0;
        self.checksum = 0;
        self.checksum_value = 0;
        self.checksum_digits = 0;
        self.checksum_malformed = false;
        self.pending = None;
        self.unknown_identifier = false;
    }

    /// Finalize the current term: recognize the identifier on term 0,
    /// otherwise dispatch into the pending record.
    fn end_term(&mut self) {
        let text = self.term.as_str();
        if self.term_number == 0 {
            self.pending = match SentenceType::from_identifier(text) {
                Some(SentenceType::Wind) => Some(Pending::Wind(WindReport::default())),
                Some(SentenceType::Transducer) => {
                    Some(Pending::Transducer(TransducerAccumulator::default()))
                }
                None => {
                    self.unknown_identifier = true;
                    None
                }
            };
        } else if let Some(pending) = self.pending.as_mut() {
            match pending {
                Pending::Wind(report) => report.apply_term(self.term_number, text),
                Pending::Transducer(acc) => acc.apply_term(self.term_number, text),
            }
        }
        self.term.clear();
    }

    fn accept_checksum_digit(&mut self, byte: u8) {
        match (byte as char).to_digit(16) {
            Some(digit) if self.checksum_digits < 2 => {
                self.checksum_value = self.checksum_value << 4 | digit as u8;
                self.checksum_digits += 1;
            }
            _ => self.checksum_malformed = true,
        }
    }

    fn end_sentence(&mut self) -> Option<Sentence> {
        let state = std::mem::replace(&mut self.state, DecodeState::WaitStart);
        let pending = self.pending.take();

        match state {
            // Terminator with no sentence in progress
            DecodeState::WaitStart => None,
            // Terminator before the checksum marker: incomplete frame
            DecodeState::InField => {
                trace!("sentence ended before checksum marker, dropped");
                None
            }
            DecodeState::InChecksum => {
                let checksum_ok = !self.checksum_malformed
                    && self.checksum_digits == 2
                    && self.checksum_value == self.checksum;
                if !checksum_ok {
                    self.stats.checksum_failures += 1;
                    debug!(
                        computed = self.checksum,
                        received = self.checksum_value,
                        "checksum mismatch, sentence dropped"
                    );
                    return None;
                }
                match pending {
                    Some(Pending::Wind(report)) => {
                        self.stats.accepted += 1;
                        trace!(?report, "accepted MWV sentence");
                        Some(Sentence::Wind(report))
                    }
                    Some(Pending::Transducer(acc)) => {
                        self.stats.accepted += 1;
                        let report = acc.finish();
                        trace!(?report, "accepted XDR sentence");
                        Some(Sentence::Transducer(report))
                    }
                    None => {
                        if self.unknown_identifier {
                            self.stats.unrecognized += 1;
                        }
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::frame_sentence;
    use crate::sentences::TransducerKind;
    use approx::assert_relative_eq;

    /// Feed a byte slice, returning every completed sentence.
    fn feed_all(decoder: &mut SentenceDecoder, bytes: &[u8]) -> Vec<Sentence> {
        bytes.iter().filter_map(|&b| decoder.feed(b)).collect()
    }

    fn decode_one(input: &[u8]) -> Option<Sentence> {
        let mut decoder = SentenceDecoder::new();
        feed_all(&mut decoder, input).pop()
    }

    #[test]
    fn test_decode_wind_sentence() {
        let Some(Sentence::Wind(report)) = decode_one(b"$WIMWV,045.0,R,10.0,N,A*13\r\n") else {
            panic!("expected a wind sentence");
        };
        assert_relative_eq!(report.angle_deg.unwrap(), 45.0);
        assert_relative_eq!(report.speed_mps().unwrap(), 5.14444, epsilon = 1e-5);
        assert!(report.is_valid());
    }

    #[test]
    fn test_decode_transducer_sentence() {
        let input = b"$WIXDR,C,19.5,C,TEMP,P,1.013,B,BARO*6E\r\n";
        let Some(Sentence::Transducer(report)) = decode_one(input) else {
            panic!("expected a transducer sentence");
        };
        let temp = report.reading(TransducerKind::Temperature).unwrap();
        assert_relative_eq!(temp.value, 19.5);
        assert_eq!(temp.units, Some('C'));
        assert_relative_eq!(report.reading(TransducerKind::Pressure).unwrap().value, 1.013);
    }

    #[test]
    fn test_checksum_mismatch_drops_sentence() {
        let mut decoder = SentenceDecoder::new();
        let sentences = feed_all(&mut decoder, b"$WIMWV,045.0,R,10.0,N,A*99\r\n");
        assert!(sentences.is_empty());
        assert_eq!(decoder.stats().checksum_failures, 1);
        assert_eq!(decoder.stats().accepted, 0);
    }

    #[test]
    fn test_resync_after_bad_sentence() {
        let mut decoder = SentenceDecoder::new();
        let mut input = Vec::new();
        input.extend_from_slice(b"$WIMWV,045.0,R,10.0,N,A*99\r\n"); // corrupt
        input.extend_from_slice(b"$WIMWV,036.0,R,7.2,K,A*26\r\n"); // good
        let sentences = feed_all(&mut decoder, &input);
        assert_eq!(sentences.len(), 1);
        let Sentence::Wind(report) = &sentences[0] else {
            panic!("expected a wind sentence");
        };
        assert_relative_eq!(report.angle_deg.unwrap(), 36.0);
        assert_eq!(decoder.stats().checksum_failures, 1);
        assert_eq!(decoder.stats().accepted, 1);
    }

    #[test]
    fn test_start_marker_resyncs_mid_sentence() {
        // A truncated sentence interrupted by a fresh start marker
        let mut decoder = SentenceDecoder::new();
        let mut input = Vec::new();
        input.extend_from_slice(b"$WIMWV,214.8,R,0.");
        input.extend_from_slice(b"$WIMWV,036.0,R,7.2,K,A*26\r\n");
        let sentences = feed_all(&mut decoder, &input);
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_chunking_invariance() {
        let input = b"$WIMWV,214.8,R,0.1,K,A*28\r\n$WIXDR,A,1.5,D,VANE*63\r\n";

        // Whole-buffer at once
        let mut one = SentenceDecoder::new();
        let all_at_once = feed_all(&mut one, input);

        // One byte per "drain"
        let mut two = SentenceDecoder::new();
        let mut byte_by_byte = Vec::new();
        for &b in input.iter() {
            byte_by_byte.extend(two.feed(b));
        }

        assert_eq!(all_at_once, byte_by_byte);
        assert_eq!(one.stats(), two.stats());
        assert_eq!(all_at_once.len(), 2);
    }

    #[test]
    fn test_overlong_term_is_truncated_not_fatal() {
        // Angle term is 19 characters; the buffer keeps the first 14 and
        // the rest of the sentence still decodes.
        let input = b"$WIMWV,00000000000000045.0,R,10.0,N,A*13\r\n";
        let Some(Sentence::Wind(report)) = decode_one(input) else {
            panic!("expected a wind sentence");
        };
        assert_relative_eq!(report.angle_deg.unwrap(), 0.0);
        assert_relative_eq!(report.speed_mps().unwrap(), 5.14444, epsilon = 1e-5);
    }

    #[test]
    fn test_unrecognized_identifier_is_consumed_silently() {
        let mut decoder = SentenceDecoder::new();
        let sentences = feed_all(&mut decoder, b"$GPZDA,160012.71,11,03,2004,-1,00*7D\r\n");
        assert!(sentences.is_empty());
        assert_eq!(decoder.stats().unrecognized, 1);
        assert_eq!(decoder.stats().checksum_failures, 0);

        // Decoder stays synchronized for the next sentence
        let sentences = feed_all(&mut decoder, b"$WIMWV,036.0,R,7.2,K,A*26\r\n");
        assert_eq!(sentences.len(), 1);
    }

    #[test]
    fn test_invalid_status_report_is_surfaced_as_invalid() {
        let Some(Sentence::Wind(report)) = decode_one(b"$WIMWV,120.0,R,5.0,M,V*31\r\n") else {
            panic!("expected a wind sentence");
        };
        assert!(!report.is_valid());
    }

    #[test]
    fn test_malformed_checksum_hex_drops_sentence() {
        let mut decoder = SentenceDecoder::new();
        assert!(feed_all(&mut decoder, b"$WIMWV,036.0,R,7.2,K,A*2G\r\n").is_empty());
        assert_eq!(decoder.stats().checksum_failures, 1);

        // Single hex digit is also malformed
        assert!(feed_all(&mut decoder, b"$WIMWV,036.0,R,7.2,K,A*2\r\n").is_empty());
        assert_eq!(decoder.stats().checksum_failures, 2);
    }

    #[test]
    fn test_terminator_without_sentence_is_noop() {
        let mut decoder = SentenceDecoder::new();
        assert!(feed_all(&mut decoder, b"\r\n\r\njunk\r\n").is_empty());
        assert_eq!(decoder.stats(), DecoderStats::default());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let framed = frame_sentence("WIMWV,045.0,R,10.0,N,A");
        let Some(Sentence::Wind(report)) = decode_one(framed.as_bytes()) else {
            panic!("expected a wind sentence");
        };
        assert_relative_eq!(report.angle_deg.unwrap(), 45.0);
        assert_relative_eq!(report.speed_mps().unwrap(), 10.0 * crate::units::KNOTS_TO_MPS);
    }

    #[test]
    fn test_empty_speed_term_leaves_field_unset() {
        let Some(Sentence::Wind(report)) = decode_one(b"$WIMWV,100.0,R,,N,A*0C\r\n") else {
            panic!("expected a wind sentence");
        };
        assert_relative_eq!(report.angle_deg.unwrap(), 100.0);
        assert_eq!(report.speed, None);
        assert_eq!(report.speed_mps(), None);
    }
}
