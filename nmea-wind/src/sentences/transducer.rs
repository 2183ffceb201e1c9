//! XDR generic transducer measurement report
//!
//! ```text
//!        1 2   3 4            n
//!        | |   | |            |
//! $--XDR,a,x.x,a,c--c, ..... *hh<CR><LF>
//!
//! 1: Transducer type, P = pressure, C = temperature, A = angle
//! 2: Measurement value
//! 3: Units of measurement (recorded verbatim, e.g. C = Celsius, B = bars)
//! 4: Transducer name (ignored)
//! ```
//!
//! The four-term group may repeat within one sentence. Each recognized
//! type owns a fixed slot of the report, so consecutive groups land in
//! distinct slots without cross-contamination.

/// Transducer type code from the first term of each group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransducerKind {
    /// `P` - pressure
    Pressure,
    /// `C` - temperature
    Temperature,
    /// `A` - angle
    Angle,
}

impl TransducerKind {
    fn from_code(code: char) -> Option<Self> {
        match code {
            'P' => Some(TransducerKind::Pressure),
            'C' => Some(TransducerKind::Temperature),
            'A' => Some(TransducerKind::Angle),
            _ => None,
        }
    }

    /// Reading array slot owned by this transducer type.
    pub fn slot(self) -> usize {
        match self {
            TransducerKind::Pressure => 0,
            TransducerKind::Temperature => 1,
            TransducerKind::Angle => 2,
        }
    }
}

/// One measurement group from an XDR sentence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransducerReading {
    pub kind: TransducerKind,
    /// Measurement value in the unit reported by the instrument
    pub value: f32,
    /// Units code, recorded but not converted (Celsius passthrough for
    /// temperature)
    pub units: Option<char>,
}

/// A decoded XDR sentence: up to one reading per transducer type.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TransducerReport {
    /// Readings indexed by [`TransducerKind::slot`]
    pub readings: [Option<TransducerReading>; 3],
}

impl TransducerReport {
    /// The reading for a given transducer type, if the sentence carried one.
    pub fn reading(&self, kind: TransducerKind) -> Option<TransducerReading> {
        self.readings[kind.slot()]
    }
}

/// Incremental term interpreter for an XDR sentence in flight.
///
/// Tracks the repeating-group cursor separately from the flat term number
/// so a malformed group cannot bleed into its neighbors.
#[derive(Debug, Default)]
pub(crate) struct TransducerAccumulator {
    report: TransducerReport,
    group_kind: Option<TransducerKind>,
    group_stored: bool,
}

impl TransducerAccumulator {
    pub(crate) fn apply_term(&mut self, term_number: u8, text: &str) {
        let Some(offset) = (term_number as usize).checked_sub(1) else {
            return;
        };
        match offset % 4 {
            // Type code opens a group
            0 => {
                self.group_kind = text.chars().next().and_then(TransducerKind::from_code);
                self.group_stored = false;
            }
            // Measurement value; a parse failure skips the group's reading
            1 => {
                if let (Some(kind), Ok(value)) = (self.group_kind, text.parse::<f32>()) {
                    self.report.readings[kind.slot()] = Some(TransducerReading {
                        kind,
                        value,
                        units: None,
                    });
                    self.group_stored = true;
                }
            }
            // Units attach to the reading stored by this group only
            2 => {
                if let Some(kind) = self.group_kind {
                    if self.group_stored {
                        if let Some(reading) = self.report.readings[kind.slot()].as_mut() {
                            reading.units = text.chars().next();
                        }
                    }
                }
            }
            // Name term closes the group
            _ => {
                self.group_kind = None;
                self.group_stored = false;
            }
        }
    }

    pub(crate) fn finish(self) -> TransducerReport {
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn report_from_terms(terms: &[&str]) -> TransducerReport {
        let mut acc = TransducerAccumulator::default();
        for (i, term) in terms.iter().enumerate() {
            acc.apply_term(i as u8 + 1, term);
        }
        acc.finish()
    }

    #[test]
    fn test_single_group() {
        let report = report_from_terms(&["C", "19.5", "C", "TEMP"]);
        let reading = report.reading(TransducerKind::Temperature).unwrap();
        assert_relative_eq!(reading.value, 19.5);
        assert_eq!(reading.units, Some('C'));
        assert_eq!(report.reading(TransducerKind::Pressure), None);
    }

    #[test]
    fn test_two_groups_fill_distinct_slots() {
        let report = report_from_terms(&["C", "19.5", "C", "TEMP", "P", "1.013", "B", "BARO"]);
        let temp = report.reading(TransducerKind::Temperature).unwrap();
        let pressure = report.reading(TransducerKind::Pressure).unwrap();
        assert_relative_eq!(temp.value, 19.5);
        assert_relative_eq!(pressure.value, 1.013);
        assert_eq!(pressure.units, Some('B'));
    }

    #[test]
    fn test_malformed_value_skips_group() {
        let report = report_from_terms(&["C", "xx.q", "C", "TEMP", "P", "1.013", "B", "BARO"]);
        assert_eq!(report.reading(TransducerKind::Temperature), None);
        assert!(report.reading(TransducerKind::Pressure).is_some());
    }

    #[test]
    fn test_malformed_value_units_do_not_attach_to_earlier_group() {
        // Two temperature groups; the second one's value fails to parse,
        // so its units term must not rewrite the first group's units.
        let report = report_from_terms(&["C", "19.5", "C", "TEMP", "C", "bad", "K", "TEMP2"]);
        let reading = report.reading(TransducerKind::Temperature).unwrap();
        assert_relative_eq!(reading.value, 19.5);
        assert_eq!(reading.units, Some('C'));
    }

    #[test]
    fn test_unknown_kind_ignored() {
        let report = report_from_terms(&["Z", "5.0", "V", "MYST", "A", "1.5", "D", "VANE"]);
        assert_eq!(report.readings.iter().flatten().count(), 1);
        let angle = report.reading(TransducerKind::Angle).unwrap();
        assert_relative_eq!(angle.value, 1.5);
    }
}
