//! MWV wind angle and speed report
//!
//! ```text
//!        1   2 3   4 5
//!        |   | |   | |
//! $--MWV,x.x,a,x.x,a*hh<CR><LF>
//!
//! 1: Wind angle, 0 to 359 degrees
//! 2: Reference, R = relative, T = true
//! 3: Wind speed magnitude
//! 4: Wind speed units, K = km/h, M = m/s, N = knots
//! 5: Status, A = data valid, V = invalid
//! ```

use crate::units::SpeedUnits;

/// Wind angle reference frame from term 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// `R` - relative to the vessel bow
    Relative,
    /// `T` - true (compass referenced)
    True,
}

impl Reference {
    fn from_code(code: char) -> Option<Self> {
        match code {
            'R' => Some(Reference::Relative),
            'T' => Some(Reference::True),
            _ => None,
        }
    }
}

/// Instrument-reported validity from term 5.
///
/// Anything other than an explicit `A` is treated as invalid, including a
/// missing status term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    Valid,
    #[default]
    Invalid,
}

/// A decoded MWV sentence.
///
/// Fields whose terms were absent or unparseable stay `None`; consumers
/// apply only the fields that are present, so one bad term never clobbers
/// a previously good measurement.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindReport {
    /// Wind angle in degrees, 0-359
    pub angle_deg: Option<f32>,
    /// Angle reference frame
    pub reference: Option<Reference>,
    /// Speed magnitude in the instrument's configured unit
    pub speed: Option<f32>,
    /// Unit of the speed magnitude
    pub units: SpeedUnits,
    /// Instrument validity flag
    pub status: Status,
}

impl WindReport {
    /// True if the instrument marked this report valid (`A` status).
    pub fn is_valid(&self) -> bool {
        self.status == Status::Valid
    }

    /// Speed converted to meters/second, if a speed term was present.
    pub fn speed_mps(&self) -> Option<f32> {
        self.speed.map(|s| self.units.to_mps(s))
    }

    /// Interpret one term of an MWV sentence. Terms beyond the five
    /// defined ones are ignored.
    pub(crate) fn apply_term(&mut self, term_number: u8, text: &str) {
        match term_number {
            1 => self.angle_deg = text.parse().ok(),
            2 => self.reference = text.chars().next().and_then(Reference::from_code),
            3 => self.speed = text.parse().ok(),
            4 => {
                if let Some(units) = text.chars().next().and_then(SpeedUnits::from_code) {
                    self.units = units;
                }
            }
            5 => {
                self.status = if text == "A" {
                    Status::Valid
                } else {
                    Status::Invalid
                };
            }
            _ => {}
        }
    }
}
