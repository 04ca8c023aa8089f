//! Angle → time-of-day formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Degrees of rotation per hour of time (360° / 24h).
const DEGREES_PER_HOUR: f64 = 15.0;

/// Hours, minutes and whole seconds of an hour angle, truncated at each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hms {
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Hms {
    pub fn from_degrees(degrees: f64) -> Self {
        let hours = degrees_to_decimal_hours(degrees);
        let h = hours.trunc();
        let minutes = (hours - h) * 60.0;
        let m = minutes.trunc();
        let s = ((minutes - m) * 60.0).trunc();
        Self {
            hours: h as i64,
            minutes: m as i64,
            seconds: s as i64,
        }
    }
}

impl fmt::Display for Hms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// `HH:MM:SS` for an angle in degrees (truncated, not rounded).
pub fn degrees_to_sexagesimal(degrees: f64) -> String {
    Hms::from_degrees(degrees).to_string()
}

/// Decimal hours for an angle in degrees. No range reduction.
pub fn degrees_to_decimal_hours(degrees: f64) -> f64 {
    degrees / DEGREES_PER_HOUR
}
