//! Periodically published readings.
//!
//! Each reading is computed from a single instant and never mutated after it is
//! published; see [`crate::services::snapshot`].

use chrono::{DateTime, Utc};
use meeus_core::Weekday;
use serde::{Deserialize, Serialize};

/// Local sidereal clock for the configured observer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiderealReading {
    /// UTC instant the reading was computed for
    pub computed_at: DateTime<Utc>,
    pub location_name: String,
    /// Observer longitude in degrees, positive east
    pub longitude_used: f64,
    /// Julian Day, 6 decimals
    pub julian_day: f64,
    /// Greenwich mean sidereal time in degrees, 4 decimals
    pub gmst_degrees: f64,
    pub gmst_hms: String,
    /// Local mean sidereal time in degrees, 4 decimals
    pub lmst_degrees: f64,
    pub lmst_hms: String,
    /// Local mean sidereal time in hours, 6 decimals
    pub lmst_hours: f64,
}

/// Calendar quantities for the current UTC instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarReading {
    pub computed_at: DateTime<Utc>,
    /// Julian Day, 6 decimals
    pub julian_day: f64,
    /// Modified Julian Day, 6 decimals
    pub modified_julian_day: f64,
    pub day_of_week: Weekday,
    pub day_of_year: u32,
    /// Days elapsed since J2000.0, 6 decimals
    pub days_since_j2000: f64,
}
