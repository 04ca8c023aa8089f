//! # meeus-core
//!
//! Calendar and time-reference algorithms from Jean Meeus, *Astronomical
//! Algorithms* (2nd ed.), chapters 7 and 12.
//!
//! This crate is the numerical core of the Meeus astronomy service. Every
//! function is pure: no I/O, no shared state, bounded running time. Values flow
//! one way:
//!
//! ```text
//! CalendarDate ──► Julian Day ──┬──► Modified Julian Day
//!                               ├──► Weekday
//!                               └──► GMST ──► LMST ──► "HH:MM:SS"
//! ```
//!
//! ## Example
//!
//! ```rust
//! use meeus_core::{
//!     degrees_to_sexagesimal, gmst_degrees, gregorian_to_jd, lmst_degrees, CalendarDate,
//! };
//!
//! let date = CalendarDate::new(2000, 1, 1, 12, 0, 0.0);
//! let jd = gregorian_to_jd(&date);
//! assert_eq!(jd, 2_451_545.0);
//!
//! let gmst = gmst_degrees(jd);
//! let lmst = lmst_degrees(gmst, -1.62);
//! let clock = degrees_to_sexagesimal(lmst);
//! assert_eq!(clock.len(), 8);
//! ```
//!
//! ## Calendar reform
//!
//! Meeus' forward formula can either switch to the Julian calendar before
//! 1582-10-15 or apply the Gregorian correction to every date. The choice is
//! explicit: see [`CalendarReform`]. Functions without a `_with` suffix use
//! [`CalendarReform::default`].

mod calendar;
mod error;
mod format;
mod julian;
mod sidereal;

pub use calendar::{
    day_of_year, gregorian_to_jd, gregorian_to_jd_fractional, gregorian_to_jd_fractional_with,
    gregorian_to_jd_with, is_leap_year, jd_to_gregorian, jd_to_gregorian_with, CalendarDate,
    CalendarReform,
};
pub use error::{Error, Result};
pub use format::{degrees_to_decimal_hours, degrees_to_sexagesimal, Hms};
pub use julian::{
    day_of_week, days_since_j2000, jd_to_mjd, mjd_to_jd, time_interval, Weekday,
};
pub use sidereal::{gmst_degrees, julian_centuries_since_j2000, lmst_degrees, normalize_degrees};

/// Julian Day of the J2000.0 epoch (2000-01-01 12:00 UTC).
pub const J2000_JD: f64 = 2_451_545.0;

/// Offset between JD and MJD.
pub const MJD_OFFSET: f64 = 2_400_000.5;

/// Days in a Julian century.
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

/// Seconds in a civil day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// First Julian Day Number of the Gregorian calendar (1582-10-15).
pub const GREGORIAN_REFORM_JDN: i64 = 2_299_161;
