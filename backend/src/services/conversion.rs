//! On-demand conversions between calendar dates and Julian Days.
//!
//! Requests are validated here, before any core function runs. Integer
//! fields are accepted as `i64` so that negative or oversized values come back
//! as a [`ServiceError::Validation`] naming the field instead of a generic
//! deserialization failure.

use meeus_core::{gregorian_to_jd_with, jd_to_gregorian_with, CalendarDate, CalendarReform};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{ensure_finite, round_to, ServiceError, ServiceResult};

/// Earliest accepted year (the JD epoch, -4712 January 1).
pub const MIN_YEAR: i64 = -4712;
/// Latest accepted year.
pub const MAX_YEAR: i64 = 9999;

/// Decimals kept on a returned Julian Day.
const JULIAN_DAY_DECIMALS: i32 = 6;

/// Request body for converting a calendar date to a Julian Day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JulianDayRequest {
    pub year: i64,
    /// Month 1-12
    pub month: i64,
    /// Day of month 1-31
    pub day: i64,
    /// Hour 0-23 (default 0)
    #[serde(default)]
    pub hour: i64,
    /// Minute 0-59 (default 0)
    #[serde(default)]
    pub minute: i64,
    /// Second in [0, 60) (default 0.0)
    #[serde(default)]
    pub second: f64,
}

impl JulianDayRequest {
    pub fn new(year: i64, month: i64, day: i64) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0.0,
        }
    }

    pub fn at(mut self, hour: i64, minute: i64, second: f64) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    /// Check every field and build the calendar date.
    pub fn validate(&self) -> ServiceResult<CalendarDate> {
        let year = bounded("year", self.year, MIN_YEAR, MAX_YEAR)?;
        let month = bounded("month", self.month, 1, 12)?;
        let day = bounded("day", self.day, 1, 31)?;
        let hour = bounded("hour", self.hour, 0, 23)?;
        let minute = bounded("minute", self.minute, 0, 59)?;
        if !self.second.is_finite() || !(0.0..60.0).contains(&self.second) {
            return Err(ServiceError::validation(
                "second",
                format!("must be in [0, 60), got {}", self.second),
            ));
        }

        Ok(CalendarDate::new(
            year as i32,
            month as u32,
            day as u32,
            hour as u32,
            minute as u32,
            self.second,
        ))
    }
}

fn bounded(field: &str, value: i64, min: i64, max: i64) -> ServiceResult<i64> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ServiceError::validation(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ))
    }
}

/// Response for a calendar date → Julian Day conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JulianDayResponse {
    /// Julian Day rounded to 6 decimals
    pub julian_day: f64,
    /// Echo of the validated input, `YYYY-MM-DD HH:MM:SS.ss`
    pub input_date: String,
}

/// Request body for converting a Julian Day to a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GregorianRequest {
    pub julian_day: f64,
}

/// Response for a Julian Day → calendar date conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GregorianResponse {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    /// Seconds rounded to 4 decimals
    pub second: f64,
    /// `YYYY-MM-DD HH:MM:SS.ss`
    pub formatted: String,
}

impl From<CalendarDate> for GregorianResponse {
    fn from(date: CalendarDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
            day: date.day,
            hour: date.hour,
            minute: date.minute,
            second: date.second,
            formatted: date.to_string(),
        }
    }
}

/// Convert a calendar date to a Julian Day.
pub fn convert_to_julian_day(
    request: &JulianDayRequest,
    reform: CalendarReform,
) -> ServiceResult<JulianDayResponse> {
    let date = request.validate().inspect_err(|e| {
        warn!(error = %e, "Rejected Julian Day conversion request");
    })?;

    let jd = ensure_finite("julian_day", gregorian_to_jd_with(&date, reform))?;
    debug!(%date, jd, %reform, "Converted calendar date to Julian Day");

    Ok(JulianDayResponse {
        julian_day: round_to(jd, JULIAN_DAY_DECIMALS),
        input_date: date.to_string(),
    })
}

/// Convert a Julian Day to a calendar date.
pub fn convert_to_gregorian(
    request: &GregorianRequest,
    reform: CalendarReform,
) -> ServiceResult<GregorianResponse> {
    let jd = request.julian_day;
    if !jd.is_finite() {
        warn!(jd, "Rejected calendar date conversion request");
        return Err(ServiceError::validation(
            "julian_day",
            format!("must be a finite number, got {}", jd),
        ));
    }

    let (earliest, latest) = julian_day_span(reform);
    if !(earliest..=latest).contains(&jd) {
        warn!(jd, "Rejected calendar date conversion request");
        return Err(ServiceError::validation(
            "julian_day",
            format!(
                "must be between {} and {} (years {} to {}), got {}",
                earliest, latest, MIN_YEAR, MAX_YEAR, jd
            ),
        ));
    }

    let date = jd_to_gregorian_with(jd, reform);
    check_calendar_fields(&date)?;
    debug!(jd, %date, %reform, "Converted Julian Day to calendar date");

    Ok(date.into())
}

/// Julian Days whose calendar date falls in `MIN_YEAR..=MAX_YEAR`.
///
/// The upper bound is the last 0.1 ms tick of `MAX_YEAR`, so nothing accepted
/// can round up into the following year.
pub fn julian_day_span(reform: CalendarReform) -> (f64, f64) {
    let first = CalendarDate::from_ymd(MIN_YEAR as i32, 1, 1);
    let last = CalendarDate::new(MAX_YEAR as i32, 12, 31, 23, 59, 59.9999);
    (
        gregorian_to_jd_with(&first, reform),
        gregorian_to_jd_with(&last, reform),
    )
}

/// The inverse transform cannot produce out-of-range fields for sane input;
/// seeing one means the arithmetic overflowed.
fn check_calendar_fields(date: &CalendarDate) -> ServiceResult<()> {
    let in_range = (MIN_YEAR..=MAX_YEAR).contains(&i64::from(date.year))
        && (1..=12).contains(&date.month)
        && (1..=31).contains(&date.day)
        && date.hour < 24
        && date.minute < 60
        && (0.0..60.0).contains(&date.second);
    if in_range {
        Ok(())
    } else {
        Err(ServiceError::computation(format!(
            "inverse transform produced an invalid date ({:?})",
            date
        )))
    }
}
