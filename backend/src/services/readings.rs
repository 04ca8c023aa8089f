//! Compute the published readings for one UTC instant.

use chrono::{DateTime, Utc};
use meeus_core::{
    day_of_week, days_since_j2000, degrees_to_decimal_hours, degrees_to_sexagesimal,
    gmst_degrees, gregorian_to_jd_with, jd_to_mjd, lmst_degrees, normalize_degrees, CalendarDate,
    CalendarReform,
};

use super::error::{ensure_finite, round_to, ServiceResult};
use crate::models::{CalendarReading, ObserverLocation, SiderealReading};

/// Julian Day of a UTC instant, sub-second precision included.
pub fn julian_day_at(instant: DateTime<Utc>, reform: CalendarReform) -> ServiceResult<f64> {
    let date = CalendarDate::from(instant);
    ensure_finite("julian_day", gregorian_to_jd_with(&date, reform))
}

/// Full sidereal chain: instant → JD → GMST → LMST → `HH:MM:SS`.
pub fn sidereal_reading(
    instant: DateTime<Utc>,
    location: &ObserverLocation,
    reform: CalendarReform,
) -> ServiceResult<SiderealReading> {
    let jd = julian_day_at(instant, reform)?;
    let gmst = ensure_finite("gmst_degrees", gmst_degrees(jd))?;
    let lmst = ensure_finite("lmst_degrees", lmst_degrees(gmst, location.longitude))?;

    Ok(SiderealReading {
        computed_at: instant,
        location_name: location.name.clone(),
        longitude_used: location.longitude,
        julian_day: round_to(jd, 6),
        gmst_degrees: round_angle(gmst),
        gmst_hms: degrees_to_sexagesimal(gmst),
        lmst_degrees: round_angle(lmst),
        lmst_hms: degrees_to_sexagesimal(lmst),
        lmst_hours: round_hours(degrees_to_decimal_hours(lmst)),
    })
}

/// Angle rounded to 4 decimals, still in `[0, 360)`.
fn round_angle(degrees: f64) -> f64 {
    normalize_degrees(round_to(degrees, 4))
}

/// Hour angle rounded to 6 decimals, still in `[0, 24)`.
fn round_hours(hours: f64) -> f64 {
    let rounded = round_to(hours, 6);
    if rounded >= 24.0 {
        rounded - 24.0
    } else {
        rounded
    }
}

/// JD, MJD, weekday, day of year and days since J2000 for an instant.
pub fn calendar_reading(
    instant: DateTime<Utc>,
    reform: CalendarReform,
) -> ServiceResult<CalendarReading> {
    let date = CalendarDate::from(instant);
    let jd = ensure_finite("julian_day", gregorian_to_jd_with(&date, reform))?;

    Ok(CalendarReading {
        computed_at: instant,
        julian_day: round_to(jd, 6),
        modified_julian_day: round_to(jd_to_mjd(jd), 6),
        day_of_week: day_of_week(jd),
        day_of_year: date.day_of_year(),
        days_since_j2000: round_to(days_since_j2000(jd), 6),
    })
}
