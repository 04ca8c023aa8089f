//! Calendar dates and their Julian Day numbers.
//!
//! Meeus chapter 7: formula 7.1 (date → JD), the inverse algorithm of p. 63 and
//! the day-of-year formula of p. 65. All integer parts are taken with `floor`,
//! never truncation, so years before 1 CE behave.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::GREGORIAN_REFORM_JDN;

/// 1 tick = 0.1 ms. The inverse transform rounds the day fraction to whole ticks.
const TICKS_PER_DAY: i64 = 864_000_000;
const TICKS_PER_HOUR: i64 = 36_000_000;
const TICKS_PER_MINUTE: i64 = 600_000;
const TICKS_PER_SECOND: f64 = 10_000.0;

/// Which calendar a civil date is read in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CalendarReform {
    /// Julian calendar up to 1582-10-04, Gregorian from 1582-10-15 on.
    ///
    /// Dates between those two days do not exist; they are read as Julian.
    #[default]
    #[serde(rename = "gregorian_1582")]
    Gregorian1582,
    /// Gregorian correction applied to every date.
    #[serde(rename = "proleptic_gregorian")]
    ProlepticGregorian,
}

impl CalendarReform {
    /// Canonical configuration name.
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarReform::Gregorian1582 => "gregorian_1582",
            CalendarReform::ProlepticGregorian => "proleptic_gregorian",
        }
    }

    /// Whether the Gregorian correction applies to a civil date.
    pub fn is_gregorian_date(self, year: i32, month: u32, day: f64) -> bool {
        match self {
            CalendarReform::ProlepticGregorian => true,
            CalendarReform::Gregorian1582 => {
                (year, month) > (1582, 10) || ((year, month) == (1582, 10) && day >= 15.0)
            }
        }
    }

    /// Whether a Julian Day Number (`floor(jd + 0.5)`) is a Gregorian day.
    pub fn is_gregorian_jdn(self, jdn: i64) -> bool {
        match self {
            CalendarReform::ProlepticGregorian => true,
            CalendarReform::Gregorian1582 => jdn >= GREGORIAN_REFORM_JDN,
        }
    }
}

impl fmt::Display for CalendarReform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarReform {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gregorian_1582" | "gregorian1582" | "historical" => Ok(CalendarReform::Gregorian1582),
            "proleptic_gregorian" | "proleptic" => Ok(CalendarReform::ProlepticGregorian),
            other => Err(Error::UnknownReform(other.to_string())),
        }
    }
}

/// A civil UTC instant split into calendar fields.
///
/// Field ranges are not enforced here; validation belongs to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Midnight (0h UTC) of the given date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Self {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// Time of day as a fraction of a day.
    pub fn day_fraction(&self) -> f64 {
        (f64::from(self.hour) + f64::from(self.minute) / 60.0 + self.second / 3600.0) / 24.0
    }

    /// Day of the month with the time of day folded in (e.g. `4.81`).
    pub fn fractional_day(&self) -> f64 {
        f64::from(self.day) + self.day_fraction()
    }

    /// Julian Day under the default calendar reform.
    pub fn to_jd(&self) -> f64 {
        gregorian_to_jd(self)
    }

    /// Julian Day under an explicit calendar reform.
    pub fn to_jd_with(&self, reform: CalendarReform) -> f64 {
        gregorian_to_jd_with(self, reform)
    }

    /// Calendar date of a Julian Day under the default calendar reform.
    pub fn from_jd(jd: f64) -> Self {
        jd_to_gregorian(jd)
    }

    pub fn day_of_year(&self) -> u32 {
        day_of_year(self.year, self.month, self.day)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:05.2}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl From<DateTime<Utc>> for CalendarDate {
    fn from(dt: DateTime<Utc>) -> Self {
        // chrono encodes a leap second as nanos >= 1e9; clamp it into the minute.
        let nanos = dt.nanosecond().min(999_999_999);
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: f64::from(dt.second()) + f64::from(nanos) / 1e9,
        }
    }
}

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Ordinal day of the year, 1..=365 (366 in leap years).
///
/// `N = INT(275M/9) − K·INT((M+9)/12) + D − 30`, K = 1 in leap years, 2 otherwise.
pub fn day_of_year(year: i32, month: u32, day: u32) -> u32 {
    let k: i64 = if is_leap_year(year) { 1 } else { 2 };
    let m = i64::from(month);
    let n = 275 * m / 9 - k * ((m + 9) / 12) + i64::from(day) - 30;
    u32::try_from(n).unwrap_or(0)
}

/// Julian Day of a calendar date under [`CalendarReform::default`].
pub fn gregorian_to_jd(date: &CalendarDate) -> f64 {
    gregorian_to_jd_with(date, CalendarReform::default())
}

/// Julian Day of a calendar date under an explicit calendar reform.
pub fn gregorian_to_jd_with(date: &CalendarDate, reform: CalendarReform) -> f64 {
    // The integer-day JD is exact (an integer plus one half); adding the time of
    // day last keeps the result within one rounding of the true instant.
    jd_of_day(date.year, date.month, f64::from(date.day), reform) + date.day_fraction()
}

/// Julian Day of a date whose day-of-month carries the time as a fraction.
pub fn gregorian_to_jd_fractional(year: i32, month: u32, day: f64) -> f64 {
    gregorian_to_jd_fractional_with(year, month, day, CalendarReform::default())
}

pub fn gregorian_to_jd_fractional_with(
    year: i32,
    month: u32,
    day: f64,
    reform: CalendarReform,
) -> f64 {
    jd_of_day(year, month, day, reform)
}

/// Meeus formula 7.1.
fn jd_of_day(year: i32, month: u32, day: f64, reform: CalendarReform) -> f64 {
    let gregorian = reform.is_gregorian_date(year, month, day);

    // January and February count as months 13 and 14 of the previous year.
    let (y, m) = if month <= 2 {
        (i64::from(year) - 1, i64::from(month) + 12)
    } else {
        (i64::from(year), i64::from(month))
    };

    let b = if gregorian {
        let a = y.div_euclid(100);
        2 - a + a.div_euclid(4)
    } else {
        0
    };

    (365.25 * (y + 4716) as f64).floor() + (30.6001 * (m + 1) as f64).floor() + day + b as f64
        - 1524.5
}

/// Calendar date of a Julian Day under [`CalendarReform::default`].
pub fn jd_to_gregorian(jd: f64) -> CalendarDate {
    jd_to_gregorian_with(jd, CalendarReform::default())
}

/// Calendar date of a Julian Day under an explicit calendar reform.
///
/// The time of day is rounded to 0.1 ms before the calendar split, so
/// `23:59:59.99996` becomes midnight of the following day rather than a
/// 60th second.
pub fn jd_to_gregorian_with(jd: f64, reform: CalendarReform) -> CalendarDate {
    let shifted = jd + 0.5;
    let mut z = shifted.floor();
    let mut ticks = ((shifted - z) * TICKS_PER_DAY as f64).round() as i64;
    if ticks >= TICKS_PER_DAY {
        z += 1.0;
        ticks -= TICKS_PER_DAY;
    }
    let z = z as i64;

    let a = if reform.is_gregorian_jdn(z) {
        let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
        z + 1 + alpha - alpha.div_euclid(4)
    } else {
        z
    };

    let b = a + 1524;
    let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
    let d = (365.25 * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;

    let day = b - d - (30.6001 * e as f64).floor() as i64;
    let month = if e < 14 { e - 1 } else { e - 13 };
    let year = if month > 2 { c - 4716 } else { c - 4715 };

    CalendarDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
        hour: (ticks / TICKS_PER_HOUR) as u32,
        minute: (ticks % TICKS_PER_HOUR / TICKS_PER_MINUTE) as u32,
        second: (ticks % TICKS_PER_MINUTE) as f64 / TICKS_PER_SECOND,
    }
}
