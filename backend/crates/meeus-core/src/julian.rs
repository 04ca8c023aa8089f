//! Quantities derived directly from a Julian Day: MJD, weekday, intervals.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::{J2000_JD, MJD_OFFSET};

/// Modified Julian Day (midnight-aligned) of a Julian Day.
pub fn jd_to_mjd(jd: f64) -> f64 {
    jd - MJD_OFFSET
}

/// Julian Day of a Modified Julian Day.
pub fn mjd_to_jd(mjd: f64) -> f64 {
    mjd + MJD_OFFSET
}

/// Day of the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Weekday for an index counted from Sunday = 0, taken modulo 7.
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(7) as usize]
    }

    /// 0 for Sunday through 6 for Saturday.
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownWeekday(s.to_string()))
    }
}

/// Day of the week of a Julian Day: `INT(JD + 1.5) mod 7`, 0 = Sunday.
///
/// The 0h JD (`x.5`) and the 12h JD (`x.0`) of a civil date give the same
/// weekday, because the `+1.5` offset absorbs the half-day shift.
pub fn day_of_week(jd: f64) -> Weekday {
    Weekday::from_index((jd + 1.5).floor() as i64)
}

/// Absolute number of days between two Julian Days.
pub fn time_interval(jd1: f64, jd2: f64) -> f64 {
    (jd2 - jd1).abs()
}

/// Days elapsed since (or until) J2000.0.
pub fn days_since_j2000(jd: f64) -> f64 {
    time_interval(J2000_JD, jd)
}
