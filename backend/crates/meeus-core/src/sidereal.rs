//! Greenwich and local mean sidereal time.
//!
//! Meeus chapter 12, formula 12.4 (IAU 1982). Inputs are UT Julian Days; no
//! UT1-UTC correction is applied. All angles are degrees in `[0, 360)`.

use crate::{DAYS_PER_JULIAN_CENTURY, J2000_JD};

/// Julian centuries elapsed since J2000.0: `T = (JD − 2451545.0) / 36525`.
pub fn julian_centuries_since_j2000(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Reduce an angle to `[0, 360)`.
///
/// `rem_euclid` can return exactly 360.0 for tiny negative inputs; that case is
/// folded back to 0.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let reduced = degrees.rem_euclid(360.0);
    if reduced >= 360.0 {
        0.0
    } else {
        reduced
    }
}

/// Greenwich Mean Sidereal Time in degrees.
///
/// θ₀ = 280.46061837 + 360.98564736629·(JD − 2451545.0) + 0.000387933·T² − T³/38710000
///
/// The linear term is driven by days since J2000 rather than by `T`, which
/// would lose precision through the division by 36525.
///
/// The result is in `[0, 360)` whenever the polynomial is finite, which holds
/// for `|jd| <= 1e100`. Beyond that `T³` overflows and the result is NaN.
pub fn gmst_degrees(jd: f64) -> f64 {
    let days = jd - J2000_JD;
    let t = julian_centuries_since_j2000(jd);
    let t2 = t * t;
    let t3 = t2 * t;

    let theta = 280.460_618_37 + 360.985_647_366_29 * days + 0.000_387_933 * t2
        - t3 / 38_710_000.0;
    normalize_degrees(theta)
}

/// Local Mean Sidereal Time in degrees from GMST and the observer's longitude
/// (positive east of Greenwich, negative west).
pub fn lmst_degrees(gmst: f64, longitude_east: f64) -> f64 {
    normalize_degrees(gmst + longitude_east)
}
