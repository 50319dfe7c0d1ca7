//! Low-precision solar position formulas.
//!
//! This follows the simplified solar coordinate expressions of Meeus, *Astronomical
//! Algorithms* (2nd ed.), chapters 12, 15, 22 and 25. They are accurate to well within a
//! minute of time for sunrise, transit and twilight, which is all prayer times need.
//!
//! The season-adjusted twilight lengths at the end of this module are the empirical
//! model published by the Moonsighting Committee (Khalid Shaukat).

#![allow(clippy::unreadable_literal)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::suboptimal_flops)]

use crate::math::{
    abs, acos, asin, atan2, cos, degrees_to_radians, floor, mul_add, normalize_degrees_0_to_360,
    normalize_to_scale, polynomial, quadrant_shift_angle, radians_to_degrees, round, sin,
};
use crate::params::{Rounding, Shafaq};
use crate::time::{add_seconds, rounded_minute};
use crate::{Coordinates, HoursUtc};
use chrono::{DateTime, Utc};

/// Julian Day Number for J2000.0 epoch (2000-01-01 12:00:00 TT)
const J2000_JDN: f64 = 2_451_545.0;

/// Days per Julian century
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Mean sidereal rotation per solar day, in degrees.
const SIDEREAL_DEGREES_PER_DAY: f64 = 360.985647;

/// Geocentric solar coordinates for 0h of a given Julian day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarCoordinates {
    /// Declination of the sun in degrees
    pub declination: f64,
    /// Right ascension of the sun in degrees, [0, 360)
    pub right_ascension: f64,
    /// Apparent sidereal time at Greenwich in degrees
    pub apparent_sidereal_time: f64,
}

impl SolarCoordinates {
    /// Computes the solar coordinates for `julian_day`.
    #[must_use]
    pub fn new(julian_day: f64) -> Self {
        let t = julian_century(julian_day);
        let l0 = mean_solar_longitude(t);
        let lp = mean_lunar_longitude(t);
        let omega = ascending_lunar_node_longitude(t);
        let lambda = degrees_to_radians(apparent_solar_longitude(t, l0));
        let theta0 = mean_sidereal_time(t);
        let delta_psi = nutation_in_longitude(l0, lp, omega);
        let delta_epsilon = nutation_in_obliquity(l0, lp, omega);
        let epsilon0 = mean_obliquity_of_the_ecliptic(t);
        let epsilon_app = degrees_to_radians(apparent_obliquity_of_the_ecliptic(t, epsilon0));

        let declination = radians_to_degrees(asin(sin(epsilon_app) * sin(lambda)));
        let right_ascension = normalize_degrees_0_to_360(radians_to_degrees(atan2(
            cos(epsilon_app) * sin(lambda),
            cos(lambda),
        )));
        let apparent_sidereal_time =
            theta0 + delta_psi * cos(degrees_to_radians(epsilon0 + delta_epsilon));

        Self {
            declination,
            right_ascension,
            apparent_sidereal_time,
        }
    }
}

/// Geometric mean longitude of the sun in degrees (Meeus 25.2).
#[must_use]
pub fn mean_solar_longitude(julian_century: f64) -> f64 {
    normalize_degrees_0_to_360(polynomial(
        &[280.4664567, 36000.76983, 0.0003032],
        julian_century,
    ))
}

/// Mean longitude of the moon in degrees (Meeus p. 144).
#[must_use]
pub fn mean_lunar_longitude(julian_century: f64) -> f64 {
    normalize_degrees_0_to_360(polynomial(&[218.3165, 481267.8813], julian_century))
}

/// Longitude of the moon's ascending node in degrees (Meeus p. 144).
#[must_use]
pub fn ascending_lunar_node_longitude(julian_century: f64) -> f64 {
    normalize_degrees_0_to_360(polynomial(
        &[125.04452, -1934.136261, 0.0020708, 1.0 / 450_000.0],
        julian_century,
    ))
}

/// Mean anomaly of the sun in degrees (Meeus 25.3).
#[must_use]
pub fn mean_solar_anomaly(julian_century: f64) -> f64 {
    normalize_degrees_0_to_360(polynomial(
        &[357.52911, 35999.05029, -0.0001537],
        julian_century,
    ))
}

/// The sun's equation of the centre in degrees (Meeus p. 164).
#[must_use]
pub fn solar_equation_of_the_center(julian_century: f64, mean_anomaly: f64) -> f64 {
    let t = julian_century;
    let m = degrees_to_radians(mean_anomaly);
    polynomial(&[1.914602, -0.004817, -0.000014], t) * sin(m)
        + polynomial(&[0.019993, -0.000101], t) * sin(2.0 * m)
        + 0.000289 * sin(3.0 * m)
}

/// Apparent longitude of the sun in degrees, corrected for nutation and aberration.
#[must_use]
pub fn apparent_solar_longitude(julian_century: f64, mean_longitude: f64) -> f64 {
    let t = julian_century;
    let longitude = mean_longitude + solar_equation_of_the_center(t, mean_solar_anomaly(t));
    let omega = 125.04 - 1934.136 * t;
    normalize_degrees_0_to_360(longitude - 0.00569 - 0.00478 * sin(degrees_to_radians(omega)))
}

/// Mean obliquity of the ecliptic in degrees (Meeus 22.2).
#[must_use]
pub fn mean_obliquity_of_the_ecliptic(julian_century: f64) -> f64 {
    polynomial(
        &[23.439291, -0.013004167, -0.0000001639, 0.0000005036],
        julian_century,
    )
}

/// Obliquity corrected for the apparent position of the sun (Meeus p. 165).
#[must_use]
pub fn apparent_obliquity_of_the_ecliptic(julian_century: f64, mean_obliquity: f64) -> f64 {
    let omega = 125.04 - 1934.136 * julian_century;
    mean_obliquity + 0.00256 * cos(degrees_to_radians(omega))
}

/// Mean sidereal time at Greenwich in degrees (Meeus 12.4).
#[must_use]
pub fn mean_sidereal_time(julian_century: f64) -> f64 {
    let t = julian_century;
    let jd = t * DAYS_PER_CENTURY + J2000_JDN;
    let theta = 280.46061837 + 360.98564736629 * (jd - J2000_JDN) + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees_0_to_360(theta)
}

/// Nutation in longitude in degrees (Meeus p. 144).
#[must_use]
pub fn nutation_in_longitude(
    solar_longitude: f64,
    lunar_longitude: f64,
    ascending_node: f64,
) -> f64 {
    let l0 = degrees_to_radians(solar_longitude);
    let lp = degrees_to_radians(lunar_longitude);
    let omega = degrees_to_radians(ascending_node);
    (-17.2 / 3600.0) * sin(omega) - (1.32 / 3600.0) * sin(2.0 * l0)
        - (0.23 / 3600.0) * sin(2.0 * lp)
        + (0.21 / 3600.0) * sin(2.0 * omega)
}

/// Nutation in obliquity in degrees (Meeus p. 144).
#[must_use]
pub fn nutation_in_obliquity(
    solar_longitude: f64,
    lunar_longitude: f64,
    ascending_node: f64,
) -> f64 {
    let l0 = degrees_to_radians(solar_longitude);
    let lp = degrees_to_radians(lunar_longitude);
    let omega = degrees_to_radians(ascending_node);
    (9.2 / 3600.0) * cos(omega)
        + (0.57 / 3600.0) * cos(2.0 * l0)
        + (0.10 / 3600.0) * cos(2.0 * lp)
        - (0.09 / 3600.0) * cos(2.0 * omega)
}

/// Altitude of a body with declination `declination` at local hour angle `hour_angle`.
#[must_use]
pub fn altitude_of_celestial_body(latitude: f64, declination: f64, hour_angle: f64) -> f64 {
    let phi = degrees_to_radians(latitude);
    let delta = degrees_to_radians(declination);
    radians_to_degrees(asin(
        sin(phi) * sin(delta) + cos(phi) * cos(delta) * cos(degrees_to_radians(hour_angle)),
    ))
}

/// Approximate transit as a fraction of the day, [0, 1) (Meeus 15.2).
#[must_use]
pub fn approximate_transit(longitude: f64, sidereal_time: f64, right_ascension: f64) -> f64 {
    let lw = -longitude;
    normalize_to_scale((right_ascension + lw - sidereal_time) / 360.0, 1.0)
}

/// Transit corrected with the interpolated right ascension (Meeus ch. 15).
#[must_use]
pub fn corrected_transit(
    approximate_transit: f64,
    longitude: f64,
    sidereal_time: f64,
    right_ascension: f64,
    previous_right_ascension: f64,
    next_right_ascension: f64,
) -> HoursUtc {
    let m0 = approximate_transit;
    let lw = -longitude;
    let theta = normalize_degrees_0_to_360(sidereal_time + SIDEREAL_DEGREES_PER_DAY * m0);
    let alpha = normalize_degrees_0_to_360(interpolate_angles(
        right_ascension,
        previous_right_ascension,
        next_right_ascension,
        m0,
    ));
    let h = quadrant_shift_angle(theta - lw - alpha);
    let delta_m = h / -360.0;
    HoursUtc::from_hours((m0 + delta_m) * 24.0)
}

/// Time at which the sun reaches `altitude`, before or after transit (Meeus ch. 15).
///
/// Returns `None` when the sun never reaches that altitude on this day at this latitude.
/// The cosine of the hour angle is never clamped into [-1, 1].
#[must_use]
pub fn corrected_hour_angle(
    approximate_transit: f64,
    altitude: f64,
    coordinates: &Coordinates,
    after_transit: bool,
    sidereal_time: f64,
    right_ascension: [f64; 3],
    declination: [f64; 3],
) -> Option<HoursUtc> {
    let [alpha_prev, alpha_today, alpha_next] = right_ascension;
    let [delta_prev, delta_today, delta_next] = declination;
    let lw = -coordinates.longitude();
    let phi = degrees_to_radians(coordinates.latitude());

    let cos_h0 = (sin(degrees_to_radians(altitude))
        - sin(phi) * sin(degrees_to_radians(delta_today)))
        / (cos(phi) * cos(degrees_to_radians(delta_today)));
    if !(-1.0..=1.0).contains(&cos_h0) {
        return None;
    }
    let h0 = radians_to_degrees(acos(cos_h0));

    let m = if after_transit {
        approximate_transit + h0 / 360.0
    } else {
        approximate_transit - h0 / 360.0
    };
    let theta = normalize_degrees_0_to_360(sidereal_time + SIDEREAL_DEGREES_PER_DAY * m);
    let alpha =
        normalize_degrees_0_to_360(interpolate_angles(alpha_today, alpha_prev, alpha_next, m));
    let delta = interpolate(delta_today, delta_prev, delta_next, m);
    let h = theta - lw - alpha;
    let body_altitude = altitude_of_celestial_body(coordinates.latitude(), delta, h);

    let delta_m = (body_altitude - altitude)
        / (360.0 * cos(degrees_to_radians(delta)) * cos(phi) * sin(degrees_to_radians(h)));
    HoursUtc::finite((m + delta_m) * 24.0)
}

/// Interpolates today's value `y2` between yesterday `y1` and tomorrow `y3` (Meeus 3.3).
#[must_use]
pub fn interpolate(y2: f64, y1: f64, y3: f64, n: f64) -> f64 {
    let a = y2 - y1;
    let b = y3 - y2;
    let c = b - a;
    y2 + (n / 2.0) * (a + b + n * c)
}

/// Like [`interpolate`], for angles that may wrap through 360°.
#[must_use]
pub fn interpolate_angles(y2: f64, y1: f64, y3: f64, n: f64) -> f64 {
    let a = normalize_degrees_0_to_360(y2 - y1);
    let b = normalize_degrees_0_to_360(y3 - y2);
    let c = b - a;
    y2 + (n / 2.0) * (a + b + n * c)
}

/// Julian day of a Gregorian calendar date plus `hours` (Meeus 7.1).
#[must_use]
pub fn julian_day(year: i32, month: u32, day: u32, hours: f64) -> f64 {
    let (y, m) = if month > 2 {
        (year, month as i32)
    } else {
        (year - 1, month as i32 + 12)
    };
    let d = f64::from(day) + hours / 24.0;

    let a = floor(f64::from(y) / 100.0);
    let b = 2.0 - a + floor(a / 4.0);

    floor(365.25 * (f64::from(y) + 4716.0)) + floor(30.6001 * f64::from(m + 1)) + d + b - 1524.5
}

/// Julian centuries since J2000.0.
#[must_use]
pub fn julian_century(julian_day: f64) -> f64 {
    (julian_day - J2000_JDN) / DAYS_PER_CENTURY
}

/// Gregorian leap year test.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Days since the winter solstice of the observer's hemisphere.
#[must_use]
pub const fn days_since_solstice(day_of_year: u32, year: i32, latitude: f64) -> u32 {
    const NORTHERN_OFFSET: u32 = 10;
    let leap = is_leap_year(year);
    let southern_offset = if leap { 173 } else { 172 };
    let days_in_year = if leap { 366 } else { 365 };

    if latitude >= 0.0 {
        let days = day_of_year + NORTHERN_OFFSET;
        if days >= days_in_year {
            days - days_in_year
        } else {
            days
        }
    } else if day_of_year < southern_offset {
        day_of_year + days_in_year - southern_offset
    } else {
        day_of_year - southern_offset
    }
}

/// Interpolates the four seasonal anchor lengths `[a, b, c, d]` (minutes) across the year.
fn seasonal_twilight_minutes([a, b, c, d]: [f64; 4], days_since_solstice: u32) -> f64 {
    let dyy = f64::from(days_since_solstice);
    if dyy < 91.0 {
        mul_add((b - a) / 91.0, dyy, a)
    } else if dyy < 137.0 {
        mul_add((c - b) / 46.0, dyy - 91.0, b)
    } else if dyy < 183.0 {
        mul_add((d - c) / 46.0, dyy - 137.0, c)
    } else if dyy < 229.0 {
        mul_add((c - d) / 46.0, dyy - 183.0, d)
    } else if dyy < 275.0 {
        mul_add((b - c) / 46.0, dyy - 229.0, c)
    } else {
        mul_add((a - b) / 91.0, dyy - 275.0, b)
    }
}

/// Length of morning twilight in minutes before sunrise.
#[must_use]
pub fn morning_twilight_minutes(latitude: f64, day_of_year: u32, year: i32) -> f64 {
    let lat = abs(latitude);
    let anchors = [
        mul_add(28.65 / 55.0, lat, 75.0),
        mul_add(19.44 / 55.0, lat, 75.0),
        mul_add(32.74 / 55.0, lat, 75.0),
        mul_add(48.10 / 55.0, lat, 75.0),
    ];
    seasonal_twilight_minutes(anchors, days_since_solstice(day_of_year, year, latitude))
}

/// Length of evening twilight in minutes after sunset, for the given twilight glow.
#[must_use]
pub fn evening_twilight_minutes(latitude: f64, day_of_year: u32, year: i32, shafaq: Shafaq) -> f64 {
    let lat = abs(latitude);
    let anchors = match shafaq {
        Shafaq::General => [
            mul_add(25.60 / 55.0, lat, 75.0),
            mul_add(2.05 / 55.0, lat, 75.0),
            mul_add(-9.21 / 55.0, lat, 75.0),
            mul_add(6.14 / 55.0, lat, 75.0),
        ],
        Shafaq::Ahmer => [
            mul_add(17.40 / 55.0, lat, 62.0),
            mul_add(-7.16 / 55.0, lat, 62.0),
            mul_add(5.12 / 55.0, lat, 62.0),
            mul_add(19.44 / 55.0, lat, 62.0),
        ],
        Shafaq::Abyad => [
            mul_add(25.60 / 55.0, lat, 75.0),
            mul_add(7.16 / 55.0, lat, 75.0),
            mul_add(36.84 / 55.0, lat, 75.0),
            mul_add(81.84 / 55.0, lat, 75.0),
        ],
    };
    seasonal_twilight_minutes(anchors, days_since_solstice(day_of_year, year, latitude))
}

/// Season-adjusted dawn: `sunrise` minus the morning twilight length, to the nearest minute.
#[must_use]
pub fn season_adjusted_morning_twilight(
    latitude: f64,
    day_of_year: u32,
    year: i32,
    sunrise: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    let minutes = morning_twilight_minutes(latitude, day_of_year, year);
    add_seconds(sunrise, round(minutes * -60.0)).map(|t| rounded_minute(t, Rounding::Nearest))
}

/// Season-adjusted nightfall: `sunset` plus the evening twilight length, to the nearest minute.
#[must_use]
pub fn season_adjusted_evening_twilight(
    latitude: f64,
    day_of_year: u32,
    year: i32,
    sunset: DateTime<Utc>,
    shafaq: Shafaq,
) -> Option<DateTime<Utc>> {
    let minutes = evening_twilight_minutes(latitude, day_of_year, year, shafaq);
    add_seconds(sunset, round(minutes * 60.0)).map(|t| rounded_minute(t, Rounding::Nearest))
}
