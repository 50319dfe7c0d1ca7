//! Solar transit, sunrise, sunset and arbitrary-altitude times for one day.

use crate::astronomy::{
    SolarCoordinates, approximate_transit, corrected_hour_angle, corrected_transit, julian_day,
};
use crate::math::{abs, atan, degrees_to_radians, radians_to_degrees, tan};
use crate::{Coordinates, HoursUtc};
use chrono::{Datelike, NaiveDate};

/// Apparent altitude of the sun's upper limb at sunrise and sunset: 50 arc minutes of
/// refraction plus semidiameter below the geometric horizon.
pub const SUNRISE_SUNSET_ALTITUDE: f64 = -50.0 / 60.0;

/// Solar geometry snapshot for a single date and position.
///
/// Built from the solar coordinates at 0h UT of the previous, current and next day,
/// which are interpolated to the moment of each event. All times are hours since 0h UTC
/// of `date`; `None` means the event does not happen that day (polar day or night, or a
/// depression angle the sun never reaches).
///
/// # Example
/// ```
/// # use prayer_times::{Coordinates, SolarTime};
/// # use chrono::NaiveDate;
/// let date = NaiveDate::from_ymd_opt(2015, 7, 12).unwrap();
/// let raleigh = Coordinates::new(35.7750, -78.6336).unwrap();
/// let solar = SolarTime::new(date, raleigh);
///
/// let noon = solar.transit().hours();
/// assert!(noon > 17.0 && noon < 17.5); // about 13:20 EDT
/// assert!(solar.sunrise().is_some());
/// assert!(solar.hour_angle(-18.0, false).is_some());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarTime {
    coordinates: Coordinates,
    solar: SolarCoordinates,
    previous: SolarCoordinates,
    next: SolarCoordinates,
    approximate_transit: f64,
    transit: HoursUtc,
    sunrise: Option<HoursUtc>,
    sunset: Option<HoursUtc>,
}

impl SolarTime {
    /// Computes the solar geometry for `date` at `coordinates`.
    #[must_use]
    pub fn new(date: NaiveDate, coordinates: Coordinates) -> Self {
        let jd = julian_day(date.year(), date.month(), date.day(), 0.0);
        let solar = SolarCoordinates::new(jd);
        let previous = SolarCoordinates::new(jd - 1.0);
        let next = SolarCoordinates::new(jd + 1.0);

        let m0 = approximate_transit(
            coordinates.longitude(),
            solar.apparent_sidereal_time,
            solar.right_ascension,
        );
        let transit = corrected_transit(
            m0,
            coordinates.longitude(),
            solar.apparent_sidereal_time,
            solar.right_ascension,
            previous.right_ascension,
            next.right_ascension,
        );

        let mut snapshot = Self {
            coordinates,
            solar,
            previous,
            next,
            approximate_transit: m0,
            transit,
            sunrise: None,
            sunset: None,
        };
        snapshot.sunrise = snapshot.hour_angle(SUNRISE_SUNSET_ALTITUDE, false);
        snapshot.sunset = snapshot.hour_angle(SUNRISE_SUNSET_ALTITUDE, true);
        snapshot
    }

    /// Position the geometry was computed for.
    #[must_use]
    pub const fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Solar noon.
    #[must_use]
    pub const fn transit(&self) -> HoursUtc {
        self.transit
    }

    /// Sunrise, if the sun crosses the horizon that morning.
    #[must_use]
    pub const fn sunrise(&self) -> Option<HoursUtc> {
        self.sunrise
    }

    /// Sunset, if the sun crosses the horizon that evening.
    #[must_use]
    pub const fn sunset(&self) -> Option<HoursUtc> {
        self.sunset
    }

    /// Declination of the sun at 0h UT, in degrees.
    #[must_use]
    pub const fn declination(&self) -> f64 {
        self.solar.declination
    }

    /// Whether both sunrise and sunset are defined.
    #[must_use]
    pub const fn has_sunrise_and_sunset(&self) -> bool {
        self.sunrise.is_some() && self.sunset.is_some()
    }

    /// Time at which the sun is at `altitude` degrees, before or after transit.
    ///
    /// Depression angles are passed as negative altitudes, e.g. `-18.0` for
    /// astronomical twilight.
    #[must_use]
    pub fn hour_angle(&self, altitude: f64, after_transit: bool) -> Option<HoursUtc> {
        corrected_hour_angle(
            self.approximate_transit,
            altitude,
            &self.coordinates,
            after_transit,
            self.solar.apparent_sidereal_time,
            [
                self.previous.right_ascension,
                self.solar.right_ascension,
                self.next.right_ascension,
            ],
            [
                self.previous.declination,
                self.solar.declination,
                self.next.declination,
            ],
        )
    }

    /// Time in the afternoon when an object's shadow is `shadow_length` times its
    /// height plus its shadow at noon.
    #[must_use]
    pub fn afternoon(&self, shadow_length: f64) -> Option<HoursUtc> {
        let tangent = abs(self.coordinates.latitude() - self.solar.declination);
        let inverse = shadow_length + tan(degrees_to_radians(tangent));
        let altitude = radians_to_degrees(atan(1.0 / inverse));
        self.hour_angle(altitude, true)
    }
}
