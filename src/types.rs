//! Core data types shared by the solar geometry and the prayer time pipeline.

use crate::error::check_coordinates;
use crate::Result;

/// Geographic position of the observer.
///
/// # Example
/// ```
/// # use prayer_times::Coordinates;
/// let makkah = Coordinates::new(21.4225241, 39.8261818).unwrap();
/// assert_eq!(makkah.latitude(), 21.4225241);
///
/// assert!(Coordinates::new(95.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude in degrees, positive north
    latitude: f64,
    /// Longitude in degrees, positive east
    longitude: f64,
}

impl Coordinates {
    /// Creates validated coordinates.
    ///
    /// # Errors
    /// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range (or non-finite) values.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        check_coordinates(latitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Same position moved to another latitude. Callers keep the latitude in range.
    pub(crate) const fn with_latitude(self, latitude: f64) -> Self {
        Self {
            latitude,
            longitude: self.longitude,
        }
    }

    /// Gets the latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Gets the longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Hours since midnight UTC that can extend beyond a single day.
///
/// Values represent hours since midnight UTC (0 UT) for the calculation date:
/// - Negative values indicate the previous day
/// - 0.0 to < 24.0 indicates the current day
/// - ≥ 24.0 indicates the next day
///
/// An event that does not happen is not a `HoursUtc` at all; the solar time
/// calculations return `Option<HoursUtc>` and use `None` for it.
///
/// # Example
/// ```
/// # use prayer_times::HoursUtc;
/// let morning = HoursUtc::from_hours(6.5); // 06:30 current day
/// let after_midnight = HoursUtc::from_hours(24.5); // 00:30 next day
/// assert!(morning < after_midnight);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct HoursUtc(f64);

impl HoursUtc {
    /// Creates a new `HoursUtc` from hours since midnight UTC.
    #[must_use]
    pub const fn from_hours(hours: f64) -> Self {
        Self(hours)
    }

    /// Wraps `hours` if it is a finite number.
    #[must_use]
    pub const fn finite(hours: f64) -> Option<Self> {
        if hours.is_finite() {
            Some(Self(hours))
        } else {
            None
        }
    }

    /// Gets the raw hours value.
    ///
    /// Can be negative (previous day) or ≥ 24.0 (next day).
    #[must_use]
    pub const fn hours(&self) -> f64 {
        self.0
    }
}

/// The daily prayers, plus sunrise, in the order they occur.
///
/// Sunset is not listed: it is reported on [`PrayerTimes`](crate::PrayerTimes) but does
/// not take part in the current/next prayer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Prayer {
    /// Dawn prayer
    Fajr,
    /// End of the fajr window
    Sunrise,
    /// Noon prayer, just after solar transit
    Dhuhr,
    /// Afternoon prayer, determined by shadow length
    Asr,
    /// Evening prayer, at or just after sunset
    Maghrib,
    /// Night prayer, after twilight disappears
    Isha,
}

impl Prayer {
    /// All prayers in chronological order.
    pub const ALL: [Self; 6] = [
        Self::Fajr,
        Self::Sunrise,
        Self::Dhuhr,
        Self::Asr,
        Self::Maghrib,
        Self::Isha,
    ];
}
