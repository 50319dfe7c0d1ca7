//! Times within the night, measured from maghrib to the following fajr.

use crate::params::Rounding;
use crate::time::{add_days, add_seconds, rounded_minute};
use crate::{Error, PrayerTimes, Result};
use chrono::{DateTime, Utc};

/// Middle and last third of the night that follows a day's maghrib.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunnahTimes {
    middle_of_the_night: Option<DateTime<Utc>>,
    last_third_of_the_night: Option<DateTime<Utc>>,
}

impl SunnahTimes {
    /// Derives the night times from `prayer_times` and the next day's fajr, computed with
    /// the same position and parameters.
    ///
    /// # Errors
    /// Returns `InvalidDate` when the next day cannot be represented.
    ///
    /// # Example
    /// ```
    /// # use prayer_times::{CalculationMethod, Coordinates, PrayerTimes, SunnahTimes};
    /// # use chrono::NaiveDate;
    /// let date = NaiveDate::from_ymd_opt(2016, 3, 10).unwrap();
    /// let makkah = Coordinates::new(21.4225241, 39.8261818).unwrap();
    /// let times = PrayerTimes::new(makkah, date, CalculationMethod::UmmAlQura.parameters()).unwrap();
    ///
    /// let sunnah = SunnahTimes::new(&times).unwrap();
    /// let middle = sunnah.middle_of_the_night().unwrap();
    /// assert!(middle > times.isha().unwrap());
    /// assert!(sunnah.last_third_of_the_night().unwrap() > middle);
    /// ```
    pub fn new(prayer_times: &PrayerTimes) -> Result<Self> {
        let next_date =
            add_days(prayer_times.date(), 1).ok_or(Error::invalid_date("out of range"))?;
        let next_day = PrayerTimes::new(
            *prayer_times.coordinates(),
            next_date,
            *prayer_times.parameters(),
        )?;

        let maghrib = prayer_times.maghrib();
        let night = next_day.fajr().zip(maghrib).map(|(fajr, maghrib)| fajr - maghrib);
        let night_fraction = |fraction: f64| {
            let seconds = night?.num_milliseconds() as f64 / 1000.0;
            add_seconds(maghrib?, seconds * fraction).map(|t| rounded_minute(t, Rounding::Nearest))
        };

        Ok(Self {
            middle_of_the_night: night_fraction(1.0 / 2.0),
            last_third_of_the_night: night_fraction(2.0 / 3.0),
        })
    }

    /// Halfway between maghrib and the next fajr.
    #[must_use]
    pub const fn middle_of_the_night(&self) -> Option<DateTime<Utc>> {
        self.middle_of_the_night
    }

    /// Two thirds of the way from maghrib to the next fajr.
    #[must_use]
    pub const fn last_third_of_the_night(&self) -> Option<DateTime<Utc>> {
        self.last_third_of_the_night
    }
}
