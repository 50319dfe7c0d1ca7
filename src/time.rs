//! Conversion of fractional hours to UTC instants, and the small amount of date
//! arithmetic the prayer time pipeline needs.
//!
//! Every helper that can fail (an undefined input, or a result outside chrono's range)
//! returns `Option` so that an undefined time stays undefined rather than panicking.

use crate::HoursUtc;
use crate::math::floor;
use crate::params::Rounding;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, Timelike, Utc};

/// Whole hours, minutes and seconds of a fractional-hours value.
///
/// Each component is truncated, so sub-second precision is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeComponents {
    /// Whole hours, may be negative or above 23
    pub hours: i64,
    /// Minutes, 0 to 59
    pub minutes: i64,
    /// Seconds, 0 to 59
    pub seconds: i64,
}

impl TimeComponents {
    /// Splits `value` into hours, minutes and seconds.
    ///
    /// # Example
    /// ```
    /// # use prayer_times::{HoursUtc, time::TimeComponents};
    /// let c = TimeComponents::from_hours(HoursUtc::from_hours(6.25));
    /// assert_eq!((c.hours, c.minutes, c.seconds), (6, 15, 0));
    /// ```
    #[must_use]
    pub fn from_hours(value: HoursUtc) -> Self {
        let num = value.hours();
        let hours = floor(num);
        let minutes = floor((num - hours) * 60.0);
        let seconds = floor((num - (hours + minutes / 60.0)) * 3600.0);
        Self {
            hours: hours as i64,
            minutes: minutes as i64,
            seconds: seconds as i64,
        }
    }

    /// Anchors the components at 0h UTC of `date`. Hours past 24 (or below 0) land on
    /// the following (or previous) day.
    #[must_use]
    pub fn utc_date(&self, date: NaiveDate) -> Option<DateTime<Utc>> {
        let offset = TimeDelta::try_hours(self.hours)?
            .checked_add(&TimeDelta::try_minutes(self.minutes)?)?
            .checked_add(&TimeDelta::try_seconds(self.seconds)?)?;
        start_of_day(date).checked_add_signed(offset)
    }
}

/// Midnight UTC at the start of `date`.
#[must_use]
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Converts a solar time on `date` to an instant. `None` stays `None`.
#[must_use]
pub fn utc_instant(date: NaiveDate, hours: Option<HoursUtc>) -> Option<DateTime<Utc>> {
    hours.and_then(|value| TimeComponents::from_hours(value).utc_date(date))
}

/// Shifts `date` by a signed number of days.
#[must_use]
pub fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::try_days(days)?)
}

/// Adds whole minutes to `instant`.
#[must_use]
pub fn add_minutes(instant: DateTime<Utc>, minutes: i64) -> Option<DateTime<Utc>> {
    instant.checked_add_signed(TimeDelta::try_minutes(minutes)?)
}

/// Adds a (possibly fractional or negative) number of seconds to `instant`, to the
/// millisecond. A non-finite offset gives `None`.
#[must_use]
pub fn add_seconds(instant: DateTime<Utc>, seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0) as i64;
    instant.checked_add_signed(TimeDelta::try_milliseconds(millis)?)
}

/// Rounds `instant` to a whole minute according to `rounding`.
///
/// - `Nearest`: 30 seconds or more rounds up, anything less rounds down
/// - `Up`: any part of a minute rounds up
/// - `None`: unchanged
///
/// Rounding an already rounded instant returns it unchanged.
///
/// # Example
/// ```
/// # use prayer_times::{Rounding, time::rounded_minute};
/// # use chrono::{TimeZone, Utc};
/// let t = Utc.with_ymd_and_hms(2024, 1, 1, 5, 12, 30).unwrap();
/// let rounded = rounded_minute(t, Rounding::Nearest);
/// assert_eq!(rounded, Utc.with_ymd_and_hms(2024, 1, 1, 5, 13, 0).unwrap());
/// assert_eq!(rounded_minute(rounded, Rounding::Up), rounded);
/// ```
#[must_use]
pub fn rounded_minute(instant: DateTime<Utc>, rounding: Rounding) -> DateTime<Utc> {
    let remainder = TimeDelta::seconds(i64::from(instant.second()))
        + TimeDelta::nanoseconds(i64::from(instant.nanosecond()));
    let Some(floor) = instant.checked_sub_signed(remainder) else {
        return instant;
    };
    let next = || floor.checked_add_signed(TimeDelta::minutes(1)).unwrap_or(floor);

    match rounding {
        Rounding::Nearest if instant.second() >= 30 => next(),
        Rounding::Nearest => floor,
        Rounding::Up if remainder > TimeDelta::zero() => next(),
        Rounding::Up | Rounding::None => instant,
    }
}

/// Day of the year, 1 for January 1st.
#[must_use]
pub fn day_of_year(date: NaiveDate) -> u32 {
    date.ordinal()
}
