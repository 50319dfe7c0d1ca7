//! Dawn for dates on which the sun never gets as low as the fajr angle.

use crate::polar::alternating_offsets;
use crate::time::{add_days, utc_instant};
use crate::{Coordinates, SolarTime};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, trace, warn};

/// Fajr of the nearest date on which `fajr_angle` is reached, moved onto `date`.
///
/// Candidates alternate before and after `date` (`-1, +1, -2, +2, ...` days), so the
/// earlier date wins at equal distance. Only the time of day is borrowed: the result is
/// anchored on `date` itself. Returns `None` if no candidate within
/// [`MAX_SEARCH_DAYS`](crate::polar::MAX_SEARCH_DAYS) qualifies.
///
/// # Example
/// ```
/// # use prayer_times::{Coordinates, high_latitude::nearest_valid_dawn};
/// # use chrono::NaiveDate;
/// // Edinburgh in midsummer: the sun stays above -18°
/// let date = NaiveDate::from_ymd_opt(2021, 6, 21).unwrap();
/// let edinburgh = Coordinates::new(55.9533, -3.1883).unwrap();
/// let fajr = nearest_valid_dawn(date, edinburgh, 18.0).unwrap();
/// assert_eq!(fajr.date_naive(), date);
/// ```
#[must_use]
pub fn nearest_valid_dawn(
    date: NaiveDate,
    coordinates: Coordinates,
    fajr_angle: f64,
) -> Option<DateTime<Utc>> {
    debug!("searching nearest day reaching fajr angle {fajr_angle} from {date}");
    for offset in alternating_offsets(-1) {
        let Some(candidate) = add_days(date, offset) else {
            continue;
        };
        trace!("trying {candidate}");
        let dawn = SolarTime::new(candidate, coordinates).hour_angle(-fajr_angle, false);
        if dawn.is_some() {
            debug!("using dawn of {candidate} for {date}");
            return utc_instant(date, dawn);
        }
    }
    warn!("fajr angle {fajr_angle} not reached near {date}, leaving fajr undefined");
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HoursUtc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_dawn_is_reanchored_on_requested_date() {
        let requested = date(2021, 6, 21);
        let london = Coordinates::new(51.5074, -0.1278).unwrap();
        assert_eq!(
            SolarTime::new(requested, london).hour_angle(-18.0, false),
            None
        );

        let fajr = nearest_valid_dawn(requested, london, 18.0).unwrap();
        assert_eq!(fajr.date_naive(), requested);

        // The borrowed time of day belongs to a date at least a week away
        let nearest = (1..=365)
            .flat_map(|n| [-n, n])
            .find_map(|offset| {
                let candidate = add_days(requested, offset)?;
                SolarTime::new(candidate, london)
                    .hour_angle(-18.0, false)
                    .map(|hours| (offset, hours))
            })
            .unwrap();
        assert!(nearest.0.abs() > 7);
        assert_eq!(
            Some(fajr),
            utc_instant(requested, Some(HoursUtc::from_hours(nearest.1.hours())))
        );
    }

    #[test]
    fn test_reachable_angle_uses_adjacent_day() {
        // Cairo always reaches -18°, so the day before is taken
        let requested = date(2022, 3, 10);
        let cairo = Coordinates::new(30.0444, 31.2357).unwrap();
        let previous = SolarTime::new(date(2022, 3, 9), cairo).hour_angle(-18.0, false);
        assert_eq!(
            nearest_valid_dawn(requested, cairo, 18.0),
            utc_instant(requested, previous)
        );
    }

    #[test]
    fn test_unreachable_everywhere_fails_closed() {
        // The sun never gets 60° below the horizon at the pole
        let requested = date(2022, 3, 10);
        let pole = Coordinates::new(90.0, 0.0).unwrap();
        assert_eq!(nearest_valid_dawn(requested, pole, 60.0), None);
    }
}
