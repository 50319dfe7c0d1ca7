//! Substitute solar geometry for dates on which the sun does not rise or set.
//!
//! The substitute snapshots only lend their fractional hours; the pipeline still anchors
//! them on the requested date.

use crate::math::{abs, copysign};
use crate::params::PolarCircleResolution;
use crate::time::add_days;
use crate::{Coordinates, SolarTime};
use chrono::NaiveDate;
use log::{debug, trace, warn};

/// Upper bound on candidates tried by the polar and dawn resolvers.
pub const MAX_SEARCH_DAYS: u32 = 365;

/// Latitude step for [`PolarCircleResolution::NearestLatitude`], in degrees.
const LATITUDE_STEP: f64 = 0.5;

/// Latitude below which the nearest-latitude search gives up.
const MIN_SEARCH_LATITUDE: f64 = 65.0;

/// Today's and tomorrow's solar geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolarDays {
    /// Geometry for the requested date
    pub today: SolarTime,
    /// Geometry for the day after
    pub tomorrow: SolarTime,
}

impl SolarDays {
    /// Geometry for `date` and the day after at `coordinates`, or `None` when the
    /// following day is not representable.
    #[must_use]
    pub fn new(date: NaiveDate, coordinates: Coordinates) -> Option<Self> {
        let tomorrow = add_days(date, 1)?;
        Some(Self {
            today: SolarTime::new(date, coordinates),
            tomorrow: SolarTime::new(tomorrow, coordinates),
        })
    }

    /// Whether today's sunrise and sunset and tomorrow's sunrise are all defined.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.today.has_sunrise_and_sunset() && self.tomorrow.sunrise().is_some()
    }

    const fn both_valid(&self) -> bool {
        self.today.has_sunrise_and_sunset() && self.tomorrow.has_sunrise_and_sunset()
    }
}

/// Replaces `days` with the geometry chosen by `resolution` if it lacks a sunrise or
/// sunset. Returns `days` untouched when nothing is missing, when `resolution` is
/// `Unresolved`, or when the search runs out.
#[must_use]
pub fn resolve(
    days: SolarDays,
    date: NaiveDate,
    coordinates: Coordinates,
    resolution: PolarCircleResolution,
) -> SolarDays {
    if days.is_complete() {
        return days;
    }

    let found = match resolution {
        PolarCircleResolution::Unresolved => return days,
        PolarCircleResolution::NearestDay => nearest_day(date, coordinates),
        PolarCircleResolution::NearestLatitude => nearest_latitude(date, coordinates),
    };

    found.unwrap_or_else(|| {
        warn!(
            "no sunrise and sunset found near {date} at latitude {}, leaving times undefined",
            coordinates.latitude()
        );
        days
    })
}

/// Nearest date, alternating after and before the requested one, on which both that
/// day and the next have a sunrise and a sunset.
fn nearest_day(date: NaiveDate, coordinates: Coordinates) -> Option<SolarDays> {
    debug!("searching nearest day with sunrise and sunset from {date}");
    for offset in alternating_offsets(1) {
        let Some(candidate) = add_days(date, offset) else {
            continue;
        };
        trace!("trying {candidate}");
        let Some(days) = SolarDays::new(candidate, coordinates) else {
            continue;
        };
        if days.both_valid() {
            debug!("using geometry of {candidate} for {date}");
            return Some(days);
        }
    }
    None
}

/// Nearest latitude toward the equator at which the requested date and the next both
/// have a sunrise and a sunset.
fn nearest_latitude(date: NaiveDate, coordinates: Coordinates) -> Option<SolarDays> {
    let step = copysign(LATITUDE_STEP, coordinates.latitude());
    debug!(
        "searching nearest latitude with sunrise and sunset from {}",
        coordinates.latitude()
    );

    let mut latitude = coordinates.latitude() - step;
    for _ in 0..MAX_SEARCH_DAYS {
        trace!("trying latitude {latitude}");
        let days = SolarDays::new(date, coordinates.with_latitude(latitude))?;
        if days.both_valid() {
            debug!("using geometry of latitude {latitude} for {date}");
            return Some(days);
        }
        if abs(latitude) < MIN_SEARCH_LATITUDE {
            break;
        }
        latitude -= step;
    }
    None
}

/// Day offsets `d, -d, 2d, -2d, ...` for `first = d`, capped at [`MAX_SEARCH_DAYS`]
/// candidates.
pub(crate) fn alternating_offsets(first: i64) -> impl Iterator<Item = i64> {
    (0..i64::from(MAX_SEARCH_DAYS)).map(move |k| {
        let distance = k / 2 + 1;
        if k % 2 == 0 {
            distance * first
        } else {
            -distance * first
        }
    })
}
