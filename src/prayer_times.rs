//! Daily prayer times: from solar geometry to rounded UTC instants.
//!
//! The calculation runs in three stages. A `Context` gathers today's and tomorrow's
//! geometry (substituted by the polar resolver when needed) and the night length. Each
//! prayer then gets an unadjusted time, with the high-latitude bounds applied to fajr and
//! isha. Finally the method and user adjustments are added and the rounding applied.

use crate::astronomy::{season_adjusted_evening_twilight, season_adjusted_morning_twilight};
use crate::high_latitude::nearest_valid_dawn;
use crate::params::{CalculationParameters, HighLatitudeFajrRule, TwilightConvention};
use crate::polar::{self, SolarDays};
use crate::time::{add_days, add_minutes, add_seconds, day_of_year, rounded_minute, utc_instant};
use crate::{Coordinates, Error, Prayer, Result};
use chrono::{DateTime, Datelike, NaiveDate, TimeDelta, Utc};
use log::debug;

/// Latitude from which the season-adjusted convention bounds fajr and isha by a
/// seventh of the night.
const SEVENTH_OF_NIGHT_LATITUDE: f64 = 55.0;

/// Prayer times for one date and position, as UTC instants.
///
/// A time is `None` when the event it depends on does not happen: the sun never reaches
/// the required depression angle, or never rises or sets and no polar resolution is
/// configured.
///
/// # Example
/// ```
/// # use prayer_times::{CalculationMethod, Coordinates, Madhab, Prayer, PrayerTimes};
/// # use chrono::{NaiveDate, TimeZone, Utc};
/// let date = NaiveDate::from_ymd_opt(2015, 7, 12).unwrap();
/// let raleigh = Coordinates::new(35.7750, -78.6336).unwrap();
/// let params = CalculationMethod::NorthAmerica
///     .parameters()
///     .with_madhab(Madhab::Hanafi);
///
/// let times = PrayerTimes::new(raleigh, date, params).unwrap();
/// // 13:21 EDT
/// assert_eq!(times.dhuhr(), Some(Utc.with_ymd_and_hms(2015, 7, 12, 17, 21, 0).unwrap()));
///
/// let afternoon = Utc.with_ymd_and_hms(2015, 7, 12, 20, 0, 0).unwrap();
/// assert_eq!(times.current_prayer(afternoon), Some(Prayer::Dhuhr));
/// assert_eq!(times.next_prayer(afternoon), Some(Prayer::Asr));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerTimes {
    coordinates: Coordinates,
    date: NaiveDate,
    parameters: CalculationParameters,
    fajr: Option<DateTime<Utc>>,
    sunrise: Option<DateTime<Utc>>,
    dhuhr: Option<DateTime<Utc>>,
    asr: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    maghrib: Option<DateTime<Utc>>,
    isha: Option<DateTime<Utc>>,
}

/// Geometry and derived instants shared by the per-prayer calculations of one call.
#[derive(Debug, Clone, Copy)]
struct Context {
    date: NaiveDate,
    coordinates: Coordinates,
    days: SolarDays,
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    night: Option<TimeDelta>,
}

impl Context {
    fn new(
        coordinates: Coordinates,
        date: NaiveDate,
        parameters: &CalculationParameters,
    ) -> Result<Self> {
        let tomorrow = add_days(date, 1).ok_or(Error::invalid_date("out of range"))?;
        let days = SolarDays::new(date, coordinates).ok_or(Error::invalid_date("out of range"))?;
        let days = polar::resolve(days, date, coordinates, parameters.polar_circle_resolution);

        let sunrise = utc_instant(date, days.today.sunrise());
        let sunset = utc_instant(date, days.today.sunset());
        let tomorrow_sunrise = utc_instant(tomorrow, days.tomorrow.sunrise());
        let night = tomorrow_sunrise
            .zip(sunset)
            .map(|(next_sunrise, sunset)| night_length(sunset, next_sunrise));

        Ok(Self {
            date,
            coordinates,
            days,
            sunrise,
            sunset,
            night,
        })
    }

    /// `instant` moved by `portion` of the night; negative portions move it earlier.
    fn night_offset(&self, instant: Option<DateTime<Utc>>, portion: f64) -> Option<DateTime<Utc>> {
        let night = self.night?;
        let seconds = night.num_milliseconds() as f64 / 1000.0;
        add_seconds(instant?, portion * seconds)
    }

    fn day_of_year(&self) -> u32 {
        day_of_year(self.date)
    }

    fn seventh_of_night_applies(&self, convention: TwilightConvention) -> bool {
        convention == TwilightConvention::SeasonAdjusted
            && self.coordinates.latitude() >= SEVENTH_OF_NIGHT_LATITUDE
    }
}

/// Time from `sunset` to `next_sunrise`, kept within (0, 24h]. Near the antimeridian
/// the transits of consecutive dates can fall on either side of 0h UTC, which puts
/// tomorrow's sunrise a day off.
fn night_length(sunset: DateTime<Utc>, next_sunrise: DateTime<Utc>) -> TimeDelta {
    let night = next_sunrise - sunset;
    let day = TimeDelta::days(1);
    if night <= TimeDelta::zero() {
        night + day
    } else if night > day {
        night - day
    } else {
        night
    }
}

impl PrayerTimes {
    /// Computes the prayer times for `date` at `coordinates`.
    ///
    /// # Errors
    /// Returns `InvalidAngle` or `InvalidInterval` for inconsistent parameters, and
    /// `InvalidDate` when the following day cannot be represented.
    pub fn new(
        coordinates: Coordinates,
        date: NaiveDate,
        parameters: CalculationParameters,
    ) -> Result<Self> {
        parameters.validate()?;
        let ctx = Context::new(coordinates, date, &parameters)?;
        let today = &ctx.days.today;

        let fajr = base_fajr(&ctx, &parameters);
        let isha = base_isha(&ctx, &parameters);
        let maghrib = base_maghrib(&ctx, &parameters, isha);
        let dhuhr = utc_instant(date, Some(today.transit()));
        let asr = utc_instant(date, today.afternoon(parameters.madhab.shadow_length()));

        let finish = |prayer: Prayer, instant: Option<DateTime<Utc>>| {
            let minutes = i64::from(parameters.total_adjustment(prayer));
            add_minutes(instant?, minutes).map(|t| rounded_minute(t, parameters.rounding))
        };

        Ok(Self {
            coordinates,
            date,
            parameters,
            fajr: finish(Prayer::Fajr, fajr),
            sunrise: finish(Prayer::Sunrise, ctx.sunrise),
            dhuhr: finish(Prayer::Dhuhr, dhuhr),
            asr: finish(Prayer::Asr, asr),
            sunset: ctx.sunset.map(|t| rounded_minute(t, parameters.rounding)),
            maghrib: finish(Prayer::Maghrib, maghrib),
            isha: finish(Prayer::Isha, isha),
        })
    }

    /// Position the times were computed for.
    #[must_use]
    pub const fn coordinates(&self) -> &Coordinates {
        &self.coordinates
    }

    /// Date the times were computed for.
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    /// Parameters the times were computed with.
    #[must_use]
    pub const fn parameters(&self) -> &CalculationParameters {
        &self.parameters
    }

    /// Fajr.
    #[must_use]
    pub const fn fajr(&self) -> Option<DateTime<Utc>> {
        self.fajr
    }

    /// Sunrise, with its adjustment applied.
    #[must_use]
    pub const fn sunrise(&self) -> Option<DateTime<Utc>> {
        self.sunrise
    }

    /// Dhuhr.
    #[must_use]
    pub const fn dhuhr(&self) -> Option<DateTime<Utc>> {
        self.dhuhr
    }

    /// Asr.
    #[must_use]
    pub const fn asr(&self) -> Option<DateTime<Utc>> {
        self.asr
    }

    /// Sunset, rounded but never adjusted.
    #[must_use]
    pub const fn sunset(&self) -> Option<DateTime<Utc>> {
        self.sunset
    }

    /// Maghrib.
    #[must_use]
    pub const fn maghrib(&self) -> Option<DateTime<Utc>> {
        self.maghrib
    }

    /// Isha.
    #[must_use]
    pub const fn isha(&self) -> Option<DateTime<Utc>> {
        self.isha
    }

    /// Time of `prayer`.
    #[must_use]
    pub const fn time_for_prayer(&self, prayer: Prayer) -> Option<DateTime<Utc>> {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Latest prayer that has started at `now`, or `None` before fajr.
    #[must_use]
    pub fn current_prayer(&self, now: DateTime<Utc>) -> Option<Prayer> {
        Prayer::ALL
            .into_iter()
            .rev()
            .find(|&prayer| self.time_for_prayer(prayer).is_some_and(|t| t <= now))
    }

    /// Earliest prayer that starts after `now`, or `None` after isha.
    #[must_use]
    pub fn next_prayer(&self, now: DateTime<Utc>) -> Option<Prayer> {
        Prayer::ALL
            .into_iter()
            .find(|&prayer| self.time_for_prayer(prayer).is_some_and(|t| t > now))
    }
}

/// Fajr before adjustments: the angle time, bounded so that it is never earlier than
/// the high-latitude limit.
fn base_fajr(ctx: &Context, params: &CalculationParameters) -> Option<DateTime<Utc>> {
    let convention = params.method.twilight_convention();
    let raw = ctx.days.today.hour_angle(-params.fajr_angle, false);

    let fajr = if ctx.seventh_of_night_applies(convention) {
        ctx.night_offset(ctx.sunrise, -1.0 / 7.0)
    } else {
        utc_instant(ctx.date, raw)
    };

    let limit = match convention {
        TwilightConvention::SeasonAdjusted => ctx.sunrise.and_then(|sunrise| {
            season_adjusted_morning_twilight(
                ctx.coordinates.latitude(),
                ctx.day_of_year(),
                ctx.date.year(),
                sunrise,
            )
        }),
        TwilightConvention::TrustAngle if fajr.is_some() => fajr,
        TwilightConvention::TrustAngle | TwilightConvention::Standard
            if params.high_latitude_fajr_rule == HighLatitudeFajrRule::NearestValidDay
                && raw.is_none() =>
        {
            nearest_valid_dawn(ctx.date, ctx.coordinates, params.fajr_angle)
        }
        TwilightConvention::TrustAngle | TwilightConvention::Standard => {
            ctx.night_offset(ctx.sunrise, -params.night_portions().fajr)
        }
    };

    match (fajr, limit) {
        (Some(fajr), Some(limit)) if limit > fajr => {
            debug!("fajr moved from {fajr} to {limit} on {}", ctx.date);
            Some(limit)
        }
        (Some(fajr), _) => Some(fajr),
        (None, limit) => {
            debug!("fajr angle not reached on {}, using {limit:?}", ctx.date);
            limit
        }
    }
}

/// Isha before adjustments: the fixed interval if configured, otherwise the angle time
/// bounded so that it is never later than the high-latitude limit.
fn base_isha(ctx: &Context, params: &CalculationParameters) -> Option<DateTime<Utc>> {
    if let Some(minutes) = params.isha_interval {
        return add_minutes(ctx.sunset?, i64::from(minutes));
    }

    let convention = params.method.twilight_convention();
    let isha = if ctx.seventh_of_night_applies(convention) {
        ctx.night_offset(ctx.sunset, 1.0 / 7.0)
    } else {
        utc_instant(ctx.date, ctx.days.today.hour_angle(-params.isha_angle, true))
    };

    let limit = match convention {
        TwilightConvention::SeasonAdjusted => ctx.sunset.and_then(|sunset| {
            season_adjusted_evening_twilight(
                ctx.coordinates.latitude(),
                ctx.day_of_year(),
                ctx.date.year(),
                sunset,
                params.shafaq,
            )
        }),
        TwilightConvention::TrustAngle | TwilightConvention::Standard => {
            ctx.night_offset(ctx.sunset, params.night_portions().isha)
        }
    };

    match (isha, limit) {
        (Some(isha), Some(limit)) if limit < isha => {
            debug!("isha moved from {isha} to {limit} on {}", ctx.date);
            Some(limit)
        }
        (Some(isha), _) => Some(isha),
        (None, limit) => {
            debug!("isha angle not reached on {}, using {limit:?}", ctx.date);
            limit
        }
    }
}

/// Maghrib before adjustments: sunset, unless the maghrib angle time falls strictly
/// between sunset and isha.
fn base_maghrib(
    ctx: &Context,
    params: &CalculationParameters,
    isha: Option<DateTime<Utc>>,
) -> Option<DateTime<Utc>> {
    let by_angle = params.maghrib_angle.and_then(|angle| {
        let candidate = utc_instant(ctx.date, ctx.days.today.hour_angle(-angle, true))?;
        (ctx.sunset? < candidate && candidate < isha?).then_some(candidate)
    });
    by_angle.or(ctx.sunset)
}
