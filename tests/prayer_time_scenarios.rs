//! End-to-end scenarios: published times, ordering, high latitudes and polar days.

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};
use chrono_tz::America::New_York;
use prayer_times::{
    CalculationMethod, CalculationParameters, Coordinates, HighLatitudeFajrRule, HighLatitudeRule,
    Madhab, PolarCircleResolution, Prayer, PrayerAdjustments, PrayerTimes, Rounding,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn all_times(times: &PrayerTimes) -> [Option<DateTime<Utc>>; 7] {
    [
        times.fajr(),
        times.sunrise(),
        times.dhuhr(),
        times.asr(),
        times.sunset(),
        times.maghrib(),
        times.isha(),
    ]
}

#[test]
fn published_raleigh_times() {
    let raleigh = Coordinates::new(35.7750, -78.6336).unwrap();
    let params = CalculationMethod::NorthAmerica
        .parameters()
        .with_madhab(Madhab::Hanafi);
    let times = PrayerTimes::new(raleigh, date(2015, 7, 12), params).unwrap();

    let local = |time: Option<DateTime<Utc>>| {
        time.unwrap()
            .with_timezone(&New_York)
            .format("%-I:%M %p")
            .to_string()
    };
    assert_eq!(local(times.fajr()), "4:42 AM");
    assert_eq!(local(times.sunrise()), "6:08 AM");
    assert_eq!(local(times.dhuhr()), "1:21 PM");
    assert_eq!(local(times.asr()), "6:22 PM");
    assert_eq!(local(times.maghrib()), "8:32 PM");
    assert_eq!(local(times.isha()), "9:57 PM");
}

#[test]
fn times_are_ordered_away_from_the_poles() {
    let places = [
        (35.78, 51.42),
        (21.4225, 39.8262),
        (-33.8688, 151.2093),
        (1.3521, 103.8198),
        (40.7128, -74.0059),
        (-34.6037, -58.3816),
        (51.5074, -0.1278),
        (-50.0, 179.0),
        (52.0, -179.5),
    ];
    let methods = [
        CalculationMethod::MuslimWorldLeague,
        CalculationMethod::Egyptian,
        CalculationMethod::UmmAlQura,
        CalculationMethod::MoonsightingCommittee,
        CalculationMethod::Tehran,
    ];
    for (latitude, longitude) in places {
        let coordinates = Coordinates::new(latitude, longitude).unwrap();
        for month in [1, 4, 7, 10] {
            for method in methods {
                let times =
                    PrayerTimes::new(coordinates, date(2024, month, 15), method.parameters())
                        .unwrap();
                let sequence = all_times(&times);
                assert!(
                    sequence.iter().all(Option::is_some),
                    "{method:?} at {latitude},{longitude} in month {month}"
                );
                assert!(
                    sequence.windows(2).all(|w| w[0] <= w[1]),
                    "{method:?} at {latitude},{longitude} in month {month}: {sequence:?}"
                );
            }
        }
    }
}

#[test]
fn antimeridian_days_stay_ordered() {
    let params = CalculationMethod::MuslimWorldLeague.parameters();
    for (latitude, longitude) in [(-50.0, 179.0), (50.0, -179.9), (0.0, 180.0)] {
        let coordinates = Coordinates::new(latitude, longitude).unwrap();
        let mut day = date(2024, 1, 1);
        while day.year() == 2024 {
            let times = PrayerTimes::new(coordinates, day, params).unwrap();
            let sequence = all_times(&times);
            assert!(
                sequence.iter().all(Option::is_some),
                "{latitude},{longitude} on {day}"
            );
            assert!(
                sequence.windows(2).all(|w| w[0] <= w[1]),
                "{latitude},{longitude} on {day}: {sequence:?}"
            );
            day += TimeDelta::days(1);
        }
    }
}

#[test]
fn tehran_midsummer_is_finite_and_ordered() {
    let tehran = Coordinates::new(35.78, 51.42).unwrap();
    let params = CalculationParameters::new(CalculationMethod::Other, 18.0, 17.0);
    let times = PrayerTimes::new(tehran, date(2023, 6, 21), params).unwrap();
    let sequence = all_times(&times);
    assert!(sequence.iter().all(Option::is_some));
    assert!(sequence.windows(2).all(|w| w[0] <= w[1]));
    assert!(times.fajr() < times.sunrise());
    assert!(times.sunset() < times.isha());
}

#[test]
fn calculation_is_deterministic() {
    let coordinates = Coordinates::new(48.8566, 2.3522).unwrap();
    let params = CalculationMethod::MoonsightingCommittee
        .parameters()
        .with_polar_circle_resolution(PolarCircleResolution::NearestDay);
    let a = PrayerTimes::new(coordinates, date(2022, 11, 5), params).unwrap();
    let b = PrayerTimes::new(coordinates, date(2022, 11, 5), params).unwrap();
    assert_eq!(a, b);
}

#[test]
fn hanafi_asr_never_precedes_shafi() {
    let coordinates = Coordinates::new(24.8607, 67.0011).unwrap();
    let shafi = CalculationMethod::Karachi.parameters();
    let hanafi = shafi.with_madhab(Madhab::Hanafi);
    let mut day = date(2024, 1, 1);
    for _ in 0..52 {
        let a = PrayerTimes::new(coordinates, day, shafi).unwrap();
        let b = PrayerTimes::new(coordinates, day, hanafi).unwrap();
        assert!(b.asr() >= a.asr(), "{day}");
        day += TimeDelta::days(7);
    }
}

#[test]
fn maghrib_defaults_to_sunset() {
    let coordinates = Coordinates::new(59.9139, 10.7522).unwrap();
    let params = CalculationMethod::MuslimWorldLeague
        .parameters()
        .with_method_adjustments(PrayerAdjustments::default());
    for month in 1..=12 {
        let times = PrayerTimes::new(coordinates, date(2023, month, 1), params).unwrap();
        assert_eq!(times.maghrib(), times.sunset(), "month {month}");
    }
}

#[test]
fn isha_interval_ignores_angle() {
    let coordinates = Coordinates::new(25.2854, 51.531).unwrap();
    let base = CalculationMethod::Qatar
        .parameters()
        .with_rounding(Rounding::None);
    for angle in [0.0, 12.0, 18.0, 40.0] {
        let params = base.with_angles(18.0, angle);
        let times = PrayerTimes::new(coordinates, date(2022, 8, 30), params).unwrap();
        assert_eq!(
            times.isha(),
            Some(times.sunset().unwrap() + TimeDelta::minutes(90))
        );
    }
}

#[test]
fn seventh_of_night_only_for_moonsighting_committee() {
    let d = date(2021, 6, 21);
    let raw = |method: CalculationMethod| {
        method
            .parameters()
            .with_method_adjustments(PrayerAdjustments::default())
            .with_rounding(Rounding::None)
    };
    let night_after = |coordinates: Coordinates, times: &PrayerTimes| {
        let params = raw(CalculationMethod::MoonsightingCommittee);
        let tomorrow = PrayerTimes::new(coordinates, date(2021, 6, 22), params).unwrap();
        tomorrow.sunrise().unwrap() - times.sunset().unwrap()
    };
    let close = |a: DateTime<Utc>, b: DateTime<Utc>| (a - b).num_milliseconds().abs() <= 2;

    // Above 55° the Moonsighting Committee takes a seventh of the night
    let edinburgh = Coordinates::new(55.9533, -3.1883).unwrap();
    let msc =
        PrayerTimes::new(edinburgh, d, raw(CalculationMethod::MoonsightingCommittee)).unwrap();
    let seventh = night_after(edinburgh, &msc) / 7;
    assert!(close(msc.fajr().unwrap(), msc.sunrise().unwrap() - seventh));
    assert!(close(msc.isha().unwrap(), msc.sunset().unwrap() + seventh));

    // Other methods at the same place use their own night portion
    let mwl = PrayerTimes::new(edinburgh, d, raw(CalculationMethod::MuslimWorldLeague)).unwrap();
    let half = night_after(edinburgh, &mwl) / 2;
    assert!(close(mwl.fajr().unwrap(), mwl.sunrise().unwrap() - half));

    // Below 55° the Moonsighting Committee uses its season-adjusted twilight
    let york = Coordinates::new(53.96, -1.08).unwrap();
    let msc_south =
        PrayerTimes::new(york, d, raw(CalculationMethod::MoonsightingCommittee)).unwrap();
    let sunrise = msc_south.sunrise().unwrap();
    let season =
        prayer_times::astronomy::season_adjusted_morning_twilight(53.96, 172, 2021, sunrise);
    assert_eq!(msc_south.fajr(), season);
    assert!(msc_south.fajr().unwrap() < sunrise - night_after(york, &msc_south) / 7);
}

#[test]
fn polar_day_unresolved_leaves_times_undefined() {
    init_logging();
    let svalbard = Coordinates::new(78.2232, 15.6267).unwrap();
    let params = CalculationMethod::MuslimWorldLeague.parameters();
    let times = PrayerTimes::new(svalbard, date(2020, 6, 21), params).unwrap();

    assert_eq!(times.sunrise(), None);
    assert_eq!(times.sunset(), None);
    assert_eq!(times.fajr(), None);
    assert_eq!(times.maghrib(), None);
    assert_eq!(times.isha(), None);
    assert!(times.dhuhr().is_some());
}

#[test]
fn polar_day_resolved_is_finite() {
    init_logging();
    let svalbard = Coordinates::new(78.2232, 15.6267).unwrap();
    let requested = date(2020, 6, 21);
    for resolution in [
        PolarCircleResolution::NearestDay,
        PolarCircleResolution::NearestLatitude,
    ] {
        let params = CalculationMethod::MuslimWorldLeague
            .parameters()
            .with_high_latitude_rule(HighLatitudeRule::SeventhOfTheNight)
            .with_polar_circle_resolution(resolution);
        let times = PrayerTimes::new(svalbard, requested, params).unwrap();

        for prayer in Prayer::ALL {
            let time = times.time_for_prayer(prayer);
            assert!(time.is_some(), "{resolution:?} {prayer:?}");
        }
        // Anchored on the requested date, give or take the UTC day boundary
        let dhuhr = times.dhuhr().unwrap();
        assert_eq!(dhuhr.date_naive(), requested);
        let window = requested.and_time(NaiveTime::MIN).and_utc();
        for time in all_times(&times).into_iter().flatten() {
            assert!(time > window - TimeDelta::days(1) && time < window + TimeDelta::days(2));
        }
        assert!(times.sunrise() < times.sunset());
        assert!(times.sunset() <= times.isha());
    }
}

#[test]
fn nearest_valid_day_reanchors_dawn() {
    init_logging();
    let edinburgh = Coordinates::new(55.9533, -3.1883).unwrap();
    let requested = date(2021, 6, 21);
    let params = CalculationMethod::MuslimWorldLeague
        .parameters()
        .with_high_latitude_fajr_rule(HighLatitudeFajrRule::NearestValidDay)
        .with_method_adjustments(PrayerAdjustments::default());
    let times = PrayerTimes::new(edinburgh, requested, params).unwrap();

    let fajr = times.fajr().unwrap();
    assert_eq!(fajr.date_naive(), requested);

    let expected = prayer_times::high_latitude::nearest_valid_dawn(requested, edinburgh, 18.0)
        .map(|t| prayer_times::time::rounded_minute(t, Rounding::Nearest));
    assert_eq!(Some(fajr), expected);

    // Without the rule the night portion applies instead
    let fallback = PrayerTimes::new(
        edinburgh,
        requested,
        params.with_high_latitude_fajr_rule(HighLatitudeFajrRule::None),
    )
    .unwrap();
    assert_ne!(fallback.fajr(), times.fajr());
}

#[test]
fn current_and_next_prayer_through_the_day() {
    let makkah = Coordinates::new(21.4225241, 39.8261818).unwrap();
    let times =
        PrayerTimes::new(makkah, date(2024, 3, 15), CalculationMethod::UmmAlQura.parameters())
            .unwrap();

    let mut previous = None;
    for prayer in Prayer::ALL {
        let at = times.time_for_prayer(prayer).unwrap();
        assert_eq!(times.current_prayer(at), Some(prayer));
        assert_eq!(times.current_prayer(at - TimeDelta::seconds(1)), previous);
        assert_eq!(times.next_prayer(at - TimeDelta::seconds(1)), Some(prayer));
        previous = Some(prayer);
    }

    let midnight = Utc.with_ymd_and_hms(2024, 3, 14, 21, 0, 0).unwrap();
    assert_eq!(times.current_prayer(midnight), None);
    assert_eq!(times.next_prayer(midnight), Some(Prayer::Fajr));
}
