//! # Prayer Times Library
//!
//! Islamic prayer times from solar geometry: fajr, sunrise, dhuhr, asr, maghrib and isha
//! for any position and date.

#![cfg_attr(not(feature = "std"), no_std)]
//!
//! The sun's position is computed with the low-precision algorithms from Jean Meeus'
//! *Astronomical Algorithms*, interpolated across the previous, current and next day.
//! Each prayer is then derived from a depression angle, a shadow ratio or a fixed
//! interval, according to the conventions of a [`CalculationMethod`].
//!
//! ## Features
//!
//! - Presets for the common calculation methods, with per-field overrides
//! - High-latitude handling: night-portion bounds, nearest valid day for fajr, and
//!   substitute geometry inside the polar circles
//! - Undefined events are `None`, never a sentinel value
//! - Stateless and thread-safe: every call builds its own immutable data
//!
//! ## Feature Flags
//!
//! - `std` (default): Use standard library for native math functions (usually faster than `libm`)
//! - `libm`: Use pure Rust math for `no_std` environments
//!
//! **Configuration examples:**
//! ```toml
//! # Default
//! prayer-times = "0.1"
//!
//! # no_std
//! prayer-times = { version = "0.1", default-features = false, features = ["libm"] }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use prayer_times::{CalculationMethod, Coordinates, Madhab, Prayer, PrayerTimes};
//! use chrono::NaiveDate;
//!
//! let makkah = Coordinates::new(21.4225241, 39.8261818).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
//! let params = CalculationMethod::UmmAlQura.parameters().with_madhab(Madhab::Shafi);
//!
//! let times = PrayerTimes::new(makkah, date, params).unwrap();
//! for prayer in Prayer::ALL {
//!     if let Some(time) = times.time_for_prayer(prayer) {
//!         println!("{prayer:?}: {time}");
//!     }
//! }
//! ```
//!
//! ### High latitudes
//! ```rust
//! use prayer_times::{
//!     CalculationMethod, Coordinates, HighLatitudeRule, PolarCircleResolution, PrayerTimes,
//! };
//! use chrono::NaiveDate;
//!
//! let tromso = Coordinates::new(69.6492, 18.9553).unwrap();
//! let date = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
//!
//! let unresolved = CalculationMethod::MuslimWorldLeague.parameters();
//! let times = PrayerTimes::new(tromso, date, unresolved).unwrap();
//! assert!(times.sunrise().is_none()); // midnight sun
//!
//! let resolved = unresolved
//!     .with_high_latitude_rule(HighLatitudeRule::recommended(&tromso))
//!     .with_polar_circle_resolution(PolarCircleResolution::NearestLatitude);
//! let times = PrayerTimes::new(tromso, date, resolved).unwrap();
//! assert!(times.sunrise().is_some() && times.isha().is_some());
//! ```
//!
//! ## References
//!
//! - Meeus, J. (1998). Astronomical Algorithms, 2nd edition. Willmann-Bell.
//! - Shaukat, K. Fajr and Isha. Moonsighting Committee Worldwide (season-adjusted twilight).
//!
//! ## Conventions
//!
//! - **Times**: `DateTime<Utc>`, anchored on the requested date at 0h UTC
//! - **Angles**: degrees; depression angles are given as positive values
//! - **Qibla**: degrees clockwise from true north (0° to 360°)

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery, clippy::cargo, clippy::all)]
#![allow(
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cargo_common_metadata,
    clippy::multiple_crate_versions, // Acceptable for dev-dependencies
    clippy::float_cmp, // Exact comparisons of mathematical constants in tests
)]

// Public API exports
pub use crate::error::{Error, Result};
pub use crate::params::{
    CalculationMethod, CalculationParameters, HighLatitudeFajrRule, HighLatitudeRule, Madhab,
    NightPortions, PolarCircleResolution, PrayerAdjustments, Rounding, Shafaq,
};
pub use crate::prayer_times::PrayerTimes;
pub use crate::qibla::qibla;
pub use crate::solar_time::SolarTime;
pub use crate::sunnah::SunnahTimes;
pub use crate::types::{Coordinates, HoursUtc, Prayer};

// Astronomy
pub mod astronomy;
pub mod solar_time;

// High-latitude resolvers
pub mod high_latitude;
pub mod polar;

// Prayer times
pub mod params;
pub mod prayer_times;
pub mod qibla;
pub mod sunnah;

// Core modules
pub mod error;
pub mod types;

// Internal modules
mod math;

// Public modules
pub mod time;
