//! Calculation conventions: method presets, jurisprudential school, high-latitude
//! handling, manual adjustments and rounding.

use crate::error::check_angle;
use crate::{Coordinates, Error, Prayer, Result};

/// Jurisprudential school, which decides the shadow length used for asr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Madhab {
    /// Shafi, Maliki and Hanbali: shadow equals object length (plus noon shadow)
    #[default]
    Shafi,
    /// Hanafi: shadow equals twice the object length (plus noon shadow)
    Hanafi,
}

impl Madhab {
    /// Shadow-to-object ratio for asr.
    #[must_use]
    pub const fn shadow_length(&self) -> f64 {
        match self {
            Self::Shafi => 1.0,
            Self::Hanafi => 2.0,
        }
    }
}

/// Which twilight glow marks the end of maghrib in the season-adjusted model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Shafaq {
    /// Blend of the red and white glow models
    #[default]
    General,
    /// Red glow, the shorter twilight
    Ahmer,
    /// White glow, the longer twilight
    Abyad,
}

/// Rounding applied to every computed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rounding {
    /// Round to the nearest minute
    #[default]
    Nearest,
    /// Round up to the next whole minute
    Up,
    /// Keep seconds
    None,
}

/// How much of the night bounds fajr and isha when the twilight angle is too deep
/// to be reached (or comes later than the bound).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighLatitudeRule {
    /// Fajr no earlier than the middle of the night, isha no later
    #[default]
    MiddleOfTheNight,
    /// Fajr no earlier than the last seventh of the night, isha no later than the first
    SeventhOfTheNight,
    /// Night portion proportional to the twilight angle (angle / 60)
    TwilightAngle,
}

impl HighLatitudeRule {
    /// Suggested rule for `coordinates`: the seventh of the night above 48°, the
    /// middle of the night elsewhere.
    #[must_use]
    pub fn recommended(coordinates: &Coordinates) -> Self {
        if coordinates.latitude() > 48.0 {
            Self::SeventhOfTheNight
        } else {
            Self::MiddleOfTheNight
        }
    }
}

/// Fraction of the night used as the fajr and isha bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NightPortions {
    /// Portion before sunrise
    pub fajr: f64,
    /// Portion after sunset
    pub isha: f64,
}

/// What to do when the fajr angle is never reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HighLatitudeFajrRule {
    /// Fall back to the night-portion bound
    #[default]
    None,
    /// Use the fajr time of the nearest day on which the angle is reached
    NearestValidDay,
}

/// What to do when the sun does not rise or set at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PolarCircleResolution {
    /// Borrow the geometry of the nearest date with a sunrise and a sunset
    NearestDay,
    /// Borrow the geometry of the nearest latitude (toward the equator) with a sunrise and a sunset
    NearestLatitude,
    /// Leave the affected times undefined
    #[default]
    Unresolved,
}

/// Per-prayer adjustments in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PrayerAdjustments {
    /// Fajr adjustment
    pub fajr: i32,
    /// Sunrise adjustment
    pub sunrise: i32,
    /// Dhuhr adjustment
    pub dhuhr: i32,
    /// Asr adjustment
    pub asr: i32,
    /// Maghrib adjustment
    pub maghrib: i32,
    /// Isha adjustment
    pub isha: i32,
}

impl PrayerAdjustments {
    /// Adjustment for `prayer`, in minutes.
    #[must_use]
    pub const fn for_prayer(&self, prayer: Prayer) -> i32 {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }
}

/// Calculation method: the institution whose conventions are followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalculationMethod {
    /// Muslim World League. Fajr 18°, isha 17°.
    MuslimWorldLeague,
    /// Egyptian General Authority of Survey. Fajr 19.5°, isha 17.5°.
    Egyptian,
    /// University of Islamic Sciences, Karachi. Fajr 18°, isha 18°.
    Karachi,
    /// Umm al-Qura University, Makkah. Fajr 18.5°, isha 90 minutes after maghrib.
    UmmAlQura,
    /// UAE. Fajr 18.2°, isha 18.2°.
    Dubai,
    /// Moonsighting Committee. Fajr 18°, isha 18°, with season-adjusted twilight bounds.
    MoonsightingCommittee,
    /// ISNA. Fajr 15°, isha 15°.
    NorthAmerica,
    /// Kuwait. Fajr 18°, isha 17.5°.
    Kuwait,
    /// Qatar. Fajr 18°, isha 90 minutes after maghrib.
    Qatar,
    /// Majlis Ugama Islam Singapura. Fajr 20°, isha 18°, rounded up.
    Singapore,
    /// Institute of Geophysics, University of Tehran. Fajr 17.7°, isha 14°, maghrib 4.5°.
    Tehran,
    /// Diyanet İşleri Başkanlığı. Fajr 18°, isha 17°.
    Turkey,
    /// United Kingdom. Fajr 18°, isha 17°; a reachable fajr angle is used as is.
    UnitedKingdom,
    /// No preset angles; set them with the builder methods.
    Other,
}

/// How a method bounds fajr and isha beyond the plain angle result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TwilightConvention {
    /// Night/7 above 55° and season-adjusted twilight as the bound
    SeasonAdjusted,
    /// A reachable fajr angle bypasses the night-portion bound
    TrustAngle,
    /// Night-portion bound from the high-latitude rule
    Standard,
}

impl CalculationMethod {
    /// Default parameters for this method.
    ///
    /// # Example
    /// ```
    /// # use prayer_times::CalculationMethod;
    /// let params = CalculationMethod::UmmAlQura.parameters();
    /// assert_eq!(params.fajr_angle, 18.5);
    /// assert_eq!(params.isha_interval, Some(90));
    /// ```
    #[must_use]
    pub fn parameters(self) -> CalculationParameters {
        let base = CalculationParameters::new(self, 0.0, 0.0);
        match self {
            Self::MuslimWorldLeague => CalculationParameters {
                fajr_angle: 18.0,
                isha_angle: 17.0,
                ..base
            }
            .with_method_adjustments(dhuhr_only(1)),
            Self::Egyptian => CalculationParameters {
                fajr_angle: 19.5,
                isha_angle: 17.5,
                ..base
            }
            .with_method_adjustments(dhuhr_only(1)),
            Self::Karachi => CalculationParameters {
                fajr_angle: 18.0,
                isha_angle: 18.0,
                ..base
            }
            .with_method_adjustments(dhuhr_only(1)),
            Self::UmmAlQura => CalculationParameters {
                fajr_angle: 18.5,
                isha_interval: Some(90),
                ..base
            },
            Self::Dubai => CalculationParameters {
                fajr_angle: 18.2,
                isha_angle: 18.2,
                ..base
            }
            .with_method_adjustments(PrayerAdjustments {
                sunrise: -3,
                dhuhr: 3,
                asr: 3,
                maghrib: 3,
                ..PrayerAdjustments::default()
            }),
            Self::MoonsightingCommittee => CalculationParameters {
                fajr_angle: 18.0,
                isha_angle: 18.0,
                ..base
            }
            .with_method_adjustments(PrayerAdjustments {
                dhuhr: 5,
                maghrib: 3,
                ..PrayerAdjustments::default()
            }),
            Self::NorthAmerica => CalculationParameters {
                fajr_angle: 15.0,
                isha_angle: 15.0,
                ..base
            }
            .with_method_adjustments(dhuhr_only(1)),
            Self::Kuwait => CalculationParameters {
                fajr_angle: 18.0,
                isha_angle: 17.5,
                ..base
            },
            Self::Qatar => CalculationParameters {
                fajr_angle: 18.0,
                isha_interval: Some(90),
                ..base
            },
            Self::Singapore => CalculationParameters {
                fajr_angle: 20.0,
                isha_angle: 18.0,
                rounding: Rounding::Up,
                ..base
            }
            .with_method_adjustments(dhuhr_only(1)),
            Self::Tehran => CalculationParameters {
                fajr_angle: 17.7,
                isha_angle: 14.0,
                maghrib_angle: Some(4.5),
                ..base
            },
            Self::Turkey => CalculationParameters {
                fajr_angle: 18.0,
                isha_angle: 17.0,
                ..base
            }
            .with_method_adjustments(PrayerAdjustments {
                sunrise: -7,
                dhuhr: 5,
                asr: 4,
                maghrib: 7,
                ..PrayerAdjustments::default()
            }),
            Self::UnitedKingdom => CalculationParameters {
                fajr_angle: 18.0,
                isha_angle: 17.0,
                ..base
            },
            Self::Other => base,
        }
    }

    pub(crate) const fn twilight_convention(self) -> TwilightConvention {
        match self {
            Self::MoonsightingCommittee => TwilightConvention::SeasonAdjusted,
            Self::UnitedKingdom => TwilightConvention::TrustAngle,
            Self::MuslimWorldLeague
            | Self::Egyptian
            | Self::Karachi
            | Self::UmmAlQura
            | Self::Dubai
            | Self::NorthAmerica
            | Self::Kuwait
            | Self::Qatar
            | Self::Singapore
            | Self::Tehran
            | Self::Turkey
            | Self::Other => TwilightConvention::Standard,
        }
    }
}

const fn dhuhr_only(minutes: i32) -> PrayerAdjustments {
    PrayerAdjustments {
        fajr: 0,
        sunrise: 0,
        dhuhr: minutes,
        asr: 0,
        maghrib: 0,
        isha: 0,
    }
}

/// Full set of inputs, besides position and date, for a prayer time calculation.
///
/// Start from [`CalculationMethod::parameters`] and override with the `with_*` methods.
///
/// # Example
/// ```
/// # use prayer_times::{CalculationMethod, HighLatitudeRule, Madhab};
/// let params = CalculationMethod::NorthAmerica
///     .parameters()
///     .with_madhab(Madhab::Hanafi)
///     .with_high_latitude_rule(HighLatitudeRule::SeventhOfTheNight);
/// assert_eq!(params.madhab.shadow_length(), 2.0);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationParameters {
    /// Method the remaining defaults came from
    pub method: CalculationMethod,
    /// Sun depression angle for fajr, degrees
    pub fajr_angle: f64,
    /// Sun depression angle for isha, degrees
    pub isha_angle: f64,
    /// Fixed minutes from sunset to isha; replaces `isha_angle` when set
    pub isha_interval: Option<u32>,
    /// Sun depression angle for maghrib, degrees
    pub maghrib_angle: Option<f64>,
    /// School for asr
    pub madhab: Madhab,
    /// Night-portion bound
    pub high_latitude_rule: HighLatitudeRule,
    /// Handling of an unreachable fajr angle
    pub high_latitude_fajr_rule: HighLatitudeFajrRule,
    /// Handling of days without sunrise or sunset
    pub polar_circle_resolution: PolarCircleResolution,
    /// Twilight glow for the season-adjusted isha
    pub shafaq: Shafaq,
    /// User adjustments in minutes
    pub adjustments: PrayerAdjustments,
    /// Adjustments the method prescribes, in minutes
    pub method_adjustments: PrayerAdjustments,
    /// Rounding of the final times
    pub rounding: Rounding,
}

impl CalculationParameters {
    /// Parameters with the given method tag and angles, and defaults everywhere else.
    #[must_use]
    pub fn new(method: CalculationMethod, fajr_angle: f64, isha_angle: f64) -> Self {
        Self {
            method,
            fajr_angle,
            isha_angle,
            isha_interval: None,
            maghrib_angle: None,
            madhab: Madhab::default(),
            high_latitude_rule: HighLatitudeRule::default(),
            high_latitude_fajr_rule: HighLatitudeFajrRule::default(),
            polar_circle_resolution: PolarCircleResolution::default(),
            shafaq: Shafaq::default(),
            adjustments: PrayerAdjustments::default(),
            method_adjustments: PrayerAdjustments::default(),
            rounding: Rounding::default(),
        }
    }

    /// Overrides the fajr and isha angles.
    #[must_use]
    pub const fn with_angles(mut self, fajr_angle: f64, isha_angle: f64) -> Self {
        self.fajr_angle = fajr_angle;
        self.isha_angle = isha_angle;
        self
    }

    /// Sets (or clears) a fixed isha interval in minutes.
    #[must_use]
    pub const fn with_isha_interval(mut self, minutes: Option<u32>) -> Self {
        self.isha_interval = minutes;
        self
    }

    /// Sets (or clears) a maghrib depression angle.
    #[must_use]
    pub const fn with_maghrib_angle(mut self, angle: Option<f64>) -> Self {
        self.maghrib_angle = angle;
        self
    }

    /// Sets the school for asr.
    #[must_use]
    pub const fn with_madhab(mut self, madhab: Madhab) -> Self {
        self.madhab = madhab;
        self
    }

    /// Sets the night-portion bound.
    #[must_use]
    pub const fn with_high_latitude_rule(mut self, rule: HighLatitudeRule) -> Self {
        self.high_latitude_rule = rule;
        self
    }

    /// Sets the handling of an unreachable fajr angle.
    #[must_use]
    pub const fn with_high_latitude_fajr_rule(mut self, rule: HighLatitudeFajrRule) -> Self {
        self.high_latitude_fajr_rule = rule;
        self
    }

    /// Sets the handling of days without sunrise or sunset.
    #[must_use]
    pub const fn with_polar_circle_resolution(mut self, resolution: PolarCircleResolution) -> Self {
        self.polar_circle_resolution = resolution;
        self
    }

    /// Sets the twilight glow.
    #[must_use]
    pub const fn with_shafaq(mut self, shafaq: Shafaq) -> Self {
        self.shafaq = shafaq;
        self
    }

    /// Sets the user adjustments.
    #[must_use]
    pub const fn with_adjustments(mut self, adjustments: PrayerAdjustments) -> Self {
        self.adjustments = adjustments;
        self
    }

    /// Sets the method adjustments.
    #[must_use]
    pub const fn with_method_adjustments(mut self, adjustments: PrayerAdjustments) -> Self {
        self.method_adjustments = adjustments;
        self
    }

    /// Sets the rounding.
    #[must_use]
    pub const fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
    }

    /// Night portions for the configured high-latitude rule.
    #[must_use]
    pub fn night_portions(&self) -> NightPortions {
        match self.high_latitude_rule {
            HighLatitudeRule::MiddleOfTheNight => NightPortions {
                fajr: 1.0 / 2.0,
                isha: 1.0 / 2.0,
            },
            HighLatitudeRule::SeventhOfTheNight => NightPortions {
                fajr: 1.0 / 7.0,
                isha: 1.0 / 7.0,
            },
            HighLatitudeRule::TwilightAngle => NightPortions {
                fajr: self.fajr_angle / 60.0,
                isha: self.isha_angle / 60.0,
            },
        }
    }

    /// Method plus user adjustment for `prayer`, in minutes.
    #[must_use]
    pub const fn total_adjustment(&self, prayer: Prayer) -> i32 {
        self.method_adjustments.for_prayer(prayer) + self.adjustments.for_prayer(prayer)
    }

    /// Checks angles and intervals.
    ///
    /// # Errors
    /// Returns `InvalidAngle` for an angle outside 0 to 90 degrees, or
    /// `InvalidInterval` for a zero-minute isha interval.
    pub fn validate(&self) -> Result<()> {
        check_angle("fajr angle", self.fajr_angle)?;
        check_angle("isha angle", self.isha_angle)?;
        if let Some(angle) = self.maghrib_angle {
            check_angle("maghrib angle", angle)?;
        }
        if self.isha_interval == Some(0) {
            return Err(Error::invalid_interval(0));
        }
        Ok(())
    }
}
