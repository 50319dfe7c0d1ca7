//! Error types for the prayer time calculations.
//!
//! Only configuration mistakes are errors. An astronomical event that does not happen
//! at a given place and date (the sun never reaching a depression angle, polar day or
//! night) is reported as `None` on the affected time instead.

use core::fmt;

/// Result type alias for operations in this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while setting up a prayer time calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid latitude value (must be between -90 and +90 degrees).
    InvalidLatitude {
        /// The invalid latitude value provided.
        value: f64,
    },
    /// Invalid longitude value (must be between -180 and +180 degrees).
    InvalidLongitude {
        /// The invalid longitude value provided.
        value: f64,
    },
    /// A twilight or depression angle outside 0 to 90 degrees.
    InvalidAngle {
        /// Which parameter held the angle.
        name: &'static str,
        /// The invalid angle value provided.
        value: f64,
    },
    /// A fixed isha interval of zero minutes.
    InvalidInterval {
        /// The invalid interval provided.
        minutes: u32,
    },
    /// A date that cannot be represented or shifted.
    InvalidDate {
        /// Description of the date constraint violation.
        message: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidLatitude { value } => {
                write!(
                    f,
                    "invalid latitude {value}° (must be between -90° and +90°)"
                )
            }
            Self::InvalidLongitude { value } => {
                write!(
                    f,
                    "invalid longitude {value}° (must be between -180° and +180°)"
                )
            }
            Self::InvalidAngle { name, value } => {
                write!(f, "invalid {name} {value}° (must be between 0° and 90°)")
            }
            Self::InvalidInterval { minutes } => {
                write!(f, "invalid isha interval {minutes} min (must be positive)")
            }
            Self::InvalidDate { message } => {
                write!(f, "invalid date: {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl Error {
    /// Creates an invalid latitude error.
    #[must_use]
    pub const fn invalid_latitude(value: f64) -> Self {
        Self::InvalidLatitude { value }
    }

    /// Creates an invalid longitude error.
    #[must_use]
    pub const fn invalid_longitude(value: f64) -> Self {
        Self::InvalidLongitude { value }
    }

    /// Creates an invalid angle error for the named parameter.
    #[must_use]
    pub const fn invalid_angle(name: &'static str, value: f64) -> Self {
        Self::InvalidAngle { name, value }
    }

    /// Creates an invalid isha interval error.
    #[must_use]
    pub const fn invalid_interval(minutes: u32) -> Self {
        Self::InvalidInterval { minutes }
    }

    /// Creates an invalid date error.
    #[must_use]
    pub const fn invalid_date(message: &'static str) -> Self {
        Self::InvalidDate { message }
    }
}

/// Validates latitude is within the valid range (-90 to +90 degrees).
///
/// # Errors
/// Returns `InvalidLatitude` if latitude is outside -90 to +90 degrees.
pub fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(Error::invalid_latitude(latitude));
    }
    Ok(())
}

/// Validates longitude is within the valid range (-180 to +180 degrees).
///
/// # Errors
/// Returns `InvalidLongitude` if longitude is outside -180 to +180 degrees.
pub fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(Error::invalid_longitude(longitude));
    }
    Ok(())
}

/// Validates both latitude and longitude are within valid ranges.
///
/// # Errors
/// Returns `InvalidLatitude` or `InvalidLongitude` for out-of-range coordinates.
pub fn check_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    check_latitude(latitude)?;
    check_longitude(longitude)?;
    Ok(())
}

/// Validates a depression angle is within 0 to 90 degrees.
///
/// # Errors
/// Returns `InvalidAngle` naming the offending parameter.
pub fn check_angle(name: &'static str, angle: f64) -> Result<()> {
    if !(0.0..=90.0).contains(&angle) {
        return Err(Error::invalid_angle(name, angle));
    }
    Ok(())
}
