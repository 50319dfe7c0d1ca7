//! Direction of prayer.

use crate::Coordinates;
use crate::math::{
    atan2, cos, degrees_to_radians, normalize_degrees_0_to_360, radians_to_degrees, sin, tan,
};

/// Latitude of the Kaaba, in degrees.
pub const MAKKAH_LATITUDE: f64 = 21.422_524_1;

/// Longitude of the Kaaba, in degrees.
pub const MAKKAH_LONGITUDE: f64 = 39.826_181_8;

/// Initial great-circle bearing from `coordinates` to the Kaaba, in degrees clockwise
/// from true north (0° to 360°).
///
/// # Example
/// ```
/// # use prayer_times::{Coordinates, qibla};
/// let new_york = Coordinates::new(40.7128, -74.0059).unwrap();
/// let bearing = qibla(&new_york);
/// assert!((bearing - 58.4817).abs() < 1e-3);
/// ```
#[must_use]
pub fn qibla(coordinates: &Coordinates) -> f64 {
    let latitude = degrees_to_radians(coordinates.latitude());
    let makkah_latitude = degrees_to_radians(MAKKAH_LATITUDE);
    let delta_longitude = degrees_to_radians(MAKKAH_LONGITUDE - coordinates.longitude());

    let term1 = sin(delta_longitude);
    let term2 = cos(latitude) * tan(makkah_latitude);
    let term3 = sin(latitude) * cos(delta_longitude);
    normalize_degrees_0_to_360(radians_to_degrees(atan2(term1, term2 - term3)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bearing(latitude: f64, longitude: f64) -> f64 {
        qibla(&Coordinates::new(latitude, longitude).unwrap())
    }

    #[test]
    fn test_known_cities() {
        let cases = [
            ("Washington DC", 38.9072, -77.0369, 56.560_468),
            ("New York", 40.7128, -74.0059, 58.481_764),
            ("San Francisco", 37.7749, -122.4194, 18.843_822),
            ("Anchorage", 61.2181, -149.9003, 350.883_076),
            ("Sydney", -33.8688, 151.2093, 277.499_604),
            ("Auckland", -36.8485, 174.7633, 261.197_326),
            ("London", 51.5074, -0.1278, 118.987_219),
            ("Paris", 48.8566, 2.3522, 119.163_135),
            ("Oslo", 59.9139, 10.7522, 139.027_856),
            ("Islamabad", 33.7294, 73.0931, 255.881_616),
            ("Tokyo", 35.6895, 139.6917, 293.020_724),
            ("Jakarta", -6.182_339_95, 106.842_871_2, 295.144_298),
        ];
        for (city, latitude, longitude, expected) in cases {
            let actual = bearing(latitude, longitude);
            assert!((actual - expected).abs() < 1e-3, "{city}: {actual}");
        }
    }

    #[test]
    fn test_bearing_range() {
        for latitude in [-89.0, -45.0, 0.0, 45.0, 89.0] {
            for longitude in [-180.0, -90.0, 0.0, 90.0, 180.0] {
                let actual = bearing(latitude, longitude);
                assert!((0.0..360.0).contains(&actual), "{latitude},{longitude}: {actual}");
            }
        }
    }
}
