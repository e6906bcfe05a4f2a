//! Great-circle distance between coordinates.
//!
//! Distances use the haversine formula on a sphere of radius [`EARTH_RADIUS_KM`].
//! Inputs are validated, never clamped: an out-of-range latitude or longitude
//! is reported as [`GeoError::InvalidCoordinate`].

use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::GeoError;
use error::Result;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic point. Serialises as GeoJSON `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude and longitude, in that order.
    ///
    /// No range check happens here; see [`Coordinate::is_valid`] and
    /// [`Coordinate::try_new`].
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Creates a coordinate, rejecting values outside the valid ranges.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self::new(latitude, longitude);
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Builds a coordinate from GeoJSON `[longitude, latitude]` order.
    #[must_use]
    pub const fn from_lon_lat(longitude: f64, latitude: f64) -> Self {
        Self::new(latitude, longitude)
    }

    /// Returns true if latitude is in [-90, 90] and longitude in [-180, 180].
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(GeoError::InvalidCoordinate {
                longitude: self.longitude,
                latitude: self.latitude,
            })
        }
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self::from_lon_lat(longitude, latitude)
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.longitude, coordinate.latitude]
    }
}

impl From<&clinicfinder_data::CityReference> for Coordinate {
    fn from(city: &clinicfinder_data::CityReference) -> Self {
        let (longitude, latitude) = city.lon_lat();
        Self::from_lon_lat(longitude, latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

/// Range check helper.
#[inline]
#[must_use]
pub fn is_valid_coordinate(coordinate: &Coordinate) -> bool {
    coordinate.is_valid()
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Symmetric, non-negative and zero for identical points.
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> Result<f64> {
    a.validate()?;
    b.validate()?;

    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h a hair outside [0, 1] for antipodal points.
    let h = h.clamp(0.0, 1.0);

    Ok(2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt()))
}

/// Human readable distance, e.g. `"2.5 km"`.
#[must_use]
pub fn format_distance(km: f64) -> String {
    format!("{km:.1} km")
}

mod error {
    use thiserror::Error;

    #[derive(Error, Debug, Clone, Copy, PartialEq)]
    pub enum GeoError {
        #[error("Invalid coordinate: longitude {longitude}, latitude {latitude}")]
        InvalidCoordinate { longitude: f64, latitude: f64 },
    }

    pub type Result<T> = std::result::Result<T, GeoError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELHI: Coordinate = Coordinate::new(28.6139, 77.2090);
    const MUMBAI: Coordinate = Coordinate::new(19.0760, 72.8777);

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.1).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(is_valid_coordinate(&DELHI));
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        for c in [DELHI, MUMBAI, Coordinate::new(-90.0, 180.0)] {
            assert_eq!(distance_km(&c, &c).unwrap(), 0.0);
        }
    }

    #[test]
    fn test_distance_is_symmetric_and_non_negative() {
        let pairs = [
            (DELHI, MUMBAI),
            (Coordinate::new(51.5074, -0.1278), Coordinate::new(40.7128, -74.0060)),
            (Coordinate::new(-33.8688, 151.2093), Coordinate::new(35.6762, 139.6503)),
        ];
        for (a, b) in pairs {
            let ab = distance_km(&a, &b).unwrap();
            let ba = distance_km(&b, &a).unwrap();
            assert!(ab > 0.0);
            assert!((ab - ba).abs() < 1e-9);
        }
    }

    #[test]
    fn test_known_distance() {
        // Delhi to Mumbai is roughly 1148 km as the crow flies.
        let d = distance_km(&DELHI, &MUMBAI).unwrap();
        assert!((d - 1148.1).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_distance_grows_with_separation() {
        let origin = Coordinate::new(0.0, 0.0);
        let mut previous = 0.0;
        for lon in [1.0, 10.0, 45.0, 90.0, 179.0] {
            let d = distance_km(&origin, &Coordinate::new(0.0, lon)).unwrap();
            assert!(d > previous);
            previous = d;
        }
    }

    #[test]
    fn test_antipodal_points() {
        let d = distance_km(&Coordinate::new(0.0, 0.0), &Coordinate::new(0.0, 180.0)).unwrap();
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_coordinates_fail() {
        let bad = [
            Coordinate::new(91.0, 0.0),
            Coordinate::new(-91.0, 0.0),
            Coordinate::new(0.0, 181.0),
            Coordinate::new(0.0, -181.0),
        ];
        for c in bad {
            assert_eq!(
                distance_km(&c, &DELHI),
                Err(GeoError::InvalidCoordinate {
                    longitude: c.longitude,
                    latitude: c.latitude
                })
            );
            assert!(distance_km(&DELHI, &c).is_err());
        }
        assert!(Coordinate::try_new(100.0, 0.0).is_err());
        assert_eq!(Coordinate::try_new(10.0, 20.0), Ok(Coordinate::new(10.0, 20.0)));
    }

    #[test]
    fn test_geojson_order_round_trip() {
        let c: Coordinate = serde_json::from_str("[77.209, 28.6139]").unwrap();
        assert_eq!(c, Coordinate::new(28.6139, 77.209));
        assert_eq!(serde_json::to_string(&c).unwrap(), "[77.209,28.6139]");
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(2.5), "2.5 km");
        assert_eq!(format_distance(0.0), "0.0 km");
        assert_eq!(format_distance(12.345), "12.3 km");
    }
}
