//! Fixed-point WGS84 coordinates
//!
//! Coordinates are stored as 1e-7 degree integers, the precision OSM node
//! coordinates carry.

use geo::{Distance, Haversine, Point};
use serde::{Deserialize, Serialize};

const COORDINATE_PRECISION: f64 = 1e7;
const MAX_LON_FXP: i32 = 1_800_000_000;
const MAX_LAT_FXP: i32 = 900_000_000;

/// A (longitude, latitude) pair in 1e-7 degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon_fxp: i32,
    pub lat_fxp: i32,
}

impl Coordinate {
    pub const fn new(lon_fxp: i32, lat_fxp: i32) -> Self {
        Self { lon_fxp, lat_fxp }
    }

    pub fn from_degrees(lon: f64, lat: f64) -> Self {
        Self {
            lon_fxp: (lon * COORDINATE_PRECISION).round() as i32,
            lat_fxp: (lat * COORDINATE_PRECISION).round() as i32,
        }
    }

    pub fn lon(&self) -> f64 {
        self.lon_fxp as f64 / COORDINATE_PRECISION
    }

    pub fn lat(&self) -> f64 {
        self.lat_fxp as f64 / COORDINATE_PRECISION
    }

    pub fn is_valid(&self) -> bool {
        (-MAX_LON_FXP..=MAX_LON_FXP).contains(&self.lon_fxp)
            && (-MAX_LAT_FXP..=MAX_LAT_FXP).contains(&self.lat_fxp)
    }

    /// Great-circle distance in meters
    pub fn haversine_distance(&self, other: &Coordinate) -> f64 {
        Haversine::distance(Point::from(*self), Point::from(*other))
    }

    /// Linear interpolation in coordinate space; `factor` 0 yields `from`,
    /// 1 yields `to`.
    pub fn interpolate_linear(factor: f64, from: Coordinate, to: Coordinate) -> Coordinate {
        debug_assert!((0.0..=1.0).contains(&factor));
        let lon = from.lon_fxp as f64 + factor * (to.lon_fxp as f64 - from.lon_fxp as f64);
        let lat = from.lat_fxp as f64 + factor * (to.lat_fxp as f64 - from.lat_fxp as f64);
        Coordinate {
            lon_fxp: lon.round() as i32,
            lat_fxp: lat.round() as i32,
        }
    }

    /// Initial bearing towards `other` in degrees, 0 = North, [0, 360)
    pub fn bearing_to(&self, other: &Coordinate) -> f64 {
        let lat1 = self.lat().to_radians();
        let lat2 = other.lat().to_radians();
        let delta_lon = (other.lon() - self.lon()).to_radians();

        let y = delta_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * delta_lon.cos();
        let normalized = y.atan2(x).to_degrees().rem_euclid(360.0);
        if normalized >= 360.0 {
            0.0
        } else {
            normalized
        }
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        Point::new(coordinate.lon(), coordinate.lat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_point_conversion() {
        let c = Coordinate::from_degrees(4.3517103, 50.8503396);
        assert_eq!(c.lon_fxp, 43_517_103);
        assert_eq!(c.lat_fxp, 508_503_396);
        assert!((c.lon() - 4.3517103).abs() < 1e-9);
        assert!((c.lat() - 50.8503396).abs() < 1e-9);
    }

    #[test]
    fn test_validity() {
        assert!(Coordinate::from_degrees(180.0, 90.0).is_valid());
        assert!(Coordinate::from_degrees(-180.0, -90.0).is_valid());
        assert!(!Coordinate::new(MAX_LON_FXP + 1, 0).is_valid());
        assert!(!Coordinate::new(0, -MAX_LAT_FXP - 1).is_valid());
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let a = Coordinate::from_degrees(0.0, 0.0);
        let b = Coordinate::from_degrees(0.0, 1.0);
        let d = a.haversine_distance(&b);
        // ~111.2 km per degree of latitude
        assert!((d - 111_195.0).abs() < 100.0, "got {}m", d);
        assert_eq!(a.haversine_distance(&a), 0.0);
    }

    #[test]
    fn test_interpolate_endpoints() {
        let a = Coordinate::new(10, -20);
        let b = Coordinate::new(110, 80);
        assert_eq!(Coordinate::interpolate_linear(0.0, a, b), a);
        assert_eq!(Coordinate::interpolate_linear(1.0, a, b), b);
        assert_eq!(Coordinate::interpolate_linear(0.5, a, b), Coordinate::new(60, 30));
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::from_degrees(0.0, 0.0);
        let north = Coordinate::from_degrees(0.0, 0.001);
        let east = Coordinate::from_degrees(0.001, 0.0);
        let south = Coordinate::from_degrees(0.0, -0.001);
        let west = Coordinate::from_degrees(-0.001, 0.0);

        assert!(origin.bearing_to(&north).abs() < 1e-6);
        assert!((origin.bearing_to(&east) - 90.0).abs() < 1e-6);
        assert!((origin.bearing_to(&south) - 180.0).abs() < 1e-6);
        assert!((origin.bearing_to(&west) - 270.0).abs() < 1e-6);
    }
}
