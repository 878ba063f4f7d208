//! Great-circle distance on a spherical Earth.
//!
//! Distances use the haversine formula with a mean Earth radius. There is no
//! ellipsoidal correction; at fishing-zone scale the spherical error is well
//! under the 2-decimal display precision used by the API.

use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A validated latitude/longitude pair in decimal degrees
///
/// Deserializing goes through [`Coordinate::new`], so an out-of-range pair is
/// rejected there too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = CoordinateError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

impl Coordinate {
    /// Create a coordinate, rejecting non-finite or out-of-range values
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Coordinate {
            latitude,
            longitude,
        })
    }

    /// Build a coordinate from two optional parts
    ///
    /// Returns `CoordinateError::Missing` if either part is absent; a missing
    /// value is never replaced by zero.
    pub fn from_parts(
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Result<Self, CoordinateError> {
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
            _ => Err(CoordinateError::Missing),
        }
    }

    /// Great-circle distance to `other` in kilometers
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        haversine_distance(self, other)
    }
}

/// Haversine distance in kilometers using [`EARTH_RADIUS_KM`]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    great_circle_distance(from, to, EARTH_RADIUS_KM)
}

/// Haversine distance on a sphere of the given radius (result in radius units)
pub fn great_circle_distance(from: &Coordinate, to: &Coordinate, radius: f64) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

    // Rounding can push `a` just past 1 for antipodal points
    let c = 2.0 * a.sqrt().min(1.0).asin();

    radius * c
}

/// Round a distance to 2 decimal places for display
pub fn round_km(distance: f64) -> f64 {
    (distance * 100.0).round() / 100.0
}
