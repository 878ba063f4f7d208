//! Zone, Species and Path records
//!
//! These are the records the stores hand out and the API serializes. Field
//! names follow the dashboard's JSON format (snake_case, species association
//! data under `pivot`, expanded path endpoints as `startZone`/`endZone`).

use serde::{Deserialize, Serialize};

use crate::error::CoordinateError;
use crate::geo::Coordinate;

pub type ZoneId = u64;
pub type PathId = u64;
pub type SpeciesId = u64;

/// Fishing classification of a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneStatus {
    Allowed,
    Forbidden,
}

impl std::fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneStatus::Allowed => write!(f, "allowed"),
            ZoneStatus::Forbidden => write!(f, "forbidden"),
        }
    }
}

/// A geographic area classified for fishing activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: ZoneStatus,
    /// Why the zone is forbidden; usually absent for allowed zones
    #[serde(default)]
    pub reason: Option<String>,
    /// Species observed in the zone, with per-zone quantity
    #[serde(default)]
    pub species: Vec<ZoneSpecies>,
}

impl Zone {
    /// The zone's position, if both coordinates are present and valid
    ///
    /// A zone with only one coordinate is not comparable and yields `None`.
    pub fn coordinate(&self) -> Option<Coordinate> {
        Coordinate::from_parts(self.latitude, self.longitude).ok()
    }

    /// Check the stored coordinates, allowing both to be absent
    pub fn validate_coordinates(&self) -> Result<(), CoordinateError> {
        if let (Some(lat), Some(lng)) = (self.latitude, self.longitude) {
            Coordinate::new(lat, lng)?;
        }
        Ok(())
    }
}

/// Conservation status of a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesStatus {
    Available,
    FishingBanned,
    Rare,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Species {
    pub id: SpeciesId,
    pub scientific_name: String,
    #[serde(default)]
    pub local_name: Option<String>,
    pub status: SpeciesStatus,
}

/// Association data between a zone and a species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpeciesPivot {
    pub quantity: Option<u32>,
}

/// A species as listed under a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSpecies {
    #[serde(flatten)]
    pub species: Species,
    pub pivot: SpeciesPivot,
}

/// One `[lat, lng]` point along a path
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint(pub f64, pub f64);

/// A directed connection between two zones
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub id: PathId,
    pub start_zone_id: ZoneId,
    pub end_zone_id: ZoneId,
    #[serde(default)]
    pub waypoints: Option<Vec<Waypoint>>,
    /// Authoritative safety flag; never inferred from waypoints
    pub is_safe: bool,
}

impl Path {
    pub fn connects(&self, from: ZoneId, to: ZoneId) -> bool {
        self.start_zone_id == from && self.end_zone_id == to
    }
}

/// A safe path with both endpoint zones expanded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafePath {
    #[serde(flatten)]
    pub path: Path,
    #[serde(rename = "startZone")]
    pub start_zone: Zone,
    #[serde(rename = "endZone")]
    pub end_zone: Zone,
}

/// Caller-supplied search origin
///
/// Both parts are optional at this level so that a missing value can be
/// reported as invalid input instead of failing deserialization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryPoint {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl QueryPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        QueryPoint {
            lat: Some(lat),
            lng: Some(lng),
        }
    }

    pub fn coordinate(&self) -> Result<Coordinate, CoordinateError> {
        Coordinate::from_parts(self.lat, self.lng)
    }
}
