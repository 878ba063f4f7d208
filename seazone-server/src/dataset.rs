//! Dataset loading
//!
//! The server keeps zones and paths in a [`MemoryStore`] filled from a JSON
//! file laid out like the dashboard's tables:
//!
//! ```json
//! {
//!   "species": [{ "id": 1, "scientific_name": "Sardina pilchardus", "status": "available" }],
//!   "zones": [{ "id": 1, "name": "Rabat North", "latitude": 34.05, "longitude": -6.85,
//!               "status": "allowed", "species": [{ "species_id": 1, "quantity": 120 }] }],
//!   "paths": [{ "id": 1, "start_zone_id": 1, "end_zone_id": 2,
//!               "waypoints": [[34.05, -6.85], [34.3, -6.7]], "is_safe": true }]
//! }
//! ```
//!
//! Loading validates ids and references and joins each zone's species list.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path as FsPath, PathBuf};

use miette::Diagnostic;
use serde::Deserialize;
use thiserror::Error;

use seazone_core::{
    Coordinate, CoordinateError, MemoryStore, Path, PathId, Species, SpeciesId, SpeciesPivot,
    Waypoint, Zone, ZoneId, ZoneSpecies, ZoneStatus,
};

use crate::config::default_data_path;

#[derive(Debug, Error, Diagnostic)]
pub enum DatasetError {
    #[error("cannot read dataset {}", path.display())]
    #[diagnostic(help("pass an existing file with --data"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset {} is not valid JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: u64 },

    #[error("zone {zone} lists unknown species {species}")]
    UnknownSpecies { zone: ZoneId, species: SpeciesId },

    #[error("path {path} references unknown zone {zone}")]
    #[diagnostic(help("paths may only connect zones listed in the same dataset"))]
    UnknownZone { path: PathId, zone: ZoneId },

    #[error("zone {zone} has an invalid position")]
    InvalidZonePosition {
        zone: ZoneId,
        #[source]
        source: CoordinateError,
    },

    #[error("path {path} has an invalid waypoint")]
    InvalidWaypoint {
        path: PathId,
        #[source]
        source: CoordinateError,
    },
}

#[derive(Debug, Clone, Deserialize)]
struct ZoneSpeciesRow {
    species_id: SpeciesId,
    #[serde(default)]
    quantity: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
struct ZoneRow {
    id: ZoneId,
    name: String,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    status: ZoneStatus,
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    species: Vec<ZoneSpeciesRow>,
}

/// Raw dataset as stored on disk
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    species: Vec<Species>,
    #[serde(default)]
    zones: Vec<ZoneRow>,
    #[serde(default)]
    paths: Vec<Path>,
}

impl Dataset {
    pub fn load(path: &FsPath) -> Result<Dataset, DatasetError> {
        let text = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| DatasetError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate the dataset and build a store from it
    pub fn into_store(self) -> Result<MemoryStore, DatasetError> {
        let (zones, paths) = self.resolve()?;
        Ok(MemoryStore::new(zones, paths))
    }

    fn resolve(self) -> Result<(Vec<Zone>, Vec<Path>), DatasetError> {
        let mut species: BTreeMap<SpeciesId, Species> = BTreeMap::new();
        for s in self.species {
            let id = s.id;
            if species.insert(id, s).is_some() {
                return Err(DatasetError::DuplicateId { kind: "species", id });
            }
        }

        let mut zone_ids = HashSet::new();
        let mut zones = Vec::with_capacity(self.zones.len());
        for row in self.zones {
            if !zone_ids.insert(row.id) {
                return Err(DatasetError::DuplicateId {
                    kind: "zone",
                    id: row.id,
                });
            }

            let mut listed = Vec::with_capacity(row.species.len());
            for link in &row.species {
                let s = species
                    .get(&link.species_id)
                    .ok_or(DatasetError::UnknownSpecies {
                        zone: row.id,
                        species: link.species_id,
                    })?;
                listed.push(ZoneSpecies {
                    species: s.clone(),
                    pivot: SpeciesPivot {
                        quantity: link.quantity,
                    },
                });
            }

            let zone = Zone {
                id: row.id,
                name: row.name,
                latitude: row.latitude,
                longitude: row.longitude,
                status: row.status,
                reason: row.reason,
                species: listed,
            };
            zone
                .validate_coordinates()
                .map_err(|source| DatasetError::InvalidZonePosition {
                    zone: zone.id,
                    source,
                })?;
            if zone.coordinate().is_none() {
                log::warn!(
                    "Zone {} ({}) has no position, it will not match proximity searches",
                    zone.id,
                    zone.name
                );
            }
            zones.push(zone);
        }

        let mut path_ids = HashSet::new();
        for path in &self.paths {
            if !path_ids.insert(path.id) {
                return Err(DatasetError::DuplicateId {
                    kind: "path",
                    id: path.id,
                });
            }
            for zone in [path.start_zone_id, path.end_zone_id] {
                if !zone_ids.contains(&zone) {
                    return Err(DatasetError::UnknownZone {
                        path: path.id,
                        zone,
                    });
                }
            }
            for Waypoint(lat, lng) in path.waypoints.iter().flatten() {
                Coordinate::new(*lat, *lng).map_err(|source| {
                    DatasetError::InvalidWaypoint {
                        path: path.id,
                        source,
                    }
                })?;
            }
        }

        Ok((zones, self.paths))
    }
}

/// Open the store the server will serve from
///
/// An explicit path must exist. Without one, the default location is tried
/// and a missing file there yields an empty store.
pub fn open_store(path: Option<&FsPath>) -> Result<MemoryStore, DatasetError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_data_path() {
            Some(p) if p.exists() => p,
            Some(p) => {
                log::warn!("No dataset at {}, starting with no zones", p.display());
                return Ok(MemoryStore::default());
            }
            None => {
                log::warn!("No data directory available, starting with no zones");
                return Ok(MemoryStore::default());
            }
        },
    };

    let store = Dataset::load(&path)?.into_store()?;
    log::info!(
        "Loaded {} zones and {} paths from {}",
        store.zone_count(),
        store.path_count(),
        path.display()
    );
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seazone_core::{PathStore, ZoneStore};
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "species": [
            { "id": 1, "scientific_name": "Sardina pilchardus", "local_name": "Sardine", "status": "available" },
            { "id": 2, "scientific_name": "Octopus vulgaris", "status": "fishing_banned" }
        ],
        "zones": [
            { "id": 1, "name": "Rabat North", "latitude": 34.05, "longitude": -6.85, "status": "allowed",
              "species": [{ "species_id": 1, "quantity": 120 }, { "species_id": 2 }] },
            { "id": 2, "name": "Kenitra Shelf", "latitude": 34.3, "longitude": -6.7, "status": "forbidden",
              "reason": "Biological rest" },
            { "id": 3, "name": "Unsurveyed", "status": "allowed" }
        ],
        "paths": [
            { "id": 1, "start_zone_id": 1, "end_zone_id": 2, "waypoints": [[34.05, -6.85], [34.3, -6.7]], "is_safe": true },
            { "id": 2, "start_zone_id": 2, "end_zone_id": 1, "is_safe": false }
        ]
    }"#;

    fn parse(json: &str) -> Dataset {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_species_joined_into_zones() {
        let store = parse(SAMPLE).into_store().unwrap();

        let zone = store.zone(1).unwrap().unwrap();
        assert_eq!(zone.species.len(), 2);
        assert_eq!(zone.species[0].species.local_name.as_deref(), Some("Sardine"));
        assert_eq!(zone.species[0].pivot.quantity, Some(120));
        assert_eq!(zone.species[1].pivot.quantity, None);

        let forbidden = store.zone(2).unwrap().unwrap();
        assert_eq!(forbidden.reason.as_deref(), Some("Biological rest"));
        assert!(store.zone(3).unwrap().unwrap().coordinate().is_none());
    }

    #[test]
    fn test_paths_loaded() {
        let store = parse(SAMPLE).into_store().unwrap();
        let path = store.find_path(1, 2, true).unwrap().unwrap();
        assert_eq!(path.waypoints.unwrap().len(), 2);
        assert_eq!(store.paths_by_safety(false).unwrap().len(), 1);
    }

    #[test]
    fn test_bundled_dataset() {
        let store = parse(include_str!("../data/zones.json")).into_store().unwrap();
        assert_eq!(store.zone_count(), 5);
        assert_eq!(store.path_count(), 4);

        let resolver = seazone_core::NearestZoneResolver::new(&store);
        let hit = resolver
            .nearest_allowed(&seazone_core::QueryPoint::new(34.0, -6.8))
            .unwrap()
            .unwrap();
        assert_eq!(hit.zone.name, "Rabat North");
    }

    #[test]
    fn test_duplicate_zone_id() {
        let dataset = parse(
            r#"{ "zones": [
                { "id": 1, "name": "A", "status": "allowed" },
                { "id": 1, "name": "B", "status": "forbidden" }
            ] }"#,
        );
        assert!(matches!(
            dataset.into_store(),
            Err(DatasetError::DuplicateId { kind: "zone", id: 1 })
        ));
    }

    #[test]
    fn test_unknown_species() {
        let dataset = parse(
            r#"{ "zones": [
                { "id": 4, "name": "A", "status": "allowed", "species": [{ "species_id": 9 }] }
            ] }"#,
        );
        assert!(matches!(
            dataset.into_store(),
            Err(DatasetError::UnknownSpecies { zone: 4, species: 9 })
        ));
    }

    #[test]
    fn test_path_to_unknown_zone() {
        let dataset = parse(
            r#"{
                "zones": [{ "id": 1, "name": "A", "status": "allowed" }],
                "paths": [{ "id": 5, "start_zone_id": 1, "end_zone_id": 7, "is_safe": true }]
            }"#,
        );
        assert!(matches!(
            dataset.into_store(),
            Err(DatasetError::UnknownZone { path: 5, zone: 7 })
        ));
    }

    #[test]
    fn test_out_of_range_zone_position() {
        let dataset = parse(
            r#"{ "zones": [
                { "id": 2, "name": "A", "latitude": 120.0, "longitude": 0.0, "status": "allowed" }
            ] }"#,
        );
        assert!(matches!(
            dataset.into_store(),
            Err(DatasetError::InvalidZonePosition {
                zone: 2,
                source: CoordinateError::LatitudeOutOfRange(_)
            })
        ));
    }

    #[test]
    fn test_invalid_waypoint() {
        let dataset = parse(
            r#"{
                "zones": [{ "id": 1, "name": "A", "status": "allowed" }],
                "paths": [{ "id": 3, "start_zone_id": 1, "end_zone_id": 1,
                            "waypoints": [[10.0, 200.0]], "is_safe": true }]
            }"#,
        );
        assert!(matches!(
            dataset.into_store(),
            Err(DatasetError::InvalidWaypoint { path: 3, .. })
        ));
    }

    #[test]
    fn test_open_store_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = open_store(Some(file.path())).unwrap();
        assert_eq!(store.zone_count(), 3);
        assert_eq!(store.path_count(), 2);
    }

    #[test]
    fn test_open_store_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(matches!(
            open_store(Some(missing.as_path())),
            Err(DatasetError::Io { .. })
        ));
    }

    #[test]
    fn test_open_store_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ \"zones\": [ }").unwrap();
        assert!(matches!(
            open_store(Some(file.path())),
            Err(DatasetError::Parse { .. })
        ));
    }
}
