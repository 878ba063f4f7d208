//! Zone and Path stores
//!
//! The resolvers only read. Anything that can hand out zones and paths (a
//! database, a remote service, an in-memory snapshot) implements [`ZoneStore`]
//! and [`PathStore`]; failures are reported as [`StoreError`] and passed
//! through unchanged.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard};

use crate::error::StoreError;
use crate::model::{Path, PathId, Zone, ZoneId, ZoneStatus};

/// Read access to zone records
pub trait ZoneStore {
    /// All zones, in the store's iteration order
    fn zones(&self) -> Result<Vec<Zone>, StoreError>;

    /// All zones with the given status, in the store's iteration order
    fn zones_with_status(&self, status: ZoneStatus) -> Result<Vec<Zone>, StoreError> {
        Ok(self
            .zones()?
            .into_iter()
            .filter(|z| z.status == status)
            .collect())
    }

    fn zone(&self, id: ZoneId) -> Result<Option<Zone>, StoreError>;
}

/// Read access to path records
pub trait PathStore {
    /// All paths with the given safety flag, in the store's iteration order
    fn paths_by_safety(&self, safe: bool) -> Result<Vec<Path>, StoreError>;

    /// First path from `start` to `end` with the given safety flag
    fn find_path(&self, start: ZoneId, end: ZoneId, safe: bool)
        -> Result<Option<Path>, StoreError>;
}

/// A store that serves both zones and paths and can be shared across threads
///
/// Implemented for every type that implements both traits, so a server can
/// hold `Arc<dyn MapStore>` without knowing the backend.
pub trait MapStore: ZoneStore + PathStore + Send + Sync {}

impl<T> MapStore for T where T: ZoneStore + PathStore + Send + Sync {}

#[derive(Debug, Default)]
struct Tables {
    zones: BTreeMap<ZoneId, Zone>,
    paths: BTreeMap<PathId, Path>,
}

/// In-memory snapshot of zones and paths
///
/// Iteration is in ascending identifier order, which is also the tie-break
/// order seen by the nearest-zone resolver.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Build a snapshot. Records with duplicate ids keep the last one.
    pub fn new(zones: Vec<Zone>, paths: Vec<Path>) -> Self {
        let tables = Tables {
            zones: zones.into_iter().map(|z| (z.id, z)).collect(),
            paths: paths.into_iter().map(|p| (p.id, p)).collect(),
        };
        MemoryStore {
            tables: RwLock::new(tables),
        }
    }

    pub fn zone_count(&self) -> usize {
        self.read().map(|t| t.zones.len()).unwrap_or(0)
    }

    pub fn path_count(&self) -> usize {
        self.read().map(|t| t.paths.len()).unwrap_or(0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl ZoneStore for MemoryStore {
    fn zones(&self) -> Result<Vec<Zone>, StoreError> {
        Ok(self.read()?.zones.values().cloned().collect())
    }

    fn zones_with_status(&self, status: ZoneStatus) -> Result<Vec<Zone>, StoreError> {
        Ok(self
            .read()?
            .zones
            .values()
            .filter(|z| z.status == status)
            .cloned()
            .collect())
    }

    fn zone(&self, id: ZoneId) -> Result<Option<Zone>, StoreError> {
        Ok(self.read()?.zones.get(&id).cloned())
    }
}

impl PathStore for MemoryStore {
    fn paths_by_safety(&self, safe: bool) -> Result<Vec<Path>, StoreError> {
        Ok(self
            .read()?
            .paths
            .values()
            .filter(|p| p.is_safe == safe)
            .cloned()
            .collect())
    }

    fn find_path(
        &self,
        start: ZoneId,
        end: ZoneId,
        safe: bool,
    ) -> Result<Option<Path>, StoreError> {
        Ok(self
            .read()?
            .paths
            .values()
            .find(|p| p.connects(start, end) && p.is_safe == safe)
            .cloned())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn zone(id: ZoneId, lat: f64, lng: f64, status: ZoneStatus) -> Zone {
        Zone {
            id,
            name: format!("Zone {id}"),
            latitude: Some(lat),
            longitude: Some(lng),
            status,
            reason: match status {
                ZoneStatus::Forbidden => Some("Spawning ground".to_string()),
                ZoneStatus::Allowed => None,
            },
            species: Vec::new(),
        }
    }

    pub(crate) fn path(id: PathId, start: ZoneId, end: ZoneId, safe: bool) -> Path {
        Path {
            id,
            start_zone_id: start,
            end_zone_id: end,
            waypoints: None,
            is_safe: safe,
        }
    }

    /// A store whose every read fails
    pub(crate) struct BrokenStore;

    impl ZoneStore for BrokenStore {
        fn zones(&self) -> Result<Vec<Zone>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn zone(&self, _id: ZoneId) -> Result<Option<Zone>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    impl PathStore for BrokenStore {
        fn paths_by_safety(&self, _safe: bool) -> Result<Vec<Path>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }

        fn find_path(&self, _: ZoneId, _: ZoneId, _: bool) -> Result<Option<Path>, StoreError> {
            Err(StoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn test_zones_in_id_order() {
        let store = MemoryStore::new(
            vec![
                zone(3, 0.0, 0.0, ZoneStatus::Allowed),
                zone(1, 0.0, 0.0, ZoneStatus::Forbidden),
                zone(2, 0.0, 0.0, ZoneStatus::Allowed),
            ],
            Vec::new(),
        );

        let ids: Vec<_> = store.zones().unwrap().iter().map(|z| z.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let allowed: Vec<_> = store
            .zones_with_status(ZoneStatus::Allowed)
            .unwrap()
            .iter()
            .map(|z| z.id)
            .collect();
        assert_eq!(allowed, vec![2, 3]);
    }

    #[test]
    fn test_zone_lookup() {
        let store = MemoryStore::new(vec![zone(5, 1.0, 2.0, ZoneStatus::Allowed)], Vec::new());
        assert_eq!(store.zone(5).unwrap().unwrap().name, "Zone 5");
        assert!(store.zone(6).unwrap().is_none());
    }

    #[test]
    fn test_find_path_is_directional() {
        let store = MemoryStore::new(
            Vec::new(),
            vec![path(1, 1, 2, true), path(2, 2, 1, false)],
        );

        assert_eq!(store.find_path(1, 2, true).unwrap().map(|p| p.id), Some(1));
        assert!(store.find_path(2, 1, true).unwrap().is_none());
        assert_eq!(store.find_path(2, 1, false).unwrap().map(|p| p.id), Some(2));
    }

    #[test]
    fn test_duplicate_ids_keep_last() {
        let mut renamed = zone(1, 1.0, 1.0, ZoneStatus::Forbidden);
        renamed.name = "Renamed".to_string();
        let store = MemoryStore::new(
            vec![
                zone(1, 0.0, 0.0, ZoneStatus::Allowed),
                renamed,
                zone(2, 0.0, 0.0, ZoneStatus::Allowed),
            ],
            vec![path(1, 1, 2, true), path(1, 2, 1, false)],
        );
        assert_eq!(store.zone_count(), 2);
        assert_eq!(store.path_count(), 1);
        assert_eq!(store.zone(1).unwrap().unwrap().name, "Renamed");
        assert!(store.find_path(1, 2, true).unwrap().is_none());
        assert_eq!(store.find_path(2, 1, false).unwrap().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_dyn_map_store() {
        let store: std::sync::Arc<dyn MapStore> = std::sync::Arc::new(MemoryStore::new(
            vec![zone(1, 0.0, 0.0, ZoneStatus::Allowed)],
            vec![path(1, 1, 1, true)],
        ));
        assert_eq!(store.zones().unwrap().len(), 1);
        assert_eq!(store.paths_by_safety(true).unwrap().len(), 1);

        let broken: Box<dyn MapStore> = Box::new(BrokenStore);
        assert!(broken.zones().is_err());
    }

    #[test]
    fn test_default_zones_with_status() {
        // Exercises the trait's provided filter through a minimal store
        struct Fixed(Vec<Zone>);
        impl ZoneStore for Fixed {
            fn zones(&self) -> Result<Vec<Zone>, StoreError> {
                Ok(self.0.clone())
            }
            fn zone(&self, id: ZoneId) -> Result<Option<Zone>, StoreError> {
                Ok(self.0.iter().find(|z| z.id == id).cloned())
            }
        }

        let store = Fixed(vec![
            zone(1, 0.0, 0.0, ZoneStatus::Forbidden),
            zone(2, 0.0, 0.0, ZoneStatus::Allowed),
        ]);
        let forbidden = store.zones_with_status(ZoneStatus::Forbidden).unwrap();
        assert_eq!(forbidden.len(), 1);
        assert_eq!(forbidden[0].id, 1);
    }
}
