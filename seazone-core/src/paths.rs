//! Safe-Path Resolver
//!
//! Looks up safe paths between zones. Paths are directed: a safe path from
//! A to B says nothing about B to A, and no reverse path is ever derived.
//! The `is_safe` flag is taken as-is; waypoints are never inspected.
//!
//! Listing order is the path store's iteration order (ascending path id for
//! [`MemoryStore`](crate::MemoryStore)).

use std::collections::HashMap;

use crate::error::{ResolveError, StoreError};
use crate::model::{Path, SafePath, Zone, ZoneId};
use crate::store::{PathStore, ZoneStore};

pub struct SafePathResolver<'a, Z: ?Sized, P: ?Sized> {
    zones: &'a Z,
    paths: &'a P,
}

impl<'a, Z, P> SafePathResolver<'a, Z, P>
where
    Z: ZoneStore + ?Sized,
    P: PathStore + ?Sized,
{
    pub fn new(zones: &'a Z, paths: &'a P) -> Self {
        SafePathResolver { zones, paths }
    }

    /// The safe path from `from` to `to`, if one exists
    pub fn find_safe(&self, from: ZoneId, to: ZoneId) -> Result<Option<Path>, ResolveError> {
        Ok(self.paths.find_path(from, to, true)?)
    }

    /// Every safe path with its start and end zones expanded
    ///
    /// A path pointing at a zone the zone store does not know is reported as
    /// [`StoreError::DanglingReference`].
    pub fn all_safe(&self) -> Result<Vec<SafePath>, ResolveError> {
        let paths = self.paths.paths_by_safety(true)?;

        let mut cache: HashMap<ZoneId, Zone> = HashMap::new();
        let mut expanded = Vec::with_capacity(paths.len());
        for path in paths {
            let start_zone = self.endpoint(&mut cache, &path, path.start_zone_id)?;
            let end_zone = self.endpoint(&mut cache, &path, path.end_zone_id)?;
            expanded.push(SafePath {
                path,
                start_zone,
                end_zone,
            });
        }
        Ok(expanded)
    }

    fn endpoint(
        &self,
        cache: &mut HashMap<ZoneId, Zone>,
        path: &Path,
        zone_id: ZoneId,
    ) -> Result<Zone, StoreError> {
        if let Some(zone) = cache.get(&zone_id) {
            return Ok(zone.clone());
        }
        let zone = self
            .zones
            .zone(zone_id)?
            .ok_or(StoreError::DanglingReference {
                path: path.id,
                zone: zone_id,
            })?;
        cache.insert(zone_id, zone.clone());
        Ok(zone)
    }
}
