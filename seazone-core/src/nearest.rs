//! Nearest-Zone Resolver
//!
//! Finds the zone closest to a query point among all zones carrying a given
//! status. Zone counts are small (tens), so this is a full linear scan over
//! the store's filtered zones with no spatial index.
//!
//! # Tie-break
//!
//! Comparison is strict, so when two zones are equidistant the first one in
//! the store's iteration order wins. [`MemoryStore`](crate::MemoryStore)
//! iterates in ascending zone id; other stores may differ.
//!
//! # Example
//!
//! ```rust,ignore
//! let resolver = NearestZoneResolver::new(&store)
//!     .with_missing_coordinates(MissingCoordinates::Reject);
//!
//! match resolver.resolve(&QueryPoint::new(34.0, -6.8), ZoneStatus::Allowed)? {
//!     Some(hit) => println!("{} at {} km", hit.zone.name, hit.distance_km),
//!     None => println!("no allowed zone"),
//! }
//! ```

use serde::Serialize;

use crate::error::ResolveError;
use crate::geo::round_km;
use crate::model::{QueryPoint, Zone, ZoneStatus};
use crate::store::ZoneStore;

/// What to do with a candidate zone that lacks a coordinate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingCoordinates {
    /// Leave the zone out of the comparison
    #[default]
    Skip,
    /// Fail the lookup with [`ResolveError::ZoneWithoutCoordinates`]
    Reject,
}

/// Result of a successful nearest-zone lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestZone {
    pub zone: Zone,
    /// Distance from the query point, rounded to 2 decimals
    pub distance_km: f64,
}

pub struct NearestZoneResolver<'a, S: ?Sized> {
    store: &'a S,
    missing_coordinates: MissingCoordinates,
}

impl<'a, S: ZoneStore + ?Sized> NearestZoneResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        NearestZoneResolver {
            store,
            missing_coordinates: MissingCoordinates::default(),
        }
    }

    pub fn with_missing_coordinates(mut self, policy: MissingCoordinates) -> Self {
        self.missing_coordinates = policy;
        self
    }

    /// Find the closest zone with `status` to `point`
    ///
    /// Returns `Ok(None)` when no zone has the status, or none of them has
    /// both coordinates. The query point is checked before the store is read.
    pub fn resolve(
        &self,
        point: &QueryPoint,
        status: ZoneStatus,
    ) -> Result<Option<NearestZone>, ResolveError> {
        let origin = point.coordinate()?;
        let candidates = self.store.zones_with_status(status)?;

        let mut nearest: Option<(Zone, f64)> = None;
        for zone in candidates {
            let Some(position) = zone.coordinate() else {
                match self.missing_coordinates {
                    MissingCoordinates::Skip => continue,
                    MissingCoordinates::Reject => {
                        return Err(ResolveError::ZoneWithoutCoordinates(zone.id))
                    }
                }
            };

            let distance = origin.distance_to(&position);
            let closer = match &nearest {
                Some((_, shortest)) => distance < *shortest,
                None => true,
            };
            if closer {
                nearest = Some((zone, distance));
            }
        }

        Ok(nearest.map(|(zone, distance)| NearestZone {
            zone,
            distance_km: round_km(distance),
        }))
    }

    /// Shorthand for the dashboard's "where can I fish" lookup
    pub fn nearest_allowed(&self, point: &QueryPoint) -> Result<Option<NearestZone>, ResolveError> {
        self.resolve(point, ZoneStatus::Allowed)
    }
}
