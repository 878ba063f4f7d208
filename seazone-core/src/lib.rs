//! SeaZone Core
//!
//! Platform-independent library behind the SeaZone fishing-zone dashboard.
//! It holds the zone/path data model and the two computational pieces the
//! dashboard needs beyond plain CRUD:
//!
//! - **Nearest-zone lookup**: haversine proximity search over zones carrying a
//!   given status (see [`nearest`])
//! - **Safe-path lookup**: directional search for safe paths between zones
//!   (see [`paths`])
//!
//! The crate does no I/O. Zones and paths are read through the [`ZoneStore`]
//! and [`PathStore`] traits; [`MemoryStore`] is the in-process implementation
//! used by the server.
//!
//! # Example
//!
//! ```rust,ignore
//! use seazone_core::{MemoryStore, NearestZoneResolver, QueryPoint, ZoneStatus};
//!
//! let store = MemoryStore::new(zones, paths);
//! let resolver = NearestZoneResolver::new(&store);
//!
//! let point = QueryPoint { lat: Some(34.0), lng: Some(-6.8) };
//! if let Some(nearest) = resolver.resolve(&point, ZoneStatus::Allowed)? {
//!     println!("{} is {} km away", nearest.zone.name, nearest.distance_km);
//! }
//! ```

pub mod geo;
pub mod model;
pub mod nearest;
pub mod paths;
pub mod store;

mod error;

pub use error::{CoordinateError, ResolveError, StoreError};
pub use geo::{haversine_distance, round_km, Coordinate, EARTH_RADIUS_KM};
pub use model::{
    Path, PathId, QueryPoint, SafePath, Species, SpeciesId, SpeciesPivot, SpeciesStatus,
    Waypoint, Zone, ZoneId, ZoneSpecies, ZoneStatus,
};
pub use nearest::{MissingCoordinates, NearestZone, NearestZoneResolver};
pub use paths::SafePathResolver;
pub use store::{MapStore, MemoryStore, PathStore, ZoneStore};
