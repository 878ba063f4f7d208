//! Error types shared by the stores and resolvers.
//!
//! "Nothing matched" is never an error here: resolvers return `Ok(None)` for
//! that case so callers can tell it apart from bad input and store failures.

use thiserror::Error;

use crate::model::{PathId, ZoneId};

/// A caller-supplied coordinate that cannot be used as a search origin
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("Latitude and Longitude are required")]
    Missing,

    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// Failure of a backing zone or path store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("path {path} references unknown zone {zone}")]
    DanglingReference { path: PathId, zone: ZoneId },
}

/// Errors returned by the nearest-zone and safe-path resolvers
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidInput(#[from] CoordinateError),

    #[error("zone {0} has no coordinates")]
    ZoneWithoutCoordinates(ZoneId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    /// True when the caller should fix its input rather than retry
    pub fn is_client_error(&self) -> bool {
        matches!(self, ResolveError::InvalidInput(_))
    }
}
