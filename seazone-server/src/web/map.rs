//! Map endpoints: zones, nearest allowed zone, safe paths

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use seazone_core::{
    NearestZone, NearestZoneResolver, Path, QueryPoint, SafePath, SafePathResolver, Zone, ZoneId,
    ZoneStore,
};

use super::error::ApiError;
use crate::AppState;

/// Zone pair for the safe-path lookup
#[derive(Debug, Deserialize)]
pub(super) struct PathQuery {
    from: Option<ZoneId>,
    to: Option<ZoneId>,
}

/// GET /api/zones
pub(super) async fn get_zones(State(state): State<AppState>) -> Result<Json<Vec<Zone>>, ApiError> {
    Ok(Json(state.store.zones()?))
}

/// GET /api/zones/nearest-allowed?lat=..&lng=..
pub(super) async fn get_nearest_allowed_zone(
    State(state): State<AppState>,
    query: Result<Query<QueryPoint>, QueryRejection>,
) -> Result<Json<NearestZone>, ApiError> {
    let Query(point) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;

    let resolver = NearestZoneResolver::new(state.store.as_ref())
        .with_missing_coordinates(state.missing_coordinates);

    match resolver.nearest_allowed(&point)? {
        Some(nearest) => {
            log::debug!(
                "Nearest allowed zone to ({:?}, {:?}) is {} at {} km",
                point.lat,
                point.lng,
                nearest.zone.id,
                nearest.distance_km
            );
            Ok(Json(nearest))
        }
        None => Err(ApiError::NoZoneFound),
    }
}

/// GET /api/paths/find-safe?from=..&to=..
pub(super) async fn get_safe_path(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Result<Json<Path>, ApiError> {
    let Query(pair) = query.map_err(|e| ApiError::InvalidInput(e.body_text()))?;
    let (Some(from), Some(to)) = (pair.from, pair.to) else {
        return Err(ApiError::InvalidInput(
            "Both from and to zone ids are required".to_string(),
        ));
    };

    let store = state.store.as_ref();
    SafePathResolver::new(store, store)
        .find_safe(from, to)?
        .map(Json)
        .ok_or(ApiError::NoSafePath)
}

/// GET /api/paths/safe
pub(super) async fn get_all_safe_paths(
    State(state): State<AppState>,
) -> Result<Json<Vec<SafePath>>, ApiError> {
    let store = state.store.as_ref();
    Ok(Json(SafePathResolver::new(store, store).all_safe()?))
}
