//! SeaZone server
//!
//! Serves the fishing-zone map API on top of [`seazone_core`]: the zone list,
//! the nearest allowed zone to a position, and safe paths between zones.

use std::sync::Arc;

use seazone_core::{MapStore, MissingCoordinates};

pub mod config;
pub mod dataset;
pub mod web;

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MapStore>,
    pub missing_coordinates: MissingCoordinates,
}

impl AppState {
    pub fn new<S>(store: S, missing_coordinates: MissingCoordinates) -> Self
    where
        S: MapStore + 'static,
    {
        AppState::with_store(Arc::new(store), missing_coordinates)
    }

    pub fn with_store(store: Arc<dyn MapStore>, missing_coordinates: MissingCoordinates) -> Self {
        AppState {
            store,
            missing_coordinates,
        }
    }
}
