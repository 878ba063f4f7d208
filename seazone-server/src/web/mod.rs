//! REST API
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /api/zones` | all zones with their species |
//! | `GET /api/zones/nearest-allowed?lat=&lng=` | nearest allowed zone |
//! | `GET /api/paths/find-safe?from=&to=` | safe path between two zones |
//! | `GET /api/paths/safe` | all safe paths with expanded zones |
//! | `GET /api/test` | liveness check |

use std::io;
use std::net::SocketAddr;

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_graceful_shutdown::SubsystemHandle;

use crate::AppState;

mod error;
mod map;

pub use error::ApiError;

#[derive(Error, Debug)]
pub enum WebError {
    #[error("Socket operation failed on {addr}")]
    Io {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
}

pub struct Web {
    state: AppState,
    addr: SocketAddr,
}

impl Web {
    pub fn new(state: AppState, addr: SocketAddr) -> Self {
        Web { state, addr }
    }

    pub async fn run(self, subsys: SubsystemHandle) -> Result<(), WebError> {
        let addr = self.addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| WebError::Io { addr, source })?;

        log::info!("Starting HTTP web server on {}", addr);

        axum::serve(listener, router(self.state))
            .with_graceful_shutdown(async move { subsys.on_shutdown_requested().await })
            .await
            .map_err(|source| WebError::Io { addr, source })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/zones", get(map::get_zones))
        .route("/api/zones/nearest-allowed", get(map::get_nearest_allowed_zone))
        .route("/api/paths/safe", get(map::get_all_safe_paths))
        .route("/api/paths/find-safe", get(map::get_safe_path))
        .route("/api/test", get(api_test))
        .with_state(state)
}

async fn api_test() -> Json<Value> {
    Json(json!({ "message": "API Works!" }))
}
