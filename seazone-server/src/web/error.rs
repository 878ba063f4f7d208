use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use seazone_core::{ResolveError, StoreError};

/// Request outcome other than success, mapped onto an HTTP status
///
/// 400 means "fix your input", 404 means "nothing matched", 500 means the
/// backing store or its data failed. An unreachable store and a broken
/// record both answer 500; only the log line tells them apart.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("No allowed zone found")]
    NoZoneFound,

    #[error("No safe path found")]
    NoSafePath,

    #[error("{0}")]
    StoreUnavailable(String),

    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(_) => ApiError::StoreUnavailable(e.to_string()),
            StoreError::DanglingReference { .. } => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        if e.is_client_error() {
            return ApiError::InvalidInput(e.to_string());
        }
        match e {
            ResolveError::Store(cause) => cause.into(),
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::InvalidInput(_) => {
                log::debug!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            ApiError::NoZoneFound => (
                StatusCode::NOT_FOUND,
                Json(json!({ "zone": null, "distance_km": null, "message": message })),
            )
                .into_response(),
            ApiError::NoSafePath => {
                (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
            }
            ApiError::StoreUnavailable(_) => {
                log::error!("Store unavailable: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
            ApiError::Internal(_) => {
                log::error!("Request failed: {}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": message })),
                )
                    .into_response()
            }
        }
    }
}
