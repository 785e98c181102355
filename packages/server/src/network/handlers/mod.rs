//! HTTP handler definitions for the Gearbook server.
//!
//! Defines [`AppState`] (the shared state carried through axum extractors)
//! and [`ApiError`] (the warning-vs-fault error surface), and re-exports
//! the handler functions used when building the router.

pub mod health;
pub mod records;
pub mod roster;

pub use health::{health_handler, liveness_handler, readiness_handler};
pub use records::{
    create_record_handler, delete_record_handler, list_records_handler, update_record_handler,
};
pub use roster::roster_handler;

use std::sync::Arc;
use std::time::Instant;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use gearbook_core::messages::WarningPayload;

use crate::network::config::NetworkConfig;
use crate::network::shutdown::ShutdownController;
use crate::storage::{RecordError, RecordStore};

/// Shared application state passed to all axum handlers via `State`.
///
/// Holds `Arc` references to shared resources so cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// The record operations component over the injected sheet store.
    pub records: Arc<RecordStore>,
    /// Fixed holder names for the display layer's person selector.
    pub roster: Arc<Vec<String>>,
    /// Graceful shutdown controller with health state and in-flight tracking.
    pub shutdown: Arc<ShutdownController>,
    /// Network configuration.
    pub config: Arc<NetworkConfig>,
    /// Server process start time, used for uptime calculation.
    pub start_time: Instant,
}

/// Error surface of the records API.
///
/// Warnings are the non-fatal cases (invalid index, unknown search column):
/// 422 with an inline warning body and no write performed. Everything else
/// is an unrecovered store fault and surfaces as 500.
#[derive(Debug)]
pub enum ApiError {
    /// Non-fatal validation failure, reported inline to the operator.
    Warning(String),
    /// Unrecovered store/network fault.
    Internal(anyhow::Error),
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        if err.is_warning() {
            Self::Warning(err.to_string())
        } else {
            Self::Internal(anyhow::Error::new(err))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Warning(warning) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(WarningPayload { warning }),
            )
                .into_response(),
            Self::Internal(err) => {
                error!(error = format!("{err:#}"), "record operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(WarningPayload {
                        warning: "internal error".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_map_from_invalid_index() {
        let err = ApiError::from(RecordError::InvalidIndex { index: 9, limit: 2 });
        assert!(matches!(err, ApiError::Warning(ref text) if text == "Invalid row index."));
    }

    #[test]
    fn faults_map_from_store_errors() {
        let err = ApiError::from(RecordError::Store(anyhow::anyhow!("quota exceeded")));
        assert!(matches!(err, ApiError::Internal(_)));
    }

    #[test]
    fn warning_response_is_422() {
        let response = ApiError::Warning("Invalid row index.".into()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn internal_response_is_500() {
        let response = ApiError::Internal(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
