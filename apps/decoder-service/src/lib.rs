//! # FTA QR Decoder Service
//!
//! HTTP wrapper around [`fta_qr_core::decode`] for scanning apps.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Decoder Service                                   │
//! │                                                                         │
//! │  Scanner app ──► POST /decode-fta-qr ──► decode_service ──► fta-qr-core│
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Middleware (outermost first)                                    │  │
//! │  │  Trace ─► Cors ─► timeout JSON ─► Timeout ─► DefaultBodyLimit    │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  GET /health ──► health_service                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config::ServiceConfig`]. Every key can be set through a
//! `FTA_QR_`-prefixed environment variable:
//! - `FTA_QR_BIND_ADDR` - Interface to bind (default: 0.0.0.0)
//! - `FTA_QR_PORT` - HTTP port (default: 8080)
//! - `FTA_QR_REQUEST_TIMEOUT_SECS` - Request timeout (default: 10)
//! - `FTA_QR_MAX_BODY_BYTES` - Body size limit (default: 65536)

pub mod config;
pub mod error;
pub mod services;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

// Re-exports
pub use crate::config::ServiceConfig;
pub use crate::error::ServiceError;

/// Path of the decode endpoint.
pub const DECODE_PATH: &str = "/decode-fta-qr";

/// Shared application state.
pub struct AppState {
    pub config: ServiceConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: ServiceConfig) -> Self {
        AppState {
            config,
            started_at: Utc::now(),
        }
    }
}

/// Build the full router. Used by main.rs and integration tests.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_body_bytes;
    let timeout = state.config.request_timeout();

    Router::new()
        .route(DECODE_PATH, post(services::decode_service::decode_fta_qr))
        .route("/health", get(services::health_service::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(map_response(timeout_as_json))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Gives the bare 408 from the timeout layer the same JSON body as every
/// other error.
async fn timeout_as_json(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        ServiceError::Timeout.into_response()
    } else {
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_timeout_gets_json_body() {
        let response = timeout_as_json(StatusCode::REQUEST_TIMEOUT.into_response()).await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Request timed out" }));
    }

    #[tokio::test]
    async fn test_other_responses_pass_through() {
        let response = timeout_as_json((StatusCode::OK, "ok").into_response()).await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
