//! Health check endpoint.
//!
//! Used by load balancers and uptime monitors. The service has no
//! downstream dependencies, so "serving" means healthy.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Health response body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub server_time: String,
    pub uptime_secs: i64,
}

/// `GET /health`
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let now = Utc::now();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        server_time: now.to_rfc3339_opts(SecondsFormat::Secs, true),
        uptime_secs: (now - state.started_at).num_seconds().max(0),
    })
}
