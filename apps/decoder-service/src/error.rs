//! # Service Error Type
//!
//! Everything a request can fail with, and the JSON body the client sees.
//!
//! ## Error Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cause                              Status   Body                       │
//! │  ─────────────────────────────────  ──────   ─────────────────────────  │
//! │  body has no / null / empty base64   400     { error }                  │
//! │  body is not JSON, too large, …      4xx     { error }                  │
//! │  base64 not a string                 500     { error, details }         │
//! │  invalid Base64 / broken TLV         500     { error, details }         │
//! │  any other codec failure             500     { error, details }         │
//! │  request timed out                   408     { error }                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing failures never escape the handler: the process keeps serving.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::warn;

use fta_qr_core::QrError;

/// Top-level message for every malformed-payload response.
pub const MALFORMED_MESSAGE: &str = "Invalid Base64 or TLV format";

/// Top-level message for codec failures that are not the client's payload.
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Errors returned by the decoder endpoints.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Missing base64 in request body")]
    MissingBase64,

    #[error("{message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Invalid Base64 or TLV format: {0}")]
    Malformed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// JSON error body.
///
/// ```json
/// { "error": "Invalid Base64 or TLV format", "details": "Invalid Base64: …" }
/// ```
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::MissingBase64 => StatusCode::BAD_REQUEST,
            ServiceError::Rejected { status, .. } => *status,
            ServiceError::Malformed(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServiceError::Timeout => StatusCode::REQUEST_TIMEOUT,
        }
    }

    fn body(&self) -> ErrorBody {
        match self {
            ServiceError::Malformed(details) => ErrorBody {
                error: MALFORMED_MESSAGE.to_string(),
                details: Some(details.clone()),
            },
            ServiceError::Internal(details) => ErrorBody {
                error: INTERNAL_MESSAGE.to_string(),
                details: Some(details.clone()),
            },
            other => ErrorBody {
                error: other.to_string(),
                details: None,
            },
        }
    }
}

impl From<QrError> for ServiceError {
    fn from(error: QrError) -> Self {
        match error {
            QrError::MissingPayload => ServiceError::MissingBase64,
            malformed if malformed.is_malformed_input() => {
                ServiceError::Malformed(malformed.to_string())
            }
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        ServiceError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(status = status.as_u16(), error = %self, "Decode request failed");
        (status, Json(self.body())).into_response()
    }
}
