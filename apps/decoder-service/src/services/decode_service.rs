//! FTA QR decode endpoint.
//!
//! ## Contract
//! ```text
//! POST /decode-fta-qr
//! { "base64": "AQhBQ01FIExMQwIP…" }
//!
//! 200 { "decoded": [ { "tag": 1, "name": "sellerName", "value": "ACME LLC" }, … ] }
//! 400 { "error": "Missing base64 in request body" }
//! 500 { "error": "Invalid Base64 or TLV format", "details": "…" }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use fta_qr_core::{decode, DecodedField};

use crate::error::ServiceError;

/// Request body.
///
/// `base64` is kept as raw JSON so that a missing key and a non-string
/// value can be told apart.
#[derive(Debug, Default, Deserialize)]
pub struct DecodeRequest {
    #[serde(default)]
    pub base64: Option<Value>,
}

/// Success body.
#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeResponse {
    pub decoded: Vec<DecodedField>,
}

/// `POST /decode-fta-qr`
pub async fn decode_fta_qr(
    body: Result<Json<DecodeRequest>, JsonRejection>,
) -> Result<Json<DecodeResponse>, ServiceError> {
    let Json(request) = body?;
    let decoded = decode_request(request)?;
    Ok(Json(DecodeResponse { decoded }))
}

/// Validates the body shape and runs the decoder.
pub fn decode_request(request: DecodeRequest) -> Result<Vec<DecodedField>, ServiceError> {
    let payload = match request.base64 {
        None | Some(Value::Null) => return Err(ServiceError::MissingBase64),
        Some(Value::String(payload)) => payload,
        Some(other) => {
            return Err(ServiceError::Malformed(format!(
                "base64 must be a string, got {}",
                json_type_name(&other)
            )))
        }
    };

    let decoded = decode(&payload)?;
    debug!(fields = decoded.len(), "Decoded QR payload for client");
    Ok(decoded)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
