//! # Validation Module
//!
//! Field checks for QR invoice input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (invoice print path)                                  │
//! │  ├── Picks seller name / TRN / totals off the invoice record           │
//! │  └── Optionally runs QrInvoice::validate() ← THIS MODULE               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Encoder                                                      │
//! │  └── ALWAYS enforces the 255-byte limit (validate_field_length)        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Decoder                                                      │
//! │  └── Structural checks only, values stay opaque text                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Only the byte-length rule is mandatory. The format checks are advisory:
//! the wire format itself treats every value as opaque text.
//!
//! ## Usage
//! ```rust
//! use fta_qr_core::validation::{validate_trn, validate_amount};
//!
//! assert!(validate_trn("100123456700003").is_ok());
//! assert!(validate_amount("totalWithVat", "105.00").is_ok());
//! ```

use chrono::DateTime;

use crate::error::ValidationError;
use crate::money::Money;
use crate::tlv::MAX_VALUE_LEN;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Number of digits in a UAE Tax Registration Number.
pub const TRN_DIGITS: usize = 15;

// =============================================================================
// Length
// =============================================================================

/// Checks that `value` fits in one TLV length byte.
///
/// ## Example
/// ```rust
/// use fta_qr_core::validation::validate_field_length;
///
/// assert!(validate_field_length("sellerName", &"a".repeat(255)).is_ok());
/// assert!(validate_field_length("sellerName", &"a".repeat(256)).is_err());
/// // 128 Arabic letters = 256 bytes
/// assert!(validate_field_length("sellerName", &"ش".repeat(128)).is_err());
/// ```
pub fn validate_field_length(field: &str, value: &str) -> ValidationResult<()> {
    if value.len() > MAX_VALUE_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_VALUE_LEN,
            len: value.len(),
        });
    }
    Ok(())
}

/// Checks that a field is not blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Format
// =============================================================================

/// Validates a UAE TRN.
///
/// ## Rules
/// - Exactly 15 characters
/// - ASCII digits only
pub fn validate_trn(trn: &str) -> ValidationResult<()> {
    validate_required("trn", trn)?;

    if trn.len() != TRN_DIGITS || !trn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "trn".to_string(),
            reason: format!("must be exactly {} digits", TRN_DIGITS),
        });
    }

    Ok(())
}

/// Validates an ISO-8601 / RFC 3339 timestamp such as
/// `2024-01-15T10:30:00.000Z`.
pub fn validate_timestamp(timestamp: &str) -> ValidationResult<()> {
    validate_required("timestamp", timestamp)?;

    DateTime::parse_from_rfc3339(timestamp).map_err(|e| ValidationError::InvalidFormat {
        field: "timestamp".to_string(),
        reason: e.to_string(),
    })?;

    Ok(())
}

/// Validates a decimal amount string (at most two decimal places).
pub fn validate_amount(field: &str, value: &str) -> ValidationResult<()> {
    validate_required(field, value)?;

    Money::parse_decimal(value).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a decimal number with at most two decimal places".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
