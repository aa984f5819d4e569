//! # Error Types
//!
//! Codec error types for fta-qr-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fta-qr-core errors (this file)                                        │
//! │  ├── QrError          - Encode/decode failures                         │
//! │  │   ├── FieldTooLong          (encode-time format error)              │
//! │  │   ├── MissingPayload ┐                                              │
//! │  │   ├── InvalidBase64  │                                              │
//! │  │   ├── MissingLength  │      (decode-time malformed input)           │
//! │  │   ├── Truncated      │                                              │
//! │  │   ├── InvalidUtf8    │                                              │
//! │  │   └── UnexpectedLayout┘                                             │
//! │  └── ValidationError  - Advisory field checks                          │
//! │                                                                         │
//! │  decoder-service errors (separate crate)                               │
//! │  └── ServiceError     - What HTTP clients see (JSON body)              │
//! │                                                                         │
//! │  Flow: ValidationError → QrError → ServiceError → HTTP response        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown tags are NOT errors. The decoder keeps them as `tag_<n>`.

use thiserror::Error;

// =============================================================================
// Codec Error
// =============================================================================

/// Errors raised while encoding or decoding a QR payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QrError {
    /// A field value does not fit the single length byte.
    ///
    /// ## When This Occurs
    /// - Seller name longer than 255 UTF-8 bytes (Arabic text counts
    ///   two bytes per letter, so ~127 letters is already the limit)
    ///
    /// ## User Workflow
    /// ```text
    /// Print receipt
    ///      │
    ///      ▼
    /// encode(invoice) ──► FieldTooLong { field: "sellerName", len: 300 }
    ///      │
    ///      ▼
    /// Receipt printed WITHOUT the QR section
    /// ```
    #[error("{field} (tag {tag}) is {len} bytes, maximum is {max}")]
    FieldTooLong {
        field: String,
        tag: u8,
        len: usize,
        max: usize,
    },

    /// Input string was empty.
    #[error("QR payload is empty")]
    MissingPayload,

    /// Input is not valid standard Base64.
    #[error("Invalid Base64: {0}")]
    InvalidBase64(String),

    /// A tag byte was the last byte of the buffer.
    #[error("Tag {tag} at offset {offset} has no length byte")]
    MissingLength { tag: u8, offset: usize },

    /// A declared length reads past the end of the buffer.
    #[error("Tag {tag} at offset {offset} declares {declared} bytes but only {available} remain")]
    Truncated {
        tag: u8,
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// Value bytes are not UTF-8.
    #[error("Tag {tag} at offset {offset} is not valid UTF-8")]
    InvalidUtf8 { tag: u8, offset: usize },

    /// Payload decoded but is not the five-field invoice layout.
    #[error("Unexpected QR layout: {0}")]
    UnexpectedLayout(String),

    /// Amount string could not be parsed.
    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl QrError {
    /// Returns true for errors caused by a bad inbound payload.
    ///
    /// Encode-time and amount/validation errors are not in this group.
    pub fn is_malformed_input(&self) -> bool {
        matches!(
            self,
            QrError::MissingPayload
                | QrError::InvalidBase64(_)
                | QrError::MissingLength { .. }
                | QrError::Truncated { .. }
                | QrError::InvalidUtf8 { .. }
                | QrError::UnexpectedLayout(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value exceeds its byte budget.
    #[error("{field} must be at most {max} bytes, got {len}")]
    TooLong { field: String, max: usize, len: usize },

    /// Invalid format (e.g., TRN with letters, unparsable timestamp).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with QrError.
pub type QrResult<T> = Result<T, QrError>;

// =============================================================================
// Unit Tests
// =============================================================================
