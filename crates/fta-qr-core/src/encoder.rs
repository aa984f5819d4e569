//! # Encoder
//!
//! Serializes invoice fields into the Base64 string handed to the QR
//! renderer.
//!
//! ## Encoding Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  QrInvoice                                                              │
//! │      │                                                                  │
//! │      ▼  for tag in 1..=5                                               │
//! │  [01][08]ACME LLC [02][0F]100123456700003 [03][18]2024-01-15T…  …      │
//! │      │                                                                  │
//! │      ▼  Base64 (standard alphabet, '=' padding)                        │
//! │  "AQhBQ01FIExMQwIPMTAwMTIzNDU2NzAwMDAz…"                               │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  QR image renderer (caller)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A field over 255 bytes fails the whole encode. Nothing is truncated,
//! and the caller prints the receipt without the QR section.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

use crate::error::QrResult;
use crate::invoice::QrInvoice;
use crate::tags::FieldTag;
use crate::tlv::{write_field, TlvField, TLV_HEADER_LEN};

/// Encodes an invoice into the FTA QR Base64 payload.
///
/// ## Example
/// ```rust
/// use fta_qr_core::{decode, encode, QrInvoice};
///
/// let invoice = QrInvoice::new(
///     "ACME LLC",
///     "100123456700003",
///     "2024-01-15T10:30:00.000Z",
///     "105.00",
///     "5.00",
/// );
///
/// let payload = encode(&invoice).unwrap();
/// let fields = decode(&payload).unwrap();
/// assert_eq!(fields[0].name, "sellerName");
/// assert_eq!(fields[0].value, "ACME LLC");
/// ```
pub fn encode(invoice: &QrInvoice) -> QrResult<String> {
    let bytes = encode_to_bytes(invoice)?;
    Ok(STANDARD.encode(bytes))
}

/// Builds the raw TLV buffer for an invoice, before Base64 framing.
pub fn encode_to_bytes(invoice: &QrInvoice) -> QrResult<Vec<u8>> {
    let capacity = FieldTag::ALL
        .iter()
        .map(|&tag| TLV_HEADER_LEN + invoice.value(tag).len())
        .sum();
    let mut buf = Vec::with_capacity(capacity);

    for tag in FieldTag::ALL {
        write_field(&mut buf, tag.as_byte(), invoice.value(tag))?;
    }

    debug!(bytes = buf.len(), "Encoded FTA QR payload");
    Ok(buf)
}

/// Encodes an arbitrary ordered field list.
///
/// Used to re-encode decoded payloads, which may carry unknown or
/// repeated tags.
pub fn encode_fields(fields: &[TlvField]) -> QrResult<String> {
    let capacity = fields.iter().map(TlvField::encoded_len).sum();
    let mut buf = Vec::with_capacity(capacity);

    for field in fields {
        write_field(&mut buf, field.tag, &field.value)?;
    }

    Ok(STANDARD.encode(buf))
}

// =============================================================================
// Unit Tests
// =============================================================================
