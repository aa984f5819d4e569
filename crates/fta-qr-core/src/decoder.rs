//! # Decoder
//!
//! Parses a scanned FTA QR payload back into labelled fields.
//!
//! ## Decoding Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "AQhBQ01FIExMQwIP…"                                                    │
//! │      │                                                                  │
//! │      ▼  reject empty                ──► MissingPayload                 │
//! │      ▼  Base64 decode (padded)      ──► InvalidBase64                  │
//! │  [01][08]ACME LLC [02][0F]1001…                                        │
//! │      │                                                                  │
//! │      ▼  TlvReader (cursor += 2 + len)                                  │
//! │      │     len past end             ──► Truncated / MissingLength      │
//! │      │     value not UTF-8          ──► InvalidUtf8                    │
//! │      ▼  tag_name()                                                     │
//! │  [{tag:1, name:"sellerName", value:"ACME LLC"}, …, {tag:9, "tag_9"}]   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The decoder never returns a partial list. Unknown tags are kept, in
//! encounter order, under `tag_<n>`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::{QrError, QrResult};
use crate::invoice::QrInvoice;
use crate::tags::{tag_name, FieldTag};
use crate::tlv::{TlvField, TlvReader};

/// One decoded TLV record.
///
/// ## Serialization
/// ```json
/// { "tag": 1, "name": "sellerName", "value": "ACME LLC" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DecodedField {
    pub tag: u8,
    pub name: String,
    pub value: String,
}

impl DecodedField {
    /// Labels a raw field with its registry name.
    pub fn from_tlv(field: TlvField) -> Self {
        DecodedField {
            name: tag_name(field.tag).into_owned(),
            tag: field.tag,
            value: field.value,
        }
    }

    /// Drops the label, for re-encoding with [`crate::encode_fields`].
    pub fn into_tlv(self) -> TlvField {
        TlvField::new(self.tag, self.value)
    }

    /// Returns the registry entry, if the tag is known.
    pub fn known_tag(&self) -> Option<FieldTag> {
        FieldTag::from_byte(self.tag)
    }
}

/// Decodes a Base64 QR payload.
///
/// Only the canonical wire form is accepted: standard alphabet, `=` padding,
/// no surrounding whitespace. Accepted text always re-encodes to itself.
///
/// ## Errors
/// - [`QrError::MissingPayload`] for `""`
/// - [`QrError::InvalidBase64`] when the text is not padded standard Base64
/// - [`QrError::MissingLength`], [`QrError::Truncated`],
///   [`QrError::InvalidUtf8`] for structurally broken TLV streams
pub fn decode(base64: &str) -> QrResult<Vec<DecodedField>> {
    if base64.is_empty() {
        return Err(QrError::MissingPayload);
    }

    let bytes = STANDARD.decode(base64).map_err(|e| {
        warn!(error = %e, "Rejected QR payload: not Base64");
        QrError::InvalidBase64(e.to_string())
    })?;

    decode_bytes(&bytes)
}

/// Walks a raw TLV buffer and labels every field.
pub fn decode_bytes(bytes: &[u8]) -> QrResult<Vec<DecodedField>> {
    let mut fields = Vec::new();

    for field in TlvReader::new(bytes) {
        let field = field.map_err(|e| {
            warn!(error = %e, "Rejected QR payload: malformed TLV");
            e
        })?;
        if FieldTag::from_byte(field.tag).is_none() {
            debug!(tag = field.tag, "Unrecognized QR tag kept as generic field");
        }
        fields.push(DecodedField::from_tlv(field));
    }

    debug!(fields = fields.len(), bytes = bytes.len(), "Decoded FTA QR payload");
    Ok(fields)
}

/// Decodes a payload that must be exactly the five invoice fields in tag
/// order 1..=5.
pub fn decode_invoice(base64: &str) -> QrResult<QrInvoice> {
    let fields = decode(base64)?;

    if fields.len() != FieldTag::ALL.len() {
        return Err(QrError::UnexpectedLayout(format!(
            "expected {} fields, found {}",
            FieldTag::ALL.len(),
            fields.len()
        )));
    }

    let values = fields
        .into_iter()
        .zip(FieldTag::ALL)
        .map(|(field, expected)| {
            if field.tag == expected.as_byte() {
                Ok(field.value)
            } else {
                Err(QrError::UnexpectedLayout(format!(
                    "expected tag {} ({}), found {} ({})",
                    expected.as_byte(),
                    expected.name(),
                    field.tag,
                    field.name
                )))
            }
        })
        .collect::<QrResult<Vec<String>>>()?;

    let [seller_name, trn, timestamp, total_with_vat, vat_amount]: [String; 5] = values
        .try_into()
        .map_err(|_| QrError::UnexpectedLayout("expected 5 fields".to_string()))?;

    Ok(QrInvoice {
        seller_name,
        trn,
        timestamp,
        total_with_vat,
        vat_amount,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode_fields;

    fn b64(bytes: &[u8]) -> String {
        STANDARD.encode(bytes)
    }

    #[test]
    fn test_unknown_tag_is_tolerated() {
        let fields = decode(&b64(&[9, 3, b'a', b'b', b'c'])).unwrap();
        assert_eq!(
            fields,
            vec![DecodedField {
                tag: 9,
                name: "tag_9".to_string(),
                value: "abc".to_string(),
            }]
        );
        assert!(fields[0].known_tag().is_none());
    }

    #[test]
    fn test_empty_value_decodes_to_empty_string() {
        let fields = decode(&b64(&[2, 0, 1, 1, b'X'])).unwrap();
        assert_eq!(fields[0].name, "trn");
        assert_eq!(fields[0].value, "");
        assert_eq!(fields[1].value, "X");
    }

    #[test]
    fn test_truncated_last_field_is_rejected() {
        let bytes = [1, 2, b'O', b'K', 5, 10, b'5', b'.', b'0'];
        let err = decode(&b64(&bytes)).unwrap_err();
        assert!(matches!(
            err,
            QrError::Truncated {
                tag: 5,
                declared: 10,
                available: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let err = decode("not-valid-base64!!").unwrap_err();
        assert!(matches!(err, QrError::InvalidBase64(_)));
        assert!(err.is_malformed_input());
    }

    #[test]
    fn test_empty_input_is_missing() {
        assert_eq!(decode("").unwrap_err(), QrError::MissingPayload);
        assert!(matches!(decode("  \n"), Err(QrError::InvalidBase64(_))));
    }

    #[test]
    fn test_unpadded_payload_is_rejected() {
        let padded = b64(&[1, 2, b'A', b'B']);
        assert_eq!(padded, "AQJBQg==");

        assert_eq!(decode(&padded).unwrap()[0].value, "AB");
        assert!(matches!(decode("AQJBQg"), Err(QrError::InvalidBase64(_))));
    }

    #[test]
    fn test_whitespace_wrapped_payload_is_rejected() {
        assert_eq!(decode("AQFB").unwrap()[0].value, "A");
        for wrapped in [" AQFB", "AQFB\n", " AQFB\n", "AQ FB"] {
            assert!(
                matches!(decode(wrapped), Err(QrError::InvalidBase64(_))),
                "{wrapped:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_accepted_payloads_reencode_identically() {
        for wire in ["AQJBQg==", "AQFB", "CQNhYmM=", "AQFBAgExAwFUBAEyBQEz"] {
            let fields = decode(wire).unwrap();
            let reencoded =
                encode_fields(&fields.into_iter().map(DecodedField::into_tlv).collect::<Vec<_>>())
                    .unwrap();
            assert_eq!(reencoded, wire);
        }
    }

    #[test]
    fn test_url_safe_alphabet_is_rejected() {
        // 0xFB 0xFF -> "+/8=" in the standard alphabet, "-_8=" url-safe
        assert!(decode("-_8=").is_err());
    }

    #[test]
    fn test_decode_invoice() {
        let bytes = [
            1, 1, b'S', 2, 1, b'T', 3, 1, b'D', 4, 1, b'9', 5, 1, b'1',
        ];
        let invoice = decode_invoice(&b64(&bytes)).unwrap();
        assert_eq!(invoice, QrInvoice::new("S", "T", "D", "9", "1"));
    }

    #[test]
    fn test_decode_invoice_rejects_other_layouts() {
        let short = [1, 1, b'S'];
        assert!(matches!(
            decode_invoice(&b64(&short)),
            Err(QrError::UnexpectedLayout(_))
        ));

        let swapped = [
            2, 1, b'T', 1, 1, b'S', 3, 1, b'D', 4, 1, b'9', 5, 1, b'1',
        ];
        let err = decode_invoice(&b64(&swapped)).unwrap_err();
        assert_eq!(
            err,
            QrError::UnexpectedLayout("expected tag 1 (sellerName), found 2 (trn)".to_string())
        );
    }

    #[test]
    fn test_serialization_shape() {
        let field = DecodedField::from_tlv(TlvField::new(4, "105.00"));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "tag": 4, "name": "totalWithVat", "value": "105.00" })
        );
    }
}
