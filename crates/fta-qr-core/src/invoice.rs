//! # QR Invoice
//!
//! The typed input of the encoder.
//!
//! ## Where It Comes From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Invoice record (caller)          QrInvoice (this module)              │
//! │  ───────────────────────          ─────────────────────────            │
//! │  company.name / seller …  ──────► seller_name     (tag 1)              │
//! │  company.trn / vat_no …   ──────► trn             (tag 2)              │
//! │  created_at               ──────► timestamp       (tag 3)  ISO-8601    │
//! │  grand_total              ──────► total_with_vat  (tag 4)  "105.00"    │
//! │  vat_total                ──────► vat_amount      (tag 5)  "5.00"      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Picking the right property off a loosely shaped invoice record is the
//! caller's job. Once a `QrInvoice` exists, every field is required.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::QrResult;
use crate::money::Money;
use crate::tags::FieldTag;
use crate::tlv::TlvField;
use crate::validation::{
    validate_amount, validate_field_length, validate_required, validate_timestamp, validate_trn,
};

/// The five values embedded in an FTA e-invoice QR code.
///
/// All values are opaque text on the wire. Amounts and timestamp are
/// expected to be pre-formatted; use [`QrInvoice::from_sale`] to get the
/// canonical formatting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QrInvoice {
    pub seller_name: String,
    pub trn: String,
    /// ISO-8601 timestamp, e.g. `2024-01-15T10:30:00.000Z`.
    pub timestamp: String,
    /// Total including VAT, e.g. `105.00`.
    pub total_with_vat: String,
    /// VAT amount, e.g. `5.00`.
    pub vat_amount: String,
}

impl QrInvoice {
    pub fn new(
        seller_name: impl Into<String>,
        trn: impl Into<String>,
        timestamp: impl Into<String>,
        total_with_vat: impl Into<String>,
        vat_amount: impl Into<String>,
    ) -> Self {
        QrInvoice {
            seller_name: seller_name.into(),
            trn: trn.into(),
            timestamp: timestamp.into(),
            total_with_vat: total_with_vat.into(),
            vat_amount: vat_amount.into(),
        }
    }

    /// Builds an invoice from sale totals.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use fta_qr_core::invoice::QrInvoice;
    /// use fta_qr_core::money::Money;
    ///
    /// let issued_at = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
    /// let invoice = QrInvoice::from_sale(
    ///     "ACME LLC",
    ///     "100123456700003",
    ///     issued_at,
    ///     Money::from_minor(10500),
    ///     Money::from_minor(500),
    /// );
    ///
    /// assert_eq!(invoice.timestamp, "2024-01-15T10:30:00.000Z");
    /// assert_eq!(invoice.total_with_vat, "105.00");
    /// assert_eq!(invoice.vat_amount, "5.00");
    /// ```
    pub fn from_sale(
        seller_name: impl Into<String>,
        trn: impl Into<String>,
        issued_at: DateTime<Utc>,
        total_with_vat: Money,
        vat_amount: Money,
    ) -> Self {
        QrInvoice {
            seller_name: seller_name.into(),
            trn: trn.into(),
            timestamp: format_timestamp(issued_at),
            total_with_vat: total_with_vat.to_decimal_string(),
            vat_amount: vat_amount.to_decimal_string(),
        }
    }

    /// Value carried under a known tag.
    pub fn value(&self, tag: FieldTag) -> &str {
        match tag {
            FieldTag::SellerName => &self.seller_name,
            FieldTag::Trn => &self.trn,
            FieldTag::Timestamp => &self.timestamp,
            FieldTag::TotalWithVat => &self.total_with_vat,
            FieldTag::VatAmount => &self.vat_amount,
        }
    }

    /// The five fields in wire order (tags 1..=5).
    pub fn fields(&self) -> Vec<TlvField> {
        FieldTag::ALL
            .iter()
            .map(|&tag| TlvField::new(tag.as_byte(), self.value(tag)))
            .collect()
    }

    /// Runs every field check and returns the first failure.
    ///
    /// Not called by the encoder, which only enforces the byte limit.
    pub fn validate(&self) -> QrResult<()> {
        for tag in FieldTag::ALL {
            validate_field_length(tag.name(), self.value(tag))?;
        }

        validate_required(FieldTag::SellerName.name(), &self.seller_name)?;
        validate_trn(&self.trn)?;
        validate_timestamp(&self.timestamp)?;
        validate_amount(FieldTag::TotalWithVat.name(), &self.total_with_vat)?;
        validate_amount(FieldTag::VatAmount.name(), &self.vat_amount)?;

        Ok(())
    }
}

/// Formats a timestamp as ISO-8601 UTC with millisecond precision.
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use fta_qr_core::invoice::format_timestamp;
///
/// let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
/// assert_eq!(format_timestamp(ts), "2024-01-15T10:30:00.000Z");
/// ```
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{QrError, ValidationError};
    use chrono::TimeZone;

    fn acme() -> QrInvoice {
        QrInvoice::new(
            "ACME LLC",
            "100123456700003",
            "2024-01-15T10:30:00.000Z",
            "105.00",
            "5.00",
        )
    }

    #[test]
    fn test_fields_in_tag_order() {
        let fields = acme().fields();
        let tags: Vec<u8> = fields.iter().map(|f| f.tag).collect();
        assert_eq!(tags, vec![1, 2, 3, 4, 5]);
        assert_eq!(fields[0].value, "ACME LLC");
        assert_eq!(fields[4].value, "5.00");
    }

    #[test]
    fn test_from_sale_formats_values() {
        let issued_at = Utc
            .with_ymd_and_hms(2024, 1, 15, 10, 30, 0)
            .unwrap()
            + chrono::Duration::milliseconds(7);
        let invoice = QrInvoice::from_sale(
            "ACME LLC",
            "100123456700003",
            issued_at,
            Money::from_minor(10500),
            Money::from_minor(500),
        );
        assert_eq!(invoice.timestamp, "2024-01-15T10:30:00.007Z");
        assert_eq!(invoice, QrInvoice { timestamp: invoice.timestamp.clone(), ..acme() });
    }

    #[test]
    fn test_validate_accepts_good_invoice() {
        assert!(acme().validate().is_ok());
    }

    #[test]
    fn test_validate_reports_first_failure() {
        let invoice = QrInvoice {
            trn: "TRN-1".to_string(),
            vat_amount: "five".to_string(),
            ..acme()
        };
        let err = invoice.validate().unwrap_err();
        assert!(matches!(
            err,
            QrError::Validation(ValidationError::InvalidFormat { ref field, .. }) if field == "trn"
        ));
    }

    #[test]
    fn test_validate_checks_length_first() {
        let invoice = QrInvoice {
            seller_name: "ش".repeat(200),
            ..acme()
        };
        let err = invoice.validate().unwrap_err();
        assert!(matches!(
            err,
            QrError::Validation(ValidationError::TooLong { len: 400, .. })
        ));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(acme()).unwrap();
        assert_eq!(json["sellerName"], "ACME LLC");
        assert_eq!(json["totalWithVat"], "105.00");
        assert_eq!(json["vatAmount"], "5.00");
    }
}
