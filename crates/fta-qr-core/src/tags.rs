//! # Tag Registry
//!
//! The fixed set of TLV tags defined for the FTA e-invoice QR code.
//!
//! ```text
//! ┌─────┬──────────────┬──────────────────────────────────────────────┐
//! │ Tag │ Wire name    │ Content                                      │
//! ├─────┼──────────────┼──────────────────────────────────────────────┤
//! │  1  │ sellerName   │ Seller name as printed on the invoice        │
//! │  2  │ trn          │ Seller Tax Registration Number               │
//! │  3  │ timestamp    │ ISO-8601 invoice timestamp                   │
//! │  4  │ totalWithVat │ Invoice total including VAT, decimal string  │
//! │  5  │ vatAmount    │ VAT amount, decimal string                   │
//! ├─────┼──────────────┼──────────────────────────────────────────────┤
//! │ 0,6+│ tag_<n>      │ Unrecognized, preserved by the decoder       │
//! └─────┴──────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! The registry is append-only. Existing numbers are never reassigned.

use std::borrow::Cow;
use std::fmt;

/// A tag defined by the FTA QR layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FieldTag {
    SellerName = 1,
    Trn = 2,
    Timestamp = 3,
    TotalWithVat = 4,
    VatAmount = 5,
}

impl FieldTag {
    /// All known tags in encoding order.
    pub const ALL: [FieldTag; 5] = [
        FieldTag::SellerName,
        FieldTag::Trn,
        FieldTag::Timestamp,
        FieldTag::TotalWithVat,
        FieldTag::VatAmount,
    ];

    /// Looks up a tag byte. Returns `None` for unrecognized tags.
    pub const fn from_byte(byte: u8) -> Option<FieldTag> {
        match byte {
            1 => Some(FieldTag::SellerName),
            2 => Some(FieldTag::Trn),
            3 => Some(FieldTag::Timestamp),
            4 => Some(FieldTag::TotalWithVat),
            5 => Some(FieldTag::VatAmount),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_byte(self) -> u8 {
        self as u8
    }

    /// Wire name used in decoder output.
    pub const fn name(self) -> &'static str {
        match self {
            FieldTag::SellerName => "sellerName",
            FieldTag::Trn => "trn",
            FieldTag::Timestamp => "timestamp",
            FieldTag::TotalWithVat => "totalWithVat",
            FieldTag::VatAmount => "vatAmount",
        }
    }
}

impl fmt::Display for FieldTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Maps any tag byte to its display name.
///
/// ## Example
/// ```rust
/// use fta_qr_core::tags::tag_name;
///
/// assert_eq!(tag_name(2), "trn");
/// assert_eq!(tag_name(9), "tag_9");
/// ```
pub fn tag_name(tag: u8) -> Cow<'static, str> {
    match FieldTag::from_byte(tag) {
        Some(known) => Cow::Borrowed(known.name()),
        None => Cow::Owned(format!("tag_{}", tag)),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_round_trip_through_byte() {
        for tag in FieldTag::ALL {
            assert_eq!(FieldTag::from_byte(tag.as_byte()), Some(tag));
        }
    }

    #[test]
    fn test_encoding_order_is_one_through_five() {
        let bytes: Vec<u8> = FieldTag::ALL.iter().map(|t| t.as_byte()).collect();
        assert_eq!(bytes, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_tag_names() {
        assert_eq!(tag_name(1), "sellerName");
        assert_eq!(tag_name(2), "trn");
        assert_eq!(tag_name(3), "timestamp");
        assert_eq!(tag_name(4), "totalWithVat");
        assert_eq!(tag_name(5), "vatAmount");
    }

    #[test]
    fn test_unknown_tags_get_generic_name() {
        assert_eq!(tag_name(0), "tag_0");
        assert_eq!(tag_name(6), "tag_6");
        assert_eq!(tag_name(255), "tag_255");
        assert!(FieldTag::from_byte(6).is_none());
    }
}
