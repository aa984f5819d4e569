//! # Money Module
//!
//! Integer amounts and the decimal strings written into the QR payload.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    (1.005).toFixed(2) = "1.00"   ❌ WRONG!                              │
//! │                                                                         │
//! │  The QR code carries amounts as TEXT ("105.00"). A scanner compares    │
//! │  that text with the printed receipt, so the string must be exact.      │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Fils                                             │
//! │    10500 fils ──► "105.00"  (always two decimals, no rounding drift)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fta_qr_core::money::{vat_from_inclusive, Money, UAE_STANDARD_VAT_BPS};
//!
//! let total = Money::from_minor(10500); // AED 105.00
//! let vat = vat_from_inclusive(total, UAE_STANDARD_VAT_BPS);
//!
//! assert_eq!(total.to_decimal_string(), "105.00");
//! assert_eq!(vat.to_decimal_string(), "5.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

use crate::error::{QrError, QrResult};

/// UAE standard VAT rate in basis points (5%).
pub const UAE_STANDARD_VAT_BPS: u32 = 500;

const MINOR_PER_MAJOR: i64 = 100;
const BPS_SCALE: i128 = 10_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (fils for AED).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for credit notes
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use fta_qr_core::money::Money;
    ///
    /// let price = Money::from_minor(1099); // AED 10.99
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit carries the sign:
    /// `from_major_minor(-5, 50)` is -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * MINOR_PER_MAJOR - minor)
        } else {
            Money(major * MINOR_PER_MAJOR + minor)
        }
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Formats with exactly two decimals and no currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use fta_qr_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(10500).to_decimal_string(), "105.00");
    /// assert_eq!(Money::from_minor(-550).to_decimal_string(), "-5.50");
    /// assert_eq!(Money::from_minor(7).to_decimal_string(), "0.07");
    /// ```
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let scale = MINOR_PER_MAJOR as u64;
        format!("{}{}.{:02}", sign, abs / scale, abs % scale)
    }

    /// Parses a decimal string such as `"105"`, `"105.5"` or `"-5.50"`.
    ///
    /// ## Rules
    /// - Optional leading `-`
    /// - At least one integer digit
    /// - At most two decimal places
    pub fn parse_decimal(input: &str) -> QrResult<Money> {
        let invalid = |reason: &str| QrError::InvalidAmount {
            value: input.to_string(),
            reason: reason.to_string(),
        };

        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (digits, ""),
        };

        if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }
        if digits.contains('.') && frac_part.is_empty() {
            return Err(invalid("expected digits after the decimal point"));
        }
        if frac_part.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }
        if !frac_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits after the decimal point"));
        }

        let major: i64 = int_part
            .parse()
            .map_err(|_| invalid("amount is out of range"))?;
        let minor: i64 = match frac_part.len() {
            0 => 0,
            1 => frac_part.parse::<i64>().unwrap_or(0) * 10,
            _ => frac_part.parse::<i64>().unwrap_or(0),
        };

        let total = major
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(minor))
            .ok_or_else(|| invalid("amount is out of range"))?;

        Ok(Money(if negative { -total } else { total }))
    }
}

/// Display uses the same text that goes on the wire.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

// =============================================================================
// VAT
// =============================================================================

/// Extracts the VAT contained in a VAT-inclusive total.
///
/// ## Formula
/// ```text
/// vat = total × rate / (10000 + rate)      (rate in basis points)
/// ```
///
/// Rounded half-to-even so that splitting many receipts does not drift.
///
/// ## Example
/// ```rust
/// use fta_qr_core::money::{vat_from_inclusive, Money};
///
/// // AED 105.00 at 5% contains AED 5.00 VAT
/// let vat = vat_from_inclusive(Money::from_minor(10500), 500);
/// assert_eq!(vat.minor(), 500);
/// ```
pub fn vat_from_inclusive(total: Money, rate_bps: u32) -> Money {
    let numerator = total.0 as i128 * rate_bps as i128;
    let denominator = BPS_SCALE + rate_bps as i128;
    Money(round_half_even(numerator, denominator) as i64)
}

fn round_half_even(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;
    let twice = remainder.abs() * 2;

    let away = match twice.cmp(&denominator) {
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Equal => quotient % 2 != 0,
    };

    if !away {
        quotient
    } else if numerator < 0 {
        quotient - 1
    } else {
        quotient + 1
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).minor(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).minor(), -550);
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_minor(10500).to_decimal_string(), "105.00");
        assert_eq!(Money::from_minor(500).to_decimal_string(), "5.00");
        assert_eq!(Money::from_minor(-550).to_decimal_string(), "-5.50");
        assert_eq!(Money::zero().to_decimal_string(), "0.00");
        assert_eq!(format!("{}", Money::from_minor(1)), "0.01");
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(Money::parse_decimal("105.00").unwrap().minor(), 10500);
        assert_eq!(Money::parse_decimal("105").unwrap().minor(), 10500);
        assert_eq!(Money::parse_decimal("105.5").unwrap().minor(), 10550);
        assert_eq!(Money::parse_decimal("-5.50").unwrap().minor(), -550);
        assert_eq!(Money::parse_decimal("0.07").unwrap().minor(), 7);
    }

    #[test]
    fn test_parse_decimal_rejects_bad_input() {
        for bad in ["", "-", ".50", "5.", "5.001", "1,000.00", "abc", "5.5x", "+5"] {
            assert!(Money::parse_decimal(bad).is_err(), "accepted {:?}", bad);
        }
        assert!(Money::parse_decimal("99999999999999999999").is_err());
    }

    #[test]
    fn test_arithmetic() {
        let mut a = Money::from_minor(1000);
        let b = Money::from_minor(500);
        assert_eq!((a + b).minor(), 1500);
        assert_eq!((a - b).minor(), 500);
        a += b;
        a -= Money::from_minor(100);
        assert_eq!(a.minor(), 1400);
    }

    #[test]
    fn test_vat_from_inclusive() {
        assert_eq!(vat_from_inclusive(Money::from_minor(10500), 500).minor(), 500);
        assert_eq!(vat_from_inclusive(Money::from_minor(0), 500).minor(), 0);
        // 10.00 * 500 / 10500 = 0.47619 -> 48 fils
        assert_eq!(vat_from_inclusive(Money::from_minor(1000), 500).minor(), 48);
        // credit note
        assert_eq!(vat_from_inclusive(Money::from_minor(-10500), 500).minor(), -500);
    }

    #[test]
    fn test_round_half_even() {
        assert_eq!(round_half_even(5, 10), 0);
        assert_eq!(round_half_even(15, 10), 2);
        assert_eq!(round_half_even(25, 10), 2);
        assert_eq!(round_half_even(35, 10), 4);
        assert_eq!(round_half_even(-25, 10), -2);
        assert_eq!(round_half_even(-26, 10), -3);
    }
}
