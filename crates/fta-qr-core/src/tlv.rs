//! # TLV Framing
//!
//! Byte-level primitives shared by the encoder and decoder.
//!
//! ## Wire Format
//! ```text
//! ┌──────────┬──────────┬───────────────────────────────┐
//! │ TAG (1B) │ LEN (1B) │ VALUE (LEN bytes, UTF-8)      │
//! └──────────┴──────────┴───────────────────────────────┘
//!
//! Payload := Field*   (concatenated, no separators, no trailer)
//! ```
//!
//! LEN is the UTF-8 **byte** length, so a value can hold at most 255 bytes.
//! "شركة" is 4 characters but 8 bytes.

use crate::error::{QrError, QrResult};
use crate::tags::tag_name;

/// Tag byte + length byte.
pub const TLV_HEADER_LEN: usize = 2;

/// Largest value a single length byte can describe.
pub const MAX_VALUE_LEN: usize = u8::MAX as usize;

/// One tag/value pair. The length is always derived from `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlvField {
    pub tag: u8,
    pub value: String,
}

impl TlvField {
    pub fn new(tag: u8, value: impl Into<String>) -> Self {
        TlvField {
            tag,
            value: value.into(),
        }
    }

    /// Number of bytes this field occupies on the wire.
    #[inline]
    pub fn encoded_len(&self) -> usize {
        TLV_HEADER_LEN + self.value.len()
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Appends `[tag][len][value]` to `buf`.
///
/// Fails with [`QrError::FieldTooLong`] when the value exceeds
/// [`MAX_VALUE_LEN`] bytes. `buf` is left untouched on failure.
pub fn write_field(buf: &mut Vec<u8>, tag: u8, value: &str) -> QrResult<()> {
    let bytes = value.as_bytes();
    let len = u8::try_from(bytes.len()).map_err(|_| QrError::FieldTooLong {
        field: tag_name(tag).into_owned(),
        tag,
        len: bytes.len(),
        max: MAX_VALUE_LEN,
    })?;

    buf.reserve(TLV_HEADER_LEN + bytes.len());
    buf.push(tag);
    buf.push(len);
    buf.extend_from_slice(bytes);
    Ok(())
}

// =============================================================================
// Reading
// =============================================================================

/// Cursor over a TLV byte stream.
///
/// Yields one field per step until the buffer is exhausted. The first
/// structural error is yielded once, after which the reader is fused.
///
/// ## Example
/// ```rust
/// use fta_qr_core::tlv::TlvReader;
///
/// let bytes = [1, 3, b'A', b'C', b'E', 9, 0];
/// let fields: Vec<_> = TlvReader::new(&bytes).collect::<Result<_, _>>().unwrap();
/// assert_eq!(fields[0].value, "ACE");
/// assert_eq!(fields[1].tag, 9);
/// assert_eq!(fields[1].value, "");
/// ```
#[derive(Debug, Clone)]
pub struct TlvReader<'a> {
    buf: &'a [u8],
    pos: usize,
    failed: bool,
}

impl<'a> TlvReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        TlvReader {
            buf,
            pos: 0,
            failed: false,
        }
    }

    /// Current cursor offset.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    fn read_field(&mut self) -> QrResult<TlvField> {
        let offset = self.pos;
        let tag = self.buf[offset];

        let declared = match self.buf.get(offset + 1) {
            Some(&len) => len as usize,
            None => return Err(QrError::MissingLength { tag, offset }),
        };

        let start = offset + TLV_HEADER_LEN;
        let available = self.buf.len() - start;
        if declared > available {
            return Err(QrError::Truncated {
                tag,
                offset,
                declared,
                available,
            });
        }

        let end = start + declared;
        let value = std::str::from_utf8(&self.buf[start..end])
            .map_err(|_| QrError::InvalidUtf8 { tag, offset })?;

        self.pos = end;
        Ok(TlvField::new(tag, value))
    }
}

impl<'a> Iterator for TlvReader<'a> {
    type Item = QrResult<TlvField>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.pos >= self.buf.len() {
            return None;
        }

        let result = self.read_field();
        if result.is_err() {
            self.failed = true;
        }
        Some(result)
    }
}

/// Reads every field in `bytes`, failing on the first structural error.
pub fn read_fields(bytes: &[u8]) -> QrResult<Vec<TlvField>> {
    TlvReader::new(bytes).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_field_layout() {
        let mut buf = Vec::new();
        write_field(&mut buf, 4, "105.00").unwrap();
        assert_eq!(buf, vec![4, 6, b'1', b'0', b'5', b'.', b'0', b'0']);
    }

    #[test]
    fn test_length_byte_counts_utf8_bytes() {
        let name = "شركة أكمي";
        assert_ne!(name.chars().count(), name.len());

        let mut buf = Vec::new();
        write_field(&mut buf, 1, name).unwrap();
        assert_eq!(buf[1] as usize, name.len());
        assert_eq!(&buf[2..], name.as_bytes());
    }

    #[test]
    fn test_write_field_limit() {
        let mut buf = Vec::new();
        write_field(&mut buf, 1, &"a".repeat(MAX_VALUE_LEN)).unwrap();
        assert_eq!(buf[1], 255);

        let mut buf = vec![0xAA];
        let err = write_field(&mut buf, 1, &"a".repeat(MAX_VALUE_LEN + 1)).unwrap_err();
        assert_eq!(
            err,
            QrError::FieldTooLong {
                field: "sellerName".to_string(),
                tag: 1,
                len: 256,
                max: 255,
            }
        );
        assert_eq!(buf, vec![0xAA]);
    }

    #[test]
    fn test_read_fields_in_order() {
        let mut buf = Vec::new();
        write_field(&mut buf, 2, "100123456700003").unwrap();
        write_field(&mut buf, 9, "future").unwrap();
        write_field(&mut buf, 2, "again").unwrap();

        let fields = read_fields(&buf).unwrap();
        assert_eq!(
            fields,
            vec![
                TlvField::new(2, "100123456700003"),
                TlvField::new(9, "future"),
                TlvField::new(2, "again"),
            ]
        );
    }

    #[test]
    fn test_empty_value() {
        let fields = read_fields(&[3, 0]).unwrap();
        assert_eq!(fields, vec![TlvField::new(3, "")]);
    }

    #[test]
    fn test_empty_buffer_has_no_fields() {
        assert!(read_fields(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_value_is_rejected() {
        let mut buf = Vec::new();
        write_field(&mut buf, 1, "ACME").unwrap();
        buf.extend_from_slice(&[5, 10, b'5', b'.', b'0']);

        let err = read_fields(&buf).unwrap_err();
        assert_eq!(
            err,
            QrError::Truncated {
                tag: 5,
                offset: 6,
                declared: 10,
                available: 3,
            }
        );
    }

    #[test]
    fn test_dangling_tag_byte_is_rejected() {
        let err = read_fields(&[1, 1, b'A', 2]).unwrap_err();
        assert_eq!(err, QrError::MissingLength { tag: 2, offset: 3 });
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let err = read_fields(&[1, 2, 0xC3, 0x28]).unwrap_err();
        assert_eq!(err, QrError::InvalidUtf8 { tag: 1, offset: 0 });
    }

    #[test]
    fn test_reader_is_fused_after_error() {
        let mut reader = TlvReader::new(&[1, 1, b'A', 2, 9]);
        assert!(reader.next().unwrap().is_ok());
        assert_eq!(reader.position(), 3);
        assert!(reader.next().unwrap().is_err());
        assert!(reader.next().is_none());
    }
}
