//! # fta-qr-core: UAE FTA e-Invoice QR Codec
//!
//! This crate encodes and decodes the Tag-Length-Value payload printed as a
//! QR code on UAE tax invoices. It is pure: no I/O, no async, no globals.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FTA QR Data Flow                                 │
//! │                                                                         │
//! │  Invoice print path                     Scanning app                    │
//! │        │                                      │                         │
//! │        ▼                                      ▼                         │
//! │  ┌─────────────┐                    ┌──────────────────────┐           │
//! │  │  encode()   │                    │  decoder-service     │           │
//! │  │             │                    │  POST /decode-fta-qr │           │
//! │  └──────┬──────┘                    └──────────┬───────────┘           │
//! │         │                                      │                        │
//! │  ┌──────▼──────────────────────────────────────▼───────────────────┐   │
//! │  │               ★ fta-qr-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   tags    │  │    tlv    │  │  encoder  │  │  decoder  │  │   │
//! │  │   │ registry  │  │  framing  │  │  Base64   │  │  Base64   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │  invoice  │  │   money   │  │ validation│                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Base64 string ──► QR image renderer (caller) ──► printed receipt      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`tags`] - Tag numbers and wire names
//! - [`tlv`] - `[tag][len][value]` read/write primitives
//! - [`invoice`] - The typed encoder input
//! - [`encoder`] - Invoice → Base64
//! - [`decoder`] - Base64 → labelled fields
//! - [`money`] - Integer amounts and their decimal text
//! - [`validation`] - Field checks
//! - [`error`] - Codec error types
//!
//! ## Example Usage
//!
//! ```rust
//! use fta_qr_core::{decode, encode, QrInvoice};
//!
//! let invoice = QrInvoice::new(
//!     "ACME LLC",
//!     "100123456700003",
//!     "2024-01-15T10:30:00.000Z",
//!     "105.00",
//!     "5.00",
//! );
//!
//! let payload = encode(&invoice).unwrap();
//! let names: Vec<String> = decode(&payload)
//!     .unwrap()
//!     .into_iter()
//!     .map(|f| f.name)
//!     .collect();
//!
//! assert_eq!(
//!     names,
//!     ["sellerName", "trn", "timestamp", "totalWithVat", "vatAmount"]
//! );
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod invoice;
pub mod money;
pub mod tags;
pub mod tlv;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use decoder::{decode, decode_bytes, decode_invoice, DecodedField};
pub use encoder::{encode, encode_fields, encode_to_bytes};
pub use error::{QrError, QrResult, ValidationError};
pub use invoice::QrInvoice;
pub use money::Money;
pub use tags::FieldTag;
pub use tlv::{TlvField, MAX_VALUE_LEN};
