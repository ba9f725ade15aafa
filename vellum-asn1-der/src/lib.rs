//! DER and BER encoding core.
//!
//! Decoding builds an in-memory tree of [`Node`]s borrowing from the
//! input buffer ([`parse_der`] / [`parse_ber`]), hardened against
//! hostile inputs by a nesting-depth ceiling and a total node count
//! ceiling. Typed values are then read off the tree with the codecs in
//! [`de`]. Encoding goes through the streaming [`Serializer`], which
//! emits canonical DER (minimal lengths, sorted SET OF). The [`pem`]
//! module wraps DER payloads in the textual PEM envelope.
//!
//! ```
//! use vellum_asn1_der::{parse_der, de, ser::{Serializer, ToAsn1}};
//!
//! let mut ser = Serializer::new();
//! 42i32.to_asn1(&mut ser).unwrap();
//! let der = ser.finish();
//! assert_eq!(der, [0x02, 0x01, 0x2A]);
//!
//! let tree = parse_der(&der).unwrap();
//! let value: i32 = de::FromAsn1::from_asn1(tree.root()).unwrap();
//! assert_eq!(value, 42);
//! ```

#[macro_use]
mod debug_log;

pub mod de;
mod misc;
mod node;
pub mod pem;
mod raw;
mod reader;
pub mod ser;

pub use node::{parse_ber, parse_der, Asn1, Content, Node, Nodes};
pub use pem::{parse_pem, parse_pem_multiple, Pem};
pub use raw::RawDer;
pub use reader::{EncodingRules, MAX_NESTING_DEPTH, MAX_NODE_COUNT};
pub use ser::Serializer;

use vellum_asn1::bit_string::BitStringError;
use vellum_asn1::date::DateError;
use vellum_asn1::oid::OidError;
use vellum_asn1::restricted_string::CharSetError;
use vellum_asn1::tag::Tag;

pub type Result<T> = std::result::Result<T, Asn1DerError>;

/// Every failure the encoding core can report.
///
/// All errors are recoverable at the call boundary; none of them
/// escapes the parse or serialize call that produced it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Asn1DerError {
    /// The identifier byte sequence is malformed (long-form violation,
    /// overflow, leading zero).
    #[error("invalid field identifier: {0}")]
    InvalidFieldIdentifier(&'static str),
    /// A decoder expected a different identifier; carries the observed
    /// one.
    #[error("unexpected field type: {0}")]
    UnexpectedFieldType(Tag),
    /// A structural rule was violated.
    #[error("invalid object: {0}")]
    InvalidObject(&'static str),
    /// INTEGER content violates the canonical form or does not fit.
    #[error("invalid integer encoding: {0}")]
    InvalidIntegerEncoding(&'static str),
    /// The input ended before a TLV completed.
    #[error("truncated field")]
    TruncatedField,
    /// A length form is not acceptable under the active rules, or not
    /// representable on this platform.
    #[error("unsupported field length: {0}")]
    UnsupportedFieldLength(&'static str),
    /// The PEM envelope is malformed.
    #[error("invalid PEM document: {0}")]
    InvalidPemDocument(&'static str),
    /// Restricted-string alphabet violation or malformed OID string.
    #[error("invalid string representation: {0}")]
    InvalidStringRepresentation(&'static str),
    /// An OID with fewer than two components.
    #[error("too few OID components")]
    TooFewOidComponents,
}

impl From<CharSetError> for Asn1DerError {
    fn from(_: CharSetError) -> Self {
        Asn1DerError::InvalidStringRepresentation("invalid character set")
    }
}

impl From<OidError> for Asn1DerError {
    fn from(e: OidError) -> Self {
        match e {
            OidError::TooFewComponents => Asn1DerError::TooFewOidComponents,
            OidError::InvalidComponent => {
                Asn1DerError::InvalidStringRepresentation("OID component is not a decimal number")
            }
            OidError::ComponentOverflow => {
                Asn1DerError::InvalidStringRepresentation("OID component exceeds the supported range")
            }
            OidError::FirstComponentOutOfRange => {
                Asn1DerError::InvalidStringRepresentation("first OID component must be 0, 1 or 2")
            }
            OidError::SecondComponentOutOfRange => Asn1DerError::InvalidStringRepresentation(
                "second OID component must be below 40 when the first is 0 or 1",
            ),
        }
    }
}

impl From<DateError> for Asn1DerError {
    fn from(e: DateError) -> Self {
        Asn1DerError::InvalidObject(match e {
            DateError::YearOutOfRange => "time year is out of range",
            DateError::MonthOutOfRange => "time month is out of range",
            DateError::DayOutOfRange => "time day is out of range for its month",
            DateError::HoursOutOfRange => "time hours are out of range",
            DateError::MinutesOutOfRange => "time minutes are out of range",
            DateError::SecondsOutOfRange => "time seconds are out of range",
            DateError::InvalidFraction => "malformed fractional seconds",
        })
    }
}

impl From<BitStringError> for Asn1DerError {
    fn from(e: BitStringError) -> Self {
        Asn1DerError::InvalidObject(match e {
            BitStringError::UnusedBitsOutOfRange(_) => "BIT STRING unused bit count is out of range",
            BitStringError::PaddingNotZero => "BIT STRING padding bits are not zero",
            BitStringError::EmptyWithUnusedBits => "empty BIT STRING cannot have unused bits",
        })
    }
}
