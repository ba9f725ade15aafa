//! ASN.1 value model shared by the vellum encoding crates.
//!
//! This crate defines the abstract values an ASN.1 document is made of:
//! the tag algebra, the polymorphic INTEGER capability, BIT STRINGs,
//! OBJECT IDENTIFIERs, the restricted string family and the two time
//! types. None of these types know about the wire; encoding and
//! decoding under DER and BER live in `vellum-asn1-der`.

pub mod bit_string;
pub mod date;
pub mod integer;
pub mod oid;
pub mod restricted_string;
pub mod tag;

pub use bit_string::{BitString, BitStringError};
pub use date::{DateError, GeneralizedTime, UtcTime};
pub use integer::{IntegerBytes, IntegerRepr};
pub use oid::{ObjectIdentifier, OidError};
pub use restricted_string::{
    BmpString, CharSetError, GeneralString, GraphicString, Ia5String, NumericString,
    PrintableString, TeletexString, UniversalString, VisibleString,
};
pub use tag::{Tag, TagClass};

/// Associates a type with its natural ASN.1 tag.
pub trait Asn1Type {
    const TAG: Tag;
    const NAME: &'static str;
}
