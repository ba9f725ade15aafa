use crate::de::{primitive_bytes, FromAsn1};
use crate::node::Node;
use crate::{Asn1DerError, Result};
use vellum_asn1::restricted_string::{
    BmpString, GeneralString, GraphicString, Ia5String, NumericString, PrintableString,
    TeletexString, UniversalString, VisibleString,
};
use vellum_asn1::tag::Tag;
use vellum_asn1::Asn1Type;

/// UTF8String into native text.
impl<'a> FromAsn1<'a> for String {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Self::from_asn1_tagged(node, Tag::UTF8_STRING)
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        let data = primitive_bytes(&node, tag)?;
        String::from_utf8(data.to_vec())
            .map_err(|_| Asn1DerError::InvalidStringRepresentation("content is not valid UTF-8"))
    }
}

macro_rules! restricted_from_asn1 {
    ($($ty:ty),+) => {$(
        impl<'a> FromAsn1<'a> for $ty {
            fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
                Self::from_asn1_tagged(node, <$ty>::TAG)
            }

            fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
                let data = primitive_bytes(&node, tag)?;
                Ok(<$ty>::new(data)?)
            }
        }
    )+};
}

restricted_from_asn1!(
    PrintableString,
    NumericString,
    Ia5String,
    VisibleString,
    TeletexString,
    GeneralString,
    GraphicString,
    UniversalString,
    BmpString
);
