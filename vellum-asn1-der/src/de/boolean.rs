use crate::de::{primitive_bytes, FromAsn1};
use crate::node::Node;
use crate::{Asn1DerError, Result};
use vellum_asn1::tag::Tag;

impl<'a> FromAsn1<'a> for bool {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Self::from_asn1_tagged(node, Tag::BOOLEAN)
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        let data = primitive_bytes(&node, tag)?;
        if data.len() != 1 {
            return Err(Asn1DerError::InvalidObject(
                "BOOLEAN content must be exactly one byte",
            ));
        }
        match data[0] {
            0x00 => Ok(false),
            0xFF => Ok(true),
            _ => Err(Asn1DerError::InvalidObject(
                "BOOLEAN must be encoded as 0x00 or 0xFF",
            )),
        }
    }
}
