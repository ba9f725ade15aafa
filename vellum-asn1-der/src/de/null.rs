use crate::de::{primitive_bytes, FromAsn1};
use crate::node::Node;
use crate::{Asn1DerError, Result};
use vellum_asn1::tag::Tag;

impl<'a> FromAsn1<'a> for () {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Self::from_asn1_tagged(node, Tag::NULL)
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        let data = primitive_bytes(&node, tag)?;
        if !data.is_empty() {
            return Err(Asn1DerError::InvalidObject("NULL content must be empty"));
        }
        Ok(())
    }
}
