//! Verbatim pass-through of pre-encoded nodes.

use crate::de::FromAsn1;
use crate::node::Node;
use crate::ser::{Serializer, ToAsn1};
use crate::{Asn1DerError, Result};
use vellum_asn1::tag::Tag;

/// An owned, already-encoded node.
///
/// Parsing captures the node's entire encoding, whatever its tag;
/// serializing re-emits it byte for byte. This is the escape hatch for
/// round-tripping values the schema does not (or must not) normalize,
/// such as signed substructures.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RawDer(pub Vec<u8>);

impl RawDer {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl<'a> FromAsn1<'a> for RawDer {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Ok(RawDer(node.encoded_bytes().to_vec()))
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        crate::de::expect_tag(&node, tag)?;
        Self::from_asn1(node)
    }
}

impl ToAsn1 for RawDer {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        ser.write_raw(&self.0);
        Ok(())
    }

    fn to_asn1_tagged(&self, _tag: Tag, _ser: &mut Serializer) -> Result<()> {
        Err(Asn1DerError::InvalidObject(
            "a raw DER value carries its own identifier and cannot be retagged",
        ))
    }
}
