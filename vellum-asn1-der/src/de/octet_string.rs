use crate::de::{expect_tag, FromAsn1};
use crate::node::{Content, Node};
use crate::reader::EncodingRules;
use crate::{Asn1DerError, Result};
use vellum_asn1::tag::Tag;

/// OCTET STRING. Under BER a constructed encoding is accepted and the
/// segments (themselves OCTET STRINGs, possibly nested) are
/// concatenated; DER admits the primitive form only.
impl<'a> FromAsn1<'a> for Vec<u8> {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Self::from_asn1_tagged(node, Tag::OCTET_STRING)
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        let mut out = Vec::new();
        collect_segments(node, tag, &mut out)?;
        Ok(out)
    }
}

fn collect_segments(node: Node<'_, '_>, tag: Tag, out: &mut Vec<u8>) -> Result<()> {
    expect_tag(&node, tag)?;
    match node.content() {
        Content::Primitive(data) => {
            out.extend_from_slice(data);
            Ok(())
        }
        Content::Constructed(children) => {
            if node.rules() == EncodingRules::Der {
                return Err(Asn1DerError::InvalidObject(
                    "constructed OCTET STRING is not permitted in DER",
                ));
            }
            for child in children {
                collect_segments(child, Tag::OCTET_STRING, out)?;
            }
            Ok(())
        }
    }
}
