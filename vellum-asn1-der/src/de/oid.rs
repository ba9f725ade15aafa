use crate::de::{primitive_bytes, FromAsn1};
use crate::node::Node;
use crate::{Asn1DerError, Result};
use vellum_asn1::oid::{self, ObjectIdentifier};
use vellum_asn1::tag::Tag;
use vellum_asn1::Asn1Type;

impl<'a> FromAsn1<'a> for ObjectIdentifier {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Self::from_asn1_tagged(node, ObjectIdentifier::TAG)
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        let data = primitive_bytes(&node, tag)?;
        let mut sub_identifiers = SubIdentifiers { bytes: data };
        // The first sub-identifier folds the leading two components.
        // Decoders tolerate a single-arc OID such as {0} by reading it
        // as (0, 0); an OID with no sub-identifiers at all is refused.
        let first = sub_identifiers
            .next()
            .ok_or(Asn1DerError::TooFewOidComponents)??;
        let mut components = Vec::new();
        match first {
            x if x < 40 => {
                components.push(0);
                components.push(x);
            }
            x if x < 80 => {
                components.push(1);
                components.push(x - 40);
            }
            x => {
                components.push(2);
                components.push(x - 80);
            }
        }
        for sub in sub_identifiers {
            components.push(sub?);
        }
        Ok(oid::from_wire_components(components))
    }
}

struct SubIdentifiers<'a> {
    bytes: &'a [u8],
}

impl Iterator for SubIdentifiers<'_> {
    type Item = Result<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.bytes.is_empty() {
            return None;
        }
        let mut value: u64 = 0;
        loop {
            let Some((&byte, rest)) = self.bytes.split_first() else {
                return Some(Err(Asn1DerError::InvalidObject(
                    "truncated OID sub-identifier",
                )));
            };
            self.bytes = rest;
            if value > u64::MAX >> 7 {
                return Some(Err(Asn1DerError::InvalidObject(
                    "OID sub-identifier is too large",
                )));
            }
            value = value << 7 | u64::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                return Some(Ok(value));
            }
        }
    }
}
