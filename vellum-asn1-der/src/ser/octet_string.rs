use crate::ser::{Serializer, ToAsn1};
use crate::Result;
use vellum_asn1::tag::Tag;

impl ToAsn1 for Vec<u8> {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.as_slice().to_asn1(ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        self.as_slice().to_asn1_tagged(tag, ser)
    }
}

impl ToAsn1 for &[u8] {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(Tag::OCTET_STRING, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        ser.write_primitive(tag, |buf| {
            buf.extend_from_slice(self);
            Ok(())
        })
    }
}
