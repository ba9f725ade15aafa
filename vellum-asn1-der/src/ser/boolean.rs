use crate::ser::{Serializer, ToAsn1};
use crate::Result;
use vellum_asn1::tag::Tag;

impl ToAsn1 for bool {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(Tag::BOOLEAN, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        let value = *self;
        ser.write_primitive(tag, |buf| {
            buf.push(if value { 0xFF } else { 0x00 });
            Ok(())
        })
    }
}
