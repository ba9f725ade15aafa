use crate::ser::{Serializer, ToAsn1};
use crate::Result;
use vellum_asn1::tag::Tag;

impl ToAsn1 for () {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(Tag::NULL, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        ser.write_primitive(tag, |_| Ok(()))
    }
}
