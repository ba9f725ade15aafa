use crate::ser::{Serializer, ToAsn1};
use crate::{Asn1DerError, Result};
use vellum_asn1::oid::ObjectIdentifier;
use vellum_asn1::tag::Tag;
use vellum_asn1::Asn1Type;

impl ToAsn1 for ObjectIdentifier {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(ObjectIdentifier::TAG, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        let components = self.components();
        let first = components[0]
            .checked_mul(40)
            .and_then(|folded| folded.checked_add(components[1]))
            .ok_or(Asn1DerError::InvalidObject(
                "leading OID components overflow their folded sub-identifier",
            ))?;
        ser.write_primitive(tag, |buf| {
            write_sub_identifier(buf, first);
            for &arc in &components[2..] {
                write_sub_identifier(buf, arc);
            }
            Ok(())
        })
    }
}

fn write_sub_identifier(buf: &mut Vec<u8>, value: u64) {
    let digits = ((64 - value.leading_zeros() as usize).max(1)).div_ceil(7);
    for digit in (0..digits).rev() {
        let byte = (value >> (digit * 7)) as u8 & 0x7F;
        buf.push(if digit == 0 { byte } else { byte | 0x80 });
    }
}
