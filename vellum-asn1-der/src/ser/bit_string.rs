use crate::ser::{Serializer, ToAsn1};
use crate::Result;
use vellum_asn1::bit_string::BitString;
use vellum_asn1::tag::Tag;
use vellum_asn1::Asn1Type;

impl ToAsn1 for BitString {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(BitString::TAG, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        ser.write_primitive(tag, |buf| {
            buf.push(self.unused_bits());
            buf.extend_from_slice(self.as_bytes());
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::de::FromAsn1;
    use crate::parse_der;

    #[test]
    fn emission_prepends_unused_count() {
        let bs = BitString::with_unused_bits(vec![0x80], 7).unwrap();
        let mut ser = Serializer::new();
        bs.to_asn1(&mut ser).unwrap();
        assert_eq!(ser.finish(), [0x03, 0x02, 0x07, 0x80]);
    }

    #[test]
    fn round_trip() {
        let bs = BitString::from_bytes(vec![0xDE, 0xAD]);
        let mut ser = Serializer::new();
        bs.to_asn1(&mut ser).unwrap();
        let der = ser.finish();
        let asn1 = parse_der(&der).unwrap();
        assert_eq!(BitString::from_asn1(asn1.root()).unwrap(), bs);
    }
}
