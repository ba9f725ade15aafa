use crate::ser::{Serializer, ToAsn1};
use crate::Result;
use vellum_asn1::restricted_string::{
    BmpString, GeneralString, GraphicString, Ia5String, NumericString, PrintableString,
    TeletexString, UniversalString, VisibleString,
};
use vellum_asn1::tag::Tag;
use vellum_asn1::Asn1Type;

impl ToAsn1 for str {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(Tag::UTF8_STRING, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        ser.write_primitive(tag, |buf| {
            buf.extend_from_slice(self.as_bytes());
            Ok(())
        })
    }
}

impl ToAsn1 for String {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.as_str().to_asn1(ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        self.as_str().to_asn1_tagged(tag, ser)
    }
}

macro_rules! restricted_to_asn1 {
    ($($ty:ty),+) => {$(
        impl ToAsn1 for $ty {
            fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
                self.to_asn1_tagged(<$ty>::TAG, ser)
            }

            fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
                ser.write_primitive(tag, |buf| {
                    buf.extend_from_slice(self.as_bytes());
                    Ok(())
                })
            }
        }
    )+};
}

restricted_to_asn1!(
    PrintableString,
    NumericString,
    Ia5String,
    VisibleString,
    TeletexString,
    GeneralString,
    GraphicString,
    UniversalString,
    BmpString
);
