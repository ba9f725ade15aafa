use crate::de::validate_integer_content;
use crate::ser::{Serializer, ToAsn1};
use crate::Result;
use vellum_asn1::integer::{IntegerBytes, IntegerRepr};
use vellum_asn1::tag::Tag;

/// Writes an INTEGER under its natural tag.
pub fn write_integer<I: IntegerRepr>(value: &I, ser: &mut Serializer) -> Result<()> {
    write_integer_tagged(value, Tag::INTEGER, ser)
}

/// Writes an INTEGER under an implicit `tag`. The representation's
/// bytes are re-checked against the canonical form so that a
/// hand-built [`IntegerBytes`] cannot smuggle a redundant leading
/// byte onto the wire.
pub fn write_integer_tagged<I: IntegerRepr>(
    value: &I,
    tag: Tag,
    ser: &mut Serializer,
) -> Result<()> {
    value.with_signed_be_bytes(|bytes| {
        let bytes = validate_integer_content(bytes)?;
        ser.write_primitive(tag, |buf| {
            buf.extend_from_slice(bytes);
            Ok(())
        })
    })
}

/// Writes an ENUMERATED; the content rules are INTEGER's.
pub fn write_enumerated<I: IntegerRepr>(value: &I, ser: &mut Serializer) -> Result<()> {
    write_integer_tagged(value, Tag::ENUMERATED, ser)
}

pub fn write_enumerated_tagged<I: IntegerRepr>(
    value: &I,
    tag: Tag,
    ser: &mut Serializer,
) -> Result<()> {
    write_integer_tagged(value, tag, ser)
}

macro_rules! integer_to_asn1 {
    ($($ty:ty),+) => {$(
        impl ToAsn1 for $ty {
            fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
                write_integer(self, ser)
            }

            fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
                write_integer_tagged(self, tag, ser)
            }
        }
    )+};
}

integer_to_asn1!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, IntegerBytes);
