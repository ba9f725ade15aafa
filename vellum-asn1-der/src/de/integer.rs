use crate::de::{primitive_bytes, FromAsn1};
use crate::node::Node;
use crate::{Asn1DerError, Result};
use vellum_asn1::integer::{IntegerBytes, IntegerRepr};
use vellum_asn1::tag::Tag;

/// Validates the canonical two's-complement form: non-empty, no
/// redundant leading `0x00` or `0xFF` byte.
pub(crate) fn validate_integer_content(data: &[u8]) -> Result<&[u8]> {
    if data.is_empty() {
        return Err(Asn1DerError::InvalidIntegerEncoding("INTEGER content is empty"));
    }
    if data.len() > 1 {
        if data[0] == 0x00 && data[1] & 0x80 == 0 {
            return Err(Asn1DerError::InvalidIntegerEncoding(
                "redundant leading zero byte",
            ));
        }
        if data[0] == 0xFF && data[1] & 0x80 != 0 {
            return Err(Asn1DerError::InvalidIntegerEncoding(
                "redundant leading ones byte",
            ));
        }
    }
    Ok(data)
}

/// Reads an INTEGER into any [`IntegerRepr`] under its natural tag.
pub fn read_integer<'a, I: IntegerRepr>(node: Node<'_, 'a>) -> Result<I> {
    read_integer_tagged(node, Tag::INTEGER)
}

/// Reads an INTEGER carried under an implicit `tag`.
pub fn read_integer_tagged<'a, I: IntegerRepr>(node: Node<'_, 'a>, tag: Tag) -> Result<I> {
    let data = validate_integer_content(primitive_bytes(&node, tag)?)?;
    I::from_signed_be_bytes(data).ok_or(Asn1DerError::InvalidIntegerEncoding(
        "magnitude does not fit the target integer",
    ))
}

/// Reads an ENUMERATED; the content rules are INTEGER's.
pub fn read_enumerated<'a, I: IntegerRepr>(node: Node<'_, 'a>) -> Result<I> {
    read_enumerated_tagged(node, Tag::ENUMERATED)
}

pub fn read_enumerated_tagged<'a, I: IntegerRepr>(node: Node<'_, 'a>, tag: Tag) -> Result<I> {
    read_integer_tagged(node, tag)
}

macro_rules! integer_from_asn1 {
    ($($ty:ty),+) => {$(
        impl<'a> FromAsn1<'a> for $ty {
            fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
                read_integer(node)
            }

            fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
                read_integer_tagged(node, tag)
            }
        }
    )+};
}

integer_from_asn1!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128, IntegerBytes);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_der;

    #[test]
    fn boundary_values() {
        let asn1 = parse_der(&[0x02, 0x02, 0x00, 0x80]).unwrap();
        assert_eq!(i32::from_asn1(asn1.root()).unwrap(), 128);

        let asn1 = parse_der(&[0x02, 0x01, 0x80]).unwrap();
        assert_eq!(i32::from_asn1(asn1.root()).unwrap(), -128);

        let asn1 = parse_der(&[0x02, 0x01, 0x00]).unwrap();
        assert_eq!(u64::from_asn1(asn1.root()).unwrap(), 0);
    }

    #[test]
    fn redundant_leading_bytes_rejected() {
        let asn1 = parse_der(&[0x02, 0x02, 0x00, 0x01]).unwrap();
        assert_eq!(
            i32::from_asn1(asn1.root()).unwrap_err(),
            Asn1DerError::InvalidIntegerEncoding("redundant leading zero byte")
        );

        let asn1 = parse_der(&[0x02, 0x02, 0xFF, 0x80]).unwrap();
        assert_eq!(
            i32::from_asn1(asn1.root()).unwrap_err(),
            Asn1DerError::InvalidIntegerEncoding("redundant leading ones byte")
        );
    }

    #[test]
    fn empty_content_rejected() {
        let asn1 = parse_der(&[0x02, 0x00]).unwrap();
        assert_eq!(
            i32::from_asn1(asn1.root()).unwrap_err(),
            Asn1DerError::InvalidIntegerEncoding("INTEGER content is empty")
        );
    }

    #[test]
    fn width_overflow_rejected() {
        let asn1 = parse_der(&[0x02, 0x02, 0x01, 0x00]).unwrap();
        assert!(i8::from_asn1(asn1.root()).is_err());
        assert_eq!(i16::from_asn1(asn1.root()).unwrap(), 256);
    }

    #[test]
    fn unsigned_rejects_negative() {
        let asn1 = parse_der(&[0x02, 0x01, 0xFF]).unwrap();
        assert!(u32::from_asn1(asn1.root()).is_err());
        assert_eq!(i32::from_asn1(asn1.root()).unwrap(), -1);
    }

    #[test]
    fn raw_bytes_capture() {
        let asn1 = parse_der(&[0x02, 0x03, 0x01, 0x00, 0x01]).unwrap();
        let raw = IntegerBytes::from_asn1(asn1.root()).unwrap();
        assert_eq!(raw.as_bytes(), &[0x01, 0x00, 0x01]);
        assert!(!raw.is_negative());
    }

    #[test]
    fn enumerated_shares_integer_rules() {
        let asn1 = parse_der(&[0x0A, 0x01, 0x02]).unwrap();
        assert_eq!(read_enumerated::<u32>(asn1.root()).unwrap(), 2);

        let asn1 = parse_der(&[0x0A, 0x02, 0x00, 0x01]).unwrap();
        assert!(read_enumerated::<u32>(asn1.root()).is_err());
    }
}
