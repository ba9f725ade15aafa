use crate::de::{primitive_bytes, FromAsn1};
use crate::node::Node;
use crate::{Asn1DerError, Result};
use vellum_asn1::bit_string::BitString;
use vellum_asn1::tag::Tag;
use vellum_asn1::Asn1Type;

impl<'a> FromAsn1<'a> for BitString {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Self::from_asn1_tagged(node, BitString::TAG)
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        let data = primitive_bytes(&node, tag)?;
        let (&unused_bits, bits) = data.split_first().ok_or(Asn1DerError::InvalidObject(
            "BIT STRING content is empty",
        ))?;
        Ok(BitString::with_unused_bits(bits, unused_bits)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_der;

    #[test]
    fn single_set_bit() {
        let asn1 = parse_der(&[0x03, 0x02, 0x07, 0x80]).unwrap();
        let bs = BitString::from_asn1(asn1.root()).unwrap();
        assert_eq!(bs.bit_len(), 1);
        assert_eq!(bs.bit(0), Some(true));
        assert_eq!(bs.unused_bits(), 7);
    }

    #[test]
    fn nonzero_padding_rejected() {
        let asn1 = parse_der(&[0x03, 0x02, 0x07, 0xFF]).unwrap();
        assert_eq!(
            BitString::from_asn1(asn1.root()).unwrap_err(),
            Asn1DerError::InvalidObject("BIT STRING padding bits are not zero")
        );
    }

    #[test]
    fn empty_content_rejected() {
        let asn1 = parse_der(&[0x03, 0x00]).unwrap();
        assert_eq!(
            BitString::from_asn1(asn1.root()).unwrap_err(),
            Asn1DerError::InvalidObject("BIT STRING content is empty")
        );
    }

    #[test]
    fn zero_length_bit_string() {
        let asn1 = parse_der(&[0x03, 0x01, 0x00]).unwrap();
        let bs = BitString::from_asn1(asn1.root()).unwrap();
        assert_eq!(bs.bit_len(), 0);

        // no data bytes but a nonzero unused count
        let asn1 = parse_der(&[0x03, 0x01, 0x04]).unwrap();
        assert!(BitString::from_asn1(asn1.root()).is_err());
    }

    #[test]
    fn unused_count_over_seven_rejected() {
        let asn1 = parse_der(&[0x03, 0x02, 0x08, 0x00]).unwrap();
        assert_eq!(
            BitString::from_asn1(asn1.root()).unwrap_err(),
            Asn1DerError::InvalidObject("BIT STRING unused bit count is out of range")
        );
    }
}
