use crate::de::{primitive_bytes, FromAsn1};
use crate::node::Node;
use crate::{Asn1DerError, Result};
use vellum_asn1::date::{GeneralizedTime, UtcTime};
use vellum_asn1::tag::Tag;
use vellum_asn1::Asn1Type;

fn two_digits(content: &[u8], at: usize) -> Result<u8> {
    let pair = content
        .get(at..at + 2)
        .ok_or(Asn1DerError::InvalidObject("time content is too short"))?;
    if !pair.iter().all(u8::is_ascii_digit) {
        return Err(Asn1DerError::InvalidObject("time field is not decimal"));
    }
    Ok((pair[0] - b'0') * 10 + (pair[1] - b'0'))
}

fn four_digits(content: &[u8], at: usize) -> Result<u16> {
    Ok(u16::from(two_digits(content, at)?) * 100 + u16::from(two_digits(content, at + 2)?))
}

/// `YYMMDDHHMMSSZ`, years below 50 mapping into the 2000s.
impl<'a> FromAsn1<'a> for UtcTime {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Self::from_asn1_tagged(node, UtcTime::TAG)
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        let content = primitive_bytes(&node, tag)?;
        if content.len() != 13 || content[12] != b'Z' {
            return Err(Asn1DerError::InvalidObject(
                "UTCTime must be of the form YYMMDDHHMMSSZ",
            ));
        }
        let yy = u16::from(two_digits(content, 0)?);
        let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
        Ok(UtcTime::new(
            year,
            two_digits(content, 2)?,
            two_digits(content, 4)?,
            two_digits(content, 6)?,
            two_digits(content, 8)?,
            two_digits(content, 10)?,
        )?)
    }
}

/// `YYYYMMDDHHMMSS[.fraction]Z`; the fraction may not carry trailing
/// zeros and only the dot separator is admitted.
impl<'a> FromAsn1<'a> for GeneralizedTime {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        Self::from_asn1_tagged(node, GeneralizedTime::TAG)
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        let content = primitive_bytes(&node, tag)?;
        let time = GeneralizedTime::new(
            four_digits(content, 0)?,
            two_digits(content, 4)?,
            two_digits(content, 6)?,
            two_digits(content, 8)?,
            two_digits(content, 10)?,
            two_digits(content, 12)?,
        )?;
        match content.get(14) {
            Some(b'Z') if content.len() == 15 => Ok(time),
            Some(b'.') => {
                let rest = &content[15..];
                let (&last, fraction) = rest
                    .split_last()
                    .ok_or(Asn1DerError::InvalidObject("time content is too short"))?;
                if last != b'Z' {
                    return Err(Asn1DerError::InvalidObject(
                        "GeneralizedTime must end with Z",
                    ));
                }
                Ok(time.with_fraction(fraction)?)
            }
            _ => Err(Asn1DerError::InvalidObject(
                "GeneralizedTime must be of the form YYYYMMDDHHMMSS[.f]Z",
            )),
        }
    }
}
