//! Length wire form and the SET OF byte ordering shared by the reader
//! and the serializer.

use crate::reader::EncodingRules;
use crate::{Asn1DerError, Result};
use std::cmp::Ordering;

/// A decoded length field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum LengthField {
    Definite(usize),
    Indefinite,
}

impl LengthField {
    /// Parses a length field from the front of `bytes`, returning the
    /// field and the number of bytes consumed. DER enforces the
    /// minimum-length form and rejects indefinite lengths.
    pub(crate) fn parse(bytes: &[u8], rules: EncodingRules) -> Result<(Self, usize)> {
        let first = *bytes.first().ok_or(Asn1DerError::TruncatedField)?;
        if first & 0x80 == 0 {
            return Ok((LengthField::Definite(usize::from(first)), 1));
        }
        if first == 0x80 {
            return match rules {
                EncodingRules::Der => Err(Asn1DerError::UnsupportedFieldLength(
                    "indefinite length is not permitted in DER",
                )),
                EncodingRules::Ber => Ok((LengthField::Indefinite, 1)),
            };
        }
        let count = usize::from(first & 0x7F);
        if count == 127 {
            return Err(Asn1DerError::UnsupportedFieldLength("reserved length form"));
        }
        let digits = bytes.get(1..1 + count).ok_or(Asn1DerError::TruncatedField)?;
        let significant = match digits.iter().position(|&b| b != 0) {
            Some(at) => &digits[at..],
            None => &[],
        };
        if significant.len() > std::mem::size_of::<usize>() {
            return Err(Asn1DerError::UnsupportedFieldLength(
                "length does not fit in this platform's address space",
            ));
        }
        let mut value = 0usize;
        for &byte in significant {
            value = value << 8 | usize::from(byte);
        }
        if rules == EncodingRules::Der && (digits[0] == 0 || value < 128) {
            return Err(Asn1DerError::UnsupportedFieldLength(
                "length is not minimally encoded",
            ));
        }
        Ok((LengthField::Definite(value), 1 + count))
    }
}

/// Number of bytes a definite length header occupies in minimal form.
pub(crate) fn length_header_len(len: usize) -> usize {
    if len <= 127 {
        1
    } else {
        1 + be_width(len)
    }
}

/// Appends the minimal definite length header for `len`.
pub(crate) fn write_length(out: &mut Vec<u8>, len: usize) {
    if len <= 127 {
        out.push(len as u8);
        return;
    }
    let width = be_width(len);
    out.push(0x80 | width as u8);
    let be = len.to_be_bytes();
    out.extend_from_slice(&be[be.len() - width..]);
}

/// Bytes needed for the big-endian magnitude of `value` (`value ≥ 1`).
pub(crate) fn be_width(value: usize) -> usize {
    ((usize::BITS - value.leading_zeros() + 7) / 8) as usize
}

/// The canonical SET OF element order: lexicographic over the encoded
/// bytes, the shorter operand behaving as if padded with trailing zero
/// bytes.
pub(crate) fn set_of_cmp(a: &[u8], b: &[u8]) -> Ordering {
    let width = a.len().max(b.len());
    for i in 0..width {
        let da = a.get(i).copied().unwrap_or(0);
        let db = b.get(i).copied().unwrap_or(0);
        match da.cmp(&db) {
            Ordering::Equal => {}
            other => return other,
        }
    }
    Ordering::Equal
}
