//! Restricted character string types.
//!
//! Each type stores its content as raw bytes under its own universal
//! tag and validates the permitted alphabet on construction.

use crate::tag::Tag;
use crate::Asn1Type;
use std::fmt;
use std::str::FromStr;

/// The content does not fit the string type's character set.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid character set")]
pub struct CharSetError;

fn is_printable(byte: u8) -> bool {
    matches!(byte,
        b'A'..=b'Z'
        | b'a'..=b'z'
        | b'0'..=b'9'
        | b' ' | b'\'' | b'(' | b')' | b'+' | b',' | b'-' | b'.' | b'/' | b':' | b'=' | b'?')
}

macro_rules! restricted_string {
    ($(#[$doc:meta])* $name:ident, $tag:expr, $check:expr) => {
        $(#[$doc])*
        #[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        pub struct $name(Vec<u8>);

        impl $name {
            pub fn new(data: impl Into<Vec<u8>>) -> Result<Self, CharSetError> {
                let data = data.into();
                let check: fn(&[u8]) -> bool = $check;
                if !check(&data) {
                    return Err(CharSetError);
                }
                Ok(Self(data))
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }

            pub fn into_bytes(self) -> Vec<u8> {
                self.0
            }
        }

        impl Asn1Type for $name {
            const TAG: Tag = $tag;
            const NAME: &'static str = stringify!($name);
        }

        impl FromStr for $name {
            type Err = CharSetError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s.as_bytes().to_vec())
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({:?})", stringify!($name), String::from_utf8_lossy(&self.0))
            }
        }
    };
}

restricted_string!(
    /// `A–Z a–z 0–9 space ' ( ) + , - . / : = ?`
    PrintableString,
    Tag::PRINTABLE_STRING,
    |data| data.iter().all(|&b| is_printable(b))
);

restricted_string!(
    /// Decimal digits and space.
    NumericString,
    Tag::NUMERIC_STRING,
    |data| data.iter().all(|&b| b.is_ascii_digit() || b == b' ')
);

restricted_string!(
    /// Any byte below 128.
    Ia5String,
    Tag::IA5_STRING,
    |data| data.iter().all(|&b| b < 128)
);

restricted_string!(
    /// The visible (printing) ASCII range.
    VisibleString,
    Tag::VISIBLE_STRING,
    |data| data.iter().all(|&b| (0x20..=0x7E).contains(&b))
);

restricted_string!(
    /// T.61 content; stored verbatim.
    TeletexString,
    Tag::TELETEX_STRING,
    |_| true
);

restricted_string!(
    /// Stored verbatim.
    GeneralString,
    Tag::GENERAL_STRING,
    |_| true
);

restricted_string!(
    /// Stored verbatim.
    GraphicString,
    Tag::GRAPHIC_STRING,
    |_| true
);

restricted_string!(
    /// UTF-32BE code units.
    UniversalString,
    Tag::UNIVERSAL_STRING,
    |data| data.len() % 4 == 0
);

/// Big-endian UTF-16 content.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BmpString(Vec<u8>);

impl BmpString {
    /// Accepts raw UTF-16BE bytes; the length must be even.
    pub fn new(data: impl Into<Vec<u8>>) -> Result<Self, CharSetError> {
        let data = data.into();
        if data.len() % 2 != 0 {
            return Err(CharSetError);
        }
        Ok(BmpString(data))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Decodes to native text, failing on unpaired surrogates.
    pub fn to_utf8(&self) -> Result<String, CharSetError> {
        let units: Vec<u16> = self
            .0
            .chunks(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|_| CharSetError)
    }
}

impl Asn1Type for BmpString {
    const TAG: Tag = Tag::BMP_STRING;
    const NAME: &'static str = "BmpString";
}

impl FromStr for BmpString {
    type Err = CharSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut data = Vec::with_capacity(s.len() * 2);
        for unit in s.encode_utf16() {
            data.extend_from_slice(&unit.to_be_bytes());
        }
        Ok(BmpString(data))
    }
}

impl fmt::Debug for BmpString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utf8() {
            Ok(text) => write!(f, "BmpString({:?})", text),
            Err(_) => write!(f, "BmpString({} bytes)", self.0.len()),
        }
    }
}
