use std::fmt;

/// The four ASN.1 tag classes, as carried by the top two bits of the
/// leading identifier byte.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TagClass {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl TagClass {
    /// Class from the top two bits of an identifier byte.
    pub fn from_bits(byte: u8) -> Self {
        match (byte >> 6) & 0x03 {
            0 => TagClass::Universal,
            1 => TagClass::Application,
            2 => TagClass::ContextSpecific,
            3 => TagClass::Private,
            _ => unreachable!(),
        }
    }

    /// Class bits positioned for the leading identifier byte.
    pub fn to_bits(self) -> u8 {
        match self {
            TagClass::Universal => 0x00,
            TagClass::Application => 0x40,
            TagClass::ContextSpecific => 0x80,
            TagClass::Private => 0xC0,
        }
    }
}

/// An ASN.1 identifier: class, tag number and the constructed flag.
///
/// Tag numbers are contractually limited to `0..=i64::MAX`; the wire
/// reader enforces the ceiling when decoding long-form identifiers.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Tag {
    class: TagClass,
    number: u64,
    constructed: bool,
}

impl Tag {
    pub const BOOLEAN: Self = Tag::universal(1);
    pub const INTEGER: Self = Tag::universal(2);
    pub const BIT_STRING: Self = Tag::universal(3);
    pub const OCTET_STRING: Self = Tag::universal(4);
    pub const NULL: Self = Tag::universal(5);
    pub const OID: Self = Tag::universal(6);
    pub const ENUMERATED: Self = Tag::universal(10);
    pub const UTF8_STRING: Self = Tag::universal(12);
    pub const SEQUENCE: Self = Tag::universal(16).constructed();
    pub const SET: Self = Tag::universal(17).constructed();
    pub const NUMERIC_STRING: Self = Tag::universal(18);
    pub const PRINTABLE_STRING: Self = Tag::universal(19);
    pub const TELETEX_STRING: Self = Tag::universal(20);
    pub const IA5_STRING: Self = Tag::universal(22);
    pub const UTC_TIME: Self = Tag::universal(23);
    pub const GENERALIZED_TIME: Self = Tag::universal(24);
    pub const GRAPHIC_STRING: Self = Tag::universal(25);
    pub const VISIBLE_STRING: Self = Tag::universal(26);
    pub const GENERAL_STRING: Self = Tag::universal(27);
    pub const UNIVERSAL_STRING: Self = Tag::universal(28);
    pub const BMP_STRING: Self = Tag::universal(30);

    /// End-of-contents marker identifier (universal 0, primitive).
    pub const END_OF_CONTENTS: Self = Tag::universal(0);

    #[inline]
    pub const fn universal(number: u64) -> Self {
        Tag {
            class: TagClass::Universal,
            number,
            constructed: false,
        }
    }

    #[inline]
    pub const fn application(number: u64) -> Self {
        Tag {
            class: TagClass::Application,
            number,
            constructed: false,
        }
    }

    #[inline]
    pub const fn context_specific(number: u64) -> Self {
        Tag {
            class: TagClass::ContextSpecific,
            number,
            constructed: false,
        }
    }

    #[inline]
    pub const fn private(number: u64) -> Self {
        Tag {
            class: TagClass::Private,
            number,
            constructed: false,
        }
    }

    pub const fn new(class: TagClass, number: u64, constructed: bool) -> Self {
        Tag {
            class,
            number,
            constructed,
        }
    }

    /// Same identifier with the constructed bit set.
    #[inline]
    pub const fn constructed(self) -> Self {
        Tag {
            constructed: true,
            ..self
        }
    }

    /// Same identifier with the constructed bit cleared.
    #[inline]
    pub const fn primitive(self) -> Self {
        Tag {
            constructed: false,
            ..self
        }
    }

    #[inline]
    pub const fn class(self) -> TagClass {
        self.class
    }

    #[inline]
    pub const fn number(self) -> u64 {
        self.number
    }

    #[inline]
    pub const fn is_constructed(self) -> bool {
        self.constructed
    }

    #[inline]
    pub fn is_context_specific(self) -> bool {
        matches!(self.class, TagClass::ContextSpecific)
    }

    #[inline]
    pub fn is_universal(self) -> bool {
        matches!(self.class, TagClass::Universal)
    }

    /// True when `other` names the same type, ignoring the constructed
    /// flag. Implicit tagging keeps the flag of the underlying value,
    /// so decoders match on class and number only.
    #[inline]
    pub fn eq_ignoring_construction(self, other: Tag) -> bool {
        self.class == other.class && self.number == other.number
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.class == TagClass::Universal {
            let name = match self.number {
                0 => "END-OF-CONTENTS",
                1 => "BOOLEAN",
                2 => "INTEGER",
                3 => "BIT STRING",
                4 => "OCTET STRING",
                5 => "NULL",
                6 => "OBJECT IDENTIFIER",
                10 => "ENUMERATED",
                12 => "UTF8String",
                16 => "SEQUENCE",
                17 => "SET",
                18 => "NumericString",
                19 => "PrintableString",
                20 => "TeletexString",
                22 => "IA5String",
                23 => "UTCTime",
                24 => "GeneralizedTime",
                25 => "GraphicString",
                26 => "VisibleString",
                27 => "GeneralString",
                28 => "UniversalString",
                30 => "BMPString",
                _ => return write!(f, "Universal({})", self.number),
            };
            return f.write_str(name);
        }
        let class = match self.class {
            TagClass::Application => "ApplicationTag",
            TagClass::ContextSpecific => "ContextTag",
            TagClass::Private => "PrivateTag",
            TagClass::Universal => unreachable!(),
        };
        write!(f, "{}{}", class, self.number)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tag({}, {})",
            self,
            if self.constructed {
                "constructed"
            } else {
                "primitive"
            }
        )
    }
}
