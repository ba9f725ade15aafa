//! Polymorphic INTEGER support.
//!
//! ASN.1 INTEGERs are unbounded; the codec stays agnostic of the
//! numeric representation by dispatching through [`IntegerRepr`].
//! Implementations exist for every native fixed-width integer, for an
//! owned raw-bytes value ([`IntegerBytes`]) and, behind the `bigint`
//! feature, for `num_bigint_dig::BigInt`.

/// A value that can stand in for an ASN.1 INTEGER.
///
/// The byte slices exchanged here are big-endian two's complement with
/// the minimal length DER requires; the wire codec validates
/// minimality before constructing and after visiting.
pub trait IntegerRepr: Sized {
    /// Builds the value from minimal big-endian signed bytes. Returns
    /// `None` when the magnitude does not fit this representation.
    fn from_signed_be_bytes(bytes: &[u8]) -> Option<Self>;

    /// Calls `f` with the minimal big-endian signed encoding of the
    /// value. Zero is the single byte `0x00`.
    fn with_signed_be_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R;
}

macro_rules! signed_integer_repr {
    ($($ty:ty),+) => {$(
        impl IntegerRepr for $ty {
            fn from_signed_be_bytes(bytes: &[u8]) -> Option<Self> {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                if bytes.is_empty() || bytes.len() > WIDTH {
                    return None;
                }
                let fill = if bytes[0] & 0x80 != 0 { 0xFF } else { 0x00 };
                let mut buf = [fill; WIDTH];
                buf[WIDTH - bytes.len()..].copy_from_slice(bytes);
                Some(<$ty>::from_be_bytes(buf))
            }

            fn with_signed_be_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
                let buf = self.to_be_bytes();
                let mut start = 0;
                while start + 1 < buf.len()
                    && ((buf[start] == 0x00 && buf[start + 1] & 0x80 == 0)
                        || (buf[start] == 0xFF && buf[start + 1] & 0x80 != 0))
                {
                    start += 1;
                }
                f(&buf[start..])
            }
        }
    )+};
}

signed_integer_repr!(i8, i16, i32, i64, i128);

macro_rules! unsigned_integer_repr {
    ($($ty:ty),+) => {$(
        impl IntegerRepr for $ty {
            fn from_signed_be_bytes(bytes: &[u8]) -> Option<Self> {
                const WIDTH: usize = std::mem::size_of::<$ty>();
                if bytes.is_empty() || bytes[0] & 0x80 != 0 {
                    return None; // negative
                }
                let bytes = if bytes[0] == 0x00 { &bytes[1..] } else { bytes };
                if bytes.len() > WIDTH {
                    return None;
                }
                let mut buf = [0u8; WIDTH];
                buf[WIDTH - bytes.len()..].copy_from_slice(bytes);
                Some(<$ty>::from_be_bytes(buf))
            }

            fn with_signed_be_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
                let buf = self.to_be_bytes();
                let mut start = 0;
                while start < buf.len() && buf[start] == 0 {
                    start += 1;
                }
                if start == buf.len() {
                    return f(&[0x00]);
                }
                if buf[start] & 0x80 != 0 {
                    // needs a sign octet to stay non-negative
                    let mut padded = Vec::with_capacity(buf.len() - start + 1);
                    padded.push(0x00);
                    padded.extend_from_slice(&buf[start..]);
                    f(&padded)
                } else {
                    f(&buf[start..])
                }
            }
        }
    )+};
}

unsigned_integer_repr!(u8, u16, u32, u64, u128);

/// An INTEGER kept as its minimal big-endian signed bytes.
///
/// This is the escape hatch for magnitudes the native widths cannot
/// hold when no big-integer crate is wired in.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct IntegerBytes(Vec<u8>);

impl IntegerBytes {
    /// Wraps big-endian signed bytes. Returns `None` when `bytes` is
    /// empty; redundant leading bytes are kept verbatim and refused
    /// later by the wire codec.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Option<Self> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return None;
        }
        Some(IntegerBytes(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// True when the value is negative (top bit of the first byte).
    pub fn is_negative(&self) -> bool {
        self.0[0] & 0x80 != 0
    }
}

impl From<i64> for IntegerBytes {
    fn from(value: i64) -> Self {
        value.with_signed_be_bytes(|bytes| IntegerBytes(bytes.to_vec()))
    }
}

impl IntegerRepr for IntegerBytes {
    fn from_signed_be_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        Some(IntegerBytes(bytes.to_vec()))
    }

    fn with_signed_be_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
        f(&self.0)
    }
}

#[cfg(feature = "bigint")]
mod bigint_repr {
    use super::IntegerRepr;
    use num_bigint_dig::BigInt;

    impl IntegerRepr for BigInt {
        fn from_signed_be_bytes(bytes: &[u8]) -> Option<Self> {
            if bytes.is_empty() {
                return None;
            }
            Some(BigInt::from_signed_bytes_be(bytes))
        }

        fn with_signed_be_bytes<R>(&self, f: impl FnOnce(&[u8]) -> R) -> R {
            f(&self.to_signed_bytes_be())
        }
    }
}
