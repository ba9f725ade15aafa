//! Encoding: the streaming DER writer.
//!
//! The serializer grows a byte buffer in one pass. Every node reserves
//! a single length byte up front; when the finished content turns out
//! longer than 127 bytes, the content is shifted right just enough to
//! make room for the long-form header. SET OF elements are serialized
//! into a scratch buffer first, then copied out in canonical order.

mod bit_string;
mod boolean;
mod integer;
mod null;
mod octet_string;
mod oid;
mod string;
mod time;

pub use integer::{write_enumerated, write_enumerated_tagged, write_integer, write_integer_tagged};

use crate::misc::{be_width, set_of_cmp};
use crate::node::Node;
use crate::Result;
use vellum_asn1::tag::Tag;

/// A value that can be written out as a node.
///
/// `to_asn1` emits under the type's natural tag; `to_asn1_tagged`
/// substitutes an implicit tag.
pub trait ToAsn1 {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()>;

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()>;
}

/// The streaming TLV writer.
#[derive(Default)]
pub struct Serializer {
    buf: Vec<u8>,
}

impl Serializer {
    pub fn new() -> Self {
        Serializer { buf: Vec::new() }
    }

    /// Bytes emitted so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Takes ownership of the finished encoding.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// Writes a primitive node: `write` produces the value bytes.
    pub fn write_primitive(
        &mut self,
        tag: Tag,
        write: impl FnOnce(&mut Vec<u8>) -> Result<()>,
    ) -> Result<()> {
        self.write_identifier(tag.primitive());
        let length_at = self.buf.len();
        self.buf.push(0);
        write(&mut self.buf)?;
        self.backpatch_length(length_at);
        Ok(())
    }

    /// Writes a constructed node: `write` emits the children through
    /// the same serializer and may nest freely.
    pub fn write_constructed(
        &mut self,
        tag: Tag,
        write: impl FnOnce(&mut Serializer) -> Result<()>,
    ) -> Result<()> {
        self.write_identifier(tag.constructed());
        let length_at = self.buf.len();
        self.buf.push(0);
        write(self)?;
        self.backpatch_length(length_at);
        Ok(())
    }

    /// Appends previously encoded bytes verbatim.
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Re-emits a parsed node byte for byte, preserving its original
    /// tag, length form and child order.
    pub fn write_node(&mut self, node: Node<'_, '_>) {
        self.write_raw(node.encoded_bytes());
    }

    /// Writes a SEQUENCE holding `elements` in the given order.
    pub fn write_sequence_of<T: ToAsn1>(&mut self, elements: &[T]) -> Result<()> {
        self.write_constructed(Tag::SEQUENCE, |ser| {
            for element in elements {
                element.to_asn1(ser)?;
            }
            Ok(())
        })
    }

    /// Writes a SET OF: each element is serialized into a scratch
    /// buffer, the encodings are sorted into the canonical SET OF byte
    /// order, then copied under the SET header.
    pub fn write_set_of<T: ToAsn1>(&mut self, elements: &[T]) -> Result<()> {
        self.write_set_of_tagged(Tag::SET, elements)
    }

    pub fn write_set_of_tagged<T: ToAsn1>(&mut self, tag: Tag, elements: &[T]) -> Result<()> {
        let mut scratch = Serializer::new();
        let mut ranges = Vec::with_capacity(elements.len());
        for element in elements {
            let start = scratch.buf.len();
            element.to_asn1(&mut scratch)?;
            ranges.push(start..scratch.buf.len());
        }
        ranges.sort_by(|a, b| set_of_cmp(&scratch.buf[a.clone()], &scratch.buf[b.clone()]));
        self.write_constructed(tag, |ser| {
            for range in ranges {
                ser.write_raw(&scratch.buf[range]);
            }
            Ok(())
        })
    }

    fn write_identifier(&mut self, tag: Tag) {
        let leading = tag.class().to_bits() | if tag.is_constructed() { 0x20 } else { 0x00 };
        let number = tag.number();
        if number < 31 {
            self.buf.push(leading | number as u8);
            return;
        }
        self.buf.push(leading | 0x1F);
        let digits = (64 - number.leading_zeros() as usize).div_ceil(7);
        for digit in (0..digits).rev() {
            let byte = (number >> (digit * 7)) as u8 & 0x7F;
            self.buf
                .push(if digit == 0 { byte } else { byte | 0x80 });
        }
    }

    /// Settles the length byte reserved at `length_at`. Content longer
    /// than 127 bytes is shifted right to make room for the long form;
    /// the shift distance is exactly the extra header bytes, which
    /// keeps the encoding minimal without a second pass.
    fn backpatch_length(&mut self, length_at: usize) {
        let content_len = self.buf.len() - length_at - 1;
        if content_len <= 127 {
            self.buf[length_at] = content_len as u8;
            return;
        }
        let extra = be_width(content_len);
        let content_start = length_at + 1;
        self.buf.resize(self.buf.len() + extra, 0);
        self.buf
            .copy_within(content_start..content_start + content_len, content_start + extra);
        self.buf[length_at] = 0x80 | extra as u8;
        let be = content_len.to_be_bytes();
        self.buf[content_start..content_start + extra].copy_from_slice(&be[be.len() - extra..]);
    }
}
