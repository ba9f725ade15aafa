//! TLV scanning.
//!
//! The scanner walks one top-level TLV (and everything nested in it)
//! and produces a flat vector of [`ParserNode`]s in pre-order. Each
//! node records its depth, so the tree view in [`crate::node`] can
//! regroup children without further bookkeeping: the descendants of
//! the node at index `i` are exactly the contiguous run after `i`
//! whose depth is strictly greater.

use crate::misc::LengthField;
use crate::{Asn1DerError, Result};
use vellum_asn1::tag::{Tag, TagClass};

/// Hard ceiling on nesting depth, enforced while scanning.
pub const MAX_NESTING_DEPTH: usize = 50;

/// Hard ceiling on the number of TLV nodes in one parse.
pub const MAX_NODE_COUNT: usize = 100_000;

/// The encoding discipline applied while scanning.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EncodingRules {
    /// Distinguished Encoding Rules: every value has exactly one wire
    /// form. Rejects indefinite lengths and non-minimal length fields.
    Der,
    /// Basic Encoding Rules: admits non-minimal lengths and
    /// indefinite-length constructed nodes.
    Ber,
}

/// One scanned TLV. `data` is present iff the node is primitive;
/// `encoded` spans the whole TLV including its header.
#[derive(Debug)]
pub(crate) struct ParserNode<'a> {
    pub(crate) tag: Tag,
    pub(crate) depth: usize,
    pub(crate) encoded: &'a [u8],
    pub(crate) data: Option<&'a [u8]>,
}

/// Scans `input` into the flat pre-order node vector. The input must
/// hold exactly one TLV; trailing bytes are an error.
pub(crate) fn scan(input: &[u8], rules: EncodingRules) -> Result<Vec<ParserNode<'_>>> {
    debug_log!("scanning {} bytes under {:?}", input.len(), rules);
    let mut scanner = Scanner {
        input,
        pos: 0,
        rules,
        nodes: Vec::new(),
    };
    scanner.scan_node(1, input.len())?;
    if scanner.pos != input.len() {
        return Err(Asn1DerError::InvalidObject("trailing bytes after the root node"));
    }
    Ok(scanner.nodes)
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
    rules: EncodingRules,
    nodes: Vec<ParserNode<'a>>,
}

impl<'a> Scanner<'a> {
    fn read_byte(&mut self, end: usize) -> Result<u8> {
        if self.pos >= end {
            return Err(Asn1DerError::TruncatedField);
        }
        let byte = self.input[self.pos];
        self.pos += 1;
        Ok(byte)
    }

    fn read_identifier(&mut self, end: usize) -> Result<Tag> {
        let first = self.read_byte(end)?;
        let class = TagClass::from_bits(first);
        let constructed = first & 0x20 != 0;
        let number = if first & 0x1F != 0x1F {
            u64::from(first & 0x1F)
        } else {
            self.read_long_tag_number(end)?
        };
        Ok(Tag::new(class, number, constructed))
    }

    fn read_long_tag_number(&mut self, end: usize) -> Result<u64> {
        let mut value: u64 = 0;
        let mut first = true;
        loop {
            let byte = self.read_byte(end)?;
            if first && byte == 0x80 {
                return Err(Asn1DerError::InvalidFieldIdentifier(
                    "leading zero byte in long-form tag number",
                ));
            }
            first = false;
            if value > (i64::MAX as u64) >> 7 {
                return Err(Asn1DerError::InvalidFieldIdentifier("tag number is too large"));
            }
            value = value << 7 | u64::from(byte & 0x7F);
            if byte & 0x80 == 0 {
                break;
            }
        }
        if value < 31 {
            return Err(Asn1DerError::InvalidFieldIdentifier(
                "ASN.1 tag incorrectly encoded in long form",
            ));
        }
        Ok(value)
    }

    fn read_length(&mut self, end: usize) -> Result<LengthField> {
        let (length, consumed) = LengthField::parse(&self.input[self.pos..end], self.rules)?;
        self.pos += consumed;
        Ok(length)
    }

    fn note_node(&self) -> Result<()> {
        if self.nodes.len() >= MAX_NODE_COUNT {
            return Err(Asn1DerError::InvalidObject("excessive number of nodes"));
        }
        Ok(())
    }

    /// True when the next two bytes are the end-of-contents marker.
    fn at_end_of_contents(&self, end: usize) -> bool {
        self.pos + 2 <= end && self.input[self.pos] == 0x00 && self.input[self.pos + 1] == 0x00
    }

    fn scan_node(&mut self, depth: usize, end: usize) -> Result<()> {
        if depth > MAX_NESTING_DEPTH {
            return Err(Asn1DerError::InvalidObject("excessive stack depth"));
        }
        let start = self.pos;
        let tag = self.read_identifier(end)?;
        if tag.class() == TagClass::Universal && tag.number() == 0 {
            // A legitimate end-of-contents marker is consumed by the
            // indefinite-length loop below before recursing.
            return Err(match self.rules {
                EncodingRules::Der => {
                    Asn1DerError::InvalidObject("end-of-contents marker is not permitted in DER")
                }
                EncodingRules::Ber => {
                    Asn1DerError::InvalidObject("unexpected end-of-contents marker")
                }
            });
        }
        let length = self.read_length(end)?;
        self.note_node()?;
        match length {
            LengthField::Definite(len) => {
                let content_start = self.pos;
                if len > end - self.pos {
                    return Err(Asn1DerError::TruncatedField);
                }
                self.pos += len;
                let after = self.pos;
                let encoded = &self.input[start..after];
                if tag.is_constructed() {
                    self.nodes.push(ParserNode {
                        tag,
                        depth,
                        encoded,
                        data: None,
                    });
                    self.pos = content_start;
                    while self.pos < after {
                        self.scan_node(depth + 1, after)?;
                    }
                    self.pos = after;
                } else {
                    self.nodes.push(ParserNode {
                        tag,
                        depth,
                        encoded,
                        data: Some(&self.input[content_start..after]),
                    });
                }
            }
            LengthField::Indefinite => {
                if !tag.is_constructed() {
                    return Err(Asn1DerError::InvalidObject(
                        "indefinite length on a primitive node",
                    ));
                }
                let index = self.nodes.len();
                self.nodes.push(ParserNode {
                    tag,
                    depth,
                    encoded: &[],
                    data: None,
                });
                while !self.at_end_of_contents(end) {
                    self.scan_node(depth + 1, end)?;
                }
                self.pos += 2;
                self.nodes[index].encoded = &self.input[start..self.pos];
            }
        }
        Ok(())
    }
}
