//! The parsed node tree.
//!
//! [`Asn1`] owns the flat pre-order node vector produced by the
//! scanner; [`Node`] and [`Nodes`] are thin views into it. No byte is
//! copied: every slice handed out borrows from the caller's input.

use crate::reader::{self, EncodingRules, ParserNode};
use crate::{Asn1DerError, Result};
use vellum_asn1::tag::Tag;

/// Parses a single DER-encoded TLV (and everything nested in it).
pub fn parse_der(input: &[u8]) -> Result<Asn1<'_>> {
    Asn1::parse(input, EncodingRules::Der)
}

/// Parses a single BER-encoded TLV, accepting the relaxed forms
/// (non-minimal lengths, indefinite-length constructed nodes).
pub fn parse_ber(input: &[u8]) -> Result<Asn1<'_>> {
    Asn1::parse(input, EncodingRules::Ber)
}

/// A fully scanned input: the root node plus all of its descendants.
#[derive(Debug)]
pub struct Asn1<'a> {
    nodes: Vec<ParserNode<'a>>,
    rules: EncodingRules,
}

impl<'a> Asn1<'a> {
    pub fn parse(input: &'a [u8], rules: EncodingRules) -> Result<Self> {
        let nodes = reader::scan(input, rules)?;
        Ok(Asn1 { nodes, rules })
    }

    /// The rules the input was scanned under.
    pub fn rules(&self) -> EncodingRules {
        self.rules
    }

    /// The root node; it spans every byte of the input.
    pub fn root(&self) -> Node<'_, 'a> {
        Node {
            nodes: &self.nodes,
            rules: self.rules,
        }
    }
}

/// One node of the tree: an identifier plus primitive bytes or child
/// nodes.
#[derive(Clone, Copy)]
pub struct Node<'s, 'a> {
    /// `nodes[0]` is this node; the rest are its descendants.
    nodes: &'s [ParserNode<'a>],
    rules: EncodingRules,
}

/// A node's content: value bytes, or an iterator over children.
pub enum Content<'s, 'a> {
    Primitive(&'a [u8]),
    Constructed(Nodes<'s, 'a>),
}

impl<'s, 'a> Node<'s, 'a> {
    fn head(&self) -> &'s ParserNode<'a> {
        &self.nodes[0]
    }

    pub fn tag(&self) -> Tag {
        self.head().tag
    }

    /// The node's entire encoding, header included.
    pub fn encoded_bytes(&self) -> &'a [u8] {
        self.head().encoded
    }

    pub fn rules(&self) -> EncodingRules {
        self.rules
    }

    pub fn content(&self) -> Content<'s, 'a> {
        if self.head().tag.is_constructed() {
            Content::Constructed(Nodes {
                nodes: &self.nodes[1..],
                rules: self.rules,
            })
        } else {
            let data = self
                .head()
                .data
                .expect("primitive parser node without data bytes");
            Content::Primitive(data)
        }
    }

    /// The value bytes of a primitive node.
    pub fn primitive_data(&self) -> Result<&'a [u8]> {
        match self.content() {
            Content::Primitive(data) => Ok(data),
            Content::Constructed(_) => Err(Asn1DerError::InvalidObject(
                "expected primitive content on a constructed node",
            )),
        }
    }

    /// The children of a constructed node.
    pub fn children(&self) -> Result<Nodes<'s, 'a>> {
        match self.content() {
            Content::Constructed(children) => Ok(children),
            Content::Primitive(_) => Err(Asn1DerError::InvalidObject(
                "expected constructed content on a primitive node",
            )),
        }
    }
}

impl std::fmt::Debug for Node<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({:?}, {} bytes)", self.tag(), self.encoded_bytes().len())
    }
}

/// Lazy iterator over sibling nodes. Cloning captures the iteration
/// state, which is how OPTIONAL peeks without consuming.
#[derive(Clone)]
pub struct Nodes<'s, 'a> {
    nodes: &'s [ParserNode<'a>],
    rules: EncodingRules,
}

impl<'s, 'a> Nodes<'s, 'a> {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub(crate) fn rules(&self) -> EncodingRules {
        self.rules
    }
}

impl<'s, 'a> Iterator for Nodes<'s, 'a> {
    type Item = Node<'s, 'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let head = self.nodes.first()?;
        let mut end = 1;
        while end < self.nodes.len() && self.nodes[end].depth > head.depth {
            end += 1;
        }
        let node = Node {
            nodes: &self.nodes[..end],
            rules: self.rules,
        };
        self.nodes = &self.nodes[end..];
        Some(node)
    }
}
