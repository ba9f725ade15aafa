//! Structure combinators: SEQUENCE, SET, tagging, OPTIONAL, DEFAULT.
//!
//! Schema code composes these against a node's child iterator. The
//! iterator is a pair of slice and rules, so the OPTIONAL lookahead is
//! a plain clone that is either committed or dropped.

use crate::de::{expect_tag, FromAsn1};
use crate::misc::set_of_cmp;
use crate::node::{Node, Nodes};
use crate::reader::EncodingRules;
use crate::{Asn1DerError, Result};
use std::cmp::Ordering;
use vellum_asn1::tag::Tag;

/// Enters a SEQUENCE and hands its children to `build`. The builder
/// must consume every child.
pub fn read_sequence<'s, 'a, T>(
    node: Node<'s, 'a>,
    build: impl FnOnce(&mut Nodes<'s, 'a>) -> Result<T>,
) -> Result<T> {
    read_sequence_tagged(node, Tag::SEQUENCE, build)
}

/// [`read_sequence`] under an implicit tag.
pub fn read_sequence_tagged<'s, 'a, T>(
    node: Node<'s, 'a>,
    tag: Tag,
    build: impl FnOnce(&mut Nodes<'s, 'a>) -> Result<T>,
) -> Result<T> {
    expect_tag(&node, tag)?;
    let mut children = node.children()?;
    let value = build(&mut children)?;
    if !children.is_empty() {
        return Err(Asn1DerError::InvalidObject(
            "constructed node has unconsumed children",
        ));
    }
    Ok(value)
}

/// SET parses structurally like SEQUENCE.
pub fn read_set<'s, 'a, T>(
    node: Node<'s, 'a>,
    build: impl FnOnce(&mut Nodes<'s, 'a>) -> Result<T>,
) -> Result<T> {
    read_sequence_tagged(node, Tag::SET, build)
}

/// [`read_set`] under an implicit tag.
pub fn read_set_tagged<'s, 'a, T>(
    node: Node<'s, 'a>,
    tag: Tag,
    build: impl FnOnce(&mut Nodes<'s, 'a>) -> Result<T>,
) -> Result<T> {
    read_sequence_tagged(node, tag, build)
}

/// SEQUENCE OF: every child is a `T`, order preserved.
pub fn read_sequence_of<'a, T: FromAsn1<'a>>(node: Node<'_, 'a>) -> Result<Vec<T>> {
    read_sequence_of_tagged(node, Tag::SEQUENCE)
}

pub fn read_sequence_of_tagged<'a, T: FromAsn1<'a>>(node: Node<'_, 'a>, tag: Tag) -> Result<Vec<T>> {
    expect_tag(&node, tag)?;
    node.children()?.map(T::from_asn1).collect()
}

/// SET OF: every child is a `T`. Under DER the children must already
/// be in the canonical SET OF byte order.
pub fn read_set_of<'a, T: FromAsn1<'a>>(node: Node<'_, 'a>) -> Result<Vec<T>> {
    read_set_of_tagged(node, Tag::SET)
}

pub fn read_set_of_tagged<'a, T: FromAsn1<'a>>(node: Node<'_, 'a>, tag: Tag) -> Result<Vec<T>> {
    expect_tag(&node, tag)?;
    let children = node.children()?;
    if node.rules() == EncodingRules::Der {
        let mut previous: Option<&[u8]> = None;
        for child in children.clone() {
            let encoded = child.encoded_bytes();
            if let Some(prev) = previous {
                if set_of_cmp(prev, encoded) == Ordering::Greater {
                    return Err(Asn1DerError::InvalidObject(
                        "SET OF elements are not in canonical order",
                    ));
                }
            }
            previous = Some(encoded);
        }
    }
    children.map(T::from_asn1).collect()
}

/// Unwraps an explicitly tagged value: a constructed node under `tag`
/// holding exactly one child, which is handed to `read`.
pub fn read_explicit<'s, 'a, T>(
    node: Node<'s, 'a>,
    tag: Tag,
    read: impl FnOnce(Node<'s, 'a>) -> Result<T>,
) -> Result<T> {
    expect_tag(&node, tag)?;
    let mut children = node.children()?;
    let inner = children.next().ok_or(Asn1DerError::InvalidObject(
        "explicitly tagged value has no inner node",
    ))?;
    if !children.is_empty() {
        return Err(Asn1DerError::InvalidObject(
            "explicitly tagged value must hold exactly one node",
        ));
    }
    read(inner)
}

/// Reads the next child if its identifier matches `tag`, consuming it
/// only on a match. The lookahead never disturbs `children`.
pub fn read_optional<'s, 'a, T>(
    children: &mut Nodes<'s, 'a>,
    tag: Tag,
    read: impl FnOnce(Node<'s, 'a>) -> Result<T>,
) -> Result<Option<T>> {
    let mut lookahead = children.clone();
    match lookahead.next() {
        Some(node) if node.tag().eq_ignoring_construction(tag) => {
            *children = lookahead;
            read(node).map(Some)
        }
        _ => Ok(None),
    }
}

/// OPTIONAL with a fallback. DER forbids writing a DEFAULT field at
/// its default value, so a present-and-equal value is rejected there;
/// BER accepts the redundant encoding.
pub fn read_default<'s, 'a, T: PartialEq>(
    children: &mut Nodes<'s, 'a>,
    tag: Tag,
    default: T,
    read: impl FnOnce(Node<'s, 'a>) -> Result<T>,
) -> Result<T> {
    let rules = children.rules();
    match read_optional(children, tag, read)? {
        Some(value) => {
            if rules == EncodingRules::Der && value == default {
                return Err(Asn1DerError::InvalidObject(
                    "DEFAULT field encoded at its default value",
                ));
            }
            Ok(value)
        }
        None => Ok(default),
    }
}
