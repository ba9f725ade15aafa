//! Decoding: typed reads off the parsed node tree.
//!
//! Every codec validates the node's identifier against the expected
//! tag (the type's natural tag, or a caller-supplied implicit tag) and
//! enforces DER's uniqueness constraints on the content, so that a
//! value accepted here has exactly one wire form.

mod bit_string;
mod boolean;
mod integer;
mod null;
mod octet_string;
mod oid;
mod sequence;
mod string;
mod time;

pub use integer::{read_enumerated, read_enumerated_tagged, read_integer, read_integer_tagged};
pub(crate) use integer::validate_integer_content;
pub use sequence::{
    read_default, read_explicit, read_optional, read_sequence, read_sequence_of,
    read_sequence_of_tagged, read_sequence_tagged, read_set, read_set_of, read_set_of_tagged,
    read_set_tagged,
};

use crate::node::Node;
use crate::{Asn1DerError, Result};
use vellum_asn1::tag::Tag;

/// A value that can be read from a node.
///
/// `from_asn1` expects the type's natural tag; `from_asn1_tagged`
/// substitutes an implicit tag and is what tagged-field schema code
/// calls.
pub trait FromAsn1<'a>: Sized {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self>;

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self>;
}

/// Fails with the observed identifier unless it matches `tag` (the
/// constructed flag is not part of the match; implicit tags keep the
/// flag of the value they replace).
pub(crate) fn expect_tag(node: &Node<'_, '_>, tag: Tag) -> Result<()> {
    if !node.tag().eq_ignoring_construction(tag) {
        return Err(Asn1DerError::UnexpectedFieldType(node.tag()));
    }
    Ok(())
}

/// Tag check plus primitive-content check in one step.
pub(crate) fn primitive_bytes<'a>(node: &Node<'_, 'a>, tag: Tag) -> Result<&'a [u8]> {
    expect_tag(node, tag)?;
    node.primitive_data()
}
