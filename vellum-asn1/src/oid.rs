use crate::tag::Tag;
use crate::Asn1Type;
use std::fmt;
use std::str::FromStr;

/// Error building an [`ObjectIdentifier`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum OidError {
    #[error("an OID needs at least two components")]
    TooFewComponents,
    #[error("OID component is not a decimal number")]
    InvalidComponent,
    #[error("OID component exceeds the supported range")]
    ComponentOverflow,
    #[error("first OID component must be 0, 1 or 2")]
    FirstComponentOutOfRange,
    #[error("second OID component must be below 40 when the first is 0 or 1")]
    SecondComponentOutOfRange,
}

/// An OBJECT IDENTIFIER: two or more integer arcs.
///
/// Arcs are limited to `u64`. The first arc is `0`, `1` or `2`; when
/// it is `0` or `1` the second arc is below `40`, matching the folded
/// wire representation.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ObjectIdentifier(Vec<u64>);

impl ObjectIdentifier {
    pub fn new(components: Vec<u64>) -> Result<Self, OidError> {
        if components.len() < 2 {
            return Err(OidError::TooFewComponents);
        }
        if components[0] > 2 {
            return Err(OidError::FirstComponentOutOfRange);
        }
        if components[0] < 2 && components[1] >= 40 {
            return Err(OidError::SecondComponentOutOfRange);
        }
        Ok(ObjectIdentifier(components))
    }

    /// Builds from components already known to satisfy the arc rules,
    /// e.g. out of the wire decoder's fold of the first sub-identifier.
    pub(crate) fn from_checked(components: Vec<u64>) -> Self {
        debug_assert!(components.len() >= 2);
        ObjectIdentifier(components)
    }

    pub fn components(&self) -> &[u64] {
        &self.0
    }
}

/// Crate-internal constructor for the wire decoder.
#[doc(hidden)]
pub fn from_wire_components(components: Vec<u64>) -> ObjectIdentifier {
    ObjectIdentifier::from_checked(components)
}

impl FromStr for ObjectIdentifier {
    type Err = OidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut components = Vec::new();
        for part in s.split('.') {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(OidError::InvalidComponent);
            }
            let arc = part.parse::<u64>().map_err(|_| OidError::ComponentOverflow)?;
            components.push(arc);
        }
        ObjectIdentifier::new(components)
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, arc) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

impl Asn1Type for ObjectIdentifier {
    const TAG: Tag = Tag::OID;
    const NAME: &'static str = "ObjectIdentifier";
}
