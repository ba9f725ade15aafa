//! The PEM envelope.
//!
//! A PEM document is a labelled base64 block:
//!
//! ```text
//! -----BEGIN CERTIFICATE-----
//! MIIB...                          (64 columns per line, last ≤ 64)
//! -----END CERTIFICATE-----
//! ```
//!
//! Parsing is strict inside the envelope: body lines are exactly 64
//! characters except the last, the BEGIN and END labels must match,
//! stray non-base64 characters fail, and an empty body fails. Text
//! before the BEGIN marker is ignored so certificate bundles with
//! human commentary remain readable. Line endings may be LF or CRLF.

use crate::{Asn1DerError, Result};
use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use base64::Engine;
use std::fmt;
use std::str::FromStr;

const PEM_BEGIN: &str = "-----BEGIN ";
const PEM_END: &str = "-----END ";
const PEM_DASHES: &str = "-----";
const LINE_WIDTH: usize = 64;

/// A decoded PEM document: the label and the DER payload.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pem {
    label: String,
    data: Vec<u8>,
}

impl Pem {
    pub fn new(label: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Pem {
            label: label.into(),
            data: data.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

/// Parses exactly one PEM document.
pub fn parse_pem(input: &str) -> Result<Pem> {
    debug_log!("parsing a single PEM document");
    let (pem, rest) = parse_single(input)?;
    if rest.contains(PEM_BEGIN) {
        return Err(Asn1DerError::InvalidPemDocument(
            "found more than one document where one was required",
        ));
    }
    Ok(pem)
}

/// Parses every PEM document in `input`, in order. An input with no
/// BEGIN marker at all yields an empty list.
pub fn parse_pem_multiple(input: &str) -> Result<Vec<Pem>> {
    debug_log!("parsing a PEM document sequence");
    let mut documents = Vec::new();
    let mut rest = input;
    while rest.contains(PEM_BEGIN) {
        let (pem, next) = parse_single(rest)?;
        documents.push(pem);
        rest = next;
    }
    Ok(documents)
}

fn parse_single(input: &str) -> Result<(Pem, &str)> {
    let begin = input
        .find(PEM_BEGIN)
        .ok_or(Asn1DerError::InvalidPemDocument("BEGIN marker not found"))?;
    let after_begin = &input[begin + PEM_BEGIN.len()..];
    let (label, after_label) = after_begin
        .split_once(PEM_DASHES)
        .ok_or(Asn1DerError::InvalidPemDocument("malformed BEGIN marker"))?;
    if label.contains('\n') || label.contains('\r') {
        return Err(Asn1DerError::InvalidPemDocument("malformed BEGIN marker"));
    }

    let mut rest = strip_line_ending(after_label)?;
    let mut body = String::new();
    let mut previous_line_len = None;
    loop {
        let (line, next) = take_line(rest)?;
        rest = next;
        if let Some(end_line) = line.strip_prefix(PEM_END) {
            let expected = format!("{}{}", label, PEM_DASHES);
            if end_line != expected {
                return Err(Asn1DerError::InvalidPemDocument(
                    "END label does not match the BEGIN label",
                ));
            }
            if body.is_empty() {
                return Err(Asn1DerError::InvalidPemDocument("document body is empty"));
            }
            let data = BASE64_ENGINE
                .decode(&body)
                .map_err(|_| Asn1DerError::InvalidPemDocument("body is not valid base64"))?;
            return Ok((Pem::new(label, data), rest));
        }
        // a body line before this one must have been full-width
        if previous_line_len.is_some_and(|len| len != LINE_WIDTH) {
            return Err(Asn1DerError::InvalidPemDocument(
                "body line is not 64 characters",
            ));
        }
        if line.is_empty() || line.len() > LINE_WIDTH {
            return Err(Asn1DerError::InvalidPemDocument(
                "body line is not 64 characters",
            ));
        }
        previous_line_len = Some(line.len());
        body.push_str(line);
    }
}

/// Splits the next line off `rest`, tolerating LF and CRLF endings.
/// The end of input after at least one character also ends a line.
fn take_line(rest: &str) -> Result<(&str, &str)> {
    if rest.is_empty() {
        return Err(Asn1DerError::InvalidPemDocument("END marker not found"));
    }
    match rest.split_once('\n') {
        Some((line, next)) => Ok((line.strip_suffix('\r').unwrap_or(line), next)),
        None => Ok((rest.strip_suffix('\r').unwrap_or(rest), "")),
    }
}

/// Requires and consumes a line ending.
fn strip_line_ending(rest: &str) -> Result<&str> {
    let rest = rest.strip_prefix('\r').unwrap_or(rest);
    rest.strip_prefix('\n')
        .ok_or(Asn1DerError::InvalidPemDocument("malformed BEGIN marker"))
}

impl FromStr for Pem {
    type Err = Asn1DerError;

    fn from_str(s: &str) -> Result<Self> {
        parse_pem(s)
    }
}

impl fmt::Display for Pem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", PEM_BEGIN, self.label, PEM_DASHES)?;
        let body = BASE64_ENGINE.encode(&self.data);
        for chunk in body.as_bytes().chunks(LINE_WIDTH) {
            f.write_str("\n")?;
            // base64 output is ASCII
            f.write_str(std::str::from_utf8(chunk).expect("base64 emitted non-ASCII"))?;
        }
        write!(f, "\n{}{}{}", PEM_END, self.label, PEM_DASHES)
    }
}
