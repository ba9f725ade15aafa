//! Schema-driven records shaped like the PKI structures this core
//! exists to carry. The record types live here, not in the library:
//! they exercise the combinators the way application code would.

use pretty_assertions::assert_eq;
use vellum_asn1::{BitString, IntegerBytes, ObjectIdentifier, Tag};
use vellum_asn1_der::de::{self, FromAsn1};
use vellum_asn1_der::ser::{Serializer, ToAsn1};
use vellum_asn1_der::{parse_der, parse_pem, Node, Pem, RawDer, Result};

const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";

#[derive(Clone, Debug, PartialEq)]
struct AlgorithmIdentifier {
    algorithm: ObjectIdentifier,
    /// Kept raw: parameters are algorithm-specific and must survive
    /// unmodified under the signature.
    parameters: Option<RawDer>,
}

impl<'a> FromAsn1<'a> for AlgorithmIdentifier {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        de::read_sequence(node, |children| {
            let algorithm = ObjectIdentifier::from_asn1(
                children
                    .next()
                    .ok_or(vellum_asn1_der::Asn1DerError::TruncatedField)?,
            )?;
            let parameters = children.next().map(RawDer::from_asn1).transpose()?;
            Ok(AlgorithmIdentifier {
                algorithm,
                parameters,
            })
        })
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, tag: Tag) -> Result<Self> {
        de::read_sequence_tagged(node, tag, |children| {
            let algorithm = ObjectIdentifier::from_asn1(
                children
                    .next()
                    .ok_or(vellum_asn1_der::Asn1DerError::TruncatedField)?,
            )?;
            let parameters = children.next().map(RawDer::from_asn1).transpose()?;
            Ok(AlgorithmIdentifier {
                algorithm,
                parameters,
            })
        })
    }
}

impl ToAsn1 for AlgorithmIdentifier {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        self.to_asn1_tagged(Tag::SEQUENCE, ser)
    }

    fn to_asn1_tagged(&self, tag: Tag, ser: &mut Serializer) -> Result<()> {
        ser.write_constructed(tag, |ser| {
            self.algorithm.to_asn1(ser)?;
            if let Some(parameters) = &self.parameters {
                parameters.to_asn1(ser)?;
            }
            Ok(())
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
struct SubjectPublicKeyInfo {
    algorithm: AlgorithmIdentifier,
    subject_public_key: BitString,
}

impl<'a> FromAsn1<'a> for SubjectPublicKeyInfo {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        de::read_sequence(node, |children| {
            let algorithm = AlgorithmIdentifier::from_asn1(
                children
                    .next()
                    .ok_or(vellum_asn1_der::Asn1DerError::TruncatedField)?,
            )?;
            let subject_public_key = BitString::from_asn1(
                children
                    .next()
                    .ok_or(vellum_asn1_der::Asn1DerError::TruncatedField)?,
            )?;
            Ok(SubjectPublicKeyInfo {
                algorithm,
                subject_public_key,
            })
        })
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, _tag: Tag) -> Result<Self> {
        Self::from_asn1(node)
    }
}

impl ToAsn1 for SubjectPublicKeyInfo {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        ser.write_constructed(Tag::SEQUENCE, |ser| {
            self.algorithm.to_asn1(ser)?;
            self.subject_public_key.to_asn1(ser)
        })
    }

    fn to_asn1_tagged(&self, _tag: Tag, _ser: &mut Serializer) -> Result<()> {
        unimplemented!("SubjectPublicKeyInfo is never implicitly tagged")
    }
}

#[derive(Clone, Debug, PartialEq)]
struct EcdsaSignature {
    r: IntegerBytes,
    s: IntegerBytes,
}

impl<'a> FromAsn1<'a> for EcdsaSignature {
    fn from_asn1(node: Node<'_, 'a>) -> Result<Self> {
        de::read_sequence(node, |children| {
            let r = IntegerBytes::from_asn1(
                children
                    .next()
                    .ok_or(vellum_asn1_der::Asn1DerError::TruncatedField)?,
            )?;
            let s = IntegerBytes::from_asn1(
                children
                    .next()
                    .ok_or(vellum_asn1_der::Asn1DerError::TruncatedField)?,
            )?;
            Ok(EcdsaSignature { r, s })
        })
    }

    fn from_asn1_tagged(node: Node<'_, 'a>, _tag: Tag) -> Result<Self> {
        Self::from_asn1(node)
    }
}

impl ToAsn1 for EcdsaSignature {
    fn to_asn1(&self, ser: &mut Serializer) -> Result<()> {
        ser.write_constructed(Tag::SEQUENCE, |ser| {
            self.r.to_asn1(ser)?;
            self.s.to_asn1(ser)
        })
    }

    fn to_asn1_tagged(&self, _tag: Tag, _ser: &mut Serializer) -> Result<()> {
        unimplemented!("ECDSA-Sig-Value is never implicitly tagged")
    }
}

fn sample_spki() -> SubjectPublicKeyInfo {
    SubjectPublicKeyInfo {
        algorithm: AlgorithmIdentifier {
            algorithm: RSA_ENCRYPTION.parse().unwrap(),
            parameters: Some(RawDer(vec![0x05, 0x00])),
        },
        subject_public_key: BitString::from_bytes(vec![0x30, 0x0D, 0x02, 0x08, 0x00]),
    }
}

#[test]
fn algorithm_identifier_round_trip() {
    let original = sample_spki().algorithm;
    let mut ser = Serializer::new();
    original.to_asn1(&mut ser).unwrap();
    let der = ser.finish();

    // SEQUENCE { OID rsaEncryption, NULL }
    assert_eq!(
        der,
        [
            0x30, 0x0D, 0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01, 0x05,
            0x00
        ]
    );

    let asn1 = parse_der(&der).unwrap();
    assert_eq!(AlgorithmIdentifier::from_asn1(asn1.root()).unwrap(), original);
}

#[test]
fn algorithm_identifier_without_parameters() {
    let original = AlgorithmIdentifier {
        algorithm: "1.2.840.10045.2.1".parse().unwrap(),
        parameters: None,
    };
    let mut ser = Serializer::new();
    original.to_asn1(&mut ser).unwrap();
    let asn1 = parse_der(ser.as_bytes()).unwrap();
    assert_eq!(AlgorithmIdentifier::from_asn1(asn1.root()).unwrap(), original);
}

#[test]
fn spki_round_trip_through_pem() {
    let original = sample_spki();
    let mut ser = Serializer::new();
    original.to_asn1(&mut ser).unwrap();
    let der = ser.finish();

    let pem = Pem::new("PUBLIC KEY", der.clone());
    let text = pem.to_string();
    let reread = parse_pem(&text).unwrap();
    assert_eq!(reread.label(), "PUBLIC KEY");
    assert_eq!(reread.data(), &der[..]);

    let asn1 = parse_der(reread.data()).unwrap();
    assert_eq!(SubjectPublicKeyInfo::from_asn1(asn1.root()).unwrap(), original);
}

#[test]
fn ecdsa_signature_vector() {
    // SEQUENCE { INTEGER r, INTEGER s } with a high-bit r needing a
    // sign octet
    let der = [
        0x30, 0x08, 0x02, 0x02, 0x00, 0x81, 0x02, 0x02, 0x01, 0x05,
    ];
    let asn1 = parse_der(&der).unwrap();
    let signature = EcdsaSignature::from_asn1(asn1.root()).unwrap();
    assert_eq!(signature.r.as_bytes(), [0x00, 0x81]);
    assert_eq!(signature.s.as_bytes(), [0x01, 0x05]);
    assert!(!signature.r.is_negative());

    let mut ser = Serializer::new();
    signature.to_asn1(&mut ser).unwrap();
    assert_eq!(ser.finish(), der);
}

#[test]
fn signed_substructure_survives_raw() {
    // a "certificate": SEQUENCE { tbs (raw), AlgorithmIdentifier, BIT STRING }
    let tbs = {
        let mut ser = Serializer::new();
        ser.write_constructed(Tag::SEQUENCE, |ser| {
            2i32.to_asn1(ser)?;
            "issuer".to_asn1(ser)
        })
        .unwrap();
        ser.finish()
    };

    let mut ser = Serializer::new();
    ser.write_constructed(Tag::SEQUENCE, |ser| {
        RawDer(tbs.clone()).to_asn1(ser)?;
        sample_spki().algorithm.to_asn1(ser)?;
        BitString::from_bytes(vec![0xDE, 0xAD]).to_asn1(ser)
    })
    .unwrap();
    let der = ser.finish();

    let asn1 = parse_der(&der).unwrap();
    let reread_tbs = de::read_sequence(asn1.root(), |children| {
        let tbs = RawDer::from_asn1(children.next().unwrap())?;
        let _alg = AlgorithmIdentifier::from_asn1(children.next().unwrap())?;
        let _sig = BitString::from_asn1(children.next().unwrap())?;
        Ok(tbs)
    })
    .unwrap();

    // byte identity is what makes the signature over the TBS bytes
    // verifiable after a parse/serialize cycle
    assert_eq!(reread_tbs.as_bytes(), &tbs[..]);
}
