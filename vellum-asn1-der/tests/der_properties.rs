//! End-to-end properties of the encoding core: round-trips, hardening
//! ceilings, length strictness and canonical ordering.

use pretty_assertions::assert_eq;
use rstest::rstest;
use vellum_asn1::{BitString, GeneralizedTime, ObjectIdentifier, UtcTime};
use vellum_asn1_der::de::{self, FromAsn1};
use vellum_asn1_der::ser::{Serializer, ToAsn1};
use vellum_asn1_der::{parse_ber, parse_der, Asn1DerError, Content, Node, Result};

fn to_der<T: ToAsn1>(value: &T) -> Vec<u8> {
    let mut ser = Serializer::new();
    value.to_asn1(&mut ser).unwrap();
    ser.finish()
}

fn from_der<T: for<'a> FromAsn1<'a>>(input: &[u8]) -> Result<T> {
    T::from_asn1(parse_der(input)?.root())
}

#[test]
fn universal_round_trip_booleans_and_null() {
    for value in [true, false] {
        assert_eq!(from_der::<bool>(&to_der(&value)).unwrap(), value);
    }
    from_der::<()>(&to_der(&())).unwrap();
}

#[rstest]
#[case(0i64)]
#[case(1)]
#[case(-1)]
#[case(127)]
#[case(128)]
#[case(-128)]
#[case(-129)]
#[case(65_537)]
#[case(i64::MAX)]
#[case(i64::MIN)]
fn universal_round_trip_integers(#[case] value: i64) {
    assert_eq!(from_der::<i64>(&to_der(&value)).unwrap(), value);
}

#[rstest]
#[case("0.0")]
#[case("1.2.840.113549.1.1.1")]
#[case("2.5.4.3")]
#[case("2.999.18446744073709551615")]
fn universal_round_trip_oids(#[case] dotted: &str) {
    let oid: ObjectIdentifier = dotted.parse().unwrap();
    assert_eq!(from_der::<ObjectIdentifier>(&to_der(&oid)).unwrap(), oid);
}

#[test]
fn universal_round_trip_strings_and_times() {
    let text = String::from("naïve text ≠ ASCII");
    assert_eq!(from_der::<String>(&to_der(&text)).unwrap(), text);

    let octets = vec![0u8, 1, 2, 253, 254, 255];
    assert_eq!(from_der::<Vec<u8>>(&to_der(&octets)).unwrap(), octets);

    let bits = BitString::with_unused_bits(vec![0xA0], 4).unwrap();
    assert_eq!(from_der::<BitString>(&to_der(&bits)).unwrap(), bits);

    let utc = UtcTime::new(2026, 8, 2, 12, 0, 0).unwrap();
    assert_eq!(from_der::<UtcTime>(&to_der(&utc)).unwrap(), utc);

    let gt = GeneralizedTime::new(1992, 7, 22, 13, 21, 0)
        .unwrap()
        .with_fraction(*b"3")
        .unwrap();
    assert_eq!(from_der::<GeneralizedTime>(&to_der(&gt)).unwrap(), gt);
}

#[rstest]
#[case::boolean(&[0x01, 0x01, 0xFF][..])]
#[case::integer(&[0x02, 0x02, 0x00, 0x80][..])]
#[case::octets(&[0x04, 0x03, 0x01, 0x02, 0x03][..])]
#[case::oid(&[0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01][..])]
#[case::bits(&[0x03, 0x02, 0x07, 0x80][..])]
#[case::utf8(&[0x0C, 0x02, 0xC3, 0xA9][..])]
fn canonical_bytes_survive_reserialization(#[case] input: &[u8]) {
    let asn1 = parse_der(input).unwrap();
    let mut ser = Serializer::new();
    reserialize(asn1.root(), &mut ser).unwrap();
    assert_eq!(ser.finish(), input);
}

/// Rebuilds a parse tree node by node through the serializer.
fn reserialize(node: Node<'_, '_>, ser: &mut Serializer) -> Result<()> {
    match node.content() {
        Content::Primitive(data) => ser.write_primitive(node.tag(), |buf| {
            buf.extend_from_slice(data);
            Ok(())
        }),
        Content::Constructed(children) => ser.write_constructed(node.tag(), |ser| {
            for child in children {
                reserialize(child, ser)?;
            }
            Ok(())
        }),
    }
}

#[test]
fn structural_round_trip_of_nested_input() {
    // SEQUENCE { INTEGER 1, SEQUENCE { OCTET STRING, BOOLEAN }, [0] { NULL } }
    let mut ser = Serializer::new();
    ser.write_constructed(vellum_asn1::Tag::SEQUENCE, |ser| {
        1i32.to_asn1(ser)?;
        ser.write_constructed(vellum_asn1::Tag::SEQUENCE, |ser| {
            vec![1u8, 2, 3].to_asn1(ser)?;
            true.to_asn1(ser)
        })?;
        ser.write_constructed(vellum_asn1::Tag::context_specific(0), |ser| {
            ().to_asn1(ser)
        })
    })
    .unwrap();
    let input = ser.finish();

    let asn1 = parse_der(&input).unwrap();
    let mut rebuilt = Serializer::new();
    reserialize(asn1.root(), &mut rebuilt).unwrap();
    assert_eq!(rebuilt.finish(), input);
}

#[test]
fn truncation_monotonicity() {
    let mut ser = Serializer::new();
    ser.write_constructed(vellum_asn1::Tag::SEQUENCE, |ser| {
        0x1234_5678i64.to_asn1(ser)?;
        ser.write_primitive(vellum_asn1::Tag::OCTET_STRING, |buf| {
            buf.extend_from_slice(&[0x5A; 180]);
            Ok(())
        })?;
        true.to_asn1(ser)
    })
    .unwrap();
    let input = ser.finish();

    parse_der(&input).unwrap();
    for cut in 0..input.len() {
        assert_eq!(
            parse_der(&input[..cut]).unwrap_err(),
            Asn1DerError::TruncatedField,
            "prefix of {} bytes must be truncated",
            cut
        );
    }
}

#[test]
fn length_strictness_leaves_one_accepted_form() {
    // content length 3: only the short form parses under DER
    let value = [0x01u8, 0x02, 0x03];
    let short: Vec<u8> = [&[0x04, 0x03][..], &value].concat();
    let long1: Vec<u8> = [&[0x04, 0x81, 0x03][..], &value].concat();
    let long2: Vec<u8> = [&[0x04, 0x82, 0x00, 0x03][..], &value].concat();

    assert!(parse_der(&short).is_ok());
    for bad in [&long1, &long2] {
        assert!(matches!(
            parse_der(bad).unwrap_err(),
            Asn1DerError::UnsupportedFieldLength(_)
        ));
        // BER accepts the redundant forms
        assert_eq!(
            Vec::<u8>::from_asn1(parse_ber(bad).unwrap().root()).unwrap(),
            value
        );
    }

    // content length 200: only the one-byte long form parses
    let body = vec![0xEEu8; 200];
    let minimal: Vec<u8> = [&[0x04, 0x81, 0xC8][..], &body].concat();
    let padded: Vec<u8> = [&[0x04, 0x82, 0x00, 0xC8][..], &body].concat();
    assert!(parse_der(&minimal).is_ok());
    assert!(parse_der(&padded).is_err());
}

#[test]
fn set_of_parse_serialize_agreement() {
    let values = [5i64, -3, 200, 1];
    let mut ser = Serializer::new();
    ser.write_set_of(&values).unwrap();
    let der = ser.finish();

    // parsing yields the same multiset, in canonical byte order
    let mut parsed: Vec<i64> = de::read_set_of(parse_der(&der).unwrap().root()).unwrap();
    let mut expected = values.to_vec();
    parsed.sort_unstable();
    expected.sort_unstable();
    assert_eq!(parsed, expected);

    // element order in the input list does not show on the wire
    let mut shuffled = values;
    shuffled.reverse();
    let mut ser = Serializer::new();
    ser.write_set_of(&shuffled).unwrap();
    assert_eq!(ser.finish(), der);

    // an unsorted SET OF is refused under DER but read under BER
    let unsorted = [0x31, 0x06, 0x02, 0x01, 0x02, 0x02, 0x01, 0x01];
    assert!(de::read_set_of::<i64>(parse_der(&unsorted).unwrap().root()).is_err());
    assert_eq!(
        de::read_set_of::<i64>(parse_ber(&unsorted).unwrap().root()).unwrap(),
        [2, 1]
    );
}

#[test]
fn set_of_bit_strings_seed_vector() {
    let elements = [
        BitString::from_bytes(vec![2]),
        BitString::from_bytes(vec![1]),
    ];
    let mut ser = Serializer::new();
    ser.write_set_of(&elements).unwrap();
    assert_eq!(
        ser.finish(),
        [0x31, 0x08, 0x03, 0x02, 0x00, 0x01, 0x03, 0x02, 0x00, 0x02]
    );
}

#[test]
fn oid_composition_seed_vector() {
    let oid: ObjectIdentifier = "1.2.840.113549.1.1.1".parse().unwrap();
    assert_eq!(
        to_der(&oid),
        [0x06, 0x09, 0x2A, 0x86, 0x48, 0x86, 0xF7, 0x0D, 0x01, 0x01, 0x01]
    );
}

#[test]
fn depth_and_node_ceilings_are_observable() {
    // sixty nested indefinite-length sequences in BER
    let mut input = vec![0x30, 0x80].repeat(60);
    input.extend([0x00, 0x00].repeat(60));
    assert_eq!(
        parse_ber(&input).unwrap_err(),
        Asn1DerError::InvalidObject("excessive stack depth")
    );
    // DER fails earlier, on the indefinite length itself
    assert!(matches!(
        parse_der(&input).unwrap_err(),
        Asn1DerError::UnsupportedFieldLength(_)
    ));

    // a flat sequence of 100,000 NULLs crosses the node ceiling
    let inner = [0x05u8, 0x00].repeat(100_000);
    let mut wide = vec![0x30, 0x83];
    wide.extend_from_slice(&(inner.len() as u32).to_be_bytes()[1..]);
    wide.extend_from_slice(&inner);
    assert_eq!(
        parse_der(&wide).unwrap_err(),
        Asn1DerError::InvalidObject("excessive number of nodes")
    );
}

#[test]
fn sequence_of_round_trip() {
    let values = [3i64, 1, 2];
    let mut ser = Serializer::new();
    ser.write_sequence_of(&values).unwrap();
    let der = ser.finish();
    let parsed: Vec<i64> = de::read_sequence_of(parse_der(&der).unwrap().root()).unwrap();
    assert_eq!(parsed, values);
}
