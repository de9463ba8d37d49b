//! Malformed and hostile input.
//!
//! Every case here must fail with a specific error and never panic or
//! allocate according to an unchecked length.

use std::io::Cursor;
use yabe::{
    decode, decode_from_reader, decode_prefix, decode_with_options, encode, encode_with_options,
    yabe, Decoder, Error, Value, YabeOptions,
};

fn with_header(body: &[u8]) -> Vec<u8> {
    let mut bytes = b"YABE\x00".to_vec();
    bytes.extend_from_slice(body);
    bytes
}

fn nested_sequences(levels: usize) -> Value {
    let mut value = Value::Null;
    for _ in 0..levels {
        value = Value::Sequence(vec![value]);
    }
    value
}

#[test]
fn test_bad_signature() {
    assert_eq!(
        decode(b"JSON\x00\xC0"),
        Err(Error::BadSignature {
            found: b"JSON".to_vec()
        })
    );
    assert_eq!(
        decode(b"YA"),
        Err(Error::BadSignature {
            found: b"YA".to_vec()
        })
    );
    assert_eq!(
        decode(b"YABE"),
        Err(Error::BadSignature {
            found: b"YABE".to_vec()
        })
    );
}

#[test]
fn test_unsupported_version() {
    assert_eq!(decode(b"YABE\x01\xC0"), Err(Error::UnsupportedVersion(1)));
    assert_eq!(decode(b"YABE\xFF"), Err(Error::UnsupportedVersion(255)));
}

#[test]
fn test_missing_value() {
    assert_eq!(
        decode(b"YABE\x00"),
        Err(Error::Truncated {
            offset: 5,
            expected: "tag byte"
        })
    );
}

#[test]
fn test_end_marker_is_not_a_value() {
    assert_eq!(
        decode(&with_header(&[0xCB])),
        Err(Error::UnexpectedTerminator { offset: 5 })
    );
    assert_eq!(
        decode(&with_header(&[0xD3, 0x01, 0xCB])),
        Err(Error::UnexpectedTerminator { offset: 7 })
    );
}

#[test]
fn test_unterminated_long_forms() {
    assert!(matches!(
        decode(&with_header(&[0xD7, 0x01, 0x02])),
        Err(Error::Truncated { offset: 8, .. })
    ));
    assert!(matches!(
        decode(&with_header(&[0xDF, 0x81, b'a', 0x01])),
        Err(Error::Truncated { offset: 9, .. })
    ));
}

#[test]
fn test_non_string_field_name() {
    let err = decode(&with_header(&[0xD9, 0xC9, 0x01])).unwrap_err();
    assert_eq!(
        err,
        Error::InvalidFieldName {
            offset: 6,
            found: "boolean"
        }
    );
    assert_eq!(err.offset(), Some(6));
}

#[test]
fn test_invalid_utf8() {
    let err = decode(&with_header(&[0x83, b'a', 0xFF, b'b'])).unwrap_err();
    assert!(matches!(err, Error::InvalidUtf8 { offset: 6, .. }));
}

#[test]
fn test_short_record_of_six_decodes() {
    let body = [
        0xDE, 0x81, b'a', 1, 0x81, b'b', 2, 0x81, b'c', 3, 0x81, b'd', 4, 0x81, b'e', 5, 0x81,
        b'f', 6,
    ];
    let value = decode(&with_header(&body)).unwrap();
    assert_eq!(
        value,
        yabe!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6})
    );

    // re-encoding switches to the long form
    assert_eq!(encode(&value).unwrap()[5], 0xDF);
}

#[test]
fn test_length_prefix_past_end() {
    // Str32 announcing 4 GiB
    let err = decode(&with_header(&[0xCE, 0xFF, 0xFF, 0xFF, 0xFF, b'x'])).unwrap_err();
    assert_eq!(
        err,
        Error::Truncated {
            offset: 10,
            expected: "string bytes"
        }
    );

    // Str64 with a truncated length field
    let err = decode(&with_header(&[0xCF, 0x01, 0x02])).unwrap_err();
    assert!(matches!(err, Error::Truncated { offset: 6, .. }));
}

#[test]
fn test_hostile_length_from_reader() {
    let bytes = with_header(&[0xCA, 0x80, 0xCF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]);
    let err = decode_from_reader(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, Error::Truncated { .. }));
}

#[test]
fn test_blob_mimetype_must_be_string() {
    assert_eq!(
        decode(&with_header(&[0xCA, 0xC0, 0xCD, 0x00, 0x00])),
        Err(Error::UnexpectedTag {
            offset: 6,
            tag: 0xC0,
            expected: "blob mimetype string"
        })
    );
}

#[test]
fn test_end_marker_inside_blob() {
    assert_eq!(
        decode(&with_header(&[0xCA, 0xCB])),
        Err(Error::UnexpectedTerminator { offset: 6 })
    );
    assert_eq!(
        decode(&with_header(&[0xCA, 0x80, 0xCB])),
        Err(Error::UnexpectedTerminator { offset: 7 })
    );
}

#[test]
fn test_decode_depth_limit() {
    let mut body = vec![0xD1; 129];
    body.push(0xC0);
    assert_eq!(
        decode(&with_header(&body)),
        Err(Error::TooDeep { max_depth: 128 })
    );

    let options = YabeOptions::new().with_max_depth(200);
    assert!(decode_with_options(&with_header(&body), &options).is_ok());
}

#[test]
fn test_unterminated_deep_nesting_fails_cleanly() {
    let body = vec![0xD7; 100_000];
    assert_eq!(
        decode(&with_header(&body)),
        Err(Error::TooDeep { max_depth: 128 })
    );
}

#[test]
fn test_encode_depth_limit() {
    assert!(encode(&nested_sequences(128)).is_ok());
    assert_eq!(
        encode(&nested_sequences(129)),
        Err(Error::TooDeep { max_depth: 128 })
    );

    let options = YabeOptions::new().with_max_depth(1);
    assert!(encode_with_options(&yabe!([1, 2]), &options).is_ok());
    assert!(encode_with_options(&yabe!([[1]]), &options).is_err());
}

#[test]
fn test_trailing_bytes() {
    let bytes = with_header(&[0x01, 0x02]);
    assert_eq!(decode(&bytes).unwrap(), Value::from(1));
    assert_eq!(
        decode_with_options(&bytes, &YabeOptions::strict()),
        Err(Error::TrailingBytes { offset: 6 })
    );
    assert_eq!(decode_prefix(&bytes).unwrap(), (Value::from(1), 6));
}

#[test]
fn test_reader_matches_slice() {
    let value = yabe!({"list": [1, 2, 3, 4, 5, 6, 7], "s": "text"});
    let bytes = encode(&value).unwrap();
    assert_eq!(decode_from_reader(Cursor::new(&bytes)).unwrap(), value);

    let truncated = &bytes[..bytes.len() - 1];
    assert!(matches!(
        decode_from_reader(Cursor::new(truncated)),
        Err(Error::Truncated { .. })
    ));
}

#[test]
fn test_streaming_reader_over_io() {
    let bytes = with_header(&[0xD7, 0x83, b'a', b'b', b'c', 0xC5, 0x00, 0x3E, 0xCB]);
    let mut decoder = Decoder::from_reader(Cursor::new(bytes));
    decoder.read_header().unwrap();
    decoder.read_sequence_start().unwrap();
    assert_eq!(decoder.read_str().unwrap(), "abc");
    assert_eq!(decoder.read_f64().unwrap(), 1.5);
    assert!(decoder.next_is_end().unwrap());
    assert_eq!(decoder.offset(), 14);
    assert!(decoder.end().is_ok());
}
