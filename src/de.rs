//! YABE decoding.
//!
//! This module provides the [`Decoder`], which reads values back from a byte
//! source, dispatching on each leading tag byte.
//!
//! ## Overview
//!
//! - **Single pass**: every byte is read once, no backtracking
//! - **Bounded nesting**: containers deeper than the configured limit fail
//!   with [`Error::TooDeep`] instead of exhausting the stack
//! - **No partial results**: a value is returned complete or not at all
//! - **Offsets**: errors report the byte offset they were detected at
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use yabe::{decode, Value};
//!
//! let value = decode(&[b'Y', b'A', b'B', b'E', 0x00, 0xC1, 0xC8, 0x00]).unwrap();
//! assert_eq!(value, Value::Int(200));
//! ```
//!
//! ## Streaming
//!
//! Items can also be read one at a time with the typed readers:
//!
//! ```rust
//! use yabe::{Decoder, Framing};
//!
//! let bytes = [0xD7, 0x01, 0x02, 0x03, 0xCB];
//! let mut decoder = Decoder::from_slice(&bytes);
//!
//! assert_eq!(decoder.read_sequence_start().unwrap(), Framing::Long);
//! let mut sum = 0;
//! while !decoder.next_is_end().unwrap() {
//!     sum += decoder.read_i64().unwrap();
//! }
//! assert_eq!(sum, 6);
//! ```

use crate::float::FloatRepr;
use crate::read::{IoRead, Read, SliceRead};
use crate::tag::{self, Framing, Tag};
use crate::{Blob, Error, Record, Result, Value, YabeOptions, MAGIC, VERSION};
use std::io;
use tracing::debug;

/// The YABE decoder.
///
/// Created via [`Decoder::from_slice`], [`Decoder::from_reader`] or
/// [`Decoder::with_options`].
pub struct Decoder<R> {
    read: R,
    depth: usize,
    max_depth: usize,
}

impl<'a> Decoder<SliceRead<'a>> {
    /// Creates a decoder over a borrowed byte slice.
    pub fn from_slice(slice: &'a [u8]) -> Self {
        Decoder::new(SliceRead::new(slice))
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        self.read.remaining()
    }
}

impl<R: io::Read> Decoder<IoRead<R>> {
    /// Creates a decoder over any [`std::io::Read`].
    pub fn from_reader(reader: R) -> Self {
        Decoder::new(IoRead::new(reader))
    }
}

impl<R: Read> Decoder<R> {
    /// Creates a decoder with default options.
    pub fn new(read: R) -> Self {
        Self::with_options(read, &YabeOptions::default())
    }

    /// Creates a decoder using the depth limit from `options`.
    pub fn with_options(read: R, options: &YabeOptions) -> Self {
        Decoder {
            read,
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    /// Number of bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.read.offset()
    }

    pub fn into_inner(self) -> R {
        self.read
    }

    /// Reads and validates the 5-byte stream header, returning its version.
    pub fn read_header(&mut self) -> Result<u8> {
        let mut header = Vec::with_capacity(MAGIC.len() + 1);
        while header.len() <= MAGIC.len() {
            match self.read.next()? {
                Some(byte) => header.push(byte),
                None => break,
            }
        }

        if header.len() <= MAGIC.len() || header[..MAGIC.len()] != MAGIC {
            header.truncate(MAGIC.len());
            debug!(found = ?header, "rejecting stream with bad signature");
            return Err(Error::BadSignature { found: header });
        }

        let version = header[MAGIC.len()];
        if version != VERSION {
            debug!(version, "rejecting stream with unsupported version");
            return Err(Error::UnsupportedVersion(version));
        }
        Ok(version)
    }

    fn next_tag(&mut self) -> Result<(Tag, u64)> {
        let at = self.read.offset();
        let byte = self
            .read
            .next()?
            .ok_or_else(|| Error::truncated(at, "tag byte"))?;
        let tag = Tag::classify(byte).ok_or(Error::UnknownTag {
            offset: at,
            tag: byte,
        })?;
        Ok((tag, at))
    }

    /// Consumes the next tag byte.
    pub fn read_tag(&mut self) -> Result<Tag> {
        self.next_tag().map(|(tag, _)| tag)
    }

    /// Returns the next tag without consuming it, or `None` at the end of input.
    pub fn peek_tag(&mut self) -> Result<Option<Tag>> {
        match self.read.peek()? {
            None => Ok(None),
            Some(byte) => Tag::classify(byte).map(Some).ok_or(Error::UnknownTag {
                offset: self.read.offset(),
                tag: byte,
            }),
        }
    }

    /// Consumes an End marker if one is next.
    ///
    /// Returns `false` at the end of input; the next read then reports the
    /// truncation.
    pub fn next_is_end(&mut self) -> Result<bool> {
        if self.read.peek()? == Some(tag::END) {
            self.read.next()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Fails with [`Error::TrailingBytes`] unless the input is exhausted.
    pub fn end(&mut self) -> Result<()> {
        match self.read.peek()? {
            None => Ok(()),
            Some(_) => {
                let offset = self.read.offset();
                debug!(offset, "rejecting trailing bytes after value");
                Err(Error::TrailingBytes { offset })
            }
        }
    }

    fn read_array<const N: usize>(&mut self, expected: &'static str) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.read.read_exact(&mut buf, expected)?;
        Ok(buf)
    }

    fn unexpected(tag: Tag, at: u64, expected: &'static str) -> Error {
        Error::UnexpectedTag {
            offset: at,
            tag: tag.to_byte(),
            expected,
        }
    }

    fn int_payload(&mut self, tag: Tag, at: u64) -> Result<i64> {
        match tag {
            Tag::PosFixInt(v) => Ok(i64::from(v)),
            Tag::NegFixInt(v) => Ok(i64::from(v)),
            Tag::Int16 => Ok(i64::from(i16::from_le_bytes(self.read_array("int16 payload")?))),
            Tag::Int32 => Ok(i64::from(i32::from_le_bytes(self.read_array("int32 payload")?))),
            Tag::Int64 => Ok(i64::from_le_bytes(self.read_array("int64 payload")?)),
            _ => Err(Self::unexpected(tag, at, "integer")),
        }
    }

    fn float_payload(&mut self, tag: Tag, at: u64) -> Result<f64> {
        let repr = match tag {
            Tag::FloatZero => FloatRepr::Zero,
            Tag::Float16 => FloatRepr::Half(u16::from_le_bytes(self.read_array("float16 payload")?)),
            Tag::Float32 => {
                FloatRepr::Single(u32::from_le_bytes(self.read_array("float32 payload")?))
            }
            Tag::Float64 => {
                FloatRepr::Double(u64::from_le_bytes(self.read_array("float64 payload")?))
            }
            _ => return Err(Self::unexpected(tag, at, "float")),
        };
        Ok(repr.to_f64())
    }

    // Length announced by a string tag; blob payloads reuse the same prefixes.
    fn length(&mut self, tag: Tag, at: u64, expected: &'static str) -> Result<u64> {
        match tag {
            Tag::ShortStr(len) => Ok(u64::from(len)),
            Tag::Str16 => Ok(u64::from(u16::from_le_bytes(self.read_array("16-bit length")?))),
            Tag::Str32 => Ok(u64::from(u32::from_le_bytes(self.read_array("32-bit length")?))),
            Tag::Str64 => Ok(u64::from_le_bytes(self.read_array("64-bit length")?)),
            _ => Err(Self::unexpected(tag, at, expected)),
        }
    }

    fn str_payload(&mut self, tag: Tag, at: u64) -> Result<String> {
        let len = self.length(tag, at, "string")?;
        let start = self.read.offset();
        let bytes = self.read.read_vec(len, "string bytes")?;
        String::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
            offset: start,
            source: e.utf8_error(),
        })
    }

    fn blob_payload(&mut self) -> Result<Blob> {
        let (tag, at) = self.next_tag()?;
        match tag {
            Tag::End => return Err(Error::UnexpectedTerminator { offset: at }),
            _ if !tag.is_str() => {
                return Err(Self::unexpected(tag, at, "blob mimetype string"));
            }
            _ => {}
        }
        let mimetype = self.str_payload(tag, at)?;

        // Inline lengths are not emitted for blobs here but other encoders use them.
        let (tag, at) = self.next_tag()?;
        if tag == Tag::End {
            return Err(Error::UnexpectedTerminator { offset: at });
        }
        let len = self.length(tag, at, "blob payload length")?;
        let data = self.read.read_vec(len, "blob payload")?;
        Ok(Blob { mimetype, data })
    }

    fn field_name(&mut self, tag: Tag, at: u64) -> Result<String> {
        match tag {
            Tag::End => Err(Error::UnexpectedTerminator { offset: at }),
            _ if tag.is_str() => self.str_payload(tag, at),
            _ => Err(Error::InvalidFieldName {
                offset: at,
                found: tag.describe(),
            }),
        }
    }

    fn nested<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        if self.depth >= self.max_depth {
            debug!(
                max_depth = self.max_depth,
                offset = self.read.offset(),
                "input nesting too deep to decode"
            );
            return Err(Error::TooDeep {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn value_from_tag(&mut self, tag: Tag, at: u64) -> Result<Value> {
        match tag {
            Tag::Null => Ok(Value::Null),
            Tag::False => Ok(Value::Bool(false)),
            Tag::True => Ok(Value::Bool(true)),
            Tag::PosFixInt(_) | Tag::NegFixInt(_) | Tag::Int16 | Tag::Int32 | Tag::Int64 => {
                self.int_payload(tag, at).map(Value::Int)
            }
            Tag::FloatZero | Tag::Float16 | Tag::Float32 | Tag::Float64 => {
                self.float_payload(tag, at).map(Value::Float)
            }
            Tag::ShortStr(_) | Tag::Str16 | Tag::Str32 | Tag::Str64 => {
                self.str_payload(tag, at).map(Value::Str)
            }
            Tag::Blob => self.blob_payload().map(Value::Blob),
            Tag::End => Err(Error::UnexpectedTerminator { offset: at }),
            Tag::ShortSequence(n) => self.nested(|de| {
                let mut items = Vec::with_capacity(usize::from(n));
                for _ in 0..n {
                    items.push(de.read_value()?);
                }
                Ok(Value::Sequence(items))
            }),
            Tag::Sequence => self.nested(|de| {
                let mut items = Vec::new();
                loop {
                    let (tag, at) = de.next_tag()?;
                    if tag == Tag::End {
                        return Ok(Value::Sequence(items));
                    }
                    items.push(de.value_from_tag(tag, at)?);
                }
            }),
            Tag::ShortRecord(n) => self.nested(|de| {
                let mut record = Record::with_capacity(usize::from(n));
                for _ in 0..n {
                    let name = de.read_field_name()?;
                    record.push(name, de.read_value()?);
                }
                Ok(Value::Record(record))
            }),
            Tag::Record => self.nested(|de| {
                let mut record = Record::new();
                loop {
                    let (tag, at) = de.next_tag()?;
                    if tag == Tag::End {
                        return Ok(Value::Record(record));
                    }
                    let name = de.field_name(tag, at)?;
                    record.push(name, de.read_value()?);
                }
            }),
        }
    }

    /// Reads one complete value, recursing into containers.
    pub fn read_value(&mut self) -> Result<Value> {
        let (tag, at) = self.next_tag()?;
        self.value_from_tag(tag, at)
    }

    /// Consumes one complete value without returning it.
    pub fn skip_value(&mut self) -> Result<()> {
        self.read_value().map(drop)
    }

    pub fn read_null(&mut self) -> Result<()> {
        match self.next_tag()? {
            (Tag::Null, _) => Ok(()),
            (tag, at) => Err(Self::unexpected(tag, at, "null")),
        }
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.next_tag()? {
            (Tag::False, _) => Ok(false),
            (Tag::True, _) => Ok(true),
            (tag, at) => Err(Self::unexpected(tag, at, "boolean")),
        }
    }

    /// Reads an integer of any wire width.
    pub fn read_i64(&mut self) -> Result<i64> {
        let (tag, at) = self.next_tag()?;
        self.int_payload(tag, at)
    }

    /// Reads a float of any wire width. Integers are not accepted.
    pub fn read_f64(&mut self) -> Result<f64> {
        let (tag, at) = self.next_tag()?;
        self.float_payload(tag, at)
    }

    pub fn read_str(&mut self) -> Result<String> {
        let (tag, at) = self.next_tag()?;
        self.str_payload(tag, at)
    }

    pub fn read_blob(&mut self) -> Result<Blob> {
        match self.next_tag()? {
            (Tag::Blob, _) => self.blob_payload(),
            (tag, at) => Err(Self::unexpected(tag, at, "blob")),
        }
    }

    /// Reads a record field name, which must be a string.
    pub fn read_field_name(&mut self) -> Result<String> {
        let (tag, at) = self.next_tag()?;
        self.field_name(tag, at)
    }

    /// Reads a sequence tag. For [`Framing::Long`], read elements until
    /// [`Decoder::next_is_end`] returns `true`.
    pub fn read_sequence_start(&mut self) -> Result<Framing> {
        match self.next_tag()? {
            (Tag::ShortSequence(n), _) => Ok(Framing::Short(usize::from(n))),
            (Tag::Sequence, _) => Ok(Framing::Long),
            (tag, at) => Err(Self::unexpected(tag, at, "sequence")),
        }
    }

    /// Reads a record tag. Fields follow as name/value pairs.
    pub fn read_record_start(&mut self) -> Result<Framing> {
        match self.next_tag()? {
            (Tag::ShortRecord(n), _) => Ok(Framing::Short(usize::from(n))),
            (Tag::Record, _) => Ok(Framing::Long),
            (tag, at) => Err(Self::unexpected(tag, at, "record")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoded(bytes: &[u8]) -> Result<Value> {
        Decoder::from_slice(bytes).read_value()
    }

    #[test]
    fn test_inline_integers() {
        assert_eq!(decoded(&[0x00]).unwrap(), Value::Int(0));
        assert_eq!(decoded(&[0x7F]).unwrap(), Value::Int(127));
        assert_eq!(decoded(&[0xE0]).unwrap(), Value::Int(-32));
        assert_eq!(decoded(&[0xFF]).unwrap(), Value::Int(-1));
    }

    #[test]
    fn test_wide_integers() {
        assert_eq!(decoded(&[0xC1, 0xC8, 0x00]).unwrap(), Value::Int(200));
        assert_eq!(decoded(&[0xC1, 0x10, 0x00]).unwrap(), Value::Int(16));
        assert_eq!(
            decoded(&[0xC2, 0x40, 0x9C, 0x00, 0x00]).unwrap(),
            Value::Int(40000)
        );
        assert_eq!(
            decoded(&[0xC3, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]).unwrap(),
            Value::Int(i64::MAX)
        );
    }

    #[test]
    fn test_truncated_payloads() {
        assert_eq!(
            decoded(&[0xC2]),
            Err(Error::truncated(1, "int32 payload"))
        );
        assert_eq!(decoded(&[]), Err(Error::truncated(0, "tag byte")));
        assert_eq!(
            decoded(&[0x85, b'a', b'b']),
            Err(Error::truncated(1, "string bytes"))
        );
        assert_eq!(decoded(&[0xD2, 0x01]), Err(Error::truncated(2, "tag byte")));
        assert_eq!(decoded(&[0xD7, 0x01, 0x02]), Err(Error::truncated(3, "tag byte")));
    }

    #[test]
    fn test_end_marker_placement() {
        assert_eq!(
            decoded(&[0xCB]),
            Err(Error::UnexpectedTerminator { offset: 0 })
        );
        // a short sequence has no terminator
        assert_eq!(
            decoded(&[0xD2, 0x01, 0xCB]),
            Err(Error::UnexpectedTerminator { offset: 2 })
        );
        // a long record needs a value after each name
        assert_eq!(
            decoded(&[0xDF, 0x81, b'a', 0xCB]),
            Err(Error::UnexpectedTerminator { offset: 3 })
        );
    }

    #[test]
    fn test_reserved_tag() {
        assert_eq!(
            decoded(&[0xD1, 0xCC]),
            Err(Error::UnknownTag {
                offset: 1,
                tag: 0xCC
            })
        );
    }

    #[test]
    fn test_field_names_must_be_strings() {
        assert_eq!(
            decoded(&[0xD9, 0x01, 0x02]),
            Err(Error::InvalidFieldName {
                offset: 1,
                found: "integer"
            })
        );
        assert_eq!(
            decoded(&[0xDF, 0xC0, 0x01, 0xCB]),
            Err(Error::InvalidFieldName {
                offset: 1,
                found: "null"
            })
        );
    }

    #[test]
    fn test_short_record_of_six_accepted() {
        let mut bytes = vec![0xDE];
        for (i, name) in ["a", "b", "c", "d", "e", "f"].iter().enumerate() {
            bytes.push(0x81);
            bytes.push(name.as_bytes()[0]);
            bytes.push(i as u8);
        }
        let value = decoded(&bytes).unwrap();
        let record = value.as_record().unwrap();
        assert_eq!(record.len(), 6);
        assert_eq!(record.get("f"), Some(&Value::Int(5)));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            decoded(&[0x82, 0xC3, 0x28]),
            Err(Error::InvalidUtf8 { offset: 1, .. })
        ));
    }

    #[test]
    fn test_blob_lengths() {
        // explicit 16-bit prefix
        let bytes = [0xCA, 0x80, 0xCD, 0x01, 0x00, 0xAB];
        assert_eq!(
            decoded(&bytes).unwrap(),
            Value::Blob(Blob::new("", vec![0xAB]))
        );
        // inline prefix from older encoders
        let bytes = [0xCA, 0x81, b'x', 0x82, 0x01, 0x02];
        assert_eq!(
            decoded(&bytes).unwrap(),
            Value::Blob(Blob::new("x", vec![1, 2]))
        );
        // mimetype must be a string
        assert_eq!(
            decoded(&[0xCA, 0x01]),
            Err(Error::UnexpectedTag {
                offset: 1,
                tag: 0x01,
                expected: "blob mimetype string"
            })
        );
        // hostile 64-bit length
        let bytes = [0xCA, 0x80, 0xCF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert!(matches!(decoded(&bytes), Err(Error::Truncated { .. })));
    }

    #[test]
    fn test_depth_limit() {
        let mut bytes = vec![0xD1; 10];
        bytes.push(0xC0);

        let options = YabeOptions::new().with_max_depth(9);
        let mut decoder = Decoder::with_options(SliceRead::new(&bytes), &options);
        assert_eq!(decoder.read_value(), Err(Error::TooDeep { max_depth: 9 }));

        let options = YabeOptions::new().with_max_depth(10);
        let mut decoder = Decoder::with_options(SliceRead::new(&bytes), &options);
        assert!(decoder.read_value().is_ok());
    }

    #[test]
    fn test_typed_reads() {
        let bytes = [0xC5, 0x00, 0x3E, 0x83, b'a', b'b', b'c', 0xC9, 0xC0, 0x05];
        let mut decoder = Decoder::from_slice(&bytes);
        assert_eq!(decoder.read_f64().unwrap(), 1.5);
        assert_eq!(decoder.read_str().unwrap(), "abc");
        assert!(decoder.read_bool().unwrap());
        decoder.read_null().unwrap();
        assert_eq!(
            decoder.read_str(),
            Err(Error::UnexpectedTag {
                offset: 9,
                tag: 0x05,
                expected: "string"
            })
        );
    }

    #[test]
    fn test_header_validation() {
        let mut decoder = Decoder::from_slice(b"YABE\x00");
        assert_eq!(decoder.read_header().unwrap(), 0);

        let mut decoder = Decoder::from_slice(b"YAB");
        assert_eq!(
            decoder.read_header(),
            Err(Error::BadSignature {
                found: b"YAB".to_vec()
            })
        );

        let mut decoder = Decoder::from_slice(b"YABE\x01");
        assert_eq!(decoder.read_header(), Err(Error::UnsupportedVersion(1)));
    }

    #[test]
    fn test_peek_and_remaining() {
        let bytes = [0x01, 0x02];
        let mut decoder = Decoder::from_slice(&bytes);
        assert_eq!(decoder.peek_tag().unwrap(), Some(Tag::PosFixInt(1)));
        decoder.skip_value().unwrap();
        assert_eq!(decoder.remaining(), &[0x02]);
        assert!(decoder.end().is_err());
        decoder.skip_value().unwrap();
        assert_eq!(decoder.peek_tag().unwrap(), None);
        assert!(decoder.end().is_ok());
    }
}
