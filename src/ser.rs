//! YABE encoding.
//!
//! This module provides the [`Encoder`], which writes values to any
//! [`std::io::Write`] sink using the narrowest wire form for each item:
//!
//! - **Integers**: inline for `-32..=127`, otherwise the smallest of 16, 32 or 64 bits
//! - **Floats**: zero tag, half, single or double, whichever is exact
//! - **Strings**: inline length up to 63 bytes, otherwise a 16, 32 or 64-bit length
//! - **Containers**: short form with the count in the tag when it fits,
//!   otherwise the long form closed by an End marker
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use yabe::{encode, Value};
//!
//! let bytes = encode(&Value::from(200)).unwrap();
//! assert_eq!(&bytes[5..], &[0xC1, 0xC8, 0x00]);
//! ```
//!
//! ## Streaming
//!
//! The encoder can also emit items one at a time, without building a
//! [`Value`] first. Containers of unknown length use the long form and must be
//! closed with [`Encoder::write_end`]:
//!
//! ```rust
//! use yabe::{Encoder, Framing};
//!
//! let mut encoder = Encoder::new(Vec::new());
//! let framing = encoder.begin_sequence(None).unwrap();
//! assert_eq!(framing, Framing::Long);
//! for i in 0..3 {
//!     encoder.write_i64(i).unwrap();
//! }
//! encoder.write_end().unwrap();
//!
//! assert_eq!(encoder.into_inner(), vec![0xD7, 0x00, 0x01, 0x02, 0xCB]);
//! ```

use crate::float::FloatRepr;
use crate::tag::{self, Framing, LengthPrefix, Tag};
use crate::{Error, Result, Value, YabeOptions, MAGIC, VERSION};
use std::io;
use tracing::debug;

/// The YABE encoder.
///
/// Created via [`Encoder::new`] or [`Encoder::with_options`]; the options'
/// depth limit applies to [`Encoder::write_value`].
pub struct Encoder<W> {
    writer: W,
    scratch: Vec<u8>,
    depth: usize,
    max_depth: usize,
}

impl<W: io::Write> Encoder<W> {
    /// Creates an encoder with default options.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, &YabeOptions::default())
    }

    /// Creates an encoder using the depth limit from `options`.
    pub fn with_options(writer: W, options: &YabeOptions) -> Self {
        Encoder {
            writer,
            // a tag plus the widest fixed payload
            scratch: Vec::with_capacity(9),
            depth: 0,
            max_depth: options.max_depth,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.writer.write_all(bytes).map_err(|e| Error::io(&e))
    }

    fn flush_scratch(&mut self) -> Result<()> {
        let result = self.writer.write_all(&self.scratch).map_err(|e| Error::io(&e));
        self.scratch.clear();
        result
    }

    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_bytes(&[tag.to_byte()])
    }

    /// Writes the 4-byte magic and the version byte.
    pub fn write_header(&mut self) -> Result<()> {
        self.write_bytes(&MAGIC)?;
        self.write_bytes(&[VERSION])
    }

    pub fn write_null(&mut self) -> Result<()> {
        self.write_tag(Tag::Null)
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_tag(if value { Tag::True } else { Tag::False })
    }

    /// Writes an integer in its narrowest form.
    ///
    /// The inline form covers `-32..=127` only, so `200` takes the 16-bit form
    /// even though it fits in one unsigned byte.
    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        if (tag::FIXINT_MIN..=tag::FIXINT_MAX).contains(&value) {
            // two's complement low byte is the tag for both inline ranges
            return self.write_bytes(&[value as u8]);
        }

        if let Ok(n) = i16::try_from(value) {
            self.scratch.push(tag::INT16);
            self.scratch.extend_from_slice(&n.to_le_bytes());
        } else if let Ok(n) = i32::try_from(value) {
            self.scratch.push(tag::INT32);
            self.scratch.extend_from_slice(&n.to_le_bytes());
        } else {
            self.scratch.push(tag::INT64);
            self.scratch.extend_from_slice(&value.to_le_bytes());
        }
        self.flush_scratch()
    }

    /// Writes an unsigned integer, failing if it exceeds `i64::MAX`.
    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        let value = i64::try_from(value).map_err(|_| Error::integer_out_of_range(value))?;
        self.write_i64(value)
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        FloatRepr::from_f64(value).write_to(&mut self.scratch);
        self.flush_scratch()
    }

    pub fn write_str(&mut self, value: &str) -> Result<()> {
        LengthPrefix::for_str(value.len()).write_to(&mut self.scratch);
        self.flush_scratch()?;
        self.write_bytes(value.as_bytes())
    }

    /// Writes a blob: the tag, the MIME type as a string, then the payload
    /// behind an explicit length prefix.
    pub fn write_blob(&mut self, mimetype: &str, data: &[u8]) -> Result<()> {
        self.write_tag(Tag::Blob)?;
        self.write_str(mimetype)?;
        LengthPrefix::for_blob(data.len()).write_to(&mut self.scratch);
        self.flush_scratch()?;
        self.write_bytes(data)
    }

    /// Starts a sequence of `len` elements, or of unknown length when `None`.
    ///
    /// When the returned framing is [`Framing::Long`] the caller must finish
    /// the sequence with [`Encoder::write_end`].
    pub fn begin_sequence(&mut self, len: Option<usize>) -> Result<Framing> {
        let framing = Framing::for_sequence(len);
        match framing {
            Framing::Short(n) => self.write_tag(Tag::ShortSequence(n as u8))?,
            Framing::Long => self.write_tag(Tag::Sequence)?,
        }
        Ok(framing)
    }

    /// Starts a record of `len` fields, or of unknown length when `None`.
    ///
    /// Each field is written as a string name followed by a value. When the
    /// returned framing is [`Framing::Long`] the caller must finish the record
    /// with [`Encoder::write_end`].
    pub fn begin_record(&mut self, len: Option<usize>) -> Result<Framing> {
        let framing = Framing::for_record(len);
        match framing {
            Framing::Short(n) => self.write_tag(Tag::ShortRecord(n as u8))?,
            Framing::Long => self.write_tag(Tag::Record)?,
        }
        Ok(framing)
    }

    /// Closes a long-form sequence or record.
    pub fn write_end(&mut self) -> Result<()> {
        self.write_tag(Tag::End)
    }

    fn finish(&mut self, framing: Framing) -> Result<()> {
        match framing {
            Framing::Short(_) => Ok(()),
            Framing::Long => self.write_end(),
        }
    }

    fn nested<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        if self.depth >= self.max_depth {
            debug!(max_depth = self.max_depth, "value nesting too deep to encode");
            return Err(Error::TooDeep {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Writes a complete value, recursing into containers.
    pub fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_bool(*b),
            Value::Int(i) => self.write_i64(*i),
            Value::Float(f) => self.write_f64(*f),
            Value::Str(s) => self.write_str(s),
            Value::Blob(blob) => self.write_blob(&blob.mimetype, &blob.data),
            Value::Sequence(items) => self.nested(|enc| {
                let framing = enc.begin_sequence(Some(items.len()))?;
                for item in items {
                    enc.write_value(item)?;
                }
                enc.finish(framing)
            }),
            Value::Record(record) => self.nested(|enc| {
                let framing = enc.begin_record(Some(record.len()))?;
                for (name, value) in record.iter() {
                    enc.write_str(name)?;
                    enc.write_value(value)?;
                }
                enc.finish(framing)
            }),
        }
    }
}
