//! # yabe
//!
//! An encoder and decoder for YABE (Yet Another Binary Encoding), a compact,
//! self-describing binary format for JSON-like data.
//!
//! ## What is YABE?
//!
//! YABE encodes null, booleans, 64-bit integers, floats, UTF-8 strings, typed
//! binary blobs, sequences and records (ordered name/value lists) behind a
//! one-byte tag space. Small integers, short strings and small containers are
//! carried inside the tag byte itself; everything else uses the narrowest
//! width that represents the value exactly.
//!
//! ## Key Features
//!
//! - **Compact**: integers in `-32..=127` and strings up to 63 bytes need no
//!   extra length bytes, floats are narrowed to half or single precision when
//!   that loses nothing
//! - **Deterministic**: a given value always encodes to the same bytes
//! - **Order Preserving**: record fields decode in wire order, duplicates kept
//! - **Bounded**: nesting depth is capped, declared lengths are never trusted
//!   for allocation
//! - **No Unsafe Code**
//!
//! ## Quick Start
//!
//! ```rust
//! use yabe::{decode, encode, yabe};
//!
//! let value = yabe!({
//!     "name": "Alice",
//!     "age": 30,
//!     "scores": [1.5, 2.25]
//! });
//!
//! let bytes = encode(&value).unwrap();
//! assert_eq!(&bytes[..5], b"YABE\x00");
//!
//! let back = decode(&bytes).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! ### Streaming
//!
//! [`Encoder`] and [`Decoder`] expose the wire items one at a time, for data
//! that is produced or consumed incrementally:
//!
//! ```rust
//! use yabe::{Decoder, Encoder, Framing};
//!
//! let mut encoder = Encoder::new(Vec::new());
//! encoder.write_header().unwrap();
//! encoder.begin_record(None).unwrap();
//! encoder.write_str("id").unwrap();
//! encoder.write_i64(7).unwrap();
//! encoder.write_end().unwrap();
//! let bytes = encoder.into_inner();
//!
//! let mut decoder = Decoder::from_slice(&bytes);
//! decoder.read_header().unwrap();
//! assert_eq!(decoder.read_record_start().unwrap(), Framing::Long);
//! assert_eq!(decoder.read_field_name().unwrap(), "id");
//! assert_eq!(decoder.read_i64().unwrap(), 7);
//! assert!(decoder.next_is_end().unwrap());
//! ```
//!
//! ## Lossy Cases
//!
//! - Negative zero encodes as the zero tag and decodes as `+0.0`
//! - Every NaN encodes as one canonical half-precision NaN
//! - Integers outside the 64-bit signed range cannot be encoded
//!
//! ## Format
//!
//! See the [`format`] module for the byte-level layout.
//!
//! ## Examples
//!
//! The `demos/` directory holds runnable programs:
//!
//! - **`simple.rs`** - Encoding and decoding a document
//! - **`streaming.rs`** - Writing and reading items one at a time
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod error;
pub mod float;
pub mod format;
pub mod macros;
pub mod options;
pub mod read;
pub mod record;
pub mod ser;
pub mod tag;
pub mod value;

pub use de::Decoder;
pub use error::{Error, Result};
pub use options::YabeOptions;
pub use read::{IoRead, SliceRead};
pub use record::Record;
pub use ser::Encoder;
pub use tag::{Framing, Tag};
pub use value::{Blob, Value};

use std::io;
use tracing::trace;

/// The four bytes every YABE stream starts with.
pub const MAGIC: [u8; 4] = *b"YABE";

/// The only format version this crate reads and writes.
pub const VERSION: u8 = 0;

/// Encode a value as a complete YABE stream (header included).
///
/// # Examples
///
/// ```rust
/// use yabe::{encode, Value};
///
/// let bytes = encode(&Value::from(200)).unwrap();
/// assert_eq!(bytes, b"YABE\x00\xC1\xC8\x00");
/// ```
///
/// # Errors
///
/// Returns [`Error::TooDeep`] if the value nests deeper than the default limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    encode_with_options(value, &YabeOptions::default())
}

/// Encode a value as a complete YABE stream with custom options.
///
/// # Examples
///
/// ```rust
/// use yabe::{encode_with_options, yabe, Error, YabeOptions};
///
/// let nested = yabe!([[[1]]]);
/// let options = YabeOptions::new().with_max_depth(2);
/// assert_eq!(
///     encode_with_options(&nested, &options),
///     Err(Error::TooDeep { max_depth: 2 })
/// );
/// ```
///
/// # Errors
///
/// Returns [`Error::TooDeep`] if the value nests deeper than `options.max_depth`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(value: &Value, options: &YabeOptions) -> Result<Vec<u8>> {
    let mut encoder = Encoder::with_options(Vec::new(), options);
    encoder.write_header()?;
    encoder.write_value(value)?;
    let bytes = encoder.into_inner();
    trace!(len = bytes.len(), "encoded value");
    Ok(bytes)
}

/// Encode a value as a complete YABE stream into a writer.
///
/// The writer receives bytes as each item is encoded. Wrap unbuffered sinks
/// in a [`std::io::BufWriter`].
///
/// # Examples
///
/// ```rust
/// use yabe::{encode_to_writer, Value};
///
/// let mut buffer = Vec::new();
/// encode_to_writer(&mut buffer, &Value::Null).unwrap();
/// assert_eq!(buffer, b"YABE\x00\xC0");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the writer fails, or [`Error::TooDeep`] as for
/// [`encode`].
pub fn encode_to_writer<W>(writer: W, value: &Value) -> Result<()>
where
    W: io::Write,
{
    let mut encoder = Encoder::new(writer);
    encoder.write_header()?;
    encoder.write_value(value)
}

/// Decode a complete YABE stream.
///
/// Bytes after the first value are ignored; use [`YabeOptions::strict`] to
/// reject them.
///
/// # Examples
///
/// ```rust
/// use yabe::{decode, Value};
///
/// let value = decode(b"YABE\x00\x83abc").unwrap();
/// assert_eq!(value, Value::from("abc"));
/// ```
///
/// # Errors
///
/// Returns an error if the header is invalid or the value is malformed.
/// Decode errors carry the byte offset they were detected at.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode(bytes: &[u8]) -> Result<Value> {
    decode_with_options(bytes, &YabeOptions::default())
}

/// Decode a complete YABE stream with custom options.
///
/// # Errors
///
/// As [`decode`], plus [`Error::TrailingBytes`] when
/// `options.reject_trailing_bytes` is set and input remains.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_with_options(bytes: &[u8], options: &YabeOptions) -> Result<Value> {
    let mut decoder = Decoder::with_options(SliceRead::new(bytes), options);
    decoder.read_header()?;
    let value = decoder.read_value()?;
    if options.reject_trailing_bytes {
        decoder.end()?;
    }
    Ok(value)
}

/// Decode the first YABE stream in `bytes`, returning the value and the
/// number of bytes it occupied.
///
/// # Examples
///
/// ```rust
/// use yabe::{decode_prefix, encode, Value};
///
/// let mut bytes = encode(&Value::from(1)).unwrap();
/// bytes.extend(encode(&Value::from(2)).unwrap());
///
/// let (first, used) = decode_prefix(&bytes).unwrap();
/// assert_eq!(first, Value::from(1));
/// let (second, _) = decode_prefix(&bytes[used..]).unwrap();
/// assert_eq!(second, Value::from(2));
/// ```
///
/// # Errors
///
/// As [`decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_prefix(bytes: &[u8]) -> Result<(Value, usize)> {
    let mut decoder = Decoder::from_slice(bytes);
    decoder.read_header()?;
    let value = decoder.read_value()?;
    let used = bytes.len() - decoder.remaining().len();
    Ok((value, used))
}

/// Decode one YABE stream from a reader.
///
/// Reading stops right after the value; nothing beyond it is consumed except
/// at most one byte of lookahead, which is never taken at the end of a value.
///
/// # Examples
///
/// ```rust
/// use yabe::{decode_from_reader, Value};
/// use std::io::Cursor;
///
/// let value = decode_from_reader(Cursor::new(b"YABE\x00\xC9")).unwrap();
/// assert_eq!(value, Value::Bool(true));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if the reader fails, otherwise as [`decode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn decode_from_reader<R>(reader: R) -> Result<Value>
where
    R: io::Read,
{
    let mut decoder = Decoder::from_reader(reader);
    decoder.read_header()?;
    decoder.read_value()
}
