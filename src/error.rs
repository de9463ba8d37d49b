//! Error types for YABE encoding and decoding.
//!
//! Every failure aborts the current encode or decode call; nothing is
//! recovered or retried internally, and decoding never yields a partial value.
//!
//! ## Error Categories
//!
//! - **Header errors**: [`Error::BadSignature`], [`Error::UnsupportedVersion`]
//! - **Framing errors**: [`Error::Truncated`], [`Error::UnknownTag`],
//!   [`Error::UnexpectedTerminator`], [`Error::UnexpectedTag`],
//!   [`Error::TrailingBytes`]
//! - **Content errors**: [`Error::InvalidFieldName`], [`Error::InvalidUtf8`],
//!   [`Error::IntegerOutOfRange`]
//! - **Resource errors**: [`Error::TooDeep`], [`Error::Io`]
//!
//! ## Error Context
//!
//! Decode errors carry the byte offset (counted from the start of the input,
//! header included) at which the problem was detected.
//!
//! ## Examples
//!
//! ```rust
//! use yabe::{decode, Error};
//!
//! let result = decode(b"YABE\x00\xC2");
//! assert!(matches!(result, Err(Error::Truncated { .. })));
//!
//! if let Err(err) = result {
//!     eprintln!("Decode error: {}", err);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding YABE data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The stream does not start with the `YABE` magic bytes.
    #[error("Not a YABE stream: bad signature {found:02x?}")]
    BadSignature { found: Vec<u8> },

    /// The header version byte is not one this codec understands.
    #[error("Unsupported YABE version {0}")]
    UnsupportedVersion(u8),

    /// The input ended before a declared tag, length or payload was complete.
    #[error("Truncated input at offset {offset}: expected {expected}")]
    Truncated { offset: u64, expected: &'static str },

    /// A tag byte falls in a reserved slot.
    #[error("Unknown tag 0x{tag:02X} at offset {offset}")]
    UnknownTag { offset: u64, tag: u8 },

    /// An End marker appeared where a value was expected.
    #[error("Unexpected end marker at offset {offset}")]
    UnexpectedTerminator { offset: u64 },

    /// A valid tag appeared where a different kind of item was required.
    #[error("Unexpected tag 0x{tag:02X} at offset {offset}: expected {expected}")]
    UnexpectedTag {
        offset: u64,
        tag: u8,
        expected: &'static str,
    },

    /// A record field name did not decode to a string.
    #[error("Invalid field name at offset {offset}: expected string, found {found}")]
    InvalidFieldName { offset: u64, found: &'static str },

    /// String bytes are not valid UTF-8.
    #[error("Invalid UTF-8 in string at offset {offset}: {source}")]
    InvalidUtf8 {
        offset: u64,
        #[source]
        source: std::str::Utf8Error,
    },

    /// An integer does not fit the 64-bit signed range.
    #[error("Integer {0} is out of the 64-bit signed range")]
    IntegerOutOfRange(String),

    /// Container nesting exceeded the configured depth limit.
    #[error("Nesting exceeds the maximum depth of {max_depth}")]
    TooDeep { max_depth: usize },

    /// Bytes remained after the value in strict mode.
    #[error("Trailing bytes after value at offset {offset}")]
    TrailingBytes { offset: u64 },

    /// IO error from the byte sink or source
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a truncation error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yabe::Error;
    ///
    /// let err = Error::truncated(5, "int32 payload");
    /// assert!(err.to_string().contains("offset 5"));
    /// ```
    pub fn truncated(offset: u64, expected: &'static str) -> Self {
        Error::Truncated { offset, expected }
    }

    /// Creates an out-of-range error for an integer wider than 64 bits signed.
    pub fn integer_out_of_range<T: fmt::Display>(value: T) -> Self {
        Error::IntegerOutOfRange(value.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yabe::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for sink or source failures.
    pub fn io(err: &std::io::Error) -> Self {
        Error::Io(err.to_string())
    }

    /// Returns the byte offset a decode error was detected at, if it has one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yabe::Error;
    ///
    /// assert_eq!(Error::UnknownTag { offset: 7, tag: 0xCC }.offset(), Some(7));
    /// assert_eq!(Error::UnsupportedVersion(3).offset(), None);
    /// ```
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        match self {
            Error::Truncated { offset, .. }
            | Error::UnknownTag { offset, .. }
            | Error::UnexpectedTerminator { offset }
            | Error::UnexpectedTag { offset, .. }
            | Error::InvalidFieldName { offset, .. }
            | Error::InvalidUtf8 { offset, .. }
            | Error::TrailingBytes { offset } => Some(*offset),
            _ => None,
        }
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
