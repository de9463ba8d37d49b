//! Configuration options for encoding and decoding.
//!
//! The wire format itself has no knobs: for a given [`Value`](crate::Value)
//! the encoder always produces the same bytes. Options only bound the work a
//! single call may do and how strictly input is checked.
//!
//! ## Examples
//!
//! ```rust
//! use yabe::{decode_with_options, encode, Value, YabeOptions};
//!
//! let bytes = encode(&Value::from(1)).unwrap();
//!
//! // Refuse anything after the first value
//! let mut padded = bytes.clone();
//! padded.push(0x00);
//! let options = YabeOptions::strict();
//! assert!(decode_with_options(&padded, &options).is_err());
//! assert!(decode_with_options(&bytes, &options).is_ok());
//! ```

/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the codec.
///
/// # Examples
///
/// ```rust
/// use yabe::YabeOptions;
///
/// let options = YabeOptions::new();
/// assert_eq!(options.max_depth, 128);
/// assert!(!options.reject_trailing_bytes);
///
/// let options = YabeOptions::new().with_max_depth(16);
/// assert_eq!(options.max_depth, 16);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YabeOptions {
    /// Deepest container nesting accepted by the encoder and decoder.
    ///
    /// Scalars at the top level have depth 0; each enclosing sequence or record
    /// adds one.
    pub max_depth: usize,
    /// Fail decoding when bytes remain after the top-level value.
    pub reject_trailing_bytes: bool,
}

impl Default for YabeOptions {
    fn default() -> Self {
        YabeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            reject_trailing_bytes: false,
        }
    }
}

impl YabeOptions {
    /// Creates default options (depth limit 128, trailing bytes ignored).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject trailing bytes after the value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use yabe::YabeOptions;
    ///
    /// assert!(YabeOptions::strict().reject_trailing_bytes);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        YabeOptions {
            reject_trailing_bytes: true,
            ..Default::default()
        }
    }

    /// Sets the container nesting limit.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether bytes after the top-level value are an error.
    #[must_use]
    pub fn with_trailing_bytes_rejected(mut self, reject: bool) -> Self {
        self.reject_trailing_bytes = reject;
        self
    }
}
