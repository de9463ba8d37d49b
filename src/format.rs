//! YABE Wire Format
//!
//! This module documents the byte layout of YABE as implemented by this
//! library. It contains no code.
//!
//! # Overview
//!
//! A YABE stream is a five-byte header followed by exactly one encoded value.
//! All multi-byte integers, lengths and floats are little-endian.
//!
//! ```text
//! +------+------+------+------+---------+-------------------+
//! | 'Y'  | 'A'  | 'B'  | 'E'  | version | value ...         |
//! +------+------+------+------+---------+-------------------+
//! ```
//!
//! The version byte is `0`. Decoders reject any other version with
//! [`Error::UnsupportedVersion`](crate::Error::UnsupportedVersion), and input
//! shorter than five bytes or with different magic with
//! [`Error::BadSignature`](crate::Error::BadSignature).
//!
//! # Tag Space
//!
//! Every value starts with one tag byte:
//!
//! | Tag | Meaning | Payload |
//! |-----|---------|---------|
//! | `0x00..=0x7F` | integer `0..=127` | none |
//! | `0x80..=0xBF` | string of `tag - 0x80` bytes | UTF-8 bytes |
//! | `0xC0` | null | none |
//! | `0xC1` | integer | `i16` |
//! | `0xC2` | integer | `i32` |
//! | `0xC3` | integer | `i64` |
//! | `0xC4` | float `0.0` | none |
//! | `0xC5` | float | IEEE half |
//! | `0xC6` | float | IEEE single |
//! | `0xC7` | float | IEEE double |
//! | `0xC8` | false | none |
//! | `0xC9` | true | none |
//! | `0xCA` | blob | mimetype string, then length-prefixed bytes |
//! | `0xCB` | end marker | none |
//! | `0xCC` | reserved | rejected with `UnknownTag` |
//! | `0xCD` | string | `u16` length, UTF-8 bytes |
//! | `0xCE` | string | `u32` length, UTF-8 bytes |
//! | `0xCF` | string | `u64` length, UTF-8 bytes |
//! | `0xD0..=0xD6` | sequence of `tag - 0xD0` values | the values |
//! | `0xD7` | sequence | values, then `0xCB` |
//! | `0xD8..=0xDE` | record of `tag - 0xD8` fields | name/value pairs |
//! | `0xDF` | record | name/value pairs, then `0xCB` |
//! | `0xE0..=0xFF` | integer `-32..=-1` | none |
//!
//! # Integers
//!
//! Integers are signed 64-bit. The encoder uses the inline form when the value
//! is in `-32..=127`, otherwise the narrowest of `i16`, `i32`, `i64` that holds
//! it:
//!
//! ```text
//! 0      -> 00
//! 100    -> 64
//! -1     -> FF
//! 200    -> C1 C8 00
//! 40000  -> C2 40 9C 00 00
//! ```
//!
//! Integers wider than 64 bits signed (`u64` above `i64::MAX`, `i128`, big
//! integers) are rejected with
//! [`Error::IntegerOutOfRange`](crate::Error::IntegerOutOfRange).
//!
//! # Floats
//!
//! Floats are written at the narrowest precision that reproduces the value
//! exactly:
//!
//! 1. `0.0` and `-0.0` use tag `0xC4` and decode as `+0.0`.
//! 2. NaN is written as half `0x7D00`, infinity as half `0x7C00` and negative
//!    infinity as half `0xFC00`.
//! 3. Half precision when the unbiased exponent is in `-14..=15` and the low
//!    42 mantissa bits are zero.
//! 4. Single precision when the exponent is in `-126..=127` and the low 29
//!    mantissa bits are zero.
//! 5. Otherwise the double is written verbatim.
//!
//! ```text
//! 1.5    -> C5 00 3E
//! 65536  -> C6 00 00 80 47
//! 0.1    -> C7 9A 99 99 99 99 99 B9 3F
//! ```
//!
//! Decoders widen halves and singles to doubles, including half subnormals
//! written by other encoders.
//!
//! # Strings and Blobs
//!
//! Strings are UTF-8. Lengths up to 63 bytes fit in the tag; longer strings
//! use the narrowest of the `u16`, `u32`, `u64` length prefixes.
//!
//! A blob is the tag `0xCA`, its mimetype as a string, then its payload. The
//! payload length always uses an explicit prefix (`0xCD` for up to 65535
//! bytes) even when it is short:
//!
//! ```text
//! blob("a/b", [1, 2]) -> CA 83 61 2F 62 CD 02 00 01 02
//! ```
//!
//! Decoders also accept an inline `0x80..=0xBF` length for the payload.
//!
//! # Containers
//!
//! Sequences of up to six values use the short tags `0xD0..=0xD6` and carry
//! no terminator. Longer sequences use `0xD7` and end with `0xCB`.
//!
//! Records are ordered lists of name/value pairs; every name must be a string
//! and names may repeat. Records of up to five fields use `0xD8..=0xDD`;
//! longer records use `0xDF` and end with `0xCB`. The tag `0xDE` (six fields)
//! is never written but is accepted on decode.
//!
//! ```text
//! [1, 2, 3]         -> D3 01 02 03
//! {"a": true}       -> D9 81 61 C9
//! ```
//!
//! # Limits
//!
//! Nesting is bounded by [`YabeOptions::max_depth`](crate::YabeOptions)
//! (128 by default) on both sides. Declared lengths are checked against the
//! available input before any payload is read.
