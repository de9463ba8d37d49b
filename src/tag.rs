//! The one-byte tag space.
//!
//! Every wire item starts with a tag byte that identifies its shape and, for
//! inline forms, its value or length. [`Tag::classify`] is the single place
//! where byte ranges are mapped to shapes; the encoder and decoder never test
//! tag bytes directly.
//!
//! ```rust
//! use yabe::tag::Tag;
//!
//! assert_eq!(Tag::classify(0x05), Some(Tag::PosFixInt(5)));
//! assert_eq!(Tag::classify(0xFF), Some(Tag::NegFixInt(-1)));
//! assert_eq!(Tag::classify(0xCC), None);
//! ```

pub const SHORT_STR: u8 = 0x80;
pub const NULL: u8 = 0xC0;
pub const INT16: u8 = 0xC1;
pub const INT32: u8 = 0xC2;
pub const INT64: u8 = 0xC3;
pub const FLOAT_ZERO: u8 = 0xC4;
pub const FLOAT16: u8 = 0xC5;
pub const FLOAT32: u8 = 0xC6;
pub const FLOAT64: u8 = 0xC7;
pub const FALSE: u8 = 0xC8;
pub const TRUE: u8 = 0xC9;
pub const BLOB: u8 = 0xCA;
pub const END: u8 = 0xCB;
pub const RESERVED: u8 = 0xCC;
pub const STR16: u8 = 0xCD;
pub const STR32: u8 = 0xCE;
pub const STR64: u8 = 0xCF;
pub const SHORT_SEQUENCE: u8 = 0xD0;
pub const SEQUENCE: u8 = 0xD7;
pub const SHORT_RECORD: u8 = 0xD8;
pub const RECORD: u8 = 0xDF;

/// Largest string length carried inside the tag byte.
pub const SHORT_STR_MAX: usize = 0x3F;
/// Largest element count of a short sequence.
pub const SHORT_SEQUENCE_MAX: usize = 6;
/// Largest field count of a short record this codec emits.
///
/// Decoders accept one more (tag `0xDE`) for compatibility with other encoders.
pub const SHORT_RECORD_MAX_ENCODED: usize = 5;
/// Largest field count of a short record accepted on decode.
pub const SHORT_RECORD_MAX_DECODED: usize = 6;

/// Smallest integer with an inline encoding.
pub const FIXINT_MIN: i64 = -32;
/// Largest integer with an inline encoding.
pub const FIXINT_MAX: i64 = 127;

/// The shape a tag byte announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    /// `0x00..=0x7F`: the tag is the integer.
    PosFixInt(u8),
    /// `0xE0..=0xFF`: the tag minus 256 is the integer.
    NegFixInt(i8),
    /// `0x80..=0xBF`: a string whose byte length is carried in the low six bits.
    ShortStr(u8),
    Null,
    Int16,
    Int32,
    Int64,
    FloatZero,
    Float16,
    Float32,
    Float64,
    False,
    True,
    Blob,
    End,
    Str16,
    Str32,
    Str64,
    /// `0xD0..=0xD6`: a sequence of up to six elements, no terminator.
    ShortSequence(u8),
    Sequence,
    /// `0xD8..=0xDE`: a record of up to six fields, no terminator.
    ShortRecord(u8),
    Record,
}

impl Tag {
    /// Maps a tag byte to its shape. Returns `None` for the reserved `0xCC`.
    #[must_use]
    pub const fn classify(byte: u8) -> Option<Tag> {
        let tag = match byte {
            0x00..=0x7F => Tag::PosFixInt(byte),
            0x80..=0xBF => Tag::ShortStr(byte - SHORT_STR),
            NULL => Tag::Null,
            INT16 => Tag::Int16,
            INT32 => Tag::Int32,
            INT64 => Tag::Int64,
            FLOAT_ZERO => Tag::FloatZero,
            FLOAT16 => Tag::Float16,
            FLOAT32 => Tag::Float32,
            FLOAT64 => Tag::Float64,
            FALSE => Tag::False,
            TRUE => Tag::True,
            BLOB => Tag::Blob,
            END => Tag::End,
            RESERVED => return None,
            STR16 => Tag::Str16,
            STR32 => Tag::Str32,
            STR64 => Tag::Str64,
            0xD0..=0xD6 => Tag::ShortSequence(byte - SHORT_SEQUENCE),
            SEQUENCE => Tag::Sequence,
            0xD8..=0xDE => Tag::ShortRecord(byte - SHORT_RECORD),
            RECORD => Tag::Record,
            0xE0..=0xFF => Tag::NegFixInt(byte as i8),
        };
        Some(tag)
    }

    /// Returns the wire byte for this tag.
    ///
    /// Out-of-range payloads (e.g. `ShortStr(64)`) are a caller bug. Debug
    /// builds panic on them; release builds mask them into their range rather
    /// than spilling into a neighbouring tag.
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        debug_assert!(self.payload_in_range(), "tag payload out of range");
        match self {
            Tag::PosFixInt(v) => v & 0x7F,
            Tag::NegFixInt(v) => (v as u8) | 0xE0,
            Tag::ShortStr(len) => SHORT_STR | (len & 0x3F),
            Tag::Null => NULL,
            Tag::Int16 => INT16,
            Tag::Int32 => INT32,
            Tag::Int64 => INT64,
            Tag::FloatZero => FLOAT_ZERO,
            Tag::Float16 => FLOAT16,
            Tag::Float32 => FLOAT32,
            Tag::Float64 => FLOAT64,
            Tag::False => FALSE,
            Tag::True => TRUE,
            Tag::Blob => BLOB,
            Tag::End => END,
            Tag::Str16 => STR16,
            Tag::Str32 => STR32,
            Tag::Str64 => STR64,
            Tag::ShortSequence(n) => SHORT_SEQUENCE + if n > 6 { 6 } else { n },
            Tag::Sequence => SEQUENCE,
            Tag::ShortRecord(n) => SHORT_RECORD + if n > 6 { 6 } else { n },
            Tag::Record => RECORD,
        }
    }

    const fn payload_in_range(self) -> bool {
        match self {
            Tag::PosFixInt(v) => v <= 0x7F,
            Tag::NegFixInt(v) => v < 0 && v >= -32,
            Tag::ShortStr(len) => len as usize <= SHORT_STR_MAX,
            Tag::ShortSequence(n) => n as usize <= SHORT_SEQUENCE_MAX,
            Tag::ShortRecord(n) => n as usize <= SHORT_RECORD_MAX_DECODED,
            _ => true,
        }
    }

    /// Returns `true` for tags that start a string.
    #[inline]
    #[must_use]
    pub const fn is_str(self) -> bool {
        matches!(
            self,
            Tag::ShortStr(_) | Tag::Str16 | Tag::Str32 | Tag::Str64
        )
    }

    /// Short human-readable name of the item this tag starts, for error messages.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Tag::PosFixInt(_) | Tag::NegFixInt(_) | Tag::Int16 | Tag::Int32 | Tag::Int64 => {
                "integer"
            }
            Tag::FloatZero | Tag::Float16 | Tag::Float32 | Tag::Float64 => "float",
            Tag::ShortStr(_) | Tag::Str16 | Tag::Str32 | Tag::Str64 => "string",
            Tag::Null => "null",
            Tag::False | Tag::True => "boolean",
            Tag::Blob => "blob",
            Tag::End => "end marker",
            Tag::ShortSequence(_) | Tag::Sequence => "sequence",
            Tag::ShortRecord(_) | Tag::Record => "record",
        }
    }
}

/// How a container is delimited on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Framing {
    /// Count embedded in the tag, no terminator.
    Short(usize),
    /// Items until an End marker.
    Long,
}

impl Framing {
    /// Framing the encoder picks for a sequence of `len` elements.
    #[must_use]
    pub const fn for_sequence(len: Option<usize>) -> Framing {
        match len {
            Some(n) if n <= SHORT_SEQUENCE_MAX => Framing::Short(n),
            _ => Framing::Long,
        }
    }

    /// Framing the encoder picks for a record of `len` fields.
    #[must_use]
    pub const fn for_record(len: Option<usize>) -> Framing {
        match len {
            Some(n) if n <= SHORT_RECORD_MAX_ENCODED => Framing::Short(n),
            _ => Framing::Long,
        }
    }
}

/// Length prefix shared by strings and blob payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthPrefix {
    /// Length in the tag byte (strings only).
    Inline(u8),
    U16(u16),
    U32(u32),
    U64(u64),
}

impl LengthPrefix {
    /// Narrowest prefix for a string of `len` bytes.
    #[must_use]
    pub fn for_str(len: usize) -> LengthPrefix {
        if len <= SHORT_STR_MAX {
            LengthPrefix::Inline(len as u8)
        } else {
            Self::explicit(len)
        }
    }

    /// Narrowest prefix for a blob payload of `len` bytes.
    ///
    /// Blob payloads have no inline form, so lengths up to 63 still take the
    /// 16-bit prefix.
    #[must_use]
    pub fn for_blob(len: usize) -> LengthPrefix {
        Self::explicit(len)
    }

    fn explicit(len: usize) -> LengthPrefix {
        let len = len as u64;
        if let Ok(n) = u16::try_from(len) {
            LengthPrefix::U16(n)
        } else if let Ok(n) = u32::try_from(len) {
            LengthPrefix::U32(n)
        } else {
            LengthPrefix::U64(len)
        }
    }

    /// Tag byte that announces this prefix.
    #[must_use]
    pub const fn tag(self) -> Tag {
        match self {
            LengthPrefix::Inline(len) => Tag::ShortStr(len),
            LengthPrefix::U16(_) => Tag::Str16,
            LengthPrefix::U32(_) => Tag::Str32,
            LengthPrefix::U64(_) => Tag::Str64,
        }
    }

    /// Appends the tag and the little-endian length to `out`.
    pub fn write_to(self, out: &mut Vec<u8>) {
        out.push(self.tag().to_byte());
        match self {
            LengthPrefix::Inline(_) => {}
            LengthPrefix::U16(n) => out.extend_from_slice(&n.to_le_bytes()),
            LengthPrefix::U32(n) => out.extend_from_slice(&n.to_le_bytes()),
            LengthPrefix::U64(n) => out.extend_from_slice(&n.to_le_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_byte_but_reserved_classifies() {
        for byte in 0..=255u8 {
            match Tag::classify(byte) {
                Some(tag) => assert_eq!(tag.to_byte(), byte, "byte 0x{byte:02X}"),
                None => assert_eq!(byte, RESERVED),
            }
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "tag payload out of range")]
    fn test_out_of_range_payload_panics_in_debug() {
        let _ = Tag::ShortSequence(9).to_byte();
    }

    #[test]
    fn test_inline_integer_ranges() {
        assert_eq!(Tag::classify(0x7F), Some(Tag::PosFixInt(127)));
        assert_eq!(Tag::classify(0xE0), Some(Tag::NegFixInt(-32)));
        assert_eq!(Tag::PosFixInt(0).to_byte(), 0x00);
        assert_eq!(Tag::NegFixInt(-1).to_byte(), 0xFF);
    }

    #[test]
    fn test_short_record_six_is_decodable() {
        assert_eq!(Tag::classify(0xDE), Some(Tag::ShortRecord(6)));
        assert_eq!(Framing::for_record(Some(5)), Framing::Short(5));
        assert_eq!(Framing::for_record(Some(6)), Framing::Long);
    }

    #[test]
    fn test_sequence_framing_switch() {
        assert_eq!(Framing::for_sequence(Some(6)), Framing::Short(6));
        assert_eq!(Framing::for_sequence(Some(7)), Framing::Long);
        assert_eq!(Framing::for_sequence(None), Framing::Long);
    }

    #[test]
    fn test_length_prefix_widths() {
        assert_eq!(LengthPrefix::for_str(0), LengthPrefix::Inline(0));
        assert_eq!(LengthPrefix::for_str(63), LengthPrefix::Inline(63));
        assert_eq!(LengthPrefix::for_str(64), LengthPrefix::U16(64));
        assert_eq!(LengthPrefix::for_str(65_535), LengthPrefix::U16(65_535));
        assert_eq!(LengthPrefix::for_str(65_536), LengthPrefix::U32(65_536));
        assert_eq!(LengthPrefix::for_blob(3), LengthPrefix::U16(3));

        let mut out = Vec::new();
        LengthPrefix::for_str(300).write_to(&mut out);
        assert_eq!(out, vec![STR16, 0x2C, 0x01]);
    }
}
