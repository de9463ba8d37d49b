//! Minimal-width floating point representation.
//!
//! A `f64` is written in the narrowest IEEE-754 width that reproduces its bit
//! pattern exactly. Two cases are canonicalized and cannot be recovered
//! bit-for-bit:
//!
//! - `-0.0` is written as the zero tag and decodes to `+0.0`.
//! - Every NaN is written as one half-precision NaN pattern; its payload and
//!   sign are discarded. Infinities keep their sign.
//!
//! ```rust
//! use yabe::float::FloatRepr;
//!
//! assert_eq!(FloatRepr::from_f64(1.5), FloatRepr::Half(0x3E00));
//! assert_eq!(FloatRepr::from_f64(-0.0), FloatRepr::Zero);
//! assert!(matches!(FloatRepr::from_f64(0.1), FloatRepr::Double(_)));
//! ```

use crate::tag::Tag;

const SIGN_BIT: u64 = 1 << 63;
const EXPONENT_MASK: u64 = 0x7FF << 52;
const MANTISSA_MASK: u64 = (1 << 52) - 1;
const DOUBLE_BIAS: i64 = 1023;

/// Mantissa bits a half-precision value cannot carry.
const HALF_DROPPED_BITS: u64 = (1 << 42) - 1;
/// Mantissa bits a single-precision value cannot carry.
const SINGLE_DROPPED_BITS: u64 = (1 << 29) - 1;

/// Half-precision NaN written for every NaN input.
pub const HALF_NAN: u16 = 0x7D00;
pub const HALF_INFINITY: u16 = 0x7C00;
pub const HALF_NEG_INFINITY: u16 = 0xFC00;

/// A float in its chosen wire width, as raw little-endian bit patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FloatRepr {
    Zero,
    Half(u16),
    Single(u32),
    Double(u64),
}

impl FloatRepr {
    /// Picks the narrowest representation of `value`.
    #[must_use]
    pub fn from_f64(value: f64) -> FloatRepr {
        if value == 0.0 {
            return FloatRepr::Zero;
        }

        let bits = value.to_bits();
        let negative = bits & SIGN_BIT != 0;
        let biased = bits & EXPONENT_MASK;

        if biased == EXPONENT_MASK {
            let half = if bits & MANTISSA_MASK != 0 {
                HALF_NAN
            } else if negative {
                HALF_NEG_INFINITY
            } else {
                HALF_INFINITY
            };
            return FloatRepr::Half(half);
        }

        let exponent = (biased >> 52) as i64 - DOUBLE_BIAS;

        if (-14..=15).contains(&exponent) && bits & HALF_DROPPED_BITS == 0 {
            let mut half = ((exponent + 15) as u16) << 10;
            if negative {
                half |= 0x8000;
            }
            half |= ((bits >> 42) & 0x3FF) as u16;
            FloatRepr::Half(half)
        } else if (-126..=127).contains(&exponent) && bits & SINGLE_DROPPED_BITS == 0 {
            let mut single = ((exponent + 127) as u32) << 23;
            if negative {
                single |= 0x8000_0000;
            }
            single |= ((bits >> 29) & 0x7F_FFFF) as u32;
            FloatRepr::Single(single)
        } else {
            FloatRepr::Double(bits)
        }
    }

    /// Widens the representation back into a `f64`.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self {
            FloatRepr::Zero => 0.0,
            FloatRepr::Half(half) => half_to_f64(half),
            FloatRepr::Single(single) => f64::from(f32::from_bits(single)),
            FloatRepr::Double(bits) => f64::from_bits(bits),
        }
    }

    /// Tag announcing this representation.
    #[must_use]
    pub const fn tag(self) -> Tag {
        match self {
            FloatRepr::Zero => Tag::FloatZero,
            FloatRepr::Half(_) => Tag::Float16,
            FloatRepr::Single(_) => Tag::Float32,
            FloatRepr::Double(_) => Tag::Float64,
        }
    }

    /// Appends the tag and little-endian payload to `out`.
    pub fn write_to(self, out: &mut Vec<u8>) {
        out.push(self.tag().to_byte());
        match self {
            FloatRepr::Zero => {}
            FloatRepr::Half(half) => out.extend_from_slice(&half.to_le_bytes()),
            FloatRepr::Single(single) => out.extend_from_slice(&single.to_le_bytes()),
            FloatRepr::Double(bits) => out.extend_from_slice(&bits.to_le_bytes()),
        }
    }
}

// Exponent field 0 (zero and subnormals) never comes out of `from_f64`, but
// other encoders may write it.
fn half_to_f64(half: u16) -> f64 {
    let negative = half & 0x8000 != 0;
    let exponent = (half >> 10) & 0x1F;
    let mantissa = u64::from(half & 0x3FF);

    let magnitude = match exponent {
        0x1F if mantissa != 0 => return f64::NAN,
        0x1F => f64::INFINITY,
        0 => mantissa as f64 * f64::powi(2.0, -24),
        _ => {
            let biased = (i64::from(exponent) - 15 + DOUBLE_BIAS) as u64;
            f64::from_bits((biased << 52) | (mantissa << 42))
        }
    };

    if negative {
        -magnitude
    } else {
        magnitude
    }
}
