//! IEEE-754 binary interchange layouts.
//!
//! `FloatFormat` describes the field widths of a binary floating-point format and
//! converts between raw bit patterns and exact dyadic values `significand * 2^offset`.
//! Leaf construction decodes through it; materialization assembles through it.

use num_bigint::BigInt;

use crate::error::RealError;
use crate::node::Precision;

/// Field layout of a binary floating-point format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FloatFormat {
    /// Significand width including the implicit leading bit.
    pub significand_bits: u32,
    /// Width of the biased exponent field.
    pub exponent_bits: u32,
    /// Exponent bias.
    pub bias: i32,
}

/// IEEE-754 binary32 (`f32`).
pub const BINARY32: FloatFormat = FloatFormat {
    significand_bits: f32::MANTISSA_DIGITS,
    exponent_bits: 8,
    bias: 127,
};

/// IEEE-754 binary64 (`f64`).
pub const BINARY64: FloatFormat = FloatFormat {
    significand_bits: f64::MANTISSA_DIGITS,
    exponent_bits: 11,
    bias: 1023,
};

impl FloatFormat {
    /// Width of the stored fraction field.
    pub fn fraction_bits(&self) -> u32 {
        self.significand_bits - 1
    }

    fn fraction_mask(&self) -> u64 {
        (1u64 << self.fraction_bits()) - 1
    }

    /// All-ones exponent field, unshifted.
    pub fn max_exponent_field(&self) -> u64 {
        (1u64 << self.exponent_bits) - 1
    }

    pub fn sign_bit(&self) -> u64 {
        1u64 << (self.fraction_bits() + self.exponent_bits)
    }

    /// Bit pattern of positive infinity.
    pub fn infinity_bits(&self) -> u64 {
        self.max_exponent_field() << self.fraction_bits()
    }

    /// Precision at which one unit is the subnormal quantum (149 for binary32,
    /// 1074 for binary64).
    pub fn subnormal_precision(&self) -> Precision {
        self.bias + self.significand_bits as Precision - 2
    }

    /// Splits a finite bit pattern into a signed significand and the power of two it
    /// is scaled by. Zero exponent fields (zero and subnormals) carry no implicit bit
    /// and use the minimum exponent.
    pub fn decode(&self, bits: u64) -> Result<(BigInt, Precision), RealError> {
        let fraction = bits & self.fraction_mask();
        let exponent_field = (bits >> self.fraction_bits()) & self.max_exponent_field();
        if exponent_field == self.max_exponent_field() {
            return Err(RealError::NonFinite);
        }

        let fraction_bits = self.fraction_bits() as Precision;
        let (magnitude, offset) = if exponent_field != 0 {
            let biased = exponent_field as Precision;
            (
                fraction | (1u64 << self.fraction_bits()),
                biased - self.bias - fraction_bits,
            )
        } else {
            (fraction, 1 - self.bias - fraction_bits)
        };

        let magnitude = BigInt::from(magnitude);
        let significand = if bits & self.sign_bit() != 0 {
            -magnitude
        } else {
            magnitude
        };
        Ok((significand, offset))
    }

    /// Builds a bit pattern from a sign, the exponent field minus one, and a rounded
    /// significand that still includes its leading bit.
    ///
    /// Adding the leading bit into the exponent field encodes normal numbers, a carry
    /// into the next binade, subnormals (`exponent_field_below == 0`) and the step from
    /// the largest subnormal to the smallest normal with the same formula. Magnitudes
    /// past the largest finite value saturate to infinity.
    pub fn assemble(&self, negative: bool, exponent_field_below: u64, significand: u64) -> u64 {
        let sign = if negative { self.sign_bit() } else { 0 };
        let infinity = self.infinity_bits();
        if exponent_field_below >= self.max_exponent_field() {
            return sign | infinity;
        }
        let magnitude = (exponent_field_below << self.fraction_bits())
            .checked_add(significand)
            .map_or(infinity, |magnitude| magnitude.min(infinity));
        sign | magnitude
    }
}
