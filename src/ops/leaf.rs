//! Exact leaves: integers and decoded floating-point values.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::error::RealError;
use crate::float::FloatFormat;
use crate::node::{NodeOp, Precision};
use crate::scale::{bit_length, shift};

/// An exact integer. Approximations are floor shifts, so the error lies in `(-1, 0]`.
pub struct ConstantOp {
    pub value: BigInt,
}

impl NodeOp for ConstantOp {
    fn approximate(&self, precision: Precision) -> Result<BigInt, RealError> {
        Ok(shift(&self.value, i64::from(precision)))
    }

    fn is_cached(&self) -> bool {
        false
    }

    fn msd(&self) -> Option<i64> {
        if self.value.is_zero() {
            return None;
        }
        Some(bit_length(&self.value))
    }
}

/// An exact dyadic value `significand * 2^exponent_offset` decoded from a float.
pub struct FloatOp {
    pub significand: BigInt,
    pub exponent_offset: Precision,
}

impl FloatOp {
    /// Decodes a finite bit pattern of `format`.
    pub fn decode(bits: u64, format: &FloatFormat) -> Result<Self, RealError> {
        let (significand, exponent_offset) = format.decode(bits)?;
        Ok(Self {
            significand,
            exponent_offset,
        })
    }
}

impl NodeOp for FloatOp {
    fn approximate(&self, precision: Precision) -> Result<BigInt, RealError> {
        let amount = i64::from(precision) + i64::from(self.exponent_offset);
        Ok(shift(&self.significand, amount))
    }

    fn is_cached(&self) -> bool {
        false
    }

    fn msd(&self) -> Option<i64> {
        if self.significand.is_zero() {
            return None;
        }
        Some(bit_length(&self.significand) + i64::from(self.exponent_offset))
    }
}
