//! Multiplicative inverse with adaptive operand precision.

use std::sync::Arc;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::One;

use crate::error::RealError;
use crate::node::{Node, NodeOp, Precision};
use crate::scale::{bit_length, offset};

/// Bits the operand approximation needs before its sign and rough magnitude are known.
const INVERSE_MIN_OPERAND_BITS: i64 = 2;

/// Slack between the requested precision and the operand's squared magnitude.
const INVERSE_GUARD_BITS: i64 = 4;

/// Inverse (reciprocal) operation.
///
/// With `a` the operand approximation at precision `q` and `X` the exactly scaled
/// operand, `2^(p+q) / a` differs from `x^-1 * 2^p` by less than
/// `2^(p+q) / (|a| (|a| - 1))`, which is at most half a unit once
/// `2 * bits(a) >= p + q + 4`. Rounding the quotient to nearest adds the other half.
pub struct InverseOp {
    pub inner: Arc<Node>,
    /// Finest precision at which the operand is probed for a nonzero value.
    pub max_precision: Precision,
}

impl InverseOp {
    /// Finds a precision at which the operand approximation has at least two bits.
    ///
    /// The step doubles on every miss, and the last probe is made at exactly
    /// `max_precision`.
    fn resolve_operand(&self) -> Result<(Precision, BigInt), RealError> {
        let mut precision: Precision = 0;
        let mut step: Precision = 1;
        let mut value = self.inner.approximate(precision)?;
        while bit_length(&value) < INVERSE_MIN_OPERAND_BITS {
            if precision >= self.max_precision {
                tracing::debug!(
                    "inverse operand indistinguishable from zero at precision {}",
                    self.max_precision
                );
                return Err(RealError::DivisionDiverged {
                    max_precision: self.max_precision,
                });
            }
            precision = precision.saturating_add(step).min(self.max_precision);
            step = step.saturating_mul(2);
            tracing::trace!("inverse operand probe raised to precision {}", precision);
            value = self.inner.approximate(precision)?;
        }
        Ok((precision, value))
    }
}

impl NodeOp for InverseOp {
    fn approximate(&self, precision: Precision) -> Result<BigInt, RealError> {
        let (mut operand_precision, mut operand) = self.resolve_operand()?;

        loop {
            let deficit = i64::from(precision) + i64::from(operand_precision) + INVERSE_GUARD_BITS
                - 2 * bit_length(&operand);
            if deficit <= 0 {
                break;
            }
            operand_precision = offset(operand_precision, deficit)?;
            tracing::trace!(
                "inverse operand refined to precision {} for requested precision {}",
                operand_precision,
                precision
            );
            operand = self.inner.approximate(operand_precision)?;
        }

        // One extra bit so the quotient can be rounded to nearest.
        let scale = i64::from(precision) + i64::from(operand_precision) + 1;
        let magnitude = usize::try_from(scale.unsigned_abs()).map_err(|_| RealError::PrecisionOverflow)?;
        let doubled = if scale >= 0 {
            (BigInt::one() << magnitude).div_floor(&operand)
        } else {
            BigInt::one().div_floor(&(operand << magnitude))
        };
        Ok((doubled + 1u32) >> 1usize)
    }
}
