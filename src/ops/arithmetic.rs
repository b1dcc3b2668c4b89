//! Arithmetic operations: addition, negation, and multiplication.

use std::sync::Arc;

use num_bigint::BigInt;

use crate::error::RealError;
use crate::node::{Node, NodeOp, Precision};
use crate::scale::{bit_length, offset, shift_right_rounded};

/// Extra bits requested from each summand.
///
/// Two summand errors below one unit at scale `p + 3` add to less than a quarter unit
/// at scale `p`; the biased floor shift below adds at most another seven eighths
/// down or one eighth up.
const SUM_GUARD_BITS: i32 = 3;

/// Padding added to the requested precision before splitting it between factors.
const PRODUCT_GUARD_BITS: i32 = 4;

/// Factors whose approximation has fewer bits than this are refined (up to the
/// padded target) before they are used as a scale reference.
const PRODUCT_MIN_SCALE_BITS: i64 = 3;

/// Bits by which the discarded precision must exceed each factor's bit length.
const PRODUCT_ERROR_MARGIN: i64 = 2;

/// Addition operation.
pub struct SumOp {
    pub left: Arc<Node>,
    pub right: Arc<Node>,
}

impl NodeOp for SumOp {
    fn approximate(&self, precision: Precision) -> Result<BigInt, RealError> {
        let padded = offset(precision, i64::from(SUM_GUARD_BITS))?;
        let total = self.left.approximate(padded)? + self.right.approximate(padded)?;
        Ok((total + 1u32) >> SUM_GUARD_BITS as usize)
    }
}

/// Negation operation.
pub struct NegativeOp {
    pub inner: Arc<Node>,
}

impl NodeOp for NegativeOp {
    fn approximate(&self, precision: Precision) -> Result<BigInt, RealError> {
        Ok(-self.inner.approximate(precision)?)
    }

    fn is_cached(&self) -> bool {
        false
    }

    fn msd(&self) -> Option<i64> {
        self.inner.msd()
    }
}

/// Multiplication operation.
///
/// With `a`, `b` the factor approximations at precisions `l`, `r` and `X`, `Y` the
/// exactly scaled factors, `|ab - XY| <= |a - X||b| + |X||b - Y| < |a| + |b| + 1`.
/// Discarding `e = l + r - p` bits divides that by `2^e`, so the error contributed
/// by the right factor is scaled by the left factor's magnitude and vice versa.
/// Keeping `e >= bits(a) + 2` and `e >= bits(b) + 2` bounds it below half a unit,
/// and the rounding shift adds at most another half.
pub struct ProductOp {
    pub left: Arc<Node>,
    pub right: Arc<Node>,
}

impl ProductOp {
    /// Raises `precision` with a doubling step until `node`'s approximation has
    /// enough bits to act as a scale reference, never past `ceiling`.
    fn scale_reference(
        node: &Node,
        mut precision: Precision,
        ceiling: Precision,
    ) -> Result<(Precision, BigInt), RealError> {
        let mut step: Precision = 1;
        let mut value = node.approximate(precision)?;
        while bit_length(&value) < PRODUCT_MIN_SCALE_BITS && precision < ceiling {
            precision = precision.saturating_add(step).min(ceiling);
            step = step.saturating_mul(2);
            value = node.approximate(precision)?;
        }
        Ok((precision, value))
    }
}

impl NodeOp for ProductOp {
    fn approximate(&self, precision: Precision) -> Result<BigInt, RealError> {
        let padded = offset(precision, i64::from(PRODUCT_GUARD_BITS))?;
        let left_start = padded / 2;
        let right_start = padded - left_start;

        let (mut left_precision, mut left_value) =
            Self::scale_reference(&self.left, left_start, padded)?;
        let (mut right_precision, mut right_value) =
            Self::scale_reference(&self.right, right_start, padded)?;

        let mut extra =
            i64::from(left_precision) + i64::from(right_precision) - i64::from(precision);
        loop {
            // A large left factor amplifies the right factor's error: refine the right.
            let left_missing = bit_length(&left_value) + PRODUCT_ERROR_MARGIN - extra;
            if left_missing > 0 {
                right_precision = offset(right_precision, left_missing)?;
                right_value = self.right.approximate(right_precision)?;
                extra += left_missing;
            }

            let right_missing = bit_length(&right_value) + PRODUCT_ERROR_MARGIN - extra;
            if right_missing > 0 {
                left_precision = offset(left_precision, right_missing)?;
                left_value = self.left.approximate(left_precision)?;
                extra += right_missing;
            }

            if left_missing <= 0 && right_missing <= 0 {
                break;
            }
        }

        let discarded = u32::try_from(extra).map_err(|_| RealError::PrecisionOverflow)?;
        Ok(shift_right_rounded(&(left_value * right_value), discarded))
    }
}
