//! Scaling helpers shared by the approximation operations.
//!
//! Every approximation is an integer `N` standing for `N * 2^-p`, so moving between
//! precisions is a shift. Right shifts of negative values round toward negative
//! infinity, matching `BigInt`'s arithmetic shift.

use num_bigint::BigInt;
use num_traits::One;

use crate::error::RealError;
use crate::node::Precision;

/// Multiplies `value` by `2^amount`, flooring when `amount` is negative.
pub(crate) fn shift(value: &BigInt, amount: i64) -> BigInt {
    let magnitude = amount.unsigned_abs() as usize;
    if amount >= 0 {
        value << magnitude
    } else {
        value >> magnitude
    }
}

/// Divides `value` by `2^amount` rounding to nearest, ties toward positive infinity.
pub(crate) fn shift_right_rounded(value: &BigInt, amount: u32) -> BigInt {
    if amount == 0 {
        return value.clone();
    }
    let half = BigInt::one() << (amount as usize - 1);
    (value + half) >> amount as usize
}

/// Number of bits in the magnitude of `value`; zero for zero.
pub(crate) fn bit_length(value: &BigInt) -> i64 {
    // Values with more than i64::MAX bits cannot be allocated.
    i64::try_from(value.bits()).unwrap_or(i64::MAX)
}

/// Adds `delta` to a precision, failing if the result leaves the `Precision` range.
pub(crate) fn offset(precision: Precision, delta: i64) -> Result<Precision, RealError> {
    i64::from(precision)
        .checked_add(delta)
        .and_then(|raised| Precision::try_from(raised).ok())
        .ok_or(RealError::PrecisionOverflow)
}
