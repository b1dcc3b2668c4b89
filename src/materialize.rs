//! Conversion of approximations into native numbers.
//!
//! Floats are correctly rounded (to nearest, ties to even) in both the normal and
//! the subnormal range. Integers are the precision-zero approximation wrapped to
//! the target width.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive};

use crate::error::RealError;
use crate::float::FloatFormat;
use crate::node::{Node, Precision};
use crate::scale::{bit_length, offset};

/// Guard bits requested below the target precision on the first rounding attempt.
pub const INITIAL_ROUNDING_GUARD_BITS: u32 = 8;

/// Guard bits beyond which an apparent tie is treated as exact.
pub const MAX_ROUNDING_GUARD_BITS: u32 = 256;

/// Extra bits probed below the subnormal quantum before a value is declared tiny.
const SUBNORMAL_SEARCH_SLACK: i64 = 3;

/// Position of the leading bit of `|x|`, or `None` if `|x|` is too small to be a
/// normal number of `format`.
///
/// The estimate is the exact floor of `log2 |x|` or one above it; a request with
/// at least `W + 2` bits keeps the difference inside the rounding slack.
fn leading_bit(node: &Node, format: &FloatFormat) -> Result<Option<i64>, RealError> {
    let wanted = i64::from(format.significand_bits) + 2;
    let limit = offset(format.subnormal_precision(), SUBNORMAL_SEARCH_SLACK)?;
    let mut precision: Precision = 0;
    loop {
        let bits = bit_length(&node.approximate(precision)?);
        if bits >= wanted {
            return Ok(Some(bits - 1 - i64::from(precision)));
        }
        if precision >= limit {
            return Ok(None);
        }
        precision = offset(precision, wanted - bits)?.min(limit);
        tracing::trace!("float magnitude search raised to precision {}", precision);
    }
}

/// Rounds `|x| * 2^precision` to the nearest integer, ties to even, and reports
/// the sign of the approximation it was read from.
fn round_scaled(node: &Node, precision: Precision) -> Result<(bool, BigInt), RealError> {
    let mut guard = INITIAL_ROUNDING_GUARD_BITS;
    loop {
        let approximation = node.approximate(offset(precision, i64::from(guard))?)?;
        let magnitude = approximation.abs();
        let half = BigInt::one() << (guard as usize - 1);
        let low = &magnitude & ((&half << 1usize) - 1u32);
        let truncated = magnitude >> guard as usize;

        // Away from the midpoint the approximation error cannot cross it.
        if low == half && guard < MAX_ROUNDING_GUARD_BITS {
            guard *= 2;
            tracing::debug!(
                "float rounding ambiguous at precision {}, retrying with {} guard bits",
                precision,
                guard
            );
            continue;
        }

        let round_up = low > half || (low == half && truncated.is_odd());
        let rounded = if round_up { truncated + 1u32 } else { truncated };
        return Ok((approximation.is_negative(), rounded));
    }
}

/// The bit pattern of the `format` value nearest to `x`.
///
/// Magnitudes past the largest finite value become infinities; results that round
/// to zero are positive zero.
pub(crate) fn float_bits(node: &Node, format: &FloatFormat) -> Result<u64, RealError> {
    let subnormal_precision = format.subnormal_precision();
    let precision = match leading_bit(node, format)? {
        Some(msd) if msd > i64::from(format.bias) => {
            let negative = node.approximate(0)?.is_negative();
            return Ok(format.assemble(negative, format.max_exponent_field(), 0));
        }
        Some(msd) => {
            let normal = i64::from(format.significand_bits) - 1 - msd;
            Precision::try_from(normal)
                .map_err(|_| RealError::PrecisionOverflow)?
                .min(subnormal_precision)
        }
        None => subnormal_precision,
    };

    let (negative, rounded) = round_scaled(node, precision)?;
    let below = u64::try_from(i64::from(subnormal_precision) - i64::from(precision))
        .map_err(|_| RealError::PrecisionOverflow)?;
    let Some(significand) = rounded.to_u64() else {
        return Ok(format.assemble(negative, format.max_exponent_field(), 0));
    };
    Ok(format.assemble(negative && significand != 0, below, significand))
}

/// The low `BYTES` bytes of the two's complement of `approximate(0)`, little endian.
pub(crate) fn wrapping_integer<const BYTES: usize>(node: &Node) -> Result<[u8; BYTES], RealError> {
    let approximation = node.approximate(0)?;
    let fill = if approximation.is_negative() { 0xff } else { 0 };
    let mut bytes = [fill; BYTES];
    for (slot, byte) in bytes.iter_mut().zip(approximation.to_signed_bytes_le()) {
        *slot = byte;
    }
    Ok(bytes)
}
