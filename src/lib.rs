#![warn(
    clippy::shadow_reuse,
    clippy::shadow_same,
    clippy::shadow_unrelated,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::panic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

//! Constructive real numbers.
//!
//! A [`Real`] is an expression graph that can be asked for an integer
//! approximation `N` of its value `x` at any binary precision `p`, with the
//! guarantee `|N - x * 2^p| < 1`. Leaves are exact integers or exact decodings of
//! `f32`/`f64` values; interior nodes add, negate, multiply and invert. Each
//! operation chooses the precision it requests from its operands so that the
//! guarantee holds for its own result.
//!
//! Values can be narrowed back to native numbers: [`Real::to_f64`] and
//! [`Real::to_f32`] round correctly (to nearest, ties to even, including
//! subnormals), and [`Real::to_i64`] / [`Real::to_i32`] wrap the precision-zero
//! approximation.
//!
//! ```
//! use constructive_reals::Real;
//!
//! let third = Real::from(1) / Real::from(3);
//! let value = (&third + &third) * Real::from(3);
//! assert_eq!(value.to_f64(), Ok(2.0));
//! ```

mod cache;
mod error;
mod float;
mod materialize;
mod node;
mod ops;
mod real;
mod scale;

#[cfg(test)]
mod test_utils;

pub use error::RealError;
pub use materialize::{INITIAL_ROUNDING_GUARD_BITS, MAX_ROUNDING_GUARD_BITS};
pub use node::Precision;
pub use real::{Real, DEFAULT_MAX_INVERSE_PRECISION};
