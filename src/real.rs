//! The main Real type representing constructive real numbers.
//!
//! A `Real` is a real number that can be approximated to arbitrary precision.
//! It is backed by an expression graph whose leaves are exact integers or decoded
//! floats, and whose interior nodes are arithmetic operations. Handles are cheap to
//! clone; clones share the node and therefore its cached approximation.

use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;

use crate::error::RealError;
use crate::float::{BINARY32, BINARY64};
use crate::materialize::{float_bits, wrapping_integer};
use crate::node::{Node, NodeOp, Precision};
use crate::ops::{ConstantOp, FloatOp, InverseOp, NegativeOp, ProductOp, SumOp};

/// Finest operand precision an inverse probes before giving up on a zero operand.
pub const DEFAULT_MAX_INVERSE_PRECISION: Precision = 1 << 16;

/// A constructive real backed by a shared node graph.
#[derive(Clone)]
pub struct Real {
    pub(crate) node: Arc<Node>,
}

impl Real {
    fn from_op<O: NodeOp + 'static>(op: O) -> Self {
        Self {
            node: Node::new(Arc::new(op)),
        }
    }

    pub fn zero() -> Self {
        Self::from(BigInt::from(0))
    }

    pub fn one() -> Self {
        Self::from(BigInt::from(1))
    }

    /// Creates an exact real from an IEEE-754 binary64 bit pattern.
    ///
    /// Infinities and NaNs yield `RealError::NonFinite`.
    pub fn from_f64_bits(bits: u64) -> Result<Self, RealError> {
        Ok(Self::from_op(FloatOp::decode(bits, &BINARY64)?))
    }

    /// Creates an exact real from an IEEE-754 binary32 bit pattern.
    ///
    /// Infinities and NaNs yield `RealError::NonFinite`.
    pub fn from_f32_bits(bits: u32) -> Result<Self, RealError> {
        Ok(Self::from_op(FloatOp::decode(u64::from(bits), &BINARY32)?))
    }

    /// Returns `N` with `|N - x * 2^precision| < 1`.
    pub fn approximate(&self, precision: Precision) -> Result<BigInt, RealError> {
        self.node.approximate(precision)
    }

    /// Binary order of magnitude: `|x|` lies roughly below `2^msd`.
    ///
    /// Exact for leaves. For other nodes this reflects the most recent cached
    /// approximation, and is `None` until one has been computed.
    pub fn msd(&self) -> Option<i64> {
        self.node.msd()
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::from_op(SumOp {
            left: Arc::clone(&self.node),
            right: Arc::clone(&other.node),
        })
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    pub fn neg(&self) -> Self {
        Self::from_op(NegativeOp {
            inner: Arc::clone(&self.node),
        })
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::from_op(ProductOp {
            left: Arc::clone(&self.node),
            right: Arc::clone(&other.node),
        })
    }

    /// Quotient `self / other`. Approximating it fails with
    /// `RealError::DivisionDiverged` when `other` is zero.
    pub fn div(&self, other: &Self) -> Self {
        self.mul(&other.inverse())
    }

    /// Returns the multiplicative inverse using the default precision ceiling.
    pub fn inverse(&self) -> Self {
        self.inverse_bounded::<DEFAULT_MAX_INVERSE_PRECISION>()
    }

    /// Returns the multiplicative inverse.
    ///
    /// # Type Parameters
    /// * `MAX_PRECISION` - Finest precision at which the operand is probed for a
    ///   nonzero value. Operands indistinguishable from zero there make
    ///   approximation fail with `RealError::DivisionDiverged`.
    pub fn inverse_bounded<const MAX_PRECISION: Precision>(&self) -> Self {
        Self::from_op(InverseOp {
            inner: Arc::clone(&self.node),
            max_precision: MAX_PRECISION,
        })
    }

    /// The nearest `f64`, ties to even. Out-of-range magnitudes become infinities.
    pub fn to_f64(&self) -> Result<f64, RealError> {
        float_bits(&self.node, &BINARY64).map(f64::from_bits)
    }

    /// The nearest `f32`, ties to even. Out-of-range magnitudes become infinities.
    pub fn to_f32(&self) -> Result<f32, RealError> {
        // binary32 patterns occupy the low 32 bits.
        float_bits(&self.node, &BINARY32).map(|bits| f32::from_bits(bits as u32))
    }

    /// `approximate(0)` wrapped to 64 bits.
    pub fn to_i64(&self) -> Result<i64, RealError> {
        wrapping_integer::<8>(&self.node).map(i64::from_le_bytes)
    }

    /// `approximate(0)` wrapped to 32 bits.
    pub fn to_i32(&self) -> Result<i32, RealError> {
        wrapping_integer::<4>(&self.node).map(i32::from_le_bytes)
    }
}

impl fmt::Debug for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Real")
            .field("node", &self.node.id)
            .field("cached_precision", &self.node.cached_precision())
            .finish()
    }
}

impl From<BigInt> for Real {
    fn from(value: BigInt) -> Self {
        Self::from_op(ConstantOp { value })
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Real {
                fn from(value: $t) -> Self {
                    Self::from(BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_integer!(i32, i64, u32, u64);

impl TryFrom<f64> for Real {
    type Error = RealError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64_bits(value.to_bits())
    }
}

impl TryFrom<f32> for Real {
    type Error = RealError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::from_f32_bits(value.to_bits())
    }
}

impl std::ops::Neg for Real {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Real::neg(&self)
    }
}

impl std::ops::Neg for &Real {
    type Output = Real;

    fn neg(self) -> Self::Output {
        Real::neg(self)
    }
}

/// Implements a binary operator for every owned/borrowed operand combination by
/// delegating to the borrowing method of the same name.
macro_rules! forward_binary_op {
    ($trait:ident, $method:ident) => {
        impl std::ops::$trait for Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Self::Output {
                Real::$method(&self, &rhs)
            }
        }

        impl std::ops::$trait<&Real> for Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Self::Output {
                Real::$method(&self, rhs)
            }
        }

        impl std::ops::$trait<Real> for &Real {
            type Output = Real;

            fn $method(self, rhs: Real) -> Self::Output {
                Real::$method(self, &rhs)
            }
        }

        impl std::ops::$trait<&Real> for &Real {
            type Output = Real;

            fn $method(self, rhs: &Real) -> Self::Output {
                Real::$method(self, rhs)
            }
        }
    };
}

forward_binary_op!(Add, add);
forward_binary_op!(Sub, sub);
forward_binary_op!(Mul, mul);
forward_binary_op!(Div, div);
