//! Shared test utilities for approximation tests.
//!
//! `Exact` is a small rational reference built directly on `BigInt`, so expected
//! values never pass through the code under test.

#![allow(clippy::panic)]

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Float, One, Signed, Zero};
use rand::rngs::StdRng;
use rand::Rng;

use crate::node::Precision;
use crate::real::Real;
use crate::scale::shift;

/// An exact rational `numerator / denominator` with a positive denominator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Exact {
    numerator: BigInt,
    denominator: BigInt,
}

impl Exact {
    fn reduced(numerator: BigInt, denominator: BigInt) -> Self {
        let (top, bottom) = if denominator.is_negative() {
            (-numerator, -denominator)
        } else {
            (numerator, denominator)
        };
        let divisor = top.gcd(&bottom);
        if divisor.is_zero() || divisor.is_one() {
            return Self {
                numerator: top,
                denominator: bottom,
            };
        }
        Self {
            numerator: top / &divisor,
            denominator: bottom / divisor,
        }
    }

    pub fn from_int(value: i64) -> Self {
        Self::reduced(BigInt::from(value), BigInt::one())
    }

    /// # Panics
    /// Panics if `denominator` is zero.
    pub fn ratio(numerator: i64, denominator: i64) -> Self {
        assert_ne!(denominator, 0, "zero denominator");
        Self::reduced(BigInt::from(numerator), BigInt::from(denominator))
    }

    /// The exact value of a finite float.
    pub fn from_f64(value: f64) -> Self {
        let (mantissa, exponent, sign) = Float::integer_decode(value);
        let significand = BigInt::from(mantissa) * BigInt::from(sign);
        if exponent >= 0 {
            Self::reduced(shift(&significand, i64::from(exponent)), BigInt::one())
        } else {
            Self::reduced(significand, shift(&BigInt::one(), -i64::from(exponent)))
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        Self::reduced(
            &self.numerator * &other.denominator + &other.numerator * &self.denominator,
            &self.denominator * &other.denominator,
        )
    }

    pub fn mul(&self, other: &Self) -> Self {
        Self::reduced(
            &self.numerator * &other.numerator,
            &self.denominator * &other.denominator,
        )
    }

    pub fn neg(&self) -> Self {
        Self {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }

    /// # Panics
    /// Panics if the value is zero.
    pub fn recip(&self) -> Self {
        assert!(!self.numerator.is_zero(), "reciprocal of zero");
        Self::reduced(self.denominator.clone(), self.numerator.clone())
    }
}

/// Asserts `|real.approximate(precision) - exact * 2^precision| < 1`.
///
/// # Panics
/// Panics if the approximation fails or misses the bound.
pub fn assert_approximates(real: &Real, exact: &Exact, precision: Precision) {
    let approximation = match real.approximate(precision) {
        Ok(value) => value,
        Err(error) => panic!("approximate({precision}) failed: {error}"),
    };
    // Compare `approximation * den` with `num * 2^precision`, clearing negative powers.
    let (scaled_approximation, scaled_numerator, tolerance) = if precision >= 0 {
        (
            &approximation * &exact.denominator,
            shift(&exact.numerator, i64::from(precision)),
            exact.denominator.clone(),
        )
    } else {
        let denominator = shift(&exact.denominator, -i64::from(precision));
        (
            &approximation * &denominator,
            exact.numerator.clone(),
            denominator,
        )
    };
    let error = (scaled_approximation - scaled_numerator).abs();
    assert!(
        error < tolerance,
        "approximate({precision}) = {approximation} misses {}/{} by {error}/{tolerance}",
        exact.numerator,
        exact.denominator
    );
}

/// A uniformly random finite bit pattern; covers every binade, subnormals and zeros.
pub fn random_finite_f64(rng: &mut StdRng) -> f64 {
    loop {
        let value = f64::from_bits(rng.gen::<u64>());
        if value.is_finite() {
            return value;
        }
    }
}

/// `f32` counterpart of [`random_finite_f64`].
pub fn random_finite_f32(rng: &mut StdRng) -> f32 {
    loop {
        let value = f32::from_bits(rng.gen::<u32>());
        if value.is_finite() {
            return value;
        }
    }
}
