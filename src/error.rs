//! Error types for constructive real operations.
//!
//! The approximation contract itself has no failure mode: a returned value always
//! lies within one unit of the scaled real. Errors cover the cases where no value
//! can be returned at all:
//!
//! - **`NonFinite`**: a leaf was built from NaN or an infinity. Only finite floats
//!   denote real numbers.
//! - **`DivisionDiverged`**: an inverse could not find a nonzero approximation of its
//!   operand before reaching its precision ceiling. This is what happens when the
//!   operand is exactly zero.
//! - **`PrecisionOverflow`**: the precision bookkeeping of some operation left the
//!   range of [`Precision`](crate::Precision).

use std::fmt;

use crate::node::Precision;

/// Errors that can occur while building or approximating a real.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RealError {
    /// A leaf was constructed from a NaN or infinite float.
    NonFinite,
    /// An inverse escalated its operand precision past the ceiling without
    /// resolving a nonzero value.
    DivisionDiverged { max_precision: Precision },
    /// A requested or derived precision does not fit in `Precision`.
    PrecisionOverflow,
}

impl fmt::Display for RealError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "cannot build a real from a non-finite float"),
            Self::DivisionDiverged { max_precision } => {
                write!(
                    f,
                    "division diverged: operand not distinguishable from zero at precision {max_precision}"
                )
            }
            Self::PrecisionOverflow => write!(f, "precision arithmetic overflowed"),
        }
    }
}

impl std::error::Error for RealError {}
