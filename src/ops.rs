//! Operations for the approximation graph.
//!
//! This module contains all the NodeOp implementations:
//! - `ConstantOp`, `FloatOp`: Exact leaves
//! - `SumOp`, `NegativeOp`, `ProductOp`: Arithmetic operations
//! - `InverseOp`: Multiplicative inverse with a divergence ceiling

mod arithmetic;
mod inverse;
mod leaf;

pub use arithmetic::{NegativeOp, ProductOp, SumOp};
pub use inverse::InverseOp;
pub use leaf::{ConstantOp, FloatOp};
