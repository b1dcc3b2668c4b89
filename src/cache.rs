//! Memoization of the most recent approximation of a node.
//!
//! A valid approximation at precision `p` can answer every request at a precision
//! `q <= p` by shifting right: dropping low-order bits of an approximation within
//! one unit yields an approximation within one unit at the coarser scale. Requests
//! finer than the cached entry recompute and replace it.

use num_bigint::BigInt;
use parking_lot::Mutex;

use crate::error::RealError;
use crate::node::Precision;
use crate::scale::{bit_length, shift};

/// The cached pair; `|value - x * 2^precision| < 1`.
#[derive(Clone, Debug)]
struct CachedApproximation {
    precision: Precision,
    value: BigInt,
}

/// Lock-guarded cache holding at most one approximation.
///
/// The lock is held for the whole check-compute-store sequence. Concurrent callers
/// asking the same node for a precision that is not cached wait for the running
/// computation and are then served from its result rather than duplicating it.
#[derive(Debug, Default)]
pub struct ApproximationCache {
    entry: Mutex<Option<CachedApproximation>>,
}

impl ApproximationCache {
    pub fn new() -> Self {
        Self {
            entry: Mutex::new(None),
        }
    }

    /// Returns an approximation at `precision`, calling `compute` only when the cache
    /// cannot answer. A failed computation leaves the previous entry in place.
    pub fn get_or_compute<F>(&self, precision: Precision, compute: F) -> Result<BigInt, RealError>
    where
        F: FnOnce(Precision) -> Result<BigInt, RealError>,
    {
        let mut entry = self.entry.lock();
        if let Some(cached) = entry.as_ref() {
            if precision <= cached.precision {
                let dropped = i64::from(cached.precision) - i64::from(precision);
                return Ok(shift(&cached.value, -dropped));
            }
        }

        let value = compute(precision)?;
        *entry = Some(CachedApproximation {
            precision,
            value: value.clone(),
        });
        Ok(value)
    }

    /// Precision of the cached entry, if any.
    pub fn cached_precision(&self) -> Option<Precision> {
        self.entry.lock().as_ref().map(|cached| cached.precision)
    }

    /// `bit_length(value) - precision` of the cached entry: the position of the most
    /// significant digit of the real, valid as of the last cache refresh.
    pub fn msd(&self) -> Option<i64> {
        let entry = self.entry.lock();
        let cached = entry.as_ref()?;
        let bits = bit_length(&cached.value);
        if bits == 0 {
            return None;
        }
        Some(bits - i64::from(cached.precision))
    }
}
