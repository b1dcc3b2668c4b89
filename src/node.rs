//! Approximation graph nodes.
//!
//! This module provides the core abstractions for the expression graph:
//! - `NodeOp` trait for the uncached approximation of one operation kind
//! - `Node`, which pairs an operation with the generic approximation cache
//!
//! ## The approximation contract
//!
//! A node denoting the real `x` answers `approximate(p)` with an integer `N` such that
//! `|N - x * 2^p| < 1`. Larger `p` asks for more bits. Every operation is written
//! against this single contract: combinators request approximations of their
//! operands at adaptively chosen precisions and combine them so that their own
//! result satisfies it again.
//!
//! ## Caching
//!
//! Combinator nodes memoize their most recent approximation (see `cache.rs`).
//! Leaves are exact and constant time, and negation adds no work, so those operations
//! opt out through `NodeOp::is_cached`. Nodes are shared between parents, so a
//! subexpression used in several places is refined once and reused.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use num_bigint::BigInt;

use crate::cache::ApproximationCache;
use crate::error::RealError;

/// Binary precision of an approximation: one unit stands for `2^-precision`.
pub type Precision = i32;

/// Uncached approximation of one operation kind.
///
/// Implementations must uphold `|approximate(p) - x * 2^p| < 1` for every `p` they
/// return `Ok` for.
pub trait NodeOp: Send + Sync {
    fn approximate(&self, precision: Precision) -> Result<BigInt, RealError>;

    /// Whether results are worth memoizing.
    fn is_cached(&self) -> bool {
        true
    }

    /// Most-significant-digit position known without consulting a cache.
    fn msd(&self) -> Option<i64> {
        None
    }
}

/// Node in the expression graph. The op stores structure; the cache remembers the
/// finest approximation computed so far.
pub struct Node {
    pub id: usize,
    pub op: Arc<dyn NodeOp>,
    cache: ApproximationCache,
}

impl Node {
    pub fn new(op: Arc<dyn NodeOp>) -> Arc<Self> {
        static NODE_IDS: AtomicUsize = AtomicUsize::new(0);
        Arc::new(Self {
            id: NODE_IDS.fetch_add(1, Ordering::Relaxed),
            op,
            cache: ApproximationCache::new(),
        })
    }

    /// Returns `N` with `|N - x * 2^precision| < 1`.
    ///
    /// Cached operations hold this node's cache lock for the duration of the
    /// computation. The graph is acyclic, so a thread never waits on a lock it holds.
    pub fn approximate(&self, precision: Precision) -> Result<BigInt, RealError> {
        if !self.op.is_cached() {
            return self.op.approximate(precision);
        }
        self.cache
            .get_or_compute(precision, |precision| self.op.approximate(precision))
    }

    /// Estimate of the binary magnitude: `|x|` is roughly below `2^msd`.
    ///
    /// For combinators this reflects the most recent cache refresh; `None` means no
    /// nonzero approximation has been cached yet.
    pub fn msd(&self) -> Option<i64> {
        self.op.msd().or_else(|| self.cache.msd())
    }

    /// Precision of the cached approximation, if any.
    pub fn cached_precision(&self) -> Option<Precision> {
        self.cache.cached_precision()
    }
}
