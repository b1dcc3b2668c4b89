#![allow(dead_code)]

use constructive_reals::Real;

/// Sums terms using a balanced reduction instead of left-associative chaining.
///
/// This keeps the expression graph shallow (O(log n) depth), so approximation
/// recurses log n levels deep instead of n.
pub fn balanced_sum(mut values: Vec<Real>) -> Real {
    if values.is_empty() {
        return Real::zero();
    }

    while values.len() > 1 {
        let mut next = Vec::with_capacity(values.len().div_ceil(2));
        let mut iter = values.into_iter();
        while let Some(left) = iter.next() {
            if let Some(right) = iter.next() {
                next.push(left + right);
            } else {
                next.push(left);
            }
        }
        values = next;
    }

    values
        .pop()
        .expect("values should contain at least one element")
}

/// Converts a finite f64 value to a Real, panicking otherwise.
pub fn real_from_f64(value: f64) -> Real {
    Real::try_from(value).expect("expected finite f64 value")
}

/// Whether benches should print the values they compute.
pub fn verbose() -> bool {
    std::env::var_os("BENCH_VERBOSE").is_some()
}
