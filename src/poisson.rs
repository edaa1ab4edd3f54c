//! The Poisson probability mass function over goal counts.

use crate::factorial;
use crate::factorial::Factorial;

/// `exp(-709)` underflows an `f64`; past this point the direct form collapses to zero
/// even where the true mass is still representable.
const MAX_DIRECT_LAMBDA: f64 = 700.0;

/// Probability that a count-valued process with rate `lambda` produces exactly `k`
/// events. Negative `k` yields zero mass rather than an error.
///
/// The mass is evaluated with the exact factorial form wherever it cannot overflow,
/// switching to log space for large `k` or `lambda`, so pathological inputs degrade to
/// vanishing probabilities instead of propagating `inf` or `NaN` into the rankings
/// downstream.
pub fn mass(k: i64, lambda: f64, factorial: &impl Factorial) -> f64 {
    if k < 0 {
        return 0.0;
    }
    if lambda == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    if k <= factorial::MAX_N as i64 && lambda <= MAX_DIRECT_LAMBDA {
        univariate(k as u8, lambda, factorial)
    } else {
        ln_mass(k as u64, lambda).exp()
    }
}

/// Direct evaluation of `exp(-λ)·λ^k/k!`. Only safe for `k` within
/// [`factorial::MAX_N`] and moderate `lambda`; [`mass`] picks the representation.
#[inline]
pub fn univariate(k: u8, lambda: f64, factorial: &impl Factorial) -> f64 {
    lambda.powi(k as i32) * f64::exp(-lambda) / factorial.get(k) as f64
}

fn ln_mass(k: u64, lambda: f64) -> f64 {
    -lambda + k as f64 * lambda.ln() - factorial::ln_factorial(k)
}
