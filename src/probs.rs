//! Utilities for working with probabilities: sampling, binomial proportions and their
//! confidence intervals.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use tinyrand::Rand;

/// A uniformly distributed value in `[0, 1)`, built from the top 53 bits of a `u64`.
#[inline]
pub fn random_f64(rand: &mut impl Rand) -> f64 {
    (rand.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
}

/// A single Bernoulli trial with success probability `prob`. A probability of 0 never succeeds;
/// a probability of 1 always does.
#[inline]
pub fn bernoulli(prob: f64, rand: &mut impl Rand) -> bool {
    random_f64(rand) < prob
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fraction {
    pub numerator: u64,
    pub denominator: u64,
}
impl Fraction {
    pub fn quotient(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lower: f64,
    pub upper: f64,
}
impl Interval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:.4}, {:.4}]", self.lower, self.upper)
    }
}

/// Wilson score interval for a binomial proportion at the given two-sided confidence `level`.
/// Unlike the normal approximation, it stays inside `[0, 1]` and keeps a sensible width when the
/// observed proportion is near 0 or 1.
pub fn wilson_interval(successes: &Fraction, level: f64) -> Interval {
    debug_assert!(successes.denominator > 0);
    debug_assert!(level > 0.0 && level < 1.0, "invalid confidence level {level}");

    let n = successes.denominator as f64;
    let p = successes.quotient();
    let z = z_score(level);
    let z_sq = z * z;

    let denominator = 1.0 + z_sq / n;
    let centre = p + z_sq / (2.0 * n);
    let spread = z * ((p * (1.0 - p) + z_sq / (4.0 * n)) / n).sqrt();

    // clamping only absorbs rounding at the extremes
    Interval {
        lower: f64::max(0.0, (centre - spread) / denominator),
        upper: f64::min(1.0, (centre + spread) / denominator),
    }
}

/// The standard normal critical value for a two-sided interval at the given confidence `level`,
/// e.g., 1.959964 for 0.95.
pub fn z_score(level: f64) -> f64 {
    inverse_normal_cdf(1.0 - (1.0 - level) / 2.0)
}

/// Quantile function of the standard normal distribution, after Acklam. Relative error is below
/// 1.15e-9 across the open interval (0, 1).
pub fn inverse_normal_cdf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    debug_assert!(p > 0.0 && p < 1.0, "invalid quantile {p}");

    fn tail(q: f64) -> f64 {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

#[cfg(test)]
mod tests;
