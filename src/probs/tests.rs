use assert_float_eq::*;
use tinyrand::{Seeded, StdRand};
use tinyrand_alloc::Mock;

use super::*;

#[test]
fn random_f64_bounds() {
    let mut rand = Mock::default().with_next_u128(|_| 0);
    assert_eq!(0.0, random_f64(&mut rand));

    let mut rand = Mock::default().with_next_u128(|_| u64::MAX as u128);
    let value = random_f64(&mut rand);
    assert!(value < 1.0);
    assert_f64_near!(1.0, value, 8);
}

#[test]
fn bernoulli_certain_outcomes() {
    let mut rand = Mock::default().with_next_u128(|_| u64::MAX as u128);
    assert!(bernoulli(1.0, &mut rand));
    assert!(!bernoulli(0.999, &mut rand));

    let mut rand = Mock::default().with_next_u128(|_| 0);
    assert!(!bernoulli(0.0, &mut rand));
    assert!(bernoulli(0.001, &mut rand));
}

#[test]
fn bernoulli_frequency() {
    let mut rand = StdRand::seed(42);
    const TRIALS: usize = 100_000;
    let successes = (0..TRIALS).filter(|_| bernoulli(0.3, &mut rand)).count();
    assert_float_absolute_eq!(0.3, successes as f64 / TRIALS as f64, 0.01);
}

#[test]
fn fraction_quotient_and_display() {
    let frac = Fraction {
        numerator: 3,
        denominator: 4,
    };
    assert_f64_near!(0.75, frac.quotient());
    assert_eq!("3/4", frac.to_string());
}

#[test]
fn z_score_common_levels() {
    assert_float_absolute_eq!(1.959964, z_score(0.95), 1e-6);
    assert_float_absolute_eq!(2.575829, z_score(0.99), 1e-6);
    assert_float_absolute_eq!(1.644854, z_score(0.90), 1e-6);
}

#[test]
fn inverse_normal_cdf_symmetry_and_tails() {
    assert_float_absolute_eq!(0.0, inverse_normal_cdf(0.5), 1e-12);
    assert_float_absolute_eq!(-inverse_normal_cdf(0.01), inverse_normal_cdf(0.99), 1e-9);
    assert_float_absolute_eq!(-3.090232, inverse_normal_cdf(0.001), 1e-5);
}

#[test]
fn wilson_midpoint() {
    let interval = wilson_interval(
        &Fraction {
            numerator: 50,
            denominator: 100,
        },
        0.95,
    );
    assert_float_absolute_eq!(0.403831, interval.lower, 1e-4);
    assert_float_absolute_eq!(0.596169, interval.upper, 1e-4);
    assert_float_absolute_eq!(0.5, (interval.lower + interval.upper) / 2.0, 1e-12);
}

#[test]
fn wilson_zero_successes() {
    let interval = wilson_interval(
        &Fraction {
            numerator: 0,
            denominator: 10,
        },
        0.95,
    );
    assert_float_absolute_eq!(0.0, interval.lower, 1e-12);
    assert_float_absolute_eq!(0.277533, interval.upper, 1e-4);
}

#[test]
fn wilson_all_successes() {
    let interval = wilson_interval(
        &Fraction {
            numerator: 10,
            denominator: 10,
        },
        0.95,
    );
    assert_float_absolute_eq!(0.722467, interval.lower, 1e-4);
    assert_float_absolute_eq!(1.0, interval.upper, 1e-12);
}

#[test]
fn wilson_narrows_with_sample_size() {
    let small = wilson_interval(
        &Fraction {
            numerator: 60,
            denominator: 100,
        },
        0.95,
    );
    let large = wilson_interval(
        &Fraction {
            numerator: 6_000,
            denominator: 10_000,
        },
        0.95,
    );
    assert!(large.width() < small.width());
    assert!(large.width() / 2.0 < 1.96 * (0.25f64 / 10_000.0).sqrt() + 1e-6);
}

#[test]
fn interval_contains() {
    let interval = Interval {
        lower: 0.4,
        upper: 0.6,
    };
    assert!(interval.contains(0.4));
    assert!(interval.contains(0.5));
    assert!(!interval.contains(0.61));
    assert_eq!("[0.4000, 0.6000]", interval.to_string());
}
