//! Shared fixtures for integration tests

#![allow(dead_code)]

pub use approx::assert_relative_eq;

use drift_core::{BucketIndex, BucketIndexBuilder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, LogNormal, Normal};

pub const EPSILON: f64 = 1e-9;

/// 1000 positive balances: a dense body and a long right tail
pub fn balance() -> Vec<f64> {
    (0..980)
        .map(|i| 10.0 + f64::from(i) * 0.01)
        .chain((0..20).map(|j| 60.0 + 5.0 * f64::from(j)))
        .collect()
}

pub fn as_column(values: &[f64]) -> Vec<Option<f64>> {
    values.iter().copied().map(Some).collect()
}

/// Reproducible log-normal column with roughly `missing` share of nulls
pub fn lognormal_column(n: usize, missing: f64, seed: u64) -> Vec<Option<f64>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = LogNormal::new(2.0, 0.8).unwrap();
    (0..n)
        .map(|_| (!rng.gen_bool(missing)).then(|| dist.sample(&mut rng)))
        .collect()
}

pub fn normal_column(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let dist = Normal::new(100.0, 15.0).unwrap();
    (0..n).map(|_| dist.sample(&mut rng)).collect()
}

/// Monthly buckets `YYYY-MM`, assigned round-robin
pub fn monthly_index(n: usize, n_months: usize) -> BucketIndex {
    let mut builder = BucketIndexBuilder::with_capacity(n);
    for i in 0..n {
        let month = i % n_months;
        builder.push_label(&format!("{}-{:02}", 2020 + month / 12, month % 12 + 1));
    }
    builder.finish()
}

/// Ordinal buckets from explicit per-row codes
pub fn index_from_codes(codes: &[i64]) -> BucketIndex {
    let mut builder = BucketIndexBuilder::with_capacity(codes.len());
    for &code in codes {
        builder.push_ordinal(code, || code.to_string());
    }
    builder.finish()
}

/// Equality treating two NaNs as equal
pub fn same_or_both_nan(a: f64, b: f64, tol: f64) -> bool {
    (a.is_nan() && b.is_nan()) || (a - b).abs() <= tol
}
