//! Higher-order moments
//!
//! Classical moment skewness, used by the transform policy to decide whether
//! a log scale is worth applying.

use crate::{Error, Result};

/// Calculate classical (moment) skewness `g1 = m3 / m2^(3/2)`
///
/// NaN values are ignored. Constant data has zero skewness. Fewer than three
/// observations is an error.
pub fn classical_skewness(sample: &[f64]) -> Result<f64> {
    let kept: Vec<f64> = sample.iter().copied().filter(|x| !x.is_nan()).collect();
    if kept.len() < 3 {
        return Err(Error::InsufficientData { expected: 3, actual: kept.len() });
    }

    let n = kept.len() as f64;
    let mean = kept.iter().sum::<f64>() / n;

    let variance = kept
        .iter()
        .map(|&x| {
            let diff = x - mean;
            diff * diff
        })
        .sum::<f64>()
        / n;

    if variance.abs() < f64::EPSILON {
        return Ok(0.0);
    }

    let std_dev = variance.sqrt();
    let skewness = kept
        .iter()
        .map(|&x| {
            let normalized = (x - mean) / std_dev;
            normalized * normalized * normalized
        })
        .sum::<f64>()
        / n;

    Ok(skewness)
}
