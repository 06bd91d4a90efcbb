//! Weighted and unweighted summary primitives
//!
//! [`WeightedSample`] removes missing values once, sorts the remaining
//! observations and normalizes the weights so they sum to the number of
//! observations. Every statistic is then a cheap pass over that sample.
//!
//! Without weights the statistics are the textbook unweighted forms: type-7
//! quantiles, the arithmetic mean and the `n - 1` sample variance. With
//! weights all equal to one the results coincide with the unweighted ones.
//!
//! # Preconditions
//!
//! Weights must be finite and non-negative. Weights attached to missing
//! values are ignored. A sample whose observed weights are all zero keeps
//! its counts but every weighted statistic is undefined.

use crate::utils::{interpolate, is_missing, quantile_sorted};
use crate::{Error, Result};

/// Slack allowed when matching cumulative weights against a rank.
const CUMULATIVE_TOLERANCE: f64 = 1e-12;

/// A column with its missing values removed, sorted ascending.
#[derive(Debug, Clone)]
pub struct WeightedSample {
    values: Vec<f64>,
    /// Normalized to sum to `values.len()`, aligned with `values`
    weights: Option<Vec<f64>>,
    n_missing: usize,
    /// Observations present but carrying no weight
    weightless: bool,
}

impl WeightedSample {
    /// Build a sample from a raw column and an optional parallel weight column
    pub fn new(values: &[Option<f64>], weights: Option<&[f64]>) -> Result<Self> {
        let n_rows = values.len();
        let n_missing = values.iter().filter(|v| is_missing(**v)).count();

        let Some(weights) = weights else {
            let mut kept: Vec<f64> = values.iter().filter_map(|v| v.filter(|x| !x.is_nan())).collect();
            crate::utils::sort_in_place(&mut kept);
            return Ok(Self {
                values: kept,
                weights: None,
                n_missing,
                weightless: false,
            });
        };

        if weights.len() != n_rows {
            return Err(Error::size_mismatch(n_rows, weights.len(), "weight column"));
        }

        let mut pairs = Vec::with_capacity(n_rows - n_missing);
        for (value, &weight) in values.iter().zip(weights) {
            if is_missing(*value) {
                continue;
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidInput(format!(
                    "weights must be finite and non-negative, got {weight}"
                )));
            }
            pairs.push((value.unwrap_or_default(), weight));
        }
        pairs.sort_by(|a, b| a.0.total_cmp(&b.0));

        let total: f64 = pairs.iter().map(|(_, w)| w).sum();
        let weightless = !pairs.is_empty() && total <= 0.0;
        let scale = if weightless { 0.0 } else { pairs.len() as f64 / total };

        let (values, weights): (Vec<f64>, Vec<f64>) =
            pairs.into_iter().map(|(x, w)| (x, w * scale)).unzip();

        Ok(Self {
            values,
            weights: Some(weights),
            n_missing,
            weightless,
        })
    }

    /// Build an unweighted sample from values without missing entries
    pub fn from_values(values: &[f64]) -> Self {
        let mut kept: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();
        crate::utils::sort_in_place(&mut kept);
        Self {
            n_missing: values.len() - kept.len(),
            values: kept,
            weights: None,
            weightless: false,
        }
    }

    /// Number of non-missing observations
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of missing entries in the source column
    pub fn n_missing(&self) -> usize {
        self.n_missing
    }

    /// Number of rows in the source column, missing included
    pub fn n_rows(&self) -> usize {
        self.values.len() + self.n_missing
    }

    pub fn is_weighted(&self) -> bool {
        self.weights.is_some()
    }

    /// True when there are observations but their weights sum to zero
    pub fn is_weightless(&self) -> bool {
        self.weightless
    }

    fn require_support(&self, operation: &str) -> Result<()> {
        if self.is_empty() {
            return Err(Error::empty_input(operation));
        }
        if self.weightless {
            return Err(Error::InvalidInput(format!(
                "{operation} is undefined when every weight is zero"
            )));
        }
        Ok(())
    }

    /// Sorted non-missing values
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Quantiles in the order the probabilities were requested
    pub fn quantiles(&self, probs: &[f64]) -> Result<Vec<f64>> {
        if let Some(&p) = probs.iter().find(|p| !(0.0..=1.0).contains(*p)) {
            return Err(Error::invalid_quantile(p));
        }
        self.require_support("quantile")?;

        match &self.weights {
            None => Ok(probs.iter().map(|&p| quantile_sorted(&self.values, p)).collect()),
            Some(weights) => {
                let cumulative: Vec<f64> = weights
                    .iter()
                    .scan(0.0, |acc, w| {
                        *acc += w;
                        Some(*acc)
                    })
                    .collect();
                Ok(probs
                    .iter()
                    .map(|&p| weighted_quantile_sorted(&self.values, &cumulative, p))
                    .collect())
            }
        }
    }

    pub fn quantile(&self, p: f64) -> Result<f64> {
        Ok(self.quantiles(&[p])?[0])
    }

    pub fn mean(&self) -> Result<f64> {
        self.require_support("mean")?;
        Ok(match &self.weights {
            None => self.values.iter().sum::<f64>() / self.len() as f64,
            Some(w) => {
                let total: f64 = w.iter().sum();
                self.values.iter().zip(w).map(|(x, w)| w * x).sum::<f64>() / total
            }
        })
    }

    /// Unbiased variance, `sum(w (x - m)^2) / (sum(w) - 1)`.
    ///
    /// A single observation gives NaN.
    pub fn variance(&self) -> Result<f64> {
        let mean = self.mean()?;
        Ok(match &self.weights {
            None => {
                let ss: f64 = self.values.iter().map(|x| (x - mean) * (x - mean)).sum();
                ss / (self.len() as f64 - 1.0)
            }
            Some(w) => {
                let total: f64 = w.iter().sum();
                let ss: f64 = self
                    .values
                    .iter()
                    .zip(w)
                    .map(|(x, w)| w * (x - mean) * (x - mean))
                    .sum();
                ss / (total - 1.0)
            }
        })
    }

    pub fn std_dev(&self) -> Result<f64> {
        Ok(self.variance()?.sqrt())
    }

    /// Weighted fraction of non-missing values exactly equal to zero
    pub fn zero_rate(&self) -> Result<f64> {
        self.require_support("zero rate")?;
        Ok(match &self.weights {
            None => self.values.iter().filter(|&&x| x == 0.0).count() as f64 / self.len() as f64,
            Some(w) => {
                let total: f64 = w.iter().sum();
                let zeros: f64 = self
                    .values
                    .iter()
                    .zip(w)
                    .filter(|(x, _)| **x == 0.0)
                    .map(|(_, w)| w)
                    .sum();
                zeros / total
            }
        })
    }

    /// Fraction of all rows, missing included, that are missing
    pub fn missing_rate(&self) -> Result<f64> {
        let n_rows = self.n_rows();
        if n_rows == 0 {
            return Err(Error::empty_input("missing rate"));
        }
        Ok(self.n_missing as f64 / n_rows as f64)
    }
}

/// Weighted quantile over sorted values and their cumulative normalized weights.
///
/// The order statistic of rank `k` is the smallest value whose cumulative
/// weight reaches `k`; ranks `floor(h)` and `floor(h) + 1` with
/// `h = 1 + (n - 1) p` are interpolated linearly.
fn weighted_quantile_sorted(sorted: &[f64], cumulative: &[f64], p: f64) -> f64 {
    let n = sorted.len() as f64;
    let h = 1.0 + (n - 1.0) * p;
    let lo = h.floor();
    let hi = (lo + 1.0).min(n);

    let tolerance = CUMULATIVE_TOLERANCE * n;
    let order_statistic = |rank: f64| {
        let idx = cumulative.partition_point(|&c| c < rank - tolerance);
        sorted[idx.min(sorted.len() - 1)]
    };

    interpolate(order_statistic(lo), order_statistic(hi), h - lo)
}

/// Quantiles of a raw column, see [`WeightedSample::quantiles`]
pub fn weighted_quantiles(
    values: &[Option<f64>],
    weights: Option<&[f64]>,
    probs: &[f64],
) -> Result<Vec<f64>> {
    WeightedSample::new(values, weights)?.quantiles(probs)
}

pub fn weighted_mean(values: &[Option<f64>], weights: Option<&[f64]>) -> Result<f64> {
    WeightedSample::new(values, weights)?.mean()
}

pub fn weighted_std_dev(values: &[Option<f64>], weights: Option<&[f64]>) -> Result<f64> {
    WeightedSample::new(values, weights)?.std_dev()
}

pub fn zero_rate(values: &[Option<f64>], weights: Option<&[f64]>) -> Result<f64> {
    WeightedSample::new(values, weights)?.zero_rate()
}

pub fn missing_rate(values: &[Option<f64>]) -> Result<f64> {
    WeightedSample::new(values, None)?.missing_rate()
}
