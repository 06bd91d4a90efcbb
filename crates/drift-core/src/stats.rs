//! The nine monitored statistics and their computation for one sample

use crate::weighted::WeightedSample;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monitored statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatName {
    P99,
    P75,
    P50,
    P25,
    P1,
    Mean,
    Sd,
    ZeroRate,
    MissingRate,
}

impl StatName {
    /// Every statistic, in wide-table row order
    pub const ALL: [StatName; 9] = [
        StatName::P99,
        StatName::P75,
        StatName::P50,
        StatName::P25,
        StatName::P1,
        StatName::Mean,
        StatName::Sd,
        StatName::ZeroRate,
        StatName::MissingRate,
    ];

    /// Per-bucket statistics carried by the long table
    pub const LONG: [StatName; 6] = [
        StatName::P99,
        StatName::P50,
        StatName::P1,
        StatName::Mean,
        StatName::ZeroRate,
        StatName::MissingRate,
    ];

    /// Quantile statistics, highest first
    pub const QUANTILES: [StatName; 5] = [
        StatName::P99,
        StatName::P75,
        StatName::P50,
        StatName::P25,
        StatName::P1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P99 => "p99",
            Self::P75 => "p75",
            Self::P50 => "p50",
            Self::P25 => "p25",
            Self::P1 => "p1",
            Self::Mean => "mean",
            Self::Sd => "sd",
            Self::ZeroRate => "zerorate",
            Self::MissingRate => "missingrate",
        }
    }

    /// Probability for quantile statistics
    pub fn probability(&self) -> Option<f64> {
        match self {
            Self::P99 => Some(0.99),
            Self::P75 => Some(0.75),
            Self::P50 => Some(0.50),
            Self::P25 => Some(0.25),
            Self::P1 => Some(0.01),
            _ => None,
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All nine statistics for one sample (a bucket or the whole table)
///
/// Statistics that are undefined for the sample (no non-missing values, or
/// a single value for `sd`) are NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSet {
    pub p99: f64,
    pub p75: f64,
    pub p50: f64,
    pub p25: f64,
    pub p1: f64,
    pub mean: f64,
    pub sd: f64,
    pub zero_rate: f64,
    pub missing_rate: f64,
    /// Non-missing observations the statistics were computed from
    pub n_obs: usize,
    /// Missing rows in the sample
    pub n_missing: usize,
}

impl StatSet {
    /// Compute every statistic for a column and optional weights.
    ///
    /// Only structural problems (length mismatch, invalid weights) are
    /// errors. A sample without rows counts as entirely missing.
    pub fn compute(values: &[Option<f64>], weights: Option<&[f64]>) -> Result<Self> {
        let sample = WeightedSample::new(values, weights)?;
        Self::from_sample(&sample)
    }

    pub fn from_sample(sample: &WeightedSample) -> Result<Self> {
        let probs = StatName::QUANTILES.map(|s| s.probability().unwrap_or(f64::NAN));
        let quantiles = match sample.quantiles(&probs) {
            Ok(q) => q,
            Err(e) if e.is_undefined_statistic() => vec![f64::NAN; probs.len()],
            Err(e) => return Err(e),
        };

        let missing_rate = match sample.missing_rate() {
            Ok(rate) => rate,
            Err(e) if e.is_undefined_statistic() => 1.0,
            Err(e) => return Err(e),
        };

        Ok(Self {
            p99: quantiles[0],
            p75: quantiles[1],
            p50: quantiles[2],
            p25: quantiles[3],
            p1: quantiles[4],
            mean: or_nan(sample.mean())?,
            sd: or_nan(sample.std_dev())?,
            zero_rate: or_nan(sample.zero_rate())?,
            missing_rate,
            n_obs: sample.len(),
            n_missing: sample.n_missing(),
        })
    }

    pub fn get(&self, stat: StatName) -> f64 {
        match stat {
            StatName::P99 => self.p99,
            StatName::P75 => self.p75,
            StatName::P50 => self.p50,
            StatName::P25 => self.p25,
            StatName::P1 => self.p1,
            StatName::Mean => self.mean,
            StatName::Sd => self.sd,
            StatName::ZeroRate => self.zero_rate,
            StatName::MissingRate => self.missing_rate,
        }
    }

    /// Values in wide-table row order
    pub fn to_array(&self) -> [f64; 9] {
        StatName::ALL.map(|s| self.get(s))
    }

    /// Rows the statistics describe, missing included
    pub fn n_rows(&self) -> usize {
        self.n_obs + self.n_missing
    }

    /// Upper one-sigma control limit
    pub fn upper_control_limit(&self) -> f64 {
        self.mean + self.sd
    }

    /// Lower one-sigma control limit
    pub fn lower_control_limit(&self) -> f64 {
        self.mean - self.sd
    }
}

fn or_nan(result: Result<f64>) -> Result<f64> {
    match result {
        Ok(v) => Ok(v),
        Err(e) if e.is_undefined_statistic() => Ok(f64::NAN),
        Err(e) => Err(e),
    }
}
