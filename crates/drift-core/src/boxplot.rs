//! Five-number summaries for the distribution view

use crate::utils::{quantile_sorted, sorted};
use serde::{Deserialize, Serialize};

/// Whisker reach in units of the interquartile range
pub const WHISKER_IQR: f64 = 1.5;

/// Box-and-whisker statistics of one coarse bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotSummary {
    pub bucket: String,
    /// Non-missing observations in the basis
    pub n: usize,
    /// Smallest observation within 1.5 IQR below the first quartile
    pub lower: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// Largest observation within 1.5 IQR above the third quartile
    pub upper: f64,
    /// Observations beyond either whisker
    pub outliers: usize,
}

impl BoxplotSummary {
    /// Summarize the observations of one bucket; NaN values are ignored.
    ///
    /// A bucket without observations has `n == 0` and NaN statistics.
    pub fn from_values(bucket: impl Into<String>, values: &[f64]) -> Self {
        let data: Vec<f64> = sorted(values).into_iter().filter(|x| !x.is_nan()).collect();
        let bucket = bucket.into();

        if data.is_empty() {
            return Self {
                bucket,
                n: 0,
                lower: f64::NAN,
                q1: f64::NAN,
                median: f64::NAN,
                q3: f64::NAN,
                upper: f64::NAN,
                outliers: 0,
            };
        }

        let q1 = quantile_sorted(&data, 0.25);
        let median = quantile_sorted(&data, 0.5);
        let q3 = quantile_sorted(&data, 0.75);
        let reach = WHISKER_IQR * (q3 - q1);
        let (lo_fence, hi_fence) = (q1 - reach, q3 + reach);

        let within = |x: &f64| *x >= lo_fence && *x <= hi_fence;
        let lower = data.iter().copied().find(within).unwrap_or(q1);
        let upper = data.iter().copied().rev().find(within).unwrap_or(q3);
        let outliers = data.iter().filter(|x| !within(*x)).count();

        Self {
            bucket,
            n: data.len(),
            lower,
            q1,
            median,
            q3,
            upper,
            outliers,
        }
    }

    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_outlier_beyond_whisker() {
        let mut values: Vec<f64> = (1..=10).map(f64::from).collect();
        values.push(100.0);
        let summary = BoxplotSummary::from_values("2021", &values);

        assert_eq!(summary.n, 11);
        assert_relative_eq!(summary.q1, 3.5);
        assert_relative_eq!(summary.median, 6.0);
        assert_relative_eq!(summary.q3, 8.5);
        assert_relative_eq!(summary.iqr(), 5.0);
        assert_relative_eq!(summary.lower, 1.0);
        assert_relative_eq!(summary.upper, 10.0);
        assert_eq!(summary.outliers, 1);
    }

    #[test]
    fn test_no_outliers() {
        let values: Vec<f64> = (1..=9).map(f64::from).collect();
        let summary = BoxplotSummary::from_values("q", &values);
        assert_relative_eq!(summary.lower, 1.0);
        assert_relative_eq!(summary.upper, 9.0);
        assert_eq!(summary.outliers, 0);
    }

    #[test]
    fn test_empty_bucket() {
        let summary = BoxplotSummary::from_values("NA", &[f64::NAN]);
        assert!(summary.is_empty());
        assert!(summary.median.is_nan());
        assert_eq!(summary.outliers, 0);
    }

    #[test]
    fn test_single_value() {
        let summary = BoxplotSummary::from_values("x", &[4.0]);
        assert_eq!(summary.n, 1);
        assert_eq!(summary.lower, 4.0);
        assert_eq!(summary.upper, 4.0);
        assert_eq!(summary.median, 4.0);
    }
}
