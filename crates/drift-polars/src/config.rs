//! Configuration of a summary request

use drift_core::DEFAULT_SKEW_THRESHOLD;
use polars::prelude::Series;

/// What to summarize and how
///
/// The variable and both bucket keys are required; everything else has a
/// default. The log-scale decision uses a skew threshold of
/// [`DEFAULT_SKEW_THRESHOLD`] unless changed or disabled.
#[derive(Debug, Clone)]
pub struct SummaryRequest {
    /// Numeric column to summarize
    pub variable: String,
    /// Optional non-negative weight column
    pub weight: Option<String>,
    /// Bucket key of the time-series statistics
    pub fine_key: String,
    /// Bucket key of the distribution view
    pub coarse_key: String,
    /// `None` disables the log-scale transform
    pub skew_threshold: Option<f64>,
    /// Row bound of the boxplot basis
    pub sample_bound: Option<usize>,
    pub seed: Option<u64>,
    /// Fine-key values reported even when no row carries them
    pub bucket_domain: Option<Series>,
}

impl SummaryRequest {
    pub fn new(
        variable: impl Into<String>,
        fine_key: impl Into<String>,
        coarse_key: impl Into<String>,
    ) -> Self {
        Self {
            variable: variable.into(),
            weight: None,
            fine_key: fine_key.into(),
            coarse_key: coarse_key.into(),
            skew_threshold: Some(DEFAULT_SKEW_THRESHOLD),
            sample_bound: None,
            seed: None,
            bucket_domain: None,
        }
    }

    pub fn with_weight(mut self, weight: impl Into<String>) -> Self {
        self.weight = Some(weight.into());
        self
    }

    /// Set the skewness above which the distribution view is log-scaled.
    ///
    /// Negative or non-finite values fall back to the default with a warning.
    pub fn with_skew_threshold(mut self, threshold: f64) -> Self {
        self.skew_threshold = Some(threshold);
        self
    }

    /// Never log-scale the distribution view
    pub fn without_log_scale(mut self) -> Self {
        self.skew_threshold = None;
        self
    }

    /// Bound the number of rows used for the boxplots and the transform decision
    pub fn with_sample_bound(mut self, bound: usize) -> Self {
        self.sample_bound = Some(bound);
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Declare the fine-key values to report, with the same dtype as the key
    pub fn with_bucket_domain(mut self, domain: Series) -> Self {
        self.bucket_domain = Some(domain);
        self
    }
}
