//! Core numerics for drift monitoring summaries
//!
//! This crate computes, for one numeric column grouped by a time bucket, the
//! statistics a drift report plots over time, and decides how the
//! distribution view of that column should be scaled.
//!
//! # Pipeline
//!
//! 1. **Weighted statistics** ([`weighted`], [`stats`]) - quantiles, mean,
//!    standard deviation and zero/missing rates with optional weights
//! 2. **Aggregation** ([`aggregate`]) - the statistic set per bucket plus one
//!    global pass
//! 3. **Reshaping** ([`reshape`]) - long layout for plotting, wide layout
//!    for reporting
//! 4. **Distribution view** ([`distribution`], [`policy`]) - bounded
//!    subsample, log-scale decision and boxplots per coarse bucket
//!
//! Everything operates on typed slices; table handling lives in
//! `drift-polars`.
//!
//! # Example
//!
//! ```rust
//! use drift_core::{BucketAggregator, BucketIndexBuilder, ReshapeEngine};
//!
//! let values = vec![Some(1.0), Some(2.0), None, Some(4.0)];
//! let mut buckets = BucketIndexBuilder::default();
//! for month in ["2021-01", "2021-01", "2021-02", "2021-02"] {
//!     buckets.push_label(month);
//! }
//!
//! let aggregation = BucketAggregator::new()
//!     .aggregate(&values, None, &buckets.finish())
//!     .unwrap();
//! let (long, wide) = ReshapeEngine::new().reshape(&aggregation);
//!
//! assert_eq!(wide.column_names(), ["variable", "global", "2021-01", "2021-02"]);
//! assert_eq!(long.value("2021-02", "missingrate"), Some(0.5));
//! ```

pub mod aggregate;
pub mod boxplot;
pub mod bucket;
pub mod distribution;
pub mod error;
pub mod identity;
pub mod moments;
pub mod policy;
pub mod reshape;
pub mod sample;
pub mod stats;
pub mod utils;
pub mod weighted;

pub use aggregate::{Aggregation, BucketAggregator, BucketStats};
pub use boxplot::BoxplotSummary;
pub use bucket::{Bucket, BucketIndex, BucketIndexBuilder, BucketKey, MISSING_BUCKET_LABEL};
pub use distribution::{analyze, DistributionView};
pub use error::{Error, Result};
pub use identity::BitIdentical;
pub use moments::classical_skewness;
pub use policy::{
    DistributionPolicy, TransformDecision, TransformReason, CARDINALITY_LIMIT,
    DEFAULT_SKEW_THRESHOLD,
};
pub use reshape::{
    LongRow, LongSummaryTable, Provenance, ReferenceStat, ReshapeEngine, WideSummaryTable,
};
pub use sample::subsample_indices;
pub use stats::{StatName, StatSet};
pub use weighted::{
    missing_rate, weighted_mean, weighted_quantiles, weighted_std_dev, zero_rate, WeightedSample,
};
