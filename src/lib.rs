//! Time-bucketed summary statistics for monitoring distribution drift
//!
//! For a numeric variable of a table this computes, per time bucket and
//! globally, the weighted quantiles, mean, standard deviation and zero and
//! missing rates that a drift report plots, and decides whether the
//! variable's distribution view should be drawn on a log scale.
//!
//! - [`core`] works on typed slices and has no table dependency
//! - [`polars`] is the `DataFrame` entry point ([`DriftSummaryExt`])
//!
//! # Example
//!
//! ```rust
//! use ::polars::prelude::*;
//! use drift_stats::{DriftSummaryExt, SummaryRequest, TransformReason};
//!
//! let df = df![
//!     "balance" => [120.0, 80.5, 0.0, 95.0, 101.0, 87.0],
//!     "month" => ["2021-01", "2021-01", "2021-02", "2021-02", "2021-03", "2021-03"],
//!     "year" => ["2021"; 6],
//! ]
//! .unwrap();
//!
//! let summary = df
//!     .drift_summary(&SummaryRequest::new("balance", "month", "year").with_seed(1))
//!     .unwrap();
//!
//! assert_eq!(summary.wide.buckets, ["2021-01", "2021-02", "2021-03"]);
//! assert_eq!(summary.decision().reason, TransformReason::SkippedNonPositive);
//! ```

pub use drift_core as core;
pub use drift_polars as polars;

pub use drift_core::{
    Aggregation, BitIdentical, BoxplotSummary, Bucket, BucketAggregator, BucketIndex,
    BucketIndexBuilder, DistributionPolicy, DistributionView, LongSummaryTable, Provenance,
    ReshapeEngine, StatName, StatSet, TransformDecision, TransformReason, WeightedSample,
    WideSummaryTable,
};
pub use drift_polars::{
    DriftSummaryExt, Palette, PlotAesthetics, RenderConfig, Rendered, SummaryBundle,
    SummaryOrchestrator, SummaryRenderer, SummaryRequest, ToDataFrame,
};
