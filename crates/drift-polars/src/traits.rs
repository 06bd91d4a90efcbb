//! Extension trait for drift summaries on Polars DataFrames

use crate::{Result, SummaryBundle, SummaryOrchestrator, SummaryRequest};
use polars::prelude::*;

/// Extension trait for drift summaries on Polars DataFrames
pub trait DriftSummaryExt {
    /// Summarize one variable over its time buckets
    ///
    /// # Arguments
    /// * `request` - Variable, weight and bucket columns plus policy settings
    ///
    /// # Returns
    /// Long and wide summary tables and the distribution view
    fn drift_summary(&self, request: &SummaryRequest) -> Result<SummaryBundle>;

    /// Summarize several variables, one result per request in request order
    ///
    /// A failing request does not affect the others.
    fn drift_summaries(&self, requests: &[SummaryRequest]) -> Vec<Result<SummaryBundle>>;
}

impl DriftSummaryExt for DataFrame {
    fn drift_summary(&self, request: &SummaryRequest) -> Result<SummaryBundle> {
        SummaryOrchestrator::new().summarize(self, request)
    }

    fn drift_summaries(&self, requests: &[SummaryRequest]) -> Vec<Result<SummaryBundle>> {
        SummaryOrchestrator::new().summarize_many(self, requests)
    }
}
