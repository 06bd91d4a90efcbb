//! Distribution view: transform decision plus per-bucket boxplots
//!
//! Built on a (possibly subsampled) basis of the column, grouped by the
//! coarse bucket key. The time-series statistics never see the sample.

use crate::boxplot::BoxplotSummary;
use crate::bucket::BucketIndex;
use crate::policy::{DistributionPolicy, TransformDecision};
use crate::sample::{resolve_seed, subsample_indices};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Everything the renderer needs for the distribution panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionView {
    pub decision: TransformDecision,
    /// Rows in the boxplot basis, missing values included
    pub sample_size: usize,
    /// Seed the sample was drawn with
    pub seed: u64,
    /// Boxplots on the raw scale, one per coarse bucket
    pub boxplots: Vec<BoxplotSummary>,
    /// Boxplots on the log10 scale, present when the transform applies
    pub log_boxplots: Option<Vec<BoxplotSummary>>,
}

impl DistributionView {
    /// Boxplots on the scale selected by the decision
    pub fn active_boxplots(&self) -> &[BoxplotSummary] {
        match (&self.log_boxplots, self.decision.apply_log) {
            (Some(log), true) => log,
            _ => &self.boxplots,
        }
    }

    /// Drop the log scale after a downstream failure
    pub fn into_fallback(self) -> Self {
        Self {
            decision: self.decision.into_fallback(),
            log_boxplots: None,
            ..self
        }
    }
}

/// Build the distribution view of `values` grouped by `coarse`.
///
/// With a `bound`, the basis is a uniform sample of `min(rows, bound)` rows
/// drawn with `seed` (a fresh one when unset). The input is never reordered.
#[instrument(skip_all, fields(rows = values.len(), buckets = coarse.n_buckets(), bound = ?bound))]
pub fn analyze(
    values: &[Option<f64>],
    coarse: &BucketIndex,
    policy: &DistributionPolicy,
    bound: Option<usize>,
    seed: Option<u64>,
) -> Result<DistributionView> {
    if coarse.n_rows() != values.len() {
        return Err(Error::size_mismatch(values.len(), coarse.n_rows(), "coarse bucket index"));
    }

    let seed = resolve_seed(seed);
    let rows = subsample_indices(values.len(), bound, seed);
    let codes = coarse.codes();

    let mut groups: Vec<Vec<f64>> = vec![Vec::new(); coarse.n_buckets()];
    let mut basis = Vec::with_capacity(rows.len());
    for &row in &rows {
        if let Some(x) = values[row].filter(|x| !x.is_nan()) {
            groups[codes[row] as usize].push(x);
            basis.push(x);
        }
    }
    debug!(sample_size = rows.len(), observed = basis.len(), seed, "boxplot basis drawn");

    let decision = policy.evaluate(&basis);

    let summarize = |groups: &[Vec<f64>]| -> Vec<BoxplotSummary> {
        coarse
            .buckets()
            .iter()
            .zip(groups)
            .map(|(bucket, data)| BoxplotSummary::from_values(bucket.label.clone(), data))
            .collect()
    };

    let boxplots = summarize(&groups);
    let log_boxplots = decision.apply_log.then(|| {
        let logged: Vec<Vec<f64>> = groups
            .iter()
            .map(|g| g.iter().map(|x| x.log10()).collect())
            .collect();
        summarize(&logged)
    });

    Ok(DistributionView {
        decision,
        sample_size: rows.len(),
        seed,
        boxplots,
        log_boxplots,
    })
}
