//! Per-bucket and global aggregation of the monitored statistics

use crate::bucket::{Bucket, BucketIndex};
use crate::stats::StatSet;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Statistics of one bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketStats {
    pub bucket: Bucket,
    pub stats: StatSet,
}

/// Result of one aggregation pass: every bucket in order, plus the
/// ungrouped statistics over the whole column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    pub buckets: Vec<BucketStats>,
    pub global: StatSet,
}

impl Aggregation {
    pub fn bucket_labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.buckets.iter().map(|b| b.bucket.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// Groups a column by bucket and computes the full statistic set per group
#[derive(Debug, Clone, Copy, Default)]
pub struct BucketAggregator;

impl BucketAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Aggregate `values` (and optional `weights`) by the buckets of `index`.
    ///
    /// Every bucket of the index is reported, including declared buckets
    /// without rows and buckets whose values are all missing. A single
    /// degenerate bucket yields NaN statistics, never an error.
    #[instrument(skip_all, fields(rows = values.len(), buckets = index.n_buckets()))]
    pub fn aggregate(
        &self,
        values: &[Option<f64>],
        weights: Option<&[f64]>,
        index: &BucketIndex,
    ) -> Result<Aggregation> {
        if index.n_rows() != values.len() {
            return Err(Error::size_mismatch(values.len(), index.n_rows(), "bucket index"));
        }
        if let Some(w) = weights {
            if w.len() != values.len() {
                return Err(Error::size_mismatch(values.len(), w.len(), "weight column"));
            }
        }

        let global = StatSet::compute(values, weights)?;

        let mut buckets = Vec::with_capacity(index.n_buckets());
        for (bucket, rows) in index.buckets().iter().zip(index.groups()) {
            let bucket_values: Vec<Option<f64>> = rows.iter().map(|&r| values[r]).collect();
            let bucket_weights: Option<Vec<f64>> =
                weights.map(|w| rows.iter().map(|&r| w[r]).collect());

            let stats = StatSet::compute(&bucket_values, bucket_weights.as_deref())?;
            if stats.n_obs == 0 {
                debug!(bucket = %bucket, rows = rows.len(), "bucket has no non-missing values");
            }
            buckets.push(BucketStats {
                bucket: bucket.clone(),
                stats,
            });
        }

        debug!(n_obs = global.n_obs, n_missing = global.n_missing, "aggregation complete");
        Ok(Aggregation { buckets, global })
    }

    /// One ungrouped pass over the whole column
    pub fn aggregate_global(
        &self,
        values: &[Option<f64>],
        weights: Option<&[f64]>,
    ) -> Result<StatSet> {
        StatSet::compute(values, weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::BucketIndexBuilder;
    use approx::assert_relative_eq;

    fn index_of(labels: &[&str]) -> BucketIndex {
        let mut builder = BucketIndexBuilder::with_capacity(labels.len());
        for label in labels {
            builder.push_label(label);
        }
        builder.finish()
    }

    #[test]
    fn test_buckets_follow_key_order() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let index = index_of(&["2021-02", "2021-01", "2021-02", "2021-01"]);
        let agg = BucketAggregator::new().aggregate(&values, None, &index).unwrap();

        let labels: Vec<&str> = agg.bucket_labels().collect();
        assert_eq!(labels, ["2021-01", "2021-02"]);
        assert_relative_eq!(agg.buckets[0].stats.mean, 3.0);
        assert_relative_eq!(agg.buckets[1].stats.mean, 2.0);
        assert_relative_eq!(agg.global.mean, 2.5);
    }

    #[test]
    fn test_all_missing_bucket_is_kept() {
        let values = vec![Some(1.0), None, Some(2.0), None];
        let index = index_of(&["a", "b", "a", "b"]);
        let agg = BucketAggregator::new().aggregate(&values, None, &index).unwrap();

        assert_eq!(agg.buckets.len(), 2);
        let b = &agg.buckets[1].stats;
        assert_eq!(b.missing_rate, 1.0);
        assert!(b.p50.is_nan());
        assert!(b.mean.is_nan());
        assert!(b.sd.is_nan());
        assert_relative_eq!(agg.global.missing_rate, 0.5);
    }

    #[test]
    fn test_weighted_buckets() {
        let values = vec![Some(0.0), Some(10.0), Some(0.0), Some(10.0)];
        let weights = vec![3.0, 1.0, 1.0, 1.0];
        let index = index_of(&["x", "x", "y", "y"]);
        let agg = BucketAggregator::new()
            .aggregate(&values, Some(&weights[..]), &index)
            .unwrap();

        assert_relative_eq!(agg.buckets[0].stats.zero_rate, 0.75);
        assert_relative_eq!(agg.buckets[0].stats.mean, 2.5);
        assert_relative_eq!(agg.buckets[1].stats.zero_rate, 0.5);
        assert_relative_eq!(agg.global.zero_rate, 4.0 / 6.0);
    }

    #[test]
    fn test_zero_weight_bucket_is_undefined() {
        let values = vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)];
        let weights = vec![1.0, 1.0, 0.0, 0.0];
        let index = index_of(&["a", "a", "b", "b"]);
        let agg = BucketAggregator::new()
            .aggregate(&values, Some(&weights[..]), &index)
            .unwrap();

        let a = &agg.buckets[0].stats;
        assert_relative_eq!(a.mean, 1.5);
        assert_relative_eq!(a.p50, 1.5);

        let b = &agg.buckets[1].stats;
        assert_eq!(b.n_obs, 2);
        assert_eq!(b.missing_rate, 0.0);
        for stat in [b.p99, b.p75, b.p50, b.p25, b.p1, b.mean, b.sd, b.zero_rate] {
            assert!(stat.is_nan());
        }
        assert_relative_eq!(agg.global.mean, 1.5);
    }

    #[test]
    fn test_counts_add_up() {
        let values = vec![Some(1.0), None, Some(2.0), Some(f64::NAN), Some(5.0)];
        let index = index_of(&["a", "b", "b", "c", "a"]);
        let agg = BucketAggregator::new().aggregate(&values, None, &index).unwrap();

        let total: usize = agg.buckets.iter().map(|b| b.stats.n_obs + b.stats.n_missing).sum();
        assert_eq!(total, values.len());
        assert_eq!(agg.global.n_rows(), values.len());
    }

    #[test]
    fn test_global_matches_ungrouped_pass() {
        let values: Vec<Option<f64>> = (0..50).map(|i| Some(f64::from(i % 7))).collect();
        let labels: Vec<String> = (0..50).map(|i| format!("m{}", i % 4)).collect();
        let refs: Vec<&str> = labels.iter().map(String::as_str).collect();
        let aggregator = BucketAggregator::new();

        let agg = aggregator.aggregate(&values, None, &index_of(&refs)).unwrap();
        let global = aggregator.aggregate_global(&values, None).unwrap();
        assert_eq!(agg.global, global);
    }

    #[test]
    fn test_empty_input() {
        let agg = BucketAggregator::new()
            .aggregate(&[], None, &BucketIndexBuilder::default().finish())
            .unwrap();
        assert!(agg.is_empty());
        assert_eq!(agg.global.missing_rate, 1.0);
    }

    #[test]
    fn test_length_mismatch() {
        let index = index_of(&["a"]);
        assert!(BucketAggregator::new().aggregate(&[Some(1.0), Some(2.0)], None, &index).is_err());
    }
}
