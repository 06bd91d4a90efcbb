//! Long and wide layouts of an [`Aggregation`]
//!
//! The long table feeds the time-series plot: per-bucket rows for a subset
//! of the statistics, plus the global reference statistics repeated for
//! every bucket so each reference line shares the bucket axis. The wide
//! table is the report layout, one row per statistic and one column per
//! bucket after a `global` column.

use crate::aggregate::Aggregation;
use crate::stats::{StatName, StatSet};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Column holding the statistic name in the wide table
pub const VARIABLE_COLUMN: &str = "variable";
/// Column holding the global statistics in the wide table
pub const GLOBAL_COLUMN: &str = "global";

/// Whether a long-table row is a bucket statistic or a global reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Provenance {
    PerBucket,
    Global,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerBucket => "per-bucket",
            Self::Global => "global",
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Global reference series of the long table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReferenceStat {
    P99,
    P50,
    P1,
    /// Global mean plus one standard deviation
    UpperControl,
    /// Global mean minus one standard deviation
    LowerControl,
}

impl ReferenceStat {
    pub const ALL: [ReferenceStat; 5] = [
        ReferenceStat::P99,
        ReferenceStat::P50,
        ReferenceStat::P1,
        ReferenceStat::UpperControl,
        ReferenceStat::LowerControl,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::P99 => "p99_g",
            Self::P50 => "p50_g",
            Self::P1 => "p1_g",
            Self::UpperControl => "cl1",
            Self::LowerControl => "cl2",
        }
    }

    pub fn value(&self, global: &StatSet) -> f64 {
        match self {
            Self::P99 => global.p99,
            Self::P50 => global.p50,
            Self::P1 => global.p1,
            Self::UpperControl => global.upper_control_limit(),
            Self::LowerControl => global.lower_control_limit(),
        }
    }
}

/// One row of the long table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    pub bucket: String,
    pub statistic: String,
    pub value: f64,
    pub provenance: Provenance,
}

/// Long layout: (bucket, statistic, value, provenance)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LongSummaryTable {
    pub rows: Vec<LongRow>,
}

impl LongSummaryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LongRow> {
        self.rows.iter()
    }

    /// Value of `statistic` in `bucket`, if present
    pub fn value(&self, bucket: &str, statistic: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.bucket == bucket && r.statistic == statistic)
            .map(|r| r.value)
    }

    pub fn with_provenance(&self, provenance: Provenance) -> impl Iterator<Item = &LongRow> {
        self.rows.iter().filter(move |r| r.provenance == provenance)
    }
}

/// Wide layout: one row per statistic, `global` then one column per bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WideSummaryTable {
    /// Row labels, always [`StatName::ALL`]
    pub statistics: Vec<StatName>,
    pub global: Vec<f64>,
    /// Bucket labels in ascending order
    pub buckets: Vec<String>,
    /// One column per bucket, aligned with `statistics`
    pub columns: Vec<Vec<f64>>,
}

impl WideSummaryTable {
    /// Column names in output order: `variable`, `global`, then the buckets
    pub fn column_names(&self) -> Vec<&str> {
        [VARIABLE_COLUMN, GLOBAL_COLUMN]
            .into_iter()
            .chain(self.buckets.iter().map(String::as_str))
            .collect()
    }

    pub fn n_rows(&self) -> usize {
        self.statistics.len()
    }

    pub fn bucket_column(&self, bucket: &str) -> Option<&[f64]> {
        self.buckets
            .iter()
            .position(|b| b == bucket)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn global_value(&self, stat: StatName) -> Option<f64> {
        self.statistics
            .iter()
            .position(|s| *s == stat)
            .map(|i| self.global[i])
    }
}

/// Builds the long and wide layouts from an aggregation
#[derive(Debug, Clone, Copy, Default)]
pub struct ReshapeEngine;

impl ReshapeEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn long(&self, aggregation: &Aggregation) -> LongSummaryTable {
        let n_buckets = aggregation.buckets.len();
        let mut rows =
            Vec::with_capacity(n_buckets * (StatName::LONG.len() + ReferenceStat::ALL.len()));

        for bucket in &aggregation.buckets {
            for stat in StatName::LONG {
                rows.push(LongRow {
                    bucket: bucket.bucket.label.clone(),
                    statistic: stat.as_str().to_string(),
                    value: bucket.stats.get(stat),
                    provenance: Provenance::PerBucket,
                });
            }
        }

        // Replicated per bucket so every reference series spans the bucket axis
        for bucket in &aggregation.buckets {
            for reference in ReferenceStat::ALL {
                rows.push(LongRow {
                    bucket: bucket.bucket.label.clone(),
                    statistic: reference.as_str().to_string(),
                    value: reference.value(&aggregation.global),
                    provenance: Provenance::Global,
                });
            }
        }

        LongSummaryTable { rows }
    }

    pub fn wide(&self, aggregation: &Aggregation) -> WideSummaryTable {
        WideSummaryTable {
            statistics: StatName::ALL.to_vec(),
            global: aggregation.global.to_array().to_vec(),
            buckets: aggregation.bucket_labels().map(str::to_string).collect(),
            columns: aggregation
                .buckets
                .iter()
                .map(|b| b.stats.to_array().to_vec())
                .collect(),
        }
    }

    pub fn reshape(&self, aggregation: &Aggregation) -> (LongSummaryTable, WideSummaryTable) {
        (self.long(aggregation), self.wide(aggregation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::BucketAggregator;
    use crate::bucket::BucketIndexBuilder;
    use approx::assert_relative_eq;

    fn aggregation() -> Aggregation {
        let values: Vec<Option<f64>> = vec![
            Some(1.0),
            Some(2.0),
            Some(3.0),
            Some(10.0),
            Some(20.0),
            None,
        ];
        let mut builder = BucketIndexBuilder::default();
        for label in ["2021-01", "2021-01", "2021-01", "2021-02", "2021-02", "2021-02"] {
            builder.push_label(label);
        }
        BucketAggregator::new()
            .aggregate(&values, None, &builder.finish())
            .unwrap()
    }

    #[test]
    fn test_long_layout() {
        let agg = aggregation();
        let long = ReshapeEngine::new().long(&agg);

        // 6 per-bucket + 5 global rows per bucket
        assert_eq!(long.len(), 2 * (6 + 5));
        assert_eq!(long.with_provenance(Provenance::PerBucket).count(), 12);
        assert_eq!(long.with_provenance(Provenance::Global).count(), 10);

        assert_relative_eq!(long.value("2021-01", "mean").unwrap(), 2.0);
        assert_relative_eq!(long.value("2021-02", "missingrate").unwrap(), 1.0 / 3.0);
        assert!(long.value("2021-01", "p75").is_none());
        assert!(long.value("2021-01", "sd").is_none());
    }

    #[test]
    fn test_global_rows_replicated_per_bucket() {
        let agg = aggregation();
        let long = ReshapeEngine::new().long(&agg);
        let cl1 = agg.global.mean + agg.global.sd;
        let cl2 = agg.global.mean - agg.global.sd;

        for bucket in ["2021-01", "2021-02"] {
            assert_relative_eq!(long.value(bucket, "cl1").unwrap(), cl1);
            assert_relative_eq!(long.value(bucket, "cl2").unwrap(), cl2);
            assert_relative_eq!(long.value(bucket, "p50_g").unwrap(), agg.global.p50);
            assert_relative_eq!(long.value(bucket, "p99_g").unwrap(), agg.global.p99);
            assert_relative_eq!(long.value(bucket, "p1_g").unwrap(), agg.global.p1);
        }
        assert!(long
            .with_provenance(Provenance::Global)
            .all(|r| r.statistic.ends_with("_g") || r.statistic.starts_with("cl")));
    }

    #[test]
    fn test_wide_layout() {
        let agg = aggregation();
        let wide = ReshapeEngine::new().wide(&agg);

        assert_eq!(wide.column_names(), ["variable", "global", "2021-01", "2021-02"]);
        assert_eq!(wide.n_rows(), 9);
        assert_eq!(wide.statistics, StatName::ALL.to_vec());
        assert_eq!(wide.global, agg.global.to_array().to_vec());

        let jan = wide.bucket_column("2021-01").unwrap();
        assert_relative_eq!(jan[2], 2.0); // p50
        assert_relative_eq!(jan[8], 0.0); // missingrate
        assert_eq!(wide.global_value(StatName::MissingRate), Some(1.0 / 6.0));
    }

    #[test]
    fn test_empty_aggregation_keeps_shape() {
        let agg = BucketAggregator::new()
            .aggregate(&[], None, &BucketIndexBuilder::default().finish())
            .unwrap();
        let (long, wide) = ReshapeEngine::new().reshape(&agg);

        assert!(long.is_empty());
        assert_eq!(wide.column_names(), ["variable", "global"]);
        assert_eq!(wide.n_rows(), 9);
        assert!(wide.columns.is_empty());
    }

    #[test]
    fn test_provenance_tags() {
        assert_eq!(Provenance::PerBucket.to_string(), "per-bucket");
        assert_eq!(Provenance::Global.as_str(), "global");
    }
}
