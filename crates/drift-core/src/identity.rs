//! Bit-level identity of summary results
//!
//! Derived `PartialEq` treats NaN as unequal to itself, so two identical
//! runs over a frame with an empty bucket would compare unequal. These
//! comparisons look at the bit patterns of every float instead.

use crate::aggregate::{Aggregation, BucketStats};
use crate::boxplot::BoxplotSummary;
use crate::distribution::DistributionView;
use crate::policy::TransformDecision;
use crate::reshape::{LongRow, LongSummaryTable, WideSummaryTable};
use crate::stats::StatSet;

/// Equality on the exact bit patterns of contained floats
pub trait BitIdentical {
    fn bit_identical(&self, other: &Self) -> bool;
}

impl BitIdentical for f64 {
    fn bit_identical(&self, other: &Self) -> bool {
        self.to_bits() == other.to_bits()
    }
}

impl<T: BitIdentical> BitIdentical for Option<T> {
    fn bit_identical(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.bit_identical(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: BitIdentical> BitIdentical for [T] {
    fn bit_identical(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.bit_identical(b))
    }
}

impl<T: BitIdentical> BitIdentical for Vec<T> {
    fn bit_identical(&self, other: &Self) -> bool {
        self.as_slice().bit_identical(other.as_slice())
    }
}

impl BitIdentical for StatSet {
    fn bit_identical(&self, other: &Self) -> bool {
        self.n_obs == other.n_obs
            && self.n_missing == other.n_missing
            && self.to_array().bit_identical(&other.to_array())
    }
}

impl BitIdentical for BucketStats {
    fn bit_identical(&self, other: &Self) -> bool {
        self.bucket == other.bucket && self.stats.bit_identical(&other.stats)
    }
}

impl BitIdentical for Aggregation {
    fn bit_identical(&self, other: &Self) -> bool {
        self.global.bit_identical(&other.global) && self.buckets.bit_identical(&other.buckets)
    }
}

impl BitIdentical for LongRow {
    fn bit_identical(&self, other: &Self) -> bool {
        self.bucket == other.bucket
            && self.statistic == other.statistic
            && self.provenance == other.provenance
            && self.value.bit_identical(&other.value)
    }
}

impl BitIdentical for LongSummaryTable {
    fn bit_identical(&self, other: &Self) -> bool {
        self.rows.bit_identical(&other.rows)
    }
}

impl BitIdentical for WideSummaryTable {
    fn bit_identical(&self, other: &Self) -> bool {
        self.statistics == other.statistics
            && self.buckets == other.buckets
            && self.global.bit_identical(&other.global)
            && self.columns.bit_identical(&other.columns)
    }
}

impl BitIdentical for BoxplotSummary {
    fn bit_identical(&self, other: &Self) -> bool {
        self.bucket == other.bucket
            && self.n == other.n
            && self.outliers == other.outliers
            && [self.lower, self.q1, self.median, self.q3, self.upper]
                .bit_identical(&[other.lower, other.q1, other.median, other.q3, other.upper])
    }
}

impl BitIdentical for TransformDecision {
    fn bit_identical(&self, other: &Self) -> bool {
        self.apply_log == other.apply_log
            && self.reason == other.reason
            && self.distinct == other.distinct
            && self.threshold.bit_identical(&other.threshold)
            && self.minimum.bit_identical(&other.minimum)
            && self.skewness.bit_identical(&other.skewness)
    }
}

impl BitIdentical for DistributionView {
    fn bit_identical(&self, other: &Self) -> bool {
        self.sample_size == other.sample_size
            && self.seed == other.seed
            && self.decision.bit_identical(&other.decision)
            && self.boxplots.bit_identical(&other.boxplots)
            && self.log_boxplots.bit_identical(&other.log_boxplots)
    }
}
