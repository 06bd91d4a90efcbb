//! Log-scale transform policy for distribution views
//!
//! The decision only looks at the data: a log scale needs a strictly
//! positive column, is pointless for near-categorical columns, and only pays
//! off when the distribution is strongly right-skewed. Applying the
//! transform can still fail numerically, in which case the view falls back
//! to the untransformed scale and records why.

use crate::moments::classical_skewness;
use crate::{Error, Result};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Threshold used when the configured one is negative or not finite
pub const DEFAULT_SKEW_THRESHOLD: f64 = 3.0;

/// Columns with at most this many distinct values are never log-scaled
pub const CARDINALITY_LIMIT: usize = 50;

/// Why the transform was or was not applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformReason {
    Applied,
    /// Minimum value is zero or negative
    SkippedNonPositive,
    /// At most [`CARDINALITY_LIMIT`] distinct values
    SkippedLowCardinality,
    /// Skewness does not exceed the threshold
    SkippedBelowThreshold,
    /// The transform was attempted and failed; the raw scale is used
    FailedFallback,
    /// No threshold configured
    Disabled,
}

impl TransformReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::SkippedNonPositive => "skipped_non_positive",
            Self::SkippedLowCardinality => "skipped_low_cardinality",
            Self::SkippedBelowThreshold => "skipped_below_threshold",
            Self::FailedFallback => "failed_fallback",
            Self::Disabled => "disabled",
        }
    }
}

/// Outcome of the transform policy, with the diagnostics it was based on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformDecision {
    pub apply_log: bool,
    pub reason: TransformReason,
    /// Effective (normalized) threshold
    pub threshold: Option<f64>,
    pub minimum: Option<f64>,
    pub distinct: Option<usize>,
    pub skewness: Option<f64>,
}

impl TransformDecision {
    fn skipped(reason: TransformReason, threshold: Option<f64>) -> Self {
        Self {
            apply_log: false,
            reason,
            threshold,
            minimum: None,
            distinct: None,
            skewness: None,
        }
    }

    /// The same decision after the transform turned out to be unusable
    pub fn into_fallback(self) -> Self {
        Self {
            apply_log: false,
            reason: TransformReason::FailedFallback,
            ..self
        }
    }
}

/// Normalize a configured skew threshold.
///
/// Unset stays unset (transform disabled). Negative or non-finite values
/// are replaced by [`DEFAULT_SKEW_THRESHOLD`] with a warning.
pub fn normalize_threshold(threshold: Option<f64>) -> Option<f64> {
    match threshold {
        None => None,
        Some(t) if t.is_finite() && t >= 0.0 => Some(t),
        Some(t) => {
            warn!(
                threshold = t,
                default = DEFAULT_SKEW_THRESHOLD,
                "invalid skew threshold, using default"
            );
            Some(DEFAULT_SKEW_THRESHOLD)
        }
    }
}

/// Strict counterpart of [`normalize_threshold`]
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(Error::ConfigurationInvalid(format!(
            "skew threshold must be a finite non-negative number, got {threshold}"
        )))
    }
}

/// `log10` of every value, failing on any non-finite result
pub fn log10_transform(values: &[f64]) -> Result<Vec<f64>> {
    values
        .iter()
        .map(|&x| {
            let y = x.log10();
            if y.is_finite() {
                Ok(y)
            } else {
                Err(Error::TransformFailed(format!("log10({x}) is not finite")))
            }
        })
        .collect()
}

/// Decides whether a column is shown on a log scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistributionPolicy {
    threshold: Option<f64>,
}

impl Default for DistributionPolicy {
    fn default() -> Self {
        Self {
            threshold: Some(DEFAULT_SKEW_THRESHOLD),
        }
    }
}

impl DistributionPolicy {
    /// Policy with a (normalized) skew threshold; `None` disables the transform
    pub fn new(threshold: Option<f64>) -> Self {
        Self {
            threshold: normalize_threshold(threshold),
        }
    }

    pub fn disabled() -> Self {
        Self { threshold: None }
    }

    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Evaluate the policy, attempting a plain `log10` transform
    pub fn evaluate(&self, values: &[f64]) -> TransformDecision {
        self.evaluate_with(values, |v| log10_transform(v).map(|_| ()))
    }

    /// Evaluate the policy with a caller-supplied transform attempt.
    ///
    /// `values` holds the non-missing observations (NaN is ignored). The
    /// attempt only runs when every check passes; its failure is recorded as
    /// [`TransformReason::FailedFallback`] and never propagated.
    pub fn evaluate_with<F>(&self, values: &[f64], attempt: F) -> TransformDecision
    where
        F: FnOnce(&[f64]) -> Result<()>,
    {
        let Some(threshold) = self.threshold else {
            return TransformDecision::skipped(TransformReason::Disabled, None);
        };

        let observed: Vec<f64> = values.iter().copied().filter(|x| !x.is_nan()).collect();

        let minimum = observed.iter().copied().reduce(f64::min);
        let mut decision = TransformDecision::skipped(TransformReason::Applied, Some(threshold));
        decision.minimum = minimum;

        if minimum.is_some_and(|m| m <= 0.0) {
            decision.reason = TransformReason::SkippedNonPositive;
            debug!(minimum = ?minimum, "log scale skipped: non-positive values");
            return decision;
        }

        let distinct = observed
            .iter()
            .map(|&x| OrderedFloat(x))
            .collect::<HashSet<_>>()
            .len();
        decision.distinct = Some(distinct);
        if distinct <= CARDINALITY_LIMIT {
            decision.reason = TransformReason::SkippedLowCardinality;
            debug!(distinct, "log scale skipped: low cardinality");
            return decision;
        }

        let skewness = match classical_skewness(&observed) {
            Ok(s) => s,
            Err(e) => {
                debug!(error = %e, "log scale skipped: skewness undefined");
                decision.reason = TransformReason::SkippedBelowThreshold;
                return decision;
            }
        };
        decision.skewness = Some(skewness);
        if skewness <= threshold {
            decision.reason = TransformReason::SkippedBelowThreshold;
            debug!(skewness, threshold, "log scale skipped: below threshold");
            return decision;
        }

        match attempt(&observed) {
            Ok(()) => {
                decision.apply_log = true;
                decision.reason = TransformReason::Applied;
                debug!(skewness, threshold, "log scale applied");
            }
            Err(e) => {
                warn!(error = %e, "log scale failed, falling back to raw scale");
                decision.reason = TransformReason::FailedFallback;
            }
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 980 closely spaced values and a long right tail of 20
    fn skewed_positive() -> Vec<f64> {
        (0..980)
            .map(|i| 10.0 + f64::from(i) * 0.01)
            .chain((0..20).map(|j| 60.0 + 5.0 * f64::from(j)))
            .collect()
    }

    #[test]
    fn test_threshold_normalization() {
        assert_eq!(normalize_threshold(None), None);
        assert_eq!(normalize_threshold(Some(1.5)), Some(1.5));
        assert_eq!(normalize_threshold(Some(0.0)), Some(0.0));
        assert_eq!(normalize_threshold(Some(-5.0)), Some(DEFAULT_SKEW_THRESHOLD));
        assert_eq!(normalize_threshold(Some(f64::NAN)), Some(DEFAULT_SKEW_THRESHOLD));
        assert_eq!(normalize_threshold(Some(f64::INFINITY)), Some(DEFAULT_SKEW_THRESHOLD));

        assert!(validate_threshold(2.0).is_ok());
        assert!(matches!(validate_threshold(-1.0), Err(Error::ConfigurationInvalid(_))));
    }

    #[test]
    fn test_applied_on_skewed_positive() {
        let decision = DistributionPolicy::new(Some(3.0)).evaluate(&skewed_positive());
        assert!(decision.apply_log);
        assert_eq!(decision.reason, TransformReason::Applied);
        assert!(decision.skewness.unwrap() > 3.0);
        assert_eq!(decision.distinct, Some(1000));
    }

    #[test]
    fn test_non_positive_wins_over_everything() {
        let mut values = skewed_positive();
        values[500] = 0.0;
        let decision = DistributionPolicy::new(Some(0.0)).evaluate(&values);
        assert!(!decision.apply_log);
        assert_eq!(decision.reason, TransformReason::SkippedNonPositive);
        assert_eq!(decision.minimum, Some(0.0));
    }

    #[test]
    fn test_cardinality_boundary() {
        let fifty: Vec<f64> = (1..=50).map(|i| f64::from(i).powi(4)).collect();
        let decision = DistributionPolicy::new(Some(0.0)).evaluate(&fifty);
        assert_eq!(decision.reason, TransformReason::SkippedLowCardinality);
        assert_eq!(decision.distinct, Some(50));

        let fifty_one: Vec<f64> = (1..=51).map(|i| f64::from(i).powi(4)).collect();
        let decision = DistributionPolicy::new(Some(0.0)).evaluate(&fifty_one);
        assert_eq!(decision.reason, TransformReason::Applied);
    }

    #[test]
    fn test_below_threshold() {
        let symmetric: Vec<f64> = (1..=200).map(f64::from).collect();
        let decision = DistributionPolicy::new(Some(3.0)).evaluate(&symmetric);
        assert_eq!(decision.reason, TransformReason::SkippedBelowThreshold);
        assert!(!decision.apply_log);
    }

    #[test]
    fn test_negative_threshold_behaves_as_default() {
        let values = skewed_positive();
        let normalized = DistributionPolicy::new(Some(-5.0));
        assert_eq!(normalized.threshold(), Some(3.0));
        assert_eq!(
            normalized.evaluate(&values),
            DistributionPolicy::new(Some(3.0)).evaluate(&values)
        );
    }

    #[test]
    fn test_disabled() {
        let decision = DistributionPolicy::new(None).evaluate(&skewed_positive());
        assert_eq!(decision.reason, TransformReason::Disabled);
        assert!(!decision.apply_log);
        assert_eq!(DistributionPolicy::disabled().threshold(), None);
    }

    #[test]
    fn test_failed_attempt_falls_back() {
        let decision = DistributionPolicy::new(Some(3.0)).evaluate_with(&skewed_positive(), |_| {
            Err(Error::TransformFailed("renderer rejected scale".into()))
        });
        assert!(!decision.apply_log);
        assert_eq!(decision.reason, TransformReason::FailedFallback);
    }

    #[test]
    fn test_infinite_values_fail_the_log_transform() {
        let mut values: Vec<f64> = (1..=100).map(f64::from).collect();
        values.push(f64::INFINITY);
        let decision = DistributionPolicy::new(Some(3.0)).evaluate(&values);
        assert_eq!(decision.reason, TransformReason::FailedFallback);
    }

    #[test]
    fn test_empty_column_is_low_cardinality() {
        let decision = DistributionPolicy::default().evaluate(&[f64::NAN]);
        assert_eq!(decision.reason, TransformReason::SkippedLowCardinality);
        assert_eq!(decision.minimum, None);
    }

    #[test]
    fn test_log10_transform() {
        assert_eq!(log10_transform(&[1.0, 10.0, 1000.0]).unwrap(), vec![0.0, 1.0, 3.0]);
        assert!(matches!(log10_transform(&[0.0]), Err(Error::TransformFailed(_))));
    }

    #[test]
    fn test_decision_serializes() {
        let decision = DistributionPolicy::new(Some(3.0)).evaluate(&skewed_positive());
        let json = serde_json::to_value(&decision).unwrap();
        assert_eq!(json["apply_log"], true);
        assert_eq!(json["reason"], "Applied");
        assert_eq!(json["distinct"], 1000);
    }

    #[test]
    fn test_into_fallback_keeps_diagnostics() {
        let decision = DistributionPolicy::new(Some(3.0)).evaluate(&skewed_positive());
        let fallback = decision.clone().into_fallback();
        assert!(!fallback.apply_log);
        assert_eq!(fallback.reason, TransformReason::FailedFallback);
        assert_eq!(fallback.skewness, decision.skewness);
    }
}
