//! Summary orchestration for one or many variables

use crate::frames::ToDataFrame;
use crate::render::{RenderConfig, SummaryRenderer};
use crate::table::VariableFrame;
use crate::{Result, SummaryRequest};
use drift_core::{
    analyze, BitIdentical, BucketAggregator, DistributionPolicy, DistributionView,
    LongSummaryTable, ReshapeEngine, TransformDecision, WideSummaryTable,
};
use polars::prelude::DataFrame;
use tracing::{debug, instrument, warn};

/// Everything computed for one variable
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBundle {
    pub variable: String,
    pub long: LongSummaryTable,
    pub wide: WideSummaryTable,
    pub distribution: DistributionView,
}

impl BitIdentical for SummaryBundle {
    fn bit_identical(&self, other: &Self) -> bool {
        self.variable == other.variable
            && self.long.bit_identical(&other.long)
            && self.wide.bit_identical(&other.wide)
            && self.distribution.bit_identical(&other.distribution)
    }
}

/// Output of a renderer together with the bundle it was produced from
#[derive(Debug)]
pub struct Rendered<T> {
    pub output: T,
    /// The bundle as rendered; its decision records any fallback
    pub bundle: SummaryBundle,
}

impl SummaryBundle {
    pub fn decision(&self) -> &TransformDecision {
        &self.distribution.decision
    }

    pub fn apply_log(&self) -> bool {
        self.distribution.decision.apply_log
    }

    pub fn long_frame(&self) -> Result<DataFrame> {
        self.long.to_dataframe()
    }

    pub fn wide_frame(&self) -> Result<DataFrame> {
        self.wide.to_dataframe()
    }

    /// Boxplots on the scale the decision selected
    pub fn boxplot_frame(&self) -> Result<DataFrame> {
        self.distribution.active_boxplots().to_dataframe()
    }

    /// Hand the bundle to a renderer.
    ///
    /// A failure on a log-scaled bundle is retried once on the raw scale,
    /// with the decision rewritten to `FailedFallback`. Other failures are
    /// returned as is.
    pub fn render_with<R>(self, renderer: &R, config: &RenderConfig) -> Result<Rendered<R::Output>>
    where
        R: SummaryRenderer,
    {
        match renderer.render(&self, config) {
            Ok(output) => Ok(Rendered {
                output,
                bundle: self,
            }),
            Err(e) if self.apply_log() => {
                warn!(variable = %self.variable, error = %e, "log-scaled render failed, retrying on raw scale");
                let bundle = Self {
                    distribution: self.distribution.into_fallback(),
                    ..self
                };
                let output = renderer.render(&bundle, config)?;
                Ok(Rendered { output, bundle })
            }
            Err(e) => Err(e),
        }
    }
}

/// Runs aggregation, reshaping and the distribution view for a request
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryOrchestrator {
    aggregator: BucketAggregator,
    reshape: ReshapeEngine,
}

impl SummaryOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summarize one variable of `df`.
    ///
    /// Column types are validated before any computation. The time-series
    /// tables always use every row; only the distribution view is
    /// subsampled.
    #[instrument(skip_all, fields(variable = %request.variable))]
    pub fn summarize(&self, df: &DataFrame, request: &SummaryRequest) -> Result<SummaryBundle> {
        let frame = VariableFrame::extract(df, request)?;

        let aggregation =
            self.aggregator
                .aggregate(&frame.values, frame.weights.as_deref(), &frame.fine)?;
        let (long, wide) = self.reshape.reshape(&aggregation);

        let policy = DistributionPolicy::new(request.skew_threshold);
        let distribution = analyze(
            &frame.values,
            &frame.coarse,
            &policy,
            request.sample_bound,
            request.seed,
        )?;

        debug!(
            buckets = aggregation.buckets.len(),
            long_rows = long.len(),
            reason = distribution.decision.reason.as_str(),
            "summary complete"
        );

        Ok(SummaryBundle {
            variable: frame.variable,
            long,
            wide,
            distribution,
        })
    }

    /// Summarize several variables of the same frame, one result per request.
    ///
    /// With the `parallel` feature the requests run concurrently; each only
    /// reads `df`.
    #[instrument(skip_all, fields(requests = requests.len()))]
    pub fn summarize_many(
        &self,
        df: &DataFrame,
        requests: &[SummaryRequest],
    ) -> Vec<Result<SummaryBundle>> {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            requests
                .par_iter()
                .map(|request| self.summarize(df, request))
                .collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            requests
                .iter()
                .map(|request| self.summarize(df, request))
                .collect()
        }
    }
}
