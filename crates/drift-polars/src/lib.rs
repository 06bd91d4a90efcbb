//! Polars integration for drift summaries
//!
//! This crate validates and extracts the columns of a `DataFrame`, runs the
//! `drift-core` pipeline, and returns the results as typed tables that
//! convert back into `DataFrame`s.
//!
//! # Example
//!
//! ```rust
//! use polars::prelude::*;
//! use drift_polars::{DriftSummaryExt, SummaryRequest, ToDataFrame};
//!
//! let df = df![
//!     "balance" => [10.0, 12.5, 0.0, 11.0],
//!     "month" => ["2021-01", "2021-01", "2021-02", "2021-02"],
//!     "year" => [2021i32, 2021, 2021, 2021],
//! ]
//! .unwrap();
//!
//! let request = SummaryRequest::new("balance", "month", "year").with_seed(7);
//! let summary = df.drift_summary(&request).unwrap();
//!
//! let wide = summary.wide.to_dataframe().unwrap();
//! assert_eq!(wide.get_column_names_str(), ["variable", "global", "2021-01", "2021-02"]);
//! assert!(!summary.apply_log());
//! ```

mod config;
mod error;
mod frames;
mod render;
mod summary;
mod table;
mod traits;

pub use config::*;
pub use error::{Error, Result};
pub use frames::ToDataFrame;
pub use render::{Palette, PlotAesthetics, RenderConfig, SummaryRenderer};
pub use summary::{Rendered, SummaryBundle, SummaryOrchestrator};
pub use table::{bucket_index, numeric_values, weight_values, VariableFrame};
pub use traits::*;

// Re-export commonly used types from drift-core
pub use drift_core::{
    BitIdentical, BoxplotSummary, DistributionView, LongSummaryTable, Provenance, StatName,
    TransformDecision, TransformReason, WideSummaryTable,
};
