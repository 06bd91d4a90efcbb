//! `DataFrame` views of the summary tables

use crate::Result;
use drift_core::reshape::{GLOBAL_COLUMN, VARIABLE_COLUMN};
use drift_core::{BoxplotSummary, LongSummaryTable, WideSummaryTable};
use polars::prelude::*;

/// Conversion of a summary table into a polars `DataFrame`
pub trait ToDataFrame {
    fn to_dataframe(&self) -> Result<DataFrame>;
}

impl ToDataFrame for LongSummaryTable {
    /// Columns `bucket`, `statistic`, `value`, `provenance`
    fn to_dataframe(&self) -> Result<DataFrame> {
        let bucket: Vec<&str> = self.iter().map(|r| r.bucket.as_str()).collect();
        let statistic: Vec<&str> = self.iter().map(|r| r.statistic.as_str()).collect();
        let value: Vec<f64> = self.iter().map(|r| r.value).collect();
        let provenance: Vec<&str> = self.iter().map(|r| r.provenance.as_str()).collect();

        Ok(DataFrame::new(vec![
            Series::new("bucket".into(), bucket).into(),
            Series::new("statistic".into(), statistic).into(),
            Series::new("value".into(), value).into(),
            Series::new("provenance".into(), provenance).into(),
        ])?)
    }
}

impl ToDataFrame for WideSummaryTable {
    /// Columns `variable`, `global`, then one column per bucket.
    ///
    /// Fails with a duplicate-column error if a bucket is itself labelled
    /// `variable` or `global`.
    fn to_dataframe(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.statistics.iter().map(|s| s.as_str()).collect();

        let mut columns: Vec<Column> = Vec::with_capacity(self.buckets.len() + 2);
        columns.push(Series::new(VARIABLE_COLUMN.into(), names).into());
        columns.push(Series::new(GLOBAL_COLUMN.into(), self.global.clone()).into());
        for (bucket, values) in self.buckets.iter().zip(&self.columns) {
            columns.push(Series::new(bucket.as_str().into(), values.clone()).into());
        }

        Ok(DataFrame::new(columns)?)
    }
}

impl ToDataFrame for [BoxplotSummary] {
    /// One row per bucket
    fn to_dataframe(&self) -> Result<DataFrame> {
        let field = |f: fn(&BoxplotSummary) -> f64| self.iter().map(f).collect::<Vec<f64>>();
        let bucket: Vec<&str> = self.iter().map(|b| b.bucket.as_str()).collect();
        let n: Vec<u64> = self.iter().map(|b| b.n as u64).collect();
        let outliers: Vec<u64> = self.iter().map(|b| b.outliers as u64).collect();

        Ok(DataFrame::new(vec![
            Series::new("bucket".into(), bucket).into(),
            Series::new("n".into(), n).into(),
            Series::new("lower".into(), field(|b| b.lower)).into(),
            Series::new("q1".into(), field(|b| b.q1)).into(),
            Series::new("median".into(), field(|b| b.median)).into(),
            Series::new("q3".into(), field(|b| b.q3)).into(),
            Series::new("upper".into(), field(|b| b.upper)).into(),
            Series::new("outliers".into(), outliers).into(),
        ])?)
    }
}
