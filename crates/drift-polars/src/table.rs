//! Typed extraction of the columns a summary needs
//!
//! Column types are checked once, up front, before any statistic is
//! computed. Everything downstream works on plain vectors.

use crate::{Error, Result, SummaryRequest};
use drift_core::{BucketIndex, BucketIndexBuilder};
use polars::prelude::*;
use tracing::debug;

/// Columns of one summary request, validated and extracted
#[derive(Debug, Clone)]
pub struct VariableFrame {
    pub variable: String,
    pub values: Vec<Option<f64>>,
    pub weights: Option<Vec<f64>>,
    /// Buckets of the time-series statistics
    pub fine: BucketIndex,
    /// Buckets of the distribution view
    pub coarse: BucketIndex,
}

impl VariableFrame {
    pub fn extract(df: &DataFrame, request: &SummaryRequest) -> Result<Self> {
        let values = numeric_values(df, &request.variable)?;
        let weights = request
            .weight
            .as_deref()
            .map(|name| weight_values(df, name))
            .transpose()?;

        let fine = bucket_index(df, &request.fine_key, request.bucket_domain.as_ref())?;
        let coarse = if request.coarse_key == request.fine_key {
            fine.clone()
        } else {
            bucket_index(df, &request.coarse_key, None)?
        };

        debug!(
            variable = %request.variable,
            rows = values.len(),
            fine_buckets = fine.n_buckets(),
            coarse_buckets = coarse.n_buckets(),
            weighted = weights.is_some(),
            "extracted variable frame"
        );

        Ok(Self {
            variable: request.variable.clone(),
            values,
            weights,
            fine,
            coarse,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.values.len()
    }
}

fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column> {
    df.column(name)
        .map_err(|_| Error::InvalidColumn(name.to_string()))
}

/// Values of a numeric column as `f64`, nulls as `None`.
///
/// 64-bit integers are rejected: converting them to `f64` can silently lose
/// precision.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = column(df, name)?;
    let floats = match column.dtype() {
        DataType::Float64 => column.clone(),
        DataType::Float32
        | DataType::Int32
        | DataType::Int16
        | DataType::Int8
        | DataType::UInt32
        | DataType::UInt16
        | DataType::UInt8 => column.cast(&DataType::Float64)?,
        dt => return Err(Error::unsupported_type(name, dt)),
    };
    Ok(floats.f64()?.iter().collect())
}

/// Values of a weight column; every weight must be present, finite and
/// non-negative
pub fn weight_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    numeric_values(df, name)?
        .into_iter()
        .enumerate()
        .map(|(row, w)| match w {
            Some(w) if w.is_finite() && w >= 0.0 => Ok(w),
            Some(w) => Err(Error::InvalidInput(format!(
                "weight column '{name}' has invalid weight {w} at row {row}"
            ))),
            None => Err(Error::InvalidInput(format!(
                "weight column '{name}' has a null at row {row}"
            ))),
        })
        .collect()
}

/// Bucket keys of one column, in a form the index builder can consume
enum KeyColumn {
    /// Textual keys, ordered lexically
    Labels(StringChunked),
    /// Integer or temporal keys, ordered by value and labelled by their
    /// string rendering
    Ordinals {
        keys: Int64Chunked,
        labels: StringChunked,
    },
}

impl KeyColumn {
    fn from_column(name: &str, column: &Column) -> Result<Self> {
        match column.dtype() {
            DataType::String => Ok(Self::Labels(column.str()?.clone())),
            DataType::Categorical(..) | DataType::Enum(..) | DataType::Boolean => {
                Ok(Self::Labels(column.cast(&DataType::String)?.str()?.clone()))
            }
            DataType::Int64
            | DataType::Int32
            | DataType::Int16
            | DataType::Int8
            | DataType::UInt32
            | DataType::UInt16
            | DataType::UInt8
            | DataType::Date
            | DataType::Datetime(..) => Ok(Self::Ordinals {
                keys: column.cast(&DataType::Int64)?.i64()?.clone(),
                labels: column.cast(&DataType::String)?.str()?.clone(),
            }),
            dt => Err(Error::unsupported_type(name, dt)),
        }
    }

    fn push_rows(&self, builder: &mut BucketIndexBuilder) {
        match self {
            Self::Labels(labels) => {
                for label in labels.iter() {
                    match label {
                        Some(label) => builder.push_label(label),
                        None => builder.push_missing(),
                    }
                }
            }
            Self::Ordinals { keys, labels } => {
                for (key, label) in keys.iter().zip(labels.iter()) {
                    match key {
                        Some(key) => {
                            builder.push_ordinal(key, || label.unwrap_or_default().to_string())
                        }
                        None => builder.push_missing(),
                    }
                }
            }
        }
    }

    fn declare(&self, builder: &mut BucketIndexBuilder) {
        match self {
            Self::Labels(labels) => {
                for label in labels.iter().flatten() {
                    builder.declare(drift_core::Bucket::label(label));
                }
            }
            Self::Ordinals { keys, labels } => {
                for (key, label) in keys.iter().zip(labels.iter()) {
                    if let Some(key) = key {
                        builder.declare(drift_core::Bucket::ordinal(
                            key,
                            label.unwrap_or_default(),
                        ));
                    }
                }
            }
        }
    }
}

/// Bucket index of a key column, optionally widened by a declared domain
pub fn bucket_index(df: &DataFrame, name: &str, domain: Option<&Series>) -> Result<BucketIndex> {
    let column = column(df, name)?;
    let keys = KeyColumn::from_column(name, column)?;

    let mut builder = BucketIndexBuilder::with_capacity(column.len());
    keys.push_rows(&mut builder);

    if let Some(domain) = domain {
        if domain.dtype() != column.dtype() {
            return Err(Error::InvalidInput(format!(
                "bucket domain has dtype {}, key column '{name}' has {}",
                domain.dtype(),
                column.dtype()
            )));
        }
        let domain = Column::from(domain.clone());
        KeyColumn::from_column(name, &domain)?.declare(&mut builder);
    }

    Ok(builder.finish())
}
