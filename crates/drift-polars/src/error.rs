//! Error types for drift-polars

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Drift core error: {0}")]
    Core(#[from] drift_core::Error),

    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Column whose dtype cannot be summarized
    pub fn unsupported_type(column: &str, dtype: impl std::fmt::Display) -> Self {
        Self::Core(drift_core::Error::UnsupportedType {
            column: column.to_string(),
            dtype: dtype.to_string(),
        })
    }

    pub fn is_unsupported_type(&self) -> bool {
        matches!(self, Self::Core(drift_core::Error::UnsupportedType { .. }))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
