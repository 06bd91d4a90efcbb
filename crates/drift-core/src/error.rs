//! Error types for drift statistics
//!
//! Provides the error taxonomy shared by every drift-stats crate.

use thiserror::Error;

/// Core error type for drift summary computations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid parameter provided to a function
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid input data, including samples that are empty once missing
    /// values are removed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} samples, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// The column type cannot be represented by the numeric primitives
    #[error("Unsupported type for column '{column}': {dtype}")]
    UnsupportedType { column: String, dtype: String },

    /// Malformed configuration value
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    /// A scale transform could not be applied
    #[error("Transform failed: {0}")]
    TransformFailed(String),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an error for a sample with no usable observations
    pub fn empty_input(operation: &str) -> Self {
        Self::InvalidInput(format!("{operation} requires at least one non-missing value"))
    }

    /// Create an error for invalid quantile
    pub fn invalid_quantile(p: f64) -> Self {
        Self::InvalidParameter(format!("Quantile {p} must be in [0, 1]"))
    }

    /// Create an error for size mismatch
    pub fn size_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::InvalidInput(format!(
            "Size mismatch in {context}: expected {expected}, got {actual}"
        ))
    }

    /// Whether this error only marks a statistic as undefined for its sample.
    ///
    /// The aggregator turns these into NaN instead of failing the summary.
    pub fn is_undefined_statistic(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::InsufficientData { .. })
    }
}
