//! Errors raised by a valuation run.

use thiserror::Error;

/// Errors that terminate a valuation run. No partial results are returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValuationError {
    /// A scalar parameter is outside its domain.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// The price series is empty, unordered or holds a non-positive price.
    #[error("invalid price series: {0}")]
    InvalidSeries(String),

    /// An intermediate value could not be represented.
    #[error("computation failed at row {index}: {reason}")]
    ComputationError {
        /// Row of the price series being valued.
        index: usize,
        /// What went wrong.
        reason: String,
    },
}

impl ValuationError {
    pub(crate) fn computation(index: usize, reason: impl Into<String>) -> Self {
        Self::ComputationError {
            index,
            reason: reason.into(),
        }
    }
}
