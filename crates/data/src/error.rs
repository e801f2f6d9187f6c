//! Errors raised while loading a price series.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of an input provider. Kept apart from valuation errors so a
/// caller never confuses a bad file with a bad computation.
#[derive(Debug, Error)]
pub enum DataError {
    /// The source could not be opened or read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the source.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV layer rejected the input.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// None of the accepted headers for a required column is present.
    #[error("missing column, expected one of: {}", .0.join(", "))]
    MissingColumn(&'static [&'static str]),

    /// A row could not be turned into a price point.
    #[error("line {line}: {reason}")]
    InvalidRow {
        /// 1-based line number in the source, header included.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },
}
