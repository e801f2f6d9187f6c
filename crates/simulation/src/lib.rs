//! Valuation engine comparing a HODL position with a full-range
//! constant-product liquidity position.
//!
//! This crate provides:
//! - Parameter validation for a valuation run
//! - HODL and pool state derived from the initial deposit
//! - Row-by-row valuation of a price series, including fee accrual
//! - Run summaries for presentation layers

/// Prelude module for convenient imports.
pub mod prelude;

/// Valuation engine.
pub mod engine;
/// Error types.
pub mod error;
/// Run parameters.
pub mod params;
/// Result rows and series.
pub mod result;
/// HODL and pool state.
pub mod state;
/// Run summaries.
pub mod summary;
