//! Price series providers for the valuation engine.
//!
//! Providers only load observations; ordering and value ranges are checked
//! by the engine before any computation.

/// Error types.
pub mod error;
/// Price source implementations.
pub mod sources;

pub use error::DataError;
pub use sources::{CsvPriceSource, PriceSource};
