//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types from the crate.
//!
//! # Example
//!
//! ```rust
//! use amm_lp_simulation::prelude::*;
//! ```

// Engine
pub use crate::engine::{ValuationEngine, run, validate_series};

// Errors
pub use crate::error::ValuationError;

// Parameters
pub use crate::params::{FeeAccrual, SECONDS_PER_DAY, SimulationParameters};

// Results
pub use crate::result::{ResultRow, ResultSeries};

// State
pub use crate::state::{HodlState, PoolState};

// Summary
pub use crate::summary::SimulationSummary;
