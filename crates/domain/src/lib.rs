//! Domain types and pricing math for comparing a passive HODL position
//! against a full-range constant-product liquidity position.

/// Pricing math for constant-product pools.
pub mod math;
/// Position metrics: impermanent loss, fees and volatility.
pub mod metrics;
/// Value objects shared across crates.
pub mod value_objects;
