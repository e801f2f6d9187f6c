mod csv_source;

pub use csv_source::CsvPriceSource;

use crate::error::DataError;
use amm_lp_domain::value_objects::price_point::PricePoint;

/// Trait for loading a price series.
pub trait PriceSource {
    /// Loads the full series in source order.
    ///
    /// # Errors
    /// Returns a [`DataError`] if the source cannot be read or decoded.
    fn load(&self) -> Result<Vec<PricePoint>, DataError>;
}
