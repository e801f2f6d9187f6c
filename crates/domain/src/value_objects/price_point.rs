use crate::value_objects::price::Price;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single observation of a price series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: Price,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Utc>, price: Decimal) -> Self {
        Self {
            timestamp,
            price: Price::new(price),
        }
    }

    /// Time elapsed since `earlier`. Negative when `earlier` is after `self`.
    pub fn elapsed_since(&self, earlier: &PricePoint) -> Duration {
        self.timestamp - earlier.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_elapsed_since() {
        let a = PricePoint::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), dec!(100));
        let b = PricePoint::new(Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(), dec!(101));
        assert_eq!(b.elapsed_since(&a).num_seconds(), 129_600);
        assert_eq!(a.elapsed_since(&b).num_seconds(), -129_600);
    }
}
