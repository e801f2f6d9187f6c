//! Parameters of a valuation run.

use crate::error::ValuationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Seconds in one day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// How the daily volume fraction is applied to the rows of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum FeeAccrual {
    /// Every row accrues one full volume interval, whatever the spacing of
    /// the series.
    #[default]
    PerRow,
    /// Every row accrues volume in proportion to the time elapsed since the
    /// previous row. The first row uses the first observed interval.
    Elapsed {
        /// Length in seconds of the interval the volume fraction refers to.
        reference_seconds: i64,
    },
}

impl FeeAccrual {
    /// Elapsed-time accrual against a one-day volume fraction.
    #[must_use]
    pub fn daily() -> Self {
        Self::Elapsed {
            reference_seconds: SECONDS_PER_DAY,
        }
    }
}

/// Immutable inputs of a valuation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Capital deposited at the first row, split 50/50 by value.
    pub initial_investment: Decimal,
    /// Fraction of traded value collected as fee.
    pub fee_tier: Decimal,
    /// Traded volume per step as a fraction of the position value.
    pub daily_volume_fraction: Decimal,
    /// Per-step scaling of the volume fraction.
    pub fee_accrual: FeeAccrual,
}

impl SimulationParameters {
    /// Creates parameters with per-row fee accrual.
    #[must_use]
    pub fn new(
        initial_investment: Decimal,
        fee_tier: Decimal,
        daily_volume_fraction: Decimal,
    ) -> Self {
        Self {
            initial_investment,
            fee_tier,
            daily_volume_fraction,
            fee_accrual: FeeAccrual::PerRow,
        }
    }

    /// Sets the fee accrual mode.
    #[must_use]
    pub fn with_fee_accrual(mut self, fee_accrual: FeeAccrual) -> Self {
        self.fee_accrual = fee_accrual;
        self
    }

    /// Checks every parameter against its domain.
    ///
    /// # Errors
    /// Returns [`ValuationError::InvalidParameters`] naming the first
    /// offending parameter.
    pub fn validate(&self) -> Result<(), ValuationError> {
        if self.initial_investment <= Decimal::ZERO {
            return Err(ValuationError::InvalidParameters(format!(
                "initial_investment must be positive, got {}",
                self.initial_investment
            )));
        }
        if self.fee_tier <= Decimal::ZERO || self.fee_tier >= Decimal::ONE {
            return Err(ValuationError::InvalidParameters(format!(
                "fee_tier must be in (0, 1), got {}",
                self.fee_tier
            )));
        }
        if self.daily_volume_fraction <= Decimal::ZERO || self.daily_volume_fraction > Decimal::ONE
        {
            return Err(ValuationError::InvalidParameters(format!(
                "daily_volume_fraction must be in (0, 1], got {}",
                self.daily_volume_fraction
            )));
        }
        match self.fee_accrual {
            FeeAccrual::Elapsed { reference_seconds } if reference_seconds <= 0 => {
                Err(ValuationError::InvalidParameters(format!(
                    "reference_seconds must be positive, got {reference_seconds}"
                )))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid() -> SimulationParameters {
        SimulationParameters::new(dec!(10000), dec!(0.003), dec!(0.10))
    }

    #[test]
    fn test_valid_parameters() {
        assert!(valid().validate().is_ok());
        assert!(valid().with_fee_accrual(FeeAccrual::daily()).validate().is_ok());
        // Upper bound of the volume fraction is inclusive
        let mut params = valid();
        params.daily_volume_fraction = Decimal::ONE;
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_investment() {
        let mut params = valid();
        params.initial_investment = Decimal::ZERO;
        assert!(matches!(
            params.validate(),
            Err(ValuationError::InvalidParameters(msg)) if msg.contains("initial_investment")
        ));
    }

    #[test]
    fn test_rejects_fee_tier_out_of_range() {
        for fee_tier in [Decimal::ZERO, Decimal::ONE, dec!(-0.003), dec!(1.5)] {
            let mut params = valid();
            params.fee_tier = fee_tier;
            assert!(matches!(
                params.validate(),
                Err(ValuationError::InvalidParameters(msg)) if msg.contains("fee_tier")
            ));
        }
    }

    #[test]
    fn test_rejects_volume_fraction_out_of_range() {
        for fraction in [Decimal::ZERO, dec!(1.01), dec!(-0.1)] {
            let mut params = valid();
            params.daily_volume_fraction = fraction;
            assert!(matches!(
                params.validate(),
                Err(ValuationError::InvalidParameters(msg)) if msg.contains("daily_volume_fraction")
            ));
        }
    }

    #[test]
    fn test_rejects_non_positive_reference_interval() {
        let params = valid().with_fee_accrual(FeeAccrual::Elapsed {
            reference_seconds: 0,
        });
        assert!(matches!(
            params.validate(),
            Err(ValuationError::InvalidParameters(msg)) if msg.contains("reference_seconds")
        ));
    }
}
