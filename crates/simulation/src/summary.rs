//! Run summaries.
//!
//! Reduces a [`ResultSeries`] to the headline numbers a presentation layer
//! reports: final values, P&L, fees against impermanent loss, and the
//! volatility of the underlying price series.

use crate::error::ValuationError;
use crate::params::SECONDS_PER_DAY;
use crate::result::ResultSeries;
use amm_lp_domain::metrics::fees::calculate_apy;
use amm_lp_domain::metrics::volatility::annualized_volatility;
use rust_decimal::Decimal;
use serde::Serialize;

const DAYS_PER_YEAR: i64 = 365;

/// Headline results of a valuation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationSummary {
    /// Capital deposited at the first row.
    pub initial_investment: Decimal,
    /// Price at the first row.
    pub entry_price: Decimal,
    /// Price at the last row.
    pub final_price: Decimal,
    /// Number of rows valued.
    pub total_rows: usize,
    /// Days between the first and last row.
    pub elapsed_days: Decimal,
    /// HODL value at the last row.
    pub final_hodl_value: Decimal,
    /// HODL P&L.
    pub hodl_pnl: Decimal,
    /// HODL P&L as a fraction of the investment.
    pub hodl_pnl_pct: Decimal,
    /// LP value including fees at the last row.
    pub final_lp_value: Decimal,
    /// LP P&L including fees.
    pub lp_pnl: Decimal,
    /// LP P&L as a fraction of the investment.
    pub lp_pnl_pct: Decimal,
    /// Fees accrued over the run.
    pub total_fees: Decimal,
    /// Impermanent loss at the last row.
    pub final_impermanent_loss: Decimal,
    /// Impermanent loss at the last row as a fraction of the HODL value.
    pub final_impermanent_loss_pct: Decimal,
    /// Deepest impermanent loss observed.
    pub max_impermanent_loss: Decimal,
    /// Final LP value minus final HODL value.
    pub lp_vs_hodl: Decimal,
    /// `lp_vs_hodl` as a fraction of the final HODL value.
    pub lp_vs_hodl_pct: Decimal,
    /// Annualized fee yield on the investment. `None` when no time elapsed.
    pub fee_apr: Option<Decimal>,
    /// Annualized volatility of simple price returns. `None` with fewer
    /// than two returns.
    pub annualized_volatility: Option<Decimal>,
}

impl SimulationSummary {
    /// Summarizes `series`.
    ///
    /// # Errors
    /// * [`ValuationError::InvalidSeries`] if the series has no rows
    /// * [`ValuationError::ComputationError`] if a ratio cannot be
    ///   represented; the index is the last row
    pub fn from_series(series: &ResultSeries) -> Result<Self, ValuationError> {
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            return Err(ValuationError::InvalidSeries(
                "result series is empty".to_string(),
            ));
        };
        let last_index = series.len() - 1;
        let fail = |reason: &'static str| ValuationError::computation(last_index, reason);

        let initial_investment = series.params().initial_investment;
        let fraction_of_investment = |amount: Decimal| {
            amount
                .checked_div(initial_investment)
                .ok_or_else(|| fail("Overflow computing return on investment"))
        };

        let hodl_pnl = last.hodl_value - initial_investment;
        let lp_pnl = last.total_lp_value - initial_investment;
        let lp_vs_hodl = last.lp_vs_hodl();
        let lp_vs_hodl_pct = lp_vs_hodl
            .checked_div(last.hodl_value)
            .ok_or_else(|| fail("Overflow comparing LP with HODL"))?;

        let max_impermanent_loss = series
            .iter()
            .map(|row| row.impermanent_loss)
            .min()
            .unwrap_or(Decimal::ZERO);

        let elapsed_ms = last.timestamp.signed_duration_since(first.timestamp).num_milliseconds();
        let elapsed_days = Decimal::from(elapsed_ms) / Decimal::from(SECONDS_PER_DAY * 1_000);

        let fee_apr = if elapsed_days > Decimal::ZERO {
            Some(calculate_apy(last.fees_earned, initial_investment, elapsed_days).map_err(fail)?)
        } else {
            None
        };

        let annualized_volatility = if elapsed_days > Decimal::ZERO {
            let steps = Decimal::from(last_index);
            let periods_per_year = (Decimal::from(DAYS_PER_YEAR) * steps)
                .checked_div(elapsed_days)
                .ok_or_else(|| fail("Overflow computing periods per year"))?;
            let prices: Vec<Decimal> = series.iter().map(|row| row.price).collect();
            annualized_volatility(&prices, periods_per_year).map_err(fail)?
        } else {
            None
        };

        Ok(Self {
            initial_investment,
            entry_price: first.price,
            final_price: last.price,
            total_rows: series.len(),
            elapsed_days,
            final_hodl_value: last.hodl_value,
            hodl_pnl,
            hodl_pnl_pct: fraction_of_investment(hodl_pnl)?,
            final_lp_value: last.total_lp_value,
            lp_pnl,
            lp_pnl_pct: fraction_of_investment(lp_pnl)?,
            total_fees: last.fees_earned,
            final_impermanent_loss: last.impermanent_loss,
            final_impermanent_loss_pct: last.impermanent_loss_pct().map_err(fail)?,
            max_impermanent_loss,
            lp_vs_hodl,
            lp_vs_hodl_pct,
            fee_apr,
            annualized_volatility,
        })
    }

    /// Whether providing liquidity beat holding over the run.
    #[must_use]
    pub fn lp_outperformed(&self) -> bool {
        self.lp_vs_hodl > Decimal::ZERO
    }
}
