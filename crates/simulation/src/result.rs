//! Output of a valuation run.

use crate::error::ValuationError;
use crate::params::SimulationParameters;
use crate::summary::SimulationSummary;
use amm_lp_domain::metrics::impermanent_loss::relative_impermanent_loss;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Valuation of both strategies at one row of the price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    /// Timestamp of the input row.
    pub timestamp: DateTime<Utc>,
    /// Price of the input row.
    pub price: Decimal,
    /// Value of the held bundle.
    pub hodl_value: Decimal,
    /// Asset A held by the LP position.
    pub lp_asset_a_amount: Decimal,
    /// Asset B held by the LP position.
    pub lp_asset_b_amount: Decimal,
    /// LP position value, fees excluded.
    pub lp_value_no_fees: Decimal,
    /// `lp_value_no_fees - hodl_value`.
    pub impermanent_loss: Decimal,
    /// Fee accrued on this row alone.
    pub step_fee: Decimal,
    /// Fees accrued from the first row through this one.
    pub fees_earned: Decimal,
    /// `lp_value_no_fees + fees_earned`.
    pub total_lp_value: Decimal,
}

impl ResultRow {
    /// Impermanent loss as a fraction of the HODL value.
    pub fn impermanent_loss_pct(&self) -> Result<Decimal, &'static str> {
        relative_impermanent_loss(self.lp_value_no_fees, self.hodl_value)
    }

    /// How far the LP strategy, fees included, is ahead of holding.
    #[must_use]
    pub fn lp_vs_hodl(&self) -> Decimal {
        self.total_lp_value - self.hodl_value
    }
}

/// Ordered rows of a run, one per input row.
#[derive(Debug, Clone, Serialize)]
pub struct ResultSeries {
    params: SimulationParameters,
    invariant: Decimal,
    rows: Vec<ResultRow>,
}

impl ResultSeries {
    pub(crate) fn new(
        params: SimulationParameters,
        invariant: Decimal,
        rows: Vec<ResultRow>,
    ) -> Self {
        Self {
            params,
            invariant,
            rows,
        }
    }

    /// Parameters the series was computed with.
    #[must_use]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// Constant product `k` of the LP position.
    #[must_use]
    pub fn invariant(&self) -> Decimal {
        self.invariant
    }

    #[must_use]
    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&ResultRow> {
        self.rows.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ResultRow> {
        self.rows.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResultRow> {
        self.rows.iter()
    }

    /// Consumes the series, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows
    }

    /// Summarizes the run.
    ///
    /// # Errors
    /// See [`SimulationSummary::from_series`].
    pub fn summary(&self) -> Result<SimulationSummary, ValuationError> {
        SimulationSummary::from_series(self)
    }
}

impl IntoIterator for ResultSeries {
    type Item = ResultRow;
    type IntoIter = std::vec::IntoIter<ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSeries {
    type Item = &'a ResultRow;
    type IntoIter = std::slice::Iter<'a, ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
