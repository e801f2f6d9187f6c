//! Valuation engine.
//!
//! Replays a price series against a passive HODL bundle and a full-range
//! constant-product LP position funded with the same deposit, accruing
//! trading fees on the LP side.

use crate::error::ValuationError;
use crate::params::{FeeAccrual, SimulationParameters};
use crate::result::{ResultRow, ResultSeries};
use crate::state::{HodlState, PoolState};
use amm_lp_domain::math::constant_product::position_value;
use amm_lp_domain::metrics::fees::step_fee;
use amm_lp_domain::value_objects::price_point::PricePoint;
use rust_decimal::Decimal;
use tracing::{debug, info};

/// Stateless valuation engine. One instance can serve any number of
/// independent runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationEngine;

impl ValuationEngine {
    /// Creates a new engine.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Values both strategies at every row of `series`.
    ///
    /// # Arguments
    /// * `series` - Price observations, strictly increasing in time
    /// * `params` - Run parameters
    ///
    /// # Returns
    /// One [`ResultRow`] per input row, in input order.
    ///
    /// # Errors
    /// * [`ValuationError::InvalidParameters`] if a parameter is out of range
    /// * [`ValuationError::InvalidSeries`] if the series is empty, unordered
    ///   or holds a non-positive price
    /// * [`ValuationError::ComputationError`] if a row cannot be valued
    pub fn run(
        &self,
        series: &[PricePoint],
        params: &SimulationParameters,
    ) -> Result<ResultSeries, ValuationError> {
        params.validate()?;
        validate_series(series)?;

        let entry_price = series[0].price;

        info!(
            rows = series.len(),
            initial_investment = %params.initial_investment,
            fee_tier = %params.fee_tier,
            daily_volume_fraction = %params.daily_volume_fraction,
            "Running valuation"
        );

        let hodl = HodlState::from_deposit(params.initial_investment, entry_price)
            .map_err(|reason| ValuationError::computation(0, reason))?;
        let pool = PoolState::from_deposit(params.initial_investment, entry_price)
            .map_err(|reason| ValuationError::computation(0, reason))?;

        debug!(
            entry_price = %entry_price.value,
            asset_a = %pool.initial_asset_a,
            asset_b = %pool.initial_asset_b,
            invariant = %pool.invariant,
            "Initial deposit split"
        );

        let mut fees_earned = Decimal::ZERO;
        let mut rows = Vec::with_capacity(series.len());

        for (index, point) in series.iter().enumerate() {
            let row = value_row(series, index, point, &hodl, &pool, params, fees_earned)
                .map_err(|reason| ValuationError::computation(index, reason))?;
            fees_earned = row.fees_earned;
            rows.push(row);
        }

        if let Some(last) = rows.last() {
            info!(
                final_hodl_value = %last.hodl_value,
                final_lp_value = %last.total_lp_value,
                fees_earned = %last.fees_earned,
                impermanent_loss = %last.impermanent_loss,
                "Valuation complete"
            );
        }

        Ok(ResultSeries::new(params.clone(), pool.invariant, rows))
    }
}

/// Runs a valuation with a fresh [`ValuationEngine`].
///
/// # Errors
/// See [`ValuationEngine::run`].
pub fn run(
    series: &[PricePoint],
    params: &SimulationParameters,
) -> Result<ResultSeries, ValuationError> {
    ValuationEngine::new().run(series, params)
}

/// Checks that `series` is non-empty, strictly increasing in time and holds
/// only positive prices.
///
/// # Errors
/// Returns [`ValuationError::InvalidSeries`] naming the first offending row.
pub fn validate_series(series: &[PricePoint]) -> Result<(), ValuationError> {
    if series.is_empty() {
        return Err(ValuationError::InvalidSeries(
            "price series is empty".to_string(),
        ));
    }

    for (index, point) in series.iter().enumerate() {
        if !point.price.is_positive() {
            return Err(ValuationError::InvalidSeries(format!(
                "price at row {index} must be positive, got {}",
                point.price.value
            )));
        }
    }

    for (index, pair) in series.windows(2).enumerate() {
        if pair[1].timestamp <= pair[0].timestamp {
            return Err(ValuationError::InvalidSeries(format!(
                "timestamps must be strictly increasing, row {} at {} does not follow {}",
                index + 1,
                pair[1].timestamp,
                pair[0].timestamp
            )));
        }
    }

    Ok(())
}

fn value_row(
    series: &[PricePoint],
    index: usize,
    point: &PricePoint,
    hodl: &HodlState,
    pool: &PoolState,
    params: &SimulationParameters,
    fees_before: Decimal,
) -> Result<ResultRow, &'static str> {
    let price = point.price;

    let hodl_value = hodl.value_at(price)?;
    let (lp_asset_a_amount, lp_asset_b_amount) = pool.reserves_at(price)?;
    let lp_value_no_fees = position_value(lp_asset_a_amount, lp_asset_b_amount, price.value)?;
    let impermanent_loss = lp_value_no_fees
        .checked_sub(hodl_value)
        .ok_or("Overflow computing impermanent loss")?;

    let scale = step_scale(series, index, params.fee_accrual)?;
    let fee = step_fee(
        lp_value_no_fees,
        params.daily_volume_fraction,
        params.fee_tier,
        scale,
    )?;
    let fees_earned = fees_before
        .checked_add(fee)
        .ok_or("Overflow accumulating fees")?;
    let total_lp_value = lp_value_no_fees
        .checked_add(fees_earned)
        .ok_or("Overflow computing total LP value")?;

    Ok(ResultRow {
        timestamp: point.timestamp,
        price: price.value,
        hodl_value,
        lp_asset_a_amount,
        lp_asset_b_amount,
        lp_value_no_fees,
        impermanent_loss,
        step_fee: fee,
        fees_earned,
        total_lp_value,
    })
}

/// Length of the step ending at `index`, in units of the volume interval.
fn step_scale(
    series: &[PricePoint],
    index: usize,
    fee_accrual: FeeAccrual,
) -> Result<Decimal, &'static str> {
    let FeeAccrual::Elapsed { reference_seconds } = fee_accrual else {
        return Ok(Decimal::ONE);
    };

    let elapsed = match index {
        0 => match series.get(1) {
            Some(next) => next.elapsed_since(&series[0]),
            // Nothing to measure against
            None => return Ok(Decimal::ONE),
        },
        _ => series[index].elapsed_since(&series[index - 1]),
    };

    let elapsed_ms = elapsed.num_milliseconds();
    let reference_ms = reference_seconds
        .checked_mul(1_000)
        .ok_or("Overflow converting reference interval")?;
    if reference_ms <= 0 {
        return Err("Reference interval must be positive");
    }

    Decimal::from(elapsed_ms)
        .checked_div(Decimal::from(reference_ms))
        .ok_or("Overflow computing step length")
}
