use rust_decimal::{Decimal, MathematicalOps};

/// Simple period-over-period returns `p[i] / p[i-1] - 1`.
pub fn simple_returns(prices: &[Decimal]) -> Result<Vec<Decimal>, &'static str> {
    prices
        .windows(2)
        .map(|pair| {
            if pair[0].is_zero() {
                return Err("Price cannot be zero");
            }
            pair[1]
                .checked_div(pair[0])
                .map(|growth| growth - Decimal::ONE)
                .ok_or("Overflow computing return")
        })
        .collect()
}

/// Annualized volatility of simple returns.
///
/// Uses the sample standard deviation (n - 1) scaled by
/// `sqrt(periods_per_year)`. Returns `None` when fewer than two returns are
/// available.
pub fn annualized_volatility(
    prices: &[Decimal],
    periods_per_year: Decimal,
) -> Result<Option<Decimal>, &'static str> {
    if periods_per_year <= Decimal::ZERO {
        return Err("Periods per year must be positive");
    }

    let returns = simple_returns(prices)?;
    if returns.len() < 2 {
        return Ok(None);
    }

    let n = Decimal::from(returns.len());
    let mean = returns
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(*r))
        .ok_or("Overflow summing returns")?
        / n;

    let squared_deviation = returns
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| {
            let deviation = *r - mean;
            deviation
                .checked_mul(deviation)
                .and_then(|sq| acc.checked_add(sq))
        })
        .ok_or("Overflow summing squared deviations")?;

    let variance = squared_deviation / (n - Decimal::ONE);
    let std_dev = variance.sqrt().ok_or("Square root of negative variance")?;
    let scale = periods_per_year
        .sqrt()
        .ok_or("Square root of negative period count")?;

    std_dev
        .checked_mul(scale)
        .map(Some)
        .ok_or("Overflow annualizing volatility")
}
