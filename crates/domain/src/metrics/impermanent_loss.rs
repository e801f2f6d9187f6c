use rust_decimal::{Decimal, MathematicalOps};

/// Calculates Impermanent Loss for a constant product pool.
/// formula: 2 * sqrt(price_ratio) / (1 + price_ratio) - 1
///
/// # Arguments
///
/// * `entry_price` - The price at which the position was opened
/// * `current_price` - The current price
///
/// # Returns
///
/// * `Decimal` - The impermanent loss as a negative fraction (e.g., -0.05 for 5% loss)
pub fn calculate_il_constant_product(
    entry_price: Decimal,
    current_price: Decimal,
) -> Result<Decimal, &'static str> {
    if entry_price <= Decimal::ZERO {
        return Err("Entry price must be positive");
    }
    if current_price <= Decimal::ZERO {
        return Err("Current price must be positive");
    }

    let price_ratio = current_price
        .checked_div(entry_price)
        .ok_or("Overflow computing price ratio")?;
    let sqrt_ratio = price_ratio.sqrt().ok_or("Square root of negative value")?;

    let numerator = Decimal::TWO
        .checked_mul(sqrt_ratio)
        .ok_or("Overflow computing numerator")?;
    let denominator = Decimal::ONE
        .checked_add(price_ratio)
        .ok_or("Overflow computing denominator")?;

    numerator
        .checked_div(denominator)
        .map(|share| share - Decimal::ONE)
        .ok_or("Overflow computing impermanent loss")
}

/// Impermanent loss of an LP position relative to the HODL value of the
/// same initial deposit: `(lp_value - hodl_value) / hodl_value`.
pub fn relative_impermanent_loss(
    lp_value: Decimal,
    hodl_value: Decimal,
) -> Result<Decimal, &'static str> {
    if hodl_value.is_zero() {
        return Err("HODL value cannot be zero");
    }
    (lp_value - hodl_value)
        .checked_div(hodl_value)
        .ok_or("Overflow computing relative impermanent loss")
}
