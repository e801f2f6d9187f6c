use rust_decimal::{Decimal, MathematicalOps};

/// Calculates the constant product invariant `k = x * y`.
pub fn invariant(reserve_a: Decimal, reserve_b: Decimal) -> Result<Decimal, &'static str> {
    if reserve_a.is_sign_negative() || reserve_b.is_sign_negative() {
        return Err("Reserves cannot be negative");
    }
    reserve_a
        .checked_mul(reserve_b)
        .ok_or("Overflow computing invariant")
}

/// Returns the reserves `(x, y)` sitting on the curve `x * y = k` where the
/// pool price `y / x` equals `price`.
///
/// formula: x = sqrt(k / p), y = sqrt(k * p)
///
/// Arbitrage keeps the pool price aligned with the market price, so these are
/// the reserves a full-range position holds at any observed market price.
pub fn reserves_at_price(k: Decimal, price: Decimal) -> Result<(Decimal, Decimal), &'static str> {
    if price <= Decimal::ZERO {
        return Err("Price must be positive");
    }
    if k.is_sign_negative() {
        return Err("Invariant cannot be negative");
    }

    let reserve_a = k
        .checked_div(price)
        .ok_or("Overflow dividing invariant by price")?
        .sqrt()
        .ok_or("Square root of negative value")?;
    let reserve_b = k
        .checked_mul(price)
        .ok_or("Overflow multiplying invariant by price")?
        .sqrt()
        .ok_or("Square root of negative value")?;

    Ok((reserve_a, reserve_b))
}

/// Values an `(a, b)` bundle in units of asset B at `price`.
pub fn position_value(
    amount_a: Decimal,
    amount_b: Decimal,
    price: Decimal,
) -> Result<Decimal, &'static str> {
    amount_a
        .checked_mul(price)
        .and_then(|a_value| a_value.checked_add(amount_b))
        .ok_or("Overflow computing position value")
}

/// Calculates the spot price of asset A in units of asset B.
/// Price = reserve_b / reserve_a
pub fn spot_price(reserve_a: Decimal, reserve_b: Decimal) -> Result<Decimal, &'static str> {
    if reserve_a.is_zero() {
        return Err("Reserve A is zero");
    }
    reserve_b
        .checked_div(reserve_a)
        .ok_or("Overflow computing spot price")
}
