use rust_decimal::Decimal;

/// Fee earned by a position over one step.
///
/// Volume for the step is `position_value * volume_fraction * scale`, of which
/// `fee_tier` is collected. `scale` is the length of the step in units of the
/// interval `volume_fraction` refers to (1 for one full interval).
pub fn step_fee(
    position_value: Decimal,
    volume_fraction: Decimal,
    fee_tier: Decimal,
    scale: Decimal,
) -> Result<Decimal, &'static str> {
    position_value
        .checked_mul(volume_fraction)
        .and_then(|volume| volume.checked_mul(scale))
        .and_then(|volume| volume.checked_mul(fee_tier))
        .ok_or("Overflow computing step fee")
}

/// Calculates APY based on fees earned over a period
pub fn calculate_apy(
    fees_earned: Decimal,
    principal: Decimal,
    days: Decimal,
) -> Result<Decimal, &'static str> {
    if principal.is_zero() {
        return Err("Principal cannot be zero");
    }
    if days <= Decimal::ZERO {
        return Err("Days must be positive");
    }

    let year_days = Decimal::from(365);

    let roi = fees_earned
        .checked_div(principal)
        .ok_or("Overflow computing return")?;
    let periods = year_days
        .checked_div(days)
        .ok_or("Overflow computing periods per year")?;

    roi.checked_mul(periods)
        .ok_or("Overflow annualizing return")
}
