//! State derived from the initial deposit.
//!
//! Both strategies start from the same bundle: half of the investment
//! converted into asset A at the entry price, half kept as asset B.

use amm_lp_domain::math::constant_product::{invariant, position_value, reserves_at_price};
use amm_lp_domain::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::Serialize;

/// Splits `investment` 50/50 by value at `entry_price`.
fn split_deposit(
    investment: Decimal,
    entry_price: Price,
) -> Result<(Decimal, Decimal), &'static str> {
    if !entry_price.is_positive() {
        return Err("Entry price must be positive");
    }
    let half = investment / Decimal::TWO;
    let asset_a = half
        .checked_div(entry_price.value)
        .ok_or("Overflow converting deposit into asset A")?;
    Ok((asset_a, half))
}

/// Passively held amounts, fixed for the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HodlState {
    /// Amount of the volatile asset.
    pub asset_a_amount: Decimal,
    /// Amount of the quote asset.
    pub asset_b_amount: Decimal,
}

impl HodlState {
    /// Creates the HODL bundle bought with `investment` at `entry_price`.
    pub fn from_deposit(investment: Decimal, entry_price: Price) -> Result<Self, &'static str> {
        let (asset_a_amount, asset_b_amount) = split_deposit(investment, entry_price)?;
        Ok(Self {
            asset_a_amount,
            asset_b_amount,
        })
    }

    /// Value of the held bundle at `price`.
    pub fn value_at(&self, price: Price) -> Result<Decimal, &'static str> {
        position_value(self.asset_a_amount, self.asset_b_amount, price.value)
    }
}

/// Full-range constant-product position with a fixed invariant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PoolState {
    /// Deposited amount of the volatile asset.
    pub initial_asset_a: Decimal,
    /// Deposited amount of the quote asset.
    pub initial_asset_b: Decimal,
    /// `k = x * y`, constant for the life of the position.
    pub invariant: Decimal,
}

impl PoolState {
    /// Creates the pool position funded with `investment` at `entry_price`.
    pub fn from_deposit(investment: Decimal, entry_price: Price) -> Result<Self, &'static str> {
        let (initial_asset_a, initial_asset_b) = split_deposit(investment, entry_price)?;
        Ok(Self {
            initial_asset_a,
            initial_asset_b,
            invariant: invariant(initial_asset_a, initial_asset_b)?,
        })
    }

    /// Position composition `(a, b)` once arbitrage has moved the pool to `price`.
    pub fn reserves_at(&self, price: Price) -> Result<(Decimal, Decimal), &'static str> {
        reserves_at_price(self.invariant, price.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_hodl_state_from_deposit() {
        let hodl = HodlState::from_deposit(dec!(10000), Price::new(dec!(2000))).unwrap();

        assert_eq!(hodl.asset_a_amount, dec!(2.5));
        assert_eq!(hodl.asset_b_amount, dec!(5000));
        assert_eq!(hodl.value_at(Price::new(dec!(2000))).unwrap(), dec!(10000));
        assert_eq!(hodl.value_at(Price::new(dec!(4000))).unwrap(), dec!(15000));
    }

    #[test]
    fn test_pool_state_invariant() {
        let pool = PoolState::from_deposit(dec!(10000), Price::new(dec!(1000))).unwrap();

        assert_eq!(pool.initial_asset_a, dec!(5));
        assert_eq!(pool.initial_asset_b, dec!(5000));
        assert_eq!(pool.invariant, dec!(25000));
    }

    #[test]
    fn test_pool_value_trails_hodl_after_price_move() {
        let entry = Price::new(dec!(1000));
        let hodl = HodlState::from_deposit(dec!(10000), entry).unwrap();
        let pool = PoolState::from_deposit(dec!(10000), entry).unwrap();

        let moved = Price::new(dec!(1800));
        let (asset_a, asset_b) = pool.reserves_at(moved).unwrap();
        let pool_value = position_value(asset_a, asset_b, moved.value).unwrap();
        assert!(pool_value < hodl.value_at(moved).unwrap());
    }

    #[test]
    fn test_rejects_non_positive_entry_price() {
        assert!(HodlState::from_deposit(dec!(10000), Price::new(Decimal::ZERO)).is_err());
        assert!(PoolState::from_deposit(dec!(10000), Price::new(dec!(-5))).is_err());
    }
}
