use amm_lp_domain::value_objects::price_point::PricePoint;
use amm_lp_simulation::prelude::*;
use chrono::{Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TOLERANCE: Decimal = dec!(0.0000001);

fn series(prices: &[Decimal]) -> Vec<PricePoint> {
    let start = Utc.with_ymd_and_hms(2023, 10, 1, 0, 0, 0).unwrap();
    prices
        .iter()
        .enumerate()
        .map(|(i, price)| PricePoint::new(start + Duration::days(i as i64), *price))
        .collect()
}

/// A choppy path that revisits the entry price.
fn choppy_prices() -> Vec<Decimal> {
    vec![
        dec!(1650.25),
        dec!(1702.10),
        dec!(1588.40),
        dec!(1650.25),
        dec!(2210.00),
        dec!(3105.75),
        dec!(2540.30),
        dec!(980.15),
        dec!(412.60),
        dec!(1650.25),
        dec!(1725.90),
    ]
}

fn params() -> SimulationParameters {
    SimulationParameters::new(dec!(25000), dec!(0.0005), dec!(0.35))
}

#[test]
fn test_output_length_matches_input() {
    for len in [1usize, 2, 5, 11] {
        let prices = &choppy_prices()[..len];
        let result = run(&series(prices), &params()).unwrap();
        assert_eq!(result.len(), len);
        for (row, price) in result.iter().zip(prices) {
            assert_eq!(row.price, *price);
        }
    }
}

#[test]
fn test_invariant_preserved_on_every_row() {
    let result = run(&series(&choppy_prices()), &params()).unwrap();
    let k = result.invariant();

    for row in &result {
        let product = row.lp_asset_a_amount * row.lp_asset_b_amount;
        assert!(
            (product - k).abs() <= TOLERANCE,
            "x*y drifted at price {}: {product} vs {k}",
            row.price
        );
    }
}

#[test]
fn test_impermanent_loss_is_never_positive() {
    let prices = choppy_prices();
    let entry = prices[0];
    let result = run(&series(&prices), &params()).unwrap();

    for row in &result {
        assert!(row.impermanent_loss <= TOLERANCE);
        if row.price == entry {
            assert!(row.impermanent_loss.abs() <= TOLERANCE);
        } else {
            assert!(row.impermanent_loss < -TOLERANCE);
        }
    }
}

#[test]
fn test_constant_price_grows_only_from_fees() {
    let result = run(&series(&[dec!(42.5); 30]), &params()).unwrap();

    for row in &result {
        assert!(row.impermanent_loss.abs() <= TOLERANCE);
    }
    for pair in result.rows().windows(2) {
        assert!(pair[1].total_lp_value > pair[0].total_lp_value);
    }
}

#[test]
fn test_fees_never_decrease() {
    let result = run(&series(&choppy_prices()), &params()).unwrap();

    for pair in result.rows().windows(2) {
        assert!(pair[1].fees_earned >= pair[0].fees_earned);
        assert!(pair[1].step_fee > Decimal::ZERO);
    }
}

#[test]
fn test_total_value_decomposes() {
    let result = run(&series(&choppy_prices()), &params()).unwrap();

    for row in &result {
        assert_eq!(row.total_lp_value, row.lp_value_no_fees + row.fees_earned);
        assert_eq!(row.impermanent_loss, row.lp_value_no_fees - row.hodl_value);
    }
}

#[test]
fn test_runs_are_independent() {
    let engine = ValuationEngine::new();
    let eth = series(&choppy_prices());
    let flat = series(&[dec!(1); 11]);

    let first = engine.run(&eth, &params()).unwrap();
    let _other = engine.run(&flat, &params()).unwrap();
    let again = engine.run(&eth, &params()).unwrap();

    assert_eq!(first.rows(), again.rows());
}

#[test]
fn test_summary_matches_last_row() {
    let result = run(&series(&choppy_prices()), &params()).unwrap();
    let summary = result.summary().unwrap();
    let last = result.last().unwrap();

    assert_eq!(summary.total_rows, result.len());
    assert_eq!(summary.final_hodl_value, last.hodl_value);
    assert_eq!(summary.final_lp_value, last.total_lp_value);
    assert_eq!(summary.total_fees, last.fees_earned);
    assert_eq!(summary.lp_vs_hodl, last.total_lp_value - last.hodl_value);
    assert!(summary.max_impermanent_loss <= summary.final_impermanent_loss);
}
