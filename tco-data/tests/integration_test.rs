//! Integration tests running the batch pipeline against the fixture file.

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tco_core::TcoError;
use tco_data::{ScenarioLoader, ScenarioOutcome};

const SCENARIOS_CSV: &str = include_str!("../test-data/scenarios.csv");

fn evaluate_fixture() -> Vec<ScenarioOutcome> {
    let records = ScenarioLoader::parse(SCENARIOS_CSV.as_bytes()).expect("Failed to parse CSV");
    ScenarioLoader::evaluate(&records)
}

fn outcome<'a>(outcomes: &'a [ScenarioOutcome], name: &str) -> &'a ScenarioOutcome {
    outcomes
        .iter()
        .find(|o| o.name == name)
        .unwrap_or_else(|| panic!("scenario '{name}' missing from fixture"))
}

#[test]
fn test_fixture_parses_every_row() {
    let records = ScenarioLoader::parse(SCENARIOS_CSV.as_bytes()).expect("Failed to parse CSV");

    assert_eq!(records.len(), 5);
}

#[test]
fn test_default_form_scenario() {
    let outcomes = evaluate_fixture();
    let breakdown = outcome(&outcomes, "default-form")
        .result
        .as_ref()
        .expect("default scenario should compute");

    assert_eq!(breakdown.estimated_annual_mileage(), dec!(60000));
    assert_eq!(breakdown.maintenance_cost(), dec!(50000));
    assert_eq!(breakdown.insurance_cost(), dec!(150000));
    assert_eq!(breakdown.initial_cost(), dec!(2000000));
}

#[test]
fn test_negative_total_is_kept() {
    let outcomes = evaluate_fixture();
    let breakdown = outcome(&outcomes, "credit-exceeds-price")
        .result
        .as_ref()
        .expect("scenario should compute");

    assert_eq!(breakdown.total_tco(), dec!(-100000));
}

#[test]
fn test_split_beyond_range_is_cheaper_than_default() {
    let outcomes = evaluate_fixture();
    let default = outcome(&outcomes, "default-form").result.as_ref().unwrap();
    let beyond = outcome(&outcomes, "split-beyond-range")
        .result
        .as_ref()
        .unwrap();

    assert!(beyond.charging_cost() < default.charging_cost());
}

#[test]
fn test_zero_years_total_is_net_price() {
    let outcomes = evaluate_fixture();
    let breakdown = outcome(&outcomes, "zero-years").result.as_ref().unwrap();

    assert_eq!(breakdown.total_tco(), dec!(1750000));
}

#[test]
fn test_invalid_efficiency_does_not_abort_batch() {
    let outcomes = evaluate_fixture();

    assert_eq!(outcomes.len(), 5);
    assert_eq!(
        outcome(&outcomes, "no-efficiency").result,
        Err(TcoError::InvalidEfficiency(dec!(0)))
    );
}

#[test]
fn test_results_csv_has_one_line_per_scenario() {
    let outcomes = evaluate_fixture();
    let mut out = Vec::new();

    let succeeded = ScenarioLoader::write_results(&mut out, &outcomes).expect("write failed");
    let text = String::from_utf8(out).expect("results should be UTF-8");

    assert_eq!(succeeded, 4);
    assert_eq!(text.lines().count(), 6);
    assert!(text.contains("default-form,2000000,497142.86,50000,150000,2697142.86,60000,"));
    assert!(text.contains("credit-exceeds-price,-100000,"));
}
