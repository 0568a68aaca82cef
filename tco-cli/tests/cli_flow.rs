//! End-to-end tests of the input → calculation → report pipeline using the
//! fixture files, without spawning the binary.

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use tco_cli::config::{Config, OutputFormat};
use tco_cli::form::{InputOverrides, TcoForm, resolve_input};
use tco_cli::report::Report;
use tco_core::{TcoCalculator, TcoError, TcoInput};

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_request() -> TcoInput {
    let json = fs::read_to_string(fixture_path("request.json")).expect("fixture should exist");
    serde_json::from_str(&json).expect("fixture should be a valid request")
}

#[test]
fn test_config_fixture_loads() {
    let config = Config::load(&fixture_path("ev-tco.toml")).expect("config should load");

    assert_eq!(config.defaults.ownership_years, Some(8));
    assert_eq!(config.display.format, OutputFormat::Json);
    assert_eq!(config.limits.ownership_years.max, dec!(10));
    assert!(config.limits.enforce);
}

#[test]
fn test_config_defaults_flow_into_calculation() {
    let config = Config::load(&fixture_path("ev-tco.toml")).unwrap();

    let input = resolve_input(&config.defaults, None, &InputOverrides::default());
    let input = TcoForm::new(input, config.limits.clone())
        .validate()
        .expect("config defaults should pass the limits");
    let breakdown = TcoCalculator::compute(&input).unwrap();

    assert_eq!(breakdown.initial_cost(), dec!(3500000));
    assert_eq!(breakdown.maintenance_cost(), dec!(80000));
    assert_eq!(breakdown.insurance_cost(), dec!(240000));
}

#[test]
fn test_config_limits_reject_flag_value() {
    let config = Config::load(&fixture_path("ev-tco.toml")).unwrap();
    let flags = InputOverrides {
        ownership_years: Some(12),
        ..Default::default()
    };

    let input = resolve_input(&config.defaults, None, &flags);
    let err = TcoForm::new(input, config.limits.clone())
        .validate()
        .unwrap_err();

    assert_eq!(
        err.errors,
        vec!["Ownership Duration (Years) must be between 1 and 10, got 12".to_string()]
    );
}

#[test]
fn test_request_with_large_credit_is_stopped_by_form_limits() {
    let input = resolve_input(
        &InputOverrides::default(),
        Some(load_request()),
        &InputOverrides::default(),
    );

    let result = TcoForm::new(input, Config::default().limits).validate();

    assert!(result.is_err());
}

#[test]
fn test_request_without_limits_reports_negative_total() {
    let mut config = Config::default();
    config.limits.enforce = false;
    let input = resolve_input(&config.defaults, Some(load_request()), &InputOverrides::default());

    let input = TcoForm::new(input, config.limits.clone()).validate().unwrap();
    let breakdown = TcoCalculator::compute(&input).unwrap();
    let text = Report::new(&input, &breakdown, &config.display)
        .render(OutputFormat::Text)
        .unwrap();

    assert_eq!(breakdown.total_tco(), dec!(-100000));
    assert!(text.contains("  Total TCO: ₹ -100,000\n"));
}

#[test]
fn test_zero_efficiency_reaches_calculator_without_limits() {
    let mut config = Config::default();
    config.limits.enforce = false;
    let flags = InputOverrides {
        car_efficiency_km_per_kwh: Some(dec!(0)),
        ..Default::default()
    };
    let input = resolve_input(&config.defaults, None, &flags);

    let input = TcoForm::new(input, config.limits.clone()).validate().unwrap();

    assert_eq!(
        TcoCalculator::compute(&input),
        Err(TcoError::InvalidEfficiency(dec!(0)))
    );
}

#[test]
fn test_json_report_round_trips_request() {
    let config = Config::load(&fixture_path("ev-tco.toml")).unwrap();
    let input = resolve_input(&config.defaults, None, &InputOverrides::default());
    let breakdown = TcoCalculator::compute(&input).unwrap();

    let json = Report::new(&input, &breakdown, &config.display)
        .render(config.display.format)
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let echoed: TcoInput = serde_json::from_value(value["input"].clone()).unwrap();

    assert_eq!(echoed, input);
    assert_eq!(value["breakdown"]["initialCost"], 3500000.0);
}
