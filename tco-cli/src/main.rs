use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser};
use rust_decimal::Decimal;
use tracing::{debug, error};

use tco_cli::config::{Config, OutputFormat};
use tco_cli::form::{InputOverrides, TcoForm, resolve_input};
use tco_cli::logging;
use tco_cli::report::Report;
use tco_cli::utils::parse_decimal;
use tco_core::{TcoCalculator, TcoInput};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Electric vehicle total cost of ownership calculator.
///
/// Projects purchase, charging, maintenance and insurance costs over the
/// ownership period and prints the breakdown.
#[derive(Debug, Parser)]
#[command(name = "ev-tco", version)]
struct Cli {
    /// TOML file with defaults, display settings and field limits.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON request holding all eleven inputs (camelCase keys).
    /// Replaces config defaults; individual flags still override it.
    #[arg(long)]
    input: Option<PathBuf>,

    #[command(flatten)]
    fields: FieldArgs,

    /// Output format. Defaults to the config's `display.format`.
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Skip the form's field limits and pass values straight to the calculator.
    #[arg(long)]
    no_limits: bool,

    /// Also append log records to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

/// Per-field overrides. Negative numbers are accepted as values so that
/// `--no-limits` can pass them through to the calculator.
#[derive(Debug, Args)]
struct FieldArgs {
    /// Purchase price.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    purchase_price: Option<Decimal>,

    /// Range per full charge, in km.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    per_charge_range_km: Option<Decimal>,

    /// Full charges per year.
    #[arg(long, allow_negative_numbers = true)]
    charges_per_year: Option<u32>,

    /// Efficiency, in km per kWh.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    efficiency: Option<Decimal>,

    /// Ownership duration, in years.
    #[arg(long, allow_negative_numbers = true)]
    years: Option<u32>,

    /// Home electricity cost per kWh.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    electricity_cost: Option<Decimal>,

    /// Public charging cost per kWh.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    public_charging_cost: Option<Decimal>,

    /// Share of charging done at home, in percent.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    home_charging_percent: Option<Decimal>,

    /// Tax credit subtracted from the purchase price.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    tax_credit: Option<Decimal>,

    /// Insurance cost per year.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    insurance_per_year: Option<Decimal>,

    /// Maintenance cost per year.
    #[arg(long, value_parser = parse_decimal, allow_negative_numbers = true)]
    maintenance_per_year: Option<Decimal>,
}

impl From<FieldArgs> for InputOverrides {
    fn from(args: FieldArgs) -> Self {
        InputOverrides {
            purchase_price: args.purchase_price,
            per_charge_range_km: args.per_charge_range_km,
            charges_per_year: args.charges_per_year,
            car_efficiency_km_per_kwh: args.efficiency,
            ownership_years: args.years,
            electricity_cost_per_kwh: args.electricity_cost,
            public_charging_cost_per_kwh: args.public_charging_cost,
            charging_split_percent: args.home_charging_percent,
            tax_credit_amount: args.tax_credit,
            insurance_cost_per_year: args.insurance_per_year,
            maintenance_cost_per_year: args.maintenance_per_year,
        }
    }
}

fn read_request(path: &Path) -> Result<TcoInput> {
    let file =
        File::open(path).with_context(|| format!("Failed to open: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse JSON request: {}", path.display()))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.log_file.as_deref())?;

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if cli.no_limits {
        config.limits.enforce = false;
    }

    let request = cli.input.as_deref().map(read_request).transpose()?;
    let flags = InputOverrides::from(cli.fields);
    let input = resolve_input(&config.defaults, request, &flags);
    debug!(?input, "resolved input");

    let input = TcoForm::new(input, config.limits.clone())
        .validate()
        .inspect_err(|e| error!(errors = e.errors.len(), "input rejected"))?;

    let breakdown = TcoCalculator::compute(&input)
        .inspect_err(|e| error!(%e, "calculation failed"))?;
    debug!(total = %breakdown.total_tco(), "calculation complete");

    let format = cli.format.unwrap_or(config.display.format);
    let rendered = Report::new(&input, &breakdown, &config.display)
        .render(format)
        .context("Failed to render report")?;
    println!("{}", rendered.trim_end());

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("ev-tco").chain(args.iter().copied()))
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_leaves_every_field_unset() {
        let cli = parse(&[]).unwrap();

        assert_eq!(InputOverrides::from(cli.fields), InputOverrides::default());
        assert!(!cli.no_limits);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.format, None);
    }

    #[test]
    fn field_flags_map_to_overrides() {
        let cli = parse(&[
            "--purchase-price",
            "2,500,000",
            "--charges-per-year",
            "150",
            "--efficiency",
            "6.5",
            "--years",
            "8",
            "--home-charging-percent",
            "55",
        ])
        .unwrap();

        let overrides = InputOverrides::from(cli.fields);

        assert_eq!(overrides.purchase_price, Some(dec!(2500000)));
        assert_eq!(overrides.charges_per_year, Some(150));
        assert_eq!(overrides.car_efficiency_km_per_kwh, Some(dec!(6.5)));
        assert_eq!(overrides.ownership_years, Some(8));
        assert_eq!(overrides.charging_split_percent, Some(dec!(55)));
        assert_eq!(overrides.tax_credit_amount, None);
    }

    #[test]
    fn negative_amounts_are_read_as_values() {
        let cli = parse(&[
            "--no-limits",
            "--tax-credit",
            "-5",
            "--purchase-price",
            "-100",
            "--per-charge-range-km",
            "-1.5",
            "--electricity-cost",
            "-8",
            "--public-charging-cost",
            "-20",
            "--insurance-per-year",
            "-300",
            "--maintenance-per-year",
            "-400.25",
        ])
        .unwrap();

        assert!(cli.no_limits);
        let overrides = InputOverrides::from(cli.fields);
        assert_eq!(overrides.tax_credit_amount, Some(dec!(-5)));
        assert_eq!(overrides.purchase_price, Some(dec!(-100)));
        assert_eq!(overrides.per_charge_range_km, Some(dec!(-1.5)));
        assert_eq!(overrides.electricity_cost_per_kwh, Some(dec!(-8)));
        assert_eq!(overrides.public_charging_cost_per_kwh, Some(dec!(-20)));
        assert_eq!(overrides.insurance_cost_per_year, Some(dec!(-300)));
        assert_eq!(overrides.maintenance_cost_per_year, Some(dec!(-400.25)));
    }

    #[test]
    fn negative_counts_are_rejected_as_values() {
        let err = parse(&["--years", "-1"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn non_numeric_amount_is_rejected() {
        let err = parse(&["--purchase-price", "lots"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn verbosity_and_format_flags() {
        let cli = parse(&["-vv", "--format", "json"]).unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.format, Some(OutputFormat::Json));
    }
}
