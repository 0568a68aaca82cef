use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tco_data::ScenarioLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Compute the total cost of ownership for every scenario in a CSV file.
///
/// The CSV file needs a `name` column plus one column per calculator input:
/// purchase_price, per_charge_range_km, charges_per_year,
/// car_efficiency_km_per_kwh, ownership_years, electricity_cost_per_kwh,
/// public_charging_cost_per_kwh, charging_split_percent, tax_credit_amount,
/// insurance_cost_per_year, maintenance_cost_per_year
#[derive(Parser, Debug)]
#[command(name = "tco-batch")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing scenarios
    #[arg(short, long)]
    file: PathBuf,

    /// Where to write the results CSV (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

/// Logs go to stderr so the results CSV can be piped from stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    info!("Loading scenarios from: {}", args.file.display());

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = ScenarioLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    info!("Parsed {} scenarios from CSV", records.len());

    let outcomes = ScenarioLoader::evaluate(&records);

    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create: {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let succeeded =
        ScenarioLoader::write_results(writer, &outcomes).context("Failed to write results")?;

    info!(
        "Computed {} of {} scenarios successfully.",
        succeeded,
        outcomes.len()
    );

    Ok(())
}
