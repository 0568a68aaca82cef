use std::io::{Read, Write};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tco_core::calculations::common::round_half_up;
use tco_core::{CostBreakdown, TcoCalculator, TcoError, TcoInput};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur when reading scenarios or writing results.
#[derive(Debug, Error)]
pub enum ScenarioLoaderError {
    #[error("CSV error: {0}")]
    Csv(String),

    /// A row had a blank `name` cell. `row` is 1-based, header excluded.
    #[error("scenario on row {row} has no name")]
    MissingName { row: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ScenarioLoaderError {
    fn from(err: csv::Error) -> Self {
        ScenarioLoaderError::Csv(err.to_string())
    }
}

/// A single row from a scenarios CSV file.
///
/// Columns are matched by header name, so their order does not matter:
/// - `name`: Label copied to the results file
/// - `purchase_price`, `tax_credit_amount`: Acquisition amounts
/// - `per_charge_range_km`, `charges_per_year`: Driving pattern
/// - `car_efficiency_km_per_kwh`: Must be positive for the row to compute
/// - `ownership_years`: Whole years
/// - `electricity_cost_per_kwh`, `public_charging_cost_per_kwh`,
///   `charging_split_percent`: Charging tariffs and home share
/// - `insurance_cost_per_year`, `maintenance_cost_per_year`: Recurring costs
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioRecord {
    pub name: String,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub purchase_price: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub per_charge_range_km: Decimal,
    pub charges_per_year: u32,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub car_efficiency_km_per_kwh: Decimal,
    pub ownership_years: u32,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub electricity_cost_per_kwh: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub public_charging_cost_per_kwh: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub charging_split_percent: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub tax_credit_amount: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub insurance_cost_per_year: Decimal,
    #[serde(deserialize_with = "deserialize_decimal")]
    pub maintenance_cost_per_year: Decimal,
}

/// Reads the cell text directly so no digits are lost to a float.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<Decimal>().map_err(serde::de::Error::custom)
}

impl ScenarioRecord {
    pub fn to_input(&self) -> TcoInput {
        TcoInput {
            purchase_price: self.purchase_price,
            per_charge_range_km: self.per_charge_range_km,
            charges_per_year: self.charges_per_year,
            car_efficiency_km_per_kwh: self.car_efficiency_km_per_kwh,
            ownership_years: self.ownership_years,
            electricity_cost_per_kwh: self.electricity_cost_per_kwh,
            public_charging_cost_per_kwh: self.public_charging_cost_per_kwh,
            charging_split_percent: self.charging_split_percent,
            tax_credit_amount: self.tax_credit_amount,
            insurance_cost_per_year: self.insurance_cost_per_year,
            maintenance_cost_per_year: self.maintenance_cost_per_year,
        }
    }
}

/// The calculation result for one named scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<CostBreakdown, TcoError>,
}

const RESULT_HEADERS: [&str; 8] = [
    "name",
    "initial_cost",
    "charging_cost",
    "maintenance_cost",
    "insurance_cost",
    "total_tco",
    "estimated_annual_mileage",
    "error",
];

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    name: &'a str,
    initial_cost: Option<Decimal>,
    charging_cost: Option<Decimal>,
    maintenance_cost: Option<Decimal>,
    insurance_cost: Option<Decimal>,
    total_tco: Option<Decimal>,
    estimated_annual_mileage: Option<Decimal>,
    error: Option<String>,
}

impl<'a> From<&'a ScenarioOutcome> for ResultRow<'a> {
    fn from(outcome: &'a ScenarioOutcome) -> Self {
        match &outcome.result {
            Ok(breakdown) => ResultRow {
                name: &outcome.name,
                initial_cost: Some(round_half_up(breakdown.initial_cost())),
                charging_cost: Some(round_half_up(breakdown.charging_cost())),
                maintenance_cost: Some(round_half_up(breakdown.maintenance_cost())),
                insurance_cost: Some(round_half_up(breakdown.insurance_cost())),
                total_tco: Some(round_half_up(breakdown.total_tco())),
                estimated_annual_mileage: Some(round_half_up(
                    breakdown.estimated_annual_mileage(),
                )),
                error: None,
            },
            Err(err) => ResultRow {
                name: &outcome.name,
                initial_cost: None,
                charging_cost: None,
                maintenance_cost: None,
                insurance_cost: None,
                total_tco: None,
                estimated_annual_mileage: None,
                error: Some(err.to_string()),
            },
        }
    }
}

/// Batch front end for [`TcoCalculator`].
///
/// Reads scenarios from CSV, computes each one independently and writes a
/// results CSV. A scenario that fails to compute is reported in the `error`
/// column and does not stop the rest of the batch.
pub struct ScenarioLoader;

impl ScenarioLoader {
    /// Parse scenario records from a CSV reader.
    ///
    /// Whitespace around headers and values is ignored. Every column is
    /// required and every row must have a non-blank name.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<ScenarioRecord>, ScenarioLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for (idx, result) in csv_reader.deserialize().enumerate() {
            let record: ScenarioRecord = result?;
            if record.name.is_empty() {
                return Err(ScenarioLoaderError::MissingName { row: idx + 1 });
            }
            records.push(record);
        }

        Ok(records)
    }

    /// Compute every scenario, preserving input order.
    pub fn evaluate(records: &[ScenarioRecord]) -> Vec<ScenarioOutcome> {
        records
            .iter()
            .map(|record| {
                let result = TcoCalculator::compute(&record.to_input());
                if let Err(err) = &result {
                    warn!(scenario = %record.name, %err, "scenario could not be computed");
                }
                ScenarioOutcome {
                    name: record.name.clone(),
                    result,
                }
            })
            .collect()
    }

    /// Write outcomes as CSV, amounts rounded to two decimal places.
    ///
    /// The header row is always written, even for an empty batch. Returns
    /// the number of scenarios that computed successfully.
    pub fn write_results<W: Write>(
        writer: W,
        outcomes: &[ScenarioOutcome],
    ) -> Result<usize, ScenarioLoaderError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(writer);

        csv_writer.write_record(RESULT_HEADERS)?;
        for outcome in outcomes {
            csv_writer.serialize(ResultRow::from(outcome))?;
        }
        csv_writer.flush()?;

        Ok(outcomes.iter().filter(|o| o.result.is_ok()).count())
    }
}
