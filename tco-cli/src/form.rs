//! Input collection for the calculator.
//!
//! The calculator accepts almost any value. The form is where the accepted
//! range of each field lives, mirroring the widget ranges of the input form
//! this tool replaces. Limits can be switched off to reach the calculator's
//! permissive behavior directly.

use rust_decimal::Decimal;
use serde::Deserialize;
use tco_core::TcoInput;
use thiserror::Error;
use tracing::warn;

/// Values the form starts with before any config, request file or flag.
pub fn default_input() -> TcoInput {
    TcoInput {
        purchase_price: Decimal::from(2_000_000),
        per_charge_range_km: Decimal::from(300),
        charges_per_year: 200,
        car_efficiency_km_per_kwh: Decimal::new(70, 1),
        ownership_years: 5,
        electricity_cost_per_kwh: Decimal::new(80, 1),
        public_charging_cost_per_kwh: Decimal::new(200, 1),
        charging_split_percent: Decimal::from(70),
        tax_credit_amount: Decimal::ZERO,
        insurance_cost_per_year: Decimal::from(30_000),
        maintenance_cost_per_year: Decimal::from(10_000),
    }
}

/// A partial set of inputs, used for config defaults and command-line flags.
///
/// Fields left as `None` keep whatever value they are applied to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputOverrides {
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub purchase_price: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub per_charge_range_km: Option<Decimal>,
    pub charges_per_year: Option<u32>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub car_efficiency_km_per_kwh: Option<Decimal>,
    pub ownership_years: Option<u32>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub electricity_cost_per_kwh: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub public_charging_cost_per_kwh: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub charging_split_percent: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub tax_credit_amount: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub insurance_cost_per_year: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision_option")]
    pub maintenance_cost_per_year: Option<Decimal>,
}

impl InputOverrides {
    /// Replaces every field of `input` that this set specifies.
    pub fn apply_to(
        &self,
        input: &mut TcoInput,
    ) {
        fn set<T: Copy>(
            target: &mut T,
            value: Option<T>,
        ) {
            if let Some(v) = value {
                *target = v;
            }
        }

        set(&mut input.purchase_price, self.purchase_price);
        set(&mut input.per_charge_range_km, self.per_charge_range_km);
        set(&mut input.charges_per_year, self.charges_per_year);
        set(
            &mut input.car_efficiency_km_per_kwh,
            self.car_efficiency_km_per_kwh,
        );
        set(&mut input.ownership_years, self.ownership_years);
        set(
            &mut input.electricity_cost_per_kwh,
            self.electricity_cost_per_kwh,
        );
        set(
            &mut input.public_charging_cost_per_kwh,
            self.public_charging_cost_per_kwh,
        );
        set(&mut input.charging_split_percent, self.charging_split_percent);
        set(&mut input.tax_credit_amount, self.tax_credit_amount);
        set(&mut input.insurance_cost_per_year, self.insurance_cost_per_year);
        set(
            &mut input.maintenance_cost_per_year,
            self.maintenance_cost_per_year,
        );
    }
}

/// Builds the input from its sources, lowest precedence first: built-in
/// defaults, config defaults, a full request, then individual flags.
pub fn resolve_input(
    config_defaults: &InputOverrides,
    request: Option<TcoInput>,
    flags: &InputOverrides,
) -> TcoInput {
    let mut input = match request {
        Some(request) => request,
        None => {
            let mut input = default_input();
            config_defaults.apply_to(&mut input);
            input
        }
    };
    flags.apply_to(&mut input);
    input
}

/// Inclusive range accepted for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldLimit {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub min: Decimal,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub max: Decimal,
}

impl FieldLimit {
    fn new(
        min: Decimal,
        max: Decimal,
    ) -> Self {
        Self { min, max }
    }

    fn contains(
        &self,
        value: Decimal,
    ) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Accepted ranges for every input field, plus a switch to disable them.
///
/// Read from the `[limits]` table of the config file. Any field not listed
/// there keeps its default range.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputLimits {
    pub enforce: bool,
    pub ownership_years: FieldLimit,
    pub purchase_price: FieldLimit,
    pub per_charge_range_km: FieldLimit,
    pub charges_per_year: FieldLimit,
    pub car_efficiency_km_per_kwh: FieldLimit,
    pub electricity_cost_per_kwh: FieldLimit,
    pub public_charging_cost_per_kwh: FieldLimit,
    pub charging_split_percent: FieldLimit,
    pub tax_credit_amount: FieldLimit,
    pub insurance_cost_per_year: FieldLimit,
    pub maintenance_cost_per_year: FieldLimit,
}

impl Default for InputLimits {
    fn default() -> Self {
        let whole = |min: i64, max: i64| FieldLimit::new(Decimal::from(min), Decimal::from(max));

        Self {
            enforce: true,
            ownership_years: whole(1, 15),
            purchase_price: whole(0, 10_000_000),
            per_charge_range_km: whole(50, 1_000),
            charges_per_year: whole(0, 1_000),
            car_efficiency_km_per_kwh: whole(1, 20),
            electricity_cost_per_kwh: whole(0, 50),
            public_charging_cost_per_kwh: whole(0, 100),
            charging_split_percent: whole(0, 100),
            tax_credit_amount: whole(0, 500_000),
            insurance_cost_per_year: whole(0, 100_000),
            maintenance_cost_per_year: whole(0, 100_000),
        }
    }
}

/// Every limit the submitted values broke.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid input: {}", .errors.join("; "))]
pub struct FormError {
    pub errors: Vec<String>,
}

/// A filled-in form awaiting validation.
#[derive(Debug, Clone)]
pub struct TcoForm {
    input: TcoInput,
    limits: InputLimits,
}

impl TcoForm {
    pub fn new(
        input: TcoInput,
        limits: InputLimits,
    ) -> Self {
        Self { input, limits }
    }

    /// Checks every field against its limit and returns the input if all
    /// of them pass. All violations are reported together.
    pub fn validate(&self) -> Result<TcoInput, FormError> {
        if !self.limits.enforce {
            return Ok(self.input.clone());
        }

        let input = &self.input;
        let limits = &self.limits;
        let checks = [
            (
                "Ownership Duration (Years)",
                Decimal::from(input.ownership_years),
                limits.ownership_years,
            ),
            ("Purchase Price", input.purchase_price, limits.purchase_price),
            (
                "Range per Full Charge (km)",
                input.per_charge_range_km,
                limits.per_charge_range_km,
            ),
            (
                "Full Charges per Year",
                Decimal::from(input.charges_per_year),
                limits.charges_per_year,
            ),
            (
                "Efficiency (km/kWh)",
                input.car_efficiency_km_per_kwh,
                limits.car_efficiency_km_per_kwh,
            ),
            (
                "Home Electricity (per kWh)",
                input.electricity_cost_per_kwh,
                limits.electricity_cost_per_kwh,
            ),
            (
                "Public Charging (per kWh)",
                input.public_charging_cost_per_kwh,
                limits.public_charging_cost_per_kwh,
            ),
            (
                "Home Charging %",
                input.charging_split_percent,
                limits.charging_split_percent,
            ),
            ("Tax Credit", input.tax_credit_amount, limits.tax_credit_amount),
            (
                "Insurance per Year",
                input.insurance_cost_per_year,
                limits.insurance_cost_per_year,
            ),
            (
                "Maintenance per Year",
                input.maintenance_cost_per_year,
                limits.maintenance_cost_per_year,
            ),
        ];

        let errors: Vec<String> = checks
            .into_iter()
            .filter(|(_, value, limit)| !limit.contains(*value))
            .map(|(field, value, limit)| {
                warn!(field, %value, min = %limit.min, max = %limit.max, "value outside accepted range");
                format!(
                    "{field} must be between {} and {}, got {value}",
                    limit.min, limit.max
                )
            })
            .collect();

        if errors.is_empty() {
            Ok(self.input.clone())
        } else {
            Err(FormError { errors })
        }
    }
}
