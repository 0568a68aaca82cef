//! Total cost of ownership for an electric vehicle.
//!
//! The projection is flat and linear: every recurring cost is multiplied by
//! the number of ownership years, with no discounting.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Annual mileage: range per charge × charges per year |
//! | 2    | Home charging ratio: charging split % ÷ 100 |
//! | 3    | Initial cost: purchase price − tax credit (not clamped) |
//! | 4    | Energy: (annual mileage × years) ÷ efficiency |
//! | 5    | Average tariff: home × ratio + public × (1 − ratio) |
//! | 6    | Charging cost: energy × average tariff |
//! | 7    | Maintenance cost: maintenance per year × years |
//! | 8    | Insurance cost: insurance per year × years |
//! | 9    | Total: Step 3 + Step 6 + Step 7 + Step 8 |
//!
//! Only the efficiency is validated. A split above 100 % gives public
//! charging a negative weight, and a tax credit larger than the price gives a
//! negative initial cost; both flow through unchanged.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use tco_core::calculations::common::round_half_up;
//! use tco_core::{TcoCalculator, TcoInput};
//!
//! let input = TcoInput {
//!     purchase_price: dec!(2000000),
//!     per_charge_range_km: dec!(300),
//!     charges_per_year: 200,
//!     car_efficiency_km_per_kwh: dec!(7.0),
//!     ownership_years: 5,
//!     electricity_cost_per_kwh: dec!(8.0),
//!     public_charging_cost_per_kwh: dec!(20.0),
//!     charging_split_percent: dec!(70),
//!     tax_credit_amount: dec!(0),
//!     insurance_cost_per_year: dec!(30000),
//!     maintenance_cost_per_year: dec!(10000),
//! };
//!
//! let breakdown = TcoCalculator::compute(&input).unwrap();
//!
//! assert_eq!(breakdown.estimated_annual_mileage(), dec!(60000));
//! assert_eq!(round_half_up(breakdown.charging_cost()), dec!(497142.86));
//! assert_eq!(round_half_up(breakdown.total_tco()), dec!(2697142.86));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{CostBreakdown, TcoInput};

/// Errors returned by [`TcoCalculator::compute`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TcoError {
    /// Efficiency was zero or negative; energy use cannot be derived from it.
    #[error("efficiency must be positive, got {0} km/kWh")]
    InvalidEfficiency(Decimal),

    /// An intermediate amount left the range of a 96-bit decimal.
    #[error("arithmetic overflow while calculating {step}")]
    Overflow { step: &'static str },
}

fn checked(
    value: Option<Decimal>,
    step: &'static str,
) -> Result<Decimal, TcoError> {
    value.ok_or(TcoError::Overflow { step })
}

/// Calculator for the total cost of ownership.
///
/// Stateless; every call to [`compute`](Self::compute) builds a fresh
/// [`CostBreakdown`] from the input alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcoCalculator;

impl TcoCalculator {
    /// Projects the cost of owning the vehicle over `ownership_years`.
    ///
    /// # Errors
    ///
    /// Returns [`TcoError::InvalidEfficiency`] if `car_efficiency_km_per_kwh`
    /// is zero or negative, and [`TcoError::Overflow`] if an intermediate
    /// amount exceeds the decimal range.
    pub fn compute(input: &TcoInput) -> Result<CostBreakdown, TcoError> {
        if input.car_efficiency_km_per_kwh <= Decimal::ZERO {
            return Err(TcoError::InvalidEfficiency(
                input.car_efficiency_km_per_kwh,
            ));
        }

        let years = Decimal::from(input.ownership_years);

        let estimated_annual_mileage =
            Self::annual_mileage(input.per_charge_range_km, input.charges_per_year)?;

        let home_charging_ratio = Self::home_charging_ratio(input.charging_split_percent);

        let initial_cost = Self::initial_cost(input.purchase_price, input.tax_credit_amount)?;

        let total_energy_kwh = Self::total_energy_kwh(
            estimated_annual_mileage,
            years,
            input.car_efficiency_km_per_kwh,
        )?;

        let average_cost_per_kwh = Self::average_charging_cost_per_kwh(
            input.electricity_cost_per_kwh,
            input.public_charging_cost_per_kwh,
            home_charging_ratio,
        )?;

        let charging_cost = checked(
            total_energy_kwh.checked_mul(average_cost_per_kwh),
            "charging cost",
        )?;

        let maintenance_cost =
            Self::recurring_cost(input.maintenance_cost_per_year, years, "maintenance cost")?;
        let insurance_cost =
            Self::recurring_cost(input.insurance_cost_per_year, years, "insurance cost")?;

        let total_tco =
            Self::total_tco(initial_cost, charging_cost, maintenance_cost, insurance_cost)?;

        Ok(CostBreakdown::new(
            initial_cost,
            charging_cost,
            maintenance_cost,
            insurance_cost,
            total_tco,
            estimated_annual_mileage,
        ))
    }

    fn annual_mileage(
        per_charge_range_km: Decimal,
        charges_per_year: u32,
    ) -> Result<Decimal, TcoError> {
        checked(
            per_charge_range_km.checked_mul(Decimal::from(charges_per_year)),
            "annual mileage",
        )
    }

    /// Percent to fraction. Dividing by 100 cannot overflow.
    fn home_charging_ratio(charging_split_percent: Decimal) -> Decimal {
        charging_split_percent / Decimal::ONE_HUNDRED
    }

    fn initial_cost(
        purchase_price: Decimal,
        tax_credit_amount: Decimal,
    ) -> Result<Decimal, TcoError> {
        checked(
            purchase_price.checked_sub(tax_credit_amount),
            "initial cost",
        )
    }

    /// Energy drawn over the whole period. `efficiency` is already known to
    /// be positive.
    fn total_energy_kwh(
        annual_mileage: Decimal,
        years: Decimal,
        efficiency: Decimal,
    ) -> Result<Decimal, TcoError> {
        let distance = checked(annual_mileage.checked_mul(years), "total distance")?;
        checked(distance.checked_div(efficiency), "total energy")
    }

    /// Tariff weighted by where charging happens.
    fn average_charging_cost_per_kwh(
        home_cost: Decimal,
        public_cost: Decimal,
        home_ratio: Decimal,
    ) -> Result<Decimal, TcoError> {
        let public_ratio = checked(Decimal::ONE.checked_sub(home_ratio), "public ratio")?;
        let home_part = checked(home_cost.checked_mul(home_ratio), "home charging tariff")?;
        let public_part = checked(
            public_cost.checked_mul(public_ratio),
            "public charging tariff",
        )?;

        checked(home_part.checked_add(public_part), "average charging tariff")
    }

    fn recurring_cost(
        per_year: Decimal,
        years: Decimal,
        step: &'static str,
    ) -> Result<Decimal, TcoError> {
        checked(per_year.checked_mul(years), step)
    }

    fn total_tco(
        initial_cost: Decimal,
        charging_cost: Decimal,
        maintenance_cost: Decimal,
        insurance_cost: Decimal,
    ) -> Result<Decimal, TcoError> {
        initial_cost
            .checked_add(charging_cost)
            .and_then(|sum| sum.checked_add(maintenance_cost))
            .and_then(|sum| sum.checked_add(insurance_cost))
            .ok_or(TcoError::Overflow { step: "total cost" })
    }
}
