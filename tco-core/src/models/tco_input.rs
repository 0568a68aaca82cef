use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Everything the calculator needs to project the cost of owning an EV.
///
/// Currency fields share a single, unspecified unit; no conversion is done.
/// Apart from efficiency, no field is range-checked by the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TcoInput {
    /// Price paid for the vehicle.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub purchase_price: Decimal,

    /// Distance covered on one full charge, in kilometres.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub per_charge_range_km: Decimal,

    /// Number of full charges per year.
    pub charges_per_year: u32,

    /// Kilometres driven per kWh. Must be strictly positive.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub car_efficiency_km_per_kwh: Decimal,

    /// Length of the ownership period in whole years.
    pub ownership_years: u32,

    /// Home electricity tariff per kWh.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub electricity_cost_per_kwh: Decimal,

    /// Public charging tariff per kWh.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub public_charging_cost_per_kwh: Decimal,

    /// Percentage of charging done at home. Values outside 0..=100 are
    /// used as given.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub charging_split_percent: Decimal,

    /// Credit subtracted from the purchase price.
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub tax_credit_amount: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub insurance_cost_per_year: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub maintenance_cost_per_year: Decimal,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const REQUEST: &str = r#"{
        "purchasePrice": 1234567890.123456789,
        "perChargeRangeKm": 300,
        "chargesPerYear": 200,
        "carEfficiencyKmPerKwh": 7.25,
        "ownershipYears": 5,
        "electricityCostPerKwh": 8.0,
        "publicChargingCostPerKwh": "20.5",
        "chargingSplitPercent": 70,
        "taxCreditAmount": 0.1,
        "insuranceCostPerYear": 30000,
        "maintenanceCostPerYear": 10000
    }"#;

    #[test]
    fn json_numbers_keep_every_digit() {
        let input: TcoInput = serde_json::from_str(REQUEST).unwrap();

        assert_eq!(input.purchase_price, dec!(1234567890.123456789));
        assert_eq!(input.car_efficiency_km_per_kwh, dec!(7.25));
        assert_eq!(input.tax_credit_amount, dec!(0.1));
    }

    #[test]
    fn json_accepts_quoted_numbers() {
        let input: TcoInput = serde_json::from_str(REQUEST).unwrap();

        assert_eq!(input.public_charging_cost_per_kwh, dec!(20.5));
    }

    #[test]
    fn json_serializes_decimals_unrounded() {
        let input: TcoInput = serde_json::from_str(REQUEST).unwrap();

        let json = serde_json::to_string(&input).unwrap();

        assert!(json.starts_with(r#"{"purchasePrice":1234567890.123456789,"#));
    }
}
