use rust_decimal::Decimal;
use serde::Serialize;

use super::CostComponent;

/// Result of a TCO calculation.
///
/// Only [`TcoCalculator`](crate::calculations::TcoCalculator) builds these,
/// so `total_tco` is always the exact sum of the four cost components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    initial_cost: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    charging_cost: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    maintenance_cost: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    insurance_cost: Decimal,

    #[serde(rename = "totalTCO", with = "rust_decimal::serde::arbitrary_precision")]
    total_tco: Decimal,

    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    estimated_annual_mileage: Decimal,
}

impl CostBreakdown {
    pub(crate) fn new(
        initial_cost: Decimal,
        charging_cost: Decimal,
        maintenance_cost: Decimal,
        insurance_cost: Decimal,
        total_tco: Decimal,
        estimated_annual_mileage: Decimal,
    ) -> Self {
        Self {
            initial_cost,
            charging_cost,
            maintenance_cost,
            insurance_cost,
            total_tco,
            estimated_annual_mileage,
        }
    }

    /// Purchase price net of the tax credit. Negative when the credit is larger.
    pub fn initial_cost(&self) -> Decimal {
        self.initial_cost
    }

    pub fn charging_cost(&self) -> Decimal {
        self.charging_cost
    }

    pub fn maintenance_cost(&self) -> Decimal {
        self.maintenance_cost
    }

    pub fn insurance_cost(&self) -> Decimal {
        self.insurance_cost
    }

    pub fn total_tco(&self) -> Decimal {
        self.total_tco
    }

    /// Kilometres per year implied by range and charge frequency.
    pub fn estimated_annual_mileage(&self) -> Decimal {
        self.estimated_annual_mileage
    }

    /// Returns the amount for a single cost component.
    pub fn amount(
        &self,
        component: CostComponent,
    ) -> Decimal {
        match component {
            CostComponent::Initial => self.initial_cost,
            CostComponent::Charging => self.charging_cost,
            CostComponent::Maintenance => self.maintenance_cost,
            CostComponent::Insurance => self.insurance_cost,
        }
    }

    /// The four cost components paired with their amounts, in display order.
    pub fn components(&self) -> [(CostComponent, Decimal); 4] {
        CostComponent::ALL.map(|component| (component, self.amount(component)))
    }

    /// Percentage of the total contributed by `component`.
    ///
    /// Returns `None` when the total is zero, or when the ratio falls outside
    /// the range a [`Decimal`] can hold. Negative components and totals are
    /// divided as-is.
    pub fn share_of_total(
        &self,
        component: CostComponent,
    ) -> Option<Decimal> {
        if self.total_tco.is_zero() {
            return None;
        }

        self.amount(component)
            .checked_div(self.total_tco)?
            .checked_mul(Decimal::ONE_HUNDRED)
    }
}
