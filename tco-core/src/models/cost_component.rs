use serde::{Deserialize, Serialize};

/// The four cost lines that add up to the total cost of ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CostComponent {
    Initial,
    Charging,
    Maintenance,
    Insurance,
}

impl CostComponent {
    /// All components in display order.
    pub const ALL: [CostComponent; 4] = [
        Self::Initial,
        Self::Charging,
        Self::Maintenance,
        Self::Insurance,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Initial => "Initial Cost",
            Self::Charging => "Charging Cost",
            Self::Maintenance => "Maintenance Cost",
            Self::Insurance => "Insurance Cost",
        }
    }
}
