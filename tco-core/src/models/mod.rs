mod cost_breakdown;
mod cost_component;
mod tco_input;

pub use cost_breakdown::CostBreakdown;
pub use cost_component::CostComponent;
pub use tco_input::TcoInput;
