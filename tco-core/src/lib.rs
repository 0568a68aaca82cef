pub mod calculations;
pub mod models;

pub use calculations::{TcoCalculator, TcoError};
pub use models::*;
