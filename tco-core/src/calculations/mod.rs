//! Cost-of-ownership calculations for electric vehicles.
//!
//! [`tco`] holds the calculator itself; [`common`] holds the rounding helpers
//! shared by the reporting and batch front ends.

pub mod common;
pub mod tco;

pub use tco::{TcoCalculator, TcoError};
