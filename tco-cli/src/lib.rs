pub mod config;
pub mod form;
pub mod logging;
pub mod report;
pub mod utils;
