//! Number parsing and formatting shared by the CLI and its report.

use rust_decimal::{Decimal, RoundingStrategy};
use tco_core::calculations::common::round_to_units;
use thiserror::Error;

/// A flag value that is not a decimal number.
#[derive(Debug, Error)]
#[error("'{value}' is not a number ({source})")]
pub struct InvalidNumber {
    value: String,
    #[source]
    source: rust_decimal::Error,
}

/// Value parser for amount flags.
///
/// Commas are dropped so `2,000,000` reads the same as `2000000`. Values
/// with more digits than a [`Decimal`] can hold are rejected, not rounded.
pub fn parse_decimal(raw: &str) -> Result<Decimal, InvalidNumber> {
    let digits: String = raw.trim().chars().filter(|&c| c != ',').collect();

    Decimal::from_str_exact(&digits).map_err(|source| InvalidNumber {
        value: raw.to_string(),
        source,
    })
}

/// Rounds to a whole number and inserts a comma every three digits.
pub fn format_grouped(value: Decimal) -> String {
    let rounded = round_to_units(value);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a currency amount as `"<symbol> 1,234"`.
pub fn format_currency(
    value: Decimal,
    symbol: &str,
) -> String {
    format!("{symbol} {}", format_grouped(value))
}

/// Formats a percentage with one decimal place, e.g. `"74.2%"`.
pub fn format_percent(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.1}%")
}
