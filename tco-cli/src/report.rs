//! Rendering a [`CostBreakdown`] for the terminal or as JSON.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use tco_core::{CostBreakdown, TcoInput};
use thiserror::Error;

use crate::config::{DisplayConfig, OutputFormat};
use crate::utils::{format_currency, format_grouped, format_percent};

const BAR_WIDTH: usize = 30;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to format report: {0}")]
    Format(#[from] fmt::Error),

    #[error("failed to encode report as JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct JsonReport<'a> {
    input: &'a TcoInput,
    breakdown: &'a CostBreakdown,
}

/// One calculation, ready to be printed.
pub struct Report<'a> {
    input: &'a TcoInput,
    breakdown: &'a CostBreakdown,
    display: &'a DisplayConfig,
}

impl<'a> Report<'a> {
    pub fn new(
        input: &'a TcoInput,
        breakdown: &'a CostBreakdown,
        display: &'a DisplayConfig,
    ) -> Self {
        Self {
            input,
            breakdown,
            display,
        }
    }

    pub fn render(
        &self,
        format: OutputFormat,
    ) -> Result<String, ReportError> {
        match format {
            OutputFormat::Text => self.render_text(),
            OutputFormat::Json => self.render_json(),
        }
    }

    fn render_json(&self) -> Result<String, ReportError> {
        let json = serde_json::to_string_pretty(&JsonReport {
            input: self.input,
            breakdown: self.breakdown,
        })?;
        Ok(json)
    }

    fn render_text(&self) -> Result<String, ReportError> {
        let mut out = String::new();
        self.write_overview(&mut out)?;
        out.push('\n');
        self.write_chart(&mut out)?;
        out.push('\n');
        self.write_details(&mut out)?;
        Ok(out)
    }

    fn currency(
        &self,
        value: Decimal,
    ) -> String {
        format_currency(value, &self.display.currency_symbol)
    }

    fn write_overview(
        &self,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        let b = self.breakdown;
        let mileage = format!(
            "{} {}",
            format_grouped(b.estimated_annual_mileage()),
            self.display.distance_unit
        );

        writeln!(out, "Results Overview")?;
        writeln!(out, "  {:<18}{}", "Total TCO", self.currency(b.total_tco()))?;
        writeln!(out, "  {:<18}{}", "Annual Mileage", mileage)?;
        writeln!(
            out,
            "  {:<18}{}",
            "Charging Cost",
            self.currency(b.charging_cost())
        )
    }

    /// Text stand-in for a pie chart. Shares of a mixed-sign or non-positive
    /// total do not describe parts of a whole, so the chart is skipped then.
    fn write_chart(
        &self,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        let b = self.breakdown;
        writeln!(out, "Cost Breakdown")?;

        let drawable = b.total_tco() > Decimal::ZERO
            && b.components()
                .iter()
                .all(|(_, amount)| !amount.is_sign_negative() || amount.is_zero());
        if !drawable {
            return writeln!(
                out,
                "  (chart omitted: shares need a positive total and no negative costs)"
            );
        }

        for (component, _) in b.components() {
            let Some(share) = b.share_of_total(component) else {
                continue;
            };
            let filled = (share * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
                .round()
                .to_usize()
                .unwrap_or(0)
                .min(BAR_WIDTH);

            writeln!(
                out,
                "  {:<18}{}{} {:>6}",
                component.label(),
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled),
                format_percent(share)
            )?;
        }
        Ok(())
    }

    fn write_details(
        &self,
        out: &mut impl fmt::Write,
    ) -> fmt::Result {
        let b = self.breakdown;
        writeln!(out, "Detailed Breakdown")?;

        for (component, amount) in b.components() {
            writeln!(out, "  {}: {}", component.label(), self.currency(amount))?;
        }
        writeln!(out, "  Total TCO: {}", self.currency(b.total_tco()))
    }
}
