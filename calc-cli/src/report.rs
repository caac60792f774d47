//! Rendering calculator results as text tables or JSON.

use std::fmt::{self, Write};

use calc_core::calculations::common::round_half_up;
use calc_core::calculations::{FederalTaxResult, PeriodAmounts, UkSalaryResult, UsSalaryResult};
use calc_core::catalog::UK;
use calc_core::{BracketCatalog, BracketSet, ScheduleKey, TaxResult};
use clap::ValueEnum;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

const LABEL_WIDTH: usize = 22;

// ─── formatting helpers ──────────────────────────────────────────────────────

/// Currency symbol for amounts taxed under `key`.
pub fn currency_symbol(key: &ScheduleKey) -> &'static str {
    if key.jurisdiction == UK { "£" } else { "$" }
}

/// Formats `amount` to cents with thousands separators: `$1,234,567.89`.
pub fn format_money(
    amount: Decimal,
    symbol: &str,
) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}{symbol}{grouped}.{fraction}")
}

/// Formats a fractional rate as a percentage to two places: `0.12106` is
/// `12.11%`.
pub fn format_rate(rate: Decimal) -> String {
    let percent = (rate * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{percent:.2}%")
}

fn row(
    out: &mut String,
    label: &str,
    value: impl fmt::Display,
) -> fmt::Result {
    writeln!(out, "{label:<width$}{value}", width = LABEL_WIDTH)
}

fn write_breakdown(
    out: &mut String,
    tax: &TaxResult,
    symbol: &str,
) -> fmt::Result {
    for bracket in &tax.per_bracket_amounts {
        writeln!(
            out,
            "  {:>7} on {:>15} = {:>13}",
            format_rate(bracket.rate),
            format_money(bracket.taxable_amount, symbol),
            format_money(bracket.amount, symbol),
        )?;
    }
    Ok(())
}

fn write_rates(
    out: &mut String,
    tax: &TaxResult,
) -> fmt::Result {
    row(out, "Marginal rate", format_rate(tax.marginal_rate))?;
    row(out, "Effective rate", format_rate(tax.effective_rate))
}

fn write_periods(
    out: &mut String,
    periods: &[PeriodAmounts],
    symbol: &str,
) -> fmt::Result {
    writeln!(out)?;
    writeln!(out, "{:<10} {:>15} {:>15} {:>15}", "Period", "Gross", "Deductions", "Net")?;
    for p in periods {
        writeln!(
            out,
            "{:<10} {:>15} {:>15} {:>15}",
            p.period.label(),
            format_money(p.gross, symbol),
            format_money(p.deductions, symbol),
            format_money(p.net, symbol),
        )?;
    }
    Ok(())
}

// ─── Render ──────────────────────────────────────────────────────────────────

/// A result that can be printed by the CLI.
pub trait Render: Serialize {
    fn render_text(
        &self,
        out: &mut String,
    ) -> fmt::Result;
}

/// Renders `value` in the requested format.
pub fn render<T: Render>(
    value: &T,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Text => {
            let mut out = String::new();
            value.render_text(&mut out)?;
            Ok(out.trim_end().to_string())
        }
    }
}

/// One schedule applied to one income.
#[derive(Debug, Serialize)]
pub struct ScheduleReport {
    pub schedule: ScheduleKey,
    #[serde(flatten)]
    pub result: TaxResult,
}

impl Render for ScheduleReport {
    fn render_text(
        &self,
        out: &mut String,
    ) -> fmt::Result {
        let symbol = currency_symbol(&self.schedule);
        row(out, "Schedule", &self.schedule)?;
        row(out, "Taxable income", format_money(self.result.taxable_income, symbol))?;
        write_breakdown(out, &self.result, symbol)?;
        row(out, "Total tax", format_money(self.result.total_tax, symbol))?;
        write_rates(out, &self.result)
    }
}

impl Render for FederalTaxResult {
    fn render_text(
        &self,
        out: &mut String,
    ) -> fmt::Result {
        let kind = if self.used_itemized_deduction { "itemized" } else { "standard" };
        row(out, "Filing status", self.filing_status)?;
        row(out, "Gross income", format_money(self.gross_income, "$"))?;
        row(out, "Deduction", format!("{} ({kind})", format_money(self.deduction, "$")))?;
        row(out, "Taxable income", format_money(self.taxable_income(), "$"))?;
        write_breakdown(out, &self.tax, "$")?;
        row(out, "Federal income tax", format_money(self.tax.total_tax, "$"))?;
        write_rates(out, &self.tax)
    }
}

impl Render for UsSalaryResult {
    fn render_text(
        &self,
        out: &mut String,
    ) -> fmt::Result {
        self.federal.render_text(out)?;
        writeln!(out)?;
        row(out, "Social Security", format_money(self.fica.social_security, "$"))?;
        row(out, "Medicare", format_money(self.fica.medicare, "$"))?;
        if !self.fica.additional_medicare.is_zero() {
            row(out, "Additional Medicare", format_money(self.fica.additional_medicare, "$"))?;
        }
        if let Some(state) = &self.state {
            let label = format!("State tax ({})", state.state);
            row(out, &label, format_money(state.tax.total_tax, "$"))?;
        }
        writeln!(out)?;
        row(out, "Total tax", format_money(self.total_tax, "$"))?;
        row(out, "Take-home pay", format_money(self.take_home, "$"))?;
        row(out, "Effective total rate", format_rate(self.effective_total_rate))?;
        write_periods(out, &self.periods, "$")
    }
}

impl Render for UkSalaryResult {
    fn render_text(
        &self,
        out: &mut String,
    ) -> fmt::Result {
        let tax = &self.income_tax;
        row(out, "Region", tax.region.label())?;
        row(out, "Gross salary", format_money(self.gross_salary, "£"))?;
        row(out, "Personal allowance", format_money(tax.personal_allowance, "£"))?;
        row(out, "Taxable income", format_money(tax.tax.taxable_income, "£"))?;
        write_breakdown(out, &tax.tax, "£")?;
        row(out, "Income tax", format_money(tax.tax.total_tax, "£"))?;
        row(out, "National Insurance", format_money(self.national_insurance.total, "£"))?;
        writeln!(out)?;
        row(out, "Total deductions", format_money(self.total_deductions, "£"))?;
        row(out, "Take-home pay", format_money(self.take_home, "£"))?;
        row(out, "Effective total rate", format_rate(self.effective_total_rate))?;
        write_periods(out, &self.periods, "£")
    }
}

#[derive(Debug, Serialize)]
pub struct ScheduleSummary {
    pub key: ScheduleKey,
    pub brackets: usize,
    pub top_rate: Decimal,
}

/// The keys in a catalog, optionally narrowed to one jurisdiction.
#[derive(Debug, Serialize)]
pub struct ScheduleList {
    pub schedules: Vec<ScheduleSummary>,
}

impl ScheduleList {
    pub fn from_catalog(
        catalog: &BracketCatalog,
        jurisdiction: Option<&str>,
    ) -> Self {
        let schedules = catalog
            .keys()
            .filter(|key| {
                jurisdiction.is_none_or(|j| key.jurisdiction.eq_ignore_ascii_case(j.trim()))
            })
            .filter_map(|key| {
                catalog.get(key).map(|set| ScheduleSummary {
                    key: key.clone(),
                    brackets: set.len(),
                    top_rate: set.max_rate(),
                })
            })
            .collect();
        Self { schedules }
    }
}

impl Render for ScheduleList {
    fn render_text(
        &self,
        out: &mut String,
    ) -> fmt::Result {
        for s in &self.schedules {
            writeln!(
                out,
                "{:<24} {:>2} bracket(s)  top {}",
                s.key.to_string(),
                s.brackets,
                format_rate(s.top_rate)
            )?;
        }
        writeln!(out, "{} schedule(s)", self.schedules.len())
    }
}

/// The brackets of a single schedule.
#[derive(Debug, Serialize)]
pub struct ScheduleListing {
    pub key: ScheduleKey,
    pub brackets: BracketSet,
}

impl Render for ScheduleListing {
    fn render_text(
        &self,
        out: &mut String,
    ) -> fmt::Result {
        let symbol = currency_symbol(&self.key);
        writeln!(out, "{}", self.key)?;
        for bracket in &self.brackets {
            let upper = bracket
                .upper_bound
                .map_or_else(|| "and above".to_string(), |u| format_money(u, symbol));
            writeln!(
                out,
                "  {:>15} - {:<15} {:>7}",
                format_money(bracket.lower_bound, symbol),
                upper,
                format_rate(bracket.rate)
            )?;
        }
        Ok(())
    }
}
