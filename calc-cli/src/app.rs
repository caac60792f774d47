use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use calc_core::calculations::{
    FederalIncomeTax, FederalTaxInput, FicaConfig, UkSalaryCalculator, UsSalaryCalculator,
    UsSalaryInput,
};
use calc_core::{BracketCatalog, compute_progressive_tax};
use calc_data::{BracketScheduleLoader, default_state_catalog};
use tracing::{debug, info};

use crate::cli::Command;
use crate::config::Settings;
use crate::report::{ScheduleList, ScheduleListing, ScheduleReport, render};

/// The built-in schedules plus the bundled state data, with `extra` (a
/// schedule CSV) loaded over the top.
pub fn build_catalog(extra: Option<&Path>) -> Result<BracketCatalog> {
    let mut catalog = default_state_catalog().context("bundled state schedules are invalid")?;

    if let Some(path) = extra {
        let file = File::open(path)
            .with_context(|| format!("failed to open bracket file {}", path.display()))?;
        let loaded = BracketScheduleLoader::load_from_reader(&mut catalog, file)
            .with_context(|| format!("failed to load bracket file {}", path.display()))?;
        info!(path = %path.display(), schedules = loaded, "custom schedules loaded");
    }

    debug!(schedules = catalog.len(), "catalog ready");
    Ok(catalog)
}

/// Runs `command` against `catalog` and returns the rendered report.
pub fn execute(
    command: &Command,
    settings: &Settings,
    catalog: &BracketCatalog,
) -> Result<String> {
    let format = settings.format;

    match command {
        Command::Tax { income, schedule } => {
            let brackets = catalog.require(schedule)?;
            let report = ScheduleReport {
                schedule: schedule.clone(),
                result: compute_progressive_tax(*income, brackets),
            };
            render(&report, format)
        }

        Command::UsFederal {
            gross,
            filing_status,
            itemized,
        } => {
            let status = filing_status.unwrap_or(settings.filing_status);
            let input = FederalTaxInput {
                gross_income: *gross,
                itemized_deduction: *itemized,
            };
            let result = FederalIncomeTax::from_catalog(catalog, status)?.calculate(&input)?;
            render(&result, format)
        }

        Command::UsSalary {
            gross,
            filing_status,
            itemized,
            state,
            state_deduction,
        } => {
            let calculator = UsSalaryCalculator::new(catalog, FicaConfig::for_2024())?;
            let result = calculator.calculate(&UsSalaryInput {
                gross_salary: *gross,
                filing_status: filing_status.unwrap_or(settings.filing_status),
                itemized_deduction: *itemized,
                state: state.clone().or_else(|| settings.state.clone()),
                state_deduction: *state_deduction,
            })?;
            render(&result, format)
        }

        Command::UkSalary { gross, region } => {
            let calculator = UkSalaryCalculator::for_2024(catalog)?;
            let result = calculator.calculate(*gross, region.unwrap_or(settings.region))?;
            render(&result, format)
        }

        Command::Schedules { jurisdiction } => {
            render(&ScheduleList::from_catalog(catalog, jurisdiction.as_deref()), format)
        }

        Command::Show { key } => {
            let listing = ScheduleListing {
                key: key.clone(),
                brackets: catalog.require(key)?.clone(),
            };
            render(&listing, format)
        }
    }
}
