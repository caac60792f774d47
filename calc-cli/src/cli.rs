use std::path::PathBuf;

use calc_core::{FilingStatus, ScheduleKey, UkRegion};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

use crate::input::parse_amount;
use crate::report::OutputFormat;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Progressive bracket tax calculator.
///
/// Walks income through a bracket schedule and reports the tax owed, the
/// per-bracket breakdown and the marginal and effective rates. Ships the 2024
/// US federal, US state and UK schedules; more can be loaded from CSV.
#[derive(Debug, Parser)]
#[command(name = "bracket-calc", version, about)]
pub struct Cli {
    /// TOML file with default options.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Extra bracket schedules (CSV) merged over the built-in ones.
    #[arg(long, global = true)]
    pub brackets: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log filter, e.g. `debug` or `warn,calc_core=trace`.
    /// Overrides `RUST_LOG`.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one bracket schedule over an already-taxable income.
    Tax {
        #[arg(value_parser = parse_amount)]
        income: Decimal,

        /// Schedule key, e.g. `us-federal/S`, `us-state/CA`, `uk/scotland`.
        #[arg(long)]
        schedule: ScheduleKey,
    },

    /// US federal income tax after the standard or itemized deduction.
    UsFederal {
        #[arg(value_parser = parse_amount)]
        gross: Decimal,

        /// S, MFJ, MFS, HOH or QSS.
        #[arg(long, value_parser = parse_filing_status)]
        filing_status: Option<FilingStatus>,

        /// Itemized deductions; used only when larger than the standard one.
        #[arg(long, value_parser = parse_amount, default_value = "0")]
        itemized: Decimal,
    },

    /// US take-home pay: federal, FICA and optional state tax.
    UsSalary {
        #[arg(value_parser = parse_amount)]
        gross: Decimal,

        #[arg(long, value_parser = parse_filing_status)]
        filing_status: Option<FilingStatus>,

        #[arg(long, value_parser = parse_amount, default_value = "0")]
        itemized: Decimal,

        /// Two-letter state code, e.g. CA. Uses the state's single-filer
        /// schedule for every filing status.
        #[arg(long)]
        state: Option<String>,

        /// Deduction subtracted from gross before the state schedule.
        #[arg(long, value_parser = parse_amount, default_value = "0")]
        state_deduction: Decimal,
    },

    /// UK take-home pay: income tax and National Insurance.
    UkSalary {
        #[arg(value_parser = parse_amount)]
        gross: Decimal,

        /// `ruk` (England, Wales, NI) or `scotland`.
        #[arg(long, value_parser = parse_region)]
        region: Option<UkRegion>,
    },

    /// List the schedules in the catalog.
    Schedules {
        /// Only show one jurisdiction, e.g. `us-state`.
        #[arg(long)]
        jurisdiction: Option<String>,
    },

    /// Print the brackets of one schedule.
    Show { key: ScheduleKey },
}

pub fn parse_filing_status(s: &str) -> Result<FilingStatus, String> {
    FilingStatus::parse(s).ok_or_else(|| {
        format!("unknown filing status '{s}' (expected S, MFJ, MFS, HOH or QSS)")
    })
}

pub fn parse_region(s: &str) -> Result<UkRegion, String> {
    UkRegion::parse(s).ok_or_else(|| format!("unknown UK region '{s}' (expected ruk or scotland)"))
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn tax_command_parses_amount_and_key() {
        let cli = Cli::try_parse_from([
            "bracket-calc",
            "tax",
            "$50,000",
            "--schedule",
            "us-federal/S",
        ])
        .unwrap();

        let Command::Tax { income, schedule } = cli.command else {
            panic!("expected tax command, got {:?}", cli.command);
        };
        assert_eq!(income, dec!(50000));
        assert_eq!(schedule, ScheduleKey::us_federal(FilingStatus::Single));
    }

    #[test]
    fn global_options_follow_the_subcommand() {
        let cli = Cli::try_parse_from([
            "bracket-calc",
            "uk-salary",
            "30000",
            "--region",
            "scotland",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        let Command::UkSalary { gross, region } = cli.command else {
            panic!("expected uk-salary command");
        };
        assert_eq!(gross, dec!(30000));
        assert_eq!(region, Some(UkRegion::Scotland));
    }

    #[test]
    fn us_salary_defaults() {
        let cli = Cli::try_parse_from(["bracket-calc", "us-salary", "64600"]).unwrap();

        let Command::UsSalary {
            filing_status,
            itemized,
            state,
            state_deduction,
            ..
        } = cli.command
        else {
            panic!("expected us-salary command");
        };
        assert_eq!(filing_status, None);
        assert_eq!(itemized, dec!(0));
        assert_eq!(state, None);
        assert_eq!(state_deduction, dec!(0));
    }

    #[test]
    fn state_help_mentions_single_filer_schedule() {
        let command = Cli::command();
        let help = command
            .find_subcommand("us-salary")
            .and_then(|sub| sub.get_arguments().find(|arg| arg.get_id() == "state"))
            .and_then(|arg| arg.get_help())
            .map(ToString::to_string)
            .unwrap();

        assert!(help.contains("single-filer schedule for every filing status"), "{help}");
    }

    #[test]
    fn malformed_amount_is_a_usage_error() {
        let err = Cli::try_parse_from(["bracket-calc", "us-federal", "12a"]).unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn unknown_filing_status_is_a_usage_error() {
        let err = Cli::try_parse_from([
            "bracket-calc",
            "us-federal",
            "50000",
            "--filing-status",
            "widow",
        ])
        .unwrap_err();

        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn schedule_key_without_slash_is_rejected() {
        assert!(Cli::try_parse_from(["bracket-calc", "show", "us-federal"]).is_err());
    }
}
