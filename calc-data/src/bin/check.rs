use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use calc_core::BracketCatalog;
use calc_data::BracketScheduleLoader;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Validate a bracket schedule CSV file and summarise what it contains.
///
/// The CSV file should have the following columns:
/// - jurisdiction: e.g. us-state, us-federal, uk
/// - schedule: e.g. CA, MFJ, SCOTLAND
/// - lower_bound: income at which the bracket starts
/// - upper_bound: income at which the bracket ends (empty for unbounded)
/// - rate: the marginal rate as a decimal (e.g. 0.10)
#[derive(Parser, Debug)]
#[command(name = "calc-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the CSV file containing bracket schedules
    #[arg(short, long)]
    file: PathBuf,

    /// Print every bracket, not just one line per schedule
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file = File::open(&args.file)
        .with_context(|| format!("Failed to open: {}", args.file.display()))?;

    let records = BracketScheduleLoader::parse(file)
        .with_context(|| format!("Failed to parse CSV: {}", args.file.display()))?;

    println!("Parsed {} records from CSV", records.len());

    let mut catalog = BracketCatalog::new();
    let loaded = BracketScheduleLoader::load(&mut catalog, &records)
        .context("Schedules failed validation")?;

    for key in catalog.keys() {
        let Some(set) = catalog.get(key) else {
            continue;
        };
        println!(
            "{key}: {} bracket(s), top rate {}",
            set.len(),
            set.max_rate()
        );
        if args.verbose {
            for bracket in set {
                let upper = bracket
                    .upper_bound
                    .map_or_else(|| "∞".to_string(), |u| u.to_string());
                println!("    {} – {}  @ {}", bracket.lower_bound, upper, bracket.rate);
            }
        }
    }

    println!("{loaded} schedule(s) valid.");

    Ok(())
}
