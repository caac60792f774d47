use clap::Parser;
use tracing::debug;

use calc_cli::app;
use calc_cli::cli::Cli;
use calc_cli::config::{FileConfig, Settings};
use calc_cli::logging;

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(&cli, file_config)?;

    logging::init_logging(settings.log_level.as_deref())?;
    debug!(?settings, "settings resolved");

    let catalog = app::build_catalog(settings.brackets.as_deref())?;
    let output = app::execute(&cli.command, &settings, &catalog)?;

    println!("{output}");
    Ok(())
}
