use std::path::{Path, PathBuf};

use calc_core::{FilingStatus, UkRegion};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::cli::Cli;
use crate::report::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {field} '{value}' in config")]
    InvalidValue { field: &'static str, value: String },
}

/// Defaults read from a TOML file. Every field is optional.
///
/// ```toml
/// filing_status = "MFJ"
/// state = "CA"
/// region = "scotland"
/// format = "json"
/// log_level = "info"
/// brackets = "schedules/2025.csv"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub filing_status: Option<String>,
    pub state: Option<String>,
    pub region: Option<String>,
    pub format: Option<OutputFormat>,
    pub log_level: Option<String>,
    /// Relative paths are resolved against the config file's directory.
    pub brackets: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::parse(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(dir) = path.parent() {
            config.brackets = config
                .brackets
                .map(|b| if b.is_relative() { dir.join(b) } else { b });
        }

        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Options after merging the config file with command-line flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub filing_status: FilingStatus,
    pub state: Option<String>,
    pub region: UkRegion,
    pub format: OutputFormat,
    pub log_level: Option<String>,
    pub brackets: Option<PathBuf>,
}

impl Settings {
    /// Flags on `cli` win over `file`; anything neither sets keeps its default.
    pub fn resolve(
        cli: &Cli,
        file: FileConfig,
    ) -> Result<Self, ConfigError> {
        let filing_status = match file.filing_status {
            Some(value) => FilingStatus::parse(&value).ok_or(ConfigError::InvalidValue {
                field: "filing_status",
                value,
            })?,
            None => FilingStatus::default(),
        };
        let region = match file.region {
            Some(value) => UkRegion::parse(&value).ok_or(ConfigError::InvalidValue {
                field: "region",
                value,
            })?,
            None => UkRegion::default(),
        };

        Ok(Self {
            filing_status,
            state: file.state,
            region,
            format: cli.format.or(file.format).unwrap_or_default(),
            log_level: cli.log_level.clone().or(file.log_level),
            brackets: cli.brackets.clone().or(file.brackets),
        })
    }
}
