use std::collections::BTreeMap;
use std::io::Read;

use calc_core::{Bracket, BracketCatalog, BracketSet, BracketSetError, ScheduleKey};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info};

/// 2024 US state schedules (single filer) bundled with the crate.
pub const US_STATE_BRACKETS_2024: &str = include_str!("../data/us_state_brackets_2024.csv");

/// Errors that can occur when loading bracket schedules.
#[derive(Debug, Error)]
pub enum BracketScheduleLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("invalid schedule '{key}': {source}")]
    InvalidSchedule {
        key: ScheduleKey,
        #[source]
        source: BracketSetError,
    },
}

impl From<csv::Error> for BracketScheduleLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketScheduleLoaderError::CsvParse(err.to_string())
    }
}

/// A single row from a bracket schedule CSV file.
///
/// - `jurisdiction`: e.g. `us-state`, `us-federal`, `uk`
/// - `schedule`: e.g. `CA`, `MFJ`, `SCOTLAND`
/// - `lower_bound`: income at which the bracket starts
/// - `upper_bound`: income at which the bracket ends (empty for unbounded)
/// - `rate`: marginal rate as a decimal (e.g. 0.10 for 10%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub jurisdiction: String,
    pub schedule: String,
    pub lower_bound: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl BracketRecord {
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey::new(&self.jurisdiction, &self.schedule)
    }

    fn to_bracket(&self) -> Bracket {
        Bracket::new(self.lower_bound, self.upper_bound, self.rate)
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for bracket schedules from CSV.
///
/// Rows are grouped by `(jurisdiction, schedule)`; each group becomes one
/// validated [`BracketSet`] in a [`BracketCatalog`]. Row order within a group
/// does not matter.
pub struct BracketScheduleLoader;

impl BracketScheduleLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// byte slice. Whitespace around values is ignored.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketScheduleLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Load bracket records into `catalog`.
    ///
    /// For each `(jurisdiction, schedule)` group this will:
    /// 1. Sort the rows by lower bound
    /// 2. Validate them into a [`BracketSet`]
    /// 3. Replace whatever the catalog held under that key
    ///
    /// Every group is validated before the catalog is touched, so a bad
    /// schedule leaves the catalog unchanged. Loading the same records twice
    /// produces the same catalog.
    ///
    /// Returns the number of schedules loaded.
    pub fn load(
        catalog: &mut BracketCatalog,
        records: &[BracketRecord],
    ) -> Result<usize, BracketScheduleLoaderError> {
        let mut groups: BTreeMap<ScheduleKey, Vec<&BracketRecord>> = BTreeMap::new();
        for record in records {
            groups.entry(record.key()).or_default().push(record);
        }

        let mut validated = Vec::with_capacity(groups.len());
        for (key, mut group_records) in groups {
            group_records.sort_by(|a, b| a.lower_bound.cmp(&b.lower_bound));
            let brackets = group_records.iter().map(|r| r.to_bracket()).collect();

            match BracketSet::new(brackets) {
                Ok(set) => validated.push((key, set)),
                Err(source) => {
                    return Err(BracketScheduleLoaderError::InvalidSchedule { key, source });
                }
            }
        }

        let loaded = validated.len();
        for (key, set) in validated {
            debug!(%key, brackets = set.len(), "schedule loaded");
            catalog.insert(key, set);
        }

        info!(schedules = loaded, "bracket schedules loaded");
        Ok(loaded)
    }

    /// Parse `reader` and load the result into `catalog` in one step.
    pub fn load_from_reader<R: Read>(
        catalog: &mut BracketCatalog,
        reader: R,
    ) -> Result<usize, BracketScheduleLoaderError> {
        let records = Self::parse(reader)?;
        Self::load(catalog, &records)
    }
}

/// The built-in federal and UK schedules plus the bundled state schedules.
pub fn default_state_catalog() -> Result<BracketCatalog, BracketScheduleLoaderError> {
    let mut catalog = BracketCatalog::builtin();
    BracketScheduleLoader::load_from_reader(&mut catalog, US_STATE_BRACKETS_2024.as_bytes())?;
    Ok(catalog)
}
