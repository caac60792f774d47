//! In-memory registry of bracket schedules keyed by jurisdiction.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::calculations::CalcError;
use crate::models::{BracketSet, FilingStatus, UkRegion};
use crate::schedules::{uk, us_federal};

pub const US_FEDERAL: &str = "us-federal";
pub const US_STATE: &str = "us-state";
pub const UK: &str = "uk";

/// Identifies one schedule, e.g. `us-federal/MFJ`, `uk/SCOTLAND`, `us-state/CA`.
///
/// The jurisdiction is stored lowercase and the schedule uppercase so lookups
/// are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScheduleKey {
    pub jurisdiction: String,
    pub schedule: String,
}

impl ScheduleKey {
    pub fn new(
        jurisdiction: &str,
        schedule: &str,
    ) -> Self {
        Self {
            jurisdiction: jurisdiction.trim().to_ascii_lowercase(),
            schedule: schedule.trim().to_ascii_uppercase(),
        }
    }

    pub fn us_federal(status: FilingStatus) -> Self {
        Self::new(US_FEDERAL, status.schedule_status().as_str())
    }

    pub fn us_state(code: &str) -> Self {
        Self::new(US_STATE, code)
    }

    pub fn uk(region: UkRegion) -> Self {
        Self::new(UK, region.as_str())
    }
}

impl fmt::Display for ScheduleKey {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}/{}", self.jurisdiction, self.schedule)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("schedule key must look like 'jurisdiction/schedule', got '{0}'")]
pub struct ParseScheduleKeyError(String);

impl FromStr for ScheduleKey {
    type Err = ParseScheduleKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((jurisdiction, schedule))
                if !jurisdiction.trim().is_empty()
                    && !schedule.trim().is_empty()
                    && !schedule.contains('/') =>
            {
                Ok(Self::new(jurisdiction, schedule))
            }
            _ => Err(ParseScheduleKeyError(s.to_string())),
        }
    }
}

/// Bracket schedules available to the calculators.
///
/// Typical lifetime:
/// 1. Start from [`BracketCatalog::builtin`] (federal and UK schedules).
/// 2. Add state or custom schedules with `insert`, usually via the CSV loader.
/// 3. Hand `&BracketCatalog` to the calculators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketCatalog {
    schedules: BTreeMap<ScheduleKey, BracketSet>,
}

impl BracketCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding the compiled-in 2024 federal and UK schedules.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for status in [
            FilingStatus::Single,
            FilingStatus::MarriedFilingJointly,
            FilingStatus::MarriedFilingSeparately,
            FilingStatus::HeadOfHousehold,
        ] {
            catalog.insert(
                ScheduleKey::us_federal(status),
                us_federal::brackets_2024(status),
            );
        }
        for region in [UkRegion::RestOfUk, UkRegion::Scotland] {
            catalog.insert(ScheduleKey::uk(region), uk::income_tax_bands_2024(region));
        }
        catalog
    }

    /// Register a schedule, returning the one it replaced, if any.
    pub fn insert(
        &mut self,
        key: ScheduleKey,
        brackets: BracketSet,
    ) -> Option<BracketSet> {
        debug!(%key, brackets = brackets.len(), "registering schedule");
        self.schedules.insert(key, brackets)
    }

    pub fn get(
        &self,
        key: &ScheduleKey,
    ) -> Option<&BracketSet> {
        self.schedules.get(key)
    }

    /// Like [`get`](Self::get) but reports a missing schedule as an error.
    ///
    /// # Errors
    /// * [`CalcError::UnknownSchedule`] when nothing is registered for `key`.
    pub fn require(
        &self,
        key: &ScheduleKey,
    ) -> Result<&BracketSet, CalcError> {
        self.get(key)
            .ok_or_else(|| CalcError::UnknownSchedule(key.clone()))
    }

    /// Every registered key, sorted.
    pub fn keys(&self) -> impl Iterator<Item = &ScheduleKey> {
        self.schedules.keys()
    }

    /// Keys belonging to one jurisdiction, sorted.
    pub fn keys_for<'a>(
        &'a self,
        jurisdiction: &str,
    ) -> impl Iterator<Item = &'a ScheduleKey> {
        let jurisdiction = jurisdiction.trim().to_ascii_lowercase();
        self.schedules
            .keys()
            .filter(move |key| key.jurisdiction == jurisdiction)
    }

    /// Copy every schedule from `other` into `self`, replacing duplicates.
    pub fn extend(
        &mut self,
        other: BracketCatalog,
    ) {
        for (key, brackets) in other.schedules {
            self.insert(key, brackets);
        }
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
