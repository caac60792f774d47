//! Progressive bracket calculation engine and the tax and salary calculators
//! built on it.

pub mod calculations;
pub mod catalog;
pub mod models;
pub mod schedules;

pub use calculations::{CalcError, compute_progressive_tax};
pub use catalog::{BracketCatalog, ParseScheduleKeyError, ScheduleKey};
pub use models::*;
