pub mod loader;

pub use loader::{
    BracketRecord, BracketScheduleLoader, BracketScheduleLoaderError, default_state_catalog,
    US_STATE_BRACKETS_2024,
};
