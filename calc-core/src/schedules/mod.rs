//! Rate schedules compiled into the crate.
//!
//! Federal and UK schedules change at most once a year and are kept here as
//! constants. US state schedules are data and ship as CSV in `calc-data`.

pub mod uk;
pub mod us_federal;
