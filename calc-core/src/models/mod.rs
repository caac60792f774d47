mod bracket;
mod filing_status;
mod tax_result;
mod uk_region;

pub use bracket::{Bracket, BracketSet, BracketSetError};
pub use filing_status::FilingStatus;
pub use tax_result::{BracketAmount, TaxResult};
pub use uk_region::UkRegion;
