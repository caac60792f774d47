//! Tax and salary calculators.
//!
//! [`progressive`] holds the shared bracket walk. The remaining modules are
//! jurisdiction-specific callers that prepare taxable income (deductions,
//! allowances) and add flat-rate contributions (FICA, National Insurance)
//! around it.

pub mod common;
pub mod federal;
pub mod fica;
pub mod national_insurance;
pub mod pay_period;
pub mod progressive;
pub mod state;
pub mod uk_income_tax;
pub mod uk_salary;
pub mod us_salary;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::catalog::ScheduleKey;

pub use federal::{FederalIncomeTax, FederalTaxInput, FederalTaxResult};
pub use fica::{Fica, FicaConfig, FicaConfigError, FicaResult};
pub use national_insurance::{
    NationalInsurance, NationalInsuranceConfig, NationalInsuranceConfigError,
    NationalInsuranceResult,
};
pub use pay_period::{PayPeriod, PeriodAmounts};
pub use progressive::compute_progressive_tax;
pub use state::{StateIncomeTax, StateTaxResult};
pub use uk_income_tax::{UkIncomeTax, UkIncomeTaxConfig, UkIncomeTaxResult};
pub use uk_salary::{UkSalaryCalculator, UkSalaryResult};
pub use us_salary::{UsSalaryCalculator, UsSalaryInput, UsSalaryResult};

/// Errors raised by the calculators before the bracket walk runs.
///
/// The walk itself cannot fail; everything here is caller-side validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    /// A money input was negative.
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// No schedule is registered under the requested key.
    #[error("no bracket schedule registered for '{0}'")]
    UnknownSchedule(ScheduleKey),

    #[error(transparent)]
    Fica(#[from] FicaConfigError),

    #[error(transparent)]
    NationalInsurance(#[from] NationalInsuranceConfigError),
}
