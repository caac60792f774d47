//! US take-home pay: federal income tax, FICA and optional state income tax
//! deducted from a gross salary.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::{FicaConfig, UsSalaryCalculator, UsSalaryInput};
//! use calc_core::{BracketCatalog, FilingStatus};
//!
//! let catalog = BracketCatalog::builtin();
//! let calculator = UsSalaryCalculator::new(&catalog, FicaConfig::for_2024()).unwrap();
//!
//! let result = calculator
//!     .calculate(&UsSalaryInput {
//!         gross_salary: dec!(64600),
//!         filing_status: FilingStatus::Single,
//!         itemized_deduction: dec!(0),
//!         state: None,
//!         state_deduction: dec!(0),
//!     })
//!     .unwrap();
//!
//! // 6053.00 federal + 4005.20 social security + 936.70 medicare
//! assert_eq!(result.total_tax, dec!(10994.90));
//! assert_eq!(result.take_home, dec!(53605.10));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::CalcError;
use crate::calculations::common::{ratio_or_zero, require_non_negative};
use crate::calculations::federal::{FederalIncomeTax, FederalTaxInput, FederalTaxResult};
use crate::calculations::fica::{Fica, FicaConfig, FicaResult};
use crate::calculations::pay_period::PeriodAmounts;
use crate::calculations::state::{StateIncomeTax, StateTaxResult};
use crate::catalog::BracketCatalog;
use crate::models::FilingStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsSalaryInput {
    pub gross_salary: Decimal,
    pub filing_status: FilingStatus,
    pub itemized_deduction: Decimal,
    /// Two-letter state code; `None` skips state tax. State schedules are
    /// single-filer, so `filing_status` does not affect the state amount.
    pub state: Option<String>,
    /// Subtracted from gross salary before the state schedule is applied.
    pub state_deduction: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsSalaryResult {
    pub gross_salary: Decimal,
    pub federal: FederalTaxResult,
    pub fica: FicaResult,
    pub state: Option<StateTaxResult>,
    /// Federal + FICA + state, each in cents.
    pub total_tax: Decimal,
    pub take_home: Decimal,
    /// `total_tax / gross_salary`.
    pub effective_total_rate: Decimal,
    pub periods: Vec<PeriodAmounts>,
}

#[derive(Debug, Clone)]
pub struct UsSalaryCalculator<'a> {
    catalog: &'a BracketCatalog,
    fica: Fica,
}

impl<'a> UsSalaryCalculator<'a> {
    /// # Errors
    /// Returns [`CalcError::Fica`] when `fica` is invalid.
    pub fn new(
        catalog: &'a BracketCatalog,
        fica: FicaConfig,
    ) -> Result<Self, CalcError> {
        Ok(Self {
            catalog,
            fica: Fica::new(fica)?,
        })
    }

    /// # Errors
    /// * [`CalcError::NegativeAmount`] for negative inputs.
    /// * [`CalcError::UnknownSchedule`] when the federal or state schedule is
    ///   missing from the catalog.
    pub fn calculate(
        &self,
        input: &UsSalaryInput,
    ) -> Result<UsSalaryResult, CalcError> {
        let gross_salary = require_non_negative("gross_salary", input.gross_salary)?;

        let federal = FederalIncomeTax::from_catalog(self.catalog, input.filing_status)?
            .calculate(&FederalTaxInput {
                gross_income: gross_salary,
                itemized_deduction: input.itemized_deduction,
            })?;

        let fica = self.fica.calculate(gross_salary, input.filing_status)?;

        let state = input
            .state
            .as_deref()
            .map(|code| {
                StateIncomeTax::new(self.catalog).calculate(
                    code,
                    gross_salary,
                    input.state_deduction,
                )
            })
            .transpose()?;

        let state_tax = state
            .as_ref()
            .map_or(Decimal::ZERO, |s| s.tax.rounded_total_tax());
        let total_tax = federal.tax.rounded_total_tax() + fica.total + state_tax;
        let take_home = gross_salary - total_tax;

        info!(
            %gross_salary,
            federal = %federal.tax.total_tax,
            fica = %fica.total,
            state = %state_tax,
            %take_home,
            "us salary calculated"
        );

        Ok(UsSalaryResult {
            gross_salary,
            federal,
            fica,
            state,
            total_tax,
            take_home,
            effective_total_rate: ratio_or_zero(total_tax, gross_salary),
            periods: PeriodAmounts::breakdown(gross_salary, total_tax),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::catalog::ScheduleKey;
    use crate::models::BracketSet;

    fn catalog_with_illinois() -> BracketCatalog {
        let mut catalog = BracketCatalog::builtin();
        catalog.insert(
            ScheduleKey::us_state("IL"),
            BracketSet::from_thresholds(&[(dec!(0), dec!(0.0495))]).unwrap(),
        );
        catalog
    }

    fn input(gross_salary: Decimal) -> UsSalaryInput {
        UsSalaryInput {
            gross_salary,
            filing_status: FilingStatus::Single,
            itemized_deduction: dec!(0),
            state: None,
            state_deduction: dec!(0),
        }
    }

    #[test]
    fn federal_and_fica_only() {
        let catalog = BracketCatalog::builtin();
        let calc = UsSalaryCalculator::new(&catalog, FicaConfig::for_2024()).unwrap();

        let result = calc.calculate(&input(dec!(64600))).unwrap();

        assert_eq!(result.federal.tax.total_tax, dec!(6053.00));
        assert_eq!(result.fica.social_security, dec!(4005.20));
        assert_eq!(result.fica.medicare, dec!(936.70));
        assert_eq!(result.state, None);
        assert_eq!(result.take_home, dec!(53605.10));
    }

    #[test]
    fn includes_state_tax() {
        let catalog = catalog_with_illinois();
        let calc = UsSalaryCalculator::new(&catalog, FicaConfig::for_2024()).unwrap();

        let result = calc
            .calculate(&UsSalaryInput {
                state: Some("IL".to_string()),
                state_deduction: dec!(2775),
                ..input(dec!(64600))
            })
            .unwrap();

        let state = result.state.as_ref().unwrap();
        assert_eq!(state.tax.taxable_income, dec!(61825));
        assert_eq!(state.tax.total_tax, dec!(3060.3375));
        assert_eq!(state.tax.rounded_total_tax(), dec!(3060.34));
        assert_eq!(result.total_tax, dec!(14055.24));
        assert_eq!(result.take_home, dec!(50544.76));
    }

    #[test]
    fn state_tax_ignores_filing_status() {
        let catalog = catalog_with_illinois();
        let calc = UsSalaryCalculator::new(&catalog, FicaConfig::for_2024()).unwrap();
        let with_state = |filing_status| UsSalaryInput {
            filing_status,
            state: Some("IL".to_string()),
            ..input(dec!(120000))
        };

        let single = calc.calculate(&with_state(FilingStatus::Single)).unwrap();
        let joint = calc
            .calculate(&with_state(FilingStatus::MarriedFilingJointly))
            .unwrap();

        assert_eq!(single.state, joint.state);
        assert_eq!(joint.state.unwrap().tax.total_tax, dec!(5940.00));
        assert!(joint.federal.tax.total_tax < single.federal.tax.total_tax);
    }

    #[test]
    fn zero_salary_has_zero_rates() {
        let catalog = BracketCatalog::builtin();
        let calc = UsSalaryCalculator::new(&catalog, FicaConfig::for_2024()).unwrap();

        let result = calc.calculate(&input(dec!(0))).unwrap();

        assert_eq!(result.total_tax, dec!(0));
        assert_eq!(result.effective_total_rate, dec!(0));
        assert_eq!(result.take_home, dec!(0));
    }

    #[test]
    fn periods_split_take_home() {
        let catalog = BracketCatalog::builtin();
        let calc = UsSalaryCalculator::new(&catalog, FicaConfig::for_2024()).unwrap();

        let result = calc.calculate(&input(dec!(64600))).unwrap();
        let monthly = &result.periods[1];

        assert_eq!(monthly.gross, dec!(5383.33));
        assert_eq!(monthly.deductions, dec!(916.24));
        assert_eq!(monthly.net, dec!(4467.09));
    }

    #[test]
    fn unknown_state_is_reported() {
        let catalog = BracketCatalog::builtin();
        let calc = UsSalaryCalculator::new(&catalog, FicaConfig::for_2024()).unwrap();

        let result = calc.calculate(&UsSalaryInput {
            state: Some("CA".to_string()),
            ..input(dec!(64600))
        });

        assert_eq!(
            result,
            Err(CalcError::UnknownSchedule(ScheduleKey::us_state("CA")))
        );
    }

    #[test]
    fn negative_salary_is_rejected() {
        let catalog = BracketCatalog::builtin();
        let calc = UsSalaryCalculator::new(&catalog, FicaConfig::for_2024()).unwrap();

        assert!(matches!(
            calc.calculate(&input(dec!(-1))),
            Err(CalcError::NegativeAmount {
                field: "gross_salary",
                ..
            })
        ));
    }
}
