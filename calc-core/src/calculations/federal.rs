//! US federal income tax.
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Gross income |
//! | 2    | Deduction: itemized if greater than zero, else the standard deduction |
//! | 3    | Taxable income: Step 1 - Step 2, minimum 0 |
//! | 4    | Tax: progressive walk over the filing status schedule |
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use calc_core::calculations::{FederalIncomeTax, FederalTaxInput};
//! use calc_core::{BracketCatalog, FilingStatus};
//!
//! let catalog = BracketCatalog::builtin();
//! let calculator = FederalIncomeTax::from_catalog(&catalog, FilingStatus::Single).unwrap();
//!
//! let result = calculator
//!     .calculate(&FederalTaxInput {
//!         gross_income: dec!(64600),
//!         itemized_deduction: dec!(0),
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.taxable_income(), dec!(50000));
//! assert_eq!(result.tax.total_tax, dec!(6053.00));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::CalcError;
use crate::calculations::common::{non_negative, require_non_negative, round_half_up};
use crate::calculations::progressive::compute_progressive_tax;
use crate::catalog::{BracketCatalog, ScheduleKey};
use crate::models::{BracketSet, FilingStatus, TaxResult};
use crate::schedules::us_federal;

/// User-supplied federal inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalTaxInput {
    pub gross_income: Decimal,

    /// Itemized deductions. Used instead of the standard deduction when
    /// greater than zero.
    pub itemized_deduction: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FederalTaxResult {
    pub filing_status: FilingStatus,
    pub gross_income: Decimal,
    pub deduction: Decimal,
    pub used_itemized_deduction: bool,
    pub tax: TaxResult,
}

impl FederalTaxResult {
    pub fn taxable_income(&self) -> Decimal {
        self.tax.taxable_income
    }
}

/// Federal income tax calculator for one filing status.
#[derive(Debug, Clone)]
pub struct FederalIncomeTax<'a> {
    filing_status: FilingStatus,
    brackets: &'a BracketSet,
    standard_deduction: Decimal,
}

impl<'a> FederalIncomeTax<'a> {
    pub fn new(
        filing_status: FilingStatus,
        brackets: &'a BracketSet,
        standard_deduction: Decimal,
    ) -> Self {
        Self {
            filing_status,
            brackets,
            standard_deduction,
        }
    }

    /// Uses the catalog's schedule for `filing_status` and the 2024 standard
    /// deduction. Catalogs carrying another year's schedules should pair this
    /// with [`with_standard_deduction`](Self::with_standard_deduction).
    ///
    /// # Errors
    /// * [`CalcError::UnknownSchedule`] when the catalog lacks the schedule.
    pub fn from_catalog(
        catalog: &'a BracketCatalog,
        filing_status: FilingStatus,
    ) -> Result<Self, CalcError> {
        let brackets = catalog.require(&ScheduleKey::us_federal(filing_status))?;
        Ok(Self::new(
            filing_status,
            brackets,
            us_federal::standard_deduction_2024(filing_status),
        ))
    }

    /// Replaces the standard deduction applied when nothing is itemized.
    pub fn with_standard_deduction(
        mut self,
        standard_deduction: Decimal,
    ) -> Self {
        self.standard_deduction = standard_deduction;
        self
    }

    /// # Errors
    /// * [`CalcError::NegativeAmount`] for a negative gross income or
    ///   itemized deduction.
    pub fn calculate(
        &self,
        input: &FederalTaxInput,
    ) -> Result<FederalTaxResult, CalcError> {
        let gross_income = require_non_negative("gross_income", input.gross_income)?;
        let itemized = require_non_negative("itemized_deduction", input.itemized_deduction)?;

        let (deduction, used_itemized_deduction) = self.determine_deduction(itemized);
        let taxable_income = self.taxable_income(gross_income, deduction);
        let tax = compute_progressive_tax(taxable_income, self.brackets);

        debug!(
            filing_status = self.filing_status.as_str(),
            %gross_income,
            %deduction,
            %taxable_income,
            total_tax = %tax.total_tax,
            "federal income tax calculated"
        );

        Ok(FederalTaxResult {
            filing_status: self.filing_status,
            gross_income,
            deduction,
            used_itemized_deduction,
            tax,
        })
    }

    fn determine_deduction(
        &self,
        itemized: Decimal,
    ) -> (Decimal, bool) {
        if itemized > Decimal::ZERO {
            (round_half_up(itemized), true)
        } else {
            (round_half_up(self.standard_deduction), false)
        }
    }

    fn taxable_income(
        &self,
        gross_income: Decimal,
        deduction: Decimal,
    ) -> Decimal {
        non_negative(round_half_up(gross_income - deduction))
    }
}
