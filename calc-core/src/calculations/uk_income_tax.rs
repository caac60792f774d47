//! UK income tax.
//!
//! The personal allowance is withdrawn by £1 for every £2 of income above the
//! taper threshold; the region's bands then apply to what is left.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::CalcError;
use crate::calculations::common::{non_negative, require_non_negative};
use crate::calculations::progressive::compute_progressive_tax;
use crate::catalog::{BracketCatalog, ScheduleKey};
use crate::models::{BracketSet, TaxResult, UkRegion};
use crate::schedules::uk;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkIncomeTaxConfig {
    pub personal_allowance: Decimal,
    pub taper_threshold: Decimal,
}

impl UkIncomeTaxConfig {
    pub fn for_2024() -> Self {
        Self {
            personal_allowance: uk::PERSONAL_ALLOWANCE,
            taper_threshold: uk::ALLOWANCE_TAPER_THRESHOLD,
        }
    }

    /// Allowance left after tapering for `income`. Only whole £2 steps above
    /// the threshold reduce it.
    pub fn personal_allowance_for(
        &self,
        income: Decimal,
    ) -> Decimal {
        let excess = non_negative(income - self.taper_threshold);
        non_negative(self.personal_allowance - (excess / dec!(2)).floor())
    }
}

impl Default for UkIncomeTaxConfig {
    fn default() -> Self {
        Self::for_2024()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkIncomeTaxResult {
    pub region: UkRegion,
    pub gross_income: Decimal,
    pub personal_allowance: Decimal,
    pub tax: TaxResult,
}

#[derive(Debug, Clone)]
pub struct UkIncomeTax<'a> {
    region: UkRegion,
    bands: &'a BracketSet,
    config: UkIncomeTaxConfig,
}

impl<'a> UkIncomeTax<'a> {
    pub fn new(
        region: UkRegion,
        bands: &'a BracketSet,
        config: UkIncomeTaxConfig,
    ) -> Self {
        Self {
            region,
            bands,
            config,
        }
    }

    /// # Errors
    /// * [`CalcError::UnknownSchedule`] when the catalog lacks the region.
    pub fn from_catalog(
        catalog: &'a BracketCatalog,
        region: UkRegion,
        config: UkIncomeTaxConfig,
    ) -> Result<Self, CalcError> {
        let bands = catalog.require(&ScheduleKey::uk(region))?;
        Ok(Self::new(region, bands, config))
    }

    /// # Errors
    /// * [`CalcError::NegativeAmount`] for negative income.
    pub fn calculate(
        &self,
        gross_income: Decimal,
    ) -> Result<UkIncomeTaxResult, CalcError> {
        let gross_income = require_non_negative("gross_income", gross_income)?;

        let personal_allowance = self.config.personal_allowance_for(gross_income);
        let taxable_income = non_negative(gross_income - personal_allowance);
        let tax = compute_progressive_tax(taxable_income, self.bands);

        debug!(
            region = self.region.as_str(),
            %gross_income,
            %personal_allowance,
            total_tax = %tax.total_tax,
            "uk income tax calculated"
        );

        Ok(UkIncomeTaxResult {
            region: self.region,
            gross_income,
            personal_allowance,
            tax,
        })
    }
}
