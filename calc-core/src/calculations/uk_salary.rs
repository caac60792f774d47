//! UK take-home pay: income tax and employee National Insurance deducted from
//! a gross salary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::CalcError;
use crate::calculations::common::{ratio_or_zero, require_non_negative};
use crate::calculations::national_insurance::{
    NationalInsurance, NationalInsuranceConfig, NationalInsuranceResult,
};
use crate::calculations::pay_period::PeriodAmounts;
use crate::calculations::uk_income_tax::{UkIncomeTax, UkIncomeTaxConfig, UkIncomeTaxResult};
use crate::catalog::BracketCatalog;
use crate::models::UkRegion;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UkSalaryResult {
    pub gross_salary: Decimal,
    pub income_tax: UkIncomeTaxResult,
    pub national_insurance: NationalInsuranceResult,
    pub total_deductions: Decimal,
    pub take_home: Decimal,
    pub effective_total_rate: Decimal,
    pub periods: Vec<PeriodAmounts>,
}

#[derive(Debug, Clone)]
pub struct UkSalaryCalculator<'a> {
    catalog: &'a BracketCatalog,
    income_tax: UkIncomeTaxConfig,
    national_insurance: NationalInsurance,
}

impl<'a> UkSalaryCalculator<'a> {
    /// # Errors
    /// Returns [`CalcError::NationalInsurance`] when the NI config is invalid.
    pub fn new(
        catalog: &'a BracketCatalog,
        income_tax: UkIncomeTaxConfig,
        national_insurance: NationalInsuranceConfig,
    ) -> Result<Self, CalcError> {
        Ok(Self {
            catalog,
            income_tax,
            national_insurance: NationalInsurance::new(national_insurance)?,
        })
    }

    /// 2024/25 allowance and NI thresholds.
    pub fn for_2024(catalog: &'a BracketCatalog) -> Result<Self, CalcError> {
        Self::new(
            catalog,
            UkIncomeTaxConfig::for_2024(),
            NationalInsuranceConfig::for_2024(),
        )
    }

    /// # Errors
    /// * [`CalcError::NegativeAmount`] for a negative salary.
    /// * [`CalcError::UnknownSchedule`] when the region's bands are missing.
    pub fn calculate(
        &self,
        gross_salary: Decimal,
        region: UkRegion,
    ) -> Result<UkSalaryResult, CalcError> {
        let gross_salary = require_non_negative("gross_salary", gross_salary)?;

        let income_tax = UkIncomeTax::from_catalog(self.catalog, region, self.income_tax.clone())?
            .calculate(gross_salary)?;
        let national_insurance = self.national_insurance.calculate(gross_salary)?;

        let total_deductions = income_tax.tax.rounded_total_tax() + national_insurance.total;
        let take_home = gross_salary - total_deductions;

        info!(
            region = region.as_str(),
            %gross_salary,
            income_tax = %income_tax.tax.total_tax,
            national_insurance = %national_insurance.total,
            %take_home,
            "uk salary calculated"
        );

        Ok(UkSalaryResult {
            gross_salary,
            income_tax,
            national_insurance,
            total_deductions,
            take_home,
            effective_total_rate: ratio_or_zero(total_deductions, gross_salary),
            periods: PeriodAmounts::breakdown(gross_salary, total_deductions),
        })
    }
}
