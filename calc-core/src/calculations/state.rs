//! US state income tax.
//!
//! Each state is one flat or progressive schedule registered in a
//! [`BracketCatalog`] under `us-state/<code>`. States without an income tax
//! carry a single 0% bracket.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::CalcError;
use crate::calculations::common::{non_negative, require_non_negative};
use crate::calculations::progressive::compute_progressive_tax;
use crate::catalog::{BracketCatalog, ScheduleKey};
use crate::models::TaxResult;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateTaxResult {
    /// Two-letter state code, uppercase.
    pub state: String,
    pub deduction: Decimal,
    pub tax: TaxResult,
}

#[derive(Debug, Clone)]
pub struct StateIncomeTax<'a> {
    catalog: &'a BracketCatalog,
}

impl<'a> StateIncomeTax<'a> {
    pub fn new(catalog: &'a BracketCatalog) -> Self {
        Self { catalog }
    }

    /// Applies the state's schedule to `max(0, income - deduction)`.
    ///
    /// # Errors
    /// * [`CalcError::NegativeAmount`] for negative income or deduction.
    /// * [`CalcError::UnknownSchedule`] when the state is not in the catalog.
    pub fn calculate(
        &self,
        state: &str,
        income: Decimal,
        deduction: Decimal,
    ) -> Result<StateTaxResult, CalcError> {
        let income = require_non_negative("state_income", income)?;
        let deduction = require_non_negative("state_deduction", deduction)?;

        let key = ScheduleKey::us_state(state);
        let brackets = self.catalog.require(&key)?;
        let tax = compute_progressive_tax(non_negative(income - deduction), brackets);

        debug!(
            state = %key.schedule,
            %income,
            total_tax = %tax.total_tax,
            "state income tax calculated"
        );

        Ok(StateTaxResult {
            state: key.schedule,
            deduction,
            tax,
        })
    }

    /// Two-letter codes of every state in the catalog, sorted.
    pub fn available_states(&self) -> Vec<&'a str> {
        self.catalog
            .keys_for(crate::catalog::US_STATE)
            .map(|key| key.schedule.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::BracketSet;

    fn catalog() -> BracketCatalog {
        let mut catalog = BracketCatalog::new();
        catalog.insert(
            ScheduleKey::us_state("IL"),
            BracketSet::from_thresholds(&[(dec!(0), dec!(0.0495))]).unwrap(),
        );
        catalog.insert(
            ScheduleKey::us_state("TX"),
            BracketSet::from_thresholds(&[(dec!(0), dec!(0))]).unwrap(),
        );
        catalog.insert(
            ScheduleKey::us_state("OR"),
            BracketSet::from_thresholds(&[
                (dec!(0), dec!(0.0475)),
                (dec!(4300), dec!(0.0675)),
                (dec!(10750), dec!(0.0875)),
                (dec!(125000), dec!(0.099)),
            ])
            .unwrap(),
        );
        catalog
    }

    #[test]
    fn flat_state() {
        let catalog = catalog();
        let result = StateIncomeTax::new(&catalog)
            .calculate("il", dec!(60000), dec!(0))
            .unwrap();

        assert_eq!(result.state, "IL");
        assert_eq!(result.tax.total_tax, dec!(2970.00));
        assert_eq!(result.tax.marginal_rate, dec!(0.0495));
    }

    #[test]
    fn no_income_tax_state() {
        let catalog = catalog();
        let result = StateIncomeTax::new(&catalog)
            .calculate("TX", dec!(60000), dec!(0))
            .unwrap();

        assert_eq!(result.tax.total_tax, dec!(0));
        assert!(result.tax.per_bracket_amounts.is_empty());
        assert_eq!(result.tax.effective_rate, dec!(0));
    }

    #[test]
    fn progressive_state_with_deduction() {
        let catalog = catalog();
        let result = StateIncomeTax::new(&catalog)
            .calculate("OR", dec!(52750), dec!(2750))
            .unwrap();

        // 204.25 + 435.375 + 3434.375 on 50000 taxable
        assert_eq!(result.tax.taxable_income, dec!(50000));
        assert_eq!(result.tax.total_tax, dec!(4074.00));
        assert_eq!(result.tax.per_bracket_amounts.len(), 3);
    }

    #[test]
    fn unknown_state_is_an_error() {
        let catalog = catalog();

        assert_eq!(
            StateIncomeTax::new(&catalog).calculate("ZZ", dec!(1), dec!(0)),
            Err(CalcError::UnknownSchedule(ScheduleKey::us_state("ZZ")))
        );
    }

    #[test]
    fn available_states_are_sorted() {
        let catalog = catalog();

        assert_eq!(
            StateIncomeTax::new(&catalog).available_states(),
            vec!["IL", "OR", "TX"]
        );
    }
}
