//! The shared progressive bracket walk.
//!
//! Every bracket-based tax in this crate (US federal, US state, UK income
//! tax) funnels through [`compute_progressive_tax`]. Jurisdiction-specific
//! work such as deductions, allowance tapering and payroll taxes happens in
//! the callers, before and after the walk.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculations::common::ratio_or_zero;
use crate::models::{BracketAmount, BracketSet, TaxResult};

/// Computes the tax owed on `taxable_income` under `brackets`.
///
/// Brackets are walked lowest first. Each contributes
/// `max(0, min(income, upper) - lower) * rate`, and the walk stops at the first
/// bracket whose lower bound is at or above the income. Only brackets with a
/// non-zero contribution appear in the breakdown.
///
/// The marginal rate is the rate of the last bracket the income reaches, so
/// income sitting exactly on a boundary reports the lower bracket's rate. For
/// zero income the marginal rate is the first bracket's rate.
///
/// `total_tax` and `effective_rate` are exact; nothing is rounded here.
///
/// Negative income is not meaningful; it is clamped to zero and logged.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::calculations::compute_progressive_tax;
/// use calc_core::schedules::us_federal;
/// use calc_core::FilingStatus;
///
/// let brackets = us_federal::brackets_2024(FilingStatus::Single);
/// let result = compute_progressive_tax(dec!(50000), &brackets);
///
/// assert_eq!(result.total_tax, dec!(6053.00));
/// assert_eq!(result.marginal_rate, dec!(0.22));
/// assert_eq!(result.effective_rate, dec!(0.12106));
/// assert_eq!(result.per_bracket_amounts.len(), 3);
/// ```
pub fn compute_progressive_tax(
    taxable_income: Decimal,
    brackets: &BracketSet,
) -> TaxResult {
    let income = if taxable_income < Decimal::ZERO {
        warn!(%taxable_income, "negative taxable income clamped to zero");
        Decimal::ZERO
    } else {
        taxable_income
    };

    if income.is_zero() {
        return TaxResult::zero(brackets.first().rate);
    }

    let mut total_tax = Decimal::ZERO;
    let mut marginal_rate = brackets.first().rate;
    let mut per_bracket_amounts = Vec::new();

    for bracket in brackets {
        if income <= bracket.lower_bound {
            break;
        }
        marginal_rate = bracket.rate;

        let taxable_amount = bracket.taxable_portion(income);
        let amount = taxable_amount * bracket.rate;
        total_tax += amount;

        if !amount.is_zero() {
            per_bracket_amounts.push(BracketAmount {
                rate: bracket.rate,
                taxable_amount,
                amount,
            });
        }
    }

    let effective_rate = ratio_or_zero(total_tax, income);

    debug!(
        %income,
        %total_tax,
        %marginal_rate,
        brackets_touched = per_bracket_amounts.len(),
        "progressive tax computed"
    );

    TaxResult {
        taxable_income: income,
        total_tax,
        per_bracket_amounts,
        marginal_rate,
        effective_rate,
    }
}
