use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// Tax owed on the slice of income that fell inside one bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAmount {
    pub rate: Decimal,
    /// Income taxed at `rate`.
    pub taxable_amount: Decimal,
    /// `taxable_amount * rate`, unrounded.
    pub amount: Decimal,
}

/// Outcome of one progressive bracket walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub taxable_income: Decimal,

    /// Exact sum of all bracket amounts. Use
    /// [`rounded_total_tax`](Self::rounded_total_tax) for an amount in cents.
    pub total_tax: Decimal,

    /// Brackets with a non-zero contribution, lowest first.
    pub per_bracket_amounts: Vec<BracketAmount>,

    /// Rate of the highest bracket the income reaches.
    pub marginal_rate: Decimal,

    /// `total_tax / taxable_income`, or zero for zero income.
    pub effective_rate: Decimal,
}

impl TaxResult {
    /// A result for zero taxable income.
    pub fn zero(marginal_rate: Decimal) -> Self {
        Self {
            taxable_income: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            per_bracket_amounts: Vec::new(),
            marginal_rate,
            effective_rate: Decimal::ZERO,
        }
    }

    /// `total_tax` rounded half-up to cents.
    pub fn rounded_total_tax(&self) -> Decimal {
        round_half_up(self.total_tax)
    }
}
