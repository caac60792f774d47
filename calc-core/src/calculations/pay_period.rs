use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::round_half_up;

/// How often a salary is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayPeriod {
    Annual,
    Monthly,
    BiWeekly,
    Weekly,
}

impl PayPeriod {
    pub const ALL: [PayPeriod; 4] = [
        Self::Annual,
        Self::Monthly,
        Self::BiWeekly,
        Self::Weekly,
    ];

    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Annual => 1,
            Self::Monthly => 12,
            Self::BiWeekly => 26,
            Self::Weekly => 52,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Annual => "Annual",
            Self::Monthly => "Monthly",
            Self::BiWeekly => "Bi-weekly",
            Self::Weekly => "Weekly",
        }
    }

    /// An annual amount spread evenly over this period, rounded to cents.
    pub fn per_period(
        &self,
        annual: Decimal,
    ) -> Decimal {
        round_half_up(annual / Decimal::from(self.periods_per_year()))
    }
}

/// Gross, deductions and take-home for one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodAmounts {
    pub period: PayPeriod,
    pub gross: Decimal,
    pub deductions: Decimal,
    pub net: Decimal,
}

impl PeriodAmounts {
    /// One row per [`PayPeriod`], from annual figures.
    pub fn breakdown(
        annual_gross: Decimal,
        annual_deductions: Decimal,
    ) -> Vec<PeriodAmounts> {
        PayPeriod::ALL
            .iter()
            .map(|period| {
                let gross = period.per_period(annual_gross);
                let deductions = period.per_period(annual_deductions);
                PeriodAmounts {
                    period: *period,
                    gross,
                    deductions,
                    net: gross - deductions,
                }
            })
            .collect()
    }
}
