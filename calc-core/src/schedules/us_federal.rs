//! US federal income tax rate schedules and standard deductions, tax year 2024.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{BracketSet, FilingStatus};

pub const TAX_YEAR: i32 = 2024;

// (lower bound, rate) pairs; each bracket ends where the next begins.

const SINGLE: &[(Decimal, Decimal)] = &[
    (dec!(0), dec!(0.10)),
    (dec!(11600), dec!(0.12)),
    (dec!(47150), dec!(0.22)),
    (dec!(100525), dec!(0.24)),
    (dec!(191950), dec!(0.32)),
    (dec!(243725), dec!(0.35)),
    (dec!(609350), dec!(0.37)),
];

const MARRIED_FILING_JOINTLY: &[(Decimal, Decimal)] = &[
    (dec!(0), dec!(0.10)),
    (dec!(23200), dec!(0.12)),
    (dec!(94300), dec!(0.22)),
    (dec!(201050), dec!(0.24)),
    (dec!(383900), dec!(0.32)),
    (dec!(487450), dec!(0.35)),
    (dec!(731200), dec!(0.37)),
];

const MARRIED_FILING_SEPARATELY: &[(Decimal, Decimal)] = &[
    (dec!(0), dec!(0.10)),
    (dec!(11600), dec!(0.12)),
    (dec!(47150), dec!(0.22)),
    (dec!(100525), dec!(0.24)),
    (dec!(191950), dec!(0.32)),
    (dec!(243725), dec!(0.35)),
    (dec!(365600), dec!(0.37)),
];

const HEAD_OF_HOUSEHOLD: &[(Decimal, Decimal)] = &[
    (dec!(0), dec!(0.10)),
    (dec!(16550), dec!(0.12)),
    (dec!(63100), dec!(0.22)),
    (dec!(100500), dec!(0.24)),
    (dec!(191950), dec!(0.32)),
    (dec!(243700), dec!(0.35)),
    (dec!(609350), dec!(0.37)),
];

/// The 2024 rate schedule for `status`.
pub fn brackets_2024(status: FilingStatus) -> BracketSet {
    let table = match status.schedule_status() {
        FilingStatus::Single => SINGLE,
        FilingStatus::MarriedFilingJointly | FilingStatus::QualifyingSurvivingSpouse => {
            MARRIED_FILING_JOINTLY
        }
        FilingStatus::MarriedFilingSeparately => MARRIED_FILING_SEPARATELY,
        FilingStatus::HeadOfHousehold => HEAD_OF_HOUSEHOLD,
    };
    BracketSet::from_static_thresholds(table)
}

/// The 2024 standard deduction for `status`.
pub fn standard_deduction_2024(status: FilingStatus) -> Decimal {
    match status.schedule_status() {
        FilingStatus::Single | FilingStatus::MarriedFilingSeparately => dec!(14600),
        FilingStatus::MarriedFilingJointly | FilingStatus::QualifyingSurvivingSpouse => {
            dec!(29200)
        }
        FilingStatus::HeadOfHousehold => dec!(21900),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::Bracket;

    #[test]
    fn every_schedule_is_valid() {
        for status in FilingStatus::ALL {
            let set = brackets_2024(status);
            let rebuilt = BracketSet::new(set.brackets().to_vec());

            assert_eq!(rebuilt.as_ref(), Ok(&set), "{status}");
            assert_eq!(set.len(), 7, "{status}");
            assert_eq!(set.max_rate(), dec!(0.37), "{status}");
        }
    }

    #[test]
    fn joint_brackets_double_single_up_to_the_top() {
        let single = brackets_2024(FilingStatus::Single);
        let joint = brackets_2024(FilingStatus::MarriedFilingJointly);

        for (s, j) in single.iter().zip(joint.iter()).take(5) {
            assert_eq!(j.upper_bound, s.upper_bound.map(|u| u * dec!(2)));
        }
    }

    #[test]
    fn head_of_household_first_bracket() {
        let set = brackets_2024(FilingStatus::HeadOfHousehold);

        assert_eq!(
            set.first(),
            &Bracket::new(dec!(0), Some(dec!(16550)), dec!(0.10))
        );
    }

    #[test]
    fn surviving_spouse_matches_joint() {
        assert_eq!(
            brackets_2024(FilingStatus::QualifyingSurvivingSpouse),
            brackets_2024(FilingStatus::MarriedFilingJointly)
        );
        assert_eq!(
            standard_deduction_2024(FilingStatus::QualifyingSurvivingSpouse),
            dec!(29200)
        );
    }

    #[test]
    fn standard_deductions() {
        assert_eq!(standard_deduction_2024(FilingStatus::Single), dec!(14600));
        assert_eq!(
            standard_deduction_2024(FilingStatus::HeadOfHousehold),
            dec!(21900)
        );
        assert_eq!(
            standard_deduction_2024(FilingStatus::MarriedFilingSeparately),
            dec!(14600)
        );
    }
}
