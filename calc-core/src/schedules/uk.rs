//! UK income tax bands and National Insurance thresholds, tax year 2024/25.
//!
//! Bands apply to taxable income, i.e. income after the personal allowance.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{BracketSet, UkRegion};

pub const TAX_YEAR: &str = "2024/25";

pub const PERSONAL_ALLOWANCE: Decimal = dec!(12570);

/// Adjusted net income above which the personal allowance is withdrawn.
pub const ALLOWANCE_TAPER_THRESHOLD: Decimal = dec!(100000);

/// Class 1 employee NI: 8% between the primary threshold and the upper
/// earnings limit, 2% above.
pub const NI_PRIMARY_THRESHOLD: Decimal = dec!(12570);
pub const NI_UPPER_EARNINGS_LIMIT: Decimal = dec!(50270);
pub const NI_MAIN_RATE: Decimal = dec!(0.08);
pub const NI_UPPER_RATE: Decimal = dec!(0.02);

// basic, higher, additional
const REST_OF_UK: &[(Decimal, Decimal)] = &[
    (dec!(0), dec!(0.20)),
    (dec!(37700), dec!(0.40)),
    (dec!(125140), dec!(0.45)),
];

// starter, basic, intermediate, higher, advanced, top
const SCOTLAND: &[(Decimal, Decimal)] = &[
    (dec!(0), dec!(0.19)),
    (dec!(2306), dec!(0.20)),
    (dec!(13991), dec!(0.21)),
    (dec!(31092), dec!(0.42)),
    (dec!(62430), dec!(0.45)),
    (dec!(125140), dec!(0.48)),
];

pub fn income_tax_bands_2024(region: UkRegion) -> BracketSet {
    match region {
        UkRegion::RestOfUk => BracketSet::from_static_thresholds(REST_OF_UK),
        UkRegion::Scotland => BracketSet::from_static_thresholds(SCOTLAND),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn both_regions_are_valid() {
        for region in [UkRegion::RestOfUk, UkRegion::Scotland] {
            let set = income_tax_bands_2024(region);

            assert_eq!(
                BracketSet::new(set.brackets().to_vec()).as_ref(),
                Ok(&set),
                "{region:?}"
            );
        }
    }

    #[test]
    fn scotland_has_six_bands() {
        let set = income_tax_bands_2024(UkRegion::Scotland);

        assert_eq!(set.len(), 6);
        assert_eq!(set.max_rate(), dec!(0.48));
    }

    #[test]
    fn rest_of_uk_has_three_bands() {
        let set = income_tax_bands_2024(UkRegion::RestOfUk);

        assert_eq!(set.len(), 3);
        assert_eq!(set.max_rate(), dec!(0.45));
    }
}
