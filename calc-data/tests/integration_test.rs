//! Integration tests that load schedules from an on-disk fixture and run the
//! calculators against the resulting catalog.

use std::fs::File;
use std::path::PathBuf;

use calc_core::calculations::{FederalIncomeTax, FederalTaxInput, StateIncomeTax};
use calc_core::{BracketCatalog, FilingStatus, ScheduleKey, compute_progressive_tax};
use calc_data::{BracketScheduleLoader, default_state_catalog};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("custom_schedules.csv")
}

fn catalog_with_fixture() -> BracketCatalog {
    let mut catalog = default_state_catalog().expect("bundled schedules load");
    let file = File::open(fixture_path()).expect("fixture exists");
    BracketScheduleLoader::load_from_reader(&mut catalog, file).expect("fixture loads");
    catalog
}

#[test]
fn test_fixture_loads_three_schedules() {
    let file = File::open(fixture_path()).unwrap();
    let mut catalog = BracketCatalog::new();

    let loaded = BracketScheduleLoader::load_from_reader(&mut catalog, file).unwrap();

    assert_eq!(loaded, 3);
}

#[test]
fn test_fixture_overrides_bundled_state() {
    let catalog = catalog_with_fixture();

    let result = StateIncomeTax::new(&catalog)
        .calculate("CO", dec!(100000), dec!(0))
        .unwrap();

    assert_eq!(result.tax.total_tax, dec!(4400.00));
}

#[test]
fn test_fixture_iowa_progressive_schedule() {
    let catalog = catalog_with_fixture();

    let result = StateIncomeTax::new(&catalog)
        .calculate("IA", dec!(40000), dec!(0))
        .unwrap();

    // 273.24 + 1197.288 + 510.15
    assert_eq!(result.tax.total_tax, dec!(1980.678));
    assert_eq!(result.tax.rounded_total_tax(), dec!(1980.68));
    assert_eq!(result.tax.marginal_rate, dec!(0.057));
}

#[test]
fn test_fixture_swaps_federal_year() {
    let catalog = catalog_with_fixture();
    let calc = FederalIncomeTax::from_catalog(&catalog, FilingStatus::Single)
        .unwrap()
        .with_standard_deduction(dec!(15000));

    let result = calc
        .calculate(&FederalTaxInput {
            gross_income: dec!(114600),
            itemized_deduction: dec!(0),
        })
        .unwrap();

    // 2025 brackets and deduction on 99600 taxable: 1192.50 + 4386 + 11247.50
    assert_eq!(result.deduction, dec!(15000));
    assert_eq!(result.taxable_income(), dec!(99600));
    assert_eq!(result.tax.total_tax, dec!(16826.00));
}

#[test]
fn test_bundled_california_top_rate() {
    let catalog = default_state_catalog().unwrap();
    let brackets = catalog.get(&ScheduleKey::us_state("CA")).unwrap();

    let result = compute_progressive_tax(dec!(2000000), brackets);

    assert_eq!(result.marginal_rate, dec!(0.133));
    assert_eq!(result.per_bracket_amounts.len(), 10);
}

#[test]
fn test_bundled_no_income_tax_states() {
    let catalog = default_state_catalog().unwrap();
    let state_tax = StateIncomeTax::new(&catalog);

    for state in ["AK", "FL", "NV", "NH", "SD", "TN", "TX", "WA", "WY"] {
        let result = state_tax.calculate(state, dec!(85000), dec!(0)).unwrap();
        assert_eq!(result.tax.total_tax, dec!(0), "{state}");
    }
}

#[test]
fn test_bundled_massachusetts_surtax() {
    let catalog = default_state_catalog().unwrap();

    let result = StateIncomeTax::new(&catalog)
        .calculate("MA", dec!(2053750), dec!(0))
        .unwrap();

    // 5% on 1053750 plus 9% on the next 1000000
    assert_eq!(result.tax.total_tax, dec!(142687.50));
}

#[test]
fn test_bundled_virginia_brackets() {
    let catalog = default_state_catalog().unwrap();

    let result = StateIncomeTax::new(&catalog)
        .calculate("va", dec!(60000), dec!(0))
        .unwrap();

    // 60 + 60 + 600 + 5.75% of 43000
    assert_eq!(result.state, "VA");
    assert_eq!(result.tax.total_tax, dec!(3192.50));
    assert_eq!(result.tax.marginal_rate, dec!(0.0575));
}
