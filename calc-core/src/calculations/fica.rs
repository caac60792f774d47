//! FICA payroll taxes (Social Security and Medicare), employee share.
//!
//! These are flat-rate contributions, not bracket walks:
//!
//! | Component           | Formula |
//! |---------------------|---------|
//! | Social Security     | `min(wages, wage_base) × 6.2%` |
//! | Medicare            | `wages × 1.45%` |
//! | Additional Medicare | `max(0, wages - threshold) × 0.9%`, threshold by filing status |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::CalcError;
use crate::calculations::common::{non_negative, require_non_negative, round_half_up};
use crate::models::FilingStatus;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FicaConfigError {
    #[error("social security rate must be between 0 and 1, got {0}")]
    InvalidSocialSecurityRate(Decimal),

    #[error("medicare rate must be between 0 and 1, got {0}")]
    InvalidMedicareRate(Decimal),

    #[error("additional medicare rate must be between 0 and 1, got {0}")]
    InvalidAdditionalMedicareRate(Decimal),

    #[error("social security wage base must be positive, got {0}")]
    InvalidWageBase(Decimal),

    #[error("additional medicare threshold must be non-negative, got {0}")]
    InvalidThreshold(Decimal),
}

/// Rates and limits for one tax year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaConfig {
    pub social_security_rate: Decimal,
    /// Wages above this are not subject to Social Security tax.
    pub social_security_wage_base: Decimal,
    pub medicare_rate: Decimal,
    pub additional_medicare_rate: Decimal,
    /// Additional Medicare threshold for single, head of household and
    /// surviving spouse filers.
    pub additional_medicare_threshold_single: Decimal,
    pub additional_medicare_threshold_joint: Decimal,
    pub additional_medicare_threshold_separate: Decimal,
}

impl FicaConfig {
    pub fn for_2024() -> Self {
        Self {
            social_security_rate: dec!(0.062),
            social_security_wage_base: dec!(168600),
            medicare_rate: dec!(0.0145),
            additional_medicare_rate: dec!(0.009),
            additional_medicare_threshold_single: dec!(200000),
            additional_medicare_threshold_joint: dec!(250000),
            additional_medicare_threshold_separate: dec!(125000),
        }
    }

    /// # Errors
    ///
    /// Returns [`FicaConfigError`] if any rate is outside `[0, 1]`, the wage
    /// base is not positive, or a threshold is negative.
    pub fn validate(&self) -> Result<(), FicaConfigError> {
        let unit = Decimal::ZERO..=Decimal::ONE;

        if !unit.contains(&self.social_security_rate) {
            return Err(FicaConfigError::InvalidSocialSecurityRate(
                self.social_security_rate,
            ));
        }
        if !unit.contains(&self.medicare_rate) {
            return Err(FicaConfigError::InvalidMedicareRate(self.medicare_rate));
        }
        if !unit.contains(&self.additional_medicare_rate) {
            return Err(FicaConfigError::InvalidAdditionalMedicareRate(
                self.additional_medicare_rate,
            ));
        }
        if self.social_security_wage_base <= Decimal::ZERO {
            return Err(FicaConfigError::InvalidWageBase(
                self.social_security_wage_base,
            ));
        }
        for threshold in [
            self.additional_medicare_threshold_single,
            self.additional_medicare_threshold_joint,
            self.additional_medicare_threshold_separate,
        ] {
            if threshold < Decimal::ZERO {
                return Err(FicaConfigError::InvalidThreshold(threshold));
            }
        }
        Ok(())
    }

    pub fn additional_medicare_threshold(
        &self,
        status: FilingStatus,
    ) -> Decimal {
        match status {
            FilingStatus::MarriedFilingJointly => self.additional_medicare_threshold_joint,
            FilingStatus::MarriedFilingSeparately => self.additional_medicare_threshold_separate,
            FilingStatus::Single
            | FilingStatus::HeadOfHousehold
            | FilingStatus::QualifyingSurvivingSpouse => {
                self.additional_medicare_threshold_single
            }
        }
    }
}

impl Default for FicaConfig {
    fn default() -> Self {
        Self::for_2024()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FicaResult {
    pub social_security: Decimal,
    pub medicare: Decimal,
    pub additional_medicare: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone)]
pub struct Fica {
    config: FicaConfig,
}

impl Fica {
    /// # Errors
    /// Returns [`CalcError::Fica`] when the configuration is invalid.
    pub fn new(config: FicaConfig) -> Result<Self, CalcError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FicaConfig {
        &self.config
    }

    /// # Errors
    /// * [`CalcError::NegativeAmount`] for negative wages.
    pub fn calculate(
        &self,
        wages: Decimal,
        status: FilingStatus,
    ) -> Result<FicaResult, CalcError> {
        let wages = require_non_negative("wages", wages)?;

        let social_security = round_half_up(
            wages.min(self.config.social_security_wage_base) * self.config.social_security_rate,
        );
        let medicare = round_half_up(wages * self.config.medicare_rate);
        let above_threshold =
            non_negative(wages - self.config.additional_medicare_threshold(status));
        let additional_medicare =
            round_half_up(above_threshold * self.config.additional_medicare_rate);

        Ok(FicaResult {
            social_security,
            medicare,
            additional_medicare,
            total: social_security + medicare + additional_medicare,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fica() -> Fica {
        Fica::new(FicaConfig::for_2024()).unwrap()
    }

    // =========================================================================
    // validate tests
    // =========================================================================

    #[test]
    fn default_config_is_valid() {
        assert_eq!(FicaConfig::default().validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let config = FicaConfig {
            medicare_rate: dec!(1.2),
            ..FicaConfig::for_2024()
        };

        assert_eq!(
            config.validate(),
            Err(FicaConfigError::InvalidMedicareRate(dec!(1.2)))
        );
    }

    #[test]
    fn validate_rejects_zero_wage_base() {
        let config = FicaConfig {
            social_security_wage_base: dec!(0),
            ..FicaConfig::for_2024()
        };

        assert_eq!(
            Fica::new(config).err(),
            Some(CalcError::Fica(FicaConfigError::InvalidWageBase(dec!(0))))
        );
    }

    #[test]
    fn validate_rejects_negative_threshold() {
        let config = FicaConfig {
            additional_medicare_threshold_joint: dec!(-1),
            ..FicaConfig::for_2024()
        };

        assert_eq!(
            config.validate(),
            Err(FicaConfigError::InvalidThreshold(dec!(-1)))
        );
    }

    // =========================================================================
    // calculate tests
    // =========================================================================

    #[test]
    fn wages_below_wage_base() {
        let result = fica().calculate(dec!(50000), FilingStatus::Single).unwrap();

        assert_eq!(
            result,
            FicaResult {
                social_security: dec!(3100.00),
                medicare: dec!(725.00),
                additional_medicare: dec!(0),
                total: dec!(3825.00),
            }
        );
    }

    #[test]
    fn social_security_is_capped_at_wage_base() {
        let result = fica().calculate(dec!(190000), FilingStatus::Single).unwrap();

        assert_eq!(result.social_security, dec!(10453.20));
        assert_eq!(result.medicare, dec!(2755.00));
        assert_eq!(result.additional_medicare, dec!(0));
    }

    #[test]
    fn additional_medicare_above_single_threshold() {
        let result = fica().calculate(dec!(300000), FilingStatus::Single).unwrap();

        assert_eq!(result.additional_medicare, dec!(900.00));
        assert_eq!(result.medicare, dec!(4350.00));
    }

    #[test]
    fn joint_filers_have_higher_threshold() {
        let result = fica()
            .calculate(dec!(300000), FilingStatus::MarriedFilingJointly)
            .unwrap();

        assert_eq!(result.additional_medicare, dec!(450.00));
    }

    #[test]
    fn negative_wages_are_rejected() {
        assert_eq!(
            fica().calculate(dec!(-10), FilingStatus::Single),
            Err(CalcError::NegativeAmount {
                field: "wages",
                value: dec!(-10),
            })
        );
    }
}
