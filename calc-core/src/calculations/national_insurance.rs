//! Class 1 employee National Insurance.
//!
//! A dual-threshold formula rather than a bracket walk: the main rate applies
//! between the primary threshold and the upper earnings limit, the upper rate
//! above the limit, nothing below the threshold.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::CalcError;
use crate::calculations::common::{non_negative, require_non_negative, round_half_up};
use crate::schedules::uk;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NationalInsuranceConfigError {
    #[error("national insurance rate must be between 0 and 1, got {0}")]
    InvalidRate(Decimal),

    #[error("primary threshold {threshold} must be non-negative and below the upper earnings limit {limit}")]
    InvalidThresholds { threshold: Decimal, limit: Decimal },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalInsuranceConfig {
    pub primary_threshold: Decimal,
    pub upper_earnings_limit: Decimal,
    pub main_rate: Decimal,
    pub upper_rate: Decimal,
}

impl NationalInsuranceConfig {
    pub fn for_2024() -> Self {
        Self {
            primary_threshold: uk::NI_PRIMARY_THRESHOLD,
            upper_earnings_limit: uk::NI_UPPER_EARNINGS_LIMIT,
            main_rate: uk::NI_MAIN_RATE,
            upper_rate: uk::NI_UPPER_RATE,
        }
    }

    /// # Errors
    ///
    /// Returns [`NationalInsuranceConfigError`] if a rate is outside `[0, 1]`
    /// or the thresholds are negative or out of order.
    pub fn validate(&self) -> Result<(), NationalInsuranceConfigError> {
        for rate in [self.main_rate, self.upper_rate] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(NationalInsuranceConfigError::InvalidRate(rate));
            }
        }
        if self.primary_threshold < Decimal::ZERO
            || self.primary_threshold >= self.upper_earnings_limit
        {
            return Err(NationalInsuranceConfigError::InvalidThresholds {
                threshold: self.primary_threshold,
                limit: self.upper_earnings_limit,
            });
        }
        Ok(())
    }
}

impl Default for NationalInsuranceConfig {
    fn default() -> Self {
        Self::for_2024()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NationalInsuranceResult {
    /// Contributions between the primary threshold and the upper limit.
    pub main_band: Decimal,
    /// Contributions above the upper limit.
    pub upper_band: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Clone)]
pub struct NationalInsurance {
    config: NationalInsuranceConfig,
}

impl NationalInsurance {
    /// # Errors
    /// Returns [`CalcError::NationalInsurance`] when `config` is invalid.
    pub fn new(config: NationalInsuranceConfig) -> Result<Self, CalcError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// # Errors
    /// * [`CalcError::NegativeAmount`] for negative earnings.
    pub fn calculate(
        &self,
        earnings: Decimal,
    ) -> Result<NationalInsuranceResult, CalcError> {
        let earnings = require_non_negative("earnings", earnings)?;
        let c = &self.config;

        let main_earnings =
            non_negative(earnings.min(c.upper_earnings_limit) - c.primary_threshold);
        let upper_earnings = non_negative(earnings - c.upper_earnings_limit);

        let main_band = round_half_up(main_earnings * c.main_rate);
        let upper_band = round_half_up(upper_earnings * c.upper_rate);

        Ok(NationalInsuranceResult {
            main_band,
            upper_band,
            total: main_band + upper_band,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn ni() -> NationalInsurance {
        NationalInsurance::new(NationalInsuranceConfig::for_2024()).unwrap()
    }

    #[test]
    fn nothing_below_primary_threshold() {
        let result = ni().calculate(dec!(10000)).unwrap();

        assert_eq!(result.total, dec!(0));
    }

    #[test]
    fn main_rate_only() {
        let result = ni().calculate(dec!(30000)).unwrap();

        assert_eq!(result.main_band, dec!(1394.40));
        assert_eq!(result.upper_band, dec!(0));
        assert_eq!(result.total, dec!(1394.40));
    }

    #[test]
    fn main_and_upper_rates() {
        let result = ni().calculate(dec!(60000)).unwrap();

        assert_eq!(
            result,
            NationalInsuranceResult {
                main_band: dec!(3016.00),
                upper_band: dec!(194.60),
                total: dec!(3210.60),
            }
        );
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let config = NationalInsuranceConfig {
            primary_threshold: dec!(60000),
            ..NationalInsuranceConfig::for_2024()
        };

        assert_eq!(
            config.validate(),
            Err(NationalInsuranceConfigError::InvalidThresholds {
                threshold: dec!(60000),
                limit: dec!(50270),
            })
        );
    }

    #[test]
    fn validate_rejects_bad_rate() {
        let config = NationalInsuranceConfig {
            upper_rate: dec!(2),
            ..NationalInsuranceConfig::for_2024()
        };

        assert!(matches!(
            NationalInsurance::new(config),
            Err(CalcError::NationalInsurance(
                NationalInsuranceConfigError::InvalidRate(_)
            ))
        ));
    }
}
