use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{CalculatorError, Result};

/// calculator configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CalculatorConfig {
    pub pricing: PricingConfig,
    pub scoring: ScoringConfig,
}

/// base rate and the discounts every offer is priced from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub base_rate: Rate,
    pub insurance_discount: Rate,
    pub salary_client_discount: Rate,
    /// insurance premium as a percentage of principal, counted in the psk
    pub insurance_fee_percentage: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_rate: Rate::from_percentage(dec!(10.0)),
            insurance_discount: Rate::from_percentage(dec!(1.0)),
            salary_client_discount: Rate::from_percentage(dec!(0.5)),
            insurance_fee_percentage: dec!(1.0),
        }
    }
}

/// eligibility bounds and the risk adjustments applied by scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub offer_min_age: u32,
    pub min_age: u32,
    pub max_age: u32,
    /// salary times this many months must cover the amount
    pub affordability_months: u32,
    pub employment: EmploymentAdjustments,
    pub experience: ExperienceAdjustments,
    pub dependents_threshold: u32,
    pub many_dependents_delta: Rate,
    pub married_delta: Rate,
    pub non_married_delta: Rate,
    pub age_gender: AgeGenderRule,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            offer_min_age: 18,
            min_age: 20,
            max_age: 65,
            affordability_months: 24,
            employment: EmploymentAdjustments::default(),
            experience: ExperienceAdjustments::default(),
            dependents_threshold: 3,
            many_dependents_delta: Rate::from_percentage(dec!(0.5)),
            married_delta: Rate::from_percentage(dec!(-3.0)),
            non_married_delta: Rate::from_percentage(dec!(1.0)),
            age_gender: AgeGenderRule::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmploymentAdjustments {
    pub business_owner_delta: Rate,
    pub self_employed_delta: Rate,
}

impl Default for EmploymentAdjustments {
    fn default() -> Self {
        Self {
            business_owner_delta: Rate::from_percentage(dec!(1.0)),
            self_employed_delta: Rate::from_percentage(dec!(2.0)),
        }
    }
}

/// experience thresholds are in months
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceAdjustments {
    pub min_current_months: u32,
    pub short_current_delta: Rate,
    pub min_total_months: u32,
    pub short_total_delta: Rate,
}

impl Default for ExperienceAdjustments {
    fn default() -> Self {
        Self {
            min_current_months: 3,
            short_current_delta: Rate::from_percentage(dec!(1.0)),
            min_total_months: 18,
            short_total_delta: Rate::from_percentage(dec!(2.0)),
        }
    }
}

/// male below `male_below` or above `male_above`, female below `female_below`
/// or above `female_above`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgeGenderRule {
    pub male_below: u32,
    pub male_above: u32,
    pub female_below: u32,
    pub female_above: u32,
    pub delta: Rate,
}

impl Default for AgeGenderRule {
    fn default() -> Self {
        Self {
            male_below: 55,
            male_above: 30,
            female_below: 60,
            female_above: 32,
            delta: Rate::from_percentage(dec!(-3.0)),
        }
    }
}

impl CalculatorConfig {
    /// the standard retail pricing and scoring policy
    pub fn standard() -> Self {
        Self::default()
    }

    /// load from json; omitted sections keep their standard values
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CalculatorConfig =
            serde_json::from_str(json).map_err(|e| CalculatorError::InvalidConfiguration {
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let pricing = &self.pricing;
        if pricing.base_rate.as_percentage() < Decimal::ZERO {
            return Err(invalid("base rate must not be negative"));
        }
        if pricing.insurance_discount.as_percentage() < Decimal::ZERO
            || pricing.salary_client_discount.as_percentage() < Decimal::ZERO
        {
            return Err(invalid("discounts must not be negative"));
        }
        if pricing.insurance_fee_percentage < Decimal::ZERO {
            return Err(invalid("insurance fee must not be negative"));
        }

        let scoring = &self.scoring;
        if scoring.min_age > scoring.max_age {
            return Err(invalid(format!(
                "age band is inverted: {} > {}",
                scoring.min_age, scoring.max_age
            )));
        }
        if scoring.affordability_months == 0 {
            return Err(invalid("affordability months must be positive"));
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> CalculatorError {
    CalculatorError::InvalidConfiguration {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_policy() {
        let config = CalculatorConfig::standard();

        assert_eq!(config.pricing.base_rate, Rate::from_percentage(dec!(10.0)));
        assert_eq!(config.scoring.min_age, 20);
        assert_eq!(config.scoring.max_age, 65);
        assert_eq!(config.scoring.affordability_months, 24);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = CalculatorConfig::from_json(
            r#"{ "pricing": { "base_rate": "12.0" }, "scoring": { "max_age": 70 } }"#,
        )
        .unwrap();

        assert_eq!(config.pricing.base_rate, Rate::from_percentage(dec!(12.0)));
        assert_eq!(config.pricing.insurance_discount, Rate::from_percentage(dec!(1.0)));
        assert_eq!(config.scoring.max_age, 70);
        assert_eq!(config.scoring.min_age, 20);
    }

    #[test]
    fn test_inverted_age_band_rejected() {
        let err = CalculatorConfig::from_json(r#"{ "scoring": { "min_age": 70 } }"#).unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = CalculatorConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidConfiguration { .. }));
        assert_eq!(err.status_code(), 500);
    }
}
