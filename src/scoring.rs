//! Eligibility and risk scoring.
//!
//! Scoring runs after validation and either approves the application with a
//! rate delta or rejects it. It re-checks age, employment and affordability on
//! its own so it can be called on requests that did not pass through
//! [`validate_scoring_request`](crate::validation::validate_scoring_request).

use serde::{Deserialize, Serialize};

use crate::config::ScoringConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, RejectionReason, Result};
use crate::requests::ScoringRequest;
use crate::types::{EmploymentStatus, Gender, MaritalStatus};
use crate::validation::is_affordable;

/// applicant trait that moved the rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScoringFactor {
    BusinessOwner,
    SelfEmployed,
    ShortCurrentExperience,
    ShortTotalExperience,
    ManyDependents,
    Married,
    NonMarried,
    AgeGender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Adjustment {
    pub factor: ScoringFactor,
    pub delta: Rate,
}

/// sum of every adjustment applied to an approved application
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoringDelta {
    adjustments: Vec<Adjustment>,
}

impl ScoringDelta {
    fn apply(&mut self, factor: ScoringFactor, delta: Rate) {
        self.adjustments.push(Adjustment { factor, delta });
    }

    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }

    pub fn total(&self) -> Rate {
        self.adjustments.iter().map(|a| a.delta).sum()
    }

    pub fn contains(&self, factor: ScoringFactor) -> bool {
        self.adjustments.iter().any(|a| a.factor == factor)
    }
}

/// outcome of the scoring phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Eligibility {
    Approved(ScoringDelta),
    Rejected(RejectionReason),
}

impl Eligibility {
    pub fn is_approved(&self) -> bool {
        matches!(self, Eligibility::Approved(_))
    }

    pub fn into_result(self) -> Result<ScoringDelta> {
        match self {
            Eligibility::Approved(delta) => Ok(delta),
            Eligibility::Rejected(reason) => Err(CalculatorError::rejected(reason)),
        }
    }
}

/// score an application for an applicant of `age` borrowing `amount`
pub fn assess(
    request: &ScoringRequest,
    age: u32,
    amount: Money,
    config: &ScoringConfig,
) -> Eligibility {
    if age < config.min_age || age > config.max_age {
        return Eligibility::Rejected(RejectionReason::AgeOutOfRange {
            age,
            min: config.min_age,
            max: config.max_age,
        });
    }

    let Some(employment) = request.employment.as_ref() else {
        return Eligibility::Rejected(RejectionReason::MissingEmployment);
    };

    let mut delta = ScoringDelta::default();

    match employment.employment_status {
        Some(EmploymentStatus::Unemployed) => {
            return Eligibility::Rejected(RejectionReason::Unemployed);
        }
        Some(EmploymentStatus::BusinessOwner) => {
            delta.apply(ScoringFactor::BusinessOwner, config.employment.business_owner_delta);
        }
        Some(EmploymentStatus::SelfEmployed) => {
            delta.apply(ScoringFactor::SelfEmployed, config.employment.self_employed_delta);
        }
        Some(EmploymentStatus::Employed) | None => {}
    }

    if let Some(salary) = employment.salary {
        if !is_affordable(salary, amount, config.affordability_months) {
            return Eligibility::Rejected(RejectionReason::InsufficientIncome {
                salary,
                required: amount
                    .checked_split(config.affordability_months)
                    .unwrap_or(amount),
            });
        }
    }

    let experience = &config.experience;
    if employment
        .work_experience_current
        .is_some_and(|months| months < experience.min_current_months)
    {
        delta.apply(ScoringFactor::ShortCurrentExperience, experience.short_current_delta);
    }
    if employment
        .work_experience_total
        .is_some_and(|months| months < experience.min_total_months)
    {
        delta.apply(ScoringFactor::ShortTotalExperience, experience.short_total_delta);
    }

    if request
        .dependent_amount
        .is_some_and(|count| count > config.dependents_threshold)
    {
        delta.apply(ScoringFactor::ManyDependents, config.many_dependents_delta);
    }

    match request.marital_status {
        Some(MaritalStatus::Married) => delta.apply(ScoringFactor::Married, config.married_delta),
        Some(MaritalStatus::NonMarried) => {
            delta.apply(ScoringFactor::NonMarried, config.non_married_delta)
        }
        Some(MaritalStatus::Divorced) | Some(MaritalStatus::Widowed) | None => {}
    }

    if age_gender_rule_applies(request.gender, age, config) {
        delta.apply(ScoringFactor::AgeGender, config.age_gender.delta);
    }

    Eligibility::Approved(delta)
}

// The clauses overlap: every male over 30 or under 55 matches, so in
// practice any man or woman in the scoring age band gets the discount.
// Kept as written; see DESIGN.md.
fn age_gender_rule_applies(gender: Option<Gender>, age: u32, config: &ScoringConfig) -> bool {
    let rule = &config.age_gender;
    let male = gender == Some(Gender::Male);
    let female = gender == Some(Gender::Female);

    (male && age < rule.male_below)
        || (female && age < rule.female_below)
        || (male && age > rule.male_above)
        || (female && age > rule.female_above)
}
