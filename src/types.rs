use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// identifier shared by all offers produced for one request
pub type StatementId = Uuid;

/// applicant employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    Employed,
    Unemployed,
    BusinessOwner,
    SelfEmployed,
}

/// applicant gender as recorded on the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

/// marital status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaritalStatus {
    Married,
    NonMarried,
    Divorced,
    Widowed,
}

/// job position held at the current employer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Position {
    Worker,
    MiddleManager,
    TopManager,
    Owner,
}

/// one of the four pricing combinations an offer is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferOptions {
    pub is_insurance_enabled: bool,
    pub is_salary_client: bool,
}

impl OfferOptions {
    pub fn new(is_insurance_enabled: bool, is_salary_client: bool) -> Self {
        Self {
            is_insurance_enabled,
            is_salary_client,
        }
    }

    /// every combination, insurance first then salary, both enabled leading
    pub fn all() -> [OfferOptions; 4] {
        [
            OfferOptions::new(true, true),
            OfferOptions::new(true, false),
            OfferOptions::new(false, true),
            OfferOptions::new(false, false),
        ]
    }
}
