use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{EmploymentStatus, Gender, MaritalStatus, OfferOptions, Position};

/// preliminary loan request, input to offer generation
///
/// Fields are optional so a transport can hand over whatever it parsed;
/// presence and shape are checked by validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    pub amount: Option<Money>,
    pub term: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub email: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub passport_series: Option<String>,
    pub passport_number: Option<String>,
}

/// full application, input to credit scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoringRequest {
    pub amount: Option<Money>,
    pub term: Option<i32>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub middle_name: Option<String>,
    pub email: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub passport_series: Option<String>,
    pub passport_number: Option<String>,
    pub gender: Option<Gender>,
    pub marital_status: Option<MaritalStatus>,
    pub dependent_amount: Option<u32>,
    pub employment: Option<EmploymentRecord>,
    pub account_number: Option<String>,
    pub is_insurance_enabled: Option<bool>,
    pub is_salary_client: Option<bool>,
}

impl ScoringRequest {
    /// the pre-selected pricing options; absent flags count as off
    pub fn options(&self) -> OfferOptions {
        OfferOptions::new(
            self.is_insurance_enabled.unwrap_or(false),
            self.is_salary_client.unwrap_or(false),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentRecord {
    pub employment_status: Option<EmploymentStatus>,
    #[serde(rename = "employerINN")]
    pub employer_inn: Option<String>,
    pub salary: Option<Money>,
    pub position: Option<Position>,
    /// months
    pub work_experience_total: Option<u32>,
    /// months
    pub work_experience_current: Option<u32>,
}
