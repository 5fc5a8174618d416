use chrono::{Datelike, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::config::ScoringConfig;
use crate::decimal::Money;
use crate::errors::{CalculatorError, Result};
use crate::requests::{LoanRequest, ScoringRequest};
use crate::types::EmploymentStatus;

const NAME_PATTERN: &str = r"^[A-Za-zА-Яа-яЁё\-]+$";
const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9_!#$%&'*+/=?`{|}~^.-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
const PASSPORT_SERIES_PATTERN: &str = r"^[0-9]{4}$";
const PASSPORT_NUMBER_PATTERN: &str = r"^[0-9]{6}$";

const NAME_MIN_LEN: usize = 2;
const NAME_MAX_LEN: usize = 30;

static NAME_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static PASSPORT_SERIES_RE: OnceLock<Regex> = OnceLock::new();
static PASSPORT_NUMBER_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> Result<&'static Regex> {
    if let Some(re) = cell.get() {
        return Ok(re);
    }
    let re = Regex::new(pattern).map_err(|e| CalculatorError::calculation(e.to_string()))?;
    Ok(cell.get_or_init(|| re))
}

/// validated core of a loan request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoanTerms {
    pub amount: Money,
    pub term: u32,
    pub age: u32,
}

/// validated core of a scoring request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringTerms {
    pub amount: Money,
    pub term: u32,
    pub age: u32,
    pub salary: Money,
}

/// whole years from `birthdate` to `today`, None if born in the future
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> Option<u32> {
    if birthdate > today {
        return None;
    }
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    u32::try_from(years).ok()
}

/// checks for offer generation, first violation wins
pub fn validate_loan_request(
    request: &LoanRequest,
    today: NaiveDate,
    config: &ScoringConfig,
) -> Result<LoanTerms> {
    let amount = validate_amount(request.amount)?;
    let term = validate_term(request.term)?;

    validate_name_length(request.first_name.as_deref(), "firstName", "First name")?;
    validate_name_length(request.last_name.as_deref(), "lastName", "Last name")?;
    let middle = validate_name_length(request.middle_name.as_deref(), "middleName", "Middle name")?;
    validate_name_charset(middle, "middleName", "Middle name")?;

    match request.email.as_deref() {
        Some(email) => validate_email(email)?,
        None => return Err(CalculatorError::validation("email", "Email is required")),
    }

    let age = validate_birthdate(request.birthdate, today)?;
    if age < config.offer_min_age {
        return Err(CalculatorError::validation(
            "birthdate",
            format!("User must be at least {} years old", config.offer_min_age),
        ));
    }

    validate_passport(
        request.passport_series.as_deref(),
        request.passport_number.as_deref(),
    )?;

    Ok(LoanTerms { amount, term, age })
}

/// checks for credit scoring, a superset of the offer checks
pub fn validate_scoring_request(
    request: &ScoringRequest,
    today: NaiveDate,
    config: &ScoringConfig,
) -> Result<ScoringTerms> {
    let amount = validate_amount(request.amount)?;
    let term = validate_term(request.term)?;

    for (value, field, label) in [
        (request.first_name.as_deref(), "firstName", "First name"),
        (request.last_name.as_deref(), "lastName", "Last name"),
        (request.middle_name.as_deref(), "middleName", "Middle name"),
    ] {
        let name = validate_name_length(value, field, label)?;
        validate_name_charset(name, field, label)?;
    }

    // optional on a scoring request, but must be well formed when given
    if let Some(email) = request.email.as_deref() {
        validate_email(email)?;
    }

    let age = validate_birthdate(request.birthdate, today)?;
    if age < config.min_age || age > config.max_age {
        return Err(CalculatorError::validation(
            "birthdate",
            format!(
                "Age must be between {} and {} years",
                config.min_age, config.max_age
            ),
        ));
    }

    validate_passport(
        request.passport_series.as_deref(),
        request.passport_number.as_deref(),
    )?;

    let employment = request.employment.as_ref().ok_or_else(|| {
        CalculatorError::validation("employment", "Employment information is required")
    })?;
    match employment.employment_status {
        None => {
            return Err(CalculatorError::validation(
                "employmentStatus",
                "Employment status is required",
            ))
        }
        Some(EmploymentStatus::Unemployed) => {
            return Err(CalculatorError::validation(
                "employmentStatus",
                "Employment status must not be UNEMPLOYED",
            ))
        }
        Some(_) => {}
    }

    let salary = employment
        .salary
        .ok_or_else(|| CalculatorError::validation("salary", "Salary must not be null"))?;
    if !salary.is_positive() {
        return Err(CalculatorError::validation("salary", "Salary must be positive"));
    }
    if !is_affordable(salary, amount, config.affordability_months) {
        return Err(CalculatorError::validation(
            "salary",
            "Salary too low for requested amount",
        ));
    }

    Ok(ScoringTerms {
        amount,
        term,
        age,
        salary,
    })
}

/// salary over `months` months covers the amount
pub fn is_affordable(salary: Money, amount: Money, months: u32) -> bool {
    match salary.checked_times(months) {
        Some(income) => income >= amount,
        // an income too large to represent certainly covers the amount
        None => true,
    }
}

fn validate_amount(amount: Option<Money>) -> Result<Money> {
    match amount {
        Some(amount) if amount.is_positive() => Ok(amount),
        _ => Err(CalculatorError::validation("amount", "Amount must be positive")),
    }
}

fn validate_term(term: Option<i32>) -> Result<u32> {
    match term {
        Some(term) if term > 0 => Ok(term as u32),
        _ => Err(CalculatorError::validation("term", "Term must be positive")),
    }
}

fn validate_name_length<'a>(
    value: Option<&'a str>,
    field: &'static str,
    label: &str,
) -> Result<&'a str> {
    match value {
        Some(name) if (NAME_MIN_LEN..=NAME_MAX_LEN).contains(&name.chars().count()) => Ok(name),
        _ => Err(CalculatorError::validation(
            field,
            format!(
                "{} must be between {} and {} characters",
                label, NAME_MIN_LEN, NAME_MAX_LEN
            ),
        )),
    }
}

fn validate_name_charset(name: &str, field: &'static str, label: &str) -> Result<()> {
    if compiled(&NAME_RE, NAME_PATTERN)?.is_match(name) {
        Ok(())
    } else {
        Err(CalculatorError::validation(
            field,
            format!("{} contains invalid characters", label),
        ))
    }
}

fn validate_email(email: &str) -> Result<()> {
    if compiled(&EMAIL_RE, EMAIL_PATTERN)?.is_match(email) {
        Ok(())
    } else {
        Err(CalculatorError::validation("email", "Invalid email format"))
    }
}

fn validate_birthdate(birthdate: Option<NaiveDate>, today: NaiveDate) -> Result<u32> {
    let birthdate = birthdate
        .ok_or_else(|| CalculatorError::validation("birthdate", "Birthdate is required"))?;
    age_on(birthdate, today).ok_or_else(|| {
        CalculatorError::validation("birthdate", "Birthdate must not be in the future")
    })
}

fn validate_passport(series: Option<&str>, number: Option<&str>) -> Result<()> {
    let series_re = compiled(&PASSPORT_SERIES_RE, PASSPORT_SERIES_PATTERN)?;
    if !series.is_some_and(|s| series_re.is_match(s)) {
        return Err(CalculatorError::validation(
            "passportSeries",
            "Passport series must be exactly 4 digits",
        ));
    }

    let number_re = compiled(&PASSPORT_NUMBER_RE, PASSPORT_NUMBER_PATTERN)?;
    if !number.is_some_and(|n| number_re.is_match(n)) {
        return Err(CalculatorError::validation(
            "passportNumber",
            "Passport number must be exactly 6 digits",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requests::EmploymentRecord;
    use crate::types::{Gender, MaritalStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn loan_request() -> LoanRequest {
        LoanRequest {
            amount: Some(Money::from_major(10_000)),
            term: Some(12),
            first_name: Some("Ivan".to_string()),
            last_name: Some("Ivanov".to_string()),
            middle_name: Some("Ivanovich".to_string()),
            email: Some("ivan@example.com".to_string()),
            birthdate: NaiveDate::from_ymd_opt(1990, 1, 1),
            passport_series: Some("1234".to_string()),
            passport_number: Some("123456".to_string()),
        }
    }

    fn scoring_request() -> ScoringRequest {
        ScoringRequest {
            amount: Some(Money::from_major(240_000)),
            term: Some(24),
            first_name: Some("Ivan".to_string()),
            last_name: Some("Petrov".to_string()),
            middle_name: Some("Ivanovich".to_string()),
            birthdate: NaiveDate::from_ymd_opt(1990, 1, 1),
            passport_series: Some("1234".to_string()),
            passport_number: Some("123456".to_string()),
            gender: Some(Gender::Male),
            marital_status: Some(MaritalStatus::Married),
            dependent_amount: Some(2),
            employment: Some(EmploymentRecord {
                employment_status: Some(EmploymentStatus::Employed),
                salary: Some(Money::from_major(30_000)),
                work_experience_current: Some(6),
                work_experience_total: Some(36),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn loan_field_error(request: &LoanRequest) -> Option<&'static str> {
        validate_loan_request(request, today(), &ScoringConfig::default())
            .err()
            .and_then(|e| e.field())
    }

    fn scoring_field_error(request: &ScoringRequest) -> Option<&'static str> {
        validate_scoring_request(request, today(), &ScoringConfig::default())
            .err()
            .and_then(|e| e.field())
    }

    #[test]
    fn test_age_in_whole_years() {
        let birth = NaiveDate::from_ymd_opt(2000, 6, 16).unwrap();
        assert_eq!(age_on(birth, today()), Some(24));

        let birth = NaiveDate::from_ymd_opt(2000, 6, 15).unwrap();
        assert_eq!(age_on(birth, today()), Some(25));

        let birth = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(age_on(birth, today()), None);
    }

    #[test]
    fn test_valid_loan_request() {
        let terms = validate_loan_request(&loan_request(), today(), &ScoringConfig::default()).unwrap();
        assert_eq!(terms.amount, Money::from_major(10_000));
        assert_eq!(terms.term, 12);
        assert_eq!(terms.age, 35);
    }

    #[test]
    fn test_loan_request_field_errors() {
        let mut request = loan_request();
        request.amount = Some(Money::ZERO);
        assert_eq!(loan_field_error(&request), Some("amount"));

        let mut request = loan_request();
        request.term = Some(0);
        assert_eq!(loan_field_error(&request), Some("term"));

        let mut request = loan_request();
        request.first_name = Some("I".to_string());
        assert_eq!(loan_field_error(&request), Some("firstName"));

        let mut request = loan_request();
        request.middle_name = None;
        assert_eq!(loan_field_error(&request), Some("middleName"));

        let mut request = loan_request();
        request.middle_name = Some("Ivan0vich".to_string());
        assert_eq!(loan_field_error(&request), Some("middleName"));

        let mut request = loan_request();
        request.email = Some("invalid_email".to_string());
        assert_eq!(loan_field_error(&request), Some("email"));

        let mut request = loan_request();
        request.birthdate = NaiveDate::from_ymd_opt(2008, 1, 1);
        assert_eq!(loan_field_error(&request), Some("birthdate"));

        let mut request = loan_request();
        request.passport_series = Some("abcd".to_string());
        assert_eq!(loan_field_error(&request), Some("passportSeries"));

        let mut request = loan_request();
        request.passport_number = Some("12AB56".to_string());
        assert_eq!(loan_field_error(&request), Some("passportNumber"));
    }

    #[test]
    fn test_offer_names_only_check_middle_charset() {
        let mut request = loan_request();
        request.first_name = Some("Iv@n".to_string());
        assert!(validate_loan_request(&request, today(), &ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_first_violation_wins() {
        let mut request = loan_request();
        request.email = Some("nope".to_string());
        request.passport_series = None;
        request.term = Some(-3);
        assert_eq!(loan_field_error(&request), Some("term"));
    }

    #[test]
    fn test_cyrillic_and_hyphenated_names() {
        let mut request = scoring_request();
        request.first_name = Some("Пётр".to_string());
        request.last_name = Some("Римский-Корсаков".to_string());
        request.middle_name = Some("Ёжикович".to_string());
        assert!(validate_scoring_request(&request, today(), &ScoringConfig::default()).is_ok());
    }

    #[test]
    fn test_name_length_counts_characters() {
        let mut request = scoring_request();
        // 30 cyrillic letters is 60 bytes but still a valid length
        request.last_name = Some("Я".repeat(30));
        assert!(validate_scoring_request(&request, today(), &ScoringConfig::default()).is_ok());

        request.last_name = Some("Я".repeat(31));
        assert_eq!(scoring_field_error(&request), Some("lastName"));
    }

    #[test]
    fn test_scoring_age_band() {
        let mut request = scoring_request();

        request.birthdate = NaiveDate::from_ymd_opt(2005, 6, 15);
        assert!(validate_scoring_request(&request, today(), &ScoringConfig::default()).is_ok());

        request.birthdate = NaiveDate::from_ymd_opt(1960, 6, 15);
        assert!(validate_scoring_request(&request, today(), &ScoringConfig::default()).is_ok());

        request.birthdate = NaiveDate::from_ymd_opt(2005, 6, 16);
        assert_eq!(scoring_field_error(&request), Some("birthdate"));

        request.birthdate = NaiveDate::from_ymd_opt(1959, 6, 15);
        assert_eq!(scoring_field_error(&request), Some("birthdate"));
    }

    #[test]
    fn test_scoring_employment_checks() {
        let mut request = scoring_request();
        request.employment = None;
        assert_eq!(scoring_field_error(&request), Some("employment"));

        let mut request = scoring_request();
        if let Some(employment) = request.employment.as_mut() {
            employment.employment_status = Some(EmploymentStatus::Unemployed);
        }
        assert_eq!(scoring_field_error(&request), Some("employmentStatus"));

        let mut request = scoring_request();
        if let Some(employment) = request.employment.as_mut() {
            employment.salary = None;
        }
        assert_eq!(scoring_field_error(&request), Some("salary"));

        let mut request = scoring_request();
        if let Some(employment) = request.employment.as_mut() {
            employment.salary = Some(Money::ZERO);
        }
        assert_eq!(scoring_field_error(&request), Some("salary"));
    }

    #[test]
    fn test_affordability_threshold() {
        let mut request = scoring_request();
        // 240 000 / 24 = 10 000 exactly
        if let Some(employment) = request.employment.as_mut() {
            employment.salary = Some(Money::from_major(10_000));
        }
        assert!(validate_scoring_request(&request, today(), &ScoringConfig::default()).is_ok());

        if let Some(employment) = request.employment.as_mut() {
            employment.salary = Some(Money::from_major(9_000));
        }
        assert_eq!(scoring_field_error(&request), Some("salary"));
    }

    #[test]
    fn test_scoring_email_optional_but_checked() {
        let mut request = scoring_request();
        request.email = None;
        assert!(validate_scoring_request(&request, today(), &ScoringConfig::default()).is_ok());

        request.email = Some("ivan@".to_string());
        assert_eq!(scoring_field_error(&request), Some("email"));
    }
}
