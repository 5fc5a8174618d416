/// config and errors - load rules from json and map failures to responses
use chrono::NaiveDate;
use loan_calculator::{
    CalculatorConfig, CreditScorer, EmploymentRecord, EmploymentStatus, ErrorResponse,
    LoanRequest, Money, OfferGenerator, ScoringRequest,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== config and errors example ===\n");

    // anything left out keeps its default
    let config = CalculatorConfig::from_json(
        r#"{
            "pricing": { "base_rate": "12.0" },
            "scoring": { "max_age": 60 }
        }"#,
    )?;
    println!("base rate: {}", config.pricing.base_rate);
    println!("age band: {}..={}", config.scoring.min_age, config.scoring.max_age);

    // broken config is an internal fault, never shown to the caller verbatim
    if let Err(err) = CalculatorConfig::from_json(r#"{ "scoring": { "min_age": 70 } }"#) {
        println!("\nbad config: {}", err);
        print_response(&ErrorResponse::from(&err));
    }

    // bad email fails validation before anything is priced
    let request = LoanRequest {
        amount: Some(Money::from_major(10_000)),
        term: Some(12),
        first_name: Some("Ivan".to_string()),
        last_name: Some("Ivanov".to_string()),
        middle_name: Some("Ivanovich".to_string()),
        email: Some("not-an-email".to_string()),
        birthdate: NaiveDate::from_ymd_opt(1990, 1, 1),
        passport_series: Some("1234".to_string()),
        passport_number: Some("123456".to_string()),
        ..Default::default()
    };
    if let Err(err) = OfferGenerator::new(config.clone()).offers_now(&request) {
        println!("\ninvalid request on field {:?}", err.field());
        print_response(&ErrorResponse::from(&err));
    }

    // unemployed applicants fail validation before scoring runs
    let application = ScoringRequest {
        amount: Some(Money::from_major(100_000)),
        term: Some(12),
        first_name: Some("Ivan".to_string()),
        last_name: Some("Ivanov".to_string()),
        middle_name: Some("Ivanovich".to_string()),
        birthdate: NaiveDate::from_ymd_opt(1990, 1, 1),
        passport_series: Some("1234".to_string()),
        passport_number: Some("123456".to_string()),
        employment: Some(EmploymentRecord {
            employment_status: Some(EmploymentStatus::Unemployed),
            salary: Some(Money::from_major(50_000)),
            ..Default::default()
        }),
        ..Default::default()
    };
    if let Err(err) = CreditScorer::new(config).calculate_now(&application) {
        println!("\nunemployed applicant on field {:?}", err.field());
        print_response(&ErrorResponse::from(&err));
    }

    Ok(())
}

fn print_response(response: &ErrorResponse) {
    println!(
        "{}",
        serde_json::to_string_pretty(response).unwrap_or_else(|e| format!("JSON error: {}", e))
    );
}
