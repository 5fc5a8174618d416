/// credit calculation - score an application and print its schedule
use chrono::{NaiveDate, TimeZone, Utc};
use loan_calculator::{
    CreditScorer, EmploymentRecord, EmploymentStatus, Gender, MaritalStatus, Money,
    SafeTimeProvider, ScoringRequest, TimeSource,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=loan_calculator=debug shows every pricing step
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("=== credit calculation example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2025, 6, 15, 0, 0, 0).unwrap(),
    ));

    let request = ScoringRequest {
        amount: Some(Money::from_major(500_000)),
        term: Some(12),
        first_name: Some("Ivan".to_string()),
        last_name: Some("Ivanov".to_string()),
        middle_name: Some("Ivanovich".to_string()),
        birthdate: NaiveDate::from_ymd_opt(1990, 1, 1),
        passport_series: Some("1234".to_string()),
        passport_number: Some("123456".to_string()),
        gender: Some(Gender::Male),
        marital_status: Some(MaritalStatus::Married),
        dependent_amount: Some(0),
        employment: Some(EmploymentRecord {
            employment_status: Some(EmploymentStatus::Employed),
            salary: Some(Money::from_major(150_000)),
            work_experience_total: Some(60),
            work_experience_current: Some(24),
            ..Default::default()
        }),
        is_insurance_enabled: Some(true),
        is_salary_client: Some(true),
        ..Default::default()
    };

    let scorer = CreditScorer::default();
    let result = scorer.calculate(&request, &time)?;

    println!("rate: {}", result.rate);
    println!("monthly payment: {}", result.monthly_payment);
    println!("psk: {}%", result.psk);

    println!("\nschedule:");
    for entry in &result.payment_schedule {
        println!(
            "{:>3} {} total {:>10} interest {:>9} debt {:>10} remaining {:>10}",
            entry.number,
            entry.date,
            entry.total_payment,
            entry.interest_payment,
            entry.debt_payment,
            entry.remaining_debt,
        );
    }

    println!("\nfull result:");
    println!("{}", result.json());

    Ok(())
}
