/// quick start - price the four offers for a preliminary request
use chrono::NaiveDate;
use loan_calculator::{LoanRequest, Money, OfferGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let request = LoanRequest {
        amount: Some(Money::from_major(10_000)),
        term: Some(12),
        first_name: Some("Ivan".to_string()),
        last_name: Some("Ivanov".to_string()),
        middle_name: Some("Ivanovich".to_string()),
        email: Some("ivan@example.com".to_string()),
        birthdate: NaiveDate::from_ymd_opt(1990, 1, 1),
        passport_series: Some("1234".to_string()),
        passport_number: Some("123456".to_string()),
    };

    // cheapest rate first
    for offer in OfferGenerator::default().offers_now(&request)? {
        println!("{}", offer.json());
    }

    Ok(())
}
