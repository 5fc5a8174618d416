use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, PRESENTATION_SCALE};
use crate::errors::{CalculatorError, Result};

/// one month of a repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentScheduleEntry {
    pub number: u32,
    pub date: NaiveDate,
    pub total_payment: Money,
    pub interest_payment: Money,
    pub debt_payment: Money,
    /// balance after this payment, never below zero
    pub remaining_debt: Money,
}

/// build a month-by-month annuity schedule starting the month after `start`
///
/// Interest and principal are rounded to cents every month. Whatever
/// rounding leaves on the balance is settled in the final entry, so the
/// schedule always closes at exactly zero.
pub fn build_schedule(
    amount: Money,
    monthly_rate: Decimal,
    monthly_payment: Money,
    term: u32,
    start: NaiveDate,
) -> Result<Vec<PaymentScheduleEntry>> {
    // the last due date bounds every other one
    if start.checked_add_months(Months::new(term)).is_none() {
        return Err(CalculatorError::calculation(format!(
            "payment date out of range for {} months",
            term
        )));
    }

    let mut entries = Vec::new();
    let mut remaining = amount;

    for number in 1..=term {
        let date = start
            .checked_add_months(Months::new(number))
            .ok_or_else(|| CalculatorError::calculation("payment date out of range"))?;

        let interest = remaining
            .checked_mul(monthly_rate)
            .ok_or_else(|| out_of_range("interest", number))?
            .round_dp(PRESENTATION_SCALE);
        let (debt, total) = if number == term {
            let debt = remaining.round_dp(PRESENTATION_SCALE);
            let total = interest
                .checked_add(debt)
                .ok_or_else(|| out_of_range("final payment", number))?;
            (debt, total)
        } else {
            let debt = monthly_payment
                .checked_sub(interest)
                .ok_or_else(|| out_of_range("principal", number))?
                .round_dp(PRESENTATION_SCALE);
            (debt, monthly_payment)
        };

        remaining = remaining
            .checked_sub(debt)
            .ok_or_else(|| out_of_range("remaining debt", number))?
            .round_dp(PRESENTATION_SCALE);

        entries.push(PaymentScheduleEntry {
            number,
            date,
            total_payment: total.presented(),
            interest_payment: interest.presented(),
            debt_payment: debt.presented(),
            remaining_debt: remaining.max(Money::ZERO).presented(),
        });
    }

    Ok(entries)
}

fn out_of_range(step: &str, number: u32) -> CalculatorError {
    CalculatorError::calculation(format!("{} out of range at payment {}", step, number))
}

/// interest paid over the whole schedule
pub fn total_interest(entries: &[PaymentScheduleEntry]) -> Money {
    entries.iter().map(|e| e.interest_payment).sum()
}

/// principal repaid over the whole schedule
pub fn total_principal(entries: &[PaymentScheduleEntry]) -> Money {
    entries.iter().map(|e| e.debt_payment).sum()
}
