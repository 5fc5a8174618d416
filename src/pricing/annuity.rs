use rust_decimal::Decimal;

use crate::decimal::{round_half_up, Money, CALCULATION_SCALE};
use crate::errors::{CalculatorError, Result};

/// (1 + r)^n by repeated multiplication
pub fn compound_factor(monthly_rate: Decimal, months: u32) -> Result<Decimal> {
    let base = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..months {
        compound = compound
            .checked_mul(base)
            .ok_or_else(|| overflow("compound factor", months))?;
    }
    Ok(compound)
}

/// fixed monthly payment, P * r * (1 + r)^n / ((1 + r)^n - 1)
///
/// Falls back to straight-line P / n when the monthly rate is exactly zero.
pub fn annuity_payment(principal: Money, monthly_rate: Decimal, months: u32) -> Result<Money> {
    if months == 0 {
        return Err(CalculatorError::calculation("annuity over zero months"));
    }
    if monthly_rate.is_zero() {
        return straight_line(principal, months);
    }

    let compound = compound_factor(monthly_rate, months)?;
    let numerator = principal
        .as_decimal()
        .checked_mul(monthly_rate)
        .and_then(|v| v.checked_mul(compound))
        .ok_or_else(|| overflow("annuity numerator", months))?;
    let denominator = compound - Decimal::ONE;

    numerator
        .checked_div(denominator)
        .map(Money::from_decimal)
        .ok_or_else(|| overflow("annuity denominator", months))
}

/// the same payment written as P * r / (1 - (1 + r)^-n)
///
/// The discount factor (1 + r)^-n is held at working precision before
/// the division, which can shift the result in the last decimal places
/// relative to [`annuity_payment`].
pub fn inverse_annuity_payment(
    principal: Money,
    monthly_rate: Decimal,
    months: u32,
) -> Result<Money> {
    if months == 0 {
        return Err(CalculatorError::calculation("annuity over zero months"));
    }
    if monthly_rate.is_zero() {
        return straight_line(principal, months);
    }

    let compound = compound_factor(monthly_rate, months)?;
    let discount = Decimal::ONE
        .checked_div(compound)
        .map(|d| round_half_up(d, CALCULATION_SCALE))
        .ok_or_else(|| overflow("discount factor", months))?;
    let numerator = principal
        .as_decimal()
        .checked_mul(monthly_rate)
        .ok_or_else(|| overflow("annuity numerator", months))?;

    numerator
        .checked_div(Decimal::ONE - discount)
        .map(Money::from_decimal)
        .ok_or_else(|| overflow("annuity denominator", months))
}

fn straight_line(principal: Money, months: u32) -> Result<Money> {
    principal
        .checked_split(months)
        .ok_or_else(|| CalculatorError::calculation("annuity over zero months"))
}

fn overflow(step: &str, months: u32) -> CalculatorError {
    CalculatorError::calculation(format!("{} out of range for {} months", step, months))
}
