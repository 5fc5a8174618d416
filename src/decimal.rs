use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};
use std::str::FromStr;

/// decimal places kept during intermediate computation
pub const CALCULATION_SCALE: u32 = 10;

/// decimal places used for every monetary value handed back to callers
pub const PRESENTATION_SCALE: u32 = 2;

/// round half away from zero (the HALF_UP of commercial arithmetic)
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// round half up and pad to exactly `dp` places, so 2.5 prints as 2.50
pub fn with_scale(value: Decimal, dp: u32) -> Decimal {
    let mut scaled = round_half_up(value, dp);
    scaled.rescale(dp);
    scaled
}

/// Money type with 10 decimal places of working precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(round_half_up(d, CALCULATION_SCALE))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money::from_decimal(Decimal::from_str(s)?))
    }

    /// create from integer amount (roubles, dollars, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places, half up
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(round_half_up(self.0, dp))
    }

    /// value as presented to callers (exactly 2 dp)
    pub fn presented(&self) -> Self {
        Money(with_scale(self.0, PRESENTATION_SCALE))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly greater than zero
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// calculate percentage (e.g., 1% of 500 000), None on overflow
    pub fn checked_percentage(&self, pct: Decimal) -> Option<Self> {
        self.0
            .checked_mul(pct)
            .and_then(|v| v.checked_div(dec!(100)))
            .map(Money::from_decimal)
    }

    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money::from_decimal)
    }

    pub fn checked_sub(&self, other: Money) -> Option<Self> {
        self.0.checked_sub(other.0).map(Money::from_decimal)
    }

    /// scale by a decimal factor such as a monthly rate, None on overflow
    pub fn checked_mul(&self, factor: Decimal) -> Option<Self> {
        self.0.checked_mul(factor).map(Money::from_decimal)
    }

    /// multiply by an integer count, None on overflow
    pub fn checked_times(&self, count: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(count)).map(Money::from_decimal)
    }

    /// divide by an integer count, None when count is zero
    pub fn checked_split(&self, count: u32) -> Option<Self> {
        self.0.checked_div(Decimal::from(count)).map(Money::from_decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::from_decimal(self.0 + other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, x| acc + x)
    }
}

/// annual interest rate in percentage points (10.0 means 10% a year)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from percentage points (e.g., 9.5 for 9.5%)
    pub fn from_percentage(p: Decimal) -> Self {
        Rate(p)
    }

    /// get as percentage points
    pub fn as_percentage(&self) -> Decimal {
        self.0
    }

    /// monthly rate as a fraction: annual / 1200, 10 dp half up
    pub fn monthly_rate(&self) -> Decimal {
        round_half_up(self.0 / dec!(1200), CALCULATION_SCALE)
    }

    pub fn presented(&self) -> Self {
        Rate(with_scale(self.0, PRESENTATION_SCALE))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Add for Rate {
    type Output = Rate;

    fn add(self, other: Rate) -> Rate {
        Rate(self.0 + other.0)
    }
}

impl Sub for Rate {
    type Output = Rate;

    fn sub(self, other: Rate) -> Rate {
        Rate(self.0 - other.0)
    }
}

impl Sum for Rate {
    fn sum<I: Iterator<Item = Rate>>(iter: I) -> Rate {
        iter.fold(Rate::ZERO, |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.12345678955").unwrap();
        assert_eq!(m.to_string(), "100.1234567896");
    }

    #[test]
    fn test_half_up_presentation() {
        assert_eq!(Money::from_str_exact("10.005").unwrap().presented().to_string(), "10.01");
        assert_eq!(Money::from_str_exact("10.015").unwrap().presented().to_string(), "10.02");
        assert_eq!(Money::from_str_exact("-10.005").unwrap().presented().to_string(), "-10.01");
        assert_eq!(Money::from_major(500_000).presented().to_string(), "500000.00");
    }

    #[test]
    fn test_monthly_rate() {
        let rate = Rate::from_percentage(dec!(10.0));
        assert_eq!(rate.monthly_rate(), dec!(0.0083333333));

        let rate = Rate::from_percentage(dec!(2.5));
        assert_eq!(rate.monthly_rate(), dec!(0.0020833333));

        assert!(Rate::ZERO.monthly_rate().is_zero());
    }

    #[test]
    fn test_rate_arithmetic() {
        let rate = Rate::from_percentage(dec!(10.0))
            - Rate::from_percentage(dec!(1.0))
            - Rate::from_percentage(dec!(0.5));
        assert_eq!(rate, Rate::from_percentage(dec!(8.5)));
        assert_eq!(rate.presented().to_string(), "8.50%");
    }

    #[test]
    fn test_insurance_fee_percentage() {
        let principal = Money::from_major(500_000);
        assert_eq!(
            principal.checked_percentage(dec!(1.0)),
            Some(Money::from_major(5_000))
        );
    }

    #[test]
    fn test_checked_arithmetic_near_max() {
        let near_max = Money::from_decimal(Decimal::MAX);

        assert!(near_max.checked_add(Money::from_major(1)).is_none());
        assert!(near_max.checked_mul(dec!(2)).is_none());
        assert!(near_max.checked_percentage(dec!(200)).is_none());
        assert_eq!(
            Money::from_major(10).checked_sub(Money::from_major(4)),
            Some(Money::from_major(6))
        );
    }

    #[test]
    fn test_checked_split_by_zero() {
        assert!(Money::from_major(100).checked_split(0).is_none());
        assert_eq!(
            Money::from_major(100).checked_split(4),
            Some(Money::from_major(25))
        );
    }
}
