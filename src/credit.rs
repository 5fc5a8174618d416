use hourglass_rs::{SafeTimeProvider, TimeSource};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CalculatorConfig;
use crate::decimal::{round_half_up, with_scale, Money, Rate, CALCULATION_SCALE, PRESENTATION_SCALE};
use crate::errors::{CalculatorError, Result};
use crate::pricing::{base_rate, inverse_annuity_payment};
use crate::requests::ScoringRequest;
use crate::schedule::{build_schedule, PaymentScheduleEntry};
use crate::scoring::{assess, Eligibility};
use crate::validation::validate_scoring_request;

/// priced credit with its full repayment schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditResult {
    pub amount: Money,
    pub term: u32,
    pub monthly_payment: Money,
    pub rate: Rate,
    /// total cost of credit, percent over principal
    pub psk: Decimal,
    pub is_insurance_enabled: bool,
    pub is_salary_client: bool,
    pub payment_schedule: Vec<PaymentScheduleEntry>,
}

impl CreditResult {
    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

/// scores a full application and builds its schedule
#[derive(Debug, Clone, Default)]
pub struct CreditScorer {
    config: CalculatorConfig,
}

impl CreditScorer {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// validate and score without pricing
    pub fn eligibility(
        &self,
        request: &ScoringRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<Eligibility> {
        let today = time_provider.now().date_naive();
        let terms = validate_scoring_request(request, today, &self.config.scoring)?;
        Ok(assess(request, terms.age, terms.amount, &self.config.scoring))
    }

    /// validate, score and price the application
    ///
    /// Validation failures and scoring rejections both stop before any
    /// schedule is built.
    pub fn calculate(
        &self,
        request: &ScoringRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<CreditResult> {
        let today = time_provider.now().date_naive();
        let terms = validate_scoring_request(request, today, &self.config.scoring)?;
        let options = request.options();
        info!(amount = %terms.amount, term = terms.term, "scoring credit application");

        let delta = match assess(request, terms.age, terms.amount, &self.config.scoring) {
            Eligibility::Approved(delta) => delta,
            Eligibility::Rejected(reason) => {
                warn!(%reason, "credit application rejected");
                return Err(CalculatorError::rejected(reason));
            }
        };

        let rate = base_rate(&self.config.pricing, options) + delta.total();
        let monthly_rate = rate.monthly_rate();
        debug!(delta = %delta.total(), %rate, %monthly_rate, "scored rate");

        let monthly_payment = inverse_annuity_payment(terms.amount, monthly_rate, terms.term)?;
        debug!(%monthly_payment, "monthly payment");

        let payment_schedule = build_schedule(
            terms.amount,
            monthly_rate,
            monthly_payment,
            terms.term,
            today,
        )?;

        let psk = self.total_cost_percentage(
            terms.amount,
            monthly_payment,
            terms.term,
            options.is_insurance_enabled,
        )?;
        info!(%rate, %psk, "credit calculated");

        Ok(CreditResult {
            amount: terms.amount.presented(),
            term: terms.term,
            monthly_payment: monthly_payment.presented(),
            rate: rate.presented(),
            psk: with_scale(psk, PRESENTATION_SCALE),
            is_insurance_enabled: options.is_insurance_enabled,
            is_salary_client: options.is_salary_client,
            payment_schedule,
        })
    }

    /// same as [`calculate`](Self::calculate) against the system clock
    pub fn calculate_now(&self, request: &ScoringRequest) -> Result<CreditResult> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.calculate(request, &time)
    }

    /// (total paid / amount - 1) * 100, insurance premium included
    fn total_cost_percentage(
        &self,
        amount: Money,
        monthly_payment: Money,
        term: u32,
        insurance: bool,
    ) -> Result<Decimal> {
        let mut total_paid = monthly_payment
            .checked_times(term)
            .ok_or_else(|| CalculatorError::calculation("total paid out of range"))?;
        if insurance {
            total_paid = amount
                .checked_percentage(self.config.pricing.insurance_fee_percentage)
                .and_then(|fee| total_paid.checked_add(fee))
                .ok_or_else(|| CalculatorError::calculation("insured total out of range"))?;
        }

        let ratio = total_paid
            .as_decimal()
            .checked_div(amount.as_decimal())
            .map(|r| round_half_up(r, CALCULATION_SCALE))
            .ok_or_else(|| CalculatorError::calculation("psk ratio out of range"))?;

        (ratio - Decimal::ONE)
            .checked_mul(dec!(100))
            .ok_or_else(|| CalculatorError::calculation("psk out of range"))
    }
}
