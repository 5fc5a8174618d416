use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::config::CalculatorConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{CalculatorError, Result};
use crate::pricing::{annuity_payment, base_rate};
use crate::requests::LoanRequest;
use crate::types::{OfferOptions, StatementId};
use crate::validation::validate_loan_request;

/// one priced offer; four of these are produced per request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanOffer {
    pub statement_id: StatementId,
    pub requested_amount: Money,
    pub total_amount: Money,
    pub term: u32,
    pub monthly_payment: Money,
    pub rate: Rate,
    pub is_insurance_enabled: bool,
    pub is_salary_client: bool,
}

impl LoanOffer {
    pub fn options(&self) -> OfferOptions {
        OfferOptions::new(self.is_insurance_enabled, self.is_salary_client)
    }

    pub fn json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("JSON error: {}", e))
    }
}

/// prices every insurance/salary combination for a preliminary request
#[derive(Debug, Clone, Default)]
pub struct OfferGenerator {
    config: CalculatorConfig,
}

impl OfferGenerator {
    pub fn new(config: CalculatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// validate the request and return four offers, cheapest rate first
    pub fn offers(
        &self,
        request: &LoanRequest,
        time_provider: &SafeTimeProvider,
    ) -> Result<Vec<LoanOffer>> {
        let today = time_provider.now().date_naive();
        let terms = validate_loan_request(request, today, &self.config.scoring)?;

        let statement_id = Uuid::new_v4();
        info!(%statement_id, amount = %terms.amount, term = terms.term, "pricing loan offers");

        let mut offers = OfferOptions::all()
            .into_iter()
            .map(|options| self.price(statement_id, terms.amount, terms.term, options))
            .collect::<Result<Vec<_>>>()?;

        // stable, so equal rates keep generation order
        offers.sort_by(|a, b| a.rate.cmp(&b.rate));

        info!(%statement_id, count = offers.len(), "loan offers ready");
        Ok(offers)
    }

    /// same as [`offers`](Self::offers) against the system clock
    pub fn offers_now(&self, request: &LoanRequest) -> Result<Vec<LoanOffer>> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.offers(request, &time)
    }

    fn price(
        &self,
        statement_id: StatementId,
        amount: Money,
        term: u32,
        options: OfferOptions,
    ) -> Result<LoanOffer> {
        let rate = base_rate(&self.config.pricing, options);
        let monthly_payment = annuity_payment(amount, rate.monthly_rate(), term)?;
        let total_amount = monthly_payment
            .checked_times(term)
            .ok_or_else(|| CalculatorError::calculation("total amount out of range"))?;

        debug!(
            insurance = options.is_insurance_enabled,
            salary = options.is_salary_client,
            %rate,
            %monthly_payment,
            %total_amount,
            "priced combination"
        );

        Ok(LoanOffer {
            statement_id,
            requested_amount: amount,
            total_amount: total_amount.presented(),
            term,
            monthly_payment: monthly_payment.presented(),
            rate: rate.presented(),
            is_insurance_enabled: options.is_insurance_enabled,
            is_salary_client: options.is_salary_client,
        })
    }
}
