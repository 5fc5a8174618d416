pub mod annuity;

use crate::config::PricingConfig;
use crate::decimal::Rate;
use crate::types::OfferOptions;

pub use annuity::{annuity_payment, compound_factor, inverse_annuity_payment};

/// annual rate for one insurance/salary combination, before any scoring
pub fn base_rate(config: &PricingConfig, options: OfferOptions) -> Rate {
    let mut rate = config.base_rate;
    if options.is_insurance_enabled {
        rate = rate - config.insurance_discount;
    }
    if options.is_salary_client {
        rate = rate - config.salary_client_discount;
    }
    rate
}
