pub mod config;
pub mod credit;
pub mod decimal;
pub mod errors;
pub mod offers;
pub mod pricing;
pub mod requests;
pub mod schedule;
pub mod scoring;
pub mod types;
pub mod validation;

// re-export key types
pub use config::{CalculatorConfig, PricingConfig, ScoringConfig};
pub use credit::{CreditResult, CreditScorer};
pub use decimal::{Money, Rate};
pub use errors::{CalculatorError, ErrorResponse, RejectionReason, Result};
pub use offers::{LoanOffer, OfferGenerator};
pub use requests::{EmploymentRecord, LoanRequest, ScoringRequest};
pub use schedule::PaymentScheduleEntry;
pub use scoring::{Adjustment, Eligibility, ScoringDelta, ScoringFactor};
pub use types::{
    EmploymentStatus, Gender, MaritalStatus, OfferOptions, Position, StatementId,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
