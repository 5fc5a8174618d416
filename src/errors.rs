use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::decimal::Money;

/// message shown to callers for any fault that is not theirs to fix
pub const INTERNAL_ERROR_MESSAGE: &str = "Unexpected error occurred";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// malformed or missing input; the caller can fix it and resubmit
    #[error("{message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    /// well-formed input, but the applicant is not eligible
    #[error("application rejected: {reason}")]
    Rejected {
        reason: RejectionReason,
    },

    #[error("calculation error: {message}")]
    Calculation {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl CalculatorError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        CalculatorError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn rejected(reason: RejectionReason) -> Self {
        CalculatorError::Rejected { reason }
    }

    pub fn calculation(message: impl Into<String>) -> Self {
        CalculatorError::Calculation {
            message: message.into(),
        }
    }

    /// offending field for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CalculatorError::Validation { field, .. } => Some(field),
            _ => None,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CalculatorError::Validation { .. })
    }

    pub fn is_rejection(&self) -> bool {
        matches!(self, CalculatorError::Rejected { .. })
    }

    /// true when the caller is at fault (bad input or ineligible applicant)
    pub fn is_client_error(&self) -> bool {
        self.is_validation() || self.is_rejection()
    }

    /// http-style status a transport should answer with
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }

    /// text safe to hand to a caller; internal faults are masked
    pub fn public_message(&self) -> String {
        match self {
            CalculatorError::Validation { message, .. } => format!("Validation error: {}", message),
            CalculatorError::Rejected { reason } => format!("Application rejected: {}", reason),
            CalculatorError::Calculation { .. } | CalculatorError::InvalidConfiguration { .. } => {
                INTERNAL_ERROR_MESSAGE.to_string()
            }
        }
    }
}

/// why the scoring phase declined an application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RejectionReason {
    AgeOutOfRange { age: u32, min: u32, max: u32 },
    MissingEmployment,
    Unemployed,
    InsufficientIncome { salary: Money, required: Money },
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::AgeOutOfRange { age, min, max } => {
                write!(f, "applicant age {} is outside {}..={}", age, min, max)
            }
            RejectionReason::MissingEmployment => write!(f, "no employment record"),
            RejectionReason::Unemployed => write!(f, "applicant is unemployed"),
            RejectionReason::InsufficientIncome { salary, required } => write!(
                f,
                "salary {} is below the required {}",
                salary.presented(),
                required.presented()
            ),
        }
    }
}

/// body a transport renders for a failed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
}

impl From<&CalculatorError> for ErrorResponse {
    fn from(error: &CalculatorError) -> Self {
        ErrorResponse {
            status: error.status_code(),
            message: error.public_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CalculatorError>;
