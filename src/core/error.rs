use thiserror::Error;

/// Raised when a request breaks one of the portfolio invariants. Evaluation
/// stops at the first violation and produces no partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidRequestError {
    #[error("current age must be greater than 0")]
    NonPositiveCurrentAge,

    #[error("retirement age {retirement_age} exceeds the maximum of {max}")]
    RetirementAgeOutOfRange { retirement_age: u32, max: u32 },

    #[error("retirement age {retirement_age} must be greater than current age {current_age}")]
    NoYearsToRetirement { current_age: u32, retirement_age: u32 },

    #[error("account {index} balance must be a non-negative amount, got {value}")]
    InvalidBalance { index: usize, value: f64 },

    #[error("account {index} annual contribution must be a non-negative amount, got {value}")]
    InvalidContribution { index: usize, value: f64 },

    #[error("current stock percent must be between 0 and 100, got {0}")]
    CurrentStockPercentOutOfRange(f64),

    #[error("annual return rate must be finite and greater than -100%, got {0}")]
    InvalidReturnRate(f64),

    #[error("projected balance over {years} years exceeds the representable range")]
    ProjectionOverflow { years: u32 },

    #[error("malformed request: {0}")]
    Malformed(String),
}

impl InvalidRequestError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }
}
