mod engine;
mod error;
mod types;

pub use engine::{
    build_recommendations, evaluate, future_value, project_balances, recommend_allocation,
    risk_label, score_risk, validate_request,
};
pub use error::InvalidRequestError;
pub use types::{
    Account, AccountType, AllocationRecommendation, EvaluationConfig, EvaluationResult,
    PortfolioRequest, Projection, RiskLabel, RiskScore, RiskTolerance, TaxTreatment, YearBalance,
};
