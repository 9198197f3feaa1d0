use serde::Deserialize;

use crate::core::{Account, AccountType, InvalidRequestError, PortfolioRequest, RiskTolerance};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ApiRiskTolerance {
    #[serde(alias = "Conservative", alias = "CONSERVATIVE", alias = "low")]
    Conservative,
    #[serde(alias = "Moderate", alias = "MODERATE", alias = "medium")]
    Moderate,
    #[serde(alias = "Aggressive", alias = "AGGRESSIVE", alias = "high")]
    Aggressive,
}

impl From<ApiRiskTolerance> for RiskTolerance {
    fn from(value: ApiRiskTolerance) -> Self {
        match value {
            ApiRiskTolerance::Conservative => RiskTolerance::Conservative,
            ApiRiskTolerance::Moderate => RiskTolerance::Moderate,
            ApiRiskTolerance::Aggressive => RiskTolerance::Aggressive,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AccountPayload {
    #[serde(rename = "type", default)]
    account_type: String,
    balance: f64,
    #[serde(default, alias = "annual_contribution", alias = "contribution")]
    contribution_annually: f64,
}

#[derive(Debug, Deserialize)]
struct EvaluatePayload {
    #[serde(alias = "current_age")]
    age: u32,
    retirement_age: u32,
    #[serde(default)]
    accounts: Vec<AccountPayload>,
    #[serde(default)]
    risk_tolerance: Option<ApiRiskTolerance>,
    #[serde(default)]
    current_stock_percent: Option<f64>,
    #[serde(default)]
    annual_return_rate: Option<f64>,
}

impl From<AccountPayload> for Account {
    fn from(value: AccountPayload) -> Self {
        Account {
            account_type: AccountType::from_tag(&value.account_type),
            balance: value.balance,
            annual_contribution: value.contribution_annually,
        }
    }
}

impl From<EvaluatePayload> for PortfolioRequest {
    fn from(value: EvaluatePayload) -> Self {
        PortfolioRequest {
            current_age: value.age,
            retirement_age: value.retirement_age,
            accounts: value.accounts.into_iter().map(Account::from).collect(),
            risk_tolerance: value.risk_tolerance.map(RiskTolerance::from),
            current_stock_percent: value.current_stock_percent,
            annual_return_rate: value.annual_return_rate,
        }
    }
}

/// Parses an input document. Unparseable JSON, missing required fields and
/// unknown risk tolerances all surface as `InvalidRequestError::Malformed`;
/// semantic checks are left to the engine.
pub fn request_from_json(json: &str) -> Result<PortfolioRequest, InvalidRequestError> {
    let payload = serde_json::from_str::<EvaluatePayload>(json)
        .map_err(|e| InvalidRequestError::malformed(format!("invalid portfolio document: {e}")))?;
    Ok(payload.into())
}
