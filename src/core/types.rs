use serde::Serialize;

pub const DEFAULT_AGE_RULE_BASE: i32 = 110;
pub const DEFAULT_MIN_STOCK_PERCENT: i32 = 10;
pub const DEFAULT_MAX_STOCK_PERCENT: i32 = 95;
pub const DEFAULT_RISK_TOLERANCE_OFFSET: i32 = 15;
pub const DEFAULT_NEAR_RETIREMENT_YEARS: u32 = 5;
pub const DEFAULT_NEAR_RETIREMENT_STOCK_CAP: i32 = 50;
pub const DEFAULT_SHORT_HORIZON_YEARS: u32 = 5;
pub const DEFAULT_SHORT_HORIZON_RISK_ADJUSTMENT: i32 = -5;
pub const DEFAULT_CONSERVATIVE_MAX_SCORE: u32 = 33;
pub const DEFAULT_MODERATE_MAX_SCORE: u32 = 66;
pub const DEFAULT_ANNUAL_RETURN_RATE: f64 = 0.06;
pub const DEFAULT_REBALANCE_THRESHOLD: f64 = 10.0;
pub const DEFAULT_MAX_RETIREMENT_AGE: u32 = 120;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AccountType {
    Plan401k,
    TraditionalIra,
    RothIra,
    Taxable,
    Other,
}

impl AccountType {
    /// Maps a free-form input tag onto a known account type. Case, spaces,
    /// `-`, `_` and parentheses are ignored; anything unrecognised is `Other`.
    pub fn from_tag(tag: &str) -> Self {
        let normalized: String = tag
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '(' | ')'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "401k" => AccountType::Plan401k,
            "traditionalira" | "traditional" | "ira" => AccountType::TraditionalIra,
            "rothira" | "roth" => AccountType::RothIra,
            "taxable" | "brokerage" => AccountType::Taxable,
            _ => AccountType::Other,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AccountType::Plan401k => "401(k)",
            AccountType::TraditionalIra => "Traditional IRA",
            AccountType::RothIra => "Roth IRA",
            AccountType::Taxable => "Taxable",
            AccountType::Other => "Other",
        }
    }

    pub fn tax_treatment(self) -> TaxTreatment {
        match self {
            AccountType::Plan401k | AccountType::TraditionalIra => TaxTreatment::TaxDeferred,
            AccountType::RothIra => TaxTreatment::TaxFree,
            AccountType::Taxable | AccountType::Other => TaxTreatment::Taxable,
        }
    }
}

/// How withdrawals from an account are treated. Pre-tax money is
/// tax-deferred; Roth money is tax-free; everything else is taxable.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TaxTreatment {
    TaxDeferred,
    TaxFree,
    Taxable,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum RiskLabel {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLabel::Conservative => "Conservative",
            RiskLabel::Moderate => "Moderate",
            RiskLabel::Aggressive => "Aggressive",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub account_type: AccountType,
    pub balance: f64,
    pub annual_contribution: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioRequest {
    pub current_age: u32,
    pub retirement_age: u32,
    pub accounts: Vec<Account>,
    pub risk_tolerance: Option<RiskTolerance>,
    /// Actual stock share of the portfolio today, when known.
    pub current_stock_percent: Option<f64>,
    /// Overrides `EvaluationConfig::annual_return_rate` for this request.
    pub annual_return_rate: Option<f64>,
}

impl PortfolioRequest {
    /// Signed so that invalid requests (retirement age not after current
    /// age) can be detected rather than wrapping.
    pub fn years_to_retirement(&self) -> i64 {
        i64::from(self.retirement_age) - i64::from(self.current_age)
    }
}

/// Tunable heuristics used by the engine. `Default` carries the rule-of-thumb
/// values; the CLI overrides a subset.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationConfig {
    pub age_rule_base: i32,
    pub min_stock_percent: i32,
    pub max_stock_percent: i32,
    pub risk_tolerance_offset: i32,
    pub near_retirement_years: u32,
    pub near_retirement_stock_cap: i32,
    pub short_horizon_years: u32,
    /// Added to the risk score when fewer than `short_horizon_years` remain.
    /// Negative lowers the score, positive raises it.
    pub short_horizon_risk_adjustment: i32,
    pub conservative_max_score: u32,
    pub moderate_max_score: u32,
    pub annual_return_rate: f64,
    /// Percentage points the actual stock share may drift before a rebalance
    /// is recommended.
    pub rebalance_threshold: f64,
    pub max_retirement_age: u32,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            age_rule_base: DEFAULT_AGE_RULE_BASE,
            min_stock_percent: DEFAULT_MIN_STOCK_PERCENT,
            max_stock_percent: DEFAULT_MAX_STOCK_PERCENT,
            risk_tolerance_offset: DEFAULT_RISK_TOLERANCE_OFFSET,
            near_retirement_years: DEFAULT_NEAR_RETIREMENT_YEARS,
            near_retirement_stock_cap: DEFAULT_NEAR_RETIREMENT_STOCK_CAP,
            short_horizon_years: DEFAULT_SHORT_HORIZON_YEARS,
            short_horizon_risk_adjustment: DEFAULT_SHORT_HORIZON_RISK_ADJUSTMENT,
            conservative_max_score: DEFAULT_CONSERVATIVE_MAX_SCORE,
            moderate_max_score: DEFAULT_MODERATE_MAX_SCORE,
            annual_return_rate: DEFAULT_ANNUAL_RETURN_RATE,
            rebalance_threshold: DEFAULT_REBALANCE_THRESHOLD,
            max_retirement_age: DEFAULT_MAX_RETIREMENT_AGE,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRecommendation {
    pub stock_percent: u32,
    pub bond_percent: u32,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskScore {
    pub score: u32,
    pub label: RiskLabel,
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearBalance {
    pub age: u32,
    pub balance: f64,
}

/// Balances are rounded to whole currency units. The tax buckets are rounded
/// individually, so their sum may differ from `projected_balance` by one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub assumed_annual_return_rate: f64,
    pub years_to_retirement: u32,
    pub projected_balance: f64,
    pub total_contributions: f64,
    pub total_growth: f64,
    pub tax_deferred_balance: f64,
    pub tax_free_balance: f64,
    pub taxable_balance: f64,
    pub yearly_balances: Vec<YearBalance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub retirement_age: u32,
    pub allocation: AllocationRecommendation,
    pub risk_score: RiskScore,
    pub projection: Projection,
    pub recommendations: Vec<String>,
}
