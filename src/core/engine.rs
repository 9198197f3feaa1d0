use super::error::InvalidRequestError;
use super::types::{
    Account, AllocationRecommendation, EvaluationConfig, EvaluationResult, PortfolioRequest,
    Projection, RiskLabel, RiskScore, RiskTolerance, TaxTreatment, YearBalance,
};

/// Evaluates a portfolio in a single pass. Any invariant violation, including a
/// projection too large to represent, aborts with no partial result.
pub fn evaluate(
    request: &PortfolioRequest,
    config: &EvaluationConfig,
) -> Result<EvaluationResult, InvalidRequestError> {
    validate_request(request, config)?;

    // Validation guarantees 0 < years <= max_retirement_age.
    let years = request.years_to_retirement() as u32;
    let rate = effective_return_rate(request, config);

    let allocation =
        recommend_allocation(request.current_age, years, request.risk_tolerance, config);
    let risk_score = score_risk(allocation, years, config);
    let projection = project_balances(&request.accounts, request.current_age, years, rate);
    ensure_finite_projection(&projection)?;
    let recommendations = build_recommendations(request, years, allocation, config);

    Ok(EvaluationResult {
        retirement_age: request.retirement_age,
        allocation,
        risk_score,
        projection,
        recommendations,
    })
}

pub fn validate_request(
    request: &PortfolioRequest,
    config: &EvaluationConfig,
) -> Result<(), InvalidRequestError> {
    if request.current_age == 0 {
        return Err(InvalidRequestError::NonPositiveCurrentAge);
    }
    if request.retirement_age > config.max_retirement_age {
        return Err(InvalidRequestError::RetirementAgeOutOfRange {
            retirement_age: request.retirement_age,
            max: config.max_retirement_age,
        });
    }
    if request.years_to_retirement() <= 0 {
        return Err(InvalidRequestError::NoYearsToRetirement {
            current_age: request.current_age,
            retirement_age: request.retirement_age,
        });
    }

    for (index, account) in request.accounts.iter().enumerate() {
        if !account.balance.is_finite() || account.balance < 0.0 {
            return Err(InvalidRequestError::InvalidBalance {
                index,
                value: account.balance,
            });
        }
        if !account.annual_contribution.is_finite() || account.annual_contribution < 0.0 {
            return Err(InvalidRequestError::InvalidContribution {
                index,
                value: account.annual_contribution,
            });
        }
    }

    if let Some(percent) = request.current_stock_percent {
        if !(0.0..=100.0).contains(&percent) {
            return Err(InvalidRequestError::CurrentStockPercentOutOfRange(percent));
        }
    }

    let rate = effective_return_rate(request, config);
    if !rate.is_finite() || rate <= -1.0 {
        return Err(InvalidRequestError::InvalidReturnRate(rate));
    }

    Ok(())
}

/// Compounding a large but finite balance can still overflow `f64`; such a
/// projection is rejected rather than reported as infinite.
fn ensure_finite_projection(projection: &Projection) -> Result<(), InvalidRequestError> {
    let totals = [
        projection.projected_balance,
        projection.total_contributions,
        projection.total_growth,
        projection.tax_deferred_balance,
        projection.tax_free_balance,
        projection.taxable_balance,
    ];
    let yearly = projection.yearly_balances.iter().map(|y| y.balance);
    if totals.into_iter().chain(yearly).all(f64::is_finite) {
        Ok(())
    } else {
        Err(InvalidRequestError::ProjectionOverflow {
            years: projection.years_to_retirement,
        })
    }
}

fn effective_return_rate(request: &PortfolioRequest, config: &EvaluationConfig) -> f64 {
    request
        .annual_return_rate
        .unwrap_or(config.annual_return_rate)
}

/// "110 minus age", shifted by risk tolerance and capped near retirement.
pub fn recommend_allocation(
    current_age: u32,
    years_to_retirement: u32,
    risk_tolerance: Option<RiskTolerance>,
    config: &EvaluationConfig,
) -> AllocationRecommendation {
    let min = config.min_stock_percent;
    let max = config.max_stock_percent;
    let age = i32::try_from(current_age).unwrap_or(i32::MAX);

    let base = clamp_between(config.age_rule_base.saturating_sub(age), min, max);
    let offset = match risk_tolerance {
        Some(RiskTolerance::Conservative) => -config.risk_tolerance_offset,
        Some(RiskTolerance::Moderate) | None => 0,
        Some(RiskTolerance::Aggressive) => config.risk_tolerance_offset,
    };
    let mut stock = clamp_between(base.saturating_add(offset), min, max);

    if years_to_retirement <= config.near_retirement_years {
        stock = stock.min(config.near_retirement_stock_cap);
    }

    let stock_percent = clamp_between(stock, min, max).clamp(0, 100) as u32;
    AllocationRecommendation {
        stock_percent,
        bond_percent: 100 - stock_percent,
    }
}

/// Never panics on an inverted range; `min` wins.
fn clamp_between(value: i32, min: i32, max: i32) -> i32 {
    value.min(max).max(min)
}

pub fn score_risk(
    allocation: AllocationRecommendation,
    years_to_retirement: u32,
    config: &EvaluationConfig,
) -> RiskScore {
    let mut score = i64::from(allocation.stock_percent);
    if years_to_retirement < config.short_horizon_years {
        score += i64::from(config.short_horizon_risk_adjustment);
    }
    let score = score.clamp(0, 100) as u32;
    RiskScore {
        score,
        label: risk_label(score, config),
    }
}

pub fn risk_label(score: u32, config: &EvaluationConfig) -> RiskLabel {
    if score <= config.conservative_max_score {
        RiskLabel::Conservative
    } else if score <= config.moderate_max_score {
        RiskLabel::Moderate
    } else {
        RiskLabel::Aggressive
    }
}

/// Future value of one account with annual compounding and year-end
/// contributions (ordinary annuity).
pub fn future_value(account: &Account, rate: f64, years: u32) -> f64 {
    let growth = (1.0 + rate).powi(years as i32);
    let contribution_value = if rate == 0.0 {
        account.annual_contribution * f64::from(years)
    } else {
        account.annual_contribution * ((growth - 1.0) / rate)
    };
    account.balance * growth + contribution_value
}

fn total_future_value(accounts: &[Account], rate: f64, years: u32) -> f64 {
    accounts
        .iter()
        .map(|account| future_value(account, rate, years))
        .fold(0.0, |total, value| total + value)
}

pub fn project_balances(
    accounts: &[Account],
    current_age: u32,
    years_to_retirement: u32,
    rate: f64,
) -> Projection {
    let yearly_balances: Vec<YearBalance> = (0..=years_to_retirement)
        .map(|year| YearBalance {
            age: current_age + year,
            balance: total_future_value(accounts, rate, year).round(),
        })
        .collect();
    let projected_balance = total_future_value(accounts, rate, years_to_retirement).round();

    let total_contributions = accounts
        .iter()
        .map(|a| a.balance + a.annual_contribution * f64::from(years_to_retirement))
        .fold(0.0, |total, value| total + value)
        .round();

    let mut tax_deferred = 0.0;
    let mut tax_free = 0.0;
    let mut taxable = 0.0;
    for account in accounts {
        let value = future_value(account, rate, years_to_retirement);
        match account.account_type.tax_treatment() {
            TaxTreatment::TaxDeferred => tax_deferred += value,
            TaxTreatment::TaxFree => tax_free += value,
            TaxTreatment::Taxable => taxable += value,
        }
    }

    Projection {
        assumed_annual_return_rate: rate,
        years_to_retirement,
        projected_balance,
        total_contributions,
        total_growth: projected_balance - total_contributions,
        tax_deferred_balance: tax_deferred.round(),
        tax_free_balance: tax_free.round(),
        taxable_balance: taxable.round(),
        yearly_balances,
    }
}

/// Rule checks run in a fixed order so identical input always yields the
/// same list.
pub fn build_recommendations(
    request: &PortfolioRequest,
    years_to_retirement: u32,
    allocation: AllocationRecommendation,
    config: &EvaluationConfig,
) -> Vec<String> {
    let mut out = Vec::new();

    if request.accounts.is_empty() {
        out.push(
            "Open a retirement account such as a 401(k) or IRA to start building savings."
                .to_string(),
        );
    }

    let mut idle: Vec<&'static str> = Vec::new();
    for account in &request.accounts {
        let name = account.account_type.display_name();
        if account.annual_contribution == 0.0 && !idle.contains(&name) {
            idle.push(name);
        }
    }
    if !idle.is_empty() {
        let (noun, verb) = if idle.len() == 1 {
            ("account", "receives")
        } else {
            ("accounts", "receive")
        };
        out.push(format!(
            "Increase contributions: your {} {noun} currently {verb} no annual contributions.",
            join_names(&idle)
        ));
    }

    if let Some(current) = request.current_stock_percent {
        let recommended = f64::from(allocation.stock_percent);
        let drift = current - recommended;
        if drift.abs() > config.rebalance_threshold {
            let direction = if drift > 0.0 { "above" } else { "below" };
            out.push(format!(
                "Rebalance toward {}% stocks / {}% bonds: your current {}% stock share is {} points {direction} the recommendation.",
                allocation.stock_percent,
                allocation.bond_percent,
                format_points(current),
                format_points(drift.abs())
            ));
        }
    }

    if years_to_retirement <= config.near_retirement_years {
        let unit = if years_to_retirement == 1 { "year" } else { "years" };
        out.push(format!(
            "With {years_to_retirement} {unit} to retirement, keep stocks at or below {}% to preserve capital.",
            config.near_retirement_stock_cap
        ));
    }

    if request.risk_tolerance.is_none() {
        out.push(
            "No risk tolerance was given, so the allocation is based on age alone; provide one to tailor it."
                .to_string(),
        );
    }

    let total_balance = request
        .accounts
        .iter()
        .fold(0.0, |total, a| total + a.balance);
    let has_tax_advantaged = request
        .accounts
        .iter()
        .any(|a| a.account_type.tax_treatment() != TaxTreatment::Taxable);
    if total_balance > 0.0 && !has_tax_advantaged {
        out.push(
            "Consider directing new savings into tax-advantaged accounts such as a 401(k) or IRA."
                .to_string(),
        );
    }

    out
}

/// Whole numbers print without decimals; anything else keeps one place so a
/// drift just over the threshold is not shown as equal to it.
fn format_points(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
