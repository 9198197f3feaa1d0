use std::fmt::Write as _;

use crate::core::EvaluationResult;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn render(
    result: &EvaluationResult,
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
    }
}

pub fn render_json(result: &EvaluationResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

pub fn render_text(result: &EvaluationResult) -> String {
    let allocation = result.allocation;
    let risk = result.risk_score;
    let projection = &result.projection;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(
        out,
        "Recommended allocation: {}% stocks / {}% bonds",
        allocation.stock_percent, allocation.bond_percent
    );
    let _ = writeln!(out, "Risk score: {} ({})", risk.score, risk.label.as_str());
    let _ = writeln!(
        out,
        "Projected balance at {}: {} (assuming {:.1}% annual return)",
        result.retirement_age,
        format_currency(projection.projected_balance),
        projection.assumed_annual_return_rate * 100.0
    );
    let _ = writeln!(
        out,
        "  Contributions: {} / Growth: {}",
        format_currency(projection.total_contributions),
        format_currency(projection.total_growth)
    );
    let _ = writeln!(
        out,
        "  Tax-deferred: {} / Tax-free: {} / Taxable: {}",
        format_currency(projection.tax_deferred_balance),
        format_currency(projection.tax_free_balance),
        format_currency(projection.taxable_balance)
    );

    if result.recommendations.is_empty() {
        out.push_str("Recommendations: none");
    } else {
        out.push_str("Recommendations:");
        for recommendation in &result.recommendations {
            let _ = write!(out, "\n- {recommendation}");
        }
    }
    out
}

/// Whole currency units with thousands separators, e.g. `$1,458,520`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}")
}
