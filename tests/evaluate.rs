//! End-to-end checks through the public adapters and engine.

use nestegg::api::{render_text, request_from_json};
use nestegg::core::{EvaluationConfig, InvalidRequestError, RiskLabel, evaluate};

const README_DOCUMENT: &str = r#"{
  "age": 35,
  "retirement_age": 67,
  "accounts": [
    {"type": "401k", "balance": 45000, "contribution_annually": 6000},
    {"type": "RothIRA", "balance": 12000, "contribution_annually": 6000}
  ],
  "risk_tolerance": "moderate"
}"#;

#[test]
fn readme_document_evaluates_end_to_end() {
    let request = request_from_json(README_DOCUMENT).expect("document should parse");
    let result = evaluate(&request, &EvaluationConfig::default()).expect("request is valid");

    assert_eq!(result.allocation.stock_percent, 75);
    assert_eq!(result.allocation.bond_percent, 25);
    assert_eq!(result.risk_score.score, 75);
    assert_eq!(result.risk_score.label, RiskLabel::Aggressive);
    assert_eq!(result.projection.projected_balance, 1_458_520.0);

    let text = render_text(&result);
    assert!(text.contains("75% stocks / 25% bonds"));
    assert!(text.contains("75 (Aggressive)"));
    assert!(text.contains("$1,458,520"));
}

#[test]
fn repeated_evaluation_is_identical() {
    let request = request_from_json(README_DOCUMENT).expect("document should parse");
    let config = EvaluationConfig::default();

    let first = evaluate(&request, &config).expect("request is valid");
    let second = evaluate(&request, &config).expect("request is valid");
    assert_eq!(first, second);
    assert_eq!(render_text(&first), render_text(&second));
}

#[test]
fn lower_configured_rate_projects_less() {
    let request = request_from_json(README_DOCUMENT).expect("document should parse");
    let baseline = evaluate(&request, &EvaluationConfig::default()).expect("valid");
    let cautious = evaluate(
        &request,
        &EvaluationConfig {
            annual_return_rate: 0.04,
            ..EvaluationConfig::default()
        },
    )
    .expect("valid");

    assert!(cautious.projection.projected_balance < baseline.projection.projected_balance);
    assert_eq!(cautious.allocation, baseline.allocation);
}

#[test]
fn negative_balance_is_rejected_before_output() {
    let document = r#"{
      "age": 40,
      "retirement_age": 65,
      "accounts": [{"type": "taxable", "balance": -10}]
    }"#;
    let request = request_from_json(document).expect("document should parse");
    let err = evaluate(&request, &EvaluationConfig::default()).expect_err("must reject");

    assert_eq!(
        err,
        InvalidRequestError::InvalidBalance {
            index: 0,
            value: -10.0,
        }
    );
}
