mod payload;
mod render;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::core::{EvaluationConfig, evaluate};

pub use payload::request_from_json;
pub use render::{OutputFormat, format_currency, render, render_json, render_text};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(value: CliOutputFormat) -> Self {
        match value {
            CliOutputFormat::Text => OutputFormat::Text,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "nestegg",
    about = "Retirement portfolio evaluator (allocation + risk score + projected balance)"
)]
struct Cli {
    #[arg(help = "Path to the portfolio JSON document")]
    input: PathBuf,
    #[arg(long, value_enum, default_value_t = CliOutputFormat::Text)]
    format: CliOutputFormat,
    #[arg(
        long,
        default_value_t = 6.0,
        allow_hyphen_values = true,
        help = "Assumed annual return in percent, e.g. 6"
    )]
    annual_return_rate: f64,
    #[arg(
        long,
        default_value_t = 10.0,
        help = "Stock share drift in percentage points before rebalancing is recommended"
    )]
    rebalance_threshold: f64,
    #[arg(
        long,
        default_value_t = -5,
        allow_hyphen_values = true,
        help = "Risk score adjustment applied when fewer than 5 years remain"
    )]
    short_horizon_risk_adjustment: i32,
    #[arg(
        long,
        default_value = "warn",
        help = "Log filter written to stderr, e.g. info or nestegg=debug"
    )]
    log_level: String,
}

fn build_config(cli: &Cli) -> Result<EvaluationConfig, String> {
    if !cli.annual_return_rate.is_finite() || cli.annual_return_rate <= -100.0 {
        return Err("--annual-return-rate must be > -100".to_string());
    }

    if !(0.0..=100.0).contains(&cli.rebalance_threshold) {
        return Err("--rebalance-threshold must be between 0 and 100".to_string());
    }

    if !(-100..=100).contains(&cli.short_horizon_risk_adjustment) {
        return Err("--short-horizon-risk-adjustment must be between -100 and 100".to_string());
    }

    Ok(EvaluationConfig {
        annual_return_rate: cli.annual_return_rate / 100.0,
        rebalance_threshold: cli.rebalance_threshold,
        short_horizon_risk_adjustment: cli.short_horizon_risk_adjustment,
        ..EvaluationConfig::default()
    })
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    // A subscriber may already be installed when embedded; keep the first one.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn execute(cli: &Cli) -> anyhow::Result<String> {
    let config = build_config(cli).map_err(anyhow::Error::msg)?;

    let document = fs::read_to_string(&cli.input)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    tracing::debug!(path = %cli.input.display(), bytes = document.len(), "read portfolio document");

    let request = request_from_json(&document)?;
    tracing::info!(
        current_age = request.current_age,
        retirement_age = request.retirement_age,
        accounts = request.accounts.len(),
        "evaluating portfolio"
    );

    let result = evaluate(&request, &config)?;
    tracing::info!(
        stock_percent = result.allocation.stock_percent,
        risk_score = result.risk_score.score,
        projected_balance = result.projection.projected_balance,
        "evaluation complete"
    );

    Ok(render(&result, cli.format.into())?)
}

/// Parses arguments, evaluates the input document and prints the rendered
/// result. Any parse, validation or I/O failure exits with status 1.
pub fn run_cli() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match execute(&cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = %e, "evaluation rejected");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
