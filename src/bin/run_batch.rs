//! Run a CSV file of calculator scenarios
//!
//! Outputs one summary row per scenario, with the validation message for rows
//! that could not be projected.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;
use serde::Serialize;

use financial_projection::inputs::load_scenarios;
use financial_projection::{Assumptions, Calculator};

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Project every scenario in a CSV file")]
struct Args {
    /// Scenario CSV (ScenarioID,Calculator,Amount,RatePct,TenureMonths,Compounding)
    input: PathBuf,

    /// Summary output path
    #[arg(long, default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// Assumptions JSON file (built-in defaults if omitted)
    #[arg(long)]
    assumptions: Option<PathBuf>,
}

/// One line of the summary file
#[derive(Debug, Serialize)]
struct SummaryRow {
    #[serde(rename = "ScenarioID")]
    id: String,
    #[serde(rename = "Calculator")]
    calculator: String,
    #[serde(rename = "Periods")]
    periods: Option<u32>,
    #[serde(rename = "Invested")]
    invested: Option<f64>,
    #[serde(rename = "Interest")]
    interest: Option<f64>,
    #[serde(rename = "MaturityValue")]
    maturity_value: Option<f64>,
    #[serde(rename = "EffectiveYieldPct")]
    effective_yield_pct: Option<f64>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let assumptions = match &args.assumptions {
        Some(path) => Assumptions::from_json_path(path)
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("loading assumptions from {}", path.display()))?,
        None => Assumptions::standard(),
    };
    let display = assumptions.display.clone();
    let calculator = Calculator::with_assumptions(assumptions);

    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios(&args.input)
        .map_err(|e| anyhow::anyhow!("{}", e))
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let proj_start = Instant::now();
    let rows: Vec<SummaryRow> = scenarios
        .par_iter()
        .map(|loaded| {
            let calculator_name = loaded
                .scenario
                .as_ref()
                .map(|s| s.kind.to_string())
                .unwrap_or_default();

            match loaded.scenario.as_ref().map_err(Clone::clone).and_then(|s| calculator.run(s)) {
                Ok(result) => {
                    let summary = result.summary(&display);
                    SummaryRow {
                        id: loaded.id.clone(),
                        calculator: calculator_name,
                        periods: Some(summary.periods),
                        invested: Some(summary.total_invested),
                        interest: Some(summary.total_interest_earned),
                        maturity_value: Some(summary.maturity_value),
                        effective_yield_pct: result.annualized_return().map(|r| (r * 10_000.0).round() / 100.0),
                        error: None,
                    }
                }
                Err(err) => {
                    log::warn!("Scenario {} rejected: {}", loaded.id, err);
                    SummaryRow {
                        id: loaded.id.clone(),
                        calculator: calculator_name,
                        periods: None,
                        invested: None,
                        interest: None,
                        maturity_value: None,
                        effective_yield_pct: None,
                        error: Some(err.to_string()),
                    }
                }
            }
        })
        .collect();
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let failed = rows.iter().filter(|r| r.error.is_some()).count();
    println!("Output written to {}", args.output.display());
    println!("\nBatch Summary:");
    println!("  Projected: {}", rows.len() - failed);
    println!("  Rejected:  {}", failed);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
