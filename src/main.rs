//! Vessel IRR CLI
//!
//! Evaluates one parameter set (JSON) or a batch of scenarios (CSV) and prints
//! the cash flow schedule and IRR. Without inputs the reference case is used.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::Serialize;
use std::path::{Path, PathBuf};

use vessel_irr::config::RunConfig;
use vessel_irr::scenario::{Evaluation, Evaluator, ScenarioOutcome};
use vessel_irr::vessel::{load_parameters, load_scenarios, InvestmentParameters};
use vessel_irr::{CashFlowSchedule, IrrError, TermPolicy};

#[derive(Parser, Debug)]
#[command(name = "vessel_irr", version, about = "Estimate the IRR of a vessel acquisition")]
struct Cli {
    /// Investment parameters as JSON
    #[arg(long, conflicts_with = "batch")]
    params: Option<PathBuf>,

    /// Scenario rows as CSV
    #[arg(long)]
    batch: Option<PathBuf>,

    /// Run configuration (solver settings, term policy) as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial IRR guess as a decimal
    #[arg(long)]
    guess: Option<f64>,

    #[arg(long)]
    max_iterations: Option<u32>,

    #[arg(long)]
    tolerance: Option<f64>,

    /// Reuse the longest fitted resale regression for unsupported holding periods
    #[arg(long)]
    allow_term_fallback: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn run_config(&self) -> Result<RunConfig> {
        let base = match &self.config {
            Some(path) => RunConfig::from_json_path(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => RunConfig::default(),
        };

        let mut config = base.with_env_overrides();
        if let Some(guess) = self.guess {
            config.solver.guess = guess;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.solver.max_iterations = max_iterations;
        }
        if let Some(tolerance) = self.tolerance {
            config.solver.tolerance = tolerance;
        }
        if self.allow_term_fallback {
            config.term_policy = TermPolicy::FallbackToLongest;
        }
        Ok(config)
    }
}

#[derive(Serialize)]
struct BatchRow<'a> {
    scenario: &'a str,
    irr_pct: Option<f64>,
    irr_failure: Option<IrrError>,
    config_error: Option<String>,
    schedule: Option<&'a CashFlowSchedule>,
}

impl<'a> From<&'a ScenarioOutcome> for BatchRow<'a> {
    fn from(outcome: &'a ScenarioOutcome) -> Self {
        match &outcome.result {
            Ok(evaluation) => BatchRow {
                scenario: &outcome.name,
                irr_pct: evaluation.irr.ok(),
                irr_failure: evaluation.irr.err(),
                config_error: None,
                schedule: Some(&evaluation.schedule),
            },
            Err(e) => BatchRow {
                scenario: &outcome.name,
                irr_pct: None,
                irr_failure: None,
                config_error: Some(e.to_string()),
                schedule: None,
            },
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = cli.run_config()?;
    info!("Solver {:?}, term policy {:?}", config.solver, config.term_policy);
    let evaluator = config.evaluator();

    match &cli.batch {
        Some(path) => run_batch(&evaluator, path, cli.json),
        None => {
            let params = match &cli.params {
                Some(path) => load_parameters(path)
                    .with_context(|| format!("reading parameters {}", path.display()))?,
                None => InvestmentParameters::reference_case(),
            };
            run_single(&evaluator, &params, cli.json)
        }
    }
}

fn run_single(evaluator: &Evaluator, params: &InvestmentParameters, json: bool) -> Result<()> {
    let evaluation = evaluator
        .evaluate(params)
        .context("invalid investment parameters")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&evaluation)?);
        return Ok(());
    }

    println!("Vessel IRR v{}", env!("CARGO_PKG_VERSION"));
    println!("================\n");
    println!(
        "{:?}, {} years, purchase ${:.0}",
        params.vessel_class, params.holding_period, params.purchase_price
    );
    print_evaluation(&evaluation);
    Ok(())
}

fn print_evaluation(evaluation: &Evaluation) {
    let schedule = &evaluation.schedule;

    println!("\n{:>4} {:>18}  {}", "Year", "Cash Flow (USD)", "Notes");
    println!("{}", "-".repeat(70));
    for entry in &schedule.entries {
        println!("{:>4} {:>18.2}  {}", entry.year, entry.amount, entry.annotation_text());
    }

    println!("\nEstimated Resale Price: ${:.0}", schedule.resale_price);
    if schedule.loan_amount > 0.0 {
        println!("Loan: ${:.0}, annual payment ${:.0}", schedule.loan_amount, schedule.loan_payment);
    }
    match evaluation.irr {
        Ok(pct) => println!("Internal Rate of Return (IRR): {:.2}%", pct),
        Err(e) => println!("Internal Rate of Return (IRR): not available ({})", e),
    }
}

fn run_batch(evaluator: &Evaluator, path: &Path, json: bool) -> Result<()> {
    let scenarios = load_scenarios(path).with_context(|| format!("reading scenarios {}", path.display()))?;
    let outcomes = evaluator.evaluate_batch(&scenarios);

    if json {
        let rows: Vec<BatchRow> = outcomes.iter().map(BatchRow::from).collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for outcome in &outcomes {
        println!("\n{}\n{}", outcome.name, "=".repeat(outcome.name.len().max(8)));
        match &outcome.result {
            Ok(evaluation) => print_evaluation(evaluation),
            Err(e) => println!("  invalid parameters: {}", e),
        }
    }
    Ok(())
}
