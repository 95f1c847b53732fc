//! Evaluator running projection then IRR for one or many parameter sets
//!
//! Holds the assumptions and solver settings once, then evaluates any number
//! of investments against them.

use log::{info, warn};
use serde::Serialize;

use crate::assumptions::Assumptions;
use crate::error::{ConfigError, IrrError};
use crate::projection::{solve_irr, CashFlowProjector, CashFlowSchedule, SolverConfig};
use crate::vessel::{InvestmentParameters, ScenarioInput};

/// Projected schedule together with its IRR outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub schedule: CashFlowSchedule,
    /// IRR in percent, or why the solver could not produce one
    pub irr: Result<f64, IrrError>,
}

impl Evaluation {
    pub fn irr_pct(&self) -> Option<f64> {
        self.irr.ok()
    }
}

/// Outcome for one named scenario of a batch
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<Evaluation, ConfigError>,
}

/// Evaluates investments under fixed assumptions and solver settings
///
/// # Example
/// ```ignore
/// let evaluator = Evaluator::standard();
/// let evaluation = evaluator.evaluate(&InvestmentParameters::reference_case())?;
/// println!("IRR: {:?}", evaluation.irr_pct());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    projector: CashFlowProjector,
    solver: SolverConfig,
}

impl Evaluator {
    pub fn new(assumptions: Assumptions, solver: SolverConfig) -> Self {
        Self {
            projector: CashFlowProjector::new(assumptions),
            solver,
        }
    }

    /// Standard assumptions with default solver settings
    pub fn standard() -> Self {
        Self::new(Assumptions::standard(), SolverConfig::default())
    }

    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    pub fn assumptions(&self) -> &Assumptions {
        self.projector.assumptions()
    }

    /// Project and solve one investment
    ///
    /// Invalid parameters fail the call; solver failures are carried in
    /// `Evaluation::irr` alongside the schedule.
    pub fn evaluate(&self, params: &InvestmentParameters) -> Result<Evaluation, ConfigError> {
        let schedule = self.projector.project(params)?;
        let irr = solve_irr(&schedule.amounts(), &self.solver);
        if let Err(e) = &irr {
            warn!("{}", e);
        }
        Ok(Evaluation { schedule, irr })
    }

    /// Evaluate each scenario independently, keeping input order
    pub fn evaluate_batch(&self, scenarios: &[ScenarioInput]) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = scenarios
            .iter()
            .map(|s| ScenarioOutcome {
                name: s.name.clone(),
                result: self.evaluate(&s.parameters),
            })
            .collect();

        let solved = outcomes
            .iter()
            .filter(|o| matches!(&o.result, Ok(e) if e.irr.is_ok()))
            .count();
        info!("Evaluated {} scenarios, {} with an IRR", outcomes.len(), solved);
        outcomes
    }
}

/// Evaluate one investment under standard assumptions and the given solver settings
pub fn evaluate(params: &InvestmentParameters, solver: &SolverConfig) -> Result<Evaluation, ConfigError> {
    Evaluator::new(Assumptions::standard(), *solver).evaluate(params)
}
