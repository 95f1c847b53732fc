//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson on the NPV of annual cash flows. The method is local: when
//! the schedule changes sign more than once there may be several IRRs, and the
//! root reached depends on the starting guess. There is no bracketing fallback.

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::error::IrrError;

/// Starting point and stopping rules for the IRR iteration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Initial rate guess as a decimal (0.10 = 10%)
    pub guess: f64,
    pub max_iterations: u32,
    /// Convergence threshold on the change in rate between iterations
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            guess: 0.10,
            max_iterations: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Solve for the rate that zeroes the NPV of `cashflows` (year 0 first).
///
/// # Returns
/// * `Ok(pct)` - IRR as a percentage (e.g. 10.0 for 10%)
/// * `Err(IrrError::Undefined)` - the derivative vanished or the iteration left finite numbers
/// * `Err(IrrError::NonConvergent)` - `max_iterations` steps without meeting the tolerance
pub fn solve_irr(cashflows: &[f64], config: &SolverConfig) -> Result<f64, IrrError> {
    if cashflows.is_empty() {
        return Err(IrrError::EmptyCashFlows);
    }

    let mut rate = config.guess;

    for iteration in 0..config.max_iterations {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv == 0.0 || !dnpv.is_finite() || !npv.is_finite() {
            debug!("IRR undefined at iteration {}: rate {}, npv {}, dnpv {}", iteration, rate, npv, dnpv);
            return Err(IrrError::Undefined { iteration, rate });
        }

        let new_rate = rate - npv / dnpv;
        trace!("IRR iteration {}: rate {} -> {} (npv {})", iteration, rate, new_rate, npv);

        if !new_rate.is_finite() {
            return Err(IrrError::Undefined { iteration, rate });
        }

        if (new_rate - rate).abs() < config.tolerance {
            debug!("IRR converged to {} after {} iterations", new_rate, iteration + 1);
            return Ok(new_rate * 100.0);
        }

        rate = new_rate;
    }

    Err(IrrError::NonConvergent {
        iterations: config.max_iterations,
        last_rate: rate,
    })
}

/// NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        npv += cf / (1.0 + rate).powi(t as i32);
        if t > 0 {
            dnpv -= (t as f64) * cf / (1.0 + rate).powi(t as i32 + 1);
        }
    }

    (npv, dnpv)
}

/// NPV of annual cash flows (year 0 undiscounted) at a decimal rate
pub fn npv(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}
