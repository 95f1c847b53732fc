//! Error types for parameter validation, IRR solving and input loading

use serde::Serialize;
use thiserror::Error;

use crate::vessel::VesselClass;

/// Invalid investment parameters, reported before any projection runs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("holding period must be at least one year")]
    ZeroHoldingPeriod,

    #[error("purchase price must be positive and finite, got {0}")]
    InvalidPurchasePrice(f64),

    /// A rate or currency amount that must be finite and non-negative
    #[error("{field} must be finite and non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("loan fraction must lie in [0, 1], got {0}")]
    LoanFractionOutOfRange(f64),

    #[error("sale commission must lie in [0, 1], got {0}")]
    CommissionOutOfRange(f64),

    #[error("amortization term of {term} years must lie in [1, {holding_period}]")]
    AmortizationTermOutOfRange { term: u32, holding_period: u32 },

    #[error("overhaul year {year} must lie in [1, {holding_period}]")]
    OverhaulYearOutOfRange { year: u32, holding_period: u32 },

    #[error("earnings band {first_year}-{last_year} is empty or starts before year 1")]
    InvalidEarningsBand { first_year: u32, last_year: u32 },

    #[error("no earnings band covers year {0}")]
    EarningsGap(u32),

    #[error("more than one earnings band covers year {0}")]
    EarningsOverlap(u32),

    #[error("no resale regression for {class:?} held {years} years (supported: {supported:?})")]
    UnsupportedHoldingPeriod {
        class: VesselClass,
        years: u32,
        supported: Vec<u32>,
    },
}

/// Reasons the Newton-Raphson IRR iteration can fail
///
/// Callers can branch on the cause, e.g. retry `NonConvergent` with another guess.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum IrrError {
    #[error("IRR requires at least one cash flow")]
    EmptyCashFlows,

    /// The NPV derivative vanished (or stopped being finite) at `rate`
    #[error("IRR undefined: NPV derivative degenerate at rate {rate} (iteration {iteration})")]
    Undefined { iteration: u32, rate: f64 },

    #[error("IRR did not converge within {iterations} iterations (last rate {last_rate})")]
    NonConvergent { iterations: u32, last_rate: f64 },
}

/// Failures reading parameter sets or run configuration
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}
