//! Vessel IRR - cash flow projection and IRR estimation for ship acquisitions
//!
//! This library provides:
//! - Investment parameters with validation (financing, opex, earnings bands, overhaul)
//! - Resale price regressions by vessel class and holding period
//! - Yearly cash flow projection including debt service and disposal proceeds
//! - Newton-Raphson IRR solving with typed failure outcomes

pub mod assumptions;
pub mod config;
pub mod error;
pub mod projection;
pub mod scenario;
pub mod vessel;

// Re-export commonly used types
pub use assumptions::{Assumptions, ResaleTable, TermPolicy};
pub use error::{ConfigError, IrrError, LoadError};
pub use projection::{project_cash_flows, solve_irr, CashFlowEntry, CashFlowSchedule, SolverConfig};
pub use scenario::{evaluate, Evaluation, Evaluator};
pub use vessel::{InvestmentParameters, VesselClass};
