//! Cash flow projection and IRR solving

mod cashflows;
mod engine;
mod financing;
mod irr;

pub use cashflows::{CashFlowComponent, CashFlowEntry, CashFlowSchedule};
pub use engine::{project_cash_flows, CashFlowProjector, DAYS_PER_YEAR};
pub use financing::annuity_payment;
pub use irr::{npv, solve_irr, SolverConfig};
