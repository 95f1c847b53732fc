//! Vessel investment parameters and input loading

mod data;
pub mod loader;

pub use data::{EarningsBand, Financing, InvestmentParameters, Overhaul, VesselClass};
pub use loader::{load_parameters, load_scenarios, load_scenarios_from_reader, ScenarioInput};
