//! Market assumptions used by the projection: resale regressions and term handling

mod resale;

pub use resale::{net_proceeds, RegressionCoefficients, ResaleTable, ResolvedCoefficients, TermPolicy};

use crate::error::ConfigError;
use crate::vessel::InvestmentParameters;

/// Container for all projection assumptions
#[derive(Debug, Clone, Default)]
pub struct Assumptions {
    pub resale: ResaleTable,
    pub term_policy: TermPolicy,
}

impl Assumptions {
    /// Standard regression table, rejecting unsupported holding periods
    pub fn standard() -> Self {
        Self {
            resale: ResaleTable::standard(),
            term_policy: TermPolicy::Strict,
        }
    }

    pub fn with_term_policy(mut self, term_policy: TermPolicy) -> Self {
        self.term_policy = term_policy;
        self
    }

    /// Gross resale estimate for the parameters' class, term and terminal rate
    pub fn resale_price(&self, params: &InvestmentParameters) -> Result<f64, ConfigError> {
        self.resale.estimate_price(
            params.vessel_class,
            params.holding_period,
            params.terminal_rate,
            self.term_policy,
        )
    }
}
