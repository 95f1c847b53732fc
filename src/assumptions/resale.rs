//! Resale (disposal) price regression by vessel class and holding period

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ConfigError;
use crate::vessel::VesselClass;

const USD_PER_MILLION: f64 = 1_000_000.0;

/// Linear fit of resale price (USD millions) against the terminal daily rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionCoefficients {
    pub intercept_millions: f64,
    pub slope_millions_per_usd_day: f64,
}

impl RegressionCoefficients {
    pub const fn new(intercept_millions: f64, slope_millions_per_usd_day: f64) -> Self {
        Self { intercept_millions, slope_millions_per_usd_day }
    }

    /// Estimated price in USD for a terminal daily rate
    pub fn price(&self, terminal_rate: f64) -> f64 {
        (self.intercept_millions + self.slope_millions_per_usd_day * terminal_rate) * USD_PER_MILLION
    }
}

/// How to treat a holding period with no fitted regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermPolicy {
    /// Reject unsupported terms as a configuration error
    #[default]
    Strict,
    /// Reuse the longest fitted term for the class, with a warning
    FallbackToLongest,
}

/// Coefficients chosen for a request, with the term they were fitted for
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCoefficients {
    pub coefficients: RegressionCoefficients,
    pub fitted_term: u32,
    pub requested_term: u32,
}

impl ResolvedCoefficients {
    pub fn is_fallback(&self) -> bool {
        self.fitted_term != self.requested_term
    }
}

/// Immutable table of regression fits keyed by (class, holding period)
#[derive(Debug, Clone, PartialEq)]
pub struct ResaleTable {
    fits: BTreeMap<(VesselClass, u32), RegressionCoefficients>,
}

impl ResaleTable {
    /// Fits for 5- and 10-year holds of both tanker classes
    pub fn standard() -> Self {
        Self::from_entries([
            ((VesselClass::ClassA, 5), RegressionCoefficients::new(-2.055e-2, 2.150e-3)),
            ((VesselClass::ClassA, 10), RegressionCoefficients::new(-15.61, 2.164e-3)),
            ((VesselClass::ClassB, 5), RegressionCoefficients::new(-0.3278, 2.016e-3)),
            ((VesselClass::ClassB, 10), RegressionCoefficients::new(-11.22, 1.915e-3)),
        ])
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = ((VesselClass, u32), RegressionCoefficients)>,
    {
        Self { fits: entries.into_iter().collect() }
    }

    /// Holding periods with a fitted regression for `class`, ascending
    pub fn supported_terms(&self, class: VesselClass) -> Vec<u32> {
        self.fits
            .keys()
            .filter(|(c, _)| *c == class)
            .map(|&(_, term)| term)
            .collect()
    }

    /// Select coefficients for a class and holding period under `policy`
    pub fn coefficients(
        &self,
        class: VesselClass,
        years: u32,
        policy: TermPolicy,
    ) -> Result<ResolvedCoefficients, ConfigError> {
        if let Some(&coefficients) = self.fits.get(&(class, years)) {
            return Ok(ResolvedCoefficients { coefficients, fitted_term: years, requested_term: years });
        }

        let longest = self.fits.range((class, 0)..=(class, u32::MAX)).next_back();
        match (policy, longest) {
            (TermPolicy::FallbackToLongest, Some((&(_, fitted_term), &coefficients))) => {
                warn!(
                    "No resale regression for {:?} held {} years; using the {}-year fit",
                    class, years, fitted_term
                );
                Ok(ResolvedCoefficients { coefficients, fitted_term, requested_term: years })
            }
            _ => Err(ConfigError::UnsupportedHoldingPeriod {
                class,
                years,
                supported: self.supported_terms(class),
            }),
        }
    }

    /// Estimated gross resale price in USD
    pub fn estimate_price(
        &self,
        class: VesselClass,
        years: u32,
        terminal_rate: f64,
        policy: TermPolicy,
    ) -> Result<f64, ConfigError> {
        Ok(self.coefficients(class, years, policy)?.coefficients.price(terminal_rate))
    }
}

impl Default for ResaleTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Resale proceeds after broker commission
pub fn net_proceeds(price: f64, commission: f64) -> f64 {
    price * (1.0 - commission)
}
