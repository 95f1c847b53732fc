//! Investment parameter structures for a single vessel acquisition

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Vessel class used to select the resale regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum VesselClass {
    /// Suezmax tanker
    #[serde(alias = "Suezmax", alias = "suezmax")]
    ClassA,
    /// Aframax tanker
    #[serde(alias = "Aframax", alias = "aframax")]
    ClassB,
}

impl VesselClass {
    /// Parse the class names accepted in flat (CSV) input
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "classa" | "suezmax" => Some(VesselClass::ClassA),
            "classb" | "aframax" => Some(VesselClass::ClassB),
            _ => None,
        }
    }
}

/// Projected daily charter earnings for an inclusive range of years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EarningsBand {
    pub first_year: u32,
    pub last_year: u32,
    /// USD per day
    pub daily_rate: f64,
}

impl EarningsBand {
    pub fn new(first_year: u32, last_year: u32, daily_rate: f64) -> Self {
        Self { first_year, last_year, daily_rate }
    }

    pub fn contains(&self, year: u32) -> bool {
        year >= self.first_year && year <= self.last_year
    }
}

/// One-time overhaul (dry dock) expenditure
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overhaul {
    pub cost: f64,
    /// 1-indexed year of the holding period in which the cost falls
    pub year: u32,
}

/// Acquisition financing terms
///
/// An unfinanced purchase is the `Financing::none()` case of the same model.
/// A financing object in input must state fraction, rate and term; only the
/// fee may be omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Financing {
    /// Share of the purchase price borrowed, in [0, 1]
    pub loan_fraction: f64,
    /// Annual interest rate as a fraction
    pub interest_rate: f64,
    /// Arrangement fee paid up front, USD
    #[serde(default)]
    pub arrangement_fee: f64,
    /// Years over which the loan is repaid in level annual payments
    pub amortization_years: u32,
}

impl Financing {
    pub fn none() -> Self {
        Self {
            loan_fraction: 0.0,
            interest_rate: 0.0,
            arrangement_fee: 0.0,
            amortization_years: 1,
        }
    }

    pub fn loan_amount(&self, purchase_price: f64) -> f64 {
        purchase_price * self.loan_fraction
    }

    /// Equity contributed at year 0
    pub fn equity(&self, purchase_price: f64) -> f64 {
        purchase_price * (1.0 - self.loan_fraction)
    }
}

impl Default for Financing {
    fn default() -> Self {
        Self::none()
    }
}

/// Caller-supplied assumptions for one investment evaluation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    pub vessel_class: VesselClass,
    /// Holding period in years
    pub holding_period: u32,
    /// Purchase price, USD
    pub purchase_price: f64,
    /// Operating cost per day in year 1, USD
    pub opex_per_day: f64,
    /// Annual opex growth as a fraction (0.02 = 2%)
    pub opex_growth: f64,
    #[serde(default)]
    pub overhaul: Option<Overhaul>,
    /// Daily earnings bands; must cover years 1..=holding_period exactly once
    pub earnings: Vec<EarningsBand>,
    /// Reference daily charter rate at sale, input to the resale regression
    pub terminal_rate: f64,
    #[serde(default)]
    pub financing: Financing,
    /// Broker commission on the resale, as a fraction
    #[serde(default)]
    pub sale_commission: f64,
}

impl InvestmentParameters {
    /// Reference case: five-year unfinanced Suezmax at 50M
    pub fn reference_case() -> Self {
        Self {
            vessel_class: VesselClass::ClassA,
            holding_period: 5,
            purchase_price: 50_000_000.0,
            opex_per_day: 10_000.0,
            opex_growth: 0.02,
            overhaul: None,
            earnings: vec![
                EarningsBand::new(1, 3, 25_000.0),
                EarningsBand::new(4, 5, 27_000.0),
            ],
            terminal_rate: 30_000.0,
            financing: Financing::none(),
            sale_commission: 0.0,
        }
    }

    /// Check every parameter invariant, returning the first violation
    pub fn validate(&self) -> Result<(), ConfigError> {
        let n = self.holding_period;
        if n == 0 {
            return Err(ConfigError::ZeroHoldingPeriod);
        }
        if !(self.purchase_price.is_finite() && self.purchase_price > 0.0) {
            return Err(ConfigError::InvalidPurchasePrice(self.purchase_price));
        }

        non_negative("opex_per_day", self.opex_per_day)?;
        non_negative("opex_growth", self.opex_growth)?;
        non_negative("terminal_rate", self.terminal_rate)?;
        non_negative("sale_commission", self.sale_commission)?;
        non_negative("interest_rate", self.financing.interest_rate)?;
        non_negative("arrangement_fee", self.financing.arrangement_fee)?;
        non_negative("loan_fraction", self.financing.loan_fraction)?;

        if self.sale_commission > 1.0 {
            return Err(ConfigError::CommissionOutOfRange(self.sale_commission));
        }
        if self.financing.loan_fraction > 1.0 {
            return Err(ConfigError::LoanFractionOutOfRange(self.financing.loan_fraction));
        }

        let term = self.financing.amortization_years;
        if term == 0 || term > n {
            return Err(ConfigError::AmortizationTermOutOfRange { term, holding_period: n });
        }

        if let Some(overhaul) = &self.overhaul {
            non_negative("overhaul_cost", overhaul.cost)?;
            if overhaul.year == 0 || overhaul.year > n {
                return Err(ConfigError::OverhaulYearOutOfRange {
                    year: overhaul.year,
                    holding_period: n,
                });
            }
        }

        for band in &self.earnings {
            if band.first_year == 0 || band.first_year > band.last_year {
                return Err(ConfigError::InvalidEarningsBand {
                    first_year: band.first_year,
                    last_year: band.last_year,
                });
            }
            non_negative("earnings daily_rate", band.daily_rate)?;
        }
        for year in 1..=n {
            self.daily_earnings(year)?;
        }

        Ok(())
    }

    /// Daily earnings for `year`, from the single band that covers it
    pub fn daily_earnings(&self, year: u32) -> Result<f64, ConfigError> {
        let mut covering = self.earnings.iter().filter(|b| b.contains(year));
        match (covering.next(), covering.next()) {
            (Some(band), None) => Ok(band.daily_rate),
            (None, _) => Err(ConfigError::EarningsGap(year)),
            (Some(_), Some(_)) => Err(ConfigError::EarningsOverlap(year)),
        }
    }

    /// Overhaul cost falling in `year`, if any; a zero-cost overhaul is no adjustment
    pub fn overhaul_cost_in(&self, year: u32) -> Option<f64> {
        self.overhaul
            .filter(|o| o.year == year && o.cost > 0.0)
            .map(|o| o.cost)
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeValue { field, value })
    }
}
