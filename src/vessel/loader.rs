//! Load investment parameter sets from JSON documents or flat CSV rows

use csv::Reader;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{EarningsBand, Financing, InvestmentParameters, Overhaul, VesselClass};
use crate::error::LoadError;

/// A named parameter set, one per CSV row
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioInput {
    pub name: String,
    pub parameters: InvestmentParameters,
}

/// Raw CSV row mirroring the input form's fields
#[derive(Debug, Deserialize)]
struct CsvRow {
    scenario: String,
    vessel_class: String,
    holding_period: u32,
    purchase_price: f64,
    opex_per_day: f64,
    opex_growth: f64,
    overhaul_cost: Option<f64>,
    overhaul_year: Option<u32>,
    terminal_rate: f64,
    earnings_1_3: f64,
    earnings_4_5: f64,
    earnings_6_10: Option<f64>,
    loan_fraction: Option<f64>,
    interest_rate: Option<f64>,
    arrangement_fee: Option<f64>,
    amortization_years: Option<u32>,
    sale_commission: Option<f64>,
}

impl CsvRow {
    fn into_scenario(self, row: usize) -> Result<ScenarioInput, LoadError> {
        let vessel_class = VesselClass::from_label(&self.vessel_class).ok_or_else(|| {
            LoadError::InvalidRow {
                row,
                reason: format!("unknown vessel class: {}", self.vessel_class),
            }
        })?;

        let mut earnings = vec![
            EarningsBand::new(1, 3, self.earnings_1_3),
            EarningsBand::new(4, 5, self.earnings_4_5),
        ];
        if let Some(rate) = self.earnings_6_10 {
            earnings.push(EarningsBand::new(6, 10, rate));
        }

        let overhaul = self.overhaul(row)?;
        let financing = self.financing(row)?;

        Ok(ScenarioInput {
            name: self.scenario,
            parameters: InvestmentParameters {
                vessel_class,
                holding_period: self.holding_period,
                purchase_price: self.purchase_price,
                opex_per_day: self.opex_per_day,
                opex_growth: self.opex_growth,
                overhaul,
                earnings,
                terminal_rate: self.terminal_rate,
                financing,
                sale_commission: self.sale_commission.unwrap_or(0.0),
            },
        })
    }

    /// Year 0 or an empty year means no overhaul; any other year needs a cost.
    /// Values are passed through as given and checked by `validate`.
    fn overhaul(&self, row: usize) -> Result<Option<Overhaul>, LoadError> {
        match (self.overhaul_cost, self.overhaul_year) {
            (Some(cost), Some(year)) if year > 0 => Ok(Some(Overhaul { cost, year })),
            (None, Some(year)) if year > 0 => {
                Err(invalid(row, "overhaul_year given without overhaul_cost"))
            }
            (Some(cost), _) if cost != 0.0 => {
                Err(invalid(row, "overhaul_cost given without overhaul_year"))
            }
            _ => Ok(None),
        }
    }

    /// An empty loan_fraction means unfinanced. A nonzero fraction must come
    /// with an interest rate and an amortization term; the fee defaults to 0.
    fn financing(&self, row: usize) -> Result<Financing, LoadError> {
        let Some(loan_fraction) = self.loan_fraction else {
            let orphaned = self.interest_rate.is_some()
                || self.arrangement_fee.is_some()
                || self.amortization_years.is_some();
            if orphaned {
                return Err(invalid(row, "loan terms given without loan_fraction"));
            }
            return Ok(Financing::none());
        };

        let unfinanced = Financing::none();
        let interest_rate = match self.interest_rate {
            Some(rate) => rate,
            None if loan_fraction == 0.0 => unfinanced.interest_rate,
            None => return Err(invalid(row, "loan_fraction given without interest_rate")),
        };
        let amortization_years = match self.amortization_years {
            Some(term) => term,
            None if loan_fraction == 0.0 => unfinanced.amortization_years,
            None => return Err(invalid(row, "loan_fraction given without amortization_years")),
        };

        Ok(Financing {
            loan_fraction,
            interest_rate,
            arrangement_fee: self.arrangement_fee.unwrap_or(0.0),
            amortization_years,
        })
    }
}

fn invalid(row: usize, reason: &str) -> LoadError {
    LoadError::InvalidRow { row, reason: reason.to_string() }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioInput>, LoadError> {
    let file = File::open(path)?;
    load_scenarios_from_reader(file)
}

/// Load scenarios from any reader (e.g. string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ScenarioInput>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Header is line 1
        scenarios.push(row.into_scenario(idx + 2)?);
    }

    Ok(scenarios)
}

/// Load a single parameter set from a JSON file
pub fn load_parameters<P: AsRef<Path>>(path: P) -> Result<InvestmentParameters, LoadError> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}
