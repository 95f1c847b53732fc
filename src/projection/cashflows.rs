//! Cash flow schedule structures produced by the projector

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contributing factor of a yearly cash flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CashFlowComponent {
    Equity,
    ArrangementFee,
    Earnings,
    Opex,
    LoanPayment,
    OverhaulCost,
    NetResaleValue,
}

impl CashFlowComponent {
    pub fn label(&self) -> &'static str {
        match self {
            CashFlowComponent::Equity => "Equity",
            CashFlowComponent::ArrangementFee => "Arrangement Fee",
            CashFlowComponent::Earnings => "Earnings",
            CashFlowComponent::Opex => "Opex",
            CashFlowComponent::LoanPayment => "Loan Payment",
            CashFlowComponent::OverhaulCost => "Overhaul Cost",
            CashFlowComponent::NetResaleValue => "Net Resale Value",
        }
    }

    /// True for components that add cash to the investor
    pub fn is_inflow(&self) -> bool {
        matches!(self, CashFlowComponent::Earnings | CashFlowComponent::NetResaleValue)
    }
}

impl fmt::Display for CashFlowComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Net cash flow for one year of the holding period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowEntry {
    /// 0 = acquisition, 1..=N = operating years
    pub year: u32,
    /// Signed amount, USD (negative = outflow)
    pub amount: f64,
    /// Components in the order they were applied
    pub annotation: Vec<CashFlowComponent>,
}

impl CashFlowEntry {
    pub fn new(year: u32) -> Self {
        Self {
            year,
            amount: 0.0,
            annotation: Vec::new(),
        }
    }

    pub fn has(&self, component: CashFlowComponent) -> bool {
        self.annotation.contains(&component)
    }

    /// Annotation as text, e.g. "Earnings - Opex + Net Resale Value"
    pub fn annotation_text(&self) -> String {
        let mut text = String::new();
        for (i, component) in self.annotation.iter().enumerate() {
            let sign = if component.is_inflow() { "+" } else { "-" };
            if i == 0 {
                if !component.is_inflow() {
                    text.push('-');
                }
            } else {
                text.push(' ');
                text.push_str(sign);
                text.push(' ');
            }
            text.push_str(component.label());
        }
        text
    }
}

/// Complete projection for one investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowSchedule {
    /// Entries for years 0..=holding period
    pub entries: Vec<CashFlowEntry>,

    /// Gross resale estimate before commission
    pub resale_price: f64,

    /// Resale proceeds included in the final year
    pub net_resale_proceeds: f64,

    pub loan_amount: f64,

    /// Level annual debt service during the amortization term
    pub loan_payment: f64,
}

impl CashFlowSchedule {
    /// Signed amounts in year order, ready for the IRR solver
    pub fn amounts(&self) -> Vec<f64> {
        self.entries.iter().map(|e| e.amount).collect()
    }

    pub fn initial_outlay(&self) -> f64 {
        self.entries.first().map(|e| -e.amount).unwrap_or(0.0)
    }

    pub fn final_entry(&self) -> Option<&CashFlowEntry> {
        self.entries.last()
    }

    /// Sum of all amounts, undiscounted
    pub fn net_total(&self) -> f64 {
        self.entries.iter().map(|e| e.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_text() {
        let mut entry = CashFlowEntry::new(5);
        entry.annotation = vec![
            CashFlowComponent::Earnings,
            CashFlowComponent::Opex,
            CashFlowComponent::LoanPayment,
            CashFlowComponent::NetResaleValue,
        ];
        assert_eq!(entry.annotation_text(), "Earnings - Opex - Loan Payment + Net Resale Value");

        let mut outlay = CashFlowEntry::new(0);
        outlay.annotation = vec![CashFlowComponent::Equity, CashFlowComponent::ArrangementFee];
        assert_eq!(outlay.annotation_text(), "-Equity - Arrangement Fee");
    }

    #[test]
    fn test_schedule_totals() {
        let schedule = CashFlowSchedule {
            entries: vec![
                CashFlowEntry { year: 0, amount: -100.0, annotation: vec![CashFlowComponent::Equity] },
                CashFlowEntry { year: 1, amount: 60.0, annotation: vec![CashFlowComponent::Earnings] },
                CashFlowEntry { year: 2, amount: 70.0, annotation: vec![CashFlowComponent::Earnings] },
            ],
            resale_price: 0.0,
            net_resale_proceeds: 0.0,
            loan_amount: 0.0,
            loan_payment: 0.0,
        };
        assert_eq!(schedule.amounts(), vec![-100.0, 60.0, 70.0]);
        assert_eq!(schedule.initial_outlay(), 100.0);
        assert_eq!(schedule.net_total(), 30.0);
        assert_eq!(schedule.final_entry().map(|e| e.year), Some(2));
    }
}
