//! Core projection engine for yearly vessel investment cash flows

use log::{debug, warn};

use super::cashflows::{CashFlowComponent, CashFlowEntry, CashFlowSchedule};
use super::financing::annuity_payment;
use crate::assumptions::{net_proceeds, Assumptions};
use crate::error::ConfigError;
use crate::vessel::InvestmentParameters;

/// Days of earnings and opex per year
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Project cash flows under the standard assumptions (strict holding periods)
pub fn project_cash_flows(params: &InvestmentParameters) -> Result<CashFlowSchedule, ConfigError> {
    CashFlowProjector::new(Assumptions::standard()).project(params)
}

/// Builds the year 0..=N cash flow schedule for an investment
#[derive(Debug, Clone, Default)]
pub struct CashFlowProjector {
    assumptions: Assumptions,
}

/// Per-investment amounts fixed before the yearly loop
struct Terms {
    loan_payment: f64,
    amortization_years: u32,
    net_resale: f64,
}

impl CashFlowProjector {
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    /// Validate the parameters, then project every year of the holding period
    pub fn project(&self, params: &InvestmentParameters) -> Result<CashFlowSchedule, ConfigError> {
        params.validate()?;
        let resale_price = self.assumptions.resale_price(params)?;
        if resale_price < 0.0 {
            warn!(
                "Resale regression gives a negative price ({:.0}) at terminal rate {}",
                resale_price, params.terminal_rate
            );
        }

        let financing = &params.financing;
        let loan_amount = financing.loan_amount(params.purchase_price);
        let terms = Terms {
            loan_payment: annuity_payment(loan_amount, financing.interest_rate, financing.amortization_years),
            amortization_years: financing.amortization_years,
            net_resale: net_proceeds(resale_price, params.sale_commission),
        };

        let mut entries = Vec::with_capacity(params.holding_period as usize + 1);
        entries.push(self.acquisition_entry(params));

        // Compounded once per year transition, never recomputed from a power
        let mut annual_opex = params.opex_per_day * DAYS_PER_YEAR;
        for year in 1..=params.holding_period {
            entries.push(self.calculate_year(params, &terms, year, annual_opex)?);
            annual_opex *= 1.0 + params.opex_growth;
        }

        debug!(
            "Projected {} years for {:?}: outlay {:.0}, loan {:.0} at {:.0}/yr, net resale {:.0}",
            params.holding_period,
            params.vessel_class,
            -entries[0].amount,
            loan_amount,
            terms.loan_payment,
            terms.net_resale
        );

        Ok(CashFlowSchedule {
            entries,
            resale_price,
            net_resale_proceeds: terms.net_resale,
            loan_amount,
            loan_payment: terms.loan_payment,
        })
    }

    /// Year 0: equity plus arrangement fee, paid out
    fn acquisition_entry(&self, params: &InvestmentParameters) -> CashFlowEntry {
        let financing = &params.financing;
        let mut entry = CashFlowEntry::new(0);

        entry.amount = -(financing.equity(params.purchase_price) + financing.arrangement_fee);
        entry.annotation.push(CashFlowComponent::Equity);
        if financing.arrangement_fee > 0.0 {
            entry.annotation.push(CashFlowComponent::ArrangementFee);
        }
        entry
    }

    /// Net result for one operating year
    fn calculate_year(
        &self,
        params: &InvestmentParameters,
        terms: &Terms,
        year: u32,
        annual_opex: f64,
    ) -> Result<CashFlowEntry, ConfigError> {
        let mut entry = CashFlowEntry::new(year);

        let earnings = params.daily_earnings(year)? * DAYS_PER_YEAR;
        entry.amount = earnings - annual_opex;
        entry.annotation.push(CashFlowComponent::Earnings);
        entry.annotation.push(CashFlowComponent::Opex);

        if terms.loan_payment > 0.0 && year <= terms.amortization_years {
            entry.amount -= terms.loan_payment;
            entry.annotation.push(CashFlowComponent::LoanPayment);
        }

        if let Some(cost) = params.overhaul_cost_in(year) {
            entry.amount -= cost;
            entry.annotation.push(CashFlowComponent::OverhaulCost);
        }

        if year == params.holding_period {
            entry.amount += terms.net_resale;
            entry.annotation.push(CashFlowComponent::NetResaleValue);
        }

        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::TermPolicy;
    use crate::vessel::{EarningsBand, Financing, Overhaul};
    use approx::assert_relative_eq;

    fn financed() -> InvestmentParameters {
        let mut params = InvestmentParameters::reference_case();
        params.financing = Financing {
            loan_fraction: 0.6,
            interest_rate: 0.05,
            arrangement_fee: 300_000.0,
            amortization_years: 3,
        };
        params
    }

    #[test]
    fn test_unfinanced_outlay_is_purchase_price() {
        let params = InvestmentParameters::reference_case();
        let schedule = project_cash_flows(&params).unwrap();

        assert_eq!(schedule.entries.len(), 6);
        assert_eq!(schedule.entries[0].amount, -params.purchase_price);
        assert_eq!(schedule.entries[0].annotation, vec![CashFlowComponent::Equity]);
        assert_eq!(schedule.loan_amount, 0.0);
    }

    #[test]
    fn test_reference_case_amounts() {
        let schedule = project_cash_flows(&InvestmentParameters::reference_case()).unwrap();
        let opex1 = 10_000.0 * 365.0;

        assert_relative_eq!(schedule.entries[1].amount, 25_000.0 * 365.0 - opex1);
        assert_relative_eq!(
            schedule.entries[4].amount,
            27_000.0 * 365.0 - opex1 * 1.02 * 1.02 * 1.02,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            schedule.entries[5].amount,
            27_000.0 * 365.0 - opex1 * 1.02_f64.powi(4) + 64_479_450.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_financed_outlay_and_debt_service() {
        let params = financed();
        let schedule = project_cash_flows(&params).unwrap();

        assert_relative_eq!(schedule.entries[0].amount, -(50_000_000.0 * 0.4 + 300_000.0));
        assert_eq!(
            schedule.entries[0].annotation,
            vec![CashFlowComponent::Equity, CashFlowComponent::ArrangementFee]
        );
        assert_relative_eq!(schedule.loan_amount, 30_000_000.0);
        assert_relative_eq!(
            schedule.loan_payment,
            annuity_payment(30_000_000.0, 0.05, 3),
            max_relative = 1e-12
        );

        for entry in &schedule.entries[1..] {
            assert_eq!(entry.has(CashFlowComponent::LoanPayment), entry.year <= 3);
        }

        let unfinanced = project_cash_flows(&InvestmentParameters::reference_case()).unwrap();
        assert_relative_eq!(
            unfinanced.entries[2].amount - schedule.entries[2].amount,
            schedule.loan_payment,
            max_relative = 1e-9
        );
        assert_eq!(unfinanced.entries[4].amount, schedule.entries[4].amount);
    }

    #[test]
    fn test_zero_loan_fraction_matches_unfinanced() {
        let mut params = InvestmentParameters::reference_case();
        params.financing = Financing {
            loan_fraction: 0.0,
            interest_rate: 0.07,
            arrangement_fee: 0.0,
            amortization_years: 5,
        };
        let a = project_cash_flows(&params).unwrap();
        let b = project_cash_flows(&InvestmentParameters::reference_case()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_opex_grows_geometrically() {
        let mut params = InvestmentParameters::reference_case();
        params.holding_period = 10;
        params.opex_growth = 0.035;
        params.earnings = vec![EarningsBand::new(1, 10, 0.0)];
        params.sale_commission = 1.0;

        let schedule = project_cash_flows(&params).unwrap();
        let opex1 = params.opex_per_day * DAYS_PER_YEAR;
        for entry in &schedule.entries[1..] {
            let expected = opex1 * (1.0 + params.opex_growth).powi(entry.year as i32 - 1);
            assert_relative_eq!(-entry.amount, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_full_commission_zeroes_resale() {
        let mut params = InvestmentParameters::reference_case();
        params.sale_commission = 1.0;
        let schedule = project_cash_flows(&params).unwrap();

        assert_eq!(schedule.net_resale_proceeds, 0.0);
        let last = schedule.final_entry().unwrap();
        assert!(last.has(CashFlowComponent::NetResaleValue));
        assert_relative_eq!(
            last.amount,
            27_000.0 * 365.0 - 10_000.0 * 365.0 * 1.02_f64.powi(4),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_overhaul_only_in_its_year() {
        let mut params = InvestmentParameters::reference_case();
        params.overhaul = Some(Overhaul { cost: 2_000_000.0, year: 3 });
        let with = project_cash_flows(&params).unwrap();
        let without = project_cash_flows(&InvestmentParameters::reference_case()).unwrap();

        for entry in &with.entries {
            assert_eq!(entry.has(CashFlowComponent::OverhaulCost), entry.year == 3);
        }
        assert_relative_eq!(
            without.entries[3].amount - with.entries[3].amount,
            2_000_000.0,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_zero_cost_overhaul_leaves_schedule_unchanged() {
        let mut params = InvestmentParameters::reference_case();
        params.overhaul = Some(Overhaul { cost: 0.0, year: 3 });
        let with = project_cash_flows(&params).unwrap();
        let without = project_cash_flows(&InvestmentParameters::reference_case()).unwrap();

        assert!(with.entries.iter().all(|e| !e.has(CashFlowComponent::OverhaulCost)));
        assert_eq!(with.amounts(), without.amounts());
        assert_eq!(with.entries[3].annotation, without.entries[3].annotation);
    }

    #[test]
    fn test_annotation_order_in_final_year() {
        let mut params = financed();
        params.financing.amortization_years = 5;
        params.overhaul = Some(Overhaul { cost: 1_500_000.0, year: 5 });
        let schedule = project_cash_flows(&params).unwrap();

        assert_eq!(
            schedule.entries[5].annotation,
            vec![
                CashFlowComponent::Earnings,
                CashFlowComponent::Opex,
                CashFlowComponent::LoanPayment,
                CashFlowComponent::OverhaulCost,
                CashFlowComponent::NetResaleValue,
            ]
        );
    }

    #[test]
    fn test_projection_is_idempotent() {
        let params = financed();
        let a = project_cash_flows(&params).unwrap();
        let b = project_cash_flows(&params).unwrap();

        let bits = |s: &CashFlowSchedule| s.amounts().iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_parameters_rejected_before_projection() {
        let mut params = InvestmentParameters::reference_case();
        params.earnings.pop();
        assert_eq!(project_cash_flows(&params), Err(ConfigError::EarningsGap(4)));
    }

    #[test]
    fn test_unsupported_term_strict_and_fallback() {
        let mut params = InvestmentParameters::reference_case();
        params.holding_period = 7;
        params.earnings.push(EarningsBand::new(6, 10, 29_000.0));

        assert!(matches!(
            project_cash_flows(&params),
            Err(ConfigError::UnsupportedHoldingPeriod { years: 7, .. })
        ));

        let projector =
            CashFlowProjector::new(Assumptions::standard().with_term_policy(TermPolicy::FallbackToLongest));
        let schedule = projector.project(&params).unwrap();
        assert_eq!(schedule.entries.len(), 8);
        // Ten-year Suezmax fit: -15.61 + 0.002164 * 30000
        assert_relative_eq!(schedule.resale_price, 49_310_000.0, max_relative = 1e-12);
    }
}
