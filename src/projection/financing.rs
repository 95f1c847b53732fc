//! Level-payment loan amortization

/// Level annual payment repaying `principal` over `term_years` at `annual_rate`
///
/// Standard annuity formula `P·r / (1 − (1+r)^−n)`; a zero rate repays
/// principal in equal installments.
pub fn annuity_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    if principal == 0.0 || term_years == 0 {
        return 0.0;
    }
    if annual_rate == 0.0 {
        return principal / term_years as f64;
    }
    principal * annual_rate / (1.0 - (1.0 + annual_rate).powf(-f64::from(term_years)))
}
