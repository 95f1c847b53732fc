use std::path::PathBuf;

use approx::assert_abs_diff_eq;
use vessel_irr::{
    config::RunConfig,
    projection::CashFlowComponent,
    vessel::{load_parameters, load_scenarios},
};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(name)
}

#[test]
fn sample_scenarios_all_solve() {
    let scenarios = load_scenarios(data("scenarios.csv")).expect("load scenarios");
    assert_eq!(scenarios.len(), 4);

    let evaluator = RunConfig::default().evaluator();
    let outcomes = evaluator.evaluate_batch(&scenarios);

    let expected = [
        ("suezmax_5y_cash", 15.417_178),
        ("suezmax_10y_levered", 13.959_727),
        ("aframax_5y_levered", 21.907_281),
        ("aframax_10y_cash", 12.160_723),
    ];
    for (outcome, (name, irr)) in outcomes.iter().zip(expected) {
        assert_eq!(outcome.name, name);
        let evaluation = outcome.result.as_ref().expect("valid scenario");
        assert_abs_diff_eq!(evaluation.irr.expect("irr converges"), irr, epsilon = 1e-4);
    }
}

#[test]
fn sample_json_matches_csv_row() {
    let params = load_parameters(data("reference_case.json")).expect("load json");
    let csv_params = load_scenarios(data("scenarios.csv")).expect("load scenarios")[1]
        .parameters
        .clone();
    assert_eq!(params, csv_params);

    let evaluation = RunConfig::from_json_path(data("run_config.json"))
        .expect("load config")
        .evaluator()
        .evaluate(&params)
        .expect("valid parameters");

    let schedule = &evaluation.schedule;
    assert_eq!(schedule.entries.len(), 11);
    assert!(schedule.entries[5].has(CashFlowComponent::OverhaulCost));
    assert!(!schedule.entries[8].has(CashFlowComponent::LoanPayment));
    assert!(schedule.entries[10].amount > 0.0);
}
