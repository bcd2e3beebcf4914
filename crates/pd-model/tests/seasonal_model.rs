//! Integration tests: full species profiles under seasonal forcing.

use pd_model::{ADULTS, AgeStructuredModel, DELAY, JUVENILES, SURVIVAL};
use pd_rates::{CompetitionForm, DensityDependence, SeasonalForcing, SpeciesParams, VitalRates};
use pd_solver::{SolveOptions, solve};

fn seasonal_model(params: SpeciesParams) -> AgeStructuredModel {
    let forcing = SeasonalForcing::steady(params.climate);
    let rates = VitalRates::new(
        params,
        forcing,
        CompetitionForm::Unimodal,
        DensityDependence::Fecundity,
    )
    .unwrap();
    AgeStructuredModel::new(rates)
}

fn two_year_opts() -> SolveOptions {
    SolveOptions {
        t_end: 730.0,
        ..Default::default()
    }
}

#[test]
fn mediterranean_profile_runs_two_years() {
    let model = seasonal_model(SpeciesParams::mediterranean());
    let run = solve(&model, &two_year_opts()).unwrap();
    assert!(run.is_complete(), "{:?}", run.diagnostics.failure);
    assert_eq!(run.diagnostics.final_time, 730.0);

    let y = run.sample(730.0).unwrap();
    for i in [JUVENILES, ADULTS, SURVIVAL, DELAY] {
        assert!(y[i].is_finite());
    }
    // development is never instantaneous, and winters stretch it far out
    assert!(y[DELAY] > 1.0 && y[DELAY] < 1000.0, "delay {}", y[DELAY]);
}

#[test]
fn tropical_profile_runs_two_years() {
    let model = seasonal_model(SpeciesParams::tropical());
    let run = solve(&model, &two_year_opts()).unwrap();
    assert!(run.is_complete(), "{:?}", run.diagnostics.failure);
    let y = run.sample(730.0).unwrap();
    assert!(y[DELAY] > 1.0 && y[DELAY].is_finite());
}

#[test]
fn seasonal_runs_are_reproducible() {
    let model = seasonal_model(SpeciesParams::mediterranean());
    let opts = SolveOptions {
        t_end: 100.0,
        ..Default::default()
    };
    let a = solve(&model, &opts).unwrap();
    let b = solve(&model, &opts).unwrap();

    assert_eq!(a.history.len(), b.history.len());
    for ((ta, ya), (tb, yb)) in a.history.iter().zip(b.history.iter()) {
        assert_eq!(ta, tb);
        assert_eq!(ya, yb);
    }
    assert_eq!(
        a.diagnostics.steps_rejected,
        b.diagnostics.steps_rejected
    );
}

#[test]
fn warming_ramp_completes() {
    let params = SpeciesParams::mediterranean();
    let forcing = SeasonalForcing::new(params.climate, 3.0, 0.0, 2.0).unwrap();
    let rates = VitalRates::new(
        params,
        forcing,
        CompetitionForm::Unimodal,
        DensityDependence::Fecundity,
    )
    .unwrap();
    let model = AgeStructuredModel::new(rates);

    let run = solve(&model, &two_year_opts()).unwrap();
    assert!(run.is_complete(), "{:?}", run.diagnostics.failure);
}

#[test]
fn report_cadence_is_independent_of_step_times() {
    let model = seasonal_model(SpeciesParams::mediterranean());
    let opts = SolveOptions {
        t_end: 30.0,
        max_dt: 0.5,
        ..Default::default()
    };
    let run = solve(&model, &opts).unwrap();

    let report_times: Vec<f64> = (0..=30).map(|d| d as f64).collect();
    let series = run.history.sample_series(&report_times).unwrap();
    assert_eq!(series.len(), 31);
    assert!(series.iter().all(|(_, y)| y.len() == 4));
    // daily cadence is coarser than the committed step train
    assert!(run.history.len() > series.len());
}
