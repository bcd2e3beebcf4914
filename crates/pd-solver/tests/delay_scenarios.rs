//! Integration tests: delayed vector fields driven through the full
//! adaptive loop.

use nalgebra::DVector;
use pd_solver::{
    DelayModel, History, Lag, SolveOptions, SolveResult, SolverError, StateComponent, solve,
};

const SCALAR: [StateComponent; 1] = [StateComponent {
    name: "y",
    non_negative: false,
}];

/// dy/dt = y(t - 5): pure echo of the trajectory five time units back.
struct EchoLag {
    lag: Lag,
}

impl DelayModel for EchoLag {
    fn components(&self) -> &[StateComponent] {
        &SCALAR
    }

    fn start_time(&self) -> f64 {
        0.0
    }

    fn initial_state(&self) -> DVector<f64> {
        DVector::from_vec(vec![1.0])
    }

    fn rhs(&self, t: f64, y: &DVector<f64>, past: &History) -> SolveResult<DVector<f64>> {
        let lag_t = self.lag.lag_time(t, y)?;
        let lagged = past.sample(lag_t)?;
        Ok(DVector::from_vec(vec![lagged[0]]))
    }
}

/// Closed form of the echo system with constant pre-start history 1:
/// y = 1 + t on [0, 5], then y = t^2/2 - 4t + 13.5 on [5, 10].
fn echo_exact(t: f64) -> f64 {
    if t <= 5.0 {
        1.0 + t
    } else {
        t * t / 2.0 - 4.0 * t + 13.5
    }
}

#[test]
fn fixed_lag_echo_matches_closed_form() {
    let model = EchoLag {
        lag: Lag::Fixed(5.0),
    };
    // the committed end point carries only integration error; interior
    // report times add O(max_dt^2) linear-interpolation error on the
    // quadratic stretch
    let opts = SolveOptions {
        t_end: 10.0,
        max_dt: 0.05,
        ..Default::default()
    };
    let run = solve(&model, &opts).unwrap();
    assert!(run.is_complete(), "{:?}", run.diagnostics.failure);

    let y_end = run.sample(10.0).unwrap()[0];
    assert!((y_end - echo_exact(10.0)).abs() < 1e-6, "got {y_end}");

    for t in [2.5, 5.0, 7.5] {
        let y = run.sample(t).unwrap()[0];
        let exact = echo_exact(t);
        assert!(
            (y - exact).abs() < 1e-3,
            "t={t}: got {y}, expected {exact}"
        );
    }
}

#[test]
fn lagged_term_echoes_recorded_history() {
    // once t > 5 the derivative must reproduce the state stored at t - 5
    let model = EchoLag {
        lag: Lag::Fixed(5.0),
    };
    let opts = SolveOptions {
        t_end: 10.0,
        max_dt: 0.05,
        ..Default::default()
    };
    let run = solve(&model, &opts).unwrap();

    for t in [6.0, 8.0, 9.5] {
        let y = run.sample(t).unwrap();
        let dy = model.rhs(t, &y, &run.history).unwrap();
        let lagged = run.sample(t - 5.0).unwrap();
        assert!((dy[0] - lagged[0]).abs() < 1e-12);
    }
}

#[test]
fn identical_runs_commit_identical_histories() {
    let model = EchoLag {
        lag: Lag::Fixed(5.0),
    };
    let opts = SolveOptions {
        t_end: 10.0,
        ..Default::default()
    };
    let a = solve(&model, &opts).unwrap();
    let b = solve(&model, &opts).unwrap();

    assert_eq!(a.history.len(), b.history.len());
    for ((ta, ya), (tb, yb)) in a.history.iter().zip(b.history.iter()) {
        assert_eq!(ta, tb);
        assert_eq!(ya, yb);
    }
}

/// A vector field that asks for the unresolved future.
struct FutureProbe;

impl DelayModel for FutureProbe {
    fn components(&self) -> &[StateComponent] {
        &SCALAR
    }

    fn start_time(&self) -> f64 {
        0.0
    }

    fn initial_state(&self) -> DVector<f64> {
        DVector::from_vec(vec![1.0])
    }

    fn rhs(&self, t: f64, _y: &DVector<f64>, past: &History) -> SolveResult<DVector<f64>> {
        let ahead = past.sample(t + 1.0)?;
        Ok(DVector::from_vec(vec![ahead[0]]))
    }
}

#[test]
fn future_query_aborts_and_names_the_time() {
    let model = FutureProbe;
    let opts = SolveOptions {
        t_end: 10.0,
        ..Default::default()
    };
    let run = solve(&model, &opts).unwrap();

    assert!(!run.is_complete());
    match &run.diagnostics.failure {
        Some(SolverError::FutureQuery { t, t_last }) => {
            // the very first evaluation at t0 = 0 asked for t0 + 1
            assert_eq!(*t, 1.0);
            assert_eq!(*t_last, 0.0);
        }
        other => panic!("expected FutureQuery, got {other:?}"),
    }
    // committed history is preserved, truncated at the failure point
    assert_eq!(run.history.len(), 1);
    assert_eq!(run.diagnostics.final_time, 0.0);
}

/// State-dependent lag read from a second component that is driven
/// negative, sending the lagged time into the future.
struct RunawayLag;

const RUNAWAY_COMPONENTS: [StateComponent; 2] = [
    StateComponent {
        name: "y",
        non_negative: false,
    },
    StateComponent {
        name: "tau",
        non_negative: true,
    },
];

impl DelayModel for RunawayLag {
    fn components(&self) -> &[StateComponent] {
        &RUNAWAY_COMPONENTS
    }

    fn start_time(&self) -> f64 {
        0.0
    }

    fn initial_state(&self) -> DVector<f64> {
        DVector::from_vec(vec![1.0, 0.5])
    }

    fn rhs(&self, t: f64, y: &DVector<f64>, past: &History) -> SolveResult<DVector<f64>> {
        let lag = Lag::FromComponent(1);
        let lagged = past.sample(lag.lag_time(t, y)?)?;
        // tau decays through zero; once negative, lag_time > t
        Ok(DVector::from_vec(vec![lagged[0], -1.0]))
    }
}

#[test]
fn runaway_delay_state_fails_as_future_query() {
    let model = RunawayLag;
    let opts = SolveOptions {
        t_end: 5.0,
        max_dt: 0.25,
        ..Default::default()
    };
    let run = solve(&model, &opts).unwrap();

    assert!(!run.is_complete());
    assert!(matches!(
        run.diagnostics.failure,
        Some(SolverError::FutureQuery { .. })
    ));
    // the committed prefix stops short of where tau crossed zero
    assert!(run.diagnostics.final_time < 0.75);
}
