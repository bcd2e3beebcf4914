//! Adaptive embedded-pair integration loop.
//!
//! Dormand-Prince 5(4): six derivative evaluations per trial step plus a
//! first-same-as-last stage, a fifth-order advance, and an embedded
//! fourth-order estimate whose difference drives step-size control. The
//! loop is deterministic: identical inputs commit identical histories.

use crate::diagnostics::{Diagnostics, DomainViolation};
use crate::error::{SolveResult, SolverError};
use crate::history::History;
use crate::model::DelayModel;
use crate::options::SolveOptions;
use nalgebra::DVector;
use std::time::Instant;

// Dormand-Prince tableau
const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

// fifth-order weights, used to advance the solution
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// embedded fourth-order weights
const BH1: f64 = 5179.0 / 57600.0;
const BH3: f64 = 7571.0 / 16695.0;
const BH4: f64 = 393.0 / 640.0;
const BH5: f64 = -92097.0 / 339200.0;
const BH6: f64 = 187.0 / 2100.0;
const BH7: f64 = 1.0 / 40.0;

// error weights: advance minus embedded
const E1: f64 = B1 - BH1;
const E3: f64 = B3 - BH3;
const E4: f64 = B4 - BH4;
const E5: f64 = B5 - BH5;
const E6: f64 = B6 - BH6;
const E7: f64 = -BH7;

const SAFETY: f64 = 0.9;
const MIN_SHRINK: f64 = 0.2;
const MAX_GROWTH: f64 = 5.0;

/// Snapshot handed to the progress callback after each accepted step.
#[derive(Clone, Copy, Debug)]
pub struct StepProgress {
    pub t: f64,
    pub t_end: f64,
    pub h: f64,
    pub steps_accepted: usize,
    pub steps_rejected: usize,
}

impl StepProgress {
    pub fn fraction_complete(&self, t0: f64) -> f64 {
        let span = self.t_end - t0;
        if span > 0.0 {
            ((self.t - t0) / span).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

/// Result of one integration run: the committed trajectory plus
/// diagnostics. Produced once; immutable afterwards.
#[derive(Clone, Debug)]
pub struct Integration {
    pub history: History,
    pub diagnostics: Diagnostics,
}

impl Integration {
    /// True when the run reached the requested end time without a fatal
    /// error.
    pub fn is_complete(&self) -> bool {
        self.diagnostics.failure.is_none()
    }

    /// Interpolated state at `t`; report times need not coincide with
    /// accepted-step times.
    pub fn sample(&self, t: f64) -> SolveResult<DVector<f64>> {
        self.history.sample(t)
    }
}

/// Integrate `model` forward to `opts.t_end`.
///
/// Returns `Err` only for configuration problems detected before stepping
/// begins. Failures during the run (future queries, step underflow,
/// exhausted budgets) abort stepping and are reported in
/// `Integration::diagnostics` with the history truncated at the failure
/// point.
pub fn solve<M: DelayModel>(model: &M, opts: &SolveOptions) -> SolveResult<Integration> {
    solve_with_progress(model, opts, None)
}

/// Same as [`solve`], invoking `progress` after every accepted step.
pub fn solve_with_progress<M: DelayModel>(
    model: &M,
    opts: &SolveOptions,
    mut progress: Option<&mut dyn FnMut(&StepProgress)>,
) -> SolveResult<Integration> {
    let t0 = model.start_time();
    opts.validate(t0)?;
    let y0 = model.initial_state();
    if y0.len() != model.dim() {
        return Err(SolverError::InvalidConfig {
            what: "initial state dimension mismatch",
        });
    }

    let mut history = History::new(t0, y0.clone(), opts.capacity);
    let mut diags = Diagnostics::new(t0);
    let mut t = t0;
    let mut y = y0;
    let mut h = opts.first_dt.clamp(opts.min_dt, opts.max_dt);
    let started = Instant::now();
    let mut failure: Option<SolverError> = None;

    // first same as last: the accepted stage-7 derivative seeds the next step
    let mut k1 = match eval(model, t, &y, &history, &mut diags) {
        Ok(k) => k,
        Err(e) => {
            failure = Some(e);
            DVector::zeros(model.dim())
        }
    };

    while failure.is_none() && t < opts.t_end {
        if diags.total_trial_steps() >= opts.max_steps {
            failure = Some(SolverError::Timeout {
                t,
                steps: diags.total_trial_steps(),
            });
            break;
        }
        if let Some(budget) = opts.wall_clock_budget {
            if started.elapsed() > budget {
                failure = Some(SolverError::Timeout {
                    t,
                    steps: diags.total_trial_steps(),
                });
                break;
            }
        }

        // land exactly on the end time once it is within reach
        let gap = opts.t_end - t;
        let landing = gap <= h;
        let h_trial = if landing { gap } else { h };

        let trial = match attempt_step(model, t, &y, h_trial, &k1, &history, &mut diags, opts) {
            Ok(trial) => trial,
            Err(e) => {
                failure = Some(e);
                break;
            }
        };

        if trial.err_norm <= 1.0 {
            let t_new = if landing { opts.t_end } else { t + h_trial };
            if let Err(e) = history.append(t_new, trial.y_new.clone()) {
                failure = Some(e);
                break;
            }
            t = t_new;
            y = trial.y_new;
            k1 = trial.k_last;
            diags.steps_accepted += 1;
            diags.min_dt_reached = diags.min_dt_reached.min(h_trial);
            if let Some(cb) = progress.as_mut() {
                cb(&StepProgress {
                    t,
                    t_end: opts.t_end,
                    h: h_trial,
                    steps_accepted: diags.steps_accepted,
                    steps_rejected: diags.steps_rejected,
                });
            }
        } else {
            diags.steps_rejected += 1;
            tracing::debug!(t, h = h_trial, err = trial.err_norm, "step rejected");
        }

        let factor = if trial.err_norm == 0.0 {
            MAX_GROWTH
        } else {
            (SAFETY * trial.err_norm.powf(-0.2)).clamp(MIN_SHRINK, MAX_GROWTH)
        };
        let h_next = h_trial * factor;
        if trial.err_norm > 1.0 && h_next < opts.min_dt {
            failure = Some(SolverError::StepSizeUnderflow {
                t,
                h: h_next,
                min_dt: opts.min_dt,
            });
            break;
        }
        h = h_next.clamp(opts.min_dt, opts.max_dt);
    }

    diags.final_time = t;
    if let Some(e) = failure {
        tracing::debug!(t, error = %e, "integration aborted");
        diags.failure = Some(e);
    }
    Ok(Integration {
        history,
        diagnostics: diags,
    })
}

struct Trial {
    y_new: DVector<f64>,
    k_last: DVector<f64>,
    err_norm: f64,
}

#[allow(clippy::too_many_arguments)]
fn attempt_step<M: DelayModel>(
    model: &M,
    t: f64,
    y: &DVector<f64>,
    h: f64,
    k1: &DVector<f64>,
    history: &History,
    diags: &mut Diagnostics,
    opts: &SolveOptions,
) -> SolveResult<Trial> {
    let mut y_s = y.clone();
    y_s.axpy(h * A21, k1, 1.0);
    let k2 = eval(model, t + C2 * h, &y_s, history, diags)?;

    let mut y_s = y.clone();
    y_s.axpy(h * A31, k1, 1.0);
    y_s.axpy(h * A32, &k2, 1.0);
    let k3 = eval(model, t + C3 * h, &y_s, history, diags)?;

    let mut y_s = y.clone();
    y_s.axpy(h * A41, k1, 1.0);
    y_s.axpy(h * A42, &k2, 1.0);
    y_s.axpy(h * A43, &k3, 1.0);
    let k4 = eval(model, t + C4 * h, &y_s, history, diags)?;

    let mut y_s = y.clone();
    y_s.axpy(h * A51, k1, 1.0);
    y_s.axpy(h * A52, &k2, 1.0);
    y_s.axpy(h * A53, &k3, 1.0);
    y_s.axpy(h * A54, &k4, 1.0);
    let k5 = eval(model, t + C5 * h, &y_s, history, diags)?;

    let mut y_s = y.clone();
    y_s.axpy(h * A61, k1, 1.0);
    y_s.axpy(h * A62, &k2, 1.0);
    y_s.axpy(h * A63, &k3, 1.0);
    y_s.axpy(h * A64, &k4, 1.0);
    y_s.axpy(h * A65, &k5, 1.0);
    let k6 = eval(model, t + h, &y_s, history, diags)?;

    // fifth-order advance
    let mut y_new = y.clone();
    y_new.axpy(h * B1, k1, 1.0);
    y_new.axpy(h * B3, &k3, 1.0);
    y_new.axpy(h * B4, &k4, 1.0);
    y_new.axpy(h * B5, &k5, 1.0);
    y_new.axpy(h * B6, &k6, 1.0);

    // stage 7 doubles as the next step's first stage
    let k7 = eval(model, t + h, &y_new, history, diags)?;

    let mut err = k1.clone() * (h * E1);
    err.axpy(h * E3, &k3, 1.0);
    err.axpy(h * E4, &k4, 1.0);
    err.axpy(h * E5, &k5, 1.0);
    err.axpy(h * E6, &k6, 1.0);
    err.axpy(h * E7, &k7, 1.0);

    let n = y.len();
    let mut acc = 0.0;
    for i in 0..n {
        let sc = opts.atol + opts.rtol * y[i].abs().max(y_new[i].abs());
        let r = err[i] / sc;
        acc += r * r;
    }
    let err_norm = (acc / n as f64).sqrt();
    // a NaN anywhere in the error vector must read as "reject and shrink"
    let err_norm = if err_norm.is_finite() {
        err_norm
    } else {
        f64::INFINITY
    };

    Ok(Trial {
        y_new,
        k_last: k7,
        err_norm,
    })
}

/// Evaluate the vector field, checking every state component against its
/// declared domain. Domain violations are recorded and logged, never
/// raised: the next, smaller trial step may well stay inside.
fn eval<M: DelayModel>(
    model: &M,
    t: f64,
    y: &DVector<f64>,
    history: &History,
    diags: &mut Diagnostics,
) -> SolveResult<DVector<f64>> {
    for (i, c) in model.components().iter().enumerate() {
        if c.non_negative && y[i] < 0.0 {
            tracing::warn!(t, component = c.name, value = y[i], "state left its domain");
            diags.domain_violations.push(DomainViolation {
                t,
                component: c.name,
                value: y[i],
            });
        }
    }
    let dy = model.rhs(t, y, history)?;
    if dy.len() != model.dim() {
        return Err(SolverError::InvalidConfig {
            what: "derivative dimension mismatch",
        });
    }
    Ok(dy)
}
