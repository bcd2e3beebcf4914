//! Integration run configuration.

use crate::error::{SolveResult, SolverError};
use crate::history::HistoryCapacity;
use std::time::Duration;

/// Options for one integration run. Times are in the model's time unit.
#[derive(Clone, Debug)]
pub struct SolveOptions {
    /// Requested end time
    pub t_end: f64,
    /// First trial step size
    pub first_dt: f64,
    /// Step floor; shrinking below this while rejecting is a fatal failure
    pub min_dt: f64,
    /// Step ceiling
    pub max_dt: f64,
    /// Relative tolerance for the local error test
    pub rtol: f64,
    /// Absolute tolerance for the local error test
    pub atol: f64,
    /// Trial-step budget (accepted + rejected); exhausting it aborts the run
    pub max_steps: usize,
    /// History buffer growth policy
    pub capacity: HistoryCapacity,
    /// Optional wall-clock budget; exceeding it aborts the run
    pub wall_clock_budget: Option<Duration>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            t_end: 1.0,
            first_dt: 0.1,
            min_dt: 1e-10,
            max_dt: 1.0,
            rtol: 1e-8,
            atol: 1e-8,
            max_steps: 10_000_000,
            capacity: HistoryCapacity::Unbounded,
            wall_clock_budget: None,
        }
    }
}

impl SolveOptions {
    pub fn validate(&self, t0: f64) -> SolveResult<()> {
        if !self.t_end.is_finite() || self.t_end < t0 {
            return Err(SolverError::InvalidConfig {
                what: "t_end must be finite and at or after the start time",
            });
        }
        if !(self.first_dt > 0.0) || !self.first_dt.is_finite() {
            return Err(SolverError::InvalidConfig {
                what: "first_dt must be positive and finite",
            });
        }
        if !(self.min_dt > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "min_dt must be positive",
            });
        }
        if self.max_dt < self.min_dt {
            return Err(SolverError::InvalidConfig {
                what: "max_dt must be at least min_dt",
            });
        }
        if !(self.rtol > 0.0) || !(self.atol > 0.0) {
            return Err(SolverError::InvalidConfig {
                what: "tolerances must be positive",
            });
        }
        if self.max_steps == 0 {
            return Err(SolverError::InvalidConfig {
                what: "max_steps must be positive",
            });
        }
        Ok(())
    }
}
