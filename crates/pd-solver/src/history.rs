//! Append-only trajectory history with interpolated lookup.

use crate::error::{SolveResult, SolverError};
use nalgebra::DVector;

/// Growth policy for the sample buffer.
///
/// Lag windows of state-dependent delays are not boundable in advance, so
/// unbounded growth is the recommended default; a bounded buffer fails
/// loudly instead of evicting samples a lag lookup may still need.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HistoryCapacity {
    #[default]
    Unbounded,
    Bounded(usize),
}

/// Time-ordered record of committed states.
///
/// The history is seeded with one sample at the start time and only ever
/// grows by appending strictly later samples. Queries at or before the
/// start time return the initial state unchanged: the system is taken to
/// have existed unchanged before the simulation began. Queries beyond the
/// last committed sample are refused; the future is not yet resolved.
#[derive(Clone, Debug)]
pub struct History {
    t0: f64,
    initial: DVector<f64>,
    times: Vec<f64>,
    states: Vec<DVector<f64>>,
    capacity: HistoryCapacity,
}

impl History {
    pub fn new(t0: f64, initial: DVector<f64>, capacity: HistoryCapacity) -> Self {
        let mut times = Vec::new();
        let mut states = Vec::new();
        if let HistoryCapacity::Bounded(cap) = capacity {
            times.reserve_exact(cap);
            states.reserve_exact(cap);
        }
        times.push(t0);
        states.push(initial.clone());
        Self {
            t0,
            initial,
            times,
            states,
            capacity,
        }
    }

    pub fn dim(&self) -> usize {
        self.initial.len()
    }

    /// Number of committed samples, including the seeded start sample.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        false // always seeded
    }

    pub fn start_time(&self) -> f64 {
        self.t0
    }

    pub fn last_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    pub fn last_state(&self) -> &DVector<f64> {
        &self.states[self.states.len() - 1]
    }

    /// The pre-start constant returned for queries at or before `t0`.
    pub fn initial_state(&self) -> &DVector<f64> {
        &self.initial
    }

    /// Commit one sample. All-or-nothing: a refused append leaves the
    /// history untouched.
    pub fn append(&mut self, t: f64, state: DVector<f64>) -> SolveResult<()> {
        let t_last = self.last_time();
        if !(t > t_last) {
            return Err(SolverError::NonMonotonicTime { t, t_last });
        }
        if state.len() != self.dim() {
            return Err(SolverError::InvalidConfig {
                what: "appended state dimension mismatch",
            });
        }
        if let HistoryCapacity::Bounded(cap) = self.capacity {
            if self.times.len() >= cap {
                return Err(SolverError::HistoryFull { capacity: cap, t });
            }
        }
        self.times.push(t);
        self.states.push(state);
        Ok(())
    }

    /// Interpolated state at `t`.
    ///
    /// At or before the start time this is the initial constant; at a
    /// committed sample it is that sample exactly; strictly between two
    /// samples it is the component-wise linear interpolant. Beyond the
    /// last committed sample the query fails with `FutureQuery`.
    pub fn sample(&self, t: f64) -> SolveResult<DVector<f64>> {
        if t <= self.t0 {
            return Ok(self.initial.clone());
        }
        let t_last = self.last_time();
        if !(t <= t_last) {
            return Err(SolverError::FutureQuery { t, t_last });
        }

        // first index with times[idx] >= t; idx >= 1 because t > t0
        let idx = self.times.partition_point(|&x| x < t);
        if self.times[idx] == t {
            return Ok(self.states[idx].clone());
        }
        let ta = self.times[idx - 1];
        let tb = self.times[idx];
        let frac = (t - ta) / (tb - ta);
        Ok(self.states[idx - 1].zip_map(&self.states[idx], |a, b| a + frac * (b - a)))
    }

    /// Committed samples in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &DVector<f64>)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// Committed samples with `from <= t <= to`.
    pub fn range(&self, from: f64, to: f64) -> impl Iterator<Item = (f64, &DVector<f64>)> + '_ {
        let lo = self.times.partition_point(|&x| x < from);
        let hi = self.times.partition_point(|&x| x <= to);
        self.times[lo..hi]
            .iter()
            .copied()
            .zip(self.states[lo..hi].iter())
    }

    /// Interpolated states at each of the caller's report times. Report
    /// times need not coincide with committed step times.
    pub fn sample_series(&self, times: &[f64]) -> SolveResult<Vec<(f64, DVector<f64>)>> {
        times
            .iter()
            .map(|&t| self.sample(t).map(|s| (t, s)))
            .collect()
    }
}
