//! Delay channels.

use crate::error::{SolveResult, SolverError};
use nalgebra::DVector;

/// Length of one delay channel: a fixed constant, or read from a state
/// component at every evaluation (state-dependent delay).
///
/// Chosen at model-definition time, read every evaluation. A lag that goes
/// negative at runtime makes the lagged time land in the unresolved future;
/// the history store refuses that lookup, which is the intended failure
/// path for a runaway delay state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Lag {
    Fixed(f64),
    FromComponent(usize),
}

impl Lag {
    /// Current lag length for `state`.
    pub fn length(&self, state: &DVector<f64>) -> SolveResult<f64> {
        match *self {
            Lag::Fixed(len) => Ok(len),
            Lag::FromComponent(idx) => {
                if idx >= state.len() {
                    return Err(SolverError::InvalidConfig {
                        what: "lag component index out of range",
                    });
                }
                Ok(state[idx])
            }
        }
    }

    /// The past time this channel refers to when evaluated at `t`.
    pub fn lag_time(&self, t: f64, state: &DVector<f64>) -> SolveResult<f64> {
        Ok(t - self.length(state)?)
    }
}
