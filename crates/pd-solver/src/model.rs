//! DelayModel trait for pluggable delayed dynamic systems.

use crate::error::SolveResult;
use crate::history::History;
use nalgebra::DVector;

/// Metadata for one state-vector component.
#[derive(Clone, Copy, Debug)]
pub struct StateComponent {
    pub name: &'static str,
    /// Count-like components must stay non-negative in a valid trajectory.
    /// Leaving the domain is a modeling problem, not a numerical one: the
    /// integrator records a diagnostic and keeps going rather than clamping.
    pub non_negative: bool,
}

/// A delayed dynamic system `dy/dt = f(t, y, past)`.
///
/// The vector field receives the committed trajectory and may sample it at
/// any resolved past time, including a lag length read from the current
/// state. It must not write anywhere; the integrator owns all mutation.
pub trait DelayModel {
    /// Ordered component metadata; fixes the state dimension.
    fn components(&self) -> &[StateComponent];

    fn dim(&self) -> usize {
        self.components().len()
    }

    /// Time the run starts from.
    fn start_time(&self) -> f64;

    /// State at the start time, also the pre-start history constant.
    fn initial_state(&self) -> DVector<f64>;

    /// Evaluate the derivative at `(t, y)`, resolving delayed terms
    /// through `past`.
    fn rhs(&self, t: f64, y: &DVector<f64>, past: &History) -> SolveResult<DVector<f64>>;
}
