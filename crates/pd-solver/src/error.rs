//! Error types for DDE integration.

use thiserror::Error;

/// Errors raised by the history store and the integration loop.
///
/// Every variant is fatal to the run it occurs in; the integrator preserves
/// the committed history up to the failure point. `Clone` and `PartialEq`
/// are derived so diagnostics can carry and tests can match on failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("history append at t={t} does not advance past t_last={t_last}")]
    NonMonotonicTime { t: f64, t_last: f64 },

    #[error("history queried at t={t} beyond the last committed time {t_last}")]
    FutureQuery { t: f64, t_last: f64 },

    #[error("history capacity of {capacity} samples exhausted at t={t}")]
    HistoryFull { capacity: usize, t: f64 },

    #[error("step size underflow at t={t}: next step {h:e} is below the floor {min_dt:e}")]
    StepSizeUnderflow { t: f64, h: f64, min_dt: f64 },

    #[error("integration budget exhausted at t={t} after {steps} trial steps")]
    Timeout { t: f64, steps: usize },

    #[error("invalid solver configuration: {what}")]
    InvalidConfig { what: &'static str },

    #[error("model evaluation failed at t={t}: {message}")]
    Model { t: f64, message: String },
}

pub type SolveResult<T> = Result<T, SolverError>;
