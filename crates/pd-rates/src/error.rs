//! Error types for rate-law construction.

use thiserror::Error;

/// Errors encountered while building forcing or vital-rate functions.
#[derive(Error, Debug)]
pub enum RateError {
    #[error("invalid rate parameter: {0}")]
    Parameter(#[from] pd_core::PdError),

    #[error("invalid forcing: {what}")]
    Forcing { what: &'static str },
}

pub type RateResult<T> = Result<T, RateError>;
