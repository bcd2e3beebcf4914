//! CLI-level error type; folds every layer's errors into one.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Scenario error: {0}")]
    Scenario(#[from] pd_scenario::ScenarioError),

    #[error("Rate error: {0}")]
    Rates(#[from] pd_rates::RateError),

    #[error("Solver error: {0}")]
    Solver(#[from] pd_solver::SolverError),

    #[error("Results error: {0}")]
    Results(#[from] pd_results::ResultsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArg(String),

    #[error("Run {run_id} aborted: {failure}")]
    RunAborted { run_id: String, failure: String },

    #[error("{failed} of {total} sweep runs aborted")]
    SweepFailures { failed: usize, total: usize },
}
