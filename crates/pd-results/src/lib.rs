//! pd-results: on-disk storage for integration runs.
//!
//! A run is a manifest (scenario, settings, diagnostics summary) plus a
//! time-series file with one JSON record per report time. Runs are keyed
//! by a content hash of the scenario and solver version, so re-running an
//! unchanged scenario is a cache hit.

pub mod export;
pub mod hash;
pub mod store;
pub mod types;

pub use export::{tail_window, to_delimited, write_delimited};
pub use hash::compute_run_id;
pub use store::RunStore;
pub use types::{DiagnosticsSummary, RunId, RunManifest, RunSummary, TimeseriesRecord};

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Run not found: {run_id}")]
    RunNotFound { run_id: String },

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },
}
