//! Result data types.

use serde::{Deserialize, Serialize};

pub type RunId = String;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunManifest {
    pub run_id: RunId,
    pub scenario_id: String,
    pub timestamp: String,
    pub solver_version: String,
    pub run: RunSummary,
    pub diagnostics: DiagnosticsSummary,
}

/// Settings the run was integrated with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub t_end_days: f64,
    pub report_step_days: f64,
    /// Tail window the export step keeps (days)
    pub keep_days: f64,
    /// Mean warming applied on top of the scenario baseline (K)
    #[serde(default)]
    pub delta_mean_k: f64,
    pub rtol: f64,
    pub atol: f64,
}

/// Solver diagnostics condensed for the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiagnosticsSummary {
    pub completed: bool,
    pub steps_accepted: usize,
    pub steps_rejected: usize,
    /// Smallest accepted step; absent if no step was accepted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_dt_days: Option<f64>,
    pub final_time_days: f64,
    pub domain_violation_count: usize,
    /// Day of the first domain violation, if any occurred
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_domain_violation_day: Option<f64>,
    /// Rendered fatal error for aborted runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

/// One report-time snapshot of the population state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TimeseriesRecord {
    pub t_days: f64,
    pub juveniles: f64,
    pub adults: f64,
    pub survival_scale: f64,
    pub delay_days: f64,
    pub temperature_k: f64,
}
