//! Content-based hashing for run IDs.

use pd_scenario::Scenario;
use sha2::{Digest, Sha256};

/// Run ID derived from the canonical scenario JSON and the solver version.
/// The same scenario always hashes to the same ID; any parameter change
/// produces a new one.
pub fn compute_run_id(scenario: &Scenario, solver_version: &str) -> String {
    let mut hasher = Sha256::new();

    let scenario_json = serde_json::to_string(scenario).unwrap_or_default();
    hasher.update(scenario_json.as_bytes());
    hasher.update(solver_version.as_bytes());

    let digest = hasher.finalize();
    format!("{digest:x}")
}
