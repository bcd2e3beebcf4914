//! Run orchestration: cache lookup, integration, recording, storage.

use crate::error::AppResult;
use crate::runtime::{self, SOLVER_VERSION};
use pd_core::in_kelvin;
use pd_model::{ADULTS, DELAY, JUVENILES, SURVIVAL};
use pd_results::{
    DiagnosticsSummary, RunManifest, RunStore, RunSummary, TimeseriesRecord, compute_run_id,
};
use pd_scenario::Scenario;
use pd_solver::{Diagnostics, StepProgress, solve_with_progress};
use rayon::prelude::*;
use std::path::Path;
use std::time::Instant;

pub struct RunResponse {
    pub run_id: String,
    pub completed: bool,
    pub loaded_from_cache: bool,
    pub elapsed_s: f64,
}

/// Run the scenario at `scenario_path`, reusing a cached run when the
/// content hash matches.
pub fn ensure_run(
    scenario_path: &Path,
    use_cache: bool,
    progress: Option<&mut dyn FnMut(&StepProgress)>,
) -> AppResult<RunResponse> {
    let scenario = pd_scenario::load_yaml(scenario_path)?;
    let store = RunStore::for_scenario(scenario_path)?;
    execute_scenario(&scenario, &store, use_cache, progress)
}

/// Run one (possibly sweep-modified) scenario against an existing store.
pub fn execute_scenario(
    scenario: &Scenario,
    store: &RunStore,
    use_cache: bool,
    progress: Option<&mut dyn FnMut(&StepProgress)>,
) -> AppResult<RunResponse> {
    let run_id = compute_run_id(scenario, SOLVER_VERSION);

    if use_cache && store.has_run(&run_id) {
        let manifest = store.load_manifest(&run_id)?;
        return Ok(RunResponse {
            run_id,
            completed: manifest.diagnostics.completed,
            loaded_from_cache: true,
            elapsed_s: 0.0,
        });
    }

    let compiled = runtime::compile(scenario)?;
    let started = Instant::now();
    tracing::info!(scenario = %scenario.id, run_id = %run_id, "starting integration");
    let integration = solve_with_progress(&compiled.model, &compiled.options, progress)?;
    let elapsed_s = started.elapsed().as_secs_f64();

    // An aborted run keeps its committed prefix; report what is resolved.
    let last = integration.history.last_time();
    let reachable: Vec<f64> = compiled
        .report_times
        .iter()
        .copied()
        .filter(|t| *t <= last)
        .collect();
    let records: Vec<TimeseriesRecord> = integration
        .history
        .sample_series(&reachable)?
        .into_iter()
        .map(|(t, y)| TimeseriesRecord {
            t_days: t,
            juveniles: y[JUVENILES],
            adults: y[ADULTS],
            survival_scale: y[SURVIVAL],
            delay_days: y[DELAY],
            temperature_k: in_kelvin(compiled.model.temperature(t)),
        })
        .collect();

    let manifest = RunManifest {
        run_id: run_id.clone(),
        scenario_id: scenario.id.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        solver_version: SOLVER_VERSION.to_string(),
        run: RunSummary {
            t_end_days: compiled.options.t_end,
            report_step_days: scenario.run.report_step_days,
            keep_days: compiled.keep_days,
            delta_mean_k: scenario.warming.delta_mean_k,
            rtol: compiled.options.rtol,
            atol: compiled.options.atol,
        },
        diagnostics: summarize(&integration.diagnostics),
    };
    store.save_run(&manifest, &records)?;

    if let Some(failure) = &integration.diagnostics.failure {
        tracing::warn!(run_id = %manifest.run_id, error = %failure, "run aborted");
    }

    Ok(RunResponse {
        run_id,
        completed: integration.is_complete(),
        loaded_from_cache: false,
        elapsed_s,
    })
}

/// Warming sweep: independent runs for each mean-temperature delta,
/// executed in parallel. Each run owns its model, history, and result;
/// nothing is shared beyond the read-only base scenario.
pub fn sweep(
    scenario_path: &Path,
    deltas_k: &[f64],
    use_cache: bool,
) -> AppResult<Vec<(f64, RunResponse)>> {
    let base = pd_scenario::load_yaml(scenario_path)?;
    let store = RunStore::for_scenario(scenario_path)?;

    let results: Vec<AppResult<(f64, RunResponse)>> = deltas_k
        .par_iter()
        .map(|&delta| {
            let mut scenario = base.clone();
            scenario.warming.delta_mean_k = delta;
            let response = execute_scenario(&scenario, &store, use_cache, None)?;
            Ok((delta, response))
        })
        .collect();

    results.into_iter().collect()
}

fn summarize(d: &Diagnostics) -> DiagnosticsSummary {
    DiagnosticsSummary {
        completed: d.failure.is_none(),
        steps_accepted: d.steps_accepted,
        steps_rejected: d.steps_rejected,
        min_dt_days: d.min_dt_reached.is_finite().then_some(d.min_dt_reached),
        final_time_days: d.final_time,
        domain_violation_count: d.domain_violations.len(),
        first_domain_violation_day: d.domain_violations.first().map(|v| v.t),
        failure: d.failure.as_ref().map(|e| e.to_string()),
    }
}
