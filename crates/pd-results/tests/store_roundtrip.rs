//! Run store round-trip tests.

use pd_results::{
    DiagnosticsSummary, RunManifest, RunStore, RunSummary, TimeseriesRecord,
};
use std::path::PathBuf;

fn temp_root(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pd-results-{}-{}", std::process::id(), name))
}

fn manifest(run_id: &str, scenario_id: &str, timestamp: &str) -> RunManifest {
    RunManifest {
        run_id: run_id.to_string(),
        scenario_id: scenario_id.to_string(),
        timestamp: timestamp.to_string(),
        solver_version: "0.1.0".to_string(),
        run: RunSummary {
            t_end_days: 730.0,
            report_step_days: 1.0,
            keep_days: 365.0,
            delta_mean_k: 0.0,
            rtol: 1e-8,
            atol: 1e-8,
        },
        diagnostics: DiagnosticsSummary {
            completed: true,
            steps_accepted: 1234,
            steps_rejected: 7,
            min_dt_days: Some(0.01),
            final_time_days: 730.0,
            domain_violation_count: 0,
            first_domain_violation_day: None,
            failure: None,
        },
    }
}

fn records() -> Vec<TimeseriesRecord> {
    (0..10)
        .map(|d| TimeseriesRecord {
            t_days: d as f64,
            juveniles: 1.0 + d as f64,
            adults: 0.1,
            survival_scale: 0.6,
            delay_days: 3.75,
            temperature_k: 290.0,
        })
        .collect()
}

#[test]
fn save_and_load_roundtrip() {
    let root = temp_root("roundtrip");
    let store = RunStore::new(root.clone()).unwrap();

    let m = manifest("run-a", "med-baseline", "2026-01-01T00:00:00Z");
    store.save_run(&m, &records()).unwrap();

    assert!(store.has_run("run-a"));
    let loaded = store.load_manifest("run-a").unwrap();
    assert_eq!(loaded, m);
    let series = store.load_timeseries("run-a").unwrap();
    assert_eq!(series, records());

    std::fs::remove_dir_all(root).ok();
}

#[test]
fn missing_runs_are_reported() {
    let root = temp_root("missing");
    let store = RunStore::new(root.clone()).unwrap();
    assert!(!store.has_run("nope"));
    assert!(store.load_manifest("nope").is_err());
    assert!(store.load_timeseries("nope").is_err());
    std::fs::remove_dir_all(root).ok();
}

#[test]
fn list_runs_filters_by_scenario_and_sorts_by_timestamp() {
    let root = temp_root("list");
    let store = RunStore::new(root.clone()).unwrap();

    store
        .save_run(&manifest("run-b", "med", "2026-01-02T00:00:00Z"), &[])
        .unwrap();
    store
        .save_run(&manifest("run-a", "med", "2026-01-01T00:00:00Z"), &[])
        .unwrap();
    store
        .save_run(&manifest("run-c", "trop", "2026-01-03T00:00:00Z"), &[])
        .unwrap();

    let runs = store.list_runs("med").unwrap();
    let ids: Vec<&str> = runs.iter().map(|m| m.run_id.as_str()).collect();
    assert_eq!(ids, vec!["run-a", "run-b"]);

    std::fs::remove_dir_all(root).ok();
}

#[test]
fn delete_run_removes_the_directory() {
    let root = temp_root("delete");
    let store = RunStore::new(root.clone()).unwrap();
    store
        .save_run(&manifest("gone", "med", "2026-01-01T00:00:00Z"), &records())
        .unwrap();
    assert!(store.has_run("gone"));
    store.delete_run("gone").unwrap();
    assert!(!store.has_run("gone"));
    std::fs::remove_dir_all(root).ok();
}

#[test]
fn failed_run_manifest_roundtrips_failure_text() {
    let root = temp_root("failed");
    let store = RunStore::new(root.clone()).unwrap();

    let mut m = manifest("bad", "med", "2026-01-01T00:00:00Z");
    m.diagnostics.completed = false;
    m.diagnostics.failure = Some("step size underflow at t=12.5".to_string());
    m.diagnostics.min_dt_days = None;
    store.save_run(&m, &records()[..3]).unwrap();

    let loaded = store.load_manifest("bad").unwrap();
    assert!(!loaded.diagnostics.completed);
    assert_eq!(loaded.diagnostics.failure.as_deref(), Some("step size underflow at t=12.5"));
    assert_eq!(loaded.diagnostics.min_dt_days, None);

    std::fs::remove_dir_all(root).ok();
}
