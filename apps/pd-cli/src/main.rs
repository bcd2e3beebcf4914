use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

mod error;
mod run_service;
mod runtime;

use error::{AppError, AppResult};
use pd_results::RunStore;
use pd_solver::StepProgress;

#[derive(Parser)]
#[command(name = "pd-cli")]
#[command(about = "popdyn CLI - temperature-driven population dynamics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and structure
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Run a scenario
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Skip cache and force re-run
        #[arg(long)]
        no_cache: bool,
    },
    /// Run a warming sweep over mean-temperature deltas, in parallel
    Sweep {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Largest mean warming delta (K)
        #[arg(long)]
        delta_mean_max: f64,
        /// Spacing between deltas (K)
        #[arg(long, default_value_t = 1.0)]
        step_k: f64,
        /// Skip cache and force re-runs
        #[arg(long)]
        no_cache: bool,
    },
    /// List cached runs for a scenario
    Runs {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Show details of a cached run
    ShowRun {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID to display
        run_id: String,
    },
    /// Export the kept tail window of a run as delimited text
    Export {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID
        run_id: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Export the full series instead of the kept tail window
        #[arg(long)]
        full: bool,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Run {
            scenario_path,
            no_cache,
        } => cmd_run(&scenario_path, !no_cache),
        Commands::Sweep {
            scenario_path,
            delta_mean_max,
            step_k,
            no_cache,
        } => cmd_sweep(&scenario_path, delta_mean_max, step_k, !no_cache),
        Commands::Runs { scenario_path } => cmd_runs(&scenario_path),
        Commands::ShowRun {
            scenario_path,
            run_id,
        } => cmd_show_run(&scenario_path, &run_id),
        Commands::Export {
            scenario_path,
            run_id,
            output,
            full,
        } => cmd_export(&scenario_path, &run_id, output.as_deref(), full),
    }
}

fn cmd_validate(scenario_path: &Path) -> AppResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = pd_scenario::load_yaml(scenario_path)?;
    println!("✓ Scenario is valid");
    println!("  id:      {}", scenario.id);
    println!("  name:    {}", scenario.name);
    println!(
        "  span:    {} years (keep {} years, report every {} days)",
        scenario.run.years, scenario.run.keep_years, scenario.run.report_step_days
    );
    println!(
        "  warming: +{} K mean, +{} K amplitude over {} years",
        scenario.warming.delta_mean_k, scenario.warming.delta_ampl_k, scenario.warming.ramp_years
    );
    Ok(())
}

fn cmd_run(scenario_path: &Path, use_cache: bool) -> AppResult<()> {
    println!("Running scenario: {}", scenario_path.display());

    let mut last_emit = Instant::now();
    let mut last_fraction = -1.0f64;
    let response = run_service::ensure_run(
        scenario_path,
        use_cache,
        Some(&mut |p: &StepProgress| {
            let fraction = p.fraction_complete(0.0);
            let emit_now = (fraction - last_fraction).abs() >= 0.005
                || last_emit.elapsed().as_millis() >= 100;
            if emit_now {
                render_progress(p, fraction);
                last_fraction = fraction;
                last_emit = Instant::now();
            }
        }),
    )?;
    clear_progress_line();

    if response.loaded_from_cache {
        println!("✓ Loaded from cache: {}", response.run_id);
    } else if response.completed {
        println!(
            "✓ Simulation completed in {:.2}s: {}",
            response.elapsed_s, response.run_id
        );
    }

    let store = RunStore::for_scenario(scenario_path)?;
    let manifest = store.load_manifest(&response.run_id)?;
    let records = store.load_timeseries(&response.run_id)?;
    println!("  Accepted steps: {}", manifest.diagnostics.steps_accepted);
    println!("  Rejected steps: {}", manifest.diagnostics.steps_rejected);
    println!("  Report records: {}", records.len());
    if manifest.diagnostics.domain_violation_count > 0 {
        println!(
            "  Domain warnings: {} (first at day {:.2})",
            manifest.diagnostics.domain_violation_count,
            manifest
                .diagnostics
                .first_domain_violation_day
                .unwrap_or(f64::NAN)
        );
    }

    if let Some(failure) = manifest.diagnostics.failure {
        println!(
            "✗ Run aborted at day {:.3}: {}",
            manifest.diagnostics.final_time_days, failure
        );
        return Err(AppError::RunAborted {
            run_id: response.run_id,
            failure,
        });
    }
    Ok(())
}

fn cmd_sweep(
    scenario_path: &Path,
    delta_mean_max: f64,
    step_k: f64,
    use_cache: bool,
) -> AppResult<()> {
    if !(step_k > 0.0) {
        return Err(AppError::InvalidArg("--step-k must be positive".into()));
    }
    if !(delta_mean_max >= 0.0) {
        return Err(AppError::InvalidArg(
            "--delta-mean-max must not be negative".into(),
        ));
    }

    let mut deltas = Vec::new();
    let mut d = 0.0;
    while d <= delta_mean_max + 1e-9 {
        deltas.push(d);
        d += step_k;
    }

    println!(
        "Sweeping {} warming deltas (0 to +{} K, step {} K)",
        deltas.len(),
        delta_mean_max,
        step_k
    );

    let started = Instant::now();
    let results = run_service::sweep(scenario_path, &deltas, use_cache)?;
    println!("✓ Sweep finished in {:.2}s", started.elapsed().as_secs_f64());

    let mut failed = 0;
    for (delta, response) in &results {
        let status = if response.loaded_from_cache {
            "cached"
        } else if response.completed {
            "completed"
        } else {
            failed += 1;
            "ABORTED"
        };
        println!("  +{delta:>4.1} K  {status:>9}  {}", response.run_id);
    }

    if failed > 0 {
        return Err(AppError::SweepFailures {
            failed,
            total: results.len(),
        });
    }
    Ok(())
}

fn cmd_runs(scenario_path: &Path) -> AppResult<()> {
    let scenario = pd_scenario::load_yaml(scenario_path)?;
    let store = RunStore::for_scenario(scenario_path)?;
    let runs = store.list_runs(&scenario.id)?;

    if runs.is_empty() {
        println!("No cached runs found for scenario: {}", scenario.id);
    } else {
        println!("Cached runs for scenario '{}':", scenario.id);
        for manifest in runs {
            let status = if manifest.diagnostics.completed {
                "completed"
            } else {
                "aborted"
            };
            println!(
                "  {}  +{:.1} K  {}  ({})",
                manifest.run_id, manifest.run.delta_mean_k, status, manifest.timestamp
            );
        }
    }
    Ok(())
}

fn cmd_show_run(scenario_path: &Path, run_id: &str) -> AppResult<()> {
    let store = RunStore::for_scenario(scenario_path)?;
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;

    println!("Run {}", manifest.run_id);
    println!("  scenario:  {}", manifest.scenario_id);
    println!("  timestamp: {}", manifest.timestamp);
    println!("  solver:    {}", manifest.solver_version);
    println!(
        "  span:      0 - {:.1} days (reported every {} days, keep {:.0} days)",
        manifest.run.t_end_days, manifest.run.report_step_days, manifest.run.keep_days
    );
    println!("  warming:   +{:.2} K", manifest.run.delta_mean_k);
    println!(
        "  steps:     {} accepted, {} rejected",
        manifest.diagnostics.steps_accepted, manifest.diagnostics.steps_rejected
    );
    if let Some(min_dt) = manifest.diagnostics.min_dt_days {
        println!("  min step:  {min_dt:.3e} days");
    }
    println!("  records:   {}", records.len());
    if let Some(first) = records.first()
        && let Some(last) = records.last()
    {
        println!(
            "  recorded:  day {:.1} to day {:.1}",
            first.t_days, last.t_days
        );
    }
    if manifest.diagnostics.domain_violation_count > 0 {
        println!(
            "  warnings:  {} domain violations",
            manifest.diagnostics.domain_violation_count
        );
    }
    match manifest.diagnostics.failure {
        Some(failure) => println!("  status:    ABORTED ({failure})"),
        None => println!("  status:    completed"),
    }
    Ok(())
}

fn cmd_export(
    scenario_path: &Path,
    run_id: &str,
    output: Option<&Path>,
    full: bool,
) -> AppResult<()> {
    let store = RunStore::for_scenario(scenario_path)?;
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_timeseries(run_id)?;

    let window = if full {
        &records[..]
    } else {
        pd_results::tail_window(&records, manifest.run.keep_days)
    };

    if let Some(path) = output {
        pd_results::write_delimited(path, window, ',')?;
        println!("✓ Exported {} records to {}", window.len(), path.display());
    } else {
        print!("{}", pd_results::to_delimited(window, ','));
    }
    Ok(())
}

fn clear_progress_line() {
    print!("\r{}\r", " ".repeat(120));
    let _ = io::stdout().flush();
}

fn render_progress(p: &StepProgress, fraction: f64) {
    let width = 28usize;
    let filled = ((fraction * width as f64).round() as usize).min(width);
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    print!(
        "\r[{}] {:>6.2}%  t={:.1}/{:.1} days  h={:.3}  accepted={}  rejected={}",
        bar,
        fraction * 100.0,
        p.t,
        p.t_end,
        p.h,
        p.steps_accepted,
        p.steps_rejected
    );
    let _ = io::stdout().flush();
}
