//! Scenario validation logic.

use crate::schema::{MaturationDef, RunDef, Scenario, SolverDef, SpeciesDef, WarmingDef};

pub const LATEST_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Missing value: {field}")]
    Missing { field: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid(field, value, "must be positive and finite"));
    }
    Ok(())
}

fn require_finite(field: &str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(invalid(field, value, "must be finite"));
    }
    Ok(())
}

pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    if scenario.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: scenario.version,
        });
    }
    if scenario.id.trim().is_empty() {
        return Err(ValidationError::Missing {
            field: "id".to_string(),
        });
    }

    validate_run(&scenario.run)?;
    validate_solver(&scenario.solver)?;
    validate_warming(&scenario.warming)?;
    validate_species(&scenario.species)?;
    Ok(())
}

fn validate_run(run: &RunDef) -> Result<(), ValidationError> {
    require_positive("run.years", run.years)?;
    require_positive("run.keep_years", run.keep_years)?;
    require_positive("run.report_step_days", run.report_step_days)?;
    if run.keep_years > run.years {
        return Err(invalid(
            "run.keep_years",
            run.keep_years,
            "must not exceed run.years",
        ));
    }
    Ok(())
}

fn validate_solver(solver: &SolverDef) -> Result<(), ValidationError> {
    require_positive("solver.rtol", solver.rtol)?;
    require_positive("solver.atol", solver.atol)?;
    require_positive("solver.first_dt_days", solver.first_dt_days)?;
    require_positive("solver.min_dt_days", solver.min_dt_days)?;
    require_positive("solver.max_dt_days", solver.max_dt_days)?;
    if solver.max_dt_days < solver.min_dt_days {
        return Err(invalid(
            "solver.max_dt_days",
            solver.max_dt_days,
            "must be at least solver.min_dt_days",
        ));
    }
    if solver.max_steps == 0 {
        return Err(invalid("solver.max_steps", 0.0, "must be positive"));
    }
    if let Some(capacity) = solver.history_capacity {
        if capacity < 2 {
            return Err(invalid(
                "solver.history_capacity",
                capacity as f64,
                "must hold at least the seed sample and one step",
            ));
        }
    }
    Ok(())
}

fn validate_warming(warming: &WarmingDef) -> Result<(), ValidationError> {
    require_finite("warming.delta_mean_k", warming.delta_mean_k)?;
    require_finite("warming.delta_ampl_k", warming.delta_ampl_k)?;
    require_positive("warming.ramp_years", warming.ramp_years)?;
    Ok(())
}

fn validate_species(species: &SpeciesDef) -> Result<(), ValidationError> {
    let SpeciesDef::Custom {
        fecundity,
        maturation,
        juvenile_mortality,
        adult_mortality,
        competition_response,
        climate,
    } = species
    else {
        return Ok(());
    };

    require_positive("species.fecundity.rate_max", fecundity.rate_max)?;
    require_positive("species.fecundity.t_opt_k", fecundity.t_opt_k)?;
    require_positive("species.fecundity.width_k", fecundity.width_k)?;

    match maturation {
        MaturationDef::Arrhenius {
            rate_ref, t_ref_k, ..
        } => {
            require_positive("species.maturation.rate_ref", *rate_ref)?;
            require_positive("species.maturation.t_ref_k", *t_ref_k)?;
        }
        MaturationDef::SharpeSchoolfield {
            rate_ref,
            t_ref_k,
            t_low_k,
            t_high_k,
            ..
        } => {
            require_positive("species.maturation.rate_ref", *rate_ref)?;
            require_positive("species.maturation.t_ref_k", *t_ref_k)?;
            require_positive("species.maturation.t_low_k", *t_low_k)?;
            require_positive("species.maturation.t_high_k", *t_high_k)?;
        }
    }

    require_positive(
        "species.juvenile_mortality.rate_ref",
        juvenile_mortality.rate_ref,
    )?;
    require_positive("species.adult_mortality.rate_ref", adult_mortality.rate_ref)?;
    if competition_response.strength_ref < 0.0 {
        return Err(invalid(
            "species.competition_response.strength_ref",
            competition_response.strength_ref,
            "must not be negative",
        ));
    }
    require_positive(
        "species.competition_response.width_k",
        competition_response.width_k,
    )?;
    require_positive("species.climate.mean_k", climate.mean_k)?;
    if climate.ampl_k < 0.0 {
        return Err(invalid(
            "species.climate.ampl_k",
            climate.ampl_k,
            "must not be negative",
        ));
    }
    Ok(())
}
