//! Scenario-to-runtime compilation: schema definitions become rate
//! functions, a population model, and solver options.

use crate::error::AppResult;
use pd_core::{DAYS_PER_YEAR, kelvin};
use pd_model::AgeStructuredModel;
use pd_rates::{
    ArrheniusParams, ClimateNormals, CompetitionForm, CompetitionParams, DensityDependence,
    GaussianParams, MaturationCurve, SchoolfieldParams, SeasonalForcing, SpeciesParams, VitalRates,
};
use pd_scenario::{
    CompetitionFormDef, DensityDependenceDef, MaturationDef, PresetName, Scenario, SpeciesDef,
};
use pd_solver::{HistoryCapacity, SolveOptions};

pub const SOLVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct CompiledRun {
    pub model: AgeStructuredModel,
    pub options: SolveOptions,
    pub report_times: Vec<f64>,
    pub keep_days: f64,
}

pub fn compile(scenario: &Scenario) -> AppResult<CompiledRun> {
    let params = species_params(&scenario.species);
    let forcing = SeasonalForcing::new(
        params.climate,
        scenario.warming.delta_mean_k,
        scenario.warming.delta_ampl_k,
        scenario.warming.ramp_years,
    )?;
    let rates = VitalRates::new(
        params,
        forcing,
        competition_form(scenario.competition.form),
        density_dependence(scenario.competition.mode),
    )?;
    let model = AgeStructuredModel::new(rates);

    let s = &scenario.solver;
    let t_end = scenario.run.years * DAYS_PER_YEAR;
    let options = SolveOptions {
        t_end,
        first_dt: s.first_dt_days,
        min_dt: s.min_dt_days,
        max_dt: s.max_dt_days,
        rtol: s.rtol,
        atol: s.atol,
        max_steps: s.max_steps,
        capacity: match s.history_capacity {
            Some(n) => HistoryCapacity::Bounded(n),
            None => HistoryCapacity::Unbounded,
        },
        wall_clock_budget: None,
    };

    Ok(CompiledRun {
        model,
        options,
        report_times: report_times(t_end, scenario.run.report_step_days),
        keep_days: scenario.run.keep_years * DAYS_PER_YEAR,
    })
}

/// Report grid from 0 to `t_end` at `step` spacing, always ending exactly
/// at `t_end`.
fn report_times(t_end: f64, step: f64) -> Vec<f64> {
    let mut times = Vec::new();
    let mut k = 0u64;
    loop {
        let t = k as f64 * step;
        if t >= t_end {
            break;
        }
        times.push(t);
        k += 1;
    }
    times.push(t_end);
    times
}

fn species_params(def: &SpeciesDef) -> SpeciesParams {
    match def {
        SpeciesDef::Preset { name } => match name {
            PresetName::Mediterranean => SpeciesParams::mediterranean(),
            PresetName::Tropical => SpeciesParams::tropical(),
            PresetName::Temperate => SpeciesParams::temperate(),
        },
        SpeciesDef::Custom {
            fecundity,
            maturation,
            juvenile_mortality,
            adult_mortality,
            competition_response,
            climate,
        } => SpeciesParams {
            fecundity: GaussianParams {
                rate_max: fecundity.rate_max,
                t_opt: kelvin(fecundity.t_opt_k),
                width_k: fecundity.width_k,
            },
            maturation: match *maturation {
                MaturationDef::Arrhenius {
                    rate_ref,
                    activation,
                    t_ref_k,
                } => MaturationCurve::Arrhenius(ArrheniusParams {
                    rate_ref,
                    activation,
                    t_ref: kelvin(t_ref_k),
                }),
                MaturationDef::SharpeSchoolfield {
                    rate_ref,
                    activation,
                    t_ref_k,
                    deact_low,
                    t_low_k,
                    deact_high,
                    t_high_k,
                } => MaturationCurve::SharpeSchoolfield(SchoolfieldParams {
                    rate_ref,
                    activation,
                    t_ref: kelvin(t_ref_k),
                    deact_low,
                    t_low: kelvin(t_low_k),
                    deact_high,
                    t_high: kelvin(t_high_k),
                }),
            },
            juvenile_mortality: ArrheniusParams {
                rate_ref: juvenile_mortality.rate_ref,
                activation: juvenile_mortality.activation,
                t_ref: kelvin(juvenile_mortality.t_ref_k),
            },
            adult_mortality: ArrheniusParams {
                rate_ref: adult_mortality.rate_ref,
                activation: adult_mortality.activation,
                t_ref: kelvin(adult_mortality.t_ref_k),
            },
            competition: CompetitionParams {
                strength_ref: competition_response.strength_ref,
                activation: competition_response.activation,
                t_ref: kelvin(competition_response.t_ref_k),
                t_opt: kelvin(competition_response.t_opt_k),
                width_k: competition_response.width_k,
            },
            climate: ClimateNormals {
                mean_k: climate.mean_k,
                ampl_k: climate.ampl_k,
                phase_rad: climate.phase_rad,
            },
        },
    }
}

fn competition_form(def: CompetitionFormDef) -> CompetitionForm {
    match def {
        CompetitionFormDef::Unimodal => CompetitionForm::Unimodal,
        CompetitionFormDef::Monotonic => CompetitionForm::Monotonic,
        CompetitionFormDef::Constant => CompetitionForm::Constant,
    }
}

fn density_dependence(def: DensityDependenceDef) -> DensityDependence {
    match def {
        DensityDependenceDef::Fecundity => DensityDependence::Fecundity,
        DensityDependenceDef::AdultMortality => DensityDependence::AdultMortality,
        DensityDependenceDef::JuvenileMortality => DensityDependence::JuvenileMortality,
    }
}
