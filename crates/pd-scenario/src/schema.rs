//! Scenario file schema definitions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub version: u32,
    pub id: String,
    pub name: String,
    pub species: SpeciesDef,
    #[serde(default)]
    pub competition: CompetitionDef,
    #[serde(default)]
    pub warming: WarmingDef,
    pub run: RunDef,
    #[serde(default)]
    pub solver: SolverDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SpeciesDef {
    Preset {
        name: PresetName,
    },
    Custom {
        fecundity: FecundityDef,
        maturation: MaturationDef,
        juvenile_mortality: MortalityDef,
        adult_mortality: MortalityDef,
        competition_response: CompetitionResponseDef,
        climate: ClimateDef,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PresetName {
    Mediterranean,
    Tropical,
    Temperate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FecundityDef {
    pub rate_max: f64,
    pub t_opt_k: f64,
    pub width_k: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "form")]
pub enum MaturationDef {
    Arrhenius {
        rate_ref: f64,
        activation: f64,
        t_ref_k: f64,
    },
    SharpeSchoolfield {
        rate_ref: f64,
        activation: f64,
        t_ref_k: f64,
        deact_low: f64,
        t_low_k: f64,
        deact_high: f64,
        t_high_k: f64,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MortalityDef {
    pub rate_ref: f64,
    pub activation: f64,
    pub t_ref_k: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CompetitionResponseDef {
    pub strength_ref: f64,
    pub activation: f64,
    pub t_ref_k: f64,
    pub t_opt_k: f64,
    pub width_k: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClimateDef {
    pub mean_k: f64,
    pub ampl_k: f64,
    pub phase_rad: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct CompetitionDef {
    #[serde(default)]
    pub form: CompetitionFormDef,
    #[serde(default)]
    pub mode: DensityDependenceDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionFormDef {
    #[default]
    Unimodal,
    Monotonic,
    Constant,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DensityDependenceDef {
    #[default]
    Fecundity,
    AdultMortality,
    JuvenileMortality,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct WarmingDef {
    #[serde(default)]
    pub delta_mean_k: f64,
    #[serde(default)]
    pub delta_ampl_k: f64,
    #[serde(default = "default_ramp_years")]
    pub ramp_years: f64,
}

impl Default for WarmingDef {
    fn default() -> Self {
        Self {
            delta_mean_k: 0.0,
            delta_ampl_k: 0.0,
            ramp_years: default_ramp_years(),
        }
    }
}

fn default_ramp_years() -> f64 {
    100.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RunDef {
    /// Total simulated span (years)
    pub years: f64,
    /// Tail window retained by the export step (years)
    pub keep_years: f64,
    /// Report cadence for stored time series (days)
    #[serde(default = "default_report_step_days")]
    pub report_step_days: f64,
}

fn default_report_step_days() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default = "default_tol")]
    pub rtol: f64,
    #[serde(default = "default_tol")]
    pub atol: f64,
    #[serde(default = "default_first_dt_days")]
    pub first_dt_days: f64,
    #[serde(default = "default_min_dt_days")]
    pub min_dt_days: f64,
    #[serde(default = "default_max_dt_days")]
    pub max_dt_days: f64,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// Bounded history buffer; omit to let the buffer grow as needed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_capacity: Option<usize>,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            rtol: default_tol(),
            atol: default_tol(),
            first_dt_days: default_first_dt_days(),
            min_dt_days: default_min_dt_days(),
            max_dt_days: default_max_dt_days(),
            max_steps: default_max_steps(),
            history_capacity: None,
        }
    }
}

fn default_tol() -> f64 {
    1e-8
}

fn default_first_dt_days() -> f64 {
    0.1
}

fn default_min_dt_days() -> f64 {
    1e-10
}

fn default_max_dt_days() -> f64 {
    1.0
}

fn default_max_steps() -> usize {
    10_000_000
}
