//! Vital rates for one species under one forcing trajectory.

use crate::competition::{CompetitionForm, DensityDependence};
use crate::error::RateResult;
use crate::forcing::SeasonalForcing;
use crate::response::GaussianParams;
use crate::species::SpeciesParams;
use pd_core::{Temperature, ensure_positive, in_kelvin};

/// Bundles species parameters, forcing, and the density-dependence strategy
/// into the per-capita rate functions the population equations consume.
///
/// All methods take time in days and are pure.
#[derive(Clone, Debug)]
pub struct VitalRates {
    params: SpeciesParams,
    forcing: SeasonalForcing,
    form: CompetitionForm,
    density_dependence: DensityDependence,
    /// Competition strength at the warmest normal temperature; peak of the
    /// unimodal form, precomputed at construction.
    q_peak: f64,
}

impl VitalRates {
    pub fn new(
        params: SpeciesParams,
        forcing: SeasonalForcing,
        form: CompetitionForm,
        density_dependence: DensityDependence,
    ) -> RateResult<Self> {
        ensure_positive(params.maturation.rate_ref(), "maturation rate_ref")?;
        ensure_positive(params.juvenile_mortality.rate_ref, "juvenile mortality rate_ref")?;
        ensure_positive(params.adult_mortality.rate_ref, "adult mortality rate_ref")?;
        ensure_positive(params.fecundity.rate_max, "fecundity rate_max")?;
        ensure_positive(params.fecundity.width_k, "fecundity width")?;
        ensure_positive(params.competition.width_k, "competition width")?;

        // Anchor the unimodal competition peak to the warmest normal
        // temperature via the monotonic form evaluated there.
        let q = &params.competition;
        let tr = in_kelvin(q.t_ref);
        let tmax = in_kelvin(forcing.warmest_normal());
        let q_peak = q.strength_ref * (q.activation * (1.0 / tr - 1.0 / tmax)).exp();

        Ok(Self {
            params,
            forcing,
            form,
            density_dependence,
            q_peak,
        })
    }

    /// Forcing temperature at time `t` (days).
    pub fn temperature(&self, t: f64) -> Temperature {
        self.forcing.at(t)
    }

    /// Per-adult fecundity (eggs/day).
    pub fn fecundity(&self, t: f64) -> f64 {
        self.params.fecundity.rate_at(self.forcing.at(t))
    }

    /// Juvenile-to-adult maturation rate (1/day).
    pub fn maturation(&self, t: f64) -> f64 {
        self.params.maturation.rate_at(self.forcing.at(t))
    }

    /// Background juvenile mortality (1/day).
    pub fn juvenile_mortality(&self, t: f64) -> f64 {
        self.params.juvenile_mortality.rate_at(self.forcing.at(t))
    }

    /// Background adult mortality (1/day).
    pub fn adult_mortality(&self, t: f64) -> f64 {
        self.params.adult_mortality.rate_at(self.forcing.at(t))
    }

    /// Competition strength `q(T(t))` under the selected form.
    fn competition_strength(&self, t: f64) -> f64 {
        let q = &self.params.competition;
        match self.form {
            CompetitionForm::Unimodal => GaussianParams {
                rate_max: self.q_peak,
                t_opt: q.t_opt,
                width_k: q.width_k,
            }
            .rate_at(self.forcing.at(t)),
            CompetitionForm::Monotonic => {
                let tr = in_kelvin(q.t_ref);
                let tk = in_kelvin(self.forcing.at(t));
                q.strength_ref * (q.activation * (1.0 / tr - 1.0 / tk)).exp()
            }
            CompetitionForm::Constant => q.strength_ref,
        }
    }

    /// Multiplicative discount on fecundity from crowding by `adults`.
    /// Unity unless density dependence acts through fecundity.
    pub fn fecundity_scaling(&self, adults: f64, t: f64) -> f64 {
        match self.density_dependence {
            DensityDependence::Fecundity => (-self.competition_strength(t) * adults).exp(),
            _ => 1.0,
        }
    }

    /// Additive boost to adult mortality from crowding. Zero unless density
    /// dependence acts through adult mortality.
    pub fn adult_mortality_boost(&self, adults: f64, t: f64) -> f64 {
        match self.density_dependence {
            DensityDependence::AdultMortality => self.competition_strength(t) * adults,
            _ => 0.0,
        }
    }

    /// Additive boost to juvenile mortality from crowding. Zero unless
    /// density dependence acts through juvenile mortality.
    pub fn juvenile_mortality_boost(&self, juveniles: f64, t: f64) -> f64 {
        match self.density_dependence {
            DensityDependence::JuvenileMortality => self.competition_strength(t) * juveniles,
            _ => 0.0,
        }
    }

    pub fn forcing(&self) -> &SeasonalForcing {
        &self.forcing
    }

    pub fn params(&self) -> &SpeciesParams {
        &self.params
    }
}
