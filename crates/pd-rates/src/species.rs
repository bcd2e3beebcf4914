//! Species parameter profiles.
//!
//! The presets carry published fits for three hemipteran crop pests, each
//! paired with the climate normals of its home range. Temperatures are
//! absolute (K); rates are per day at the stated reference temperature.

use crate::response::{ArrheniusParams, GaussianParams, MaturationCurve, SchoolfieldParams};
use pd_core::{Temperature, kelvin};

/// Annual temperature cycle of a species' home range.
#[derive(Clone, Copy, Debug)]
pub struct ClimateNormals {
    /// Annual mean (K)
    pub mean_k: f64,
    /// Seasonal amplitude (K)
    pub ampl_k: f64,
    /// Phase shift of the annual sinusoid (rad)
    pub phase_rad: f64,
}

/// Temperature dependence of intraspecific competition strength.
#[derive(Clone, Copy, Debug)]
pub struct CompetitionParams {
    /// Strength at the reference temperature (per capita)
    pub strength_ref: f64,
    /// Activation energy over the Boltzmann constant (K), monotonic form
    pub activation: f64,
    /// Reference temperature
    pub t_ref: Temperature,
    /// Thermal optimum, unimodal form
    pub t_opt: Temperature,
    /// Curve width (K), unimodal form
    pub width_k: f64,
}

/// Full demographic parameter set for one species.
#[derive(Clone, Copy, Debug)]
pub struct SpeciesParams {
    /// Fecundity response (eggs per adult per day)
    pub fecundity: GaussianParams,
    /// Juvenile-to-adult maturation rate
    pub maturation: MaturationCurve,
    /// Background juvenile mortality
    pub juvenile_mortality: ArrheniusParams,
    /// Background adult mortality
    pub adult_mortality: ArrheniusParams,
    /// Intraspecific competition
    pub competition: CompetitionParams,
    /// Home-range climate normals
    pub climate: ClimateNormals,
}

impl SpeciesParams {
    /// Harlequin bug, mediterranean climate.
    pub fn mediterranean() -> Self {
        Self {
            fecundity: GaussianParams {
                rate_max: 0.8921,
                t_opt: kelvin(298.2617),
                width_k: 3.0850,
            },
            maturation: MaturationCurve::SharpeSchoolfield(SchoolfieldParams {
                rate_ref: 0.26638,
                activation: 12651.0,
                t_ref: kelvin(297.0),
                deact_low: -100_000.0,
                t_low: kelvin(288.1),
                deact_high: 53_338.0,
                t_high: kelvin(305.0),
            }),
            juvenile_mortality: ArrheniusParams {
                rate_ref: 0.0547,
                activation: 11_690.0,
                t_ref: kelvin(297.0),
            },
            adult_mortality: ArrheniusParams {
                rate_ref: 0.00287,
                activation: 16_824.0,
                t_ref: kelvin(297.0),
            },
            competition: CompetitionParams {
                strength_ref: 0.2,
                activation: 16_824.0,
                t_ref: kelvin(297.0),
                t_opt: kelvin(298.2617),
                width_k: 3.0850,
            },
            climate: ClimateNormals {
                mean_k: 290.0955,
                ampl_k: 4.879776,
                phase_rad: 4.1904668,
            },
        }
    }

    /// Pod-sucking bug, tropical climate.
    pub fn tropical() -> Self {
        Self {
            fecundity: GaussianParams {
                rate_max: 8.9313,
                t_opt: kelvin(300.44),
                width_k: 3.6419,
            },
            maturation: MaturationCurve::Arrhenius(ArrheniusParams {
                rate_ref: 0.037495313,
                activation: 5831.3,
                t_ref: kelvin(298.0),
            }),
            juvenile_mortality: ArrheniusParams {
                rate_ref: 0.012867748,
                activation: 23_770.0,
                t_ref: kelvin(298.0),
            },
            adult_mortality: ArrheniusParams {
                rate_ref: 0.026525199,
                activation: 9710.0,
                t_ref: kelvin(298.0),
            },
            competition: CompetitionParams {
                strength_ref: 0.2,
                activation: 9710.0,
                t_ref: kelvin(298.0),
                t_opt: kelvin(300.44),
                width_k: 3.6419,
            },
            climate: ClimateNormals {
                mean_k: 300.2086,
                ampl_k: 1.375938,
                phase_rad: 0.5814971,
            },
        }
    }

    /// Green plant bug, temperate climate.
    pub fn temperate() -> Self {
        Self {
            fecundity: GaussianParams {
                rate_max: 2.71727,
                t_opt: kelvin(298.8156),
                width_k: 8.096,
            },
            maturation: MaturationCurve::SharpeSchoolfield(SchoolfieldParams {
                rate_ref: 0.0377,
                activation: 4132.8,
                t_ref: kelvin(293.0),
                deact_low: -100_000.0,
                t_low: kelvin(273.0),
                deact_high: 39_404.0,
                t_high: kelvin(310.396),
            }),
            juvenile_mortality: ArrheniusParams {
                rate_ref: 0.02265,
                activation: 6268.0,
                t_ref: kelvin(298.0),
            },
            adult_mortality: ArrheniusParams {
                rate_ref: 0.0293,
                activation: 4366.0,
                t_ref: kelvin(298.0),
            },
            competition: CompetitionParams {
                strength_ref: 0.2,
                activation: 4366.0,
                t_ref: kelvin(298.0),
                t_opt: kelvin(298.8156),
                width_k: 8.096,
            },
            climate: ClimateNormals {
                mean_k: 285.1977,
                ampl_k: 15.243049,
                phase_rad: 4.4732788,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_have_positive_rates_at_home_mean() {
        for params in [
            SpeciesParams::mediterranean(),
            SpeciesParams::tropical(),
            SpeciesParams::temperate(),
        ] {
            let t = kelvin(params.climate.mean_k);
            assert!(params.maturation.rate_at(t) > 0.0);
            assert!(params.juvenile_mortality.rate_at(t) > 0.0);
            assert!(params.adult_mortality.rate_at(t) > 0.0);
            assert!(params.fecundity.rate_at(t) > 0.0);
        }
    }

    #[test]
    fn tropical_uses_plain_arrhenius_maturation() {
        let params = SpeciesParams::tropical();
        assert!(matches!(params.maturation, MaturationCurve::Arrhenius(_)));
    }
}
