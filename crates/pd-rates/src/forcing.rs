//! Seasonal temperature forcing.

use crate::error::{RateError, RateResult};
use crate::species::ClimateNormals;
use pd_core::{DAYS_PER_YEAR, Temperature, kelvin};

/// Sinusoidal annual temperature cycle with an optional linear warming ramp.
///
/// For `t < 0` the forcing is frozen at the annual mean: the system has
/// existed unchanged before the simulation start, and lagged rate
/// evaluations at pre-start times stay well defined. During the ramp the
/// mean and amplitude drift linearly; past the ramp both hold at their
/// shifted values.
#[derive(Clone, Debug)]
pub struct SeasonalForcing {
    normals: ClimateNormals,
    delta_mean_k: f64,
    delta_ampl_k: f64,
    ramp_days: f64,
}

impl SeasonalForcing {
    pub fn new(
        normals: ClimateNormals,
        delta_mean_k: f64,
        delta_ampl_k: f64,
        ramp_years: f64,
    ) -> RateResult<Self> {
        if !ramp_years.is_finite() || ramp_years <= 0.0 {
            return Err(RateError::Forcing {
                what: "warming ramp span must be positive",
            });
        }
        if !delta_mean_k.is_finite() || !delta_ampl_k.is_finite() {
            return Err(RateError::Forcing {
                what: "warming deltas must be finite",
            });
        }
        Ok(Self {
            normals,
            delta_mean_k,
            delta_ampl_k,
            ramp_days: ramp_years * DAYS_PER_YEAR,
        })
    }

    /// Present-day climate: no warming trend.
    pub fn steady(normals: ClimateNormals) -> Self {
        Self {
            normals,
            delta_mean_k: 0.0,
            delta_ampl_k: 0.0,
            ramp_days: DAYS_PER_YEAR,
        }
    }

    /// Flat forcing at a fixed temperature, for reduced test systems.
    pub fn constant(t_k: f64) -> Self {
        Self::steady(ClimateNormals {
            mean_k: t_k,
            ampl_k: 0.0,
            phase_rad: 0.0,
        })
    }

    /// Temperature at time `t` (days since simulation start).
    pub fn at(&self, t: f64) -> Temperature {
        let n = &self.normals;
        if t < 0.0 {
            return kelvin(n.mean_k);
        }

        let season = (2.0 * std::f64::consts::PI * t / DAYS_PER_YEAR + n.phase_rad).sin();
        if t < self.ramp_days {
            let m_mean = self.delta_mean_k / self.ramp_days;
            let m_ampl = self.delta_ampl_k / self.ramp_days;
            kelvin((n.mean_k + m_mean * t) + (n.ampl_k + m_ampl * t) * season)
        } else {
            kelvin((n.mean_k + self.delta_mean_k) + (n.ampl_k + self.delta_ampl_k) * season)
        }
    }

    /// Warmest point of the unshifted annual cycle (mean + amplitude).
    /// Anchors the unimodal competition optimum.
    pub fn warmest_normal(&self) -> Temperature {
        kelvin(self.normals.mean_k + self.normals.ampl_k)
    }

    pub fn normals(&self) -> &ClimateNormals {
        &self.normals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_core::in_kelvin;

    fn med_normals() -> ClimateNormals {
        ClimateNormals {
            mean_k: 290.0955,
            ampl_k: 4.879776,
            phase_rad: 4.1904668,
        }
    }

    #[test]
    fn frozen_before_start() {
        let f = SeasonalForcing::steady(med_normals());
        assert_eq!(in_kelvin(f.at(-1.0)), 290.0955);
        assert_eq!(in_kelvin(f.at(-1e6)), 290.0955);
    }

    #[test]
    fn annual_period_without_ramp() {
        let f = SeasonalForcing::steady(med_normals());
        for t in [10.0, 100.0, 250.0] {
            let a = in_kelvin(f.at(t));
            let b = in_kelvin(f.at(t + DAYS_PER_YEAR));
            assert!((a - b).abs() < 1e-9, "t={t}: {a} vs {b}");
        }
    }

    #[test]
    fn ramp_is_continuous_at_plateau() {
        let f = SeasonalForcing::new(med_normals(), 3.0, 1.0, 100.0).unwrap();
        let ramp_end = 100.0 * DAYS_PER_YEAR;
        let before = in_kelvin(f.at(ramp_end - 1e-6));
        let after = in_kelvin(f.at(ramp_end));
        assert!((before - after).abs() < 1e-6);
    }

    #[test]
    fn plateau_mean_shift() {
        let f = SeasonalForcing::new(med_normals(), 3.0, 0.0, 100.0).unwrap();
        let t = 101.0 * DAYS_PER_YEAR;
        let shifted = in_kelvin(f.at(t));
        let base = in_kelvin(SeasonalForcing::steady(med_normals()).at(t));
        assert!((shifted - base - 3.0).abs() < 1e-9);
    }

    #[test]
    fn constant_forcing_is_flat() {
        let f = SeasonalForcing::constant(300.0);
        for t in [-5.0, 0.0, 17.3, 4000.0] {
            assert_eq!(in_kelvin(f.at(t)), 300.0);
        }
    }

    #[test]
    fn rejects_degenerate_ramp() {
        assert!(SeasonalForcing::new(med_normals(), 1.0, 0.0, 0.0).is_err());
        assert!(SeasonalForcing::new(med_normals(), f64::NAN, 0.0, 100.0).is_err());
    }
}
