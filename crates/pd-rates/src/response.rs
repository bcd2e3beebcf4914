//! Thermal response curves for per-capita vital rates.
//!
//! Every curve maps an absolute temperature to a per-day rate. Parameters are
//! expressed relative to a reference temperature so that published estimates
//! can be carried over directly.

use pd_core::{Temperature, in_kelvin};

/// Boltzmann-Arrhenius response: `k(T) = k_ref * exp(A * (1/T_ref - 1/T))`.
#[derive(Clone, Copy, Debug)]
pub struct ArrheniusParams {
    /// Rate at the reference temperature (1/day)
    pub rate_ref: f64,
    /// Activation energy over the Boltzmann constant (K)
    pub activation: f64,
    /// Reference temperature
    pub t_ref: Temperature,
}

impl ArrheniusParams {
    pub fn rate_at(&self, t: Temperature) -> f64 {
        let tr = in_kelvin(self.t_ref);
        let tk = in_kelvin(t);
        self.rate_ref * (self.activation * (1.0 / tr - 1.0 / tk)).exp()
    }
}

/// Sharpe-Schoolfield response: an Arrhenius core damped by low- and
/// high-temperature enzyme deactivation terms.
#[derive(Clone, Copy, Debug)]
pub struct SchoolfieldParams {
    /// Rate at the reference temperature (1/day)
    pub rate_ref: f64,
    /// Activation energy over the Boltzmann constant (K)
    pub activation: f64,
    /// Reference temperature
    pub t_ref: Temperature,
    /// Low-temperature deactivation energy (K)
    pub deact_low: f64,
    /// Low-temperature deactivation threshold
    pub t_low: Temperature,
    /// High-temperature deactivation energy (K)
    pub deact_high: f64,
    /// High-temperature deactivation threshold
    pub t_high: Temperature,
}

impl SchoolfieldParams {
    pub fn rate_at(&self, t: Temperature) -> f64 {
        let tr = in_kelvin(self.t_ref);
        let tk = in_kelvin(t);
        let tl = in_kelvin(self.t_low);
        let th = in_kelvin(self.t_high);

        let core = self.rate_ref * tk / tr * (self.activation * (1.0 / tr - 1.0 / tk)).exp();
        let low = (self.deact_low * (1.0 / tl - 1.0 / tk)).exp();
        let high = (self.deact_high * (1.0 / th - 1.0 / tk)).exp();
        core / (1.0 + low + high)
    }
}

/// Gaussian (unimodal) response: `k(T) = k_max * exp(-(T - T_opt)^2 / 2w^2)`.
#[derive(Clone, Copy, Debug)]
pub struct GaussianParams {
    /// Rate at the thermal optimum (1/day)
    pub rate_max: f64,
    /// Thermal optimum
    pub t_opt: Temperature,
    /// Curve width (K)
    pub width_k: f64,
}

impl GaussianParams {
    pub fn rate_at(&self, t: Temperature) -> f64 {
        let dt = in_kelvin(t) - in_kelvin(self.t_opt);
        self.rate_max * (-dt * dt / (2.0 * self.width_k * self.width_k)).exp()
    }
}

/// Maturation rate curve. The tropical profile fits a plain Arrhenius
/// response; the others need the full Sharpe-Schoolfield form.
#[derive(Clone, Copy, Debug)]
pub enum MaturationCurve {
    Arrhenius(ArrheniusParams),
    SharpeSchoolfield(SchoolfieldParams),
}

impl MaturationCurve {
    pub fn rate_at(&self, t: Temperature) -> f64 {
        match self {
            MaturationCurve::Arrhenius(p) => p.rate_at(t),
            MaturationCurve::SharpeSchoolfield(p) => p.rate_at(t),
        }
    }

    /// Rate at the reference temperature of the underlying fit.
    pub fn rate_ref(&self) -> f64 {
        match self {
            MaturationCurve::Arrhenius(p) => p.rate_ref,
            MaturationCurve::SharpeSchoolfield(p) => p.rate_ref,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_core::kelvin;

    #[test]
    fn arrhenius_matches_reference_rate() {
        let p = ArrheniusParams {
            rate_ref: 0.0547,
            activation: 11690.0,
            t_ref: kelvin(297.0),
        };
        assert!((p.rate_at(kelvin(297.0)) - 0.0547).abs() < 1e-15);
    }

    #[test]
    fn arrhenius_increases_with_temperature() {
        let p = ArrheniusParams {
            rate_ref: 1.0,
            activation: 10_000.0,
            t_ref: kelvin(295.0),
        };
        assert!(p.rate_at(kelvin(300.0)) > p.rate_at(kelvin(295.0)));
        assert!(p.rate_at(kelvin(295.0)) > p.rate_at(kelvin(290.0)));
    }

    #[test]
    fn gaussian_peaks_at_optimum() {
        let p = GaussianParams {
            rate_max: 0.8921,
            t_opt: kelvin(298.2617),
            width_k: 3.085,
        };
        let peak = p.rate_at(kelvin(298.2617));
        assert!((peak - 0.8921).abs() < 1e-15);
        assert!(p.rate_at(kelvin(296.0)) < peak);
        assert!(p.rate_at(kelvin(301.0)) < peak);
        // symmetric about the optimum
        let lo = p.rate_at(kelvin(298.2617 - 2.0));
        let hi = p.rate_at(kelvin(298.2617 + 2.0));
        assert!((lo - hi).abs() < 1e-12);
    }

    #[test]
    fn schoolfield_near_reference_when_deactivation_far() {
        // Mediterranean maturation fit: deactivation thresholds bracket the
        // reference temperature widely, so the damping term is near 1 there.
        let p = SchoolfieldParams {
            rate_ref: 0.26638,
            activation: 12651.0,
            t_ref: kelvin(297.0),
            deact_low: -100_000.0,
            t_low: kelvin(288.1),
            deact_high: 53_338.0,
            t_high: kelvin(305.0),
        };
        let at_ref = p.rate_at(kelvin(297.0));
        assert!((at_ref - 0.26638).abs() / 0.26638 < 0.05);
        // collapses above the high threshold
        assert!(p.rate_at(kelvin(310.0)) < at_ref);
    }
}
