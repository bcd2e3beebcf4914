//! The population model equations.

use nalgebra::DVector;
use pd_core::Temperature;
use pd_rates::VitalRates;
use pd_solver::{DelayModel, History, Lag, SolveResult, StateComponent};

/// State layout. The delay rides along as an ordinary state component and
/// is read back by the lag channel at every evaluation.
pub const JUVENILES: usize = 0;
pub const ADULTS: usize = 1;
pub const SURVIVAL: usize = 2;
pub const DELAY: usize = 3;

const COMPONENTS: [StateComponent; 4] = [
    StateComponent {
        name: "juveniles",
        non_negative: true,
    },
    StateComponent {
        name: "adults",
        non_negative: true,
    },
    StateComponent {
        name: "survival_scale",
        non_negative: true,
    },
    StateComponent {
        name: "delay",
        non_negative: true,
    },
];

/// Juvenile/adult stage-structured dynamics under temperature forcing.
///
/// Recruitment into the adult stage is the fecundity of the adults one
/// maturation delay ago, carried through juvenile survival and rescaled by
/// the ratio of current to lagged development speed. Before the first
/// cohort completes development (`t - tau <= 0`) there is no recruitment;
/// lagged state reads resolve through the history store's pre-start
/// constant.
#[derive(Clone, Debug)]
pub struct AgeStructuredModel {
    rates: VitalRates,
    initial: DVector<f64>,
    lag: Lag,
}

impl AgeStructuredModel {
    pub fn new(rates: VitalRates) -> Self {
        // Seed survival and delay from the pre-start constant climate: the
        // population is assumed to have developed under it indefinitely.
        let m_ref = rates.params().maturation.rate_ref();
        let d_j0 = rates.juvenile_mortality(-1e-3);
        let initial = DVector::from_vec(vec![0.0, 0.1, (-d_j0 / m_ref).exp(), 1.0 / m_ref]);
        Self {
            rates,
            initial,
            lag: Lag::FromComponent(DELAY),
        }
    }

    /// Replace the seeded adult count.
    pub fn with_initial_adults(mut self, adults: f64) -> Self {
        self.initial[ADULTS] = adults;
        self
    }

    pub fn rates(&self) -> &VitalRates {
        &self.rates
    }

    /// Forcing temperature at `t` days, for reporting alongside the state.
    pub fn temperature(&self, t: f64) -> Temperature {
        self.rates.temperature(t)
    }
}

impl DelayModel for AgeStructuredModel {
    fn components(&self) -> &[StateComponent] {
        &COMPONENTS
    }

    fn start_time(&self) -> f64 {
        0.0
    }

    fn initial_state(&self) -> DVector<f64> {
        self.initial.clone()
    }

    fn rhs(&self, t: f64, y: &DVector<f64>, past: &History) -> SolveResult<DVector<f64>> {
        let r = &self.rates;
        let lag_t = self.lag.lag_time(t, y)?;

        let m_ratio = r.maturation(t) / r.maturation(lag_t);

        // Lagged reads and recruitment. No cohort finishes development
        // until one full delay has elapsed.
        let (j_lag, recruitment) = if lag_t > self.start_time() {
            let lagged = past.sample(lag_t)?;
            let (j_l, a_l) = (lagged[JUVENILES], lagged[ADULTS]);
            let mj = a_l
                * r.fecundity(lag_t)
                * r.fecundity_scaling(a_l, lag_t)
                * m_ratio
                * y[SURVIVAL];
            (j_l, mj)
        } else {
            (self.initial[JUVENILES], 0.0)
        };

        let d_j_now = r.juvenile_mortality(t);
        let d_j_lag = r.juvenile_mortality(lag_t);

        let d_juveniles = y[ADULTS] * r.fecundity(t) * r.fecundity_scaling(y[ADULTS], t)
            - recruitment
            - (1.0 + r.juvenile_mortality_boost(y[JUVENILES], t)) * d_j_now * y[JUVENILES];

        let d_adults = recruitment
            - (1.0 + r.adult_mortality_boost(y[ADULTS], t))
                * r.adult_mortality(t)
                * y[ADULTS];

        let d_survival = y[SURVIVAL]
            * (m_ratio * (1.0 + r.juvenile_mortality_boost(j_lag, lag_t)) * d_j_lag
                - (1.0 + r.juvenile_mortality_boost(y[JUVENILES], t)) * d_j_now);

        let d_delay = 1.0 - m_ratio;

        Ok(DVector::from_vec(vec![
            d_juveniles,
            d_adults,
            d_survival,
            d_delay,
        ]))
    }
}
