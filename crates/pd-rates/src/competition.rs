//! Density-dependence strategy selection.
//!
//! Both choices are fixed at model-construction time and dispatched by
//! match, never by string comparison in the evaluation loop.

/// Temperature dependence of the competition strength `q(T)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CompetitionForm {
    /// Gaussian in temperature, peaking at the warmest part of the normal year
    #[default]
    Unimodal,
    /// Boltzmann-Arrhenius, monotonically increasing
    Monotonic,
    /// Temperature-independent
    Constant,
}

/// Which life-history channel density dependence acts through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DensityDependence {
    /// Fecundity discounted by `exp(-q * A)`
    #[default]
    Fecundity,
    /// Adult mortality boosted by `q * A`
    AdultMortality,
    /// Juvenile mortality boosted by `q * J`
    JuvenileMortality,
}
