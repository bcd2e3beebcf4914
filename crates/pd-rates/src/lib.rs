//! pd-rates: temperature forcing and vital-rate laws.
//!
//! Provides:
//! - Seasonal temperature forcing with an optional century-scale warming ramp
//! - Thermal response curves (Boltzmann-Arrhenius, Sharpe-Schoolfield, Gaussian)
//! - Density-dependent competition applied through a selectable life-history channel
//! - Species parameter profiles (mediterranean, tropical, temperate presets)
//!
//! All functions are pure: parameters travel in immutable structs, never in
//! process-wide state.

pub mod competition;
pub mod error;
pub mod forcing;
pub mod response;
pub mod species;
pub mod vital;

// Re-exports for public API
pub use competition::{CompetitionForm, DensityDependence};
pub use error::{RateError, RateResult};
pub use forcing::SeasonalForcing;
pub use response::{ArrheniusParams, GaussianParams, MaturationCurve, SchoolfieldParams};
pub use species::{ClimateNormals, CompetitionParams, SpeciesParams};
pub use vital::VitalRates;
