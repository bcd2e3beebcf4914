//! pd-model: age-structured population dynamics with a state-dependent
//! maturation delay.
//!
//! Wires the pd-rates vital-rate functions into pd-solver's delay-model
//! trait. The state tracks juvenile and adult counts, a through-stage
//! survival scale, and the maturation delay itself, which lengthens and
//! shortens as temperature moves development speed around.

pub mod population;

pub use population::{ADULTS, AgeStructuredModel, DELAY, JUVENILES, SURVIVAL};
