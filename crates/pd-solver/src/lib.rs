//! pd-solver: history-aware adaptive integration for delay differential
//! equations.
//!
//! Provides:
//! - Append-only trajectory history with interpolated lookup and a
//!   constant-extrapolation fallback before the simulation start
//! - Lag channels with fixed or state-dependent delay lengths
//! - A model trait whose vector field may read arbitrary past times
//! - Dormand-Prince 5(4) embedded-pair stepping with local error control
//! - Structured run diagnostics (rejections, domain violations, failures)
//!
//! A single run is strictly sequential; independent runs share nothing and
//! may be executed in parallel by the caller.

pub mod diagnostics;
pub mod error;
pub mod history;
pub mod integrate;
pub mod lag;
pub mod model;
pub mod options;

// Re-exports for public API
pub use diagnostics::{Diagnostics, DomainViolation};
pub use error::{SolveResult, SolverError};
pub use history::{History, HistoryCapacity};
pub use integrate::{Integration, StepProgress, solve, solve_with_progress};
pub use lag::Lag;
pub use model::{DelayModel, StateComponent};
pub use options::SolveOptions;
