//! Curve fitting orchestration.
//!
//! Responsibilities:
//!
//! - fit each candidate family with its closed-form routine (`fitter`)
//! - score goodness of fit with R² (`score`)
//! - select the best model under the R²-then-priority rule (`selection`)

pub mod fitter;
pub mod score;
pub mod selection;

pub use fitter::*;
pub use score::*;
pub use selection::*;
