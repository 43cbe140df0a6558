//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the model-family vocabulary (`ModelFamily`, `FamilySpec`)
//! - sample points and fit outputs (`SamplePoint`, `FittedModel`, `RSquared`)
//! - run configuration (`FitConfig`) and the curve JSON schema (`CurveFile`)

pub mod types;

pub use types::*;
