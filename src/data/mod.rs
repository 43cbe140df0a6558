//! Sample data helpers.
//!
//! - deterministic synthetic sample generation (`sample`)

pub mod sample;

pub use sample::*;
