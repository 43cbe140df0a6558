//! Input/output helpers.
//!
//! - sample point parsing from CSV files and inline flags (`points`)
//! - per-point result exports (CSV) (`export`)
//! - curve JSON read/write (`curve`)

pub mod curve;
pub mod export;
pub mod points;

pub use curve::*;
pub use export::*;
pub use points::*;
