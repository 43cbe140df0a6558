//! Mathematical utilities: the shared least-squares solvers.

pub mod ols;

pub use ols::*;
