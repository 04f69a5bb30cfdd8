//! Mathematical utilities: closed-form least-squares sums.

pub mod ols;

pub use ols::*;
