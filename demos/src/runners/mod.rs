//! Demo runners for executing quantum algorithms.

pub mod qaoa;

pub use qaoa::{QaoaResult, QaoaRunner, optimize_maxcut, optimize_maxcut_observed};
