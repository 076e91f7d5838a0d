//! Problem definitions for quantum algorithms.

pub mod maxcut;

pub use maxcut::Graph;
