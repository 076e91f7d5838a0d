//! Classical optimizers for variational algorithms.

pub mod nelder_mead;

pub use nelder_mead::NelderMead;

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best parameter vector found.
    pub optimal_params: Vec<f64>,
    /// Objective value at `optimal_params`.
    pub optimal_value: f64,
    /// Number of objective evaluations.
    pub num_evaluations: usize,
    /// Number of iterations.
    pub num_iterations: usize,
    /// Best objective value after each improving iteration.
    pub history: Vec<f64>,
    /// Whether the convergence criteria were met before the budget ran out.
    pub converged: bool,
}

/// Trait for classical optimizers.
///
/// Implementations perform local minimization and always terminate. When the
/// iteration budget is exhausted first, `converged` is `false` and the best
/// iterate is still returned.
pub trait Optimizer {
    /// Minimize the objective function.
    ///
    /// # Arguments
    /// * `objective` - Function to minimize; an `Err` aborts the run
    /// * `initial_params` - Starting point
    fn minimize<F, E>(
        &self,
        objective: F,
        initial_params: Vec<f64>,
    ) -> Result<OptimizationResult, E>
    where
        F: FnMut(&[f64]) -> Result<f64, E>;
}
