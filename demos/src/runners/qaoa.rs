//! QAOA (Quantum Approximate Optimization Algorithm) runner.
//!
//! The driver builds the mixer `B` and cost `C` once, then hands the
//! classical optimizer the negated expectation
//!
//!   f(x) = −⟨ψ(β, γ)|C|ψ(β, γ)⟩,  x = [β_0 … β_{p-1}, γ_0 … γ_{p-1}]
//!
//! so that minimizing `f` maximizes the expected cut.

use qlab_sim::state::{StateVector, most_probable};
use qlab_sim::{QaoaAnsatz, SimError, SimResult, cost_operator, evolve, mixer_operator};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::optimizers::{NelderMead, OptimizationResult, Optimizer};
use crate::problems::Graph;

/// Result of a QAOA run.
#[derive(Debug, Clone, Serialize)]
pub struct QaoaResult {
    /// Optimal mixer angles β.
    pub optimal_beta: Vec<f64>,
    /// Optimal cost angles γ.
    pub optimal_gamma: Vec<f64>,
    /// Expected cut `⟨C⟩` at the optimal angles.
    pub expectation: f64,
    /// Whether the optimizer met its convergence criteria.
    pub converged: bool,
    /// Number of optimizer iterations.
    pub iterations: usize,
    /// Number of expectation evaluations.
    pub evaluations: usize,
    /// Best expected cut after each improving iteration.
    pub expectation_history: Vec<f64>,
}

impl QaoaResult {
    /// Number of QAOA layers.
    pub fn layers(&self) -> usize {
        self.optimal_beta.len()
    }

    /// The optimal angles in optimizer layout, β first.
    pub fn params(&self) -> Vec<f64> {
        self.optimal_beta
            .iter()
            .chain(&self.optimal_gamma)
            .copied()
            .collect()
    }
}

/// Maximize the expected cut over `2p` angles.
///
/// `initial` defaults to all zeros. Errors if `p == 0`, if `initial` does
/// not hold exactly `2p` values, if an edge is invalid, or if an objective
/// evaluation fails.
pub fn optimize_maxcut<O: Optimizer>(
    edges: &[(usize, usize)],
    n_qubits: usize,
    p: usize,
    initial: Option<Vec<f64>>,
    optimizer: &O,
) -> SimResult<QaoaResult> {
    optimize_maxcut_observed(edges, n_qubits, p, initial, optimizer, |_, _| {})
}

/// [`optimize_maxcut`] that reports every evaluation as
/// `(evaluation_count, expectation)`.
pub fn optimize_maxcut_observed<O, F>(
    edges: &[(usize, usize)],
    n_qubits: usize,
    p: usize,
    initial: Option<Vec<f64>>,
    optimizer: &O,
    mut observer: F,
) -> SimResult<QaoaResult>
where
    O: Optimizer,
    F: FnMut(usize, f64),
{
    if p == 0 {
        return Err(SimError::InvalidDepth);
    }
    let initial = initial.unwrap_or_else(|| vec![0.0; 2 * p]);
    if initial.len() != 2 * p {
        return Err(SimError::InvalidParameterCount {
            expected: 2 * p,
            got: initial.len(),
        });
    }

    let b = mixer_operator(n_qubits)?;
    let c = cost_operator(edges, n_qubits)?;
    let ansatz = QaoaAnsatz::new(&b, &c)?;
    debug!(n_qubits, p, n_edges = edges.len(), "starting QAOA optimization");

    let mut calls = 0;
    let objective = |x: &[f64]| -> SimResult<f64> {
        let (beta, gamma) = x.split_at(p);
        let value = ansatz.expectation(beta, gamma)?;
        calls += 1;
        observer(calls, value);
        Ok(-value)
    };

    let OptimizationResult {
        optimal_params,
        optimal_value,
        num_evaluations,
        num_iterations,
        history,
        converged,
    } = optimizer.minimize(objective, initial)?;

    let expectation = -optimal_value;
    if converged {
        info!(
            p,
            expectation,
            iterations = num_iterations,
            evaluations = num_evaluations,
            "QAOA optimization converged"
        );
    } else {
        warn!(
            p,
            expectation,
            iterations = num_iterations,
            evaluations = num_evaluations,
            "QAOA optimization did not converge, returning best iterate"
        );
    }

    let (beta, gamma) = optimal_params.split_at(p);
    Ok(QaoaResult {
        optimal_beta: beta.to_vec(),
        optimal_gamma: gamma.to_vec(),
        expectation,
        converged,
        iterations: num_iterations,
        evaluations: num_evaluations,
        expectation_history: history.iter().map(|v| -v).collect(),
    })
}

/// QAOA runner configuration.
#[derive(Debug, Clone)]
pub struct QaoaRunner {
    /// The graph to optimize.
    pub graph: Graph,
    /// Number of QAOA layers.
    pub p: usize,
    /// Maximum optimization iterations.
    pub maxiter: usize,
    /// Parameter convergence tolerance.
    pub xatol: f64,
    /// Objective convergence tolerance.
    pub fatol: f64,
    /// Initial simplex offset.
    pub initial_step: f64,
    /// Starting angles; zeros when unset.
    pub initial_params: Option<Vec<f64>>,
}

impl QaoaRunner {
    /// Create a new QAOA runner.
    pub fn new(graph: Graph) -> Self {
        let defaults = NelderMead::default();
        Self {
            graph,
            p: 1,
            maxiter: defaults.maxiter,
            xatol: defaults.xatol,
            fatol: defaults.fatol,
            initial_step: defaults.initial_step,
            initial_params: None,
        }
    }

    /// Set the number of QAOA layers.
    pub fn with_layers(mut self, p: usize) -> Self {
        self.p = p;
        self
    }

    /// Set maximum iterations.
    pub fn with_maxiter(mut self, maxiter: usize) -> Self {
        self.maxiter = maxiter;
        self
    }

    /// Set the parameter and objective convergence tolerances.
    pub fn with_tolerance(mut self, xatol: f64, fatol: f64) -> Self {
        self.xatol = xatol;
        self.fatol = fatol;
        self
    }

    /// Set the initial simplex offset.
    pub fn with_initial_step(mut self, initial_step: f64) -> Self {
        self.initial_step = initial_step;
        self
    }

    /// Set starting angles in optimizer layout, β first.
    pub fn with_initial_params(mut self, params: Vec<f64>) -> Self {
        self.initial_params = Some(params);
        self
    }

    /// The optimizer [`run`](Self::run) uses.
    pub fn optimizer(&self) -> NelderMead {
        NelderMead::new()
            .with_maxiter(self.maxiter)
            .with_maxfev(2 * self.maxiter)
            .with_tolerances(self.xatol, self.fatol)
            .with_initial_step(self.initial_step)
    }

    /// Run QAOA with the configured Nelder-Mead optimizer.
    pub fn run(&self) -> SimResult<QaoaResult> {
        self.run_with_optimizer(&self.optimizer())
    }

    /// Run QAOA with a caller-supplied optimizer.
    pub fn run_with_optimizer<O: Optimizer>(&self, optimizer: &O) -> SimResult<QaoaResult> {
        self.graph.validate()?;
        optimize_maxcut(
            &self.graph.edges,
            self.graph.n_nodes,
            self.p,
            self.initial_params.clone(),
            optimizer,
        )
    }

    /// Run QAOA, reporting `(evaluation_count, expectation)` after every
    /// evaluation.
    pub fn run_observed<F: FnMut(usize, f64)>(&self, observer: F) -> SimResult<QaoaResult> {
        self.graph.validate()?;
        optimize_maxcut_observed(
            &self.graph.edges,
            self.graph.n_nodes,
            self.p,
            self.initial_params.clone(),
            &self.optimizer(),
            observer,
        )
    }

    /// The QAOA state at the optimal angles of `result`.
    pub fn final_state(&self, result: &QaoaResult) -> SimResult<StateVector> {
        let b = mixer_operator(self.graph.n_nodes)?;
        let c = cost_operator(&self.graph.edges, self.graph.n_nodes)?;
        evolve(&b, &c, &result.optimal_beta, &result.optimal_gamma)
    }

    /// The `k` most probable bitstrings of the final state.
    pub fn most_probable(&self, result: &QaoaResult, k: usize) -> SimResult<Vec<(usize, f64)>> {
        Ok(most_probable(&self.final_state(result)?, k))
    }

    /// Expected cut divided by the brute-force maximum cut.
    pub fn approximation_ratio(&self, result: &QaoaResult) -> f64 {
        let (_, max_cut) = self.graph.max_cut_brute_force();
        if max_cut > 0.0 {
            result.expectation / max_cut
        } else {
            1.0
        }
    }
}
