//! Exact QAOA state evolution.
//!
//! Starting from the uniform superposition `|s⟩`, each layer applies the cost
//! unitary and then the mixer unitary:
//!
//!   |ψ_p⟩ = e^{-iβ_p B} e^{-iγ_p C} ⋯ e^{-iβ_1 B} e^{-iγ_1 C} |s⟩
//!
//! Both exponentials are exact for any real angle. A diagonal `C` is
//! exponentiated entrywise; `B` and any non-diagonal `C` are diagonalized
//! once and propagated through their eigenbasis.

use num_complex::Complex64;
use tracing::trace;

use crate::eigen::HermitianEigen;
use crate::error::{SimError, SimResult};
use crate::objective::expectation;
use crate::operator::{Operator, diagonal_real, is_diagonal, is_hermitian, n_qubits_for_dim};
use crate::state::{NORM_TOLERANCE, StateVector, norm, uniform_state};

/// Hermiticity tolerance applied to caller-supplied operators.
pub const OPERATOR_TOLERANCE: f64 = 1e-10;

/// How `exp(-iγC)` is applied.
#[derive(Debug, Clone)]
enum CostPropagator {
    /// Entrywise phases from the real diagonal of `C`.
    Diagonal(Vec<f64>),
    Spectral(HermitianEigen),
}

/// A mixer/cost operator pair, validated and diagonalized once and reused
/// for every parameter evaluation.
#[derive(Debug, Clone)]
pub struct QaoaAnsatz<'a> {
    mixer: &'a Operator,
    cost: &'a Operator,
    mixer_eigen: HermitianEigen,
    cost_propagator: CostPropagator,
    n_qubits: usize,
}

impl<'a> QaoaAnsatz<'a> {
    /// Validate the operator pair.
    ///
    /// Shape problems are returned as errors. A non-Hermitian operator means
    /// the builder that produced it is broken and triggers a panic.
    pub fn new(mixer: &'a Operator, cost: &'a Operator) -> SimResult<Self> {
        for op in [mixer, cost] {
            let (rows, cols) = op.dim();
            if rows != cols {
                return Err(SimError::NotSquare { rows, cols });
            }
        }
        if cost.nrows() != mixer.nrows() {
            return Err(SimError::DimensionMismatch {
                expected: mixer.nrows(),
                got: cost.nrows(),
            });
        }
        let n_qubits = n_qubits_for_dim(mixer.nrows())?;

        assert!(
            is_hermitian(mixer, OPERATOR_TOLERANCE),
            "mixer operator is not Hermitian"
        );
        assert!(
            is_hermitian(cost, OPERATOR_TOLERANCE),
            "cost operator is not Hermitian"
        );

        let mixer_eigen = HermitianEigen::new(mixer)?;
        let cost_propagator = if is_diagonal(cost, 0.0) {
            CostPropagator::Diagonal(diagonal_real(cost))
        } else {
            CostPropagator::Spectral(HermitianEigen::new(cost)?)
        };
        Ok(Self {
            mixer,
            cost,
            mixer_eigen,
            cost_propagator,
            n_qubits,
        })
    }

    /// Register width inferred from the operator dimension.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The cost operator `C`.
    pub fn cost(&self) -> &Operator {
        self.cost
    }

    /// The mixer operator `B`.
    pub fn mixer(&self) -> &Operator {
        self.mixer
    }

    /// Prepare `|ψ(β, γ)⟩`. Empty parameter lists return `|s⟩`.
    pub fn evolve(&self, beta: &[f64], gamma: &[f64]) -> SimResult<StateVector> {
        if beta.len() != gamma.len() {
            return Err(SimError::ParameterLengthMismatch {
                beta: beta.len(),
                gamma: gamma.len(),
            });
        }
        if let Some(&bad) = beta.iter().chain(gamma).find(|x| !x.is_finite()) {
            return Err(SimError::NonFiniteParameter(bad));
        }

        let mut psi = uniform_state(self.n_qubits)?;
        for (&b, &g) in beta.iter().zip(gamma) {
            psi = self.apply_cost_layer(psi, g)?;
            psi = self.mixer_eigen.propagate(b, &psi)?;
        }

        let norm = norm(&psi);
        trace!(layers = beta.len(), norm, "evolved QAOA state");
        assert!(
            (norm - 1.0).abs() < NORM_TOLERANCE,
            "evolved state left the unit sphere: ‖ψ‖ = {norm}"
        );
        Ok(psi)
    }

    /// `Re⟨ψ(β, γ)|C|ψ(β, γ)⟩`.
    pub fn expectation(&self, beta: &[f64], gamma: &[f64]) -> SimResult<f64> {
        let psi = self.evolve(beta, gamma)?;
        match &self.cost_propagator {
            CostPropagator::Diagonal(diag) => Ok(psi
                .iter()
                .zip(diag)
                .map(|(a, c)| a.norm_sqr() * c)
                .sum()),
            CostPropagator::Spectral(_) => expectation(self.cost, &psi),
        }
    }

    fn apply_cost_layer(&self, mut psi: StateVector, gamma: f64) -> SimResult<StateVector> {
        match &self.cost_propagator {
            CostPropagator::Diagonal(diag) => {
                for (amp, &c) in psi.iter_mut().zip(diag) {
                    *amp *= Complex64::from_polar(1.0, -gamma * c);
                }
                Ok(psi)
            }
            CostPropagator::Spectral(eigen) => eigen.propagate(gamma, &psi),
        }
    }
}

/// Evolve the uniform state under `p = beta.len()` QAOA layers.
///
/// Equivalent to `QaoaAnsatz::new(b, c)?.evolve(beta, gamma)`; prefer the
/// ansatz when evaluating many parameter sets against the same operators.
pub fn evolve(
    b: &Operator,
    c: &Operator,
    beta: &[f64],
    gamma: &[f64],
) -> SimResult<StateVector> {
    QaoaAnsatz::new(b, c)?.evolve(beta, gamma)
}
