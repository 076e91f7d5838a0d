//! State vectors over the computational basis.

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::operator::{ZERO, check_register};

/// A complex amplitude vector of length `2^n`.
pub type StateVector = Array1<Complex64>;

/// Tolerance for `|‖ψ‖ − 1|` after evolution.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// The uniform superposition `2^{-n/2} (1, 1, …, 1)`.
///
/// This is the eigenvector of the mixer `Σ X_j` with the largest eigenvalue.
pub fn uniform_state(n_qubits: usize) -> SimResult<StateVector> {
    check_register(n_qubits)?;
    let dim = 1usize << n_qubits;
    let amplitude = Complex64::new((dim as f64).sqrt().recip(), 0.0);
    Ok(Array1::from_elem(dim, amplitude))
}

/// The computational basis state `|index⟩`.
pub fn basis_state(n_qubits: usize, index: usize) -> SimResult<StateVector> {
    check_register(n_qubits)?;
    let dim = 1usize << n_qubits;
    if index >= dim {
        return Err(SimError::DimensionMismatch {
            expected: dim,
            got: index,
        });
    }
    let mut state = Array1::from_elem(dim, ZERO);
    state[index] = Complex64::new(1.0, 0.0);
    Ok(state)
}

/// Euclidean norm `‖ψ‖₂`.
pub fn norm(psi: &StateVector) -> f64 {
    psi.iter().map(|a| a.norm_sqr()).sum::<f64>().sqrt()
}

/// Measurement probabilities `|ψ_b|²` indexed by basis state.
pub fn probabilities(psi: &StateVector) -> Vec<f64> {
    psi.iter().map(|a| a.norm_sqr()).collect()
}

/// The `k` most probable basis indices with their probabilities, most probable
/// first. Ties keep ascending index order.
pub fn most_probable(psi: &StateVector, k: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = probabilities(psi).into_iter().enumerate().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(k);
    ranked
}

/// Render a basis index as a bit string, qubit `n-1` first and qubit 0 last.
pub fn format_bitstring(index: usize, n_qubits: usize) -> String {
    (0..n_qubits)
        .rev()
        .map(|q| if (index >> q) & 1 == 1 { '1' } else { '0' })
        .collect()
}
