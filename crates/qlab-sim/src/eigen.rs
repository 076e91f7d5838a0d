//! Spectral propagation for Hermitian generators.
//!
//! `H = V Λ V†` is computed once; afterwards
//!
//!   exp(-i t H) ψ = V · diag(e^{-i t λ_k}) · V† ψ
//!
//! Every phase factor has unit modulus regardless of `t`, so the propagated
//! state stays on the unit sphere for arbitrarily large angles.

use faer::{Mat, Side};
use ndarray::Array2;
use num_complex::Complex64;
use tracing::debug;

use crate::error::{SimError, SimResult};
use crate::operator::Operator;
use crate::state::StateVector;

/// Eigendecomposition `H = V Λ V†` of a Hermitian operator.
#[derive(Debug, Clone)]
pub struct HermitianEigen {
    /// Real eigenvalues `λ_k`, ascending.
    pub eigenvalues: Vec<f64>,
    /// Unitary `V`; column `k` is the eigenvector for `λ_k`.
    pub eigenvectors: Operator,
}

impl HermitianEigen {
    /// Diagonalize `op`. Only the lower triangle is read.
    pub fn new(op: &Operator) -> SimResult<Self> {
        let (rows, cols) = op.dim();
        if rows != cols {
            return Err(SimError::NotSquare { rows, cols });
        }
        if op.iter().any(|z| !z.is_finite()) {
            return Err(SimError::NonFiniteMatrix);
        }

        let mat = Mat::<Complex64>::from_fn(rows, cols, |i, j| op[(i, j)]);
        let evd = mat
            .self_adjoint_eigen(Side::Lower)
            .map_err(|_| SimError::EigenDecomposition)?;

        let values = evd.S().column_vector();
        let vectors = evd.U();
        let eigenvalues = (0..rows).map(|k| values[k].re).collect();
        let eigenvectors = Array2::from_shape_fn((rows, rows), |(i, j)| vectors[(i, j)]);

        debug!(dim = rows, "diagonalized Hermitian generator");
        Ok(Self {
            eigenvalues,
            eigenvectors,
        })
    }

    /// Dimension of the operator.
    pub fn dim(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Apply `exp(-i t H)` to `psi`.
    pub fn propagate(&self, t: f64, psi: &StateVector) -> SimResult<StateVector> {
        if psi.len() != self.dim() {
            return Err(SimError::DimensionMismatch {
                expected: self.dim(),
                got: psi.len(),
            });
        }
        let v_dag = self.eigenvectors.t().mapv(|z| z.conj());
        let mut coeffs = v_dag.dot(psi);
        for (c, &lambda) in coeffs.iter_mut().zip(&self.eigenvalues) {
            *c *= Complex64::from_polar(1.0, -t * lambda);
        }
        Ok(self.eigenvectors.dot(&coeffs))
    }

    /// The full unitary `exp(-i t H)`.
    pub fn unitary(&self, t: f64) -> Operator {
        let dim = self.dim();
        let phases: Vec<Complex64> = self
            .eigenvalues
            .iter()
            .map(|&lambda| Complex64::from_polar(1.0, -t * lambda))
            .collect();
        let v = &self.eigenvectors;
        Array2::from_shape_fn((dim, dim), |(i, j)| {
            (0..dim).map(|k| v[(i, k)] * phases[k] * v[(j, k)].conj()).sum()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expm::matrix_exp;
    use crate::operator::{identity, mixer_operator, pauli_x, pauli_y};
    use crate::state::{norm, uniform_state};

    fn max_abs_diff(a: &Operator, b: &Operator) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_mixer_spectrum() {
        // Σ X_j on 3 qubits has eigenvalues 3 - 2k with multiplicity C(3, k).
        let eig = HermitianEigen::new(&mixer_operator(3).unwrap()).unwrap();
        let expected = [-3.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 3.0];
        for (got, want) in eig.eigenvalues.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_eigenvectors_are_unitary() {
        let eig = HermitianEigen::new(&mixer_operator(3).unwrap()).unwrap();
        let v = &eig.eigenvectors;
        let v_dag = v.t().mapv(|z| z.conj());
        assert!(max_abs_diff(&v_dag.dot(v), &identity(8)) < 1e-13);
    }

    #[test]
    fn test_unitary_matches_matrix_exp() {
        let h = pauli_x() + pauli_y();
        let eig = HermitianEigen::new(&h).unwrap();
        let expected = matrix_exp(&(&h * Complex64::new(0.0, -0.7))).unwrap();
        assert!(max_abs_diff(&eig.unitary(0.7), &expected) < 1e-13);
    }

    #[test]
    fn test_huge_angle_keeps_unit_norm() {
        let eig = HermitianEigen::new(&mixer_operator(4).unwrap()).unwrap();
        let psi = uniform_state(4).unwrap();
        for t in [1e8, 1e12, -3e15] {
            let out = eig.propagate(t, &psi).unwrap();
            assert!((norm(&out) - 1.0).abs() < 1e-12, "t = {t}");
        }
    }

    #[test]
    fn test_non_finite_entries_rejected() {
        let mut h = identity(2);
        h[(0, 0)] = Complex64::new(f64::NAN, 0.0);
        assert!(matches!(
            HermitianEigen::new(&h),
            Err(SimError::NonFiniteMatrix)
        ));
    }
}
