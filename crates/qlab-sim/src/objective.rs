//! Expectation values handed to the classical optimizer.

use num_complex::Complex64;

use crate::error::{SimError, SimResult};
use crate::evolution::QaoaAnsatz;
use crate::operator::Operator;
use crate::state::StateVector;

/// `Re⟨ψ|O|ψ⟩`.
///
/// For Hermitian `O` the imaginary part is floating-point residue and is
/// dropped.
pub fn expectation(op: &Operator, psi: &StateVector) -> SimResult<f64> {
    let (rows, cols) = op.dim();
    if rows != cols {
        return Err(SimError::NotSquare { rows, cols });
    }
    if cols != psi.len() {
        return Err(SimError::DimensionMismatch {
            expected: cols,
            got: psi.len(),
        });
    }

    let op_psi = op.dot(psi);
    let value: Complex64 = psi
        .iter()
        .zip(op_psi.iter())
        .map(|(a, b)| a.conj() * b)
        .sum();
    Ok(value.re)
}

/// The QAOA objective `⟨ψ(β, γ)|C|ψ(β, γ)⟩` for mixer `b` and cost `c`.
pub fn target_expectation(
    b: &Operator,
    c: &Operator,
    beta: &[f64],
    gamma: &[f64],
) -> SimResult<f64> {
    QaoaAnsatz::new(b, c)?.expectation(beta, gamma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{cost_operator, mixer_operator, pauli_y};
    use crate::state::{basis_state, uniform_state};

    #[test]
    fn test_zero_depth_is_half_the_edge_count() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 0)];
        let b = mixer_operator(4).unwrap();
        let c = cost_operator(&edges, 4).unwrap();
        let value = target_expectation(&b, &c, &[], &[]).unwrap();
        assert!((value - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_basis_state_expectation_is_cut_value() {
        let c = cost_operator(&[(0, 1), (1, 2)], 3).unwrap();
        // |010⟩: qubit 1 set, both edges cut.
        let psi = basis_state(3, 0b010).unwrap();
        assert_eq!(expectation(&c, &psi).unwrap(), 2.0);
    }

    #[test]
    fn test_imaginary_operator_entries_give_real_result() {
        let y = pauli_y();
        let psi = uniform_state(1).unwrap();
        let value = expectation(&y, &psi).unwrap();
        assert!(value.abs() < 1e-15);
    }

    #[test]
    fn test_dimension_mismatch() {
        let c = cost_operator(&[(0, 1)], 2).unwrap();
        let psi = uniform_state(3).unwrap();
        assert!(matches!(
            expectation(&c, &psi),
            Err(SimError::DimensionMismatch {
                expected: 4,
                got: 8
            })
        ));
    }

    #[test]
    fn test_repeat_evaluation_is_bit_identical() {
        let b = mixer_operator(3).unwrap();
        let c = cost_operator(&[(0, 1), (1, 2), (0, 2)], 3).unwrap();
        let first = target_expectation(&b, &c, &[0.3, 0.8], &[0.5, 1.2]).unwrap();
        let second = target_expectation(&b, &c, &[0.3, 0.8], &[0.5, 1.2]).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }
}
