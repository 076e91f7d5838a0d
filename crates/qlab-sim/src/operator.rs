//! Dense n-qubit operators built from 2×2 matrices by Kronecker products.
//!
//! # Qubit ordering
//!
//! Qubit 0 is the **rightmost** (fastest-varying) tensor factor, so it maps
//! to the least-significant bit of a computational basis index:
//!
//! ```text
//! O_{n-1} ⊗ … ⊗ O_1 ⊗ O_0        |b⟩ = |b_{n-1} … b_1 b_0⟩,  b = Σ b_q 2^q
//! ```
//!
//! The same convention is used by [`crate::state::format_bitstring`] and by
//! the cut-value helpers in the demos crate.
//!
//! # Example
//!
//! ```rust
//! use qlab_sim::operator::{cost_operator, diagonal_real};
//!
//! // Single edge: only |01⟩ and |10⟩ are cut.
//! let c = cost_operator(&[(0, 1)], 2).unwrap();
//! assert_eq!(diagonal_real(&c), vec![0.0, 1.0, 1.0, 0.0]);
//! ```

use ndarray::{Array2, arr2};
use num_complex::Complex64;
use tracing::debug;

use crate::error::{SimError, SimResult};

/// A dense complex square matrix.
pub type Operator = Array2<Complex64>;

/// Largest register width for which dense operators are built.
pub const MAX_QUBITS: usize = 12;

/// Tolerance used when asserting that built operators are Hermitian.
pub const HERMITIAN_TOLERANCE: f64 = 1e-12;

pub(crate) const ZERO: Complex64 = Complex64::new(0.0, 0.0);
pub(crate) const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// The `dim × dim` identity.
pub fn identity(dim: usize) -> Operator {
    Array2::eye(dim)
}

/// Pauli-X.
pub fn pauli_x() -> Operator {
    arr2(&[[ZERO, ONE], [ONE, ZERO]])
}

/// Pauli-Y.
pub fn pauli_y() -> Operator {
    let i = Complex64::new(0.0, 1.0);
    arr2(&[[ZERO, -i], [i, ZERO]])
}

/// Pauli-Z.
pub fn pauli_z() -> Operator {
    arr2(&[[ONE, ZERO], [ZERO, -ONE]])
}

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &Operator, b: &Operator) -> Operator {
    let (br, bc) = b.dim();
    let (ar, ac) = a.dim();
    Array2::from_shape_fn((ar * br, ac * bc), |(i, j)| {
        a[(i / br, j / bc)] * b[(i % br, j % bc)]
    })
}

/// Number of qubits encoded by a `2^n` dimension.
pub fn n_qubits_for_dim(dim: usize) -> SimResult<usize> {
    if dim < 2 || !dim.is_power_of_two() {
        return Err(SimError::NotPowerOfTwo(dim));
    }
    Ok(dim.trailing_zeros() as usize)
}

/// Reject register widths that cannot be represented densely.
pub(crate) fn check_register(n_qubits: usize) -> SimResult<()> {
    if n_qubits == 0 {
        return Err(SimError::InvalidQubitCount(n_qubits));
    }
    if n_qubits > MAX_QUBITS {
        return Err(SimError::RegisterTooLarge {
            n_qubits,
            max: MAX_QUBITS,
        });
    }
    Ok(())
}

fn check_qubit(qubit: usize, n_qubits: usize) -> SimResult<()> {
    if qubit >= n_qubits {
        return Err(SimError::QubitOutOfRange { qubit, n_qubits });
    }
    Ok(())
}

fn check_single_qubit_op(op: &Operator) -> SimResult<()> {
    let (rows, cols) = op.dim();
    if rows != cols {
        return Err(SimError::NotSquare { rows, cols });
    }
    if rows != 2 {
        return Err(SimError::DimensionMismatch {
            expected: 2,
            got: rows,
        });
    }
    Ok(())
}

/// Tensor together one 2×2 factor per qubit, qubit `n-1` leftmost.
fn tensor_register(
    n_qubits: usize,
    mut factor: impl FnMut(usize) -> Option<Operator>,
) -> Operator {
    let id = identity(2);
    (0..n_qubits).rev().fold(identity(1), |acc, q| match factor(q) {
        Some(op) => kron(&acc, &op),
        None => kron(&acc, &id),
    })
}

/// Embed `op` on qubit `qubit` of an `n_qubits` register, identity elsewhere.
pub fn single_site_operator(
    op: &Operator,
    qubit: usize,
    n_qubits: usize,
) -> SimResult<Operator> {
    check_single_qubit_op(op)?;
    check_register(n_qubits)?;
    check_qubit(qubit, n_qubits)?;

    Ok(tensor_register(n_qubits, |q| (q == qubit).then(|| op.clone())))
}

/// Embed `op1` on qubit `i` and `op2` on qubit `j`, identity elsewhere.
///
/// The result does not depend on whether `i < j`: swapping `(op1, i)` with
/// `(op2, j)` yields the same matrix.
pub fn two_site_operator(
    op1: &Operator,
    op2: &Operator,
    i: usize,
    j: usize,
    n_qubits: usize,
) -> SimResult<Operator> {
    check_single_qubit_op(op1)?;
    check_single_qubit_op(op2)?;
    check_register(n_qubits)?;
    check_qubit(i, n_qubits)?;
    check_qubit(j, n_qubits)?;
    if i == j {
        return Err(SimError::DuplicateQubit(i));
    }

    Ok(tensor_register(n_qubits, |q| {
        if q == i {
            Some(op1.clone())
        } else if q == j {
            Some(op2.clone())
        } else {
            None
        }
    }))
}

/// The Max-Cut cost operator `C = Σ_{(j,k)} ½(I − Z_j Z_k)`.
///
/// `C` is diagonal; its entry at basis index `b` is the number of edges whose
/// endpoints take different bit values in `b`. Duplicate edges count twice.
pub fn cost_operator(edges: &[(usize, usize)], n_qubits: usize) -> SimResult<Operator> {
    check_register(n_qubits)?;
    let dim = 1usize << n_qubits;
    let id = identity(dim);
    let z = pauli_z();
    let half = Complex64::new(0.5, 0.0);

    let mut cost = Array2::zeros((dim, dim));
    for &(j, k) in edges {
        let zz = two_site_operator(&z, &z, j, k, n_qubits)?;
        cost.scaled_add(half, &(&id - &zz));
    }

    debug!(n_qubits, n_edges = edges.len(), "built cost operator");
    assert!(
        is_hermitian(&cost, HERMITIAN_TOLERANCE),
        "cost operator is not Hermitian"
    );
    Ok(cost)
}

/// The transverse-field mixer `B = Σ_j X_j`.
pub fn mixer_operator(n_qubits: usize) -> SimResult<Operator> {
    check_register(n_qubits)?;
    let dim = 1usize << n_qubits;
    let x = pauli_x();

    let mut mixer = Array2::zeros((dim, dim));
    for q in 0..n_qubits {
        mixer += &single_site_operator(&x, q, n_qubits)?;
    }

    debug!(n_qubits, "built mixer operator");
    assert!(
        is_hermitian(&mixer, HERMITIAN_TOLERANCE),
        "mixer operator is not Hermitian"
    );
    Ok(mixer)
}

/// `true` if `op` is square and `|op_ij − conj(op_ji)| ≤ tol` everywhere.
pub fn is_hermitian(op: &Operator, tol: f64) -> bool {
    let (rows, cols) = op.dim();
    rows == cols
        && op
            .indexed_iter()
            .all(|((i, j), v)| (v - op[(j, i)].conj()).norm() <= tol)
}

/// `true` if every off-diagonal entry has magnitude at most `tol`.
pub fn is_diagonal(op: &Operator, tol: f64) -> bool {
    op.indexed_iter()
        .all(|((i, j), v)| i == j || v.norm() <= tol)
}

/// Real parts of the diagonal entries.
pub fn diagonal_real(op: &Operator) -> Vec<f64> {
    op.diag().iter().map(|z| z.re).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &Operator, b: &Operator, tol: f64) -> bool {
        a.dim() == b.dim() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() <= tol)
    }

    #[test]
    fn test_paulis_are_hermitian_and_square_to_identity() {
        for p in [pauli_x(), pauli_y(), pauli_z()] {
            assert!(is_hermitian(&p, 0.0));
            assert!(approx_eq(&p.dot(&p), &identity(2), 1e-15));
        }
    }

    #[test]
    fn test_kron_dimensions_and_entries() {
        let xz = kron(&pauli_x(), &pauli_z());
        assert_eq!(xz.dim(), (4, 4));
        // X ⊗ Z maps |00⟩ → |10⟩ with sign +1 and |01⟩ → -|11⟩.
        assert_eq!(xz[(2, 0)], ONE);
        assert_eq!(xz[(3, 1)], -ONE);
    }

    #[test]
    fn test_qubit_zero_is_least_significant() {
        // X on qubit 0 flips bit 0: |000⟩ → |001⟩.
        let x0 = single_site_operator(&pauli_x(), 0, 3).unwrap();
        assert_eq!(x0[(1, 0)], ONE);
        let x2 = single_site_operator(&pauli_x(), 2, 3).unwrap();
        assert_eq!(x2[(4, 0)], ONE);
    }

    #[test]
    fn test_two_site_symmetric_under_swap() {
        let a = two_site_operator(&pauli_x(), &pauli_y(), 0, 2, 3).unwrap();
        let b = two_site_operator(&pauli_y(), &pauli_x(), 2, 0, 3).unwrap();
        assert!(approx_eq(&a, &b, 0.0));
    }

    #[test]
    fn test_two_site_matches_product_of_single_sites() {
        let a = two_site_operator(&pauli_z(), &pauli_x(), 1, 3, 4).unwrap();
        let z1 = single_site_operator(&pauli_z(), 1, 4).unwrap();
        let x3 = single_site_operator(&pauli_x(), 3, 4).unwrap();
        assert!(approx_eq(&a, &z1.dot(&x3), 1e-15));
    }

    #[test]
    fn test_index_errors() {
        assert!(matches!(
            single_site_operator(&pauli_x(), 3, 3),
            Err(SimError::QubitOutOfRange {
                qubit: 3,
                n_qubits: 3
            })
        ));
        assert!(matches!(
            two_site_operator(&pauli_z(), &pauli_z(), 1, 1, 3),
            Err(SimError::DuplicateQubit(1))
        ));
        assert!(matches!(
            mixer_operator(0),
            Err(SimError::InvalidQubitCount(0))
        ));
        assert!(matches!(
            single_site_operator(&identity(4), 0, 3),
            Err(SimError::DimensionMismatch {
                expected: 2,
                got: 4
            })
        ));
        assert!(matches!(
            mixer_operator(MAX_QUBITS + 1),
            Err(SimError::RegisterTooLarge { .. })
        ));
    }

    #[test]
    fn test_cost_operator_rejects_self_loop_and_out_of_range() {
        assert!(matches!(
            cost_operator(&[(2, 2)], 3),
            Err(SimError::DuplicateQubit(2))
        ));
        assert!(matches!(
            cost_operator(&[(0, 5)], 3),
            Err(SimError::QubitOutOfRange { qubit: 5, .. })
        ));
    }

    #[test]
    fn test_duplicate_edges_add_weight() {
        let c = cost_operator(&[(0, 1), (0, 1)], 2).unwrap();
        assert_eq!(diagonal_real(&c), vec![0.0, 2.0, 2.0, 0.0]);
    }

    #[test]
    fn test_empty_graph_gives_zero_cost() {
        let c = cost_operator(&[], 3).unwrap();
        assert!(c.iter().all(|z| *z == ZERO));
    }

    #[test]
    fn test_n_qubits_for_dim() {
        assert_eq!(n_qubits_for_dim(32).unwrap(), 5);
        assert!(matches!(n_qubits_for_dim(1), Err(SimError::NotPowerOfTwo(1))));
        assert!(matches!(n_qubits_for_dim(6), Err(SimError::NotPowerOfTwo(6))));
    }
}
