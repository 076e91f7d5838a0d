//! Density operators and partial traces.
//!
//! A bipartite operator on `A ⊗ B` is indexed as `(a·dim_b + b, a'·dim_b + b')`,
//! matching [`kron`](crate::operator::kron)`(op_a, op_b)`.

use ndarray::Array2;
use num_complex::Complex64;
use rand::Rng;

use crate::error::{SimError, SimResult};
use crate::operator::Operator;
use crate::state::StateVector;

/// The pure-state density operator `|ψ⟩⟨ψ|`.
pub fn density_matrix(psi: &StateVector) -> Operator {
    let dim = psi.len();
    Array2::from_shape_fn((dim, dim), |(i, j)| psi[i] * psi[j].conj())
}

/// Sum of the diagonal.
pub fn trace(op: &Operator) -> Complex64 {
    op.diag().iter().sum()
}

/// `Re tr(ρ²)`; 1 for pure states, `1/dim` for the maximally mixed state.
pub fn purity(rho: &Operator) -> f64 {
    trace(&rho.dot(rho)).re
}

fn check_bipartite(rho: &Operator, dim_a: usize, dim_b: usize) -> SimResult<()> {
    let (rows, cols) = rho.dim();
    if rows != cols {
        return Err(SimError::NotSquare { rows, cols });
    }
    if dim_a * dim_b != rows {
        return Err(SimError::DimensionMismatch {
            expected: dim_a * dim_b,
            got: rows,
        });
    }
    Ok(())
}

/// Trace out subsystem `B`, keeping the `dim_a × dim_a` operator on `A`.
pub fn partial_trace_b(rho: &Operator, dim_a: usize, dim_b: usize) -> SimResult<Operator> {
    check_bipartite(rho, dim_a, dim_b)?;
    Ok(Array2::from_shape_fn((dim_a, dim_a), |(i, j)| {
        (0..dim_b)
            .map(|k| rho[(i * dim_b + k, j * dim_b + k)])
            .sum()
    }))
}

/// Trace out subsystem `A`, keeping the `dim_b × dim_b` operator on `B`.
pub fn partial_trace_a(rho: &Operator, dim_a: usize, dim_b: usize) -> SimResult<Operator> {
    check_bipartite(rho, dim_a, dim_b)?;
    Ok(Array2::from_shape_fn((dim_b, dim_b), |(i, j)| {
        (0..dim_a)
            .map(|k| rho[(k * dim_b + i, k * dim_b + j)])
            .sum()
    }))
}

/// A random full-rank density operator `G G† / tr(G G†)`.
///
/// Entries of `G` have real and imaginary parts drawn uniformly from
/// `[-1, 1)`. The result is Hermitian, positive semidefinite and unit-trace.
pub fn random_density_matrix<R: Rng>(dim: usize, rng: &mut R) -> Operator {
    let g = Array2::from_shape_fn((dim, dim), |_| {
        Complex64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    });
    let g_dag = g.t().mapv(|z| z.conj());
    let rho = g.dot(&g_dag);
    let tr = trace(&rho).re;
    if tr == 0.0 {
        return rho;
    }
    rho.mapv(|z| z / tr)
}
