//! Fixed gates and textbook states built by Kronecker products.

use std::f64::consts::PI;

use ndarray::{Array2, arr2};
use num_complex::Complex64;

use crate::error::SimResult;
use crate::operator::{ONE, Operator, ZERO, check_register, identity, kron};
use crate::state::StateVector;

/// Hadamard.
pub fn hadamard() -> Operator {
    let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    arr2(&[[h, h], [h, -h]])
}

/// Two-qubit CNOT with qubit 1 (left factor) as control and qubit 0 as target.
pub fn cnot() -> Operator {
    arr2(&[
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ONE, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE],
        [ZERO, ZERO, ONE, ZERO],
    ])
}

/// The four maximally entangled two-qubit states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BellState {
    /// (|00⟩ + |11⟩)/√2
    PhiPlus,
    /// (|00⟩ − |11⟩)/√2
    PhiMinus,
    /// (|01⟩ + |10⟩)/√2
    PsiPlus,
    /// (|01⟩ − |10⟩)/√2
    PsiMinus,
}

impl BellState {
    /// All four states in the order Φ+, Φ−, Ψ+, Ψ−.
    pub const ALL: [BellState; 4] = [
        BellState::PhiPlus,
        BellState::PhiMinus,
        BellState::PsiPlus,
        BellState::PsiMinus,
    ];

    /// Basis input `|q1 q0⟩` that the preparation circuit maps to this state.
    fn input_index(self) -> usize {
        match self {
            BellState::PhiPlus => 0b00,
            BellState::PsiPlus => 0b01,
            BellState::PhiMinus => 0b10,
            BellState::PsiMinus => 0b11,
        }
    }
}

/// Prepare a Bell state as `CNOT · (H ⊗ I)` applied to a basis state.
pub fn bell_state(kind: BellState) -> StateVector {
    let circuit = cnot().dot(&kron(&hadamard(), &identity(2)));
    circuit.column(kind.input_index()).to_owned()
}

/// The `n`-qubit quantum Fourier transform, `F_jk = ω^{jk} / √N` with
/// `ω = e^{2πi/N}`.
pub fn qft_matrix(n_qubits: usize) -> SimResult<Operator> {
    check_register(n_qubits)?;
    let dim = 1usize << n_qubits;
    let scale = (dim as f64).sqrt().recip();
    Ok(Array2::from_shape_fn((dim, dim), |(j, k)| {
        let phase = 2.0 * PI * ((j * k) % dim) as f64 / dim as f64;
        Complex64::from_polar(scale, phase)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{basis_state, uniform_state};

    fn inner(a: &StateVector, b: &StateVector) -> Complex64 {
        a.iter().zip(b.iter()).map(|(x, y)| x.conj() * y).sum()
    }

    #[test]
    fn test_bell_states_are_orthonormal() {
        for (i, a) in BellState::ALL.iter().enumerate() {
            for (j, b) in BellState::ALL.iter().enumerate() {
                let overlap = inner(&bell_state(*a), &bell_state(*b));
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((overlap - Complex64::new(expected, 0.0)).norm() < 1e-15);
            }
        }
    }

    #[test]
    fn test_phi_minus_amplitudes() {
        let s = bell_state(BellState::PhiMinus);
        let r = std::f64::consts::FRAC_1_SQRT_2;
        assert!((s[0] - Complex64::new(r, 0.0)).norm() < 1e-15);
        assert!((s[3] - Complex64::new(-r, 0.0)).norm() < 1e-15);
        assert!(s[1].norm() < 1e-15 && s[2].norm() < 1e-15);
    }

    #[test]
    fn test_qft_is_unitary() {
        let f = qft_matrix(3).unwrap();
        let f_dag = f.t().mapv(|z| z.conj());
        let prod = f_dag.dot(&f);
        for ((i, j), v) in prod.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert!((v - Complex64::new(expected, 0.0)).norm() < 1e-13);
        }
    }

    #[test]
    fn test_qft_of_zero_is_uniform() {
        let f = qft_matrix(3).unwrap();
        let out = f.dot(&basis_state(3, 0).unwrap());
        let uniform = uniform_state(3).unwrap();
        assert!(out.iter().zip(uniform.iter()).all(|(a, b)| (a - b).norm() < 1e-15));
    }

    #[test]
    fn test_qft_of_one_has_linear_phase() {
        let f = qft_matrix(2).unwrap();
        let out = f.dot(&basis_state(2, 1).unwrap());
        // ω = i for N = 4: amplitudes (1, i, -1, -i)/2.
        let expected = [
            Complex64::new(0.5, 0.0),
            Complex64::new(0.0, 0.5),
            Complex64::new(-0.5, 0.0),
            Complex64::new(0.0, -0.5),
        ];
        for (a, b) in out.iter().zip(expected.iter()) {
            assert!((a - b).norm() < 1e-15);
        }
    }
}
