//! `qlab-sim` — dense operators and exact state evolution for QAOA.
//!
//! Builds n-qubit operators from 2×2 matrices by Kronecker products, evolves
//! the uniform superposition under alternating cost and mixer unitaries, and
//! evaluates the Max-Cut expectation that a classical optimizer maximizes.
//!
//! - [`operator`]: Pauli embeddings, the cost operator `C` and mixer `B`
//! - [`expm`]: matrix exponential (scaling-and-squaring, Padé 13)
//! - [`eigen`]: `exp(-itH)` through the eigenbasis of a Hermitian `H`
//! - [`evolution`]: `|ψ(β, γ)⟩` for a validated `(B, C)` pair
//! - [`objective`]: `⟨ψ|C|ψ⟩`
//! - [`density`], [`gates`]: partial traces, Bell states, the QFT matrix
//!
//! Qubit 0 is the least-significant bit of a basis index throughout.
//!
//! # Quick start
//!
//! ```rust
//! use qlab_sim::evolution::QaoaAnsatz;
//! use qlab_sim::operator::{cost_operator, mixer_operator};
//!
//! let edges = [(0, 1), (1, 2), (1, 3), (2, 4), (3, 4)];
//! let b = mixer_operator(5).unwrap();
//! let c = cost_operator(&edges, 5).unwrap();
//!
//! let ansatz = QaoaAnsatz::new(&b, &c).unwrap();
//! let value = ansatz
//!     .expectation(&[0.583, 0.642, 0.460, 0.117], &[0.358, 0.062, 0.674, 0.266])
//!     .unwrap();
//! assert!((value - 3.190692998486455).abs() < 1e-9);
//! ```

pub mod density;
pub mod eigen;
pub mod error;
pub mod evolution;
pub mod expm;
pub mod gates;
pub mod objective;
pub mod operator;
pub mod state;

pub use eigen::HermitianEigen;
pub use error::{SimError, SimResult};
pub use evolution::{QaoaAnsatz, evolve};
pub use expm::matrix_exp;
pub use objective::{expectation, target_expectation};
pub use operator::{
    Operator, cost_operator, mixer_operator, single_site_operator, two_site_operator,
};
pub use state::{StateVector, uniform_state};
