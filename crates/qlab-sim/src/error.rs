//! Error types for the sim crate.

use thiserror::Error;

/// Errors produced while building operators or evolving states.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SimError {
    /// A register must contain at least one qubit.
    #[error("qubit count must be at least 1, got {0}")]
    InvalidQubitCount(usize),

    /// Dense `2^n × 2^n` operators above this width do not fit in memory.
    #[error("{n_qubits} qubits exceeds the dense-operator limit of {max}")]
    RegisterTooLarge {
        /// Requested register width.
        n_qubits: usize,
        /// Largest supported width.
        max: usize,
    },

    /// An operator or edge references a qubit index that is out of range.
    #[error("qubit {qubit} is out of range for a {n_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the register.
        n_qubits: usize,
    },

    /// Both factors of a two-site operator were placed on the same qubit.
    #[error("two-site operator needs distinct qubits, got {0} twice")]
    DuplicateQubit(usize),

    /// A matrix that must be square is not.
    #[error("expected a square matrix, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Operand dimensions do not agree.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Dimension required by the operation.
        expected: usize,
        /// Dimension actually supplied.
        got: usize,
    },

    /// An operator dimension is not `2^n` for any `n ≥ 1`.
    #[error("dimension {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// β and γ must describe the same number of layers.
    #[error("beta has {beta} entries but gamma has {gamma}")]
    ParameterLengthMismatch {
        /// Length of β.
        beta: usize,
        /// Length of γ.
        gamma: usize,
    },

    /// The optimizer's flat parameter vector has the wrong length.
    #[error("expected {expected} parameters for depth p, got {got}")]
    InvalidParameterCount {
        /// Required length (2p).
        expected: usize,
        /// Supplied length.
        got: usize,
    },

    /// QAOA depth must be at least 1 for optimization.
    #[error("QAOA depth must be at least 1")]
    InvalidDepth,

    /// A β or γ angle is NaN or infinite.
    #[error("QAOA angle must be finite, got {0}")]
    NonFiniteParameter(f64),

    /// A matrix contains NaN or infinite entries.
    #[error("matrix has non-finite entries")]
    NonFiniteMatrix,

    /// The Hermitian eigensolver did not converge.
    #[error("Hermitian eigendecomposition failed to converge")]
    EigenDecomposition,

    /// The Padé denominator in the matrix exponential could not be inverted.
    #[error("singular matrix encountered while solving a linear system")]
    SingularMatrix,
}

/// Result type for operator and evolution routines.
pub type SimResult<T> = Result<T, SimError>;
