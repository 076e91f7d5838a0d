//! Max-Cut problem definition for QAOA.
//!
//! The Max-Cut problem: Given a graph G = (V, E), partition vertices into
//! two sets S and T to maximize the number of edges between S and T.
//!
//! A partition is encoded as a basis index: bit `i` set means node `i` is in
//! S. This matches the qubit ordering of `qlab_sim`, so the cost operator's
//! diagonal entry at index `b` equals `cut_value_from_bitstring(b)`.

use qlab_sim::{SimError, SimResult};
use serde::{Deserialize, Serialize};

/// Largest graph accepted by the brute-force search.
pub const MAX_BRUTE_FORCE_NODES: usize = 20;

/// An unweighted graph for the Max-Cut problem.
///
/// Repeated edges are kept and count once per occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    /// Number of nodes.
    pub n_nodes: usize,
    /// Edges as (`node_a`, `node_b`).
    pub edges: Vec<(usize, usize)>,
}

impl Graph {
    /// Create a new graph.
    pub fn new(n_nodes: usize, edges: Vec<(usize, usize)>) -> Self {
        Self { n_nodes, edges }
    }

    /// Create the 5-node kite graph.
    ///
    /// ```text
    ///       0
    ///       |
    ///       1
    ///      / \
    ///     2   3
    ///      \ /
    ///       4
    /// ```
    ///
    /// The graph is bipartite, so every edge can be cut: the maximum is 5.
    pub fn kite_5() -> Self {
        Self::new(5, vec![(0, 1), (1, 2), (1, 3), (2, 4), (3, 4)])
    }

    /// Create a 4-node square graph.
    ///
    /// ```text
    /// 0 --- 1
    /// |     |
    /// 3 --- 2
    /// ```
    pub fn square_4() -> Self {
        Self::new(4, vec![(0, 1), (1, 2), (2, 3), (3, 0)])
    }

    /// Create a 4-node complete graph K4.
    pub fn complete_4() -> Self {
        Self::new(4, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)])
    }

    /// Create a 6-node ring graph.
    pub fn ring_6() -> Self {
        Self::new(6, vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)])
    }

    /// Look up a preset by name (`kite5`, `square4`, `complete4`, `ring6`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "kite5" => Some(Self::kite_5()),
            "square4" => Some(Self::square_4()),
            "complete4" => Some(Self::complete_4()),
            "ring6" => Some(Self::ring_6()),
            _ => None,
        }
    }

    /// Check that every edge joins two distinct nodes of the graph.
    pub fn validate(&self) -> SimResult<()> {
        for &(a, b) in &self.edges {
            for node in [a, b] {
                if node >= self.n_nodes {
                    return Err(SimError::QubitOutOfRange {
                        qubit: node,
                        n_qubits: self.n_nodes,
                    });
                }
            }
            if a == b {
                return Err(SimError::DuplicateQubit(a));
            }
        }
        Ok(())
    }

    /// Get the number of edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Calculate the cut value for a given assignment.
    ///
    /// `assignment[i] = true` means node i is in set S. The assignment must
    /// cover exactly `n_nodes` nodes.
    pub fn cut_value(&self, assignment: &[bool]) -> SimResult<f64> {
        if assignment.len() != self.n_nodes {
            return Err(SimError::DimensionMismatch {
                expected: self.n_nodes,
                got: assignment.len(),
            });
        }
        self.validate()?;
        Ok(self
            .edges
            .iter()
            .filter(|(a, b)| assignment[*a] != assignment[*b])
            .count() as f64)
    }

    /// Calculate the cut value from a bitstring (integer).
    pub fn cut_value_from_bitstring(&self, bitstring: usize) -> f64 {
        self.edges
            .iter()
            .filter(|(a, b)| (bitstring >> a) & 1 != (bitstring >> b) & 1)
            .count() as f64
    }

    /// Find the maximum cut value by brute force (for small graphs).
    ///
    /// Returns the smallest bitstring attaining the maximum.
    pub fn max_cut_brute_force(&self) -> (usize, f64) {
        assert!(
            self.n_nodes <= MAX_BRUTE_FORCE_NODES,
            "Brute force limited to {MAX_BRUTE_FORCE_NODES} nodes"
        );
        let mut best_bitstring = 0;
        let mut best_value = 0.0;

        for bitstring in 0..(1usize << self.n_nodes) {
            let value = self.cut_value_from_bitstring(bitstring);
            if value > best_value {
                best_value = value;
                best_bitstring = bitstring;
            }
        }

        (best_bitstring, best_value)
    }

    /// All bitstrings attaining the maximum cut, in ascending order.
    pub fn optimal_bitstrings(&self) -> Vec<usize> {
        let (_, best_value) = self.max_cut_brute_force();
        (0..(1usize << self.n_nodes))
            .filter(|&b| self.cut_value_from_bitstring(b) == best_value)
            .collect()
    }

    /// Convert bitstring to human-readable partition.
    pub fn bitstring_to_partition(&self, bitstring: usize) -> (Vec<usize>, Vec<usize>) {
        (0..self.n_nodes).partition(|&i| (bitstring >> i) & 1 == 1)
    }
}

impl std::fmt::Display for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Graph ({} nodes, {} edges):",
            self.n_nodes,
            self.edges.len()
        )?;
        for (a, b) in &self.edges {
            writeln!(f, "  {a} -- {b}")?;
        }
        Ok(())
    }
}
