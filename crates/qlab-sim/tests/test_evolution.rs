//! Tests for QAOA state evolution and the objective.

use std::f64::consts::PI;

use proptest::prelude::*;
use qlab_sim::SimError;
use qlab_sim::evolution::{QaoaAnsatz, evolve};
use qlab_sim::objective::target_expectation;
use qlab_sim::operator::{cost_operator, mixer_operator};
use qlab_sim::state::{norm, uniform_state};

const KITE_EDGES: [(usize, usize); 5] = [(0, 1), (1, 2), (1, 3), (2, 4), (3, 4)];

#[test]
fn kite_graph_depth_four_reference_value() {
    let b = mixer_operator(5).unwrap();
    let c = cost_operator(&KITE_EDGES, 5).unwrap();
    let beta = [0.583, 0.642, 0.460, 0.117];
    let gamma = [0.358, 0.062, 0.674, 0.266];

    let value = target_expectation(&b, &c, &beta, &gamma).unwrap();
    assert!(
        (value - 3.190692998486455).abs() < 1e-9,
        "got {value}"
    );
}

#[test]
fn zero_depth_evaluates_uniform_state() {
    let b = mixer_operator(5).unwrap();
    let c = cost_operator(&KITE_EDGES, 5).unwrap();
    let value = target_expectation(&b, &c, &[], &[]).unwrap();
    // Every edge is cut with probability ½.
    assert!((value - 2.5).abs() < 1e-12);
    assert_eq!(evolve(&b, &c, &[], &[]).unwrap(), uniform_state(5).unwrap());
}

#[test]
fn repeated_evaluation_is_bit_identical() {
    let b = mixer_operator(5).unwrap();
    let c = cost_operator(&KITE_EDGES, 5).unwrap();
    let ansatz = QaoaAnsatz::new(&b, &c).unwrap();
    let first = ansatz.expectation(&[0.2, 1.3], &[0.9, -0.4]).unwrap();
    let second = ansatz.expectation(&[0.2, 1.3], &[0.9, -0.4]).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn ansatz_infers_register_width() {
    let b = mixer_operator(4).unwrap();
    let c = cost_operator(&[(0, 3)], 4).unwrap();
    assert_eq!(QaoaAnsatz::new(&b, &c).unwrap().n_qubits(), 4);
}

/// Angles near the physically interesting range plus very large ones.
#[test]
fn large_angles_keep_unit_norm() {
    let b = mixer_operator(5).unwrap();
    let c = cost_operator(&KITE_EDGES, 5).unwrap();
    for beta in [1e8, 1e9, 1e12] {
        let psi = evolve(&b, &c, &[beta], &[0.3]).unwrap();
        assert!((norm(&psi) - 1.0).abs() < 1e-9, "β = {beta}: ‖ψ‖ = {}", norm(&psi));
    }
    let psi = evolve(&b, &c, &[0.4, -2e11], &[7e13, 1e9]).unwrap();
    assert!((norm(&psi) - 1.0).abs() < 1e-9);
}

#[test]
fn non_finite_angles_are_errors() {
    let b = mixer_operator(5).unwrap();
    let c = cost_operator(&KITE_EDGES, 5).unwrap();
    assert!(matches!(
        target_expectation(&b, &c, &[0.1], &[f64::NAN]),
        Err(SimError::NonFiniteParameter(_))
    ));
    assert!(matches!(
        evolve(&b, &c, &[f64::INFINITY], &[0.1]),
        Err(SimError::NonFiniteParameter(_))
    ));
}

fn arb_angle() -> impl Strategy<Value = f64> {
    prop_oneof![-PI..PI, -1e9..1e9, -1e15..1e15]
}

fn arb_case() -> impl Strategy<Value = (usize, Vec<(usize, usize)>, Vec<f64>, Vec<f64>)> {
    (2usize..=4, 0usize..=3).prop_flat_map(|(n, p)| {
        (
            Just(n),
            prop::collection::vec(
                (0..n, 0..n).prop_filter("self-loops are not edges", |(a, b)| a != b),
                1..=6,
            ),
            prop::collection::vec(arb_angle(), p),
            prop::collection::vec(arb_angle(), p),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    /// Evolution preserves the norm for any real parameters.
    #[test]
    fn evolved_state_has_unit_norm((n, edges, beta, gamma) in arb_case()) {
        let b = mixer_operator(n).unwrap();
        let c = cost_operator(&edges, n).unwrap();
        let psi = evolve(&b, &c, &beta, &gamma).unwrap();
        prop_assert!((norm(&psi) - 1.0).abs() < 1e-9);
    }

    /// The expectation of a cut-counting operator lies between 0 and |E|.
    #[test]
    fn expectation_is_bounded_by_edge_count((n, edges, beta, gamma) in arb_case()) {
        let b = mixer_operator(n).unwrap();
        let c = cost_operator(&edges, n).unwrap();
        let value = target_expectation(&b, &c, &beta, &gamma).unwrap();
        prop_assert!(value >= -1e-12);
        prop_assert!(value <= edges.len() as f64 + 1e-12);
    }
}
