//! Textbook States Demo
//!
//! Bell states, reduced density operators and the QFT matrix, all built
//! from Kronecker products.

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

use qlab_demos::{print_header, print_result, print_section, print_success};
use qlab_sim::density::{
    density_matrix, partial_trace_a, partial_trace_b, purity, random_density_matrix, trace,
};
use qlab_sim::gates::{BellState, bell_state, qft_matrix};
use qlab_sim::operator::kron;
use qlab_sim::state::{StateVector, basis_state, format_bitstring};

#[derive(Parser, Debug)]
#[command(name = "demo-states")]
#[command(about = "Show Bell states, partial traces and the QFT")]
struct Args {
    /// Number of qubits for the QFT
    #[arg(short, long, default_value = "3")]
    qubits: usize,

    /// Seed for the random mixed states
    #[arg(short, long, default_value = "42")]
    seed: u64,
}

fn format_state(psi: &StateVector, n_qubits: usize) -> String {
    psi.iter()
        .enumerate()
        .filter(|(_, a)| a.norm() > 1e-12)
        .map(|(i, a)| {
            format!(
                "({:+.3}{:+.3}i)|{}⟩",
                a.re,
                a.im,
                format_bitstring(i, n_qubits)
            )
        })
        .collect::<Vec<_>>()
        .join(" + ")
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    print_header("Textbook Quantum States Demo");

    print_section("Bell States");
    for kind in BellState::ALL {
        let psi = bell_state(kind);
        let rho = density_matrix(&psi);
        let rho_a = partial_trace_b(&rho, 2, 2)?;
        print_result(&format!("{kind:?}"), format_state(&psi, 2));
        print_result("  purity of qubit 1", format!("{:.3}", purity(&rho_a)));
    }

    print_section("Product of Mixed States");
    let mut rng = StdRng::seed_from_u64(args.seed);
    let rho_a = random_density_matrix(2, &mut rng);
    let rho_b = random_density_matrix(2, &mut rng);
    let rho = kron(&rho_a, &rho_b);
    print_result("tr(ρ_A ⊗ ρ_B)", format!("{:.6}", trace(&rho).re));
    print_result("purity(ρ_A)", format!("{:.6}", purity(&rho_a)));
    print_result(
        "purity(tr_B(ρ_A ⊗ ρ_B))",
        format!("{:.6}", purity(&partial_trace_b(&rho, 2, 2)?)),
    );
    print_result("purity(ρ_B)", format!("{:.6}", purity(&rho_b)));
    print_result(
        "purity(tr_A(ρ_A ⊗ ρ_B))",
        format!("{:.6}", purity(&partial_trace_a(&rho, 2, 2)?)),
    );

    print_section("Quantum Fourier Transform");
    let f = qft_matrix(args.qubits)?;
    let one = basis_state(args.qubits, 1)?;
    print_result("Qubits", args.qubits);
    print_result(
        &format!("QFT|{}⟩", format_bitstring(1, args.qubits)),
        format_state(&f.dot(&one), args.qubits),
    );

    println!();
    print_success("States demo complete!");
    Ok(())
}
