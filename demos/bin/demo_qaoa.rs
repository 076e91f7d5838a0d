//! QAOA (Quantum Approximate Optimization Algorithm) Demo
//!
//! Maximizes the expected Max-Cut value of an exactly simulated QAOA state
//! and reports the most probable partitions.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use qlab_demos::problems::Graph;
use qlab_demos::runners::{QaoaResult, QaoaRunner};
use qlab_demos::{
    create_progress_bar, print_header, print_info, print_result, print_section, print_success,
    print_warning,
};
use qlab_sim::operator::MAX_QUBITS;
use qlab_sim::state::format_bitstring;

#[derive(Parser, Debug)]
#[command(name = "demo-qaoa")]
#[command(about = "Optimize QAOA angles for Max-Cut on a small graph")]
struct Args {
    /// Preset graph (kite5, square4, complete4, ring6)
    #[arg(short, long, default_value = "kite5")]
    graph: String,

    /// Load the graph from a JSON file instead of a preset
    #[arg(long, conflicts_with = "graph")]
    graph_file: Option<PathBuf>,

    /// Number of QAOA layers
    #[arg(short = 'p', long, env = "QLAB_LAYERS", default_value = "2")]
    layers: usize,

    /// Maximum optimization iterations
    #[arg(short, long, env = "QLAB_MAXITER", default_value = "1000")]
    iterations: usize,

    /// Parameter convergence tolerance
    #[arg(long, default_value = "1e-6")]
    xatol: f64,

    /// Objective convergence tolerance
    #[arg(long, default_value = "1e-8")]
    fatol: f64,

    /// Initial simplex offset
    #[arg(long, default_value = "0.5")]
    step: f64,

    /// Starting angles β_1..β_p,γ_1..γ_p (default: zeros)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    initial: Option<Vec<f64>>,

    /// Number of most probable bitstrings to report
    #[arg(long, default_value = "4")]
    top: usize,

    /// Write the result as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// A reported basis state of the final QAOA state.
#[derive(Debug, Serialize)]
struct Candidate {
    bitstring: String,
    index: usize,
    probability: f64,
    cut: f64,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    graph: &'a Graph,
    layers: usize,
    max_cut: f64,
    approximation_ratio: f64,
    result: &'a QaoaResult,
    top: &'a [Candidate],
}

fn load_graph(args: &Args) -> Result<Graph> {
    let graph = match &args.graph_file {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read graph file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("failed to parse graph file {}", path.display()))?
        }
        None => match Graph::preset(&args.graph.to_lowercase()) {
            Some(graph) => graph,
            None => bail!(
                "unknown graph: {}. Available: kite5, square4, complete4, ring6",
                args.graph
            ),
        },
    };
    graph.validate()?;
    if graph.n_nodes > MAX_QUBITS {
        bail!(
            "graph has {} nodes; exact simulation is limited to {MAX_QUBITS}",
            graph.n_nodes
        );
    }
    Ok(graph)
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    print_header("QAOA Max-Cut Optimization Demo");

    let graph = load_graph(&args)?;

    print_section("Problem Setup");
    println!("{graph}");

    // Compute exact solution
    let (exact_bitstring, exact_cut) = graph.max_cut_brute_force();
    let (exact_s, exact_t) = graph.bitstring_to_partition(exact_bitstring);

    print_result("Nodes", graph.n_nodes);
    print_result("Edges", graph.num_edges());
    print_result("QAOA layers (p)", args.layers);
    print_result("Max iterations", args.iterations);
    println!();
    print_result("Optimal cut (exact)", exact_cut);
    print_result("Optimal partition", format!("{exact_s:?} | {exact_t:?}"));
    print_result(
        "Optimal bitstrings",
        graph
            .optimal_bitstrings()
            .iter()
            .map(|&b| format_bitstring(b, graph.n_nodes))
            .collect::<Vec<_>>()
            .join(", "),
    );

    print_section("Running QAOA Optimization");
    println!();
    println!("  Each layer applies:");
    println!("  1. Cost unitary: exp(-iγC) encoding the graph");
    println!("  2. Mixer unitary: exp(-iβB) exploring solutions");
    println!();

    let mut runner = QaoaRunner::new(graph.clone())
        .with_layers(args.layers)
        .with_maxiter(args.iterations)
        .with_tolerance(args.xatol, args.fatol)
        .with_initial_step(args.step);
    if let Some(initial) = args.initial.clone() {
        runner = runner.with_initial_params(initial);
    }

    let max_evaluations = runner.optimizer().maxfev as u64;
    let pb = create_progress_bar(max_evaluations, "Optimizing...");
    let result = runner
        .run_observed(|count, value| {
            pb.set_position(count as u64);
            pb.set_message(format!("⟨C⟩ = {value:.6}"));
        })
        .context("QAOA optimization failed")?;
    pb.finish_with_message("Optimization complete");

    print_section("Results");
    let ratio = runner.approximation_ratio(&result);
    print_result("Expected cut ⟨C⟩", format!("{:.6}", result.expectation));
    print_result("Approximation ratio", format!("{:.1}%", ratio * 100.0));
    print_result("Iterations", result.iterations);
    print_result("Evaluations", result.evaluations);
    println!();
    print_result("Optimal β", format!("{:?}", result.optimal_beta));
    print_result("Optimal γ", format!("{:?}", result.optimal_gamma));

    print_section("Most Probable Partitions");
    let top: Vec<Candidate> = runner
        .most_probable(&result, args.top)?
        .into_iter()
        .map(|(index, probability)| Candidate {
            bitstring: format_bitstring(index, graph.n_nodes),
            index,
            probability,
            cut: graph.cut_value_from_bitstring(index),
        })
        .collect();
    for c in &top {
        println!(
            "  |{}⟩  p = {:.4}  cut = {}",
            c.bitstring, c.probability, c.cut
        );
    }

    if let Some(path) = &args.output {
        let report = Report {
            graph: &graph,
            layers: args.layers,
            max_cut: exact_cut,
            approximation_ratio: ratio,
            result: &result,
            top: &top,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        print_info(&format!("Result written to {}", path.display()));
    }

    println!();
    if result.converged {
        print_success("QAOA demo complete!");
    } else {
        print_warning("Optimizer stopped before converging; reported angles are the best found.");
    }
    Ok(())
}
