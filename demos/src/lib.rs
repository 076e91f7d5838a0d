//! qlab Demo Suite
//!
//! Max-Cut optimization with exactly simulated QAOA states:
//!
//! - [`problems`]: Max-Cut graphs and brute-force reference solutions
//! - [`optimizers`]: derivative-free classical optimizers
//! - [`runners`]: the QAOA driver tying `qlab-sim` to an optimizer
//!
//! # Example
//!
//! ```no_run
//! use qlab_demos::problems::Graph;
//! use qlab_demos::runners::QaoaRunner;
//!
//! let runner = QaoaRunner::new(Graph::kite_5()).with_layers(2);
//! let result = runner.run()?;
//! println!("⟨C⟩ = {:.4}", result.expectation);
//! # Ok::<(), qlab_sim::SimError>(())
//! ```

pub mod optimizers;
pub mod problems;
pub mod runners;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for demo operations.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let style = ProgressStyle::with_template(
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}
