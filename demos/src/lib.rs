//! qlane demo suite
//!
//! Small command-line programs that build circuits with `qlane-ir`, run
//! them on an engine from the registry and print what happened:
//!
//! - **demo-ghz**: sample a GHZ state and check the inverse circuit
//! - **demo-catalog**: list every gate kind with its arity and flags
//!
//! ```ignore
//! use qlane_demos::{circuits, runners};
//! use qlane_engine::{DEFAULT_ENGINE, EngineConfig};
//!
//! let registry = runners::default_registry();
//! let config = EngineConfig::new(DEFAULT_ENGINE, 3).with_seed(1);
//! let counts = runners::sample(&registry, &config, &circuits::ghz(3)?, 100, None)?;
//! ```

pub mod circuits;
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

/// Print a histogram bar for one outcome.
pub fn print_histogram_row(bitstring: &str, count: usize, total: usize) {
    let fraction = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    };
    let width = (fraction * 40.0).round() as usize;
    println!(
        "  |{bitstring}⟩ {} {count:>6} ({:5.1}%)",
        style("█".repeat(width)).cyan(),
        fraction * 100.0
    );
}
