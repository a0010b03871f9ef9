//! GHZ Sampling Demo
//!
//! Builds a GHZ circuit, samples it on a registered engine and checks
//! that the circuit followed by its inverse returns to |0...0⟩.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use qlane_codec::Precision;
use qlane_demos::runners::{default_registry, sample};
use qlane_demos::{
    circuits, create_progress_bar, print_header, print_histogram_row, print_info, print_result,
    print_section, print_success, print_warning,
};
use qlane_engine::{DEFAULT_ENGINE, EngineConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "demo-ghz")]
#[command(about = "Sample a GHZ state on a qlane engine")]
struct Args {
    /// Number of qubits
    #[arg(short = 'n', long, default_value = "3")]
    qubits: u32,

    /// Number of shots
    #[arg(short, long, default_value = "1000")]
    shots: usize,

    /// Measurement seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Encode gates in single precision
    #[arg(long)]
    single: bool,

    /// Engine configuration as a JSON file (overrides the flags above)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    print_header("GHZ Sampling Demo");

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            EngineConfig::from_json(&json)?
        }
        None => {
            let precision = if args.single {
                Precision::Single
            } else {
                Precision::Double
            };
            let mut config = EngineConfig::new(DEFAULT_ENGINE, args.qubits).with_precision(precision);
            if let Some(seed) = args.seed {
                config = config.with_seed(seed);
            }
            config
        }
    };

    let registry = default_registry();
    if !registry.has_engine(&config.name) {
        bail!(
            "unknown engine '{}', available: {}",
            config.name,
            registry.available_engines().join(", ")
        );
    }

    let circuit = circuits::ghz(config.num_qubits)?;

    print_section("Circuit");
    print_result("Name", circuit.name());
    print_result("Qubits", circuit.num_qubits());
    print_result("Gates", circuit.num_ops());
    print_result("Depth", circuit.depth());
    for (i, layer) in circuit.layers().iter().enumerate() {
        let gates: Vec<String> = layer
            .iter()
            .filter_map(|&node| circuit.dag().gate(node))
            .map(ToString::to_string)
            .collect();
        print_info(&format!("layer {i}: {}", gates.join(" | ")));
    }

    print_section("Sampling");
    print_result("Engine", &config.name);
    print_result("Precision", format!("{:?}", config.precision));
    print_result("Shots", args.shots);

    let pb = create_progress_bar(args.shots as u64, "shots");
    let counts = sample(&registry, &config, &circuit, args.shots, Some(&pb))?;
    pb.finish_and_clear();

    print_section("Results");
    for (bitstring, count) in counts.sorted() {
        print_histogram_row(bitstring, count, counts.shots());
    }

    let n = config.num_qubits as usize;
    let correlated = counts.get(&"0".repeat(n)) + counts.get(&"1".repeat(n));
    if correlated == counts.shots() {
        print_success("All shots are fully correlated");
    } else {
        print_warning(&format!(
            "{} of {} shots were not correlated",
            counts.shots() - correlated,
            counts.shots()
        ));
    }

    print_section("Inverse Check");
    let round_trip = circuits::round_trip(&circuit)?;
    print_result("Depth", round_trip.depth());
    let zeros = sample(&registry, &config, &round_trip, args.shots.min(100), None)?;
    if zeros.get(&"0".repeat(n)) == zeros.shots() {
        print_success("Circuit followed by its dagger returns to |0...0⟩");
    } else {
        print_warning("Inverse circuit did not return to |0...0⟩");
    }

    Ok(())
}
