//! Gate Catalog Demo
//!
//! Lists every gate kind known to a catalog with its arity, parameters,
//! classification and codec layout.

use anyhow::Result;
use clap::Parser;
use num_complex::Complex64;
use qlane_codec::{UNITARY_TOLERANCE, is_unitary, layout};
use qlane_demos::{print_header, print_info, print_result, print_section, print_warning};
use qlane_ir::{CustomGate, GateCatalog, GateFlags, QubitId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "demo-catalog")]
#[command(about = "List the gate kinds known to a qlane catalog")]
struct Args {
    /// Also register example custom kinds
    #[arg(long)]
    custom: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn flag_list(flags: GateFlags) -> String {
    let mut out = Vec::new();
    if flags.hermitian {
        out.push("hermitian");
    }
    if flags.pauli {
        out.push("pauli");
    }
    if flags.clifford {
        out.push("clifford");
    }
    if out.is_empty() {
        "-".to_string()
    } else {
        out.join(",")
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    print_header("Gate Catalog Demo");

    let mut catalog = GateCatalog::new();
    if args.custom {
        let sqrt_x = [(0.5, 0.5), (0.5, -0.5), (0.5, -0.5), (0.5, 0.5)]
            .map(|(re, im)| Complex64::new(re, im));
        catalog.register(CustomGate::new("SqrtX", 1).with_matrix(sqrt_x.to_vec()))?;
        catalog.register(
            CustomGate::new("Oracle", 2)
                .with_params(["phase"])
                .with_flags(GateFlags::NONE),
        )?;
        print_info("registered custom kinds SqrtX and Oracle");
    }

    print_section("Kinds");
    println!(
        "  {:<8} {:>5}  {:<10} {:<24} {:<8} {}",
        "name", "arity", "params", "flags", "layout", "unitary"
    );
    for name in catalog.kind_names() {
        let desc = catalog.describe(name)?;
        let qubits = (0..desc.arity as u32).map(QubitId);
        let params: Vec<(&str, f64)> = desc.params.iter().map(|&p| (p, 0.0)).collect();
        let gate = catalog.instantiate(name, qubits, &params)?;

        let unitary = match is_unitary(&gate, UNITARY_TOLERANCE) {
            Ok(true) => "yes".to_string(),
            Ok(false) => "NO".to_string(),
            Err(err) => {
                print_warning(&err.to_string());
                "n/a".to_string()
            }
        };
        println!(
            "  {:<8} {:>5}  {:<10} {:<24} {:<8} {}",
            desc.name,
            desc.arity,
            desc.params.join(","),
            flag_list(desc.flags),
            format!("{:?}", layout(&gate)),
            unitary
        );
    }

    print_section("Summary");
    print_result("Kinds", catalog.kind_names().len());

    Ok(())
}
