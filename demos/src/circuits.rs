//! Circuits used by the demos.

use qlane_ir::{Circuit, IrResult, QubitId};

/// GHZ state preparation on `n` qubits.
pub fn ghz(n: u32) -> IrResult<Circuit> {
    Circuit::ghz(n)
}

/// Hadamard on every qubit: the uniform superposition.
pub fn uniform(n: u32) -> IrResult<Circuit> {
    let mut circuit = Circuit::with_name("uniform", n);
    for q in 0..n {
        circuit.h(QubitId(q))?;
    }
    Ok(circuit)
}

/// A circuit followed by its inverse. Ideally leaves |0...0⟩ untouched.
pub fn round_trip(circuit: &Circuit) -> IrResult<Circuit> {
    let mut out = circuit.clone();
    out.compose(&circuit.dagger())?;
    Ok(out)
}
