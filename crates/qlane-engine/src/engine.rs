//! The engine contract.

use qlane_ir::{Circuit, Gate, IrError, QubitId};
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

/// A simulation backend that owns a quantum state.
///
/// # Contract
///
/// - `apply_gate()` MUST fail with [`EngineError::QubitIndexOutOfRange`]
///   for any addressed qubit outside `[0, num_qubits())` and leave the
///   state untouched in that case. Otherwise it MUST apply the gate's
///   unitary action to the state.
/// - `measure()` MUST sample one bit by the Born rule for that qubit,
///   collapse the state consistently with the outcome, and fail with
///   [`EngineError::QubitIndexOutOfRange`] for invalid indices.
/// - Randomness MUST come from a source injected at construction, so that
///   a seeded engine reproduces its outcomes.
///
/// Engines are not shared across threads while mutating; callers own them
/// exclusively for the duration of each call.
pub trait Engine: Send {
    /// Get the name of this engine.
    fn name(&self) -> &str;

    /// Number of qubits in the owned state.
    fn num_qubits(&self) -> u32;

    /// Apply a gate to the owned state.
    fn apply_gate(&mut self, gate: &Gate) -> EngineResult<()>;

    /// Measure one qubit, collapsing the owned state.
    fn measure(&mut self, qubit: QubitId) -> EngineResult<bool>;

    /// Apply every gate of `circuit` in topological order.
    ///
    /// The circuit may be narrower than the engine but not wider.
    fn run(&mut self, circuit: &Circuit) -> EngineResult<()> {
        if circuit.num_qubits() > self.num_qubits() {
            return Err(EngineError::Ir(IrError::QubitCountMismatch {
                expected: self.num_qubits(),
                got: circuit.num_qubits(),
            }));
        }

        debug!(
            engine = self.name(),
            circuit = circuit.name(),
            gates = circuit.num_ops(),
            "Running circuit"
        );
        for gate in circuit.gates() {
            self.apply_gate(gate)?;
        }
        Ok(())
    }

    /// Measure every qubit in index order.
    fn measure_all(&mut self) -> EngineResult<Vec<bool>> {
        (0..self.num_qubits())
            .map(|q| self.measure(QubitId(q)))
            .collect()
    }
}

/// Trait for creating engines from configuration.
pub trait EngineFactory: Sized {
    /// Create a new engine from configuration.
    fn from_config(config: EngineConfig) -> EngineResult<Self>;
}

/// Check that every qubit `gate` addresses lies in `[0, num_qubits)`.
pub fn check_qubits(gate: &Gate, num_qubits: u32) -> EngineResult<()> {
    gate.qubits()
        .iter()
        .try_for_each(|&qubit| check_qubit(qubit, num_qubits))
}

/// Check that `qubit` lies in `[0, num_qubits)`.
pub fn check_qubit(qubit: QubitId, num_qubits: u32) -> EngineResult<()> {
    if qubit.0 < num_qubits {
        Ok(())
    } else {
        Err(EngineError::QubitIndexOutOfRange { qubit, num_qubits })
    }
}
