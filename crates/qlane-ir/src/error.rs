//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Gate kind is not part of the catalog.
    #[error("Unknown gate kind '{0}'")]
    UnknownGateKind(String),

    /// A custom gate kind was registered under a name already in use.
    #[error("Gate kind '{0}' is already registered")]
    DuplicateGateKind(String),

    /// A custom gate definition is malformed.
    #[error("Invalid custom gate '{name}': {reason}")]
    InvalidCustomGate {
        /// Name of the custom gate.
        name: String,
        /// What is wrong with the definition.
        reason: String,
    },

    /// Gate requires a different number of qubits.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    ArityMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Expected number of qubits.
        expected: usize,
        /// Actual number of qubits provided.
        got: usize,
    },

    /// Bound parameters do not match the kind's schema.
    #[error("Parameter mismatch for gate '{gate_name}': {reason}")]
    ParameterMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Which parameter is missing, unexpected or invalid.
        reason: String,
    },

    /// The same qubit is addressed twice by one gate.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Qubit index lies outside `[0, n)`.
    #[error(
        "Qubit {qubit} out of range for {num_qubits}-qubit circuit{}",
        format_gate_context(.gate_name)
    )]
    QubitIndexOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits in the circuit.
        num_qubits: u32,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// Two circuits of different widths were combined.
    #[error("Qubit count mismatch: expected {expected}, got {got}")]
    QubitCountMismatch {
        /// Qubit count of the receiving circuit.
        expected: u32,
        /// Qubit count of the other circuit.
        got: u32,
    },

    /// Invalid DAG structure.
    #[error("Invalid DAG structure: {0}")]
    InvalidDag(String),
}

/// Helper function to format optional gate context.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
