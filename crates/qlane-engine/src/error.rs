//! Error types for the engine crate.

use qlane_codec::CodecError;
use qlane_ir::{IrError, QubitId};
use thiserror::Error;

/// Errors that can occur in engine operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Qubit index is out of range for the engine's state.
    #[error("Qubit {qubit} out of range for engine with {num_qubits} qubits")]
    QubitIndexOutOfRange {
        /// The offending qubit.
        qubit: QubitId,
        /// Number of qubits the engine owns.
        num_qubits: u32,
    },

    /// The engine's state cannot support the requested operation.
    #[error("Engine state error: {0}")]
    EngineStateError(String),

    /// No engine is registered under the requested name.
    #[error("No engine registered with name '{0}'")]
    UnknownEngine(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Gate encoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// Circuit or gate validation failed.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
