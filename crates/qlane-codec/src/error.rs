//! Error types for the codec.

use thiserror::Error;

/// Errors that can occur while encoding gates.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// The gate kind has no matrix encoding.
    #[error("No matrix encoding for gate '{gate_name}': {reason}")]
    UnsupportedGateCodec {
        /// Name of the gate.
        gate_name: String,
        /// Why no encoding is available.
        reason: String,
    },
}

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
