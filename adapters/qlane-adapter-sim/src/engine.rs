//! State-vector engine implementation.

use qlane_codec::{Precision, encode};
use qlane_engine::{
    Engine, EngineConfig, EngineError, EngineFactory, EngineResult, check_qubit, check_qubits,
};
use qlane_ir::{Gate, QubitId};
use rand::Rng;
use rand::rngs::StdRng;
use tracing::{debug, instrument, trace};

use crate::statevector::StateVector;

/// Default cap on the number of qubits a configured engine may own.
pub const DEFAULT_MAX_QUBITS: u32 = 20;

/// Dense state-vector engine.
///
/// Every gate is encoded by the codec at the configured precision and
/// applied as a dense matrix. Measurement draws from the injected random
/// source `R`.
pub struct StateVectorEngine<R = StdRng> {
    state: StateVector,
    precision: Precision,
    rng: R,
}

impl<R: Rng + Send> StateVectorEngine<R> {
    /// Create an engine over `num_qubits` qubits in |0...0⟩.
    pub fn with_rng(num_qubits: u32, precision: Precision, rng: R) -> EngineResult<Self> {
        if num_qubits >= usize::BITS - 1 {
            return Err(EngineError::Configuration(format!(
                "{num_qubits} qubits cannot be addressed by a dense state vector"
            )));
        }
        Ok(Self {
            state: StateVector::new(num_qubits as usize),
            precision,
            rng,
        })
    }

    /// The current state.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Precision used to encode gates.
    pub fn precision(&self) -> Precision {
        self.precision
    }
}

impl<R: Rng + Send> Engine for StateVectorEngine<R> {
    fn name(&self) -> &str {
        "statevector"
    }

    #[allow(clippy::cast_possible_truncation)]
    fn num_qubits(&self) -> u32 {
        // Bounded by the check in `with_rng`.
        self.state.num_qubits() as u32
    }

    fn apply_gate(&mut self, gate: &Gate) -> EngineResult<()> {
        check_qubits(gate, self.num_qubits())?;
        let matrix = encode(gate, self.precision)?.to_matrix();
        let qubits: Vec<usize> = gate.qubits().iter().map(|q| q.index()).collect();
        self.state.apply_matrix(&matrix, &qubits);
        trace!(gate = %gate, "Applied gate");
        Ok(())
    }

    #[instrument(skip(self), fields(engine = "statevector"))]
    fn measure(&mut self, qubit: QubitId) -> EngineResult<bool> {
        check_qubit(qubit, self.num_qubits())?;

        let norm = self.state.norm_sqr();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return Err(EngineError::EngineStateError(format!(
                "cannot measure a state with squared norm {norm}"
            )));
        }

        let p_one = self.state.probability_one(qubit.index());
        let r: f64 = self.rng.r#gen::<f64>() * norm;
        let outcome = r < p_one;

        if !self.state.collapse(qubit.index(), outcome) {
            return Err(EngineError::EngineStateError(format!(
                "outcome {} on {qubit} has zero probability",
                u8::from(outcome)
            )));
        }

        debug!(%qubit, p_one = p_one / norm, outcome, "Measured qubit");
        Ok(outcome)
    }
}

impl EngineFactory for StateVectorEngine {
    fn from_config(config: EngineConfig) -> EngineResult<Self> {
        let max_qubits = match config.extra.get("max_qubits") {
            None => DEFAULT_MAX_QUBITS,
            Some(value) => value
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    EngineError::Configuration(format!("max_qubits must be an integer, got {value}"))
                })?,
        };
        if config.num_qubits > max_qubits {
            return Err(EngineError::Configuration(format!(
                "{} qubits exceeds the state-vector limit of {max_qubits}",
                config.num_qubits
            )));
        }

        debug!(
            num_qubits = config.num_qubits,
            precision = ?config.precision,
            seeded = config.seed.is_some(),
            "Creating state-vector engine"
        );
        Self::with_rng(config.num_qubits, config.precision, config.rng())
    }
}
