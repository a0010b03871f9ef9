//! Gate instance to dense array.

use ndarray::Array2;
use num_complex::Complex64;
use qlane_ir::{Gate, GateKind, StandardGate};

use crate::error::{CodecError, CodecResult};
use crate::matrix;
use crate::tensor::{GateTensor, Layout, Precision};

/// Unitary matrix of a gate instance in double precision.
///
/// Custom kinds use their registered matrix and ignore parameter values;
/// an inverted instance yields the conjugate transpose. Custom kinds
/// registered without a matrix fail with
/// [`CodecError::UnsupportedGateCodec`].
pub fn unitary(gate: &Gate) -> CodecResult<Array2<Complex64>> {
    match gate {
        Gate::Basic(basic) => match basic.kind() {
            GateKind::Standard(kind) => Ok(matrix::standard(*kind, gate.params())),
            GateKind::Custom(kind) => {
                let data = kind.matrix().ok_or_else(|| CodecError::UnsupportedGateCodec {
                    gate_name: kind.name().to_string(),
                    reason: "custom kind was registered without a matrix".into(),
                })?;
                let dim = 1usize << kind.arity();
                let m = Array2::from_shape_fn((dim, dim), |(row, col)| data[row * dim + col]);
                Ok(if basic.is_inverted() {
                    matrix::dagger(&m)
                } else {
                    m
                })
            }
        },
        Gate::Controlled(controlled) => {
            let base = unitary(controlled.base())?;
            Ok(matrix::controlled(&base, controlled.controls().len()))
        }
    }
}

/// Layout used by [`encode`] for a gate.
pub fn layout(gate: &Gate) -> Layout {
    match gate.kind() {
        Some(GateKind::Standard(StandardGate::Swap | StandardGate::ISwap | StandardGate::ISwapd)) => {
            Layout::Tensor
        }
        Some(GateKind::Custom(kind)) if kind.arity() > 1 => Layout::Tensor,
        _ => Layout::Matrix,
    }
}

/// Encode a gate at the requested precision.
///
/// Single-qubit kinds, fixed controlled kinds and controlled instances are
/// `2^k × 2^k` matrices; multi-qubit non-controlled kinds are rank-`2k`
/// tensors indexed `(out…, in…)` in the gate's qubit order.
pub fn encode(gate: &Gate, precision: Precision) -> CodecResult<GateTensor> {
    let m = unitary(gate)?;
    Ok(GateTensor::from_matrix(&m, gate.arity(), layout(gate), precision))
}

/// Check that a gate's encoding is unitary within `tolerance`.
pub fn is_unitary(gate: &Gate, tolerance: f64) -> CodecResult<bool> {
    Ok(matrix::is_unitary(&unitary(gate)?, tolerance))
}
