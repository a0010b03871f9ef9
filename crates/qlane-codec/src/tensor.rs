//! Precision-tagged gate tensors.

use ndarray::{Array2, ArrayD, IxDyn};
use num_complex::{Complex32, Complex64};
use serde::{Deserialize, Serialize};

use crate::matrix;

/// Floating-point precision of an encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// 32-bit complex components.
    Single,
    /// 64-bit complex components.
    #[default]
    Double,
}

/// Index layout of an encoded gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A `2^k × 2^k` matrix.
    Matrix,
    /// A rank-`2k` tensor of shape `[2; 2k]` indexed `(out₀…out_{k-1}, in₀…in_{k-1})`.
    Tensor,
}

/// A dense gate encoding at a given precision.
#[derive(Debug, Clone, PartialEq)]
pub enum GateTensor {
    /// Single-precision data.
    Single(ArrayD<Complex32>),
    /// Double-precision data.
    Double(ArrayD<Complex64>),
}

impl GateTensor {
    /// Build a tensor from a square matrix over `num_qubits` qubits.
    pub(crate) fn from_matrix(
        matrix: &Array2<Complex64>,
        num_qubits: usize,
        layout: Layout,
        precision: Precision,
    ) -> Self {
        let dim = matrix.nrows();
        let shape = match layout {
            Layout::Matrix => vec![dim, dim],
            Layout::Tensor => vec![2; 2 * num_qubits],
        };

        // Big-endian: the first `num_qubits` axes spell the row index.
        let element = |idx: &IxDyn| -> Complex64 {
            match layout {
                Layout::Matrix => matrix[[idx[0], idx[1]]],
                Layout::Tensor => {
                    let bits = |axes: std::ops::Range<usize>| {
                        axes.fold(0usize, |acc, axis| (acc << 1) | idx[axis])
                    };
                    matrix[[bits(0..num_qubits), bits(num_qubits..2 * num_qubits)]]
                }
            }
        };

        match precision {
            Precision::Double => {
                GateTensor::Double(ArrayD::from_shape_fn(IxDyn(&shape), |idx| element(&idx)))
            }
            Precision::Single => GateTensor::Single(ArrayD::from_shape_fn(IxDyn(&shape), |idx| {
                let z = element(&idx);
                Complex32::new(z.re as f32, z.im as f32)
            })),
        }
    }

    /// Precision of the data.
    pub fn precision(&self) -> Precision {
        match self {
            GateTensor::Single(_) => Precision::Single,
            GateTensor::Double(_) => Precision::Double,
        }
    }

    /// Shape of the data.
    pub fn shape(&self) -> &[usize] {
        match self {
            GateTensor::Single(t) => t.shape(),
            GateTensor::Double(t) => t.shape(),
        }
    }

    /// Flatten back into a square double-precision matrix.
    pub fn to_matrix(&self) -> Array2<Complex64> {
        let flat: Vec<Complex64> = match self {
            GateTensor::Single(t) => t
                .iter()
                .map(|z| Complex64::new(f64::from(z.re), f64::from(z.im)))
                .collect(),
            GateTensor::Double(t) => t.iter().copied().collect(),
        };
        let dim = flat.len().isqrt();
        Array2::from_shape_fn((dim, dim), |(row, col)| flat[row * dim + col])
    }

    /// Check `M·M† = I` within `tolerance`.
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        matrix::is_unitary(&self.to_matrix(), tolerance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qlane_ir::StandardGate;

    #[test]
    fn test_precision_serde() {
        assert_eq!(serde_json::to_string(&Precision::Single).unwrap(), "\"single\"");
        let p: Precision = serde_json::from_str("\"double\"").unwrap();
        assert_eq!(p, Precision::Double);
        assert_eq!(Precision::default(), Precision::Double);
    }

    #[test]
    fn test_tensor_layout_indices() {
        let swap = matrix::standard(StandardGate::Swap, &[]);
        let tensor = GateTensor::from_matrix(&swap, 2, Layout::Tensor, Precision::Double);
        assert_eq!(tensor.shape(), &[2, 2, 2, 2]);

        let GateTensor::Double(t) = &tensor else {
            panic!("expected double precision");
        };
        for o0 in 0..2 {
            for o1 in 0..2 {
                for i0 in 0..2 {
                    for i1 in 0..2 {
                        let expected = if o0 == i1 && o1 == i0 { 1.0 } else { 0.0 };
                        assert_eq!(t[[o0, o1, i0, i1].as_slice()].re, expected);
                    }
                }
            }
        }
        assert_eq!(tensor.to_matrix(), swap);
    }

    #[test]
    fn test_single_precision_round_trip() {
        let h = matrix::standard(StandardGate::H, &[]);
        let tensor = GateTensor::from_matrix(&h, 1, Layout::Matrix, Precision::Single);
        assert_eq!(tensor.precision(), Precision::Single);
        assert!(matrix::approx_eq(&tensor.to_matrix(), &h, 1e-6));
        assert!(tensor.is_unitary(1e-5));
    }
}
