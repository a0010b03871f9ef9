//! Dense unitary matrices for the standard gate kinds.
//!
//! Matrices are row-major `Array2<Complex64>` indexed big-endian over the
//! gate's declared qubit order: the first qubit is the most significant bit.

use ndarray::{Array2, array, s};
use num_complex::Complex64;
use qlane_ir::StandardGate;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Default tolerance for unitarity checks.
pub const UNITARY_TOLERANCE: f64 = 1e-6;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Create the identity matrix of dimension `dim`.
pub fn identity(dim: usize) -> Array2<Complex64> {
    Array2::from_diag_elem(dim, ONE)
}

/// Diagonal single-qubit matrix `diag(1, phase)`.
fn phase(phase: Complex64) -> Array2<Complex64> {
    array![[ONE, ZERO], [ZERO, phase]]
}

/// Matrix of a standard kind with its bound parameter values.
///
/// Exhaustive over the catalog, so a new kind cannot be added without an
/// encoding.
pub fn standard(gate: StandardGate, params: &[f64]) -> Array2<Complex64> {
    let theta = params.first().copied().unwrap_or_default();
    match gate {
        StandardGate::I => identity(2),
        StandardGate::X => array![[ZERO, ONE], [ONE, ZERO]],
        StandardGate::Y => array![[ZERO, -I], [I, ZERO]],
        StandardGate::Z => phase(-ONE),
        StandardGate::H => {
            let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
            array![[h, h], [h, -h]]
        }
        StandardGate::S => phase(I),
        StandardGate::Sd => phase(-I),
        StandardGate::T => phase(Complex64::from_polar(1.0, PI / 4.0)),
        StandardGate::Td => phase(Complex64::from_polar(1.0, -PI / 4.0)),
        StandardGate::Rx => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new(0.0, -(theta / 2.0).sin());
            array![[c, s], [s, c]]
        }
        StandardGate::Ry => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new((theta / 2.0).sin(), 0.0);
            array![[c, -s], [s, c]]
        }
        StandardGate::Rz => phase(Complex64::from_polar(1.0, theta)),
        StandardGate::Swap => array![
            [ONE, ZERO, ZERO, ZERO],
            [ZERO, ZERO, ONE, ZERO],
            [ZERO, ONE, ZERO, ZERO],
            [ZERO, ZERO, ZERO, ONE],
        ],
        StandardGate::ISwap => iswap(I),
        StandardGate::ISwapd => iswap(-I),
        StandardGate::Cx => controlled(&standard(StandardGate::X, &[]), 1),
        StandardGate::Cy => controlled(&standard(StandardGate::Y, &[]), 1),
        StandardGate::Cz => controlled(&standard(StandardGate::Z, &[]), 1),
    }
}

fn iswap(phase: Complex64) -> Array2<Complex64> {
    array![
        [ONE, ZERO, ZERO, ZERO],
        [ZERO, ZERO, phase, ZERO],
        [ZERO, phase, ZERO, ZERO],
        [ZERO, ZERO, ZERO, ONE],
    ]
}

/// Embed `base` under `num_controls` leading control qubits.
///
/// Starts from the identity and overwrites the block where every control
/// bit is 1, which is the bottom-right block in big-endian order.
pub fn controlled(base: &Array2<Complex64>, num_controls: usize) -> Array2<Complex64> {
    let block = base.nrows();
    let dim = block << num_controls;
    let mut matrix = identity(dim);
    matrix
        .slice_mut(s![dim - block.., dim - block..])
        .assign(base);
    matrix
}

/// Conjugate transpose.
pub fn dagger(matrix: &Array2<Complex64>) -> Array2<Complex64> {
    matrix.t().mapv(|z| z.conj())
}

/// Check `M·M† = I` element-wise within `tolerance`.
pub fn is_unitary(matrix: &Array2<Complex64>, tolerance: f64) -> bool {
    if !matrix.is_square() {
        return false;
    }
    let product = matrix.dot(&dagger(matrix));
    product.indexed_iter().all(|((row, col), z)| {
        let expected = if row == col { ONE } else { ZERO };
        (z - expected).norm() < tolerance
    })
}

/// Check two matrices agree element-wise within `tolerance`.
pub fn approx_eq(a: &Array2<Complex64>, b: &Array2<Complex64>, tolerance: f64) -> bool {
    a.shape() == b.shape() && a.iter().zip(b.iter()).all(|(x, y)| (x - y).norm() < tolerance)
}
