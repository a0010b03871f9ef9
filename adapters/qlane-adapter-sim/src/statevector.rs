//! Dense state-vector storage and kernels.

use ndarray::Array2;
use num_complex::Complex64;

/// A state vector over `n` qubits.
///
/// Amplitude index bit `q` holds qubit `q` (qubit 0 is the least
/// significant bit).
#[derive(Debug, Clone, PartialEq)]
pub struct StateVector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl StateVector {
    /// Create a new state vector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The raw amplitudes.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared norm of the state.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Probability of every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Unnormalised probability of reading 1 on `qubit`.
    pub fn probability_one(&self, qubit: usize) -> f64 {
        let mask = 1 << qubit;
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & mask != 0)
            .map(|(_, amp)| amp.norm_sqr())
            .sum()
    }

    /// Apply a `2^k × 2^k` matrix to `qubits`.
    ///
    /// The matrix is indexed big-endian over `qubits`: `qubits[0]` is the
    /// most significant bit of the row and column index.
    pub fn apply_matrix(&mut self, matrix: &Array2<Complex64>, qubits: &[usize]) {
        let k = qubits.len();
        let block = 1usize << k;
        let mask = qubits.iter().fold(0usize, |m, &q| m | (1 << q));

        // Offset of each local basis state within the global index.
        let offsets: Vec<usize> = (0..block)
            .map(|local| {
                qubits
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| (local >> (k - 1 - j)) & 1 == 1)
                    .fold(0usize, |acc, (_, &q)| acc | (1 << q))
            })
            .collect();

        let mut gathered = vec![Complex64::new(0.0, 0.0); block];
        for base in 0..self.amplitudes.len() {
            if base & mask != 0 {
                continue;
            }
            for (slot, &offset) in gathered.iter_mut().zip(&offsets) {
                *slot = self.amplitudes[base | offset];
            }
            for (row, &offset) in offsets.iter().enumerate() {
                self.amplitudes[base | offset] = matrix
                    .row(row)
                    .iter()
                    .zip(&gathered)
                    .map(|(m, a)| m * a)
                    .sum();
            }
        }
    }

    /// Project `qubit` onto `outcome` and renormalise.
    ///
    /// Returns `false` and leaves the state untouched when the outcome has
    /// zero probability. Any strictly positive branch is renormalised.
    pub fn collapse(&mut self, qubit: usize, outcome: bool) -> bool {
        let mask = 1 << qubit;
        let keep = |i: usize| (i & mask != 0) == outcome;

        let kept: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| keep(*i))
            .map(|(_, amp)| amp.norm_sqr())
            .sum();
        if kept <= 0.0 {
            return false;
        }

        let norm = kept.sqrt();
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if keep(i) {
                *amp /= norm;
            } else {
                *amp = Complex64::new(0.0, 0.0);
            }
        }
        true
    }
}
