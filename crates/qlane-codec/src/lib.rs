//! Dense matrix and tensor encodings of qlane gates.
//!
//! [`encode`] is a total function from a gate instance and an explicit
//! [`Precision`] to a [`GateTensor`]. It is an exhaustive match over the
//! closed gate catalog; the only failure is a custom kind registered
//! without a matrix.
//!
//! # Example
//!
//! ```rust
//! use qlane_codec::{Precision, encode};
//! use qlane_ir::{Gate, QubitId};
//!
//! let cnot = Gate::x(QubitId(1)).control([QubitId(0)]).unwrap();
//! let tensor = encode(&cnot, Precision::Double).unwrap();
//!
//! assert_eq!(tensor.shape(), &[4, 4]);
//! assert!(tensor.is_unitary(qlane_codec::UNITARY_TOLERANCE));
//! ```

pub mod encode;
pub mod error;
pub mod matrix;
pub mod tensor;

pub use encode::{encode, is_unitary, layout, unitary};
pub use error::{CodecError, CodecResult};
pub use matrix::UNITARY_TOLERANCE;
pub use tensor::{GateTensor, Layout, Precision};
