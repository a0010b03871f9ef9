//! qlane circuit intermediate representation
//!
//! This crate provides the gate taxonomy and the circuit graph that the
//! rest of the qlane workspace is built on.
//!
//! # Core Components
//!
//! - **Qubits**: [`QubitId`] addresses a lane in `[0, n)`
//! - **Gates**: [`StandardGate`] is the closed catalog with a static metadata
//!   side-table; [`CustomGate`] definitions are registered in a [`GateCatalog`];
//!   [`Gate`] is an immutable instance, optionally controlled
//! - **DAG**: [`CircuitDag`] threads gate nodes between per-lane boundary markers
//! - **Circuit**: [`Circuit`] high-level builder API
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qlane_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_name("bell_state", 2);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.depth(), 2);
//! ```
//!
//! # Example: Inverting a Circuit
//!
//! ```rust
//! use qlane_ir::{Circuit, Gate, QubitId};
//!
//! let mut circuit = Circuit::new(1);
//! circuit.s(QubitId(0)).unwrap().rz(0.25, QubitId(0)).unwrap();
//!
//! let inverse = circuit.dagger();
//! let names: Vec<_> = inverse.gates().map(Gate::name).collect();
//! assert_eq!(names, ["Rz", "Sd"]);
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `I`, `X`, `Y`, `Z` | 1 | Pauli gates |
//! | `H` | 1 | Hadamard gate |
//! | `S`, `Sd` | 1 | S and S-dagger gates |
//! | `T`, `Td` | 1 | T and T-dagger gates |
//! | `Rx`, `Ry`, `Rz` | 1 | Rotation gates, parameter `theta` |
//! | `Swap` | 2 | SWAP gate |
//! | `iSwap`, `iSwapd` | 2 | iSWAP and its adjoint |
//! | `Cx`, `Cy`, `Cz` | 2 | Controlled Pauli gates, control first |
//! | `Control` | k | Any gate conditioned on control qubits |

pub mod catalog;
pub mod circuit;
pub mod dag;
pub mod error;
pub mod gate;
pub mod qubit;

pub use catalog::GateCatalog;
pub use circuit::Circuit;
pub use dag::{CircuitDag, DagEdge, DagNode, NodeIndex};
pub use error::{IrError, IrResult};
pub use gate::{
    AdjointRule, BasicGate, ControlledGate, CustomGate, CustomKind, Gate, GateDescriptor,
    GateFlags, GateKind, GateSpec, StandardGate,
};
pub use qubit::QubitId;
