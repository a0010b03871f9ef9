//! qlane dense state-vector engine
//!
//! This crate provides the reference implementation of the
//! [`Engine`](qlane_engine::Engine) contract. It stores all `2^n`
//! amplitudes, applies every gate as a dense matrix produced by
//! `qlane-codec`, and measures by the Born rule with collapse.
//!
//! # Performance
//!
//! | Qubits | Memory | Simulation Speed |
//! |--------|--------|------------------|
//! | 10 | ~16 KB | Instant |
//! | 15 | ~512 KB | Fast |
//! | 20 | ~16 MB | Moderate |
//!
//! # Example
//!
//! ```rust
//! use qlane_engine::{DEFAULT_ENGINE, EngineConfig, EngineRegistry};
//! use qlane_ir::Circuit;
//!
//! let mut registry = EngineRegistry::new();
//! qlane_adapter_sim::register(&mut registry);
//!
//! let mut engine = registry
//!     .create(EngineConfig::new(DEFAULT_ENGINE, 2).with_seed(7))
//!     .unwrap();
//! engine.run(&Circuit::bell().unwrap()).unwrap();
//! let bits = engine.measure_all().unwrap();
//! assert_eq!(bits[0], bits[1]);
//! ```

mod engine;
mod statevector;

pub use engine::{DEFAULT_MAX_QUBITS, StateVectorEngine};
pub use statevector::StateVector;

use qlane_engine::{DEFAULT_ENGINE, EngineRegistry};

/// Register the state-vector engine under [`DEFAULT_ENGINE`].
pub fn register(registry: &mut EngineRegistry) {
    registry.register::<StateVectorEngine>(DEFAULT_ENGINE);
}
