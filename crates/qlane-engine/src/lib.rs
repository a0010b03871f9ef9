//! qlane engine contract
//!
//! This crate defines the interface every simulation backend implements
//! and the caller-owned registry that maps configuration names to
//! backends.
//!
//! # Example
//!
//! ```ignore
//! use qlane_engine::{EngineConfig, EngineRegistry, DEFAULT_ENGINE};
//! use qlane_ir::Circuit;
//!
//! let mut registry = EngineRegistry::new();
//! qlane_adapter_sim::register(&mut registry);
//!
//! let config = EngineConfig::new(DEFAULT_ENGINE, 2).with_seed(7);
//! let mut engine = registry.create(config)?;
//! engine.run(&Circuit::bell()?)?;
//! let bits = engine.measure_all()?;
//! assert_eq!(bits[0], bits[1]);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod registry;

pub use config::EngineConfig;
pub use engine::{Engine, EngineFactory, check_qubit, check_qubits};
pub use error::{EngineError, EngineResult};
pub use registry::{DEFAULT_ENGINE, EngineRegistry};
