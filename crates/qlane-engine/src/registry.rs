//! Engine registry for managing available backends.
//!
//! The [`EngineRegistry`] maps configuration names to engine constructors.
//! It is owned by the caller and passed where engines are created; nothing
//! is registered globally.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::config::EngineConfig;
use crate::engine::{Engine, EngineFactory};
use crate::error::{EngineError, EngineResult};

/// Factory function type for registered engines.
type Factory = Box<dyn Fn(EngineConfig) -> EngineResult<Box<dyn Engine>> + Send + Sync>;

/// Name of the reference dense state-vector engine.
pub const DEFAULT_ENGINE: &str = "statevector";

/// Name → constructor map for engines.
#[derive(Default)]
pub struct EngineRegistry {
    factories: FxHashMap<String, Factory>,
}

impl EngineRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an engine type under `name`.
    pub fn register<E>(&mut self, name: impl Into<String>)
    where
        E: EngineFactory + Engine + 'static,
    {
        let name = name.into();
        debug!(engine = %name, "Registering engine");
        self.factories.insert(
            name,
            Box::new(|config| {
                let engine = E::from_config(config)?;
                Ok(Box::new(engine))
            }),
        );
    }

    /// Register an engine with a custom constructor.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(EngineConfig) -> EngineResult<Box<dyn Engine>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!(engine = %name, "Registering engine factory");
        self.factories.insert(name, Box::new(factory));
    }

    /// Create the engine named by `config.name`.
    pub fn create(&self, config: EngineConfig) -> EngineResult<Box<dyn Engine>> {
        let factory = self
            .factories
            .get(&config.name)
            .ok_or_else(|| EngineError::UnknownEngine(config.name.clone()))?;
        debug!(engine = %config.name, num_qubits = config.num_qubits, "Creating engine");
        factory(config)
    }

    /// List all registered engine names, sorted.
    pub fn available_engines(&self) -> Vec<String> {
        let mut names: Vec<_> = self.factories.keys().cloned().collect();
        names.sort();
        names
    }

    /// Check if an engine is registered by name.
    pub fn has_engine(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}
