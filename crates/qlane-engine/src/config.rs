//! Engine configuration.

use std::fmt;

use qlane_codec::Precision;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Configuration for creating an engine.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Registered engine name.
    pub name: String,
    /// Number of qubits the engine state covers.
    pub num_qubits: u32,
    /// Seed for measurement randomness; entropy-seeded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Precision of gate encodings fed to the engine.
    #[serde(default)]
    pub precision: Precision,
    /// Backend-specific configuration.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl EngineConfig {
    /// Create a new engine configuration.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            seed: None,
            precision: Precision::default(),
            extra: serde_json::Map::new(),
        }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        if config.name.is_empty() {
            return Err(EngineError::Configuration("engine name must not be empty".into()));
        }
        Ok(config)
    }

    /// Set the measurement seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the encoding precision.
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Add extra configuration.
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The random source for measurement, seeded from `seed` when set.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("name", &self.name)
            .field("num_qubits", &self.num_qubits)
            .field("seed", &self.seed)
            .field("precision", &self.precision)
            .field("extra", &self.extra.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_engine_config() {
        let config = EngineConfig::new("statevector", 3)
            .with_seed(7)
            .with_precision(Precision::Single)
            .with_extra("max_qubits", serde_json::json!(20));

        assert_eq!(config.name, "statevector");
        assert_eq!(config.num_qubits, 3);
        assert_eq!(config.seed, Some(7));
        assert!(config.extra.contains_key("max_qubits"));
    }

    #[test]
    fn test_from_json_defaults_and_extra() {
        let config =
            EngineConfig::from_json(r#"{"name": "statevector", "num_qubits": 2, "max_qubits": 20}"#)
                .unwrap();
        assert_eq!(config.seed, None);
        assert_eq!(config.precision, Precision::Double);
        assert_eq!(config.extra.get("max_qubits"), Some(&serde_json::json!(20)));
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            EngineConfig::from_json("{\"num_qubits\": 2}"),
            Err(EngineError::Serialization(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"name": "", "num_qubits": 2}"#),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::new("statevector", 4).with_seed(42);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EngineConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = EngineConfig::new("statevector", 1).with_seed(99);
        let a: Vec<f64> = config.rng().sample_iter(rand::distributions::Standard).take(5).collect();
        let b: Vec<f64> = config.rng().sample_iter(rand::distributions::Standard).take(5).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_debug_lists_extra_keys_only() {
        let config = EngineConfig::new("statevector", 1)
            .with_extra("payload", serde_json::json!("a very long blob"));
        let debug = format!("{config:?}");
        assert!(debug.contains("payload"));
        assert!(!debug.contains("a very long blob"));
    }
}
