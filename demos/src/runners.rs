//! Shot-based sampling through the engine registry.

use std::collections::BTreeMap;

use indicatif::ProgressBar;
use qlane_engine::{EngineConfig, EngineRegistry, EngineResult};
use qlane_ir::Circuit;
use tracing::{debug, info};

/// Registry with every engine shipped in this workspace.
pub fn default_registry() -> EngineRegistry {
    let mut registry = EngineRegistry::new();
    qlane_adapter_sim::register(&mut registry);
    registry
}

/// Measurement outcome counts keyed by bitstring, qubit 0 first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    counts: BTreeMap<String, usize>,
    shots: usize,
}

impl Counts {
    /// Record one outcome.
    pub fn record(&mut self, bits: &[bool]) {
        let key: String = bits.iter().map(|&b| if b { '1' } else { '0' }).collect();
        *self.counts.entry(key).or_default() += 1;
        self.shots += 1;
    }

    /// Total number of recorded shots.
    pub fn shots(&self) -> usize {
        self.shots
    }

    /// Count for one bitstring.
    pub fn get(&self, bitstring: &str) -> usize {
        self.counts.get(bitstring).copied().unwrap_or(0)
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no shot has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Outcomes sorted by descending count.
    pub fn sorted(&self) -> Vec<(&str, usize)> {
        let mut out: Vec<_> = self.counts.iter().map(|(k, &v)| (k.as_str(), v)).collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        out
    }
}

/// Run `circuit` `shots` times on fresh engines and measure every qubit.
///
/// With a seeded config, shot `i` uses `seed + i`, so the whole run is
/// reproducible.
pub fn sample(
    registry: &EngineRegistry,
    config: &EngineConfig,
    circuit: &Circuit,
    shots: usize,
    progress: Option<&ProgressBar>,
) -> EngineResult<Counts> {
    info!(
        engine = %config.name,
        circuit = %circuit.name(),
        shots,
        "Sampling circuit"
    );

    let mut counts = Counts::default();
    for shot in 0..shots {
        let mut shot_config = config.clone();
        if let Some(seed) = config.seed {
            shot_config.seed = Some(seed.wrapping_add(shot as u64));
        }

        let mut engine = registry.create(shot_config)?;
        engine.run(circuit)?;
        counts.record(&engine.measure_all()?);

        if let Some(pb) = progress {
            pb.inc(1);
        }
    }

    debug!(distinct = counts.len(), "Sampling finished");
    Ok(counts)
}
