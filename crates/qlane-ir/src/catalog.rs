//! Gate catalog: name resolution and custom kind registration.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{IrError, IrResult};
use crate::gate::{CustomGate, CustomKind, Gate, GateDescriptor, GateKind, StandardGate};
use crate::qubit::QubitId;

/// Resolves gate kinds by name.
///
/// The standard kinds are always present. Custom kinds must be registered
/// before they can be described or instantiated; the catalog is owned by
/// the caller and passed where it is needed.
#[derive(Debug, Clone, Default)]
pub struct GateCatalog {
    custom: FxHashMap<String, CustomKind>,
}

impl GateCatalog {
    /// Create a catalog holding only the standard kinds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a custom kind, returning its handle.
    ///
    /// Fails with [`IrError::DuplicateGateKind`] when the name is taken and
    /// [`IrError::InvalidCustomGate`] when the definition is malformed.
    pub fn register(&mut self, gate: CustomGate) -> IrResult<GateKind> {
        gate.validate()?;
        if self.contains(gate.name()) {
            return Err(IrError::DuplicateGateKind(gate.name().to_string()));
        }

        debug!(
            name = gate.name(),
            arity = gate.arity(),
            params = gate.params().len(),
            "Registering custom gate kind"
        );
        let name = gate.name().to_string();
        let kind = CustomKind::new(gate);
        self.custom.insert(name, kind.clone());
        Ok(GateKind::Custom(kind))
    }

    /// Resolve a kind by name.
    pub fn resolve(&self, name: &str) -> IrResult<GateKind> {
        if let Ok(gate) = StandardGate::from_name(name) {
            return Ok(GateKind::Standard(gate));
        }
        self.custom
            .get(name)
            .cloned()
            .map(GateKind::Custom)
            .ok_or_else(|| IrError::UnknownGateKind(name.to_string()))
    }

    /// Describe a kind by name: arity, parameter schema and classification.
    pub fn describe(&self, name: &str) -> IrResult<GateDescriptor<'_>> {
        if let Ok(gate) = StandardGate::from_name(name) {
            return Ok(gate.describe());
        }
        let kind = self
            .custom
            .get(name)
            .ok_or_else(|| IrError::UnknownGateKind(name.to_string()))?;
        Ok(GateDescriptor {
            name: kind.name(),
            arity: kind.arity(),
            params: kind.params().iter().map(String::as_str).collect(),
            flags: kind.flags(),
            adjoint: kind.adjoint_rule(),
        })
    }

    /// Resolve `name` and instantiate it on `qubits` with `params`.
    pub fn instantiate(
        &self,
        name: &str,
        qubits: impl IntoIterator<Item = QubitId>,
        params: &[(&str, f64)],
    ) -> IrResult<Gate> {
        Gate::new(self.resolve(name)?, qubits, params)
    }

    /// Check whether a kind with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        StandardGate::from_name(name).is_ok() || self.custom.contains_key(name)
    }

    /// All kind names: standard kinds in catalog order, then custom kinds sorted.
    pub fn kind_names(&self) -> Vec<&str> {
        let mut custom: Vec<&str> = self.custom.keys().map(String::as_str).collect();
        custom.sort_unstable();
        StandardGate::ALL
            .iter()
            .map(|g| g.name())
            .chain(custom)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::{AdjointRule, GateFlags};
    use num_complex::Complex64;

    fn sqrt_swap() -> CustomGate {
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let a = Complex64::new(0.5, 0.5);
        let b = Complex64::new(0.5, -0.5);
        #[rustfmt::skip]
        let matrix = vec![
            one,  zero, zero, zero,
            zero, a,    b,    zero,
            zero, b,    a,    zero,
            zero, zero, zero, one,
        ];
        CustomGate::new("SqrtSwap", 2).with_matrix(matrix)
    }

    #[test]
    fn test_describe_standard() {
        let catalog = GateCatalog::new();
        let rz = catalog.describe("Rz").unwrap();
        assert_eq!(rz.arity, 1);
        assert_eq!(rz.params, vec!["theta"]);
        assert_eq!(rz.adjoint, AdjointRule::NegateParameters);

        let s = catalog.describe("S").unwrap();
        assert_eq!(s.adjoint, AdjointRule::Paired(StandardGate::Sd));
        assert!(s.flags.clifford);
        assert!(!s.flags.hermitian);
    }

    #[test]
    fn test_describe_unknown() {
        let catalog = GateCatalog::new();
        assert_eq!(
            catalog.describe("SqrtSwap"),
            Err(IrError::UnknownGateKind("SqrtSwap".into()))
        );
        assert!(matches!(
            catalog.instantiate("SqrtSwap", [QubitId(0), QubitId(1)], &[]),
            Err(IrError::UnknownGateKind(_))
        ));
    }

    #[test]
    fn test_register_and_instantiate() {
        let mut catalog = GateCatalog::new();
        catalog.register(sqrt_swap()).unwrap();

        let desc = catalog.describe("SqrtSwap").unwrap();
        assert_eq!(desc.arity, 2);
        assert_eq!(desc.adjoint, AdjointRule::Inverted);

        let gate = catalog
            .instantiate("SqrtSwap", [QubitId(0), QubitId(1)], &[])
            .unwrap();
        assert_eq!(gate.name(), "SqrtSwap");
        assert_eq!(catalog.kind_names().last(), Some(&"SqrtSwap"));
    }

    #[test]
    fn test_register_duplicate_name() {
        let mut catalog = GateCatalog::new();
        catalog.register(sqrt_swap()).unwrap();
        assert_eq!(
            catalog.register(sqrt_swap()),
            Err(IrError::DuplicateGateKind("SqrtSwap".into()))
        );
        assert!(matches!(
            catalog.register(CustomGate::new("H", 1)),
            Err(IrError::DuplicateGateKind(_))
        ));
    }

    #[test]
    fn test_register_invalid_definitions() {
        let mut catalog = GateCatalog::new();
        assert!(matches!(
            catalog.register(CustomGate::new("Empty", 0)),
            Err(IrError::InvalidCustomGate { .. })
        ));
        assert!(matches!(
            catalog.register(CustomGate::new("Short", 1).with_matrix(vec![Complex64::new(1.0, 0.0)])),
            Err(IrError::InvalidCustomGate { .. })
        ));
        assert!(matches!(
            catalog.register(CustomGate::new("Twice", 1).with_params(["a", "a"])),
            Err(IrError::InvalidCustomGate { .. })
        ));
    }

    #[test]
    fn test_register_rejects_non_unitary_matrix() {
        let mut catalog = GateCatalog::new();
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let shear = vec![one, one, zero, one];

        assert!(matches!(
            catalog.register(CustomGate::new("Shear", 1).with_matrix(shear)),
            Err(IrError::InvalidCustomGate { .. })
        ));
        assert!(!catalog.contains("Shear"));
    }

    #[test]
    fn test_register_rejects_false_hermitian_flag() {
        let mut catalog = GateCatalog::new();
        let one = Complex64::new(1.0, 0.0);
        let zero = Complex64::new(0.0, 0.0);
        let phase = vec![one, zero, zero, Complex64::new(0.0, 1.0)];

        let flagged = CustomGate::new("FakeHerm", 1)
            .with_matrix(phase.clone())
            .with_flags(GateFlags::new(true, false, true));
        assert!(matches!(
            catalog.register(flagged),
            Err(IrError::InvalidCustomGate { .. })
        ));

        // Same matrix without the flag is a valid non-Hermitian kind.
        let kind = catalog
            .register(CustomGate::new("Phase", 1).with_matrix(phase))
            .unwrap();
        assert_eq!(kind.adjoint_rule(), AdjointRule::Inverted);

        let z = vec![one, zero, zero, -one];
        let hermitian = CustomGate::new("MyZ", 1)
            .with_matrix(z)
            .with_flags(GateFlags::new(true, false, true));
        assert_eq!(
            catalog.register(hermitian).unwrap().adjoint_rule(),
            AdjointRule::SelfAdjoint
        );
    }

    #[test]
    fn test_custom_parameter_schema() {
        let mut catalog = GateCatalog::new();
        catalog
            .register(
                CustomGate::new("Phased", 1)
                    .with_params(["theta", "phi"])
                    .with_flags(GateFlags::NONE),
            )
            .unwrap();

        let gate = catalog
            .instantiate("Phased", [QubitId(0)], &[("phi", 0.25), ("theta", 1.5)])
            .unwrap();
        assert_eq!(gate.params(), &[1.5, 0.25]);
        assert!(matches!(
            catalog.instantiate("Phased", [QubitId(0)], &[("theta", 1.5)]),
            Err(IrError::ParameterMismatch { .. })
        ));
    }
}
