//! High-level circuit builder API.

use std::sync::OnceLock;

use tracing::debug;

use crate::dag::{CircuitDag, NodeIndex};
use crate::error::IrResult;
use crate::gate::Gate;
use crate::qubit::QubitId;

/// A quantum circuit over a fixed number of qubit lanes.
///
/// Wraps a [`CircuitDag`] with a builder API and a lazily computed depth.
/// Every mutation clears the cached depth.
#[derive(Debug, Clone)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// The underlying DAG representation.
    dag: CircuitDag,
    depth: OnceLock<usize>,
}

impl Circuit {
    /// Create an empty circuit with `num_qubits` lanes.
    pub fn new(num_qubits: u32) -> Self {
        Self::with_name("circuit", num_qubits)
    }

    /// Create an empty named circuit.
    pub fn with_name(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            dag: CircuitDag::new(num_qubits),
            depth: OnceLock::new(),
        }
    }

    /// Insert a gate at the end of every lane it touches.
    ///
    /// On error the circuit is unchanged.
    pub fn insert(&mut self, gate: Gate) -> IrResult<NodeIndex> {
        let node = self.dag.apply(gate)?;
        self.depth = OnceLock::new();
        Ok(node)
    }

    /// Append `other` after this circuit.
    pub fn compose(&mut self, other: &Circuit) -> IrResult<&mut Self> {
        self.dag.compose(&other.dag)?;
        self.depth = OnceLock::new();
        debug!(
            circuit = %self.name,
            appended = other.dag.num_ops(),
            total = self.dag.num_ops(),
            "Composed circuit"
        );
        Ok(self)
    }

    /// The inverse circuit: adjoint gates in reverse order.
    pub fn dagger(&self) -> Circuit {
        Self {
            name: format!("{}_dg", self.name),
            dag: self.dag.dagger(),
            depth: OnceLock::new(),
        }
    }

    // =========================================================================
    // Single-qubit gates
    // =========================================================================

    /// Apply identity gate.
    pub fn i(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::i(qubit))?;
        Ok(self)
    }

    /// Apply Pauli-X gate.
    pub fn x(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::x(qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Y gate.
    pub fn y(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::y(qubit))?;
        Ok(self)
    }

    /// Apply Pauli-Z gate.
    pub fn z(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::z(qubit))?;
        Ok(self)
    }

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::h(qubit))?;
        Ok(self)
    }

    /// Apply S gate.
    pub fn s(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::s(qubit))?;
        Ok(self)
    }

    /// Apply S-dagger gate.
    pub fn sd(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::sd(qubit))?;
        Ok(self)
    }

    /// Apply T gate.
    pub fn t(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::t(qubit))?;
        Ok(self)
    }

    /// Apply T-dagger gate.
    pub fn td(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::td(qubit))?;
        Ok(self)
    }

    /// Apply Rx rotation.
    pub fn rx(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::rx(theta, qubit)?)?;
        Ok(self)
    }

    /// Apply Ry rotation.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::ry(theta, qubit)?)?;
        Ok(self)
    }

    /// Apply Rz rotation.
    pub fn rz(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::rz(theta, qubit)?)?;
        Ok(self)
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// Apply SWAP gate.
    pub fn swap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::swap(q1, q2)?)?;
        Ok(self)
    }

    /// Apply iSWAP gate.
    pub fn iswap(&mut self, q1: QubitId, q2: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::iswap(q1, q2)?)?;
        Ok(self)
    }

    /// Apply CNOT gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::cx(control, target)?)?;
        Ok(self)
    }

    /// Apply CY gate.
    pub fn cy(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::cy(control, target)?)?;
        Ok(self)
    }

    /// Apply CZ gate.
    pub fn cz(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.insert(Gate::cz(control, target)?)?;
        Ok(self)
    }

    /// Apply `base` conditioned on `controls`.
    pub fn control(
        &mut self,
        base: Gate,
        controls: impl IntoIterator<Item = QubitId>,
    ) -> IrResult<&mut Self> {
        self.insert(base.control(controls)?)?;
        Ok(self)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.dag.num_qubits()
    }

    /// Get the number of gates.
    pub fn num_ops(&self) -> usize {
        self.dag.num_ops()
    }

    /// Get the circuit depth, computed on first use after a mutation.
    pub fn depth(&self) -> usize {
        *self.depth.get_or_init(|| self.dag.depth())
    }

    /// Gate nodes grouped by topological layer.
    pub fn layers(&self) -> Vec<Vec<NodeIndex>> {
        self.dag.layers()
    }

    /// Gates on lane `qubit`, from input to output.
    pub fn lane(&self, qubit: QubitId) -> IrResult<Vec<&Gate>> {
        Ok(self
            .dag
            .lane(qubit)?
            .into_iter()
            .filter_map(|node| self.dag.gate(node))
            .collect())
    }

    /// Gates in insertion order, which is a topological order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.dag.ops().map(|(_, gate)| gate)
    }

    /// Get a reference to the underlying DAG.
    pub fn dag(&self) -> &CircuitDag {
        &self.dag
    }

    /// Consume the circuit and return the DAG.
    pub fn into_dag(self) -> CircuitDag {
        self.dag
    }

    // =========================================================================
    // Pre-built circuits
    // =========================================================================

    /// Create a Bell state circuit.
    pub fn bell() -> IrResult<Self> {
        let mut circuit = Self::with_name("bell", 2);
        circuit.h(QubitId(0))?.cx(QubitId(0), QubitId(1))?;
        Ok(circuit)
    }

    /// Create a GHZ state circuit.
    pub fn ghz(n: u32) -> IrResult<Self> {
        let mut circuit = Self::with_name("ghz", n);
        if n == 0 {
            return Ok(circuit);
        }

        circuit.h(QubitId(0))?;
        for i in 0..n - 1 {
            circuit.cx(QubitId(i), QubitId(i + 1))?;
        }

        Ok(circuit)
    }
}

impl From<CircuitDag> for Circuit {
    fn from(dag: CircuitDag) -> Self {
        Self {
            name: "circuit".into(),
            dag,
            depth: OnceLock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;
    use std::f64::consts::PI;

    fn q(i: u32) -> QubitId {
        QubitId(i)
    }

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::with_name("test", 3);
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 3);
        assert_eq!(circuit.num_ops(), 0);
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_bell_state() {
        let circuit = Circuit::bell().unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_ops(), 2);
        assert_eq!(circuit.depth(), 2);
    }

    #[test]
    fn test_ghz_state() {
        let circuit = Circuit::ghz(5).unwrap();
        assert_eq!(circuit.num_qubits(), 5);
        assert_eq!(circuit.num_ops(), 5);
        assert_eq!(circuit.depth(), 5);
        assert_eq!(Circuit::ghz(0).unwrap().num_ops(), 0);
    }

    #[test]
    fn test_depth_cache_invalidated_on_insert() {
        let mut circuit = Circuit::new(3);
        circuit.h(q(1)).unwrap().x(q(1)).unwrap();
        assert_eq!(circuit.depth(), 2);

        circuit.x(q(0)).unwrap();
        assert_eq!(circuit.depth(), 2);

        circuit.cx(q(0), q(1)).unwrap();
        assert_eq!(circuit.depth(), 3);
    }

    #[test]
    fn test_depth_cache_invalidated_on_compose() {
        let mut a = Circuit::new(1);
        a.h(q(0)).unwrap();
        assert_eq!(a.depth(), 1);

        let mut b = Circuit::new(1);
        b.t(q(0)).unwrap().s(q(0)).unwrap();
        a.compose(&b).unwrap();
        assert_eq!(a.depth(), 3);
    }

    #[test]
    fn test_lane_order() {
        let mut circuit = Circuit::new(2);
        circuit
            .h(q(0))
            .unwrap()
            .cx(q(0), q(1))
            .unwrap()
            .rz(PI, q(1))
            .unwrap();

        let lane0: Vec<_> = circuit.lane(q(0)).unwrap().iter().map(|g| g.name()).collect();
        let lane1: Vec<_> = circuit.lane(q(1)).unwrap().iter().map(|g| g.name()).collect();
        assert_eq!(lane0, vec!["H", "Cx"]);
        assert_eq!(lane1, vec!["Cx", "Rz"]);
    }

    #[test]
    fn test_failed_insert_leaves_circuit_unchanged() {
        let mut circuit = Circuit::new(2);
        circuit.h(q(0)).unwrap();
        assert_eq!(circuit.depth(), 1);

        let err = circuit.cx(q(1), q(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitIndexOutOfRange { .. }));
        assert_eq!(circuit.num_ops(), 1);
        assert_eq!(circuit.depth(), 1);
        assert!(circuit.lane(q(1)).unwrap().is_empty());
    }

    #[test]
    fn test_controlled_builder() {
        let mut circuit = Circuit::new(3);
        circuit.control(Gate::x(q(2)), [q(0), q(1)]).unwrap();
        let gate = circuit.gates().next().unwrap();
        assert_eq!(gate.arity(), 3);
        assert_eq!(gate.controls(), &[q(0), q(1)]);
    }

    #[test]
    fn test_dagger() {
        let mut circuit = Circuit::with_name("c", 2);
        circuit
            .h(q(0))
            .unwrap()
            .s(q(1))
            .unwrap()
            .rx(0.3, q(0))
            .unwrap();

        let inverse = circuit.dagger();
        assert_eq!(inverse.name(), "c_dg");
        let names: Vec<_> = inverse.gates().map(Gate::name).collect();
        assert_eq!(names, vec!["Rx", "Sd", "H"]);
        assert_eq!(inverse.gates().next().unwrap().param("theta"), Some(-0.3));
    }

    #[test]
    fn test_compose_mismatch_leaves_circuit_unchanged() {
        let mut a = Circuit::new(2);
        a.h(q(0)).unwrap();
        let b = Circuit::new(3);
        assert_eq!(
            a.compose(&b).unwrap_err(),
            IrError::QubitCountMismatch {
                expected: 2,
                got: 3
            }
        );
        assert_eq!(a.num_ops(), 1);
    }
}
