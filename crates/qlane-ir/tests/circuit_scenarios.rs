//! End-to-end scenarios for gate instantiation and circuit construction.

use qlane_ir::{
    AdjointRule, Circuit, CustomGate, Gate, GateCatalog, GateFlags, IrError, QubitId,
    StandardGate,
};

#[test]
fn controlled_x_occupies_both_lanes() {
    let mut circuit = Circuit::new(2);
    let cnot = Gate::x(QubitId(1)).control([QubitId(0)]).unwrap();
    let node = circuit.insert(cnot.clone()).unwrap();

    for q in 0..2 {
        let lane = circuit.dag().lane(QubitId(q)).unwrap();
        assert_eq!(lane, vec![node]);
        assert_eq!(circuit.lane(QubitId(q)).unwrap(), vec![&cnot]);
    }
}

#[test]
fn independent_lane_does_not_raise_depth() {
    let mut circuit = Circuit::new(3);
    circuit.h(QubitId(1)).unwrap().x(QubitId(1)).unwrap();
    assert_eq!(circuit.depth(), 2);

    circuit.x(QubitId(0)).unwrap();
    assert_eq!(circuit.depth(), 2);
}

#[test]
fn layers_group_parallel_gates() {
    let mut circuit = Circuit::new(3);
    circuit
        .h(QubitId(0))
        .unwrap()
        .h(QubitId(1))
        .unwrap()
        .cx(QubitId(0), QubitId(1))
        .unwrap()
        .x(QubitId(2))
        .unwrap();

    let names: Vec<Vec<&str>> = circuit
        .layers()
        .iter()
        .map(|layer| {
            layer
                .iter()
                .map(|&n| circuit.dag().gate(n).unwrap().name())
                .collect()
        })
        .collect();
    assert_eq!(names, vec![vec!["H", "H", "X"], vec!["Cx"]]);
}

#[test]
fn catalog_describes_every_standard_kind() {
    let catalog = GateCatalog::new();
    for &gate in StandardGate::all() {
        let desc = catalog.describe(gate.name()).unwrap();
        assert_eq!(desc.arity, gate.num_qubits());
        if desc.flags.pauli {
            assert!(desc.flags.clifford);
            assert!(desc.flags.hermitian);
        }
        if desc.flags.hermitian {
            assert_eq!(desc.adjoint, AdjointRule::SelfAdjoint);
        }
    }
    assert_eq!(catalog.kind_names().len(), StandardGate::all().len());
}

#[test]
fn pauli_and_clifford_sets() {
    let pauli: Vec<_> = StandardGate::all()
        .iter()
        .filter(|g| g.spec().flags.pauli)
        .map(|g| g.name())
        .collect();
    assert_eq!(pauli, ["I", "X", "Y", "Z"]);

    for name in ["I", "X", "Y", "Z", "H", "S", "Cx"] {
        assert!(StandardGate::from_name(name).unwrap().spec().flags.clifford);
    }
    for name in ["T", "Td", "Rx", "Ry", "Rz"] {
        assert!(!StandardGate::from_name(name).unwrap().spec().flags.clifford);
    }
}

#[test]
fn custom_kind_flows_through_circuit() {
    let mut catalog = GateCatalog::new();
    catalog
        .register(
            CustomGate::new("Fsim", 2)
                .with_params(["theta", "phi"])
                .with_flags(GateFlags::NONE),
        )
        .unwrap();

    let gate = catalog
        .instantiate(
            "Fsim",
            [QubitId(2), QubitId(0)],
            &[("theta", 0.1), ("phi", 0.2)],
        )
        .unwrap();
    assert_eq!(gate.param("phi"), Some(0.2));

    let mut circuit = Circuit::new(3);
    circuit.insert(gate.clone()).unwrap();
    let inverse = circuit.dagger();
    let inverted = inverse.gates().next().unwrap();
    assert_eq!(inverted.adjoint(), gate);
    assert_eq!(inverted.qubits(), &[QubitId(2), QubitId(0)]);
}

#[test]
fn instantiation_does_not_check_range_but_insertion_does() {
    let gate = Gate::h(QubitId(7));
    let mut circuit = Circuit::new(2);
    assert_eq!(
        circuit.insert(gate),
        Err(IrError::QubitIndexOutOfRange {
            qubit: QubitId(7),
            num_qubits: 2,
            gate_name: Some("H".into()),
        })
    );
}

#[test]
fn controlled_gate_range_covers_controls() {
    let gate = Gate::x(QubitId(0)).control([QubitId(5)]).unwrap();
    let mut circuit = Circuit::new(2);
    assert!(matches!(
        circuit.insert(gate),
        Err(IrError::QubitIndexOutOfRange { qubit, .. }) if qubit == QubitId(5)
    ));
    assert_eq!(circuit.num_ops(), 0);
}
