//! Property-based tests for circuit graph construction.
//!
//! Random gate sequences are inserted into circuits and the per-lane
//! structure, atomicity of failed inserts, adjoint algebra and composition
//! are checked against straightforward models.

use proptest::prelude::*;
use qlane_ir::{Circuit, DagEdge, DagNode, Gate, QubitId};

/// Gate operations that can be applied to a circuit.
#[derive(Debug, Clone)]
enum GateOp {
    H(u32),
    X(u32),
    S(u32),
    T(u32),
    Rx(f64, u32),
    Rz(f64, u32),
    Swap(u32, u32),
    ISwap(u32, u32),
    Cx(u32, u32),
    Cz(u32, u32),
    ControlledS(u32, u32),
}

impl GateOp {
    fn gate(&self) -> Gate {
        let q = QubitId;
        match *self {
            GateOp::H(a) => Gate::h(q(a)),
            GateOp::X(a) => Gate::x(q(a)),
            GateOp::S(a) => Gate::s(q(a)),
            GateOp::T(a) => Gate::t(q(a)),
            GateOp::Rx(theta, a) => Gate::rx(theta, q(a)).unwrap(),
            GateOp::Rz(theta, a) => Gate::rz(theta, q(a)).unwrap(),
            GateOp::Swap(a, b) => Gate::swap(q(a), q(b)).unwrap(),
            GateOp::ISwap(a, b) => Gate::iswap(q(a), q(b)).unwrap(),
            GateOp::Cx(a, b) => Gate::cx(q(a), q(b)).unwrap(),
            GateOp::Cz(a, b) => Gate::cz(q(a), q(b)).unwrap(),
            GateOp::ControlledS(c, t) => Gate::s(q(t)).control([q(c)]).unwrap(),
        }
    }
}

/// Two distinct qubit indices below `num_qubits` (which must be at least 2).
fn arb_pair(num_qubits: u32) -> impl Strategy<Value = (u32, u32)> {
    (0..num_qubits, 1..num_qubits).prop_map(move |(a, off)| (a, (a + off) % num_qubits))
}

/// Generate a random gate operation for a circuit with given number of qubits.
fn arb_gate_op(num_qubits: u32) -> BoxedStrategy<GateOp> {
    let angle = -10.0_f64..10.0;
    let single = prop_oneof![
        (0..num_qubits).prop_map(GateOp::H),
        (0..num_qubits).prop_map(GateOp::X),
        (0..num_qubits).prop_map(GateOp::S),
        (0..num_qubits).prop_map(GateOp::T),
        (angle.clone(), 0..num_qubits).prop_map(|(t, a)| GateOp::Rx(t, a)),
        (angle, 0..num_qubits).prop_map(|(t, a)| GateOp::Rz(t, a)),
    ];

    // For single-qubit circuits, only generate single-qubit gates
    if num_qubits < 2 {
        return single.boxed();
    }

    prop_oneof![
        3 => single,
        1 => arb_pair(num_qubits).prop_map(|(a, b)| GateOp::Swap(a, b)),
        1 => arb_pair(num_qubits).prop_map(|(a, b)| GateOp::ISwap(a, b)),
        2 => arb_pair(num_qubits).prop_map(|(a, b)| GateOp::Cx(a, b)),
        1 => arb_pair(num_qubits).prop_map(|(a, b)| GateOp::Cz(a, b)),
        1 => arb_pair(num_qubits).prop_map(|(a, b)| GateOp::ControlledS(a, b)),
    ]
    .boxed()
}

/// Qubit count and a gate sequence for it.
fn arb_ops() -> impl Strategy<Value = (u32, Vec<GateOp>)> {
    (1_u32..=5).prop_flat_map(|num_qubits| {
        (
            Just(num_qubits),
            prop::collection::vec(arb_gate_op(num_qubits), 0..=20),
        )
    })
}

/// Three gate sequences over the same qubit count.
fn arb_three() -> impl Strategy<Value = (u32, Vec<GateOp>, Vec<GateOp>, Vec<GateOp>)> {
    (1_u32..=4).prop_flat_map(|num_qubits| {
        let ops = || prop::collection::vec(arb_gate_op(num_qubits), 0..=8);
        (Just(num_qubits), ops(), ops(), ops())
    })
}

fn build(num_qubits: u32, ops: &[GateOp]) -> Circuit {
    let mut circuit = Circuit::new(num_qubits);
    for op in ops {
        circuit.insert(op.gate()).unwrap();
    }
    circuit
}

fn lanes(circuit: &Circuit) -> Vec<Vec<Gate>> {
    (0..circuit.num_qubits())
        .map(|q| circuit.lane(QubitId(q)).unwrap().into_iter().cloned().collect())
        .collect()
}

type GraphSnapshot = (Vec<DagNode>, Vec<(usize, usize, DagEdge)>);

fn snapshot(circuit: &Circuit) -> GraphSnapshot {
    let graph = circuit.dag().graph();
    let nodes = graph.node_indices().map(|n| graph[n].clone()).collect();
    let edges = graph
        .edge_indices()
        .filter_map(|e| {
            let (src, dst) = graph.edge_endpoints(e)?;
            Some((src.index(), dst.index(), graph[e]))
        })
        .collect();
    (nodes, edges)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Each lane holds exactly the inserted gates that touch it, in order.
    #[test]
    fn lanes_match_insertion_subsequences((num_qubits, ops) in arb_ops()) {
        let circuit = build(num_qubits, &ops);
        circuit.dag().verify_integrity().unwrap();

        for q in 0..num_qubits {
            let qubit = QubitId(q);
            let expected: Vec<Gate> = ops
                .iter()
                .map(GateOp::gate)
                .filter(|g| g.qubits().contains(&qubit))
                .collect();
            let actual: Vec<Gate> = circuit.lane(qubit).unwrap().into_iter().cloned().collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// An insert touching an out-of-range lane leaves the graph untouched.
    #[test]
    fn out_of_range_insert_is_atomic(
        (num_qubits, ops) in arb_ops(),
        overshoot in 0_u32..4,
        valid in 0_u32..5,
    ) {
        let mut circuit = build(num_qubits, &ops);
        let before = snapshot(&circuit);
        let depth = circuit.depth();

        let bad = QubitId(num_qubits + overshoot);
        let good = QubitId(valid % num_qubits);
        let gate = Gate::cx(good, bad).unwrap();

        prop_assert!(circuit.insert(gate).is_err());
        prop_assert_eq!(snapshot(&circuit), before);
        prop_assert_eq!(circuit.depth(), depth);
        circuit.dag().verify_integrity().unwrap();
    }

    /// Adjoint is an involution on every generated gate.
    #[test]
    fn adjoint_is_involution((_, ops) in arb_ops()) {
        for op in &ops {
            let gate = op.gate();
            prop_assert_eq!(gate.adjoint().adjoint(), gate);
        }
    }

    /// Composition is associative on per-lane gate sequences.
    #[test]
    fn compose_is_associative((num_qubits, a, b, c) in arb_three()) {
        let (a, b, c) = (build(num_qubits, &a), build(num_qubits, &b), build(num_qubits, &c));

        let mut left = a.clone();
        left.compose(&b).unwrap().compose(&c).unwrap();

        let mut bc = b.clone();
        bc.compose(&c).unwrap();
        let mut right = a.clone();
        right.compose(&bc).unwrap();

        left.dag().verify_integrity().unwrap();
        right.dag().verify_integrity().unwrap();
        prop_assert_eq!(lanes(&left), lanes(&right));
    }

    /// Composing a circuit with its dagger pairs each gate with its adjoint
    /// around the middle of every lane.
    #[test]
    fn dagger_mirrors_every_lane((num_qubits, ops) in arb_ops()) {
        let circuit = build(num_qubits, &ops);
        let mut round_trip = circuit.clone();
        round_trip.compose(&circuit.dagger()).unwrap();
        round_trip.dag().verify_integrity().unwrap();

        for lane in lanes(&round_trip) {
            let len = lane.len();
            prop_assert_eq!(len % 2, 0);
            for i in 0..len / 2 {
                prop_assert_eq!(&lane[len - 1 - i], &lane[i].adjoint());
            }
        }
    }

    /// Depth never exceeds the gate count and never drops on insertion.
    #[test]
    fn depth_is_monotone((num_qubits, ops) in arb_ops()) {
        let mut circuit = Circuit::new(num_qubits);
        let mut last = 0;
        for op in &ops {
            circuit.insert(op.gate()).unwrap();
            let depth = circuit.depth();
            prop_assert!(depth >= last);
            prop_assert!(depth <= last + 1);
            last = depth;
        }
        prop_assert!(last <= ops.len());
        prop_assert_eq!(circuit.layers().len(), last);
    }
}
