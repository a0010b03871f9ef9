//! DAG-based circuit representation.

use petgraph::Direction;
use petgraph::stable_graph::{EdgeIndex, NodeIndex as PetNodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, NodeIndexable};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;

/// Node index type for the circuit DAG.
pub type NodeIndex = PetNodeIndex<u32>;

/// A node in the circuit DAG.
#[derive(Debug, Clone, PartialEq)]
pub enum DagNode {
    /// Input boundary marker of a lane.
    Input(QubitId),
    /// Output boundary marker of a lane.
    Output(QubitId),
    /// Gate application.
    Gate(Gate),
}

impl DagNode {
    /// Check if this is an input marker.
    #[inline]
    pub fn is_input(&self) -> bool {
        matches!(self, DagNode::Input(_))
    }

    /// Check if this is an output marker.
    #[inline]
    pub fn is_output(&self) -> bool {
        matches!(self, DagNode::Output(_))
    }

    /// Check if this is a gate node.
    #[inline]
    pub fn is_gate(&self) -> bool {
        matches!(self, DagNode::Gate(_))
    }

    /// Get the gate if this is a gate node.
    #[inline]
    pub fn gate(&self) -> Option<&Gate> {
        match self {
            DagNode::Gate(gate) => Some(gate),
            _ => None,
        }
    }
}

/// An edge in the circuit DAG: "next operation on this lane".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DagEdge {
    /// The lane this edge belongs to.
    pub lane: QubitId,
}

/// Per-lane adjacency index.
#[derive(Debug, Clone, Copy)]
struct Lane {
    input: NodeIndex,
    output: NodeIndex,
    /// Last node before the output marker.
    front: NodeIndex,
    /// Edge from `front` into the output marker.
    tail: EdgeIndex<u32>,
}

/// DAG-based circuit representation.
///
/// The circuit is an arena of nodes addressed by [`NodeIndex`] handles:
/// - each lane has one input and one output marker, created up front
/// - gate nodes are spliced in front of the output marker of every lane
///   they touch
/// - edges labelled with lane `q` form a single path from `q`'s input to
///   its output marker
///
/// ## Performance
///
/// Every lane records its front node and the edge into its output marker,
/// so splicing a gate is O(1) per touched lane with no edge scanning.
#[derive(Debug, Clone)]
pub struct CircuitDag {
    graph: StableDiGraph<DagNode, DagEdge, u32>,
    lanes: Vec<Lane>,
    /// Gate nodes in insertion order, which is a topological order.
    ops: Vec<NodeIndex>,
}

impl CircuitDag {
    /// Create a DAG with `num_qubits` empty lanes.
    pub fn new(num_qubits: u32) -> Self {
        let mut graph = StableDiGraph::default();
        let lanes = (0..num_qubits)
            .map(|q| {
                let lane = QubitId(q);
                let input = graph.add_node(DagNode::Input(lane));
                let output = graph.add_node(DagNode::Output(lane));
                let tail = graph.add_edge(input, output, DagEdge { lane });
                Lane {
                    input,
                    output,
                    front: input,
                    tail,
                }
            })
            .collect();

        Self {
            graph,
            lanes,
            ops: vec![],
        }
    }

    /// Get the number of qubits.
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub fn num_qubits(&self) -> u32 {
        // Lanes are created from a u32 count.
        self.lanes.len() as u32
    }

    /// Get the number of gate nodes.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Append a gate at the end of every lane it touches.
    ///
    /// All qubits are validated before the graph is touched, so on error
    /// the DAG is unchanged.
    pub fn apply(&mut self, gate: Gate) -> IrResult<NodeIndex> {
        self.check_gate(&gate)?;
        Ok(self.splice(gate))
    }

    fn check_gate(&self, gate: &Gate) -> IrResult<()> {
        let num_qubits = self.num_qubits();
        let mut seen = FxHashSet::default();
        for &qubit in gate.qubits() {
            if qubit.0 >= num_qubits {
                return Err(IrError::QubitIndexOutOfRange {
                    qubit,
                    num_qubits,
                    gate_name: Some(gate.name().to_string()),
                });
            }
            if !seen.insert(qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }
        Ok(())
    }

    /// Rewire every touched lane through a new gate node.
    ///
    /// Callers must have validated the gate against this DAG's width.
    fn splice(&mut self, gate: Gate) -> NodeIndex {
        let lanes: Vec<QubitId> = gate.qubits().to_vec();
        let op = self.graph.add_node(DagNode::Gate(gate));

        for lane in lanes {
            let state = &mut self.lanes[lane.index()];
            self.graph.remove_edge(state.tail);
            self.graph.add_edge(state.front, op, DagEdge { lane });
            state.tail = self.graph.add_edge(op, state.output, DagEdge { lane });
            state.front = op;
        }

        self.ops.push(op);
        op
    }

    /// Append `other`'s gates after this DAG's gates, lane by lane.
    pub fn compose(&mut self, other: &CircuitDag) -> IrResult<()> {
        if self.num_qubits() != other.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                expected: self.num_qubits(),
                got: other.num_qubits(),
            });
        }
        for (_, gate) in other.ops() {
            self.splice(gate.clone());
        }
        Ok(())
    }

    /// Build the inverse DAG: adjoint gates in reverse order.
    pub fn dagger(&self) -> CircuitDag {
        let mut inverse = CircuitDag::new(self.num_qubits());
        for &node in self.ops.iter().rev() {
            if let Some(gate) = self.gate(node) {
                inverse.splice(gate.adjoint());
            }
        }
        inverse
    }

    /// Get a gate by node index.
    #[inline]
    pub fn gate(&self, node: NodeIndex) -> Option<&Gate> {
        self.graph.node_weight(node).and_then(DagNode::gate)
    }

    /// Iterate over gate nodes in insertion order (a topological order).
    pub fn ops(&self) -> impl Iterator<Item = (NodeIndex, &Gate)> + '_ {
        self.ops
            .iter()
            .filter_map(|&node| self.gate(node).map(|gate| (node, gate)))
    }

    /// Get the input marker of a lane.
    #[inline]
    pub fn input_node(&self, qubit: QubitId) -> Option<NodeIndex> {
        self.lanes.get(qubit.index()).map(|l| l.input)
    }

    /// Get the output marker of a lane.
    #[inline]
    pub fn output_node(&self, qubit: QubitId) -> Option<NodeIndex> {
        self.lanes.get(qubit.index()).map(|l| l.output)
    }

    /// Gate nodes on a lane, from input to output marker.
    pub fn lane(&self, qubit: QubitId) -> IrResult<Vec<NodeIndex>> {
        let lane = self
            .lanes
            .get(qubit.index())
            .ok_or(IrError::QubitIndexOutOfRange {
                qubit,
                num_qubits: self.num_qubits(),
                gate_name: None,
            })?;

        let mut nodes = vec![];
        let mut current = lane.input;
        let max_steps = self.graph.node_count();

        while current != lane.output {
            let next = self
                .graph
                .edges_directed(current, Direction::Outgoing)
                .find(|e| e.weight().lane == qubit)
                .map(|e| e.target())
                .ok_or_else(|| {
                    IrError::InvalidDag(format!(
                        "Lane {qubit} is broken: no outgoing edge from node {current:?}"
                    ))
                })?;

            if next != lane.output {
                nodes.push(next);
            }
            if nodes.len() > max_steps {
                return Err(IrError::InvalidDag(format!(
                    "Lane {qubit} has too many steps (possible cycle)"
                )));
            }
            current = next;
        }

        Ok(nodes)
    }

    /// Layer of every gate node, indexed by node index. Input markers sit
    /// on layer 0; a gate sits one above its highest predecessor.
    fn node_layers(&self) -> Vec<usize> {
        let mut layers = vec![0usize; self.graph.node_bound()];
        for &op in &self.ops {
            let max_pred = self
                .graph
                .edges_directed(op, Direction::Incoming)
                .map(|e| layers[e.source().index()])
                .max()
                .unwrap_or(0);
            layers[op.index()] = max_pred + 1;
        }
        layers
    }

    /// Calculate the circuit depth: the highest layer reaching an output marker.
    pub fn depth(&self) -> usize {
        let layers = self.node_layers();
        self.lanes
            .iter()
            .map(|lane| layers[lane.front.index()])
            .max()
            .unwrap_or(0)
    }

    /// Gate nodes grouped by layer, each layer in insertion order.
    pub fn layers(&self) -> Vec<Vec<NodeIndex>> {
        let layers = self.node_layers();
        let mut grouped: Vec<Vec<NodeIndex>> = vec![];
        for &op in &self.ops {
            let layer = layers[op.index()] - 1;
            if grouped.len() <= layer {
                grouped.resize_with(layer + 1, Vec::new);
            }
            grouped[layer].push(op);
        }
        grouped
    }

    /// Get a reference to the underlying graph.
    pub fn graph(&self) -> &StableDiGraph<DagNode, DagEdge, u32> {
        &self.graph
    }

    /// Verify the structural integrity of the DAG.
    ///
    /// Checks that:
    /// - The graph is acyclic
    /// - Each lane is a single path from its input to its output marker
    /// - Each lane visits exactly the gates touching it, in insertion order
    /// - A gate touching `k` qubits has `k` incoming and `k` outgoing edges
    pub fn verify_integrity(&self) -> IrResult<()> {
        if petgraph::algo::is_cyclic_directed(&self.graph) {
            return Err(IrError::InvalidDag("Graph contains a cycle".into()));
        }

        for q in 0..self.num_qubits() {
            let qubit = QubitId(q);
            let walked = self.lane(qubit)?;
            let expected: Vec<NodeIndex> = self
                .ops()
                .filter(|(_, gate)| gate.qubits().contains(&qubit))
                .map(|(node, _)| node)
                .collect();
            if walked != expected {
                return Err(IrError::InvalidDag(format!(
                    "Lane {qubit} does not match the gates that touch it"
                )));
            }

            let lane = self.lanes[qubit.index()];
            let front = walked.last().copied().unwrap_or(lane.input);
            if lane.front != front {
                return Err(IrError::InvalidDag(format!(
                    "Lane {qubit} front index is stale"
                )));
            }
        }

        for (node, gate) in self.ops() {
            let arity = gate.arity();
            let incoming = self.graph.edges_directed(node, Direction::Incoming).count();
            let outgoing = self.graph.edges_directed(node, Direction::Outgoing).count();
            if incoming != arity || outgoing != arity {
                return Err(IrError::InvalidDag(format!(
                    "Gate node {node:?} touches {arity} qubits but has {incoming} in / {outgoing} out edges"
                )));
            }
        }

        Ok(())
    }
}
