//! Gate taxonomy and gate instances.
//!
//! Every gate kind is either a [`StandardGate`] from the closed catalog,
//! whose metadata lives in a static side-table ([`StandardGate::spec`]), or a
//! [`CustomKind`] registered through [`GateCatalog`](crate::GateCatalog).
//! A [`Gate`] binds a kind to qubits and parameter values and is immutable
//! once built.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use num_complex::Complex64;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Algebraic classification of a gate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GateFlags {
    /// The gate equals its own adjoint.
    pub hermitian: bool,
    /// Member of the Pauli group {I, X, Y, Z}.
    pub pauli: bool,
    /// Member of the Clifford group.
    pub clifford: bool,
}

impl GateFlags {
    /// No classification.
    pub const NONE: Self = Self::new(false, false, false);

    const PAULI: Self = Self::new(true, true, true);
    const HERMITIAN_CLIFFORD: Self = Self::new(true, false, true);
    const CLIFFORD: Self = Self::new(false, false, true);

    /// Create a flag set.
    pub const fn new(hermitian: bool, pauli: bool, clifford: bool) -> Self {
        Self {
            hermitian,
            pauli,
            clifford,
        }
    }
}

/// How the adjoint of a gate kind is formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdjointRule {
    /// The kind is its own adjoint.
    SelfAdjoint,
    /// The adjoint is the paired kind on the same qubits.
    Paired(StandardGate),
    /// The adjoint is the same kind with every parameter negated.
    NegateParameters,
    /// The adjoint toggles the instance's inversion flag (custom kinds).
    Inverted,
}

/// Static metadata for a standard gate kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateSpec {
    /// Catalog name.
    pub name: &'static str,
    /// Number of qubits the kind acts on.
    pub arity: usize,
    /// Ordered parameter names.
    pub params: &'static [&'static str],
    /// Classification flags.
    pub flags: GateFlags,
    /// Adjoint rule.
    pub adjoint: AdjointRule,
}

const NO_PARAMS: &[&str] = &[];
const THETA: &[&str] = &["theta"];

const fn spec(
    name: &'static str,
    arity: usize,
    params: &'static [&'static str],
    flags: GateFlags,
    adjoint: AdjointRule,
) -> GateSpec {
    GateSpec {
        name,
        arity,
        params,
        flags,
        adjoint,
    }
}

/// The closed catalog of built-in gate kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StandardGate {
    // Pauli gates
    /// Identity gate.
    I,
    /// Pauli-X gate.
    X,
    /// Pauli-Y gate.
    Y,
    /// Pauli-Z gate.
    Z,

    // Single-qubit Clifford and phase gates
    /// Hadamard gate.
    H,
    /// S gate (sqrt(Z)).
    S,
    /// S-dagger gate.
    Sd,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Td,

    // Axial rotations, parameter `theta`
    /// Rotation around X axis.
    Rx,
    /// Rotation around Y axis.
    Ry,
    /// Rotation around Z axis, phase `e^{iθ}` on |1⟩.
    Rz,

    // Two-qubit gates
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// iSWAP-dagger gate.
    ISwapd,
    /// Controlled-X (CNOT), control first.
    Cx,
    /// Controlled-Y, control first.
    Cy,
    /// Controlled-Z, control first.
    Cz,
}

impl StandardGate {
    /// Every kind in the catalog, in catalog order.
    pub const ALL: [StandardGate; 18] = [
        StandardGate::I,
        StandardGate::X,
        StandardGate::Y,
        StandardGate::Z,
        StandardGate::H,
        StandardGate::S,
        StandardGate::Sd,
        StandardGate::T,
        StandardGate::Td,
        StandardGate::Rx,
        StandardGate::Ry,
        StandardGate::Rz,
        StandardGate::Swap,
        StandardGate::ISwap,
        StandardGate::ISwapd,
        StandardGate::Cx,
        StandardGate::Cy,
        StandardGate::Cz,
    ];

    /// Enumerate the closed catalog.
    pub fn all() -> &'static [StandardGate] {
        &Self::ALL
    }

    /// Static metadata for this kind.
    pub const fn spec(self) -> GateSpec {
        use AdjointRule::{NegateParameters, Paired, SelfAdjoint};
        match self {
            StandardGate::I => spec("I", 1, NO_PARAMS, GateFlags::PAULI, SelfAdjoint),
            StandardGate::X => spec("X", 1, NO_PARAMS, GateFlags::PAULI, SelfAdjoint),
            StandardGate::Y => spec("Y", 1, NO_PARAMS, GateFlags::PAULI, SelfAdjoint),
            StandardGate::Z => spec("Z", 1, NO_PARAMS, GateFlags::PAULI, SelfAdjoint),
            StandardGate::H => spec("H", 1, NO_PARAMS, GateFlags::HERMITIAN_CLIFFORD, SelfAdjoint),
            StandardGate::S => spec("S", 1, NO_PARAMS, GateFlags::CLIFFORD, Paired(StandardGate::Sd)),
            StandardGate::Sd => spec("Sd", 1, NO_PARAMS, GateFlags::CLIFFORD, Paired(StandardGate::S)),
            StandardGate::T => spec("T", 1, NO_PARAMS, GateFlags::NONE, Paired(StandardGate::Td)),
            StandardGate::Td => spec("Td", 1, NO_PARAMS, GateFlags::NONE, Paired(StandardGate::T)),
            StandardGate::Rx => spec("Rx", 1, THETA, GateFlags::NONE, NegateParameters),
            StandardGate::Ry => spec("Ry", 1, THETA, GateFlags::NONE, NegateParameters),
            StandardGate::Rz => spec("Rz", 1, THETA, GateFlags::NONE, NegateParameters),
            StandardGate::Swap => {
                spec("Swap", 2, NO_PARAMS, GateFlags::HERMITIAN_CLIFFORD, SelfAdjoint)
            }
            StandardGate::ISwap => spec(
                "iSwap",
                2,
                NO_PARAMS,
                GateFlags::CLIFFORD,
                Paired(StandardGate::ISwapd),
            ),
            StandardGate::ISwapd => spec(
                "iSwapd",
                2,
                NO_PARAMS,
                GateFlags::CLIFFORD,
                Paired(StandardGate::ISwap),
            ),
            StandardGate::Cx => spec("Cx", 2, NO_PARAMS, GateFlags::HERMITIAN_CLIFFORD, SelfAdjoint),
            StandardGate::Cy => spec("Cy", 2, NO_PARAMS, GateFlags::HERMITIAN_CLIFFORD, SelfAdjoint),
            StandardGate::Cz => spec("Cz", 2, NO_PARAMS, GateFlags::HERMITIAN_CLIFFORD, SelfAdjoint),
        }
    }

    /// Get the catalog name of this gate.
    #[inline]
    pub fn name(self) -> &'static str {
        self.spec().name
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(self) -> usize {
        self.spec().arity
    }

    /// Look a kind up by its catalog name.
    pub fn from_name(name: &str) -> IrResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|g| g.name() == name)
            .ok_or_else(|| IrError::UnknownGateKind(name.to_string()))
    }

    /// Describe this kind.
    pub fn describe(self) -> GateDescriptor<'static> {
        let spec = self.spec();
        GateDescriptor {
            name: spec.name,
            arity: spec.arity,
            params: spec.params.to_vec(),
            flags: spec.flags,
            adjoint: spec.adjoint,
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Description of a gate kind: arity, parameter schema, classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateDescriptor<'a> {
    /// Catalog name.
    pub name: &'a str,
    /// Number of qubits.
    pub arity: usize,
    /// Ordered parameter names.
    pub params: Vec<&'a str>,
    /// Classification flags.
    pub flags: GateFlags,
    /// Adjoint rule.
    pub adjoint: AdjointRule,
}

/// A user-defined gate kind, registered in a catalog before use.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomGate {
    name: String,
    arity: usize,
    params: Vec<String>,
    flags: GateFlags,
    /// Optional unitary matrix (row-major, 2^n × 2^n).
    matrix: Option<Vec<Complex64>>,
}

impl CustomGate {
    /// Create a new custom gate definition.
    pub fn new(name: impl Into<String>, arity: usize) -> Self {
        Self {
            name: name.into(),
            arity,
            params: vec![],
            flags: GateFlags::NONE,
            matrix: None,
        }
    }

    /// Set the parameter schema.
    #[must_use]
    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// Set the classification flags.
    #[must_use]
    pub fn with_flags(mut self, flags: GateFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Attach a unitary matrix.
    ///
    /// Registration checks its size, that it is unitary, and that it is
    /// Hermitian when the kind is flagged so. Without a matrix the
    /// Hermitian flag is taken as given.
    #[must_use]
    pub fn with_matrix(mut self, matrix: Vec<Complex64>) -> Self {
        self.matrix = Some(matrix);
        self
    }

    /// Name of the kind.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits.
    pub fn arity(&self) -> usize {
        self.arity
    }

    /// Parameter names in schema order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// Classification flags.
    pub fn flags(&self) -> GateFlags {
        self.flags
    }

    /// The attached matrix, if any.
    pub fn matrix(&self) -> Option<&[Complex64]> {
        self.matrix.as_deref()
    }

    /// Hermitian kinds are self-adjoint, everything else is inverted in place.
    pub fn adjoint_rule(&self) -> AdjointRule {
        if self.flags.hermitian {
            AdjointRule::SelfAdjoint
        } else {
            AdjointRule::Inverted
        }
    }

    pub(crate) fn validate(&self) -> IrResult<()> {
        let invalid = |reason: String| IrError::InvalidCustomGate {
            name: self.name.clone(),
            reason,
        };

        if self.name.is_empty() {
            return Err(invalid("name must not be empty".into()));
        }
        if self.arity == 0 {
            return Err(invalid("arity must be at least 1".into()));
        }
        if self.flags.pauli && self.arity != 1 {
            return Err(invalid("only single-qubit kinds can be Pauli".into()));
        }

        let mut seen = FxHashSet::default();
        for param in &self.params {
            if !seen.insert(param.as_str()) {
                return Err(invalid(format!("parameter '{param}' declared twice")));
            }
        }

        if let Some(matrix) = &self.matrix {
            let dim = 1usize
                .checked_shl(u32::try_from(self.arity).unwrap_or(u32::MAX))
                .filter(|d| *d <= 1 << 15)
                .ok_or_else(|| invalid(format!("arity {} too large for a matrix", self.arity)))?;
            if matrix.len() != dim * dim {
                return Err(invalid(format!(
                    "matrix length {} does not match expected {} for {}-qubit gate",
                    matrix.len(),
                    dim * dim,
                    self.arity
                )));
            }
            if !is_unitary(matrix, dim) {
                return Err(invalid("matrix is not unitary".into()));
            }
            if self.flags.hermitian && !is_hermitian(matrix, dim) {
                return Err(invalid("flagged Hermitian but the matrix is not".into()));
            }
        }

        Ok(())
    }
}

/// Tolerance for the unitary and Hermitian checks on custom matrices.
const MATRIX_TOLERANCE: f64 = 1e-6;

/// `M·M† = I` for a row-major `dim × dim` matrix.
fn is_unitary(m: &[Complex64], dim: usize) -> bool {
    (0..dim).all(|i| {
        (0..dim).all(|j| {
            let dot: Complex64 = (0..dim).map(|k| m[i * dim + k] * m[j * dim + k].conj()).sum();
            let expected = if i == j { 1.0 } else { 0.0 };
            (dot - Complex64::new(expected, 0.0)).norm() <= MATRIX_TOLERANCE
        })
    })
}

/// `M = M†` for a row-major `dim × dim` matrix.
fn is_hermitian(m: &[Complex64], dim: usize) -> bool {
    (0..dim).all(|i| {
        (i..dim).all(|j| (m[i * dim + j] - m[j * dim + i].conj()).norm() <= MATRIX_TOLERANCE)
    })
}

/// Handle to a registered custom gate kind.
///
/// Only [`GateCatalog::register`](crate::GateCatalog::register) hands these
/// out, so every custom kind in a circuit has passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomKind(Arc<CustomGate>);

impl CustomKind {
    pub(crate) fn new(gate: CustomGate) -> Self {
        Self(Arc::new(gate))
    }
}

impl Deref for CustomKind {
    type Target = CustomGate;

    fn deref(&self) -> &CustomGate {
        &self.0
    }
}

/// A gate kind, either standard or registered custom.
#[derive(Debug, Clone, PartialEq)]
pub enum GateKind {
    /// A kind from the closed catalog.
    Standard(StandardGate),
    /// A registered extension.
    Custom(CustomKind),
}

impl GateKind {
    /// Get the name of this kind.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => g.name(),
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.arity(),
        }
    }

    /// Classification flags.
    pub fn flags(&self) -> GateFlags {
        match self {
            GateKind::Standard(g) => g.spec().flags,
            GateKind::Custom(g) => g.flags(),
        }
    }

    /// Adjoint rule.
    pub fn adjoint_rule(&self) -> AdjointRule {
        match self {
            GateKind::Standard(g) => g.spec().adjoint,
            GateKind::Custom(g) => g.adjoint_rule(),
        }
    }

    /// Parameter names in schema order.
    pub fn param_names(&self) -> Vec<&str> {
        match self {
            GateKind::Standard(g) => g.spec().params.to_vec(),
            GateKind::Custom(g) => g.params().iter().map(String::as_str).collect(),
        }
    }

    /// Describe this kind.
    pub fn describe(&self) -> GateDescriptor<'_> {
        GateDescriptor {
            name: self.name(),
            arity: self.num_qubits(),
            params: self.param_names(),
            flags: self.flags(),
            adjoint: self.adjoint_rule(),
        }
    }
}

impl From<StandardGate> for GateKind {
    fn from(gate: StandardGate) -> Self {
        GateKind::Standard(gate)
    }
}

impl From<CustomKind> for GateKind {
    fn from(gate: CustomKind) -> Self {
        GateKind::Custom(gate)
    }
}

/// A kind bound to qubits and parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct BasicGate {
    kind: GateKind,
    qubits: Vec<QubitId>,
    /// Parameter values in schema order.
    params: Vec<f64>,
    inverted: bool,
}

impl BasicGate {
    /// The gate kind.
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// Whether this instance is the inverse of its kind (custom kinds only).
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn adjoint(&self) -> Self {
        match self.kind.adjoint_rule() {
            AdjointRule::SelfAdjoint => self.clone(),
            AdjointRule::Paired(partner) => Self {
                kind: GateKind::Standard(partner),
                ..self.clone()
            },
            AdjointRule::NegateParameters => Self {
                params: self.params.iter().map(|p| -p).collect(),
                ..self.clone()
            },
            AdjointRule::Inverted => Self {
                inverted: !self.inverted,
                ..self.clone()
            },
        }
    }
}

/// A base gate conditioned on control qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlledGate {
    base: Box<Gate>,
    controls: Vec<QubitId>,
    /// Controls followed by the base gate's qubits.
    qubits: Vec<QubitId>,
}

impl ControlledGate {
    /// The wrapped gate.
    pub fn base(&self) -> &Gate {
        &self.base
    }

    /// The control qubits.
    pub fn controls(&self) -> &[QubitId] {
        &self.controls
    }
}

/// An immutable gate instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Gate {
    /// A catalog or custom kind applied to qubits.
    Basic(BasicGate),
    /// A gate conditioned on control qubits.
    Controlled(ControlledGate),
}

impl Gate {
    /// Instantiate a kind on `qubits` with named parameter values.
    ///
    /// Fails with [`IrError::ArityMismatch`] when the qubit count differs
    /// from the kind's arity, [`IrError::ParameterMismatch`] when `params`
    /// does not cover the schema exactly, and [`IrError::DuplicateQubit`]
    /// when a qubit is repeated. Qubit range is checked on insertion.
    pub fn new(
        kind: impl Into<GateKind>,
        qubits: impl IntoIterator<Item = QubitId>,
        params: &[(&str, f64)],
    ) -> IrResult<Self> {
        let kind = kind.into();
        let qubits: Vec<QubitId> = qubits.into_iter().collect();

        let expected = kind.num_qubits();
        if qubits.len() != expected {
            return Err(IrError::ArityMismatch {
                gate_name: kind.name().to_string(),
                expected,
                got: qubits.len(),
            });
        }
        ensure_distinct(&qubits, kind.name())?;
        let params = bind_params(&kind, params)?;

        Ok(Gate::Basic(BasicGate {
            kind,
            qubits,
            params,
            inverted: false,
        }))
    }

    /// Instantiate a parameterless kind.
    pub fn standard(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        Self::new(gate, qubits, &[])
    }

    fn single(gate: StandardGate, qubit: QubitId, params: Vec<f64>) -> Self {
        Gate::Basic(BasicGate {
            kind: GateKind::Standard(gate),
            qubits: vec![qubit],
            params,
            inverted: false,
        })
    }

    /// Identity gate.
    pub fn i(qubit: QubitId) -> Self {
        Self::single(StandardGate::I, qubit, vec![])
    }

    /// Pauli-X gate.
    pub fn x(qubit: QubitId) -> Self {
        Self::single(StandardGate::X, qubit, vec![])
    }

    /// Pauli-Y gate.
    pub fn y(qubit: QubitId) -> Self {
        Self::single(StandardGate::Y, qubit, vec![])
    }

    /// Pauli-Z gate.
    pub fn z(qubit: QubitId) -> Self {
        Self::single(StandardGate::Z, qubit, vec![])
    }

    /// Hadamard gate.
    pub fn h(qubit: QubitId) -> Self {
        Self::single(StandardGate::H, qubit, vec![])
    }

    /// S gate.
    pub fn s(qubit: QubitId) -> Self {
        Self::single(StandardGate::S, qubit, vec![])
    }

    /// S-dagger gate.
    pub fn sd(qubit: QubitId) -> Self {
        Self::single(StandardGate::Sd, qubit, vec![])
    }

    /// T gate.
    pub fn t(qubit: QubitId) -> Self {
        Self::single(StandardGate::T, qubit, vec![])
    }

    /// T-dagger gate.
    pub fn td(qubit: QubitId) -> Self {
        Self::single(StandardGate::Td, qubit, vec![])
    }

    /// Rx rotation.
    pub fn rx(theta: f64, qubit: QubitId) -> IrResult<Self> {
        Self::new(StandardGate::Rx, [qubit], &[("theta", theta)])
    }

    /// Ry rotation.
    pub fn ry(theta: f64, qubit: QubitId) -> IrResult<Self> {
        Self::new(StandardGate::Ry, [qubit], &[("theta", theta)])
    }

    /// Rz rotation.
    pub fn rz(theta: f64, qubit: QubitId) -> IrResult<Self> {
        Self::new(StandardGate::Rz, [qubit], &[("theta", theta)])
    }

    /// SWAP gate.
    pub fn swap(q1: QubitId, q2: QubitId) -> IrResult<Self> {
        Self::standard(StandardGate::Swap, [q1, q2])
    }

    /// iSWAP gate.
    pub fn iswap(q1: QubitId, q2: QubitId) -> IrResult<Self> {
        Self::standard(StandardGate::ISwap, [q1, q2])
    }

    /// CNOT gate.
    pub fn cx(control: QubitId, target: QubitId) -> IrResult<Self> {
        Self::standard(StandardGate::Cx, [control, target])
    }

    /// Controlled-Y gate.
    pub fn cy(control: QubitId, target: QubitId) -> IrResult<Self> {
        Self::standard(StandardGate::Cy, [control, target])
    }

    /// Controlled-Z gate.
    pub fn cz(control: QubitId, target: QubitId) -> IrResult<Self> {
        Self::standard(StandardGate::Cz, [control, target])
    }

    /// Condition this gate on `controls`.
    ///
    /// The resulting qubit order is the controls followed by this gate's
    /// qubits. Fails with [`IrError::DuplicateQubit`] if a control repeats
    /// or coincides with one of this gate's qubits.
    pub fn control(self, controls: impl IntoIterator<Item = QubitId>) -> IrResult<Self> {
        let controls: Vec<QubitId> = controls.into_iter().collect();
        let mut qubits = controls.clone();
        qubits.extend_from_slice(self.qubits());
        ensure_distinct(&qubits, self.name())?;

        Ok(Gate::Controlled(ControlledGate {
            base: Box::new(self),
            controls,
            qubits,
        }))
    }

    /// Kind name; `"Control"` for controlled gates.
    pub fn name(&self) -> &str {
        match self {
            Gate::Basic(g) => g.kind.name(),
            Gate::Controlled(_) => "Control",
        }
    }

    /// The kind, for non-controlled gates.
    pub fn kind(&self) -> Option<&GateKind> {
        match self {
            Gate::Basic(g) => Some(&g.kind),
            Gate::Controlled(_) => None,
        }
    }

    /// All addressed qubits. Controlled gates list controls first.
    pub fn qubits(&self) -> &[QubitId] {
        match self {
            Gate::Basic(g) => &g.qubits,
            Gate::Controlled(g) => &g.qubits,
        }
    }

    /// Number of qubits addressed.
    #[inline]
    pub fn arity(&self) -> usize {
        self.qubits().len()
    }

    /// Control qubits; empty for non-controlled gates.
    pub fn controls(&self) -> &[QubitId] {
        match self {
            Gate::Basic(_) => &[],
            Gate::Controlled(g) => &g.controls,
        }
    }

    /// The wrapped gate, for controlled gates.
    pub fn base(&self) -> Option<&Gate> {
        match self {
            Gate::Basic(_) => None,
            Gate::Controlled(g) => Some(&g.base),
        }
    }

    /// Parameter values in schema order; controlled gates report their base's.
    pub fn params(&self) -> &[f64] {
        match self {
            Gate::Basic(g) => &g.params,
            Gate::Controlled(g) => g.base.params(),
        }
    }

    /// Look up a bound parameter by name.
    pub fn param(&self, name: &str) -> Option<f64> {
        match self {
            Gate::Basic(g) => g
                .kind
                .param_names()
                .iter()
                .position(|p| *p == name)
                .map(|i| g.params[i]),
            Gate::Controlled(g) => g.base.param(name),
        }
    }

    /// Whether the gate carries parameters.
    pub fn is_parametric(&self) -> bool {
        !self.params().is_empty()
    }

    /// Hermitian iff the kind is, or for controlled gates, iff the base is.
    pub fn is_hermitian(&self) -> bool {
        match self {
            Gate::Basic(g) => g.kind.flags().hermitian,
            Gate::Controlled(g) => g.base.is_hermitian(),
        }
    }

    /// Pauli membership. A controlled gate with at least one control is
    /// never Pauli; with none it is its base.
    pub fn is_pauli(&self) -> bool {
        match self {
            Gate::Basic(g) => g.kind.flags().pauli,
            Gate::Controlled(g) => g.controls.is_empty() && g.base.is_pauli(),
        }
    }

    /// Clifford membership. A controlled gate is Clifford when it has a
    /// single control over a Pauli base, or no controls over a Clifford base.
    pub fn is_clifford(&self) -> bool {
        match self {
            Gate::Basic(g) => g.kind.flags().clifford,
            Gate::Controlled(g) => match g.controls.len() {
                0 => g.base.is_clifford(),
                1 => g.base.is_pauli(),
                _ => false,
            },
        }
    }

    /// The adjoint (inverse) of this gate. Applying it twice yields `self`.
    #[must_use]
    pub fn adjoint(&self) -> Self {
        match self {
            Gate::Basic(g) => Gate::Basic(g.adjoint()),
            Gate::Controlled(g) => Gate::Controlled(ControlledGate {
                base: Box::new(g.base.adjoint()),
                controls: g.controls.clone(),
                qubits: g.qubits.clone(),
            }),
        }
    }

    fn fmt_label(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Basic(g) => {
                f.write_str(g.kind.name())?;
                if g.inverted {
                    f.write_str("†")?;
                }
                if !g.params.is_empty() {
                    f.write_str("(")?;
                    for (i, (name, value)) in g.kind.param_names().iter().zip(&g.params).enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{name}={value}")?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
            Gate::Controlled(g) => {
                f.write_str("Control(")?;
                g.base.fmt_label(f)?;
                f.write_str(")")
            }
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_label(f)?;
        for (i, q) in self.qubits().iter().enumerate() {
            f.write_str(if i == 0 { " " } else { ", " })?;
            write!(f, "{q}")?;
        }
        Ok(())
    }
}

fn ensure_distinct(qubits: &[QubitId], gate_name: &str) -> IrResult<()> {
    let mut seen = FxHashSet::default();
    for &qubit in qubits {
        if !seen.insert(qubit) {
            return Err(IrError::DuplicateQubit {
                qubit,
                gate_name: Some(gate_name.to_string()),
            });
        }
    }
    Ok(())
}

/// Order `params` by the kind's schema, rejecting missing, unknown,
/// repeated and non-finite entries.
fn bind_params(kind: &GateKind, params: &[(&str, f64)]) -> IrResult<Vec<f64>> {
    let schema = kind.param_names();
    let mismatch = |reason: String| IrError::ParameterMismatch {
        gate_name: kind.name().to_string(),
        reason,
    };

    let mut values: Vec<Option<f64>> = vec![None; schema.len()];
    for &(key, value) in params {
        let slot = schema
            .iter()
            .position(|p| *p == key)
            .ok_or_else(|| mismatch(format!("unexpected parameter '{key}'")))?;
        if values[slot].is_some() {
            return Err(mismatch(format!("parameter '{key}' given twice")));
        }
        if !value.is_finite() {
            return Err(mismatch(format!("parameter '{key}' is not finite ({value})")));
        }
        values[slot] = Some(value);
    }

    values
        .into_iter()
        .zip(&schema)
        .map(|(value, name)| value.ok_or_else(|| mismatch(format!("missing parameter '{name}'"))))
        .collect()
}
