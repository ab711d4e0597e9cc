use std::{
    fmt,
    hash::{Hash, Hasher},
    ops::{Add, Div, Mul, Neg, Sub},
    sync::Arc,
};

use rustc_hash::FxHasher;

use crate::graph::composite::Composite;

/*
Signals as Immutable, Hashed Nodes
==================================

A `Signal` is a handle to a node in a directed acyclic graph. Nodes never
change after construction; building `a * b` allocates a new node whose
children are `a` and `b`. Handles are `Arc`s, so sharing a subgraph between
several parents is free.

Every node carries a structural hash computed when it is built:

    id(node) = H(kind, properties, key, id(child_0), id(child_1), ...)

Two nodes with the same id are the same signal as far as the engine is
concerned, no matter which `Arc` they live in:

    let a = phasor(2.0);
    let b = phasor(2.0);
    a == b          // true: one phasor is rendered, both parents read it

Ids are also how state survives a rebuild. When a new graph is installed,
ops whose id already existed keep their phase, smoother memory and
counters, so rebuilding a patch after a parameter change does not reset
oscillators.

Keyed constants hash by key only. Changing the value of a keyed constant
therefore keeps every downstream id stable, and the value can also be poked
directly into a running engine with `Engine::set_const`.

Ids alone cannot tell two values of the same keyed constant apart, so each
node also carries a content hash: its id plus the values of every keyed
constant beneath it. State is matched by id; composite expansions are cached
by content, otherwise a rebuilt patch would replay a stale value.
*/

/// Structural identity of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// cos(x), radians
    Cos,
    /// e^x
    Exp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    /// a / b, 0.0 where b == 0
    Div,
    Min,
    Max,
}

#[derive(Debug, Clone)]
pub enum NodeKind {
    Const { value: f32, key: Option<Arc<str>> },
    SampleRate,
    /// child: frequency (Hz)
    Phasor,
    /// child: frequency (Hz)
    Saw,
    Unary(UnaryOp),
    Binary(BinaryOp),
    /// children: pole, input
    Smooth,
    /// child: gate
    Counter,
    Composite(Composite),
}

impl NodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Const { .. } => "const",
            NodeKind::SampleRate => "sr",
            NodeKind::Phasor => "phasor",
            NodeKind::Saw => "saw",
            NodeKind::Unary(UnaryOp::Cos) => "cos",
            NodeKind::Unary(UnaryOp::Exp) => "exp",
            NodeKind::Binary(BinaryOp::Add) => "add",
            NodeKind::Binary(BinaryOp::Sub) => "sub",
            NodeKind::Binary(BinaryOp::Mul) => "mul",
            NodeKind::Binary(BinaryOp::Div) => "div",
            NodeKind::Binary(BinaryOp::Min) => "min",
            NodeKind::Binary(BinaryOp::Max) => "max",
            NodeKind::Smooth => "smooth",
            NodeKind::Counter => "counter",
            NodeKind::Composite(c) => c.name(),
        }
    }

    fn hash_into(&self, h: &mut FxHasher) {
        match self {
            NodeKind::Const { value, key } => {
                0u8.hash(h);
                match key {
                    Some(key) => key.hash(h),
                    None => hash_f32(*value, h),
                }
            }
            NodeKind::SampleRate => 1u8.hash(h),
            NodeKind::Phasor => 2u8.hash(h),
            NodeKind::Saw => 3u8.hash(h),
            NodeKind::Unary(op) => {
                4u8.hash(h);
                op.hash(h);
            }
            NodeKind::Binary(op) => {
                5u8.hash(h);
                op.hash(h);
            }
            NodeKind::Smooth => 6u8.hash(h),
            NodeKind::Counter => 7u8.hash(h),
            NodeKind::Composite(c) => {
                8u8.hash(h);
                c.hash_into(h);
            }
        }
    }
}

/// Hash an f32 by bit pattern, folding -0.0 into 0.0.
pub(crate) fn hash_f32(value: f32, h: &mut FxHasher) {
    let bits = if value == 0.0 { 0 } else { value.to_bits() };
    bits.hash(h);
}

#[derive(Debug)]
pub struct Node {
    kind: NodeKind,
    children: Vec<Signal>,
    id: NodeId,
    content: u64,
    resolved: bool,
}

impl Drop for Node {
    // Unlink iteratively; long chains would otherwise recurse once per level.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(child) = pending.pop() {
            if let Ok(mut node) = Arc::try_unwrap(child.0) {
                pending.append(&mut node.children);
            }
        }
    }
}

/// Handle to a node in an audio signal graph.
#[derive(Clone)]
pub struct Signal(Arc<Node>);

impl Signal {
    pub(crate) fn from_parts(kind: NodeKind, children: Vec<Signal>) -> Self {
        let mut h = FxHasher::default();
        kind.hash_into(&mut h);
        children.len().hash(&mut h);
        for child in &children {
            child.id().hash(&mut h);
        }

        let id = NodeId(h.finish());

        let mut c = FxHasher::default();
        id.hash(&mut c);
        if let NodeKind::Const {
            value,
            key: Some(_),
        } = &kind
        {
            hash_f32(*value, &mut c);
        }
        for child in &children {
            child.content_hash().hash(&mut c);
        }

        let resolved =
            !matches!(kind, NodeKind::Composite(_)) && children.iter().all(Signal::is_resolved);

        Signal(Arc::new(Node {
            kind,
            children,
            id,
            content: c.finish(),
            resolved,
        }))
    }

    pub fn id(&self) -> NodeId {
        self.0.id
    }

    /// Id plus the values of all keyed constants in the subtree.
    pub fn content_hash(&self) -> u64 {
        self.0.content
    }

    pub fn kind(&self) -> &NodeKind {
        &self.0.kind
    }

    pub fn children(&self) -> &[Signal] {
        &self.0.children
    }

    /// True when the subtree contains no composite nodes.
    pub fn is_resolved(&self) -> bool {
        self.0.resolved
    }

    /// Same allocation, not merely the same structure.
    pub fn ptr_eq(&self, other: &Signal) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Value of a constant node, if this is one.
    pub fn as_const(&self) -> Option<f32> {
        match self.kind() {
            NodeKind::Const { value, .. } => Some(*value),
            _ => None,
        }
    }
}

impl PartialEq for Signal {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Signal {}

impl Hash for Signal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            NodeKind::Const {
                value,
                key: Some(key),
            } => write!(f, "const[{key}]({value:?})"),
            NodeKind::Const { value, key: None } => write!(f, "{value:?}"),
            kind if self.children().is_empty() => f.write_str(kind.name()),
            kind => {
                let mut tuple = f.debug_tuple(kind.name());
                for child in self.children() {
                    tuple.field(child);
                }
                tuple.finish()
            }
        }
    }
}

impl From<f32> for Signal {
    fn from(value: f32) -> Self {
        Signal::from_parts(NodeKind::Const { value, key: None }, Vec::new())
    }
}

impl From<&Signal> for Signal {
    fn from(signal: &Signal) -> Self {
        signal.clone()
    }
}

macro_rules! binary_operator {
    ($trait:ident, $method:ident, $op:expr) => {
        impl<T: Into<Signal>> $trait<T> for Signal {
            type Output = Signal;

            fn $method(self, rhs: T) -> Signal {
                Signal::from_parts(NodeKind::Binary($op), vec![self, rhs.into()])
            }
        }

        impl<T: Into<Signal>> $trait<T> for &Signal {
            type Output = Signal;

            fn $method(self, rhs: T) -> Signal {
                Signal::from_parts(NodeKind::Binary($op), vec![self.clone(), rhs.into()])
            }
        }

        impl $trait<Signal> for f32 {
            type Output = Signal;

            fn $method(self, rhs: Signal) -> Signal {
                Signal::from_parts(NodeKind::Binary($op), vec![self.into(), rhs])
            }
        }

        impl $trait<&Signal> for f32 {
            type Output = Signal;

            fn $method(self, rhs: &Signal) -> Signal {
                Signal::from_parts(NodeKind::Binary($op), vec![self.into(), rhs.clone()])
            }
        }
    };
}

binary_operator!(Add, add, BinaryOp::Add);
binary_operator!(Sub, sub, BinaryOp::Sub);
binary_operator!(Mul, mul, BinaryOp::Mul);
binary_operator!(Div, div, BinaryOp::Div);

impl Neg for Signal {
    type Output = Signal;

    fn neg(self) -> Signal {
        -1.0 * self
    }
}

impl Neg for &Signal {
    type Output = Signal;

    fn neg(self) -> Signal {
        -1.0 * self
    }
}
