//! Compiled, renderable form of a resolved graph.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{
    config::EngineConfig,
    dsp::{
        amplify,
        counter::GateCounter,
        oscillator::{BlepSaw, Phasor},
        smooth::OnePole,
    },
    error::{GraphError, Result},
    graph::{BinaryOp, NodeId, NodeKind, Signal, UnaryOp},
};

#[derive(Debug, Clone)]
enum OpKind {
    Const(f32),
    SampleRate,
    Phasor(Phasor),
    Saw(BlepSaw),
    Unary(UnaryOp),
    Binary(BinaryOp),
    Smooth(OnePole),
    Counter(GateCounter),
}

impl OpKind {
    fn from_node(kind: &NodeKind) -> Result<Self> {
        Ok(match kind {
            NodeKind::Const { value, .. } => OpKind::Const(*value),
            NodeKind::SampleRate => OpKind::SampleRate,
            NodeKind::Phasor => OpKind::Phasor(Phasor::new()),
            NodeKind::Saw => OpKind::Saw(BlepSaw::new()),
            NodeKind::Unary(op) => OpKind::Unary(*op),
            NodeKind::Binary(op) => OpKind::Binary(*op),
            NodeKind::Smooth => OpKind::Smooth(OnePole::new()),
            NodeKind::Counter => OpKind::Counter(GateCounter::new()),
            NodeKind::Composite(c) => {
                return Err(GraphError::UnresolvedComposite { name: c.name() })
            }
        })
    }

    /// Copy running state from an op of the same kind. Returns false for
    /// stateless ops and on a kind mismatch.
    fn adopt(&mut self, previous: &OpKind) -> bool {
        match (self, previous) {
            (OpKind::Phasor(new), OpKind::Phasor(old)) => *new = *old,
            (OpKind::Saw(new), OpKind::Saw(old)) => *new = *old,
            (OpKind::Smooth(new), OpKind::Smooth(old)) => *new = *old,
            (OpKind::Counter(new), OpKind::Counter(old)) => *new = *old,
            _ => return false,
        }
        true
    }

    fn is_stateful(&self) -> bool {
        matches!(
            self,
            OpKind::Phasor(_) | OpKind::Saw(_) | OpKind::Smooth(_) | OpKind::Counter(_)
        )
    }

    fn reset(&mut self) {
        match self {
            OpKind::Phasor(p) => p.reset(),
            OpKind::Saw(s) => s.reset(),
            OpKind::Smooth(s) => s.reset(),
            OpKind::Counter(c) => c.reset(),
            _ => {}
        }
    }
}

#[derive(Debug, Clone)]
struct Op {
    id: NodeId,
    kind: OpKind,
    /// Indices of earlier ops feeding this one.
    inputs: Vec<usize>,
}

/// A resolved graph flattened into topologically ordered ops.
///
/// Structurally equal nodes compile to one op, so a subgraph referenced from
/// several places renders once per block.
#[derive(Debug, Clone)]
pub struct Program {
    ops: Vec<Op>,
    buffers: Vec<Vec<f32>>,
    keys: FxHashMap<Arc<str>, Vec<usize>>,
    output: usize,
    config: EngineConfig,
}

impl Program {
    /// Compile a resolved graph. Fails on any remaining composite.
    pub fn compile(root: &Signal, config: &EngineConfig) -> Result<Self> {
        config.validate()?;

        let mut builder = Builder::default();
        let output = builder.visit(root)?;

        let buffers = vec![vec![0.0; config.block_size]; builder.ops.len()];
        Ok(Self {
            ops: builder.ops,
            buffers,
            keys: builder.keys,
            output,
            config: *config,
        })
    }

    pub fn op_count(&self) -> usize {
        self.ops.len()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Carry running state over from `previous` for every op whose id is in
    /// both programs. Returns the number of stateful ops adopted.
    pub fn adopt_state(&mut self, previous: &Program) -> usize {
        let by_id: FxHashMap<NodeId, usize> = previous
            .ops
            .iter()
            .enumerate()
            .map(|(index, op)| (op.id, index))
            .collect();

        let mut adopted = 0;
        for op in &mut self.ops {
            if let Some(&index) = by_id.get(&op.id) {
                if op.kind.adopt(&previous.ops[index].kind) {
                    adopted += 1;
                }
            }
        }
        adopted
    }

    /// Update every constant carrying `key`. Returns false if none does.
    pub fn set_const(&mut self, key: &str, value: f32) -> bool {
        let Some(indices) = self.keys.get(key) else {
            return false;
        };
        for &index in indices {
            if let OpKind::Const(v) = &mut self.ops[index].kind {
                *v = value;
            }
        }
        true
    }

    pub fn reset(&mut self) {
        for op in &mut self.ops {
            op.kind.reset();
        }
    }

    pub fn stateful_op_count(&self) -> usize {
        self.ops.iter().filter(|op| op.kind.is_stateful()).count()
    }

    /// Render `out.len()` frames, in chunks of at most `block_size`.
    pub fn process(&mut self, out: &mut [f32]) {
        let block_size = self.config.block_size;
        for chunk in out.chunks_mut(block_size) {
            self.render_block(chunk.len());
            chunk.copy_from_slice(&self.buffers[self.output][..chunk.len()]);
        }
    }

    fn render_block(&mut self, frames: usize) {
        let sample_rate = self.config.sample_rate;

        for index in 0..self.ops.len() {
            // Inputs always precede their consumer, so the output buffer can
            // be taken out while the inputs are borrowed from the pool.
            let mut out = std::mem::take(&mut self.buffers[index]);
            let dst = &mut out[..frames];
            let Op { kind, inputs, .. } = &mut self.ops[index];
            let buffers = &self.buffers;
            let input = |slot: usize| &buffers[inputs[slot]][..frames];

            match kind {
                OpKind::Const(value) => dst.fill(*value),
                OpKind::SampleRate => dst.fill(sample_rate),
                OpKind::Phasor(phasor) => phasor.render(input(0), sample_rate, dst),
                OpKind::Saw(saw) => saw.render(input(0), sample_rate, dst),
                OpKind::Unary(unary) => {
                    let f: fn(f32) -> f32 = match unary {
                        UnaryOp::Cos => f32::cos,
                        UnaryOp::Exp => f32::exp,
                    };
                    for (o, &x) in dst.iter_mut().zip(input(0)) {
                        *o = f(x);
                    }
                }
                OpKind::Binary(binary) => {
                    let (a, b) = (input(0), input(1));
                    match binary {
                        BinaryOp::Add => {
                            dst.copy_from_slice(a);
                            amplify::add_in_place(dst, b);
                        }
                        BinaryOp::Sub => amplify::subtract(a, b, dst),
                        BinaryOp::Mul => amplify::multiply(a, b, dst),
                        BinaryOp::Div => amplify::divide(a, b, dst),
                        BinaryOp::Min => amplify::minimum(a, b, dst),
                        BinaryOp::Max => amplify::maximum(a, b, dst),
                    }
                }
                OpKind::Smooth(sm) => sm.render(input(0), input(1), dst),
                OpKind::Counter(counter) => counter.render(input(0), dst),
            }

            self.buffers[index] = out;
        }
    }
}

#[derive(Default)]
struct Builder {
    ops: Vec<Op>,
    index: FxHashMap<NodeId, usize>,
    keys: FxHashMap<Arc<str>, Vec<usize>>,
}

impl Builder {
    /// Post-order walk with an explicit stack; graphs can be far deeper
    /// than the thread stack allows.
    fn visit(&mut self, root: &Signal) -> Result<usize> {
        let mut stack = vec![(root, false)];

        while let Some((signal, children_done)) = stack.pop() {
            if self.index.contains_key(&signal.id()) {
                continue;
            }
            if !children_done {
                stack.push((signal, true));
                // Reversed so the first child is compiled first
                for child in signal.children().iter().rev() {
                    if !self.index.contains_key(&child.id()) {
                        stack.push((child, false));
                    }
                }
                continue;
            }

            let kind = OpKind::from_node(signal.kind())?;
            let inputs = signal
                .children()
                .iter()
                .map(|child| self.index[&child.id()])
                .collect();

            let index = self.ops.len();
            if let NodeKind::Const { key: Some(key), .. } = signal.kind() {
                self.keys.entry(key.clone()).or_default().push(index);
            }
            self.ops.push(Op {
                id: signal.id(),
                kind,
                inputs,
            });
            self.index.insert(signal.id(), index);
        }

        Ok(self.index[&root.id()])
    }
}
