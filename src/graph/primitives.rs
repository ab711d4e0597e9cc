//! Constructors for primitive graph nodes.
//!
//! Every function accepts `impl Into<Signal>`, so plain numbers can be passed
//! wherever a signal is expected: `phasor(440.0)`, `mul(gain, saw(freq))`.

use std::sync::Arc;

use crate::graph::signal::{BinaryOp, NodeKind, Signal, UnaryOp};

/// Default smoothing time constant used by [`sm`], in seconds.
pub const DEFAULT_SMOOTHING_TAU: f32 = 0.02;

fn unary(op: UnaryOp, x: impl Into<Signal>) -> Signal {
    Signal::from_parts(NodeKind::Unary(op), vec![x.into()])
}

fn binary(op: BinaryOp, a: impl Into<Signal>, b: impl Into<Signal>) -> Signal {
    Signal::from_parts(NodeKind::Binary(op), vec![a.into(), b.into()])
}

pub fn constant(value: f32) -> Signal {
    Signal::from(value)
}

/// A constant whose value can be changed on a running engine.
///
/// The node's identity depends on `key` only; see `Engine::set_const`.
pub fn keyed_constant(key: impl Into<Arc<str>>, value: f32) -> Signal {
    Signal::from_parts(
        NodeKind::Const {
            value,
            key: Some(key.into()),
        },
        Vec::new(),
    )
}

/// The engine's sample rate in Hz, as a signal.
pub fn sample_rate() -> Signal {
    Signal::from_parts(NodeKind::SampleRate, Vec::new())
}

/// Ramp in [0, 1) at `freq` Hz.
pub fn phasor(freq: impl Into<Signal>) -> Signal {
    Signal::from_parts(NodeKind::Phasor, vec![freq.into()])
}

/// Band-limited sawtooth in [-1, 1] at `freq` Hz.
pub fn saw(freq: impl Into<Signal>) -> Signal {
    Signal::from_parts(NodeKind::Saw, vec![freq.into()])
}

pub fn cos(x: impl Into<Signal>) -> Signal {
    unary(UnaryOp::Cos, x)
}

pub fn exp(x: impl Into<Signal>) -> Signal {
    unary(UnaryOp::Exp, x)
}

pub fn add(a: impl Into<Signal>, b: impl Into<Signal>) -> Signal {
    binary(BinaryOp::Add, a, b)
}

pub fn sub(a: impl Into<Signal>, b: impl Into<Signal>) -> Signal {
    binary(BinaryOp::Sub, a, b)
}

pub fn mul(a: impl Into<Signal>, b: impl Into<Signal>) -> Signal {
    binary(BinaryOp::Mul, a, b)
}

/// `a / b`; the engine outputs 0.0 wherever `b` is 0.
pub fn div(a: impl Into<Signal>, b: impl Into<Signal>) -> Signal {
    binary(BinaryOp::Div, a, b)
}

pub fn min(a: impl Into<Signal>, b: impl Into<Signal>) -> Signal {
    binary(BinaryOp::Min, a, b)
}

pub fn max(a: impl Into<Signal>, b: impl Into<Signal>) -> Signal {
    binary(BinaryOp::Max, a, b)
}

/// Sum of any number of signals. An empty sum is 0.
///
/// Terms are paired into a balanced tree, so the graph depth grows with
/// `log2(n)` rather than `n`.
pub fn sum<I, S>(signals: I) -> Signal
where
    I: IntoIterator<Item = S>,
    S: Into<Signal>,
{
    fold_balanced(BinaryOp::Add, signals).unwrap_or_else(|| constant(0.0))
}

/// Product of any number of signals. An empty product is 1.
pub fn product<I, S>(signals: I) -> Signal
where
    I: IntoIterator<Item = S>,
    S: Into<Signal>,
{
    fold_balanced(BinaryOp::Mul, signals).unwrap_or_else(|| constant(1.0))
}

fn fold_balanced<I, S>(op: BinaryOp, signals: I) -> Option<Signal>
where
    I: IntoIterator<Item = S>,
    S: Into<Signal>,
{
    let mut layer: Vec<Signal> = signals.into_iter().map(Into::into).collect();
    while layer.len() > 1 {
        let mut next = Vec::with_capacity(layer.len().div_ceil(2));
        let mut terms = layer.into_iter();
        while let Some(a) = terms.next() {
            next.push(match terms.next() {
                Some(b) => binary(op, a, b),
                None => a,
            });
        }
        layer = next;
    }
    layer.pop()
}

/// `min(max(x, lo), hi)`.
pub fn clamp(x: impl Into<Signal>, lo: impl Into<Signal>, hi: impl Into<Signal>) -> Signal {
    min(max(x, lo), hi)
}

/// One-pole lowpass: `y = x·(1 − pole) + y·pole`.
pub fn smooth(pole: impl Into<Signal>, x: impl Into<Signal>) -> Signal {
    Signal::from_parts(NodeKind::Smooth, vec![pole.into(), x.into()])
}

/// Pole for a time constant of `tau` seconds: `exp(-1 / (tau · sr))`.
pub fn tau_to_pole(tau: impl Into<Signal>) -> Signal {
    exp(div(-1.0, mul(tau, sample_rate())))
}

/// Smooth `x` with the default 20 ms time constant.
pub fn sm(x: impl Into<Signal>) -> Signal {
    smooth(tau_to_pole(DEFAULT_SMOOTHING_TAU), x)
}

/// Samples elapsed since `gate` went high; 0 while it is low.
pub fn counter(gate: impl Into<Signal>) -> Signal {
    Signal::from_parts(NodeKind::Counter, vec![gate.into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{engine::render_offline, EngineConfig};

    #[test]
    fn sum_and_product_fold() {
        assert_eq!(sum([1.0, 2.0, 3.0]), add(add(1.0, 2.0), 3.0));
        assert_eq!(product([phasor(1.0), saw(2.0)]), mul(phasor(1.0), saw(2.0)));
    }

    fn depth(signal: &Signal) -> usize {
        1 + signal.children().iter().map(depth).max().unwrap_or(0)
    }

    #[test]
    fn sum_builds_a_balanced_tree() {
        let total = sum((0..1024).map(|i| i as f32));
        assert_eq!(depth(&total), 11);

        let config = EngineConfig::default().with_block_size(1);
        let out = render_offline(&total, config, 1).unwrap();
        assert_eq!(out[0], (0..1024).sum::<i32>() as f32);
    }

    #[test]
    fn tau_to_pole_matches_the_kernel() {
        let config = EngineConfig::default();
        let out = render_offline(&tau_to_pole(0.02), config, 1).unwrap();
        let expected = crate::dsp::smooth::tau_to_pole(0.02, config.sample_rate);
        assert!((out[0] - expected).abs() < 1e-6);
    }

    #[test]
    fn empty_sum_and_product_are_identities() {
        assert_eq!(sum(Vec::<Signal>::new()).as_const(), Some(0.0));
        assert_eq!(product(Vec::<f32>::new()).as_const(), Some(1.0));
    }

    #[test]
    fn sum_of_one_is_itself() {
        let x = phasor(3.0);
        assert!(sum([x.clone()]).ptr_eq(&x));
    }

    #[test]
    fn sm_shares_its_pole_subgraph() {
        let a = sm(keyed_constant("a", 1.0));
        let b = sm(keyed_constant("b", 1.0));
        assert_eq!(a.children()[0], b.children()[0]);
        assert_ne!(a, b);
    }

    #[test]
    fn clamp_is_min_of_max() {
        let x = phasor(1.0);
        assert_eq!(clamp(x.clone(), 0.0, 1.0), min(max(x, 0.0), 1.0));
    }
}
