use crate::graph::{primitives, Signal};

/// Fluent combinators, so patches read left to right:
///
/// ```
/// use saavy_compose::graph::{extensions::SignalExt, primitives::saw};
///
/// let voice = saw(110.0).amplify(0.5).clamp(-0.4, 0.4);
/// ```
pub trait SignalExt: Into<Signal> + Sized {
    fn amplify(self, modulator: impl Into<Signal>) -> Signal {
        primitives::mul(self, modulator)
    }

    fn mix(self, other: impl Into<Signal>) -> Signal {
        primitives::add(self, other)
    }

    fn clamp(self, lo: impl Into<Signal>, hi: impl Into<Signal>) -> Signal {
        primitives::clamp(self, lo, hi)
    }

    fn smooth(self, pole: impl Into<Signal>) -> Signal {
        primitives::smooth(pole, self)
    }

    /// Smooth with the default 20 ms time constant.
    fn sm(self) -> Signal {
        primitives::sm(self)
    }
}

impl SignalExt for Signal {}
impl SignalExt for &Signal {}
