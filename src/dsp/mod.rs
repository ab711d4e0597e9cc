//! Low-level DSP kernels used by the engine's ops.
//!
//! These components are allocation-free and realtime-safe. They stay focused
//! on the signal-processing math; the graph layer decides how they are wired.

/// Sample-by-sample arithmetic (multiply, add, divide, min/max).
pub mod amplify;
/// Gated sample counter.
pub mod counter;
/// Phasor and PolyBLEP sawtooth.
pub mod oscillator;
/// One-pole smoother and time-constant conversion.
pub mod smooth;
