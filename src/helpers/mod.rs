//! Composite helpers for building patches.
//!
//! Each helper returns an unresolved composite [`Signal`](crate::graph::Signal)
//! with a stable `saavy::` name. Nothing is expanded until the graph is
//! resolved, and equal helper invocations share one expansion.
//!
//! ```
//! use saavy_compose::{
//!     graph::primitives::{keyed_constant, phasor},
//!     helpers::{attenuate, clipped_hann, detuned_saw, remap},
//! };
//!
//! // 0.5 Hz LFO swept over 100..200 Hz, driving a detuned saw pair
//! let lfo = remap(phasor(0.5), (0.0, 1.0), (100.0, 200.0));
//! let voice = attenuate(keyed_constant("gain", 0.3), detuned_saw(lfo, 12.0));
//! let grain = clipped_hann(phasor(2.0));
//! ```

/// Smoothed gain stage.
pub mod attenuate;
/// Detuned saw pair.
pub mod detune;
/// Gate-driven 0..1 progress ramp.
pub mod progress;
/// Linear range remapping.
pub mod remap;
/// Clipped Hann window and grain envelope.
pub mod window;

pub use attenuate::attenuate;
pub use detune::detuned_saw;
pub use progress::progress;
pub use remap::remap;
pub use window::{clipped_hann, grain_window};
