//! Composite patch benchmarks.
//!
//! Helper-built graphs rendered through the engine, and the cost of
//! resolving them from scratch versus against a warm memo.

mod helpers;

pub use helpers::{bench_helpers, bench_resolve};
