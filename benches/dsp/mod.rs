//! Benchmarks for per-sample kernels.

mod amplify;
mod oscillator;
mod smooth;

pub use amplify::bench_amplify;
pub use oscillator::bench_oscillator;
pub use smooth::bench_smooth;
