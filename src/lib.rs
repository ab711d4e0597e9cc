pub mod config;
pub mod dsp; // Per-sample kernels
pub mod engine; // Compile and render resolved graphs
pub mod error;
pub mod graph; // Signal handles, composites, resolution
pub mod helpers; // Composite patch helpers

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{GraphError, Result};
pub use graph::Signal;

pub const MAX_BLOCK_SIZE: usize = 2048;
