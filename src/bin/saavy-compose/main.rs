//! saavy-compose - terminal scope for composite patches
//!
//! Run with: cargo run
//! Logs go to stderr; enable them with e.g. RUST_LOG=saavy_compose=debug.

mod app;
mod ui;

use app::Scope;
use tracing_subscriber::EnvFilter;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    Scope::new()
        .frequency(110.0)
        .detune(12.0)
        .gain(0.3)
        .grain_seconds(2.0)
        .run()
}
