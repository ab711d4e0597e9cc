/// Demonstrates building a patch from composite helpers, resolving it and
/// rendering it through the engine.
use saavy_compose::{
    graph::{primitives::phasor, resolve::Resolver},
    helpers::{attenuate, clipped_hann, detuned_saw, progress, remap},
    Engine, EngineConfig,
};

fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
}

fn main() -> saavy_compose::Result<()> {
    println!("=== Composite Graph Basics ===\n");

    let config = EngineConfig::default();
    let mut engine = Engine::new(config)?;
    let mut buffer = vec![0.0; 4_800];

    // 1. A single helper
    println!("1. Detuned saw pair at 110 Hz, ±12 cents");
    let voice = detuned_saw(110.0, 12.0);
    println!("   unresolved: {voice:?}");
    engine.render_graph(&voice)?;
    engine.process(&mut buffer);
    println!("   peak amplitude: {:.3}", peak(&buffer));

    // 2. Helpers composed: LFO remapped onto a pitch range, then attenuated
    println!("\n2. Pitch swept by a Hann-shaped LFO, attenuated to 0.25");
    let lfo = clipped_hann(phasor(0.5));
    let pitch = remap(lfo, (0.0, 1.0), (110.0, 220.0));
    let patch = attenuate(0.25, detuned_saw(pitch, 12.0));
    engine.render_graph(&patch)?;
    engine.process(&mut buffer);
    println!("   peak amplitude: {:.3} (gain fading in)", peak(&buffer));

    // 3. Memoization: the same helper used twice expands once
    println!("\n3. Memoization");
    let twice = progress(1.0, 0.5) + progress(1.0, 0.5);
    let mut resolver = Resolver::new();
    let resolved = resolver.resolve(&twice)?;
    let stats = resolver.stats();
    println!("   render calls: {}, memo hits: {}", stats.misses, stats.hits);
    println!("   resolved: {resolved:?}");

    if let Some(program) = engine.program() {
        println!("\n=== Installed program ===");
        println!("• {} ops, {} with state", program.op_count(), program.stateful_op_count());
    }

    Ok(())
}
