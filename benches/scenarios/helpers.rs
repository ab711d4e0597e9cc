//! Benchmarks for helper patches.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_compose::{
    graph::{
        primitives::{constant, phasor},
        resolve::Resolver,
        Signal,
    },
    helpers::{attenuate, clipped_hann, detuned_saw, grain_window, remap},
    Engine, EngineConfig,
};

use crate::BLOCK_SIZES;

/// Swept detuned pair under a grain window and smoothed gain.
fn full_patch(frequency: f32) -> Signal {
    let pitch = remap(
        clipped_hann(phasor(0.25)),
        (0.0, 1.0),
        (frequency, frequency * 1.5),
    );
    attenuate(
        0.5,
        detuned_saw(pitch, 12.0) * grain_window(constant(1.0), 2.0),
    )
}

fn engine_with(graph: &Signal, block_size: usize) -> Engine {
    let config = EngineConfig::default().with_block_size(block_size);
    let mut engine = Engine::new(config).expect("valid config");
    engine.render_graph(graph).expect("graph resolves");
    engine
}

pub fn bench_helpers(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/helpers");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Baseline: two saws and a mix
        let mut detuned = engine_with(&detuned_saw(110.0, 12.0), size);
        group.bench_with_input(BenchmarkId::new("detuned_saw", size), &size, |b, _| {
            b.iter(|| detuned.process(black_box(&mut buffer)))
        });

        let mut full = engine_with(&full_patch(110.0), size);
        group.bench_with_input(BenchmarkId::new("full_patch", size), &size, |b, _| {
            b.iter(|| full.process(black_box(&mut buffer)))
        });

        // Eight voices of the full patch, summed
        let chord = (0..8)
            .map(|i| full_patch(110.0 * (1.0 + i as f32 * 0.25)))
            .reduce(|acc, voice| acc + voice)
            .expect("non-empty chord");
        let mut chord = engine_with(&(chord * 0.125), size);
        group.bench_with_input(BenchmarkId::new("chord_8", size), &size, |b, _| {
            b.iter(|| chord.process(black_box(&mut buffer)))
        });
    }

    group.finish();
}

pub fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/resolve");
    let graph = full_patch(110.0);

    group.bench_function("cold", |b| {
        b.iter(|| {
            let mut resolver = Resolver::new();
            resolver.resolve(black_box(&graph)).expect("graph resolves")
        })
    });

    let mut warm = Resolver::new();
    warm.resolve(&graph).expect("graph resolves");
    group.bench_function("warm", |b| {
        b.iter(|| warm.resolve(black_box(&graph)).expect("graph resolves"))
    });

    // Rebuild cost as seen by the engine: resolve, compile, adopt state
    let mut engine = engine_with(&graph, 128);
    group.bench_function("render_graph", |b| {
        b.iter(|| engine.render_graph(black_box(&graph)).expect("graph resolves"))
    });

    group.finish();
}
