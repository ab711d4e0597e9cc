//! Benchmarks for the one-pole smoother and gate counter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_compose::dsp::{
    counter::GateCounter,
    smooth::{tau_to_pole, OnePole},
};

use crate::BLOCK_SIZES;

pub fn bench_smooth(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/smooth");
    let pole = tau_to_pole(0.02, 48_000.0);

    for &size in BLOCK_SIZES {
        let poles = vec![pole; size];
        // Step halfway through the block
        let input: Vec<f32> = (0..size)
            .map(|i| if i < size / 2 { 0.0 } else { 1.0 })
            .collect();
        let mut buffer = vec![0.0f32; size];

        let mut smoother = OnePole::new();
        group.bench_with_input(BenchmarkId::new("one_pole", size), &size, |b, _| {
            b.iter(|| {
                smoother.render(
                    black_box(&poles),
                    black_box(&input),
                    black_box(&mut buffer),
                )
            })
        });

        let mut counter = GateCounter::new();
        group.bench_with_input(BenchmarkId::new("gate_counter", size), &size, |b, _| {
            b.iter(|| counter.render(black_box(&input), black_box(&mut buffer)))
        });
    }

    group.finish();
}
