//! Benchmarks for block arithmetic.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_compose::dsp::amplify;

use crate::BLOCK_SIZES;

pub fn bench_amplify(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/amplify");

    for &size in BLOCK_SIZES {
        let signal: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();
        let modulator: Vec<f32> = (0..size).map(|i| i as f32 / size as f32).collect();
        let mut output = vec![0.0f32; size];

        group.bench_with_input(BenchmarkId::new("multiply", size), &size, |b, _| {
            b.iter(|| {
                amplify::multiply(
                    black_box(&signal),
                    black_box(&modulator),
                    black_box(&mut output),
                )
            })
        });

        // modulator[0] is zero, so the zero-divisor branch is hit once per block
        group.bench_with_input(BenchmarkId::new("divide", size), &size, |b, _| {
            b.iter(|| {
                amplify::divide(
                    black_box(&signal),
                    black_box(&modulator),
                    black_box(&mut output),
                )
            })
        });

        // Sum nodes copy the left input, then accumulate the right
        group.bench_with_input(BenchmarkId::new("add", size), &size, |b, _| {
            b.iter(|| {
                output.copy_from_slice(&signal);
                amplify::add_in_place(black_box(&mut output), black_box(&modulator))
            })
        });
    }

    group.finish();
}
