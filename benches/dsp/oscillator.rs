//! Benchmarks for the phasor and band-limited saw.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_compose::dsp::oscillator::{BlepSaw, Phasor};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BLOCK_SIZES {
        let frequency = vec![440.0f32; size];
        let mut buffer = vec![0.0f32; size];

        let mut phasor = Phasor::new();
        group.bench_with_input(BenchmarkId::new("phasor", size), &size, |b, _| {
            b.iter(|| {
                phasor.render(
                    black_box(&frequency),
                    SAMPLE_RATE,
                    black_box(&mut buffer),
                )
            })
        });

        let mut saw = BlepSaw::new();
        group.bench_with_input(BenchmarkId::new("blep_saw", size), &size, |b, _| {
            b.iter(|| {
                saw.render(
                    black_box(&frequency),
                    SAMPLE_RATE,
                    black_box(&mut buffer),
                )
            })
        });

        // Audio-rate FM: the frequency input changes every sample
        let swept: Vec<f32> = (0..size)
            .map(|i| 110.0 + 440.0 * i as f32 / size as f32)
            .collect();
        let mut saw = BlepSaw::new();
        group.bench_with_input(BenchmarkId::new("blep_saw_swept", size), &size, |b, _| {
            b.iter(|| {
                saw.render(
                    black_box(&swept),
                    SAMPLE_RATE,
                    black_box(&mut buffer),
                )
            })
        });
    }

    group.finish();
}
