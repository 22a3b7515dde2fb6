//! Benchmarks for waveform generation.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_wave::dsp::oscillator::generate;
use saavy_wave::Waveform;

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_oscillator(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/oscillator");

    for &size in BUFFER_SIZES {
        let duration = size as f32 / SAMPLE_RATE as f32;

        // sin() per sample for every shape; square adds a branch
        for shape in Waveform::ALL {
            group.bench_with_input(BenchmarkId::new(shape.name(), size), &size, |b, _| {
                b.iter(|| {
                    generate(
                        black_box(shape),
                        black_box(440.0),
                        black_box(duration),
                        SAMPLE_RATE,
                    )
                })
            });
        }
    }

    group.finish();
}
