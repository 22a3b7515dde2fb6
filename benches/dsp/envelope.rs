//! Benchmarks for ADSR shaping.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_wave::Envelope;

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");

    for &size in BUFFER_SIZES {
        let mut buffer = vec![1.0f32; size];

        // All four stages present
        let env = Envelope::adsr(0.02, 0.03, 0.6, 0.04).unwrap();
        group.bench_with_input(BenchmarkId::new("adsr", size), &size, |b, _| {
            b.iter(|| {
                env.apply_to(black_box(&mut buffer), SAMPLE_RATE);
            })
        });

        // Stages longer than the buffer: attack clips everything else
        let env = Envelope::adsr(2.0, 1.0, 0.5, 1.0).unwrap();
        group.bench_with_input(BenchmarkId::new("clipped", size), &size, |b, _| {
            b.iter(|| {
                env.apply_to(black_box(&mut buffer), SAMPLE_RATE);
            })
        });

        // Sustain only
        let env = Envelope::passthrough();
        group.bench_with_input(BenchmarkId::new("passthrough", size), &size, |b, _| {
            b.iter(|| {
                env.apply_to(black_box(&mut buffer), SAMPLE_RATE);
            })
        });
    }

    group.finish();
}
