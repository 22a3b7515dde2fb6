//! Benchmarks for windowed smoothing.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_wave::dsp::smoothing::smooth;
use saavy_wave::dsp::oscillator::generate;
use saavy_wave::{Waveform, WindowKind};

use crate::{BUFFER_SIZES, SAMPLE_RATE};

pub fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/smoothing");

    for &size in BUFFER_SIZES {
        let duration = size as f32 / SAMPLE_RATE as f32;
        let saw = generate(Waveform::Sawtooth, 220.0, duration, SAMPLE_RATE).unwrap();

        // Cost grows with window length: one kernel pass per output sample
        for window_len in [11, 30, 101] {
            let id = format!("hanning_{}", window_len);
            group.bench_with_input(BenchmarkId::new(id, size), &size, |b, _| {
                b.iter(|| smooth(black_box(saw.as_slice()), window_len, WindowKind::Hanning))
            });
        }

        group.bench_with_input(BenchmarkId::new("flat_30", size), &size, |b, _| {
            b.iter(|| smooth(black_box(saw.as_slice()), 30, WindowKind::Flat))
        });
    }

    group.finish();
}
