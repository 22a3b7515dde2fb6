//! Benchmarks for the offline rendering primitives and the demo render.
//!
//! Run with: cargo bench
//!
//! Everything here renders whole buffers ahead of playback, so the sizes are
//! note-length rather than audio-callback-length:
//!   - 4_410 samples   = 0.1s at 44.1kHz
//!   - 7_717 samples   = one 0.175s arpeggio note
//!   - 44_100 samples  = 1s
//!
//! Benchmark groups:
//!   - dsp/*        Oscillator, envelope and smoothing on their own
//!   - scenarios/*  Enveloped notes and the full two-arpeggio demo

use criterion::{criterion_group, criterion_main};

mod dsp;
mod scenarios;

/// Buffer lengths, in samples, rendered by each primitive benchmark.
pub const BUFFER_SIZES: &[usize] = &[4_410, 7_717, 44_100];

/// Rate every benchmark renders at.
pub const SAMPLE_RATE: u32 = 44_100;

criterion_group!(
    benches,
    dsp::bench_oscillator,
    dsp::bench_envelope,
    dsp::bench_smoothing,
    scenarios::bench_arpeggio,
);
criterion_main!(benches);
