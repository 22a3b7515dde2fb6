//! Benchmarks for enveloped notes and the two-arpeggio demo.

use std::hint::black_box;

use criterion::Criterion;
use saavy_wave::{
    dsp::Smoothing,
    sequencing::{sequential, ArpMode, Arpeggio, EqualTemperament},
    synth::Voice,
    Envelope, Waveform,
};

use crate::SAMPLE_RATE;

pub fn bench_arpeggio(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/arpeggio");
    let table = EqualTemperament::default();

    // One held note plus its release tail
    let voice = Voice::new(Envelope::adsr(0.01, 0.05, 0.6, 0.1).unwrap(), SAMPLE_RATE);
    group.bench_function("voice_note", |b| {
        b.iter(|| voice.sawtooth(black_box(261.63), black_box(0.175)))
    });

    // A single updown pass of the lead chord
    let lead = Arpeggio::new(
        ["C3", "E3", "G3", "B3", "C4"],
        Waveform::Sawtooth,
        ArpMode::UpDown,
        0.175,
    );
    group.bench_function("updown_pass", |b| {
        b.iter(|| lead.render(black_box(&table), SAMPLE_RATE))
    });

    // Full demo: both passes, repeated, joined and smoothed
    let bass = Arpeggio::new(
        ["E2", "E3", "G3", "B3", "C4"],
        Waveform::Sawtooth,
        ArpMode::UpDown,
        0.175,
    );
    let smoothing = Smoothing::default();
    group.sample_size(20);
    group.bench_function("demo", |b| {
        b.iter(|| {
            let lead = sequential(&[lead.render(&table, SAMPLE_RATE).unwrap()], 4).unwrap();
            let bass = sequential(&[bass.render(&table, SAMPLE_RATE).unwrap()], 4).unwrap();
            let demo = sequential(&[lead, bass], 1).unwrap();
            smoothing.apply(black_box(&demo))
        })
    });

    group.finish();
}
