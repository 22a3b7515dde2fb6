//! Shows how an ADSR envelope carves up a fixed-length note
//!
//! Run with: cargo run --example envelope_shapes

use saavy_wave::{
    dsp::EnvelopeStage,
    synth::Voice,
    Envelope,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    println!("=== ADSR Envelope Shapes ===\n");

    let sample_rate = 44_100;
    let key_duration = 0.5;

    let envelopes = [
        ("pluck", Envelope::adsr(0.005, 0.08, 0.2, 0.1)?),
        ("pad", Envelope::adsr(0.15, 0.1, 0.8, 0.3)?),
        ("default", Envelope::default()),
        // stages longer than the note: attack and decay get clipped
        ("swell", Envelope::adsr(0.4, 0.4, 0.6, 0.2)?),
    ];

    for (name, env) in envelopes {
        let voice = Voice::new(env, sample_rate);
        let note = voice.sine(220.0, key_duration)?;
        let segments = env.segments(note.len(), sample_rate);

        println!(
            "{} (A {:.3}s  D {:.3}s  S {:.2}  R {:.3}s), {} samples:",
            name,
            env.attack_time(),
            env.decay_time(),
            env.sustain_level(),
            env.release_time(),
            note.len()
        );

        for stage in [
            EnvelopeStage::Attack,
            EnvelopeStage::Decay,
            EnvelopeStage::Sustain,
            EnvelopeStage::Release,
        ] {
            let range = segments.range(stage);
            let slice = &note.samples[range.clone()];
            let peak = slice.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
            println!(
                "  {:8} {:6}..{:<6} peak: {:.3}",
                format!("{:?}:", stage),
                range.start,
                range.end,
                peak
            );
        }
        println!();
    }

    Ok(())
}
