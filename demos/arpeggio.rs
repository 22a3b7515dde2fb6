//! Renders the arpeggio demo offline and reports what each mode produces
//!
//! Run with: cargo run --example arpeggio

use saavy_wave::{
    io::{MemorySink, PlaybackOptions},
    sequencing::{sequential, ArpMode, Arpeggio, EqualTemperament},
    synth::Synth,
    SynthConfig, Waveform,
};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    println!("=== Arpeggio Demo ===\n");

    let config = SynthConfig::default();
    let table = EqualTemperament::default();
    let mut synth = Synth::new(&config, MemorySink::new())?;

    let chord = ["C3", "E3", "G3", "B3", "C4"];
    let modes = [ArpMode::Up, ArpMode::Down, ArpMode::UpDown];

    for (channel, mode) in modes.into_iter().enumerate() {
        let arp = Arpeggio::new(chord, Waveform::Sawtooth, mode, 0.175);
        let pass = arp.render(&table, config.sample_rate)?;
        let signal = sequential(&[pass], 4)?;

        synth.assign(&signal, channel)?;
        synth.play(channel, PlaybackOptions::default())?;

        let order: Vec<String> = arp.pass().iter().map(ToString::to_string).collect();
        println!("{:7} {}", format!("{}:", mode), order.join(" "));
        println!(
            "        {:.2}s, peak {:.3}",
            signal.duration(),
            synth.sink().last().map(|b| b.peak()).unwrap_or(0.0)
        );
    }

    println!("\n{} buffers sent to the sink", synth.sink().played().len());
    Ok(())
}
