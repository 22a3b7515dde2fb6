use saavy_wave::{
    dsp::{envelope, oscillator::sample_count, smooth, Smoothing},
    io::{MemorySink, PlaybackOptions},
    sequencing::{sequential, ArpMode, Arpeggio, EqualTemperament, NoteTable},
    synth::Synth,
    Envelope, SampleBuffer, SynthConfig, SynthError, Waveform, WindowKind,
};

const SAMPLE_RATE: u32 = 44_100;

fn demo_signal(shape: Waveform, mode: ArpMode) -> SampleBuffer {
    let table = EqualTemperament::default();
    let lead = Arpeggio::new(["C3", "E3", "G3", "B3", "C4"], shape, mode, 0.175)
        .render(&table, SAMPLE_RATE)
        .unwrap();
    let bass = Arpeggio::new(["E2", "E3", "G3", "B3", "C4"], shape, mode, 0.175)
        .render(&table, SAMPLE_RATE)
        .unwrap();

    sequential(
        &[
            sequential(&[lead], 4).unwrap(),
            sequential(&[bass], 4).unwrap(),
        ],
        1,
    )
    .unwrap()
}

#[test]
fn one_second_of_a4() {
    let sine = saavy_wave::dsp::generate(Waveform::Sine, 440.0, 1.0, SAMPLE_RATE).unwrap();
    assert_eq!(sine.len(), 44_100);
    assert_eq!(sine.sample_rate, SAMPLE_RATE);
    assert!(sine.samples[0].abs() < 1e-6);
    // first peak lands a quarter period in
    assert!((sine.samples[25] - 1.0).abs() < 1e-3);
    assert!((sine.duration() - 1.0).abs() < 1e-9);
}

#[test]
fn shaped_second_of_ones() {
    let mut ones = vec![1.0f32; 44_100];
    envelope::apply(&mut ones, 0.1, 0.1, 0.5, 0.1, SAMPLE_RATE).unwrap();

    assert!(ones[0].abs() < 1e-6);
    assert!((ones[4409] - 1.0).abs() < 1e-6);
    assert!((ones[22_050] - 0.5).abs() < 1e-6);
    assert!(ones[44_099].abs() < 1e-6);
}

#[test]
fn demo_through_the_synth() {
    let signal = demo_signal(Waveform::Sawtooth, ArpMode::UpDown);
    let note = sample_count(0.175, SAMPLE_RATE);
    assert_eq!(signal.len(), 2 * 4 * 8 * note);

    let mut synth = Synth::new(&SynthConfig::default(), MemorySink::new()).unwrap();
    synth.assign(&signal, 0).unwrap();
    synth
        .play(0, PlaybackOptions::default().looping(true))
        .unwrap();

    let played = synth.sink().last().unwrap();
    assert_eq!(played.len(), signal.len());
    assert_eq!(played.sample_rate, SAMPLE_RATE);
    assert!(played.iter().all(|s| s.abs() <= 1.0 + 1e-6));

    // smoothing takes the corners off the sawtooth resets
    let raw_jump = signal
        .samples
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0f32, f32::max);
    let smoothed_jump = played
        .samples
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(0.0f32, f32::max);
    assert!(smoothed_jump < raw_jump);

    synth.halt().unwrap();
    assert!(!synth.sink().is_playing());
}

#[test]
fn every_shape_and_mode_renders() {
    for shape in Waveform::ALL {
        for mode in [ArpMode::Up, ArpMode::Down, ArpMode::UpDown] {
            let signal = demo_signal(shape, mode);
            assert!(!signal.is_empty(), "{shape} {mode} rendered nothing");
            assert!(signal.peak() <= 1.0);
        }
    }
}

#[test]
fn enveloped_arpeggio_rings_out_each_note() {
    let table = EqualTemperament::default();
    let env = Envelope::adsr(0.01, 0.02, 0.7, 0.05).unwrap();
    let pass = Arpeggio::new(["C4", "E4", "G4"], Waveform::Triangle, ArpMode::Up, 0.1)
        .with_envelope(env)
        .render(&table, SAMPLE_RATE)
        .unwrap();

    let note = sample_count(0.15, SAMPLE_RATE);
    assert_eq!(pass.len(), 3 * note);
    for end in [note - 1, 2 * note - 1, 3 * note - 1] {
        assert!(pass.samples[end].abs() < 1e-6);
    }
}

#[test]
fn csv_table_drives_an_arpeggio() {
    let table = NoteTable::from_csv("note,frequency\nlow,100\nhigh,200\n").unwrap();
    let pass = Arpeggio::new(["low", "high"], Waveform::Square, ArpMode::Down, 0.01)
        .render(&table, 1_000)
        .unwrap();
    assert_eq!(pass.len(), 20);

    let missing = Arpeggio::new(["low", "middle"], Waveform::Square, ArpMode::Up, 0.01);
    assert!(matches!(
        missing.render(&table, 1_000),
        Err(SynthError::InvalidFrequency(_))
    ));
}

#[test]
fn flat_window_is_a_moving_average() {
    let input: Vec<f32> = (0..20).map(|i| (i * i) as f32).collect();
    let out = smooth(&input, 5, WindowKind::Flat).unwrap();
    assert_eq!(out.len(), input.len());

    for i in 2..18 {
        let mean = input[i - 2..=i + 2].iter().sum::<f32>() / 5.0;
        assert!((out[i] - mean).abs() < 1e-3, "index {i}: {} vs {mean}", out[i]);
    }

    let short = smooth(&input, 2, WindowKind::Hanning).unwrap();
    assert_eq!(short, input);
}

#[test]
fn unsmoothed_config_stores_signal_as_is() {
    let config = SynthConfig::default().with_smoothing(None);
    let mut synth = Synth::new(&config, MemorySink::new()).unwrap();
    let signal = demo_signal(Waveform::Sine, ArpMode::Up);

    synth.assign(&signal, 1).unwrap();
    assert_eq!(synth.channel(1).unwrap().signal(), Some(&signal));

    synth
        .set_channel(&signal, 2, 0.25, Some(Smoothing::new(9, WindowKind::Blackman)))
        .unwrap();
    assert!(synth.channel(2).unwrap().signal().unwrap().peak() <= 0.25 + 1e-6);
}

#[cfg(feature = "serde")]
#[test]
fn yaml_config_fills_in_defaults() {
    let yaml = "sample_rate: 22050\nenvelope:\n  attack: 0.01\nsmoothing:\n  window_len: 11\n  kind: bartlett\n";
    let config: SynthConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(config.sample_rate, 22_050);
    assert_eq!(config.channels, 4);
    assert_eq!(config.envelope.attack, 0.01);
    assert_eq!(config.envelope.sustain, 0.5);
    assert_eq!(config.smoothing, Some(Smoothing::new(11, WindowKind::Bartlett)));
    assert!(config.validate().is_ok());

    let unsmoothed: SynthConfig = serde_yaml::from_str("smoothing: null\n").unwrap();
    assert_eq!(unsmoothed.smoothing, None);
}
