//! Demo rendering and the application runner

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use rtrb::RingBuffer;

use super::sink::CpalSink;
use super::ui::{NowPlaying, UiApp};

use saavy_wave::{
    io::PlaybackOptions,
    sequencing::{sequential, ArpMode, Arpeggio, EqualTemperament},
    synth::Synth,
    SampleBuffer, SynthConfig, Waveform,
};

/// Chords of the two demo arpeggios
const LEAD: [&str; 5] = ["C3", "E3", "G3", "B3", "C4"];
const BASS: [&str; 5] = ["E2", "E3", "G3", "B3", "C4"];

/// Channel the demo signal is assigned to
const DEMO_CHANNEL: usize = 0;

/// Scope samples buffered between the audio callback and the UI
const SCOPE_CAPACITY: usize = 8192;

#[derive(Debug, Clone, Copy)]
pub struct DemoSettings {
    pub shape: Waveform,
    pub mode: ArpMode,
    pub note_duration: f32,
    pub repeat: usize,
}

/// Both arpeggios, each repeated, one after the other.
pub fn render_demo(demo: &DemoSettings, sample_rate: u32) -> saavy_wave::Result<SampleBuffer> {
    let table = EqualTemperament::default();

    let mut parts = Vec::with_capacity(2);
    for chord in [LEAD, BASS] {
        let pass = Arpeggio::new(chord, demo.shape, demo.mode, demo.note_duration)
            .render(&table, sample_rate)?;
        parts.push(sequential(&[pass], demo.repeat)?);
    }
    sequential(&parts, 1)
}

pub struct WaveApp {
    config: SynthConfig,
    demo: DemoSettings,
}

impl WaveApp {
    pub fn new(config: SynthConfig, demo: DemoSettings) -> Self {
        Self { config, demo }
    }

    fn build_synth(&self, sink: CpalSink) -> EyreResult<(Synth<CpalSink>, f64)> {
        let signal = render_demo(&self.demo, self.config.sample_rate)
            .wrap_err("failed to render demo arpeggios")?;
        let seconds = signal.duration();

        let mut synth = Synth::new(&self.config, sink)?;
        synth.assign(&signal, DEMO_CHANNEL)?;
        tracing::info!(seconds, shape = %self.demo.shape, mode = %self.demo.mode, "demo ready");
        Ok((synth, seconds))
    }

    /// Play the demo once through, blocking until it finishes.
    pub fn play_once(self) -> EyreResult<()> {
        let sink = CpalSink::new(None)?;
        let (mut synth, seconds) = self.build_synth(sink)?;

        println!(
            "Playing {} {} arpeggios ({:.2}s)...",
            self.demo.mode, self.demo.shape, seconds
        );
        synth.play(DEMO_CHANNEL, PlaybackOptions::default().blocking(true))?;
        synth.halt()?;
        Ok(())
    }

    /// Loop the demo under the terminal UI until the user quits.
    pub fn run(self) -> EyreResult<()> {
        let (producer, consumer) = RingBuffer::<f32>::new(SCOPE_CAPACITY);
        let sink = CpalSink::new(Some(producer))?;
        let device_rate = sink.device_rate();
        let (mut synth, seconds) = self.build_synth(sink)?;

        synth.play(DEMO_CHANNEL, PlaybackOptions::default().looping(true))?;

        let now_playing = NowPlaying {
            shape: self.demo.shape,
            mode: self.demo.mode,
            channel: DEMO_CHANNEL,
            sample_rate: self.config.sample_rate,
            device_rate,
            seconds,
        };

        let mut terminal = ratatui::init();
        let result = UiApp::new(consumer, synth, now_playing).run(&mut terminal);
        ratatui::restore();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saavy_wave::dsp::oscillator::sample_count;

    #[test]
    fn demo_is_two_repeated_passes() {
        let demo = DemoSettings {
            shape: Waveform::Sawtooth,
            mode: ArpMode::UpDown,
            note_duration: 0.175,
            repeat: 4,
        };
        let out = render_demo(&demo, 44_100).unwrap();

        let note = sample_count(0.175, 44_100);
        assert_eq!(out.len(), 2 * 4 * 8 * note);
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
    }
}
