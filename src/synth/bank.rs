use std::collections::BTreeMap;

use crate::config::SynthConfig;
use crate::dsp::buffer::SampleBuffer;
use crate::dsp::smoothing::Smoothing;
use crate::error::{Result, SynthError};
use crate::io::sink::{AudioSink, PlaybackOptions};
use crate::synth::channel::Channel;

/// A bank of numbered channels routed to one audio sink.
///
/// Signals are prepared (scaled, optionally smoothed) when they are assigned,
/// so `play` only hands a finished buffer to the sink.
pub struct Synth<S: AudioSink> {
    channels: BTreeMap<usize, Channel>,
    smoothing: Option<Smoothing>,
    sink: S,
}

impl<S: AudioSink> Synth<S> {
    pub fn new(config: &SynthConfig, sink: S) -> Result<Self> {
        config.validate()?;
        let envelope = config.envelope.to_envelope()?;

        let channels = (0..config.channels)
            .map(|n| (n, Channel::new(n, envelope, config.sample_rate)))
            .collect();

        Ok(Self {
            channels,
            smoothing: config.smoothing,
            sink,
        })
    }

    pub fn channel(&self, channel: usize) -> Result<&Channel> {
        self.channels
            .get(&channel)
            .ok_or(SynthError::UnknownChannel(channel))
    }

    pub fn channel_mut(&mut self, channel: usize) -> Result<&mut Channel> {
        self.channels
            .get_mut(&channel)
            .ok_or(SynthError::UnknownChannel(channel))
    }

    pub fn channels(&self) -> impl Iterator<Item = &Channel> {
        self.channels.values()
    }

    /// Assign `volume * smooth(signal)` to `channel`, smoothing with the
    /// configured window.
    pub fn assign(&mut self, signal: &SampleBuffer, channel: usize) -> Result<()> {
        self.set_channel(signal, channel, 1.0, self.smoothing)
    }

    /// Assign a signal to `channel`, scaled by `volume` and smoothed with
    /// `smoothing` if given. The channel keeps its old signal on `Err`.
    pub fn set_channel(
        &mut self,
        signal: &SampleBuffer,
        channel: usize,
        volume: f32,
        smoothing: Option<Smoothing>,
    ) -> Result<()> {
        if !self.channels.contains_key(&channel) {
            return Err(SynthError::UnknownChannel(channel));
        }
        if !volume.is_finite() {
            return Err(SynthError::InvalidInput(format!(
                "volume must be a finite gain, got {}",
                volume
            )));
        }

        let prepared = match smoothing {
            Some(smoothing) => smoothing.apply(signal)?,
            None => signal.clone(),
        }
        .scaled(volume);

        tracing::debug!(
            channel,
            volume,
            smoothed = smoothing.is_some(),
            samples = prepared.len(),
            "assigned channel signal"
        );
        self.channel_mut(channel)?.set_signal(prepared);
        Ok(())
    }

    /// Send `channel`'s signal to the sink.
    pub fn play(&mut self, channel: usize, options: PlaybackOptions) -> Result<()> {
        let signal = self
            .channels
            .get(&channel)
            .ok_or(SynthError::UnknownChannel(channel))?
            .signal()
            .ok_or(SynthError::EmptyChannel(channel))?;

        tracing::debug!(
            channel,
            looping = options.looping,
            blocking = options.blocking,
            seconds = signal.duration(),
            "starting playback"
        );
        self.sink.play(signal, options)
    }

    /// Stop whatever the sink is playing.
    pub fn halt(&mut self) -> Result<()> {
        tracing::debug!("halting playback");
        self.sink.stop()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
