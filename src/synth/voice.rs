use crate::dsp::buffer::SampleBuffer;
use crate::dsp::envelope::Envelope;
use crate::dsp::oscillator::{self, Waveform};
use crate::error::{Result, SynthError};
use crate::sequencing::notes::{FrequencyTable, Pitch};

/// Renders single enveloped notes.
///
/// A key held for `key_duration` seconds produces a buffer of
/// `key_duration + release` seconds: the envelope carves its release out of
/// the end of that buffer, so the tail rings on after the key is let go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    envelope: Envelope,
    sample_rate: u32,
}

impl Voice {
    pub fn new(envelope: Envelope, sample_rate: u32) -> Self {
        Self {
            envelope,
            sample_rate,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Total seconds rendered for a key held `key_duration` seconds.
    pub fn note_length(&self, key_duration: f32) -> f32 {
        key_duration + self.envelope.release_time()
    }

    pub fn render(&self, shape: Waveform, frequency: f32, key_duration: f32) -> Result<SampleBuffer> {
        if !key_duration.is_finite() || key_duration < 0.0 {
            return Err(SynthError::InvalidInput(format!(
                "key duration must be a non-negative number of seconds, got {}",
                key_duration
            )));
        }

        let buffer = oscillator::generate(
            shape,
            frequency,
            self.note_length(key_duration),
            self.sample_rate,
        )?;
        Ok(self.envelope.shaped(buffer))
    }

    pub fn render_pitch(
        &self,
        shape: Waveform,
        pitch: &Pitch,
        table: &dyn FrequencyTable,
        key_duration: f32,
    ) -> Result<SampleBuffer> {
        let frequency = pitch.resolve(table)?;
        self.render(shape, frequency, key_duration)
    }

    pub fn sawtooth(&self, frequency: f32, key_duration: f32) -> Result<SampleBuffer> {
        self.render(Waveform::Sawtooth, frequency, key_duration)
    }

    pub fn triangle(&self, frequency: f32, key_duration: f32) -> Result<SampleBuffer> {
        self.render(Waveform::Triangle, frequency, key_duration)
    }

    pub fn square(&self, frequency: f32, key_duration: f32) -> Result<SampleBuffer> {
        self.render(Waveform::Square, frequency, key_duration)
    }

    pub fn sine(&self, frequency: f32, key_duration: f32) -> Result<SampleBuffer> {
        self.render(Waveform::Sine, frequency, key_duration)
    }
}
