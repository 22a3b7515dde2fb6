use crate::dsp::buffer::SampleBuffer;
use crate::dsp::envelope::Envelope;
use crate::error::Result;
use crate::synth::voice::Voice;

/// One output slot of a [`Synth`](crate::synth::Synth).
///
/// A channel carries the envelope its notes are rendered with and the signal
/// it will play. Changing the envelope does not touch a signal that has
/// already been assigned.
#[derive(Debug, Clone)]
pub struct Channel {
    index: usize,
    voice: Voice,
    signal: Option<SampleBuffer>,
}

impl Channel {
    pub fn new(index: usize, envelope: Envelope, sample_rate: u32) -> Self {
        Self {
            index,
            voice: Voice::new(envelope, sample_rate),
            signal: None,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn sample_rate(&self) -> u32 {
        self.voice.sample_rate()
    }

    pub fn envelope(&self) -> &Envelope {
        self.voice.envelope()
    }

    /// Note renderer using this channel's envelope.
    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    /// Replace the envelope; on `Err` the old one stays in place.
    pub fn set_envelope(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) -> Result<()> {
        let envelope = Envelope::adsr(attack, decay, sustain, release)?;
        self.voice = Voice::new(envelope, self.voice.sample_rate());
        Ok(())
    }

    pub fn signal(&self) -> Option<&SampleBuffer> {
        self.signal.as_ref()
    }

    pub fn set_signal(&mut self, signal: SampleBuffer) {
        self.signal = Some(signal);
    }

    pub fn clear(&mut self) -> Option<SampleBuffer> {
        self.signal.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;

    #[test]
    fn set_envelope_rebuilds_the_voice() {
        let mut channel = Channel::new(0, Envelope::default(), 1_000);
        channel.set_envelope(0.0, 0.0, 1.0, 0.0).unwrap();
        assert_eq!(channel.envelope(), &Envelope::passthrough());

        let note = channel.voice().sine(250.0, 0.1).unwrap();
        assert_eq!(note.len(), 100);
    }

    #[test]
    fn bad_envelope_keeps_the_old_one() {
        let mut channel = Channel::new(2, Envelope::default(), 1_000);
        let err = channel.set_envelope(0.1, 0.1, 7.0, 0.1).unwrap_err();
        assert!(matches!(err, SynthError::InvalidParameters(_)));
        assert_eq!(channel.envelope(), &Envelope::default());
        assert_eq!(channel.index(), 2);
    }
}
