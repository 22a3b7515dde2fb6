#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::envelope::Envelope;
use crate::dsp::smoothing::Smoothing;
use crate::error::{Result, SynthError};
use crate::DEFAULT_SAMPLE_RATE;

/// Envelope timings as they appear in a config file.
///
/// Plain numbers, validated when turned into an [`Envelope`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvelopeConfig {
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
}

impl EnvelopeConfig {
    pub fn to_envelope(&self) -> Result<Envelope> {
        Envelope::adsr(self.attack, self.decay, self.sustain, self.release)
    }
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        let env = Envelope::default();
        Self {
            attack: env.attack_time(),
            decay: env.decay_time(),
            sustain: env.sustain_level(),
            release: env.release_time(),
        }
    }
}

impl From<Envelope> for EnvelopeConfig {
    fn from(env: Envelope) -> Self {
        Self {
            attack: env.attack_time(),
            decay: env.decay_time(),
            sustain: env.sustain_level(),
            release: env.release_time(),
        }
    }
}

/// Everything needed to set up a [`Synth`](crate::synth::Synth).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SynthConfig {
    /// Samples per second for every channel
    pub sample_rate: u32,
    /// Number of output channels in the bank
    pub channels: usize,
    /// Envelope every channel starts with
    pub envelope: EnvelopeConfig,
    /// Window applied to signals assigned to a channel (None = unsmoothed)
    pub smoothing: Option<Smoothing>,
}

impl SynthConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_channels(mut self, channels: usize) -> Self {
        self.channels = channels;
        self
    }

    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = envelope.into();
        self
    }

    pub fn with_smoothing(mut self, smoothing: Option<Smoothing>) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Check the settings hang together before anything is built from them.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(SynthError::InvalidInput(
                "sample rate must be positive".to_string(),
            ));
        }
        if self.channels == 0 {
            return Err(SynthError::InvalidInput(
                "a synth needs at least one channel".to_string(),
            ));
        }
        self.envelope.to_envelope()?;
        Ok(())
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            channels: 4,
            envelope: EnvelopeConfig::default(),
            smoothing: Some(Smoothing::default()),
        }
    }
}
