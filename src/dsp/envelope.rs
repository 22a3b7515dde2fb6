use std::ops::Range;

use crate::dsp::buffer::SampleBuffer;
use crate::error::{Result, SynthError};

/*
ADSR Envelope Shaping
=====================

This module shapes the amplitude of a finished, fixed-length buffer with an
attack/decay/sustain/release curve. There is no gate and no per-sample state:
the whole note is already rendered, so the envelope only has to decide which
stage every sample index belongs to and multiply it by that stage's gain.

Vocabulary
----------

  segment     A contiguous run of sample indices governed by one stage.

  boundary    The sample index where one segment hands over to the next.

  ramp        The normalized position `u` inside a segment. It runs linearly
              from -1.0 at the first sample to 0.0 at the last one.

  gain        The multiplier applied to a sample. Each index is multiplied by
              exactly one stage's gain, never by two.


The Shape: Curved Segments
--------------------------

  Gain
    1.0 ┐      _.-¯¯-._
        │    .´        `-._
    S   │   /              `¯¯¯¯¯¯¯¯¯¯¯¯¯¯¯\
        │  /                                \
    0.0 └-´──────────────────────────────────`-._──→ Samples
        | Attack |  Decay  |     Sustain     | Release |

  Attack    1 - u²                   0 → 1, gentle start, steep finish
  Decay     u² * (1 - S) + S         1 → S
  Sustain   S                        flat
  Release   u⁴ * S                   S → 0, falls fast then tails off quietly

Every stage starts at the value the previous one ended on (1, S, S), so an
unclipped envelope never introduces a step into the carrier.


The Math: Time to Boundaries
----------------------------

    attack_end    = round(attack  * sample_rate)
    decay_end     = attack_end + round(decay * sample_rate)
    release_start = total - round(release * sample_rate)

Release is carved out of the end of the buffer; it does not extend it. Callers
that want a release tail after the held note (see `synth::voice`) render a
buffer that is `release` seconds longer to begin with.


Clipping
--------

When the stage times add up to more than the buffer, boundaries are clamped to
`[0, total]` and earlier stages win: attack, then decay, keep their samples
and the release segment shrinks. A clipped release still ends at zero. It is
evaluated over its nominal ramp and only the tail that fits is applied, so the
fade-out keeps its speed and the last sample is silent. An attack or decay that
runs off the end of the buffer is simply cut short.

No index outside `0..total` is ever touched, whatever the parameters.
*/

/// The stage governing a given sample index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Decay,
    Sustain,
    Release,
}

/// Sample-index layout of the four stages for one buffer length.
///
/// Derived on demand from an [`Envelope`]; never stored alongside a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments {
    pub total: usize,
    pub attack_end: usize,
    pub decay_end: usize,
    pub release_start: usize,
    /// Unclipped sample counts, these set the ramp resolution.
    pub attack_len: usize,
    pub decay_len: usize,
    pub release_len: usize,
}

impl Segments {
    pub fn range(&self, stage: EnvelopeStage) -> Range<usize> {
        match stage {
            EnvelopeStage::Attack => 0..self.attack_end,
            EnvelopeStage::Decay => self.attack_end..self.decay_end,
            EnvelopeStage::Sustain => self.decay_end..self.release_start,
            EnvelopeStage::Release => self.release_start..self.total,
        }
    }

    /// Which stage `index` falls in, `None` past the end of the buffer.
    pub fn stage_at(&self, index: usize) -> Option<EnvelopeStage> {
        if index >= self.total {
            None
        } else if index < self.attack_end {
            Some(EnvelopeStage::Attack)
        } else if index < self.decay_end {
            Some(EnvelopeStage::Decay)
        } else if index < self.release_start {
            Some(EnvelopeStage::Sustain)
        } else {
            Some(EnvelopeStage::Release)
        }
    }

    /// Ramp samples of the release curve that were clipped off its head.
    fn release_skip(&self) -> usize {
        self.release_len - (self.total - self.release_start)
    }
}

/// Position `k` of `n` on a linear ramp from -1.0 to 0.0 (inclusive).
#[inline]
fn ramp(k: usize, n: usize) -> f32 {
    if n <= 1 {
        return -1.0;
    }
    -1.0 + k as f32 / (n - 1) as f32
}

#[inline]
fn seconds_to_samples(seconds: f32, sample_rate: u32) -> usize {
    (seconds as f64 * sample_rate as f64).round() as usize
}

/// Attack/decay/sustain/release amplitude shaper.
///
/// Holds only its four parameters, so a single envelope can shape any number
/// of buffers, at any sample rate, from any number of threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    attack_time: f32,   // seconds ramping 0 → 1
    decay_time: f32,    // seconds ramping 1 → sustain
    sustain_level: f32, // gain held between decay and release (0.0 - 1.0)
    release_time: f32,  // seconds ramping sustain → 0, taken from the buffer's end
}

impl Envelope {
    /// Build an envelope, rejecting negative or non-finite times and sustain
    /// levels outside `[0, 1]`.
    pub fn adsr(attack: f32, decay: f32, sustain: f32, release: f32) -> Result<Self> {
        for (name, value) in [("attack", attack), ("decay", decay), ("release", release)] {
            if !value.is_finite() || value < 0.0 {
                return Err(SynthError::InvalidParameters(format!(
                    "{} time must be a non-negative number of seconds, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=1.0).contains(&sustain) {
            return Err(SynthError::InvalidParameters(format!(
                "sustain level must lie in [0, 1], got {}",
                sustain
            )));
        }

        Ok(Self {
            attack_time: attack,
            decay_time: decay,
            sustain_level: sustain,
            release_time: release,
        })
    }

    /// An envelope that leaves every buffer unchanged.
    pub fn passthrough() -> Self {
        Self {
            attack_time: 0.0,
            decay_time: 0.0,
            sustain_level: 1.0,
            release_time: 0.0,
        }
    }

    pub fn attack_time(&self) -> f32 {
        self.attack_time
    }

    pub fn decay_time(&self) -> f32 {
        self.decay_time
    }

    pub fn sustain_level(&self) -> f32 {
        self.sustain_level
    }

    pub fn release_time(&self) -> f32 {
        self.release_time
    }

    /// Lay the four stages out over a buffer of `total` samples.
    pub fn segments(&self, total: usize, sample_rate: u32) -> Segments {
        let attack_len = seconds_to_samples(self.attack_time, sample_rate);
        let decay_len = seconds_to_samples(self.decay_time, sample_rate);
        let release_len = seconds_to_samples(self.release_time, sample_rate);

        let attack_end = attack_len.min(total);
        let decay_end = attack_end.saturating_add(decay_len).min(total);
        let release_start = total.saturating_sub(release_len).max(decay_end);

        Segments {
            total,
            attack_end,
            decay_end,
            release_start,
            attack_len,
            decay_len,
            release_len,
        }
    }

    /// Gain applied to sample `index` of a `total`-sample buffer.
    pub fn gain_at(&self, index: usize, total: usize, sample_rate: u32) -> f32 {
        let segments = self.segments(total, sample_rate);
        match segments.stage_at(index) {
            None => 0.0,
            Some(stage) => self.stage_gain(stage, index, &segments),
        }
    }

    #[inline]
    fn stage_gain(&self, stage: EnvelopeStage, index: usize, segments: &Segments) -> f32 {
        let s = self.sustain_level;
        match stage {
            EnvelopeStage::Attack => {
                let u = ramp(index, segments.attack_len);
                1.0 - u * u
            }
            EnvelopeStage::Decay => {
                let u = ramp(index - segments.attack_end, segments.decay_len);
                u * u * (1.0 - s) + s
            }
            EnvelopeStage::Sustain => s,
            EnvelopeStage::Release => {
                let k = index - segments.release_start + segments.release_skip();
                let u = ramp(k, segments.release_len);
                u * u * u * u * s
            }
        }
    }

    /// Shape `samples` in place, treating them as recorded at `sample_rate`.
    pub fn apply_to(&self, samples: &mut [f32], sample_rate: u32) {
        let segments = self.segments(samples.len(), sample_rate);

        for stage in [
            EnvelopeStage::Attack,
            EnvelopeStage::Decay,
            EnvelopeStage::Sustain,
            EnvelopeStage::Release,
        ] {
            let range = segments.range(stage);
            let start = range.start;
            for (offset, sample) in samples[range].iter_mut().enumerate() {
                *sample *= self.stage_gain(stage, start + offset, &segments);
            }
        }
    }

    /// Shape a buffer in place using the rate it carries.
    pub fn apply(&self, buffer: &mut SampleBuffer) {
        let sample_rate = buffer.sample_rate;
        self.apply_to(&mut buffer.samples, sample_rate);
    }

    /// Consume a buffer and hand it back shaped.
    pub fn shaped(&self, mut buffer: SampleBuffer) -> SampleBuffer {
        self.apply(&mut buffer);
        buffer
    }

    /// Write the envelope curve itself (the per-sample gains) into `out`.
    pub fn render(&self, out: &mut [f32], sample_rate: u32) {
        out.fill(1.0);
        self.apply_to(out, sample_rate);
    }
}

impl Default for Envelope {
    fn default() -> Self {
        Self {
            attack_time: 0.2,
            decay_time: 0.2,
            sustain_level: 0.5,
            release_time: 0.2,
        }
    }
}

/// Validate the parameters, then shape `samples` in place.
///
/// On `Err` the samples are untouched.
pub fn apply(
    samples: &mut [f32],
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
    sample_rate: u32,
) -> Result<()> {
    let envelope = Envelope::adsr(attack, decay, sustain, release)?;
    envelope.apply_to(samples, sample_rate);
    Ok(())
}
