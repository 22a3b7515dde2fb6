use std::f64::consts::{PI, TAU};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::buffer::SampleBuffer;
use crate::error::{Result, SynthError};
use crate::sequencing::notes::{FrequencyTable, Pitch};

/*
Waveform Generation
===================

Every waveform here is a pure function of phase with period 2π, evaluated on
a fixed time grid:

    t[i]     = i / sample_rate            for i in 0..floor(duration * sample_rate)
    phase[i] = 2π * frequency * t[i]

  Sawtooth   rising ramp, -1 at phase 0, approaching +1 just before 2π
  Triangle   2 * |sawtooth| - 1  (peaks at phase 0, trough at π)
  Square     +1 for the first half of the period, -1 for the second
  Sine       sin(phase)

All outputs stay inside [-1, 1]. Nothing is cached between calls: the shape
is an enum value handed to `generate`, so two threads rendering different
notes never see each other's signal.

The phase is reduced to the fractional cycle count in f64 before the shape is
evaluated, and only the finished sample is narrowed to f32. With long buffers
`2π * f * i / sr` gets large, and f32 would smear the fractional part that
actually determines the sample.
*/

/// The periodic shapes the generator knows how to render.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Waveform {
    Sawtooth,
    Triangle,
    Square,
    Sine,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Sawtooth,
        Waveform::Triangle,
        Waveform::Square,
        Waveform::Sine,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sawtooth => "sawtooth",
            Waveform::Triangle => "triangle",
            Waveform::Square => "square",
            Waveform::Sine => "sine",
        }
    }

    /// Evaluate the shape at an arbitrary phase (radians).
    #[inline]
    pub fn value_at(&self, phase: f64) -> f64 {
        match self {
            Waveform::Sawtooth => sawtooth(phase),
            Waveform::Triangle => 2.0 * sawtooth(phase).abs() - 1.0,
            Waveform::Square => {
                if phase.rem_euclid(TAU) < PI {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Sine => phase.sin(),
        }
    }
}

impl FromStr for Waveform {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sawtooth" | "saw" => Ok(Waveform::Sawtooth),
            "triangle" => Ok(Waveform::Triangle),
            "square" => Ok(Waveform::Square),
            "sine" => Ok(Waveform::Sine),
            _ => Err(SynthError::UnknownShape(s.to_string())),
        }
    }
}

impl std::fmt::Display for Waveform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[inline]
fn sawtooth(phase: f64) -> f64 {
    phase.rem_euclid(TAU) / PI - 1.0
}

/// Number of samples covering `duration` seconds at `sample_rate`.
///
/// An f32 duration such as `0.35` is stored a hair under the decimal it was
/// written as, so a sub-sample tolerance is added before flooring.
pub fn sample_count(duration: f32, sample_rate: u32) -> usize {
    (duration as f64 * sample_rate as f64 + 1e-3).floor().max(0.0) as usize
}

/// Render `duration` seconds of `shape` at `frequency` Hz.
pub fn generate(
    shape: Waveform,
    frequency: f32,
    duration: f32,
    sample_rate: u32,
) -> Result<SampleBuffer> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(SynthError::InvalidFrequency(format!(
            "{} Hz is not a positive frequency",
            frequency
        )));
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(SynthError::InvalidInput(format!(
            "duration must be positive, got {} s",
            duration
        )));
    }
    if sample_rate == 0 {
        return Err(SynthError::InvalidInput(
            "sample rate must be positive".to_string(),
        ));
    }

    let len = sample_count(duration, sample_rate);
    let cycles_per_sample = frequency as f64 / sample_rate as f64;
    let samples = (0..len)
        .map(|i| {
            let cycles = cycles_per_sample * i as f64;
            shape.value_at(TAU * cycles.fract()) as f32
        })
        .collect();

    Ok(SampleBuffer::from_samples(samples, sample_rate))
}

/// Render a note given either directly in Hz or as a name looked up in `table`.
pub fn generate_pitch(
    shape: Waveform,
    pitch: &Pitch,
    table: &dyn FrequencyTable,
    duration: f32,
    sample_rate: u32,
) -> Result<SampleBuffer> {
    let frequency = pitch.resolve(table)?;
    generate(shape, frequency, duration, sample_rate)
}
