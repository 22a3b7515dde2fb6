use crate::error::{Result, SynthError};

/// A finite, pre-rendered mono signal together with the rate it was sampled at.
///
/// Sample `i` sits at time `i / sample_rate` seconds. The rate travels with the
/// samples so downstream stages (envelope, smoothing, playback) never have to
/// be told it separately.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl SampleBuffer {
    pub fn from_samples(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// `len` samples of digital silence.
    pub fn silence(len: usize, sample_rate: u32) -> Self {
        Self::from_samples(vec![0.0; len], sample_rate)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length of the signal in seconds.
    pub fn duration(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f32> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }

    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }

    /// Multiply every sample by `gain`.
    pub fn scaled(mut self, gain: f32) -> Self {
        for sample in self.samples.iter_mut() {
            *sample *= gain;
        }
        self
    }

    /// Largest absolute sample value (0.0 for an empty buffer).
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    /// Append `other` to the end of this buffer.
    ///
    /// Both buffers must share a sample rate; mixing rates would silently
    /// change the pitch and timing of the appended part.
    pub fn append(&mut self, other: &SampleBuffer) -> Result<()> {
        if other.sample_rate != self.sample_rate {
            return Err(SynthError::InvalidInput(format!(
                "cannot join a {} Hz buffer onto a {} Hz buffer",
                other.sample_rate, self.sample_rate
            )));
        }
        self.samples.extend_from_slice(&other.samples);
        Ok(())
    }
}

impl AsRef<[f32]> for SampleBuffer {
    fn as_ref(&self) -> &[f32] {
        &self.samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_follows_length_and_rate() {
        let buffer = SampleBuffer::silence(22_050, 44_100);
        assert!((buffer.duration() - 0.5).abs() < 1e-12);
        assert_eq!(buffer.len(), 22_050);
    }

    #[test]
    fn scaled_multiplies_every_sample() {
        let buffer = SampleBuffer::from_samples(vec![1.0, -0.5, 0.25], 8_000).scaled(0.5);
        assert_eq!(buffer.samples, vec![0.5, -0.25, 0.125]);
        assert!((buffer.peak() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn append_rejects_mismatched_rates() {
        let mut a = SampleBuffer::silence(4, 44_100);
        let b = SampleBuffer::silence(4, 48_000);

        let err = a.append(&b).unwrap_err();
        assert!(matches!(err, SynthError::InvalidInput(_)));
        assert_eq!(a.len(), 4, "failed append must not grow the buffer");
    }

    #[test]
    fn append_joins_in_order() {
        let mut a = SampleBuffer::from_samples(vec![1.0, 2.0], 100);
        let b = SampleBuffer::from_samples(vec![3.0], 100);
        a.append(&b).unwrap();
        assert_eq!(a.samples, vec![1.0, 2.0, 3.0]);
    }
}
