use crate::dsp::buffer::SampleBuffer;
use crate::error::{Result, SynthError};

/// Join finished buffers end to end and tile the result.
///
/// Parts are copied in as given; nothing is mixed or
/// resampled, so every part must already be at the sequence's sample rate.
#[derive(Debug, Clone)]
pub struct Sequential {
    sample_rate: u32,
    parts: Vec<SampleBuffer>,
    repeat: usize,
    name: Option<String>,
}

impl Sequential {
    /// Start an empty sequence at `sample_rate`.
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            parts: Vec::new(),
            repeat: 1,
            name: None,
        }
    }

    /// Append a part after everything added so far.
    pub fn then(mut self, part: &SampleBuffer) -> Self {
        self.parts.push(part.clone());
        self
    }

    /// Play the whole sequence `times` times (0 renders an empty buffer).
    pub fn repeat(mut self, times: usize) -> Self {
        self.repeat = times;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Total length in samples of the rendered sequence.
    pub fn len(&self) -> usize {
        self.parts.iter().map(SampleBuffer::len).sum::<usize>() * self.repeat
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the sequence into one buffer.
    pub fn build(&self) -> Result<SampleBuffer> {
        if let Some(part) = self.parts.iter().find(|p| p.sample_rate != self.sample_rate) {
            return Err(SynthError::InvalidInput(format!(
                "cannot sequence a {} Hz part into a {} Hz sequence",
                part.sample_rate, self.sample_rate
            )));
        }

        let mut once = Vec::with_capacity(self.len() / self.repeat.max(1));
        for part in &self.parts {
            once.extend_from_slice(&part.samples);
        }

        let mut samples = Vec::with_capacity(self.len());
        for _ in 0..self.repeat {
            samples.extend_from_slice(&once);
        }

        tracing::trace!(
            name = self.name.as_deref().unwrap_or("<unnamed>"),
            parts = self.parts.len(),
            repeat = self.repeat,
            samples = samples.len(),
            "built sequence"
        );
        Ok(SampleBuffer::from_samples(samples, self.sample_rate))
    }
}

/// Concatenate `parts` in order, `repeat` times over.
///
/// The sample rate is taken from the first part; an empty list renders an
/// empty buffer at the crate's default rate.
pub fn sequential(parts: &[SampleBuffer], repeat: usize) -> Result<SampleBuffer> {
    let sample_rate = parts
        .first()
        .map(|p| p.sample_rate)
        .unwrap_or(crate::DEFAULT_SAMPLE_RATE);

    parts
        .iter()
        .fold(Sequential::new(sample_rate), |seq, part| seq.then(part))
        .repeat(repeat)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buf(samples: &[f32]) -> SampleBuffer {
        SampleBuffer::from_samples(samples.to_vec(), 100)
    }

    #[test]
    fn concatenates_in_order() {
        let out = sequential(&[buf(&[1.0, 2.0]), buf(&[3.0]), buf(&[4.0, 5.0])], 1).unwrap();
        assert_eq!(out.samples, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(out.sample_rate, 100);
    }

    #[test]
    fn repeat_tiles_the_whole_sequence() {
        let seq = Sequential::new(100)
            .then(&buf(&[1.0]))
            .then(&buf(&[2.0]))
            .repeat(3)
            .named("pulse");
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.name(), Some("pulse"));
        assert_eq!(
            seq.build().unwrap().samples,
            vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]
        );
    }

    #[test]
    fn empty_and_zero_repeat_render_nothing() {
        assert!(sequential(&[], 4).unwrap().is_empty());
        assert!(sequential(&[buf(&[1.0])], 0).unwrap().is_empty());
    }

    #[test]
    fn rejects_mixed_sample_rates() {
        let a = buf(&[1.0]);
        let b = SampleBuffer::from_samples(vec![1.0], 200);
        assert!(matches!(
            sequential(&[a, b], 1),
            Err(SynthError::InvalidInput(_))
        ));
    }
}
