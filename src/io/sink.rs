use crate::dsp::buffer::SampleBuffer;
use crate::error::Result;

/// How a buffer should be played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackOptions {
    /// Start over from the first sample when the buffer runs out
    pub looping: bool,
    /// Return only once playback has finished (never, for a looping buffer,
    /// until the sink is stopped from elsewhere)
    pub blocking: bool,
}

impl PlaybackOptions {
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn blocking(mut self, blocking: bool) -> Self {
        self.blocking = blocking;
        self
    }
}

/// Something that can play a finished buffer.
///
/// Starting a new buffer replaces whatever the sink was playing.
pub trait AudioSink {
    fn play(&mut self, buffer: &SampleBuffer, options: PlaybackOptions) -> Result<()>;

    /// Halt playback. Stopping an idle sink is not an error.
    fn stop(&mut self) -> Result<()>;
}

impl<S: AudioSink + ?Sized> AudioSink for Box<S> {
    fn play(&mut self, buffer: &SampleBuffer, options: PlaybackOptions) -> Result<()> {
        (**self).play(buffer, options)
    }

    fn stop(&mut self) -> Result<()> {
        (**self).stop()
    }
}

/// A sink that keeps everything it is asked to play.
///
/// Used for offline rendering and in tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    played: Vec<(SampleBuffer, PlaybackOptions)>,
    playing: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything played so far, oldest first.
    pub fn played(&self) -> &[(SampleBuffer, PlaybackOptions)] {
        &self.played
    }

    pub fn last(&self) -> Option<&SampleBuffer> {
        self.played.last().map(|(buffer, _)| buffer)
    }

    /// Whether a buffer is "playing": set by `play` unless it was a blocking
    /// one-shot, cleared by `stop`.
    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

impl AudioSink for MemorySink {
    fn play(&mut self, buffer: &SampleBuffer, options: PlaybackOptions) -> Result<()> {
        self.played.push((buffer.clone(), options));
        self.playing = options.looping || !options.blocking;
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.playing = false;
        Ok(())
    }
}
