/// Errors raised by waveform generation, envelope shaping, smoothing and
/// playback routing.
///
/// Every operation validates its arguments before touching a buffer, so an
/// `Err` never leaves a partially transformed signal behind.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    /// Note name missing from the frequency table, or a non-positive frequency
    InvalidFrequency(String),
    /// Negative/non-finite envelope timing or sustain level outside [0, 1]
    InvalidParameters(String),
    /// Malformed buffer or smoothing window arguments
    InvalidInput(String),
    /// Waveform name not one of sawtooth, triangle, square, sine
    UnknownShape(String),
    /// Window name not one of flat, hanning, hamming, bartlett, blackman
    UnknownWindow(String),
    /// Arpeggio mode not one of up, down, updown
    UnknownMode(String),
    /// Channel index outside the synth's channel bank
    UnknownChannel(usize),
    /// Channel has no signal assigned yet
    EmptyChannel(usize),
    /// The audio sink failed to start or stop playback
    Playback(String),
}

impl std::fmt::Display for SynthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SynthError::InvalidFrequency(detail) => write!(f, "Invalid frequency: {}", detail),
            SynthError::InvalidParameters(detail) => {
                write!(f, "Invalid envelope parameters: {}", detail)
            }
            SynthError::InvalidInput(detail) => write!(f, "Invalid input: {}", detail),
            SynthError::UnknownShape(name) => write!(
                f,
                "Unknown waveform '{}': expected one of sawtooth, triangle, square, sine",
                name
            ),
            SynthError::UnknownWindow(name) => write!(
                f,
                "Unknown window '{}': expected one of flat, hanning, hamming, bartlett, blackman",
                name
            ),
            SynthError::UnknownMode(name) => write!(
                f,
                "Unknown arpeggio mode '{}': expected one of up, down, updown",
                name
            ),
            SynthError::UnknownChannel(channel) => write!(f, "No channel {}", channel),
            SynthError::EmptyChannel(channel) => {
                write!(f, "Channel {} has no signal assigned", channel)
            }
            SynthError::Playback(detail) => write!(f, "Playback failed: {}", detail),
        }
    }
}

impl std::error::Error for SynthError {}

pub type Result<T> = std::result::Result<T, SynthError>;
