//! Offline signal generation and shaping.
//!
//! Everything in here is a pure computation over a finished, in-memory
//! buffer: no I/O, no shared state, nothing retained between calls. That makes
//! every function safe to call from any thread as long as each call works on
//! its own buffer.

/// Sample buffer value type (samples + sample rate).
pub mod buffer;
/// Attack/decay/sustain/release amplitude shaping.
pub mod envelope;
/// Periodic waveform generators.
pub mod oscillator;
/// Window-convolution smoothing for concatenated signals.
pub mod smoothing;

pub use buffer::SampleBuffer;
pub use envelope::{Envelope, EnvelopeStage, Segments};
pub use oscillator::{generate, generate_pitch, Waveform};
pub use smoothing::{smooth, Smoothing, WindowKind};
