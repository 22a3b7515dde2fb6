pub mod config;
pub mod dsp; // Waveforms, envelope shaping, smoothing
pub mod error;
pub mod io;
pub mod sequencing; // Note tables, arpeggios, buffer sequencing
pub mod synth; // Voices, channels and playback routing

pub use config::SynthConfig;
pub use dsp::{Envelope, SampleBuffer, Waveform, WindowKind};
pub use error::{Result, SynthError};

pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;
