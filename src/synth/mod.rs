// Purpose: note rendering, channel assignment and playback routing
// This layer sits above the dsp primitives and never does sample math itself

pub mod bank;
pub mod channel;
pub mod voice;

pub use bank::Synth;
pub use channel::Channel;
pub use voice::Voice;
