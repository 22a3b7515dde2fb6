//! Benchmarks for the rendering primitives.

mod envelope;
mod oscillator;
mod smoothing;

pub use envelope::bench_envelope;
pub use oscillator::bench_oscillator;
pub use smoothing::bench_smoothing;
