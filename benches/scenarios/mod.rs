//! Whole-render scenarios.
//!
//! These model what the `saavy-wave` binary does before playback starts.

mod arpeggio;

pub use arpeggio::bench_arpeggio;
