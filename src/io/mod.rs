// Purpose - the boundary to whatever actually makes sound

pub mod sink;

pub use sink::{AudioSink, MemorySink, PlaybackOptions};
