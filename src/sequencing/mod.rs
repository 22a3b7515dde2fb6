pub mod arpeggio;
pub mod notes;
pub mod sequential;

pub use arpeggio::{ArpMode, Arpeggio};
pub use notes::{EqualTemperament, FrequencyTable, NoteTable, Pitch};
pub use sequential::{sequential, Sequential};
