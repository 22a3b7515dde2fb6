use std::collections::HashMap;

use crate::error::{Result, SynthError};

/*
Note Names and Frequencies
==========================

Notes are written in scientific pitch notation: a letter, optional accidentals
and an octave number. Middle C is C4 and the tuning reference A4 = 440 Hz.

    C3    E3    G3    B3    C4        naturals
    F#4   Fs4   Gb4                   the same pitch three ways
    C-1                               MIDI note 0

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Where semitone: C=0, D=2, E=4, F=5, G=7, A=9, B=11, each '#'/'s' adds one
and each 'b' takes one away.

Two tables are provided:
  EqualTemperament  computes any note from the reference pitch
  NoteTable         an explicit name → Hz map, e.g. loaded from a CSV file
*/

/// Anything that can turn a note name into a frequency in Hz.
pub trait FrequencyTable {
    fn resolve(&self, note: &str) -> Option<f32>;
}

/// Twelve-tone equal temperament around a reference A4.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqualTemperament {
    pub reference_hz: f32,
}

impl EqualTemperament {
    pub fn new(reference_hz: f32) -> Self {
        Self { reference_hz }
    }

    pub fn midi_to_freq(&self, note: i32) -> f32 {
        self.reference_hz * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
    }
}

impl Default for EqualTemperament {
    fn default() -> Self {
        Self::new(440.0)
    }
}

impl FrequencyTable for EqualTemperament {
    fn resolve(&self, note: &str) -> Option<f32> {
        note_number(note).map(|n| self.midi_to_freq(n))
    }
}

/// MIDI note number for a name like `C4`, `F#2` or `Bb-1`.
///
/// Numbers outside the MIDI range are allowed; only the syntax is checked.
pub fn note_number(name: &str) -> Option<i32> {
    let name = name.trim();
    let mut chars = name.chars();
    let letter = chars.next()?;
    let mut semitone = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest = chars.as_str();
    let octave_at = rest
        .find(|c: char| c == '-' || c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (accidentals, octave) = rest.split_at(octave_at);
    for accidental in accidentals.chars() {
        match accidental {
            '#' | 's' => semitone += 1,
            'b' => semitone -= 1,
            _ => return None,
        }
    }

    let octave: i32 = octave.parse().ok()?;
    Some(12 * (octave + 1) + semitone)
}

/// Frequency of a MIDI note number at A4 = 440 Hz.
pub fn midi_note_to_freq(note: u8) -> f32 {
    EqualTemperament::default().midi_to_freq(note as i32)
}

/// An explicit note-name → frequency map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NoteTable {
    entries: HashMap<String, f32>,
}

impl NoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, note: impl Into<String>, frequency: f32) {
        self.entries.insert(note.into(), frequency);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse `note,frequency` rows. A leading header row and blank lines are
    /// skipped; any other row that does not parse is an error.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut table = Self::new();

        for (line_no, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut fields = line.split(',').map(str::trim);
            let (Some(note), Some(freq), None) = (fields.next(), fields.next(), fields.next())
            else {
                return Err(SynthError::InvalidInput(format!(
                    "line {}: expected 'note,frequency', got '{}'",
                    line_no + 1,
                    line
                )));
            };

            match freq.parse::<f32>() {
                Ok(hz) if hz.is_finite() && hz > 0.0 => table.insert(note, hz),
                _ if line_no == 0 && table.is_empty() => continue, // header
                _ => {
                    return Err(SynthError::InvalidInput(format!(
                        "line {}: '{}' is not a positive frequency",
                        line_no + 1,
                        freq
                    )))
                }
            }
        }

        Ok(table)
    }
}

impl FrequencyTable for NoteTable {
    fn resolve(&self, note: &str) -> Option<f32> {
        self.entries.get(note.trim()).copied()
    }
}

impl<T: FrequencyTable + ?Sized> FrequencyTable for &T {
    fn resolve(&self, note: &str) -> Option<f32> {
        (**self).resolve(note)
    }
}

/// A pitch given either directly in Hz or by name.
#[derive(Debug, Clone, PartialEq)]
pub enum Pitch {
    Hz(f32),
    Note(String),
}

impl Pitch {
    /// The pitch as a positive frequency, looking names up in `table`.
    pub fn resolve(&self, table: &dyn FrequencyTable) -> Result<f32> {
        let hz = match self {
            Pitch::Hz(hz) => *hz,
            Pitch::Note(name) => table.resolve(name).ok_or_else(|| {
                SynthError::InvalidFrequency(format!("no frequency known for note '{}'", name))
            })?,
        };

        if !hz.is_finite() || hz <= 0.0 {
            return Err(SynthError::InvalidFrequency(format!(
                "{} Hz is not a positive frequency",
                hz
            )));
        }
        Ok(hz)
    }
}

impl std::fmt::Display for Pitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Pitch::Hz(hz) => write!(f, "{}Hz", hz),
            Pitch::Note(name) => f.write_str(name),
        }
    }
}

impl From<f32> for Pitch {
    fn from(hz: f32) -> Self {
        Pitch::Hz(hz)
    }
}

impl From<&str> for Pitch {
    fn from(name: &str) -> Self {
        Pitch::Note(name.to_string())
    }
}

impl From<String> for Pitch {
    fn from(name: String) -> Self {
        Pitch::Note(name)
    }
}
