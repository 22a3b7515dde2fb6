use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::buffer::SampleBuffer;
use crate::dsp::envelope::Envelope;
use crate::dsp::oscillator::{self, Waveform};
use crate::error::{Result, SynthError};
use crate::sequencing::notes::{FrequencyTable, Pitch};
use crate::synth::voice::Voice;

/*
Arpeggios
=========

An arpeggio plays the notes of a chord one after another. The mode decides the
order of a single pass:

  up       C3 E3 G3 B3 C4
  down     C4 B3 G3 E3 C3
  updown   C3 E3 G3 B3 C4 B3 G3 E3

`updown` does not repeat the top note and leaves the bottom note off the way
down, so that repeating the pass loops seamlessly (..E3 | C3 E3..).

A pass renders every note for `note_duration` seconds and concatenates them.
Repeat it with `Sequential`.
*/

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArpMode {
    Up,
    Down,
    UpDown,
}

impl ArpMode {
    /// Reorder `notes` into one pass of this mode.
    pub fn order<T: Clone>(&self, notes: &[T]) -> Vec<T> {
        match self {
            ArpMode::Up => notes.to_vec(),
            ArpMode::Down => notes.iter().rev().cloned().collect(),
            ArpMode::UpDown => {
                let interior: &[T] = if notes.len() > 2 {
                    &notes[1..notes.len() - 1]
                } else {
                    &[]
                };
                notes.iter().chain(interior.iter().rev()).cloned().collect()
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ArpMode::Up => "up",
            ArpMode::Down => "down",
            ArpMode::UpDown => "updown",
        }
    }
}

impl FromStr for ArpMode {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "up" => Ok(ArpMode::Up),
            "down" => Ok(ArpMode::Down),
            "updown" | "up-down" => Ok(ArpMode::UpDown),
            _ => Err(SynthError::UnknownMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for ArpMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One pass of an arpeggio, ready to render.
#[derive(Debug, Clone)]
pub struct Arpeggio {
    notes: Vec<Pitch>,
    shape: Waveform,
    mode: ArpMode,
    note_duration: f32,
    envelope: Option<Envelope>,
}

impl Arpeggio {
    pub fn new<P: Into<Pitch>>(
        notes: impl IntoIterator<Item = P>,
        shape: Waveform,
        mode: ArpMode,
        note_duration: f32,
    ) -> Self {
        Self {
            notes: notes.into_iter().map(Into::into).collect(),
            shape,
            mode,
            note_duration,
            envelope: None,
        }
    }

    /// Shape every note with `envelope`. Each note then also gets the
    /// envelope's release time appended, so the pass grows accordingly.
    pub fn with_envelope(mut self, envelope: Envelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    pub fn mode(&self) -> ArpMode {
        self.mode
    }

    pub fn shape(&self) -> Waveform {
        self.shape
    }

    /// The notes of one pass, in playing order.
    pub fn pass(&self) -> Vec<Pitch> {
        self.mode.order(&self.notes)
    }

    /// Render one pass. All notes are resolved before anything is rendered.
    pub fn render(&self, table: &dyn FrequencyTable, sample_rate: u32) -> Result<SampleBuffer> {
        if self.notes.is_empty() {
            return Err(SynthError::InvalidInput(
                "an arpeggio needs at least one note".to_string(),
            ));
        }

        let frequencies = self
            .pass()
            .iter()
            .map(|pitch| pitch.resolve(table))
            .collect::<Result<Vec<f32>>>()?;

        let voice = self.envelope.map(|env| Voice::new(env, sample_rate));
        let mut out = SampleBuffer::silence(0, sample_rate);
        for hz in frequencies {
            let note = match &voice {
                Some(voice) => voice.render(self.shape, hz, self.note_duration)?,
                None => oscillator::generate(self.shape, hz, self.note_duration, sample_rate)?,
            };
            out.append(&note)?;
        }

        tracing::debug!(
            shape = %self.shape,
            mode = %self.mode,
            notes = self.notes.len(),
            samples = out.len(),
            "rendered arpeggio pass"
        );
        Ok(out)
    }
}
