//! One rotation of a scale, spelled out as notes from a root

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};
use crate::note::{Note, MAX_CODE, OCTAVE};
use crate::scale_type::ScaleType;

/// Note ordering for [`Mode::order`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NoteOrder {
    #[default]
    LowToHigh,
    HighToLow,
}

/// The notes of one scale rotation, starting at the root.
///
/// Notes are the running sum of the rotation's interval row. Nothing wraps,
/// so a high root can produce codes above 127; see [`Note::in_midi_range`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    pub scale_type: ScaleType,
    pub rotation: usize,
    pub root: u8,
    pub notes: Vec<Note>,
}

impl Mode {
    /// Build `note_count` notes of rotation `rotation` of `scale_type`.
    ///
    /// A root above 127 is clamped. Fails with `InvalidConfiguration` if the
    /// interval table has no such rotation or too few steps for the requested
    /// note count.
    pub fn new(
        root: u8,
        scale_type: ScaleType,
        rotation: usize,
        note_count: usize,
    ) -> Result<Self> {
        let root = if root > MAX_CODE {
            tracing::warn!("Mode root {} out of range, clamped to {}", root, MAX_CODE);
            MAX_CODE
        } else {
            root
        };
        if note_count == 0 {
            return Err(HarmonyError::InvalidConfiguration(format!(
                "{} rotation {} requested with zero notes",
                scale_type, rotation
            )));
        }
        let row = scale_type.interval_row(rotation, note_count - 1)?;
        let notes = stack_intervals(root, &row[..note_count - 1]);

        tracing::trace!(
            "Mode {} rotation {} from {}: {:?}",
            scale_type,
            rotation,
            root,
            notes.iter().map(|n| n.number).collect::<Vec<_>>()
        );

        Ok(Self {
            scale_type,
            rotation,
            root,
            notes,
        })
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Traditional name of this rotation, or "Mode N"
    pub fn name(&self) -> String {
        self.scale_type.mode_name(self.rotation)
    }

    pub fn text(&self) -> String {
        format!("Mode::{}", self.name())
    }

    /// Reorder the notes by pitch code
    pub fn order(&mut self, order: NoteOrder) {
        match order {
            NoteOrder::LowToHigh => self.notes.sort_by_key(|n| n.number),
            NoteOrder::HighToLow => self.notes.sort_by(|a, b| b.number.cmp(&a.number)),
        }
    }

    /// Raw pitch codes in current order
    pub fn codes(&self) -> Vec<u8> {
        self.notes.iter().map(|n| n.number).collect()
    }

    /// Distinct pitch classes, ascending
    pub fn pitch_classes(&self) -> Vec<u8> {
        let mut classes: Vec<u8> = self.notes.iter().map(|n| n.pitch_class()).collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Append a copy of every note one octave up, doubling the range
    pub fn extend_octave(&mut self) {
        let upper: Vec<Note> = self
            .notes
            .iter()
            .map(|n| Note {
                number: n.number.saturating_add(OCTAVE),
                ..*n
            })
            .collect();
        self.notes.extend(upper);
    }

    /// Reduce every note to its pitch class (0 ..= 11)
    pub fn reduce_to_pitch_classes(&mut self) {
        for note in &mut self.notes {
            note.number %= OCTAVE;
        }
    }
}

/// Running sum of `steps` starting at `root`; yields `steps.len() + 1` notes.
///
/// Callers clamp `root` to 127 first. The widest row (a 13th chord) adds 21
/// semitones, so the sum stays inside `u8`.
pub(crate) fn stack_intervals(root: u8, steps: &[u8]) -> Vec<Note> {
    let mut notes = Vec::with_capacity(steps.len() + 1);
    let mut current = root;
    notes.push(Note {
        number: current,
        flats: false,
    });
    for &step in steps {
        current += step;
        notes.push(Note {
            number: current,
            flats: false,
        });
    }
    notes
}
