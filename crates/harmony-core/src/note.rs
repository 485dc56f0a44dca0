//! MIDI pitch values and their note names

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pitch code used when nothing else is known (middle C, "C3")
pub const MIDDLE_C: u8 = 60;

/// Semitones per octave
pub const OCTAVE: u8 = 12;

/// Highest valid MIDI pitch code
pub const MAX_CODE: u8 = 127;

const SHARP_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];
const FLAT_NAMES: [&str; 12] = ["C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B"];

/// Names accepted by [`Note::parse`], with their offset from C.
const NAME_OFFSETS: [(&str, u8); 17] = [
    ("C", 0),
    ("C#", 1),
    ("Db", 1),
    ("D", 2),
    ("D#", 3),
    ("Eb", 3),
    ("E", 4),
    ("F", 5),
    ("F#", 6),
    ("Gb", 6),
    ("G", 7),
    ("G#", 8),
    ("Ab", 8),
    ("A", 9),
    ("A#", 10),
    ("Bb", 10),
    ("B", 11),
];

/// A single MIDI pitch with a display preference for accidentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// MIDI note number, 0 ..= 127 when built from external input.
    ///
    /// Generated notes may run past 127, so deserializing does not check the
    /// range; see [`Note::in_midi_range`] and [`Note::validated`].
    pub number: u8,
    /// Render accidentals as flats instead of sharps
    pub flats: bool,
}

impl Default for Note {
    fn default() -> Self {
        Self {
            number: MIDDLE_C,
            flats: false,
        }
    }
}

impl From<u8> for Note {
    fn from(code: u8) -> Self {
        Self::new(code)
    }
}

impl Note {
    /// Build a note from a pitch code. Codes above 127 are rejected and the
    /// note keeps the default (middle C).
    pub fn new(code: u8) -> Self {
        let mut note = Self::default();
        note.set(i32::from(code));
        note
    }

    /// Signed counterpart of [`Note::new`]; negative codes are rejected too.
    pub fn from_i32(code: i32) -> Self {
        let mut note = Self::default();
        note.set(code);
        note
    }

    /// Store `code` if it is a valid MIDI pitch. Returns false and leaves the
    /// previous value untouched otherwise.
    pub fn set(&mut self, code: i32) -> bool {
        match u8::try_from(code) {
            Ok(valid) if valid <= MAX_CODE => {
                self.number = valid;
                true
            }
            _ => {
                tracing::warn!("Rejected pitch code {}, keeping {}", code, self.number);
                false
            }
        }
    }

    /// Builder-style display preference
    pub fn with_flats(mut self, flats: bool) -> Self {
        self.flats = flats;
        self
    }

    pub fn pitch_class(&self) -> u8 {
        self.number % OCTAVE
    }

    /// MIDI octave, where code 0 is "C-2"
    pub fn octave(&self) -> i8 {
        octave_of(self.number)
    }

    /// Generated notes may run past 127; check before sending to a synth.
    pub fn in_midi_range(&self) -> bool {
        self.number <= MAX_CODE
    }

    /// This note if it is a valid MIDI pitch, for values that did not come
    /// through [`Note::new`] (deserialized or generated).
    pub fn validated(self) -> Option<Self> {
        self.in_midi_range().then_some(self)
    }

    /// Same pitch one octave lower, if there is room
    pub fn octave_down(&self) -> Option<Self> {
        self.number.checked_sub(OCTAVE).map(|number| Self { number, ..*self })
    }

    /// Pitch class name using this note's accidental preference
    pub fn text(&self) -> String {
        Self::to_text(self.number, self.flats, false)
    }

    /// Pitch class name with octave, e.g. "C#3"
    pub fn name(&self) -> String {
        Self::to_text(self.number, self.flats, true)
    }

    pub fn flats_name(&self) -> String {
        Self::to_text(self.number, true, true)
    }

    pub fn sharps_name(&self) -> String {
        Self::to_text(self.number, false, true)
    }

    /// Render a pitch code. Code 60 is "C3" with the octave shown.
    pub fn to_text(code: u8, flats: bool, show_octave: bool) -> String {
        let table = if flats { &FLAT_NAMES } else { &SHARP_NAMES };
        let mut text = table
            .get(usize::from(code % OCTAVE))
            .copied()
            .unwrap_or("!!")
            .to_string();
        if show_octave {
            text.push_str(&octave_of(code).to_string());
        }
        text
    }

    /// Case-insensitive lookup of a bare note name ("F#", "bb", "E"),
    /// returned in the octave of middle C.
    ///
    /// This is lossy: anything unrecognised, including names with an octave
    /// suffix, yields [`MIDDLE_C`]. Use [`Note::parse_with_octave`] when the
    /// caller needs to know the name was not understood.
    pub fn parse(name: &str) -> u8 {
        match name_offset(name.trim()) {
            Some(offset) => MIDDLE_C + offset,
            None => {
                tracing::warn!("Unrecognised note name {:?}, using {}", name, MIDDLE_C);
                MIDDLE_C
            }
        }
    }

    /// Strict parser for names with an octave suffix, e.g. "C#3", "Bb-1",
    /// "g8". A bare name is placed in octave 3. Flats are remembered as the
    /// display preference.
    pub fn parse_with_octave(text: &str) -> Option<Self> {
        let text = text.trim();
        let split = text
            .char_indices()
            .skip(1)
            .find(|(_, c)| c.is_ascii_digit() || *c == '-')
            .map(|(idx, _)| idx)
            .unwrap_or(text.len());
        let (name, octave) = text.split_at(split);

        let offset = name_offset(name)?;
        let octave: i8 = if octave.is_empty() { 3 } else { octave.parse().ok()? };
        if !(-2..=8).contains(&octave) {
            return None;
        }
        // (8 + 2) * 12 + 11 = 131, fits a u8
        let number = (octave + 2) as u8 * OCTAVE + offset;
        if number > MAX_CODE {
            return None;
        }

        let flats = name.len() == 2 && name.ends_with(['b', 'B']);
        Some(Self { number, flats })
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn octave_of(code: u8) -> i8 {
    // 255 / 12 - 2 = 19, always fits
    (code / OCTAVE) as i8 - 2
}

fn name_offset(name: &str) -> Option<u8> {
    NAME_OFFSETS
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|&(_, offset)| offset)
}

/// Render a pitch code as a note name
pub fn note_name(code: u8, flats: bool, with_octave: bool) -> String {
    Note::to_text(code, flats, with_octave)
}

/// Lossy inverse of [`note_name`] for bare names; see [`Note::parse`].
pub fn note_from_name(text: &str) -> u8 {
    Note::parse(text)
}
