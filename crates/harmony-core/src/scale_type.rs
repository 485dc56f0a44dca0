//! Scale families and their interval tables
//!
//! Each table row is one rotation (mode) of the scale, written as the
//! semitone steps between consecutive degrees. Every row closes the octave,
//! so its steps sum to 12.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};

/// How many notes a scale has per octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleFamily {
    Pentatonic,
    Hexatonic,
    Heptatonic,
    Octatonic,
    Chromatic,
}

impl ScaleFamily {
    pub const fn note_count(&self) -> usize {
        match self {
            Self::Pentatonic => 5,
            Self::Hexatonic => 6,
            Self::Heptatonic => 7,
            Self::Octatonic => 8,
            Self::Chromatic => 12,
        }
    }
}

/// Named scale types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleType {
    Chromatic,
    Octatonic,
    DominantDiminished,
    Diminished,
    Major,
    Minor,
    MelodicMinor,
    HarmonicMinor,
    Gypsy,
    Symmetrical,
    Enigmatic,
    Arabian,
    Hungarian,
    WholeTone,
    Augmented,
    BluesMajor,
    BluesMinor,
    Pentatonic,
    MinorPentatonic,
    In,
    Insen,
    Hirajoshi,
    Iwato,
    Yo,
}

/// Fixed metadata for one scale type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleSpec {
    pub family: ScaleFamily,
    pub mode_count: usize,
    pub note_count: usize,
    /// Upper-case label, e.g. "HARMONIC_MINOR"
    pub label: &'static str,
    /// Interval rows, one per rotation
    pub table: &'static [&'static [u8]],
    /// Traditional names for the rotations, if the family has them
    pub mode_names: &'static [&'static str],
}

const CHROMATIC: &[&[u8]] = &[&[1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]];

const OCTATONIC: &[&[u8]] = &[&[1, 2, 1, 2, 1, 2, 1, 2], &[2, 1, 2, 1, 2, 1, 2, 1]];

// Dom13 b9 #9 b5; first rotation of the octatonic
const DOMINANT_DIMINISHED: &[&[u8]] = &[&[1, 2, 1, 2, 1, 2, 1, 2]];

// Dim7, Maj/b9; second rotation of the octatonic
const DIMINISHED: &[&[u8]] = &[&[2, 1, 2, 1, 2, 1, 2, 1]];

const MAJOR: &[&[u8]] = &[
    &[2, 2, 1, 2, 2, 2, 1],
    &[2, 1, 2, 2, 2, 1, 2],
    &[1, 2, 2, 2, 1, 2, 2],
    &[2, 2, 2, 1, 2, 2, 1],
    &[2, 2, 1, 2, 2, 1, 2],
    &[2, 1, 2, 2, 1, 2, 2],
    &[1, 2, 2, 1, 2, 2, 2],
];
const MAJOR_MODES: &[&str] = &[
    "Ionian",
    "Dorian",
    "Phrygian",
    "Lydian",
    "Mixolydian",
    "Aeolian",
    "Locrian",
];

const MINOR: &[&[u8]] = &[
    &[2, 1, 2, 2, 1, 2, 2],
    &[1, 2, 2, 1, 2, 2, 2],
    &[2, 2, 1, 2, 2, 2, 1],
    &[2, 1, 2, 2, 2, 1, 2],
    &[1, 2, 2, 2, 1, 2, 2],
    &[2, 2, 2, 1, 2, 2, 1],
    &[2, 2, 1, 2, 2, 1, 2],
];
const MINOR_MODES: &[&str] = &[
    "Aeolian",
    "Locrian",
    "Ionian",
    "Dorian",
    "Phrygian",
    "Lydian",
    "Mixolydian",
];

const MELODIC_MINOR: &[&[u8]] = &[
    &[2, 1, 2, 2, 2, 2, 1],
    &[1, 2, 2, 2, 2, 1, 2],
    &[2, 2, 2, 2, 1, 2, 1],
    &[2, 2, 2, 1, 2, 1, 2],
    &[2, 2, 1, 2, 1, 2, 2],
    &[2, 1, 2, 1, 2, 2, 2],
    &[1, 2, 1, 2, 2, 2, 2],
];
const MELODIC_MINOR_MODES: &[&str] = &[
    "Melodic Minor",
    "Dorian b2",
    "Lydian Augmented",
    "Lydian Dominant",
    "Mixolydian b6",
    "Locrian Natural 9",
    "Altered Dominant",
];

const HARMONIC_MINOR: &[&[u8]] = &[
    &[2, 1, 2, 2, 1, 3, 1],
    &[1, 2, 2, 1, 3, 1, 2],
    &[2, 2, 1, 3, 1, 2, 1],
    &[2, 1, 3, 1, 2, 1, 2],
    &[1, 3, 1, 2, 1, 2, 2],
    &[3, 1, 2, 1, 2, 2, 1],
    &[1, 2, 1, 2, 2, 1, 3],
];
const HARMONIC_MINOR_MODES: &[&str] = &[
    "Harmonic Minor",
    "Locrian Natural 6",
    "Ionian Augmented",
    "Dorian #4",
    "Phrygian Dominant",
    "Lydian #9",
    "Altered Dominant bb7",
];

const GYPSY: &[&[u8]] = &[&[2, 1, 3, 1, 1, 3, 1]];
const SYMMETRICAL: &[&[u8]] = &[&[1, 2, 2, 3, 1, 1, 2]];
const ENIGMATIC: &[&[u8]] = &[&[1, 3, 2, 2, 2, 1, 1]];
const ARABIAN: &[&[u8]] = &[&[2, 2, 1, 1, 2, 2, 2]];
const HUNGARIAN: &[&[u8]] = &[&[3, 1, 2, 1, 2, 1, 2]];

// Dom7 #5 b6
const WHOLE_TONE: &[&[u8]] = &[&[2, 2, 2, 2, 2, 2]];

const AUGMENTED: &[&[u8]] = &[&[3, 1, 3, 1, 3, 1], &[1, 3, 1, 3, 1, 3]];

const BLUES_MAJOR: &[&[u8]] = &[&[2, 1, 1, 3, 2, 3]];

// Rotation 1 is the blues major scale
const BLUES_MINOR: &[&[u8]] = &[
    &[3, 2, 1, 1, 3, 2],
    &[2, 1, 1, 3, 2, 3],
    &[1, 1, 3, 2, 3, 2],
    &[1, 3, 2, 3, 2, 1],
    &[3, 2, 3, 2, 1, 1],
    &[2, 3, 2, 1, 1, 3],
];

const PENTATONIC: &[&[u8]] = &[&[2, 2, 3, 2, 3]];
const MINOR_PENTATONIC: &[&[u8]] = &[&[3, 2, 2, 3, 2]];

// Japanese pentatonics
const IN: &[&[u8]] = &[&[1, 4, 2, 1, 4]];
const INSEN: &[&[u8]] = &[&[1, 4, 2, 3, 2]];
const HIRAJOSHI: &[&[u8]] = &[&[4, 2, 1, 4, 1]];
const IWATO: &[&[u8]] = &[&[1, 4, 1, 4, 2]];
const YO: &[&[u8]] = &[&[3, 2, 2, 3, 2]];

const fn spec(
    family: ScaleFamily,
    mode_count: usize,
    label: &'static str,
    table: &'static [&'static [u8]],
    mode_names: &'static [&'static str],
) -> ScaleSpec {
    ScaleSpec {
        family,
        mode_count,
        note_count: family.note_count(),
        label,
        table,
        mode_names,
    }
}

use ScaleFamily::{Chromatic, Heptatonic, Hexatonic, Octatonic, Pentatonic};

static CHROMATIC_SPEC: ScaleSpec = spec(Chromatic, 1, "CHROMATIC", CHROMATIC, &[]);
static OCTATONIC_SPEC: ScaleSpec = spec(Octatonic, 2, "OCTATONIC", OCTATONIC, &[]);
static DOMINANT_DIMINISHED_SPEC: ScaleSpec =
    spec(Octatonic, 1, "DOMINANT_DIMINISHED", DOMINANT_DIMINISHED, &[]);
static DIMINISHED_SPEC: ScaleSpec = spec(Octatonic, 1, "DIMINISHED", DIMINISHED, &[]);
static MAJOR_SPEC: ScaleSpec = spec(Heptatonic, 7, "MAJOR", MAJOR, MAJOR_MODES);
static MINOR_SPEC: ScaleSpec = spec(Heptatonic, 7, "MINOR", MINOR, MINOR_MODES);
static MELODIC_MINOR_SPEC: ScaleSpec =
    spec(Heptatonic, 7, "MELODIC_MINOR", MELODIC_MINOR, MELODIC_MINOR_MODES);
static HARMONIC_MINOR_SPEC: ScaleSpec =
    spec(Heptatonic, 7, "HARMONIC_MINOR", HARMONIC_MINOR, HARMONIC_MINOR_MODES);
static GYPSY_SPEC: ScaleSpec = spec(Heptatonic, 1, "GYPSY", GYPSY, &[]);
static SYMMETRICAL_SPEC: ScaleSpec = spec(Heptatonic, 1, "SYMMETRICAL", SYMMETRICAL, &[]);
static ENIGMATIC_SPEC: ScaleSpec = spec(Heptatonic, 1, "ENIGMATIC", ENIGMATIC, &[]);
static ARABIAN_SPEC: ScaleSpec = spec(Heptatonic, 1, "ARABIAN", ARABIAN, &[]);
static HUNGARIAN_SPEC: ScaleSpec = spec(Heptatonic, 1, "HUNGARIAN", HUNGARIAN, &[]);
static WHOLE_TONE_SPEC: ScaleSpec = spec(Hexatonic, 1, "WHOLE_TONE", WHOLE_TONE, &[]);
static AUGMENTED_SPEC: ScaleSpec = spec(Hexatonic, 2, "AUGMENTED", AUGMENTED, &[]);
static BLUES_MAJOR_SPEC: ScaleSpec = spec(Hexatonic, 1, "BLUES_MAJOR", BLUES_MAJOR, &[]);
static BLUES_MINOR_SPEC: ScaleSpec = spec(Hexatonic, 6, "BLUES_MINOR", BLUES_MINOR, &[]);
static PENTATONIC_SPEC: ScaleSpec = spec(Pentatonic, 1, "PENTATONIC", PENTATONIC, &[]);
static MINOR_PENTATONIC_SPEC: ScaleSpec =
    spec(Pentatonic, 1, "MINOR_PENTATONIC", MINOR_PENTATONIC, &[]);
static IN_SPEC: ScaleSpec = spec(Pentatonic, 1, "IN", IN, &[]);
static INSEN_SPEC: ScaleSpec = spec(Pentatonic, 1, "INSEN", INSEN, &[]);
static HIRAJOSHI_SPEC: ScaleSpec = spec(Pentatonic, 1, "HIRAJOSHI", HIRAJOSHI, &[]);
static IWATO_SPEC: ScaleSpec = spec(Pentatonic, 1, "IWATO", IWATO, &[]);
static YO_SPEC: ScaleSpec = spec(Pentatonic, 1, "YO", YO, &[]);

impl ScaleType {
    pub const ALL: [ScaleType; 24] = [
        Self::Chromatic,
        Self::Octatonic,
        Self::DominantDiminished,
        Self::Diminished,
        Self::Major,
        Self::Minor,
        Self::MelodicMinor,
        Self::HarmonicMinor,
        Self::Gypsy,
        Self::Symmetrical,
        Self::Enigmatic,
        Self::Arabian,
        Self::Hungarian,
        Self::WholeTone,
        Self::Augmented,
        Self::BluesMajor,
        Self::BluesMinor,
        Self::Pentatonic,
        Self::MinorPentatonic,
        Self::In,
        Self::Insen,
        Self::Hirajoshi,
        Self::Iwato,
        Self::Yo,
    ];

    pub fn spec(&self) -> &'static ScaleSpec {
        match self {
            Self::Chromatic => &CHROMATIC_SPEC,
            Self::Octatonic => &OCTATONIC_SPEC,
            Self::DominantDiminished => &DOMINANT_DIMINISHED_SPEC,
            Self::Diminished => &DIMINISHED_SPEC,
            Self::Major => &MAJOR_SPEC,
            Self::Minor => &MINOR_SPEC,
            Self::MelodicMinor => &MELODIC_MINOR_SPEC,
            Self::HarmonicMinor => &HARMONIC_MINOR_SPEC,
            Self::Gypsy => &GYPSY_SPEC,
            Self::Symmetrical => &SYMMETRICAL_SPEC,
            Self::Enigmatic => &ENIGMATIC_SPEC,
            Self::Arabian => &ARABIAN_SPEC,
            Self::Hungarian => &HUNGARIAN_SPEC,
            Self::WholeTone => &WHOLE_TONE_SPEC,
            Self::Augmented => &AUGMENTED_SPEC,
            Self::BluesMajor => &BLUES_MAJOR_SPEC,
            Self::BluesMinor => &BLUES_MINOR_SPEC,
            Self::Pentatonic => &PENTATONIC_SPEC,
            Self::MinorPentatonic => &MINOR_PENTATONIC_SPEC,
            Self::In => &IN_SPEC,
            Self::Insen => &INSEN_SPEC,
            Self::Hirajoshi => &HIRAJOSHI_SPEC,
            Self::Iwato => &IWATO_SPEC,
            Self::Yo => &YO_SPEC,
        }
    }

    pub fn family(&self) -> ScaleFamily {
        self.spec().family
    }

    pub fn label(&self) -> &'static str {
        self.spec().label
    }

    /// Interval steps for `rotation`, checked to hold at least `steps` entries.
    ///
    /// Single-row tables serve every rotation of their scale only at index 0;
    /// any other rotation is rejected rather than read past the table.
    pub fn interval_row(&self, rotation: usize, steps: usize) -> Result<&'static [u8]> {
        let spec = self.spec();
        let row = spec.table.get(rotation).ok_or_else(|| {
            HarmonyError::InvalidConfiguration(format!(
                "{} has {} interval rows, rotation {} requested",
                spec.label,
                spec.table.len(),
                rotation
            ))
        })?;
        if steps > row.len() {
            return Err(HarmonyError::InvalidConfiguration(format!(
                "{} rotation {} has {} steps, {} needed",
                spec.label,
                rotation,
                row.len(),
                steps
            )));
        }
        Ok(row)
    }

    /// Display name for a rotation of this scale
    pub fn mode_name(&self, rotation: usize) -> String {
        self.spec()
            .mode_names
            .get(rotation)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("Mode {}", rotation + 1))
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ScaleType {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|ty| ty.label() == wanted)
            .ok_or_else(|| HarmonyError::InvalidArgument(format!("Unknown scale type: {s}")))
    }
}

impl TryFrom<u8> for ScaleType {
    type Error = HarmonyError;

    fn try_from(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| {
                HarmonyError::InvalidArgument(format!("Unknown scale type index: {index}"))
            })
    }
}

/// Upper-case a selector name and unify word separators to `_`
pub(crate) fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '-' => '_',
            c => c.to_ascii_uppercase(),
        })
        .collect()
}
