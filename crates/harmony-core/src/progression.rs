//! Diatonic chord progressions over one mode of a scale
//!
//! Only II-V-I is worked out. The other progression types are accepted and
//! produce no stacks until their voicing rules are settled.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};
use crate::mode::{Mode, NoteOrder};
use crate::note::Note;
use crate::scale::Scale;
use crate::scale_type::{normalize_label, ScaleType};

/// Scale degree as an offset into a mode (I = 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Degree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl Degree {
    pub fn offset(&self) -> usize {
        *self as usize
    }
}

/// Root, third, fifth and seventh counted in scale steps from a degree
const SEVENTH_CHORD_TONES: [Degree; 4] = [Degree::I, Degree::III, Degree::V, Degree::VII];

/// Progression patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressionType {
    TwoFiveOne,
    FiveOfFive,
    OneSixTwoFive,
    ThreeSixTwoFive,
    OneTwoThreeFour,
}

impl ProgressionType {
    pub const ALL: [ProgressionType; 5] = [
        Self::TwoFiveOne,
        Self::FiveOfFive,
        Self::OneSixTwoFive,
        Self::ThreeSixTwoFive,
        Self::OneTwoThreeFour,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::TwoFiveOne => "II-V-I",
            Self::FiveOfFive => "V-of-V",
            Self::OneSixTwoFive => "I-VI-II-V",
            Self::ThreeSixTwoFive => "III-VI-II-V",
            Self::OneTwoThreeFour => "I-II-III-IV",
        }
    }

    /// Chord roots of the progression, empty when not yet defined
    pub fn degrees(&self) -> &'static [Degree] {
        match self {
            Self::TwoFiveOne => &[Degree::II, Degree::V, Degree::I],
            Self::FiveOfFive
            | Self::OneSixTwoFive
            | Self::ThreeSixTwoFive
            | Self::OneTwoThreeFour => &[],
        }
    }
}

impl FromStr for ProgressionType {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_label(s);
        Self::ALL
            .into_iter()
            .find(|p| normalize_label(p.label()) == wanted)
            .ok_or_else(|| HarmonyError::InvalidArgument(format!("Unknown progression: {s}")))
    }
}

/// Root, third, fifth and seventh of one degree of the mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DegreeStack {
    pub degree: Degree,
    pub notes: [Note; 4],
}

impl DegreeStack {
    pub fn codes(&self) -> [u8; 4] {
        self.notes.map(|n| n.number)
    }

    /// Note names joined as "|D3|F3|A3|C4"
    pub fn text(&self) -> String {
        self.notes.iter().map(|n| format!("|{}", n.name())).collect()
    }
}

/// A progression over one mode of a scale.
///
/// The scale is only read while building; the progression owns a two-octave
/// copy of the chosen mode. After the stacks are taken that copy is reduced to
/// pitch classes and sorted ascending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordProgression {
    pub progression_type: ProgressionType,
    pub scale_type: ScaleType,
    pub root: u8,
    pub mode_index: usize,
    extended_mode: Mode,
    stacks: Vec<DegreeStack>,
}

impl ChordProgression {
    pub fn new(
        scale: &Scale,
        mode_index: usize,
        progression_type: ProgressionType,
    ) -> Result<Self> {
        let mut extended_mode = scale.mode(mode_index)?.clone();
        extended_mode.extend_octave();

        let stacks = progression_type
            .degrees()
            .iter()
            .map(|&degree| stack_on(&extended_mode, degree))
            .collect::<Result<Vec<_>>>()?;

        if stacks.is_empty() {
            tracing::debug!("{} progression has no stacks defined", progression_type.label());
        } else {
            tracing::debug!(
                "{} over {} {}: {}",
                progression_type.label(),
                scale.text(),
                extended_mode.name(),
                stacks.iter().map(DegreeStack::text).collect::<Vec<_>>().join(" ")
            );
        }

        extended_mode.reduce_to_pitch_classes();
        extended_mode.order(NoteOrder::LowToHigh);

        Ok(Self {
            progression_type,
            scale_type: scale.scale_type,
            root: scale.root,
            mode_index,
            extended_mode,
            stacks,
        })
    }

    /// The mode copy across two octaves, reduced to sorted pitch classes
    pub fn extended_mode(&self) -> &Mode {
        &self.extended_mode
    }

    pub fn stacks(&self) -> &[DegreeStack] {
        &self.stacks
    }

    pub fn into_stacks(self) -> Vec<DegreeStack> {
        self.stacks
    }
}

fn stack_on(mode: &Mode, degree: Degree) -> Result<DegreeStack> {
    let mut notes = [Note::default(); 4];
    for (slot, tone) in notes.iter_mut().zip(SEVENTH_CHORD_TONES) {
        let index = degree.offset() + tone.offset();
        *slot = *mode.notes.get(index).ok_or_else(|| {
            HarmonyError::InvalidConfiguration(format!(
                "{} has {} notes over two octaves, degree {:?} needs index {}",
                mode.text(),
                mode.note_count(),
                degree,
                index
            ))
        })?;
    }
    Ok(DegreeStack { degree, notes })
}

/// Note stacks of `progression_type` over mode `mode_index` of `scale`
pub fn progression_stacks(
    scale: &Scale,
    mode_index: usize,
    progression_type: ProgressionType,
) -> Result<Vec<DegreeStack>> {
    ChordProgression::new(scale, mode_index, progression_type).map(ChordProgression::into_stacks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::build_scale;

    #[test]
    fn test_two_five_one_in_c_major() {
        let scale = build_scale(ScaleType::Major, 60).unwrap();
        let stacks = progression_stacks(&scale, 0, ProgressionType::TwoFiveOne).unwrap();

        assert_eq!(stacks.len(), 3);
        assert_eq!(stacks[0].degree, Degree::II);
        assert_eq!(stacks[0].codes(), [62, 65, 69, 72]);
        assert_eq!(stacks[1].degree, Degree::V);
        assert_eq!(stacks[1].codes(), [67, 71, 74, 77]);
        assert_eq!(stacks[2].degree, Degree::I);
        assert_eq!(stacks[2].codes(), [60, 64, 67, 71]);
        assert_eq!(stacks[0].text(), "|D3|F3|A3|C4");
    }

    #[test]
    fn test_extended_mode_is_reduced_and_sorted() {
        let scale = build_scale(ScaleType::Major, 62).unwrap();
        let progression = ChordProgression::new(&scale, 0, ProgressionType::TwoFiveOne).unwrap();
        let mode = progression.extended_mode();

        assert_eq!(mode.note_count(), 14);
        assert_eq!(mode.codes(), vec![1, 1, 2, 2, 4, 4, 6, 6, 7, 7, 9, 9, 11, 11]);
        // Source scale is untouched
        assert_eq!(scale.modes[0].codes(), vec![62, 64, 66, 67, 69, 71, 73]);
    }

    #[test]
    fn test_placeholder_progressions_are_empty() {
        let scale = build_scale(ScaleType::Minor, 57).unwrap();
        for ty in ProgressionType::ALL.into_iter().skip(1) {
            let progression = ChordProgression::new(&scale, 3, ty).unwrap();
            assert!(progression.stacks().is_empty(), "{}", ty.label());
            assert_eq!(progression.extended_mode().note_count(), 14);
        }
    }

    #[test]
    fn test_other_modes() {
        let scale = build_scale(ScaleType::Major, 60).unwrap();
        // Dorian on C: C D Eb F G A Bb
        let stacks = progression_stacks(&scale, 1, ProgressionType::TwoFiveOne).unwrap();
        assert_eq!(stacks[0].codes(), [62, 65, 69, 72]);
        assert_eq!(stacks[1].codes(), [67, 70, 74, 77]);
        assert_eq!(stacks[2].codes(), [60, 63, 67, 70]);
    }

    #[test]
    fn test_invalid_requests() {
        let scale = build_scale(ScaleType::Major, 60).unwrap();
        assert!(matches!(
            ChordProgression::new(&scale, 7, ProgressionType::TwoFiveOne),
            Err(HarmonyError::InvalidArgument(_))
        ));

        // Two octaves of a pentatonic are too short for a seventh on V
        let scale = build_scale(ScaleType::Pentatonic, 60).unwrap();
        assert!(matches!(
            ChordProgression::new(&scale, 0, ProgressionType::TwoFiveOne),
            Err(HarmonyError::InvalidConfiguration(_))
        ));
        assert!(ChordProgression::new(&scale, 0, ProgressionType::FiveOfFive).is_ok());
    }

    #[test]
    fn test_hexatonic_reaches_the_seventh_on_five() {
        // 12 notes over two octaves, V needs index 10
        let scale = build_scale(ScaleType::WholeTone, 60).unwrap();
        let stacks = progression_stacks(&scale, 0, ProgressionType::TwoFiveOne).unwrap();
        assert_eq!(stacks[1].codes(), [68, 72, 76, 80]);
    }

    #[test]
    fn test_parse_progression() {
        assert_eq!("ii-v-i".parse::<ProgressionType>().ok(), Some(ProgressionType::TwoFiveOne));
        assert_eq!("V of V".parse::<ProgressionType>().ok(), Some(ProgressionType::FiveOfFive));
        assert!(matches!("IV-I".parse::<ProgressionType>(), Err(HarmonyError::InvalidArgument(_))));
    }
}
