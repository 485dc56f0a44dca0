//! Chords built by stacking intervals on a root, plus drop voicings

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};
use crate::mode::stack_intervals;
use crate::note::{Note, MAX_CODE, OCTAVE};
use crate::scale_type::normalize_label;

/// Chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Major6,
    Major7,
    Major9,
    Major7Sharp11,
    Minor,
    Minor6,
    MinorFlat6,
    Minor7,
    Minor9,
    MinorMajor7,
    Dominant7,
    Dominant7Flat5,
    Dominant7Sharp5,
    Dominant7Sus4,
    Dominant7Flat9,
    Dominant7Sharp9,
    Dominant7Sharp5Flat9,
    Dominant7Sharp11,
    Dominant7Add9Flat5,
    Dominant7Add9Sharp11,
    Dominant7Add13,
    Dominant7Sharp9Flat13,
    Dominant7Sharp11Add13,
    Diminished,
    Diminished7,
    Minor7Flat5,
    Augmented,
    Sus4,
    Sus2,
}

/// Label, symbol and interval steps for a chord quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChordRecipe {
    pub label: &'static str,
    pub symbol: &'static str,
    /// Semitones between consecutive chord tones, root upward
    pub steps: &'static [u8],
}

const fn recipe(label: &'static str, symbol: &'static str, steps: &'static [u8]) -> ChordRecipe {
    ChordRecipe { label, symbol, steps }
}

// Steps are plain semitones: 1 minor second, 2 major second, 3 minor third,
// 4 major third, 5 perfect fourth, 8 minor sixth, 11 major seventh.
static MAJOR: ChordRecipe = recipe("Major", "", &[4, 3]);
static MAJOR_6: ChordRecipe = recipe("Major 6'th", "6", &[4, 3, 2]);
static MAJOR_7: ChordRecipe = recipe("Major 7'th", "maj7", &[4, 3, 4]);
static MAJOR_9: ChordRecipe = recipe("Major 9'th", "maj9", &[4, 3, 4, 3]);
static MAJOR_7_SHARP11: ChordRecipe = recipe("Major 7'th #11", "maj7#11", &[4, 3, 4, 3, 4]);
static MINOR: ChordRecipe = recipe("Minor", "m", &[3, 4]);
static MINOR_6: ChordRecipe = recipe("Minor 6'th", "m6", &[3, 4, 2]);
static MINOR_FLAT6: ChordRecipe = recipe("Minor b6", "mb6", &[3, 4, 1]);
static MINOR_7: ChordRecipe = recipe("Minor 7'th", "m7", &[3, 4, 3]);
static MINOR_9: ChordRecipe = recipe("Minor 9'th", "m9", &[3, 4, 3, 4]);
static MINOR_MAJOR_7: ChordRecipe = recipe("Minor major 7'th", "minMaj7", &[3, 4, 4]);
static DOMINANT_7: ChordRecipe = recipe("Dominant 7'th", "7", &[4, 3, 3]);
static DOMINANT_7_FLAT5: ChordRecipe = recipe("Dominant 7'th b5", "7b5", &[4, 2, 4]);
static DOMINANT_7_SHARP5: ChordRecipe = recipe("Dominant 7'th #5", "7#5", &[4, 4, 2]);
static DOMINANT_7_SUS4: ChordRecipe =
    recipe("Dominant 7'th with suspended 4'th", "7sus4", &[5, 2, 3]);
static DOMINANT_7_FLAT9: ChordRecipe = recipe("Dominant 7'th b9", "7b9", &[4, 3, 3, 3]);
static DOMINANT_7_SHARP9: ChordRecipe = recipe("Dominant 7'th #9", "7#9", &[4, 3, 3, 5]);
static DOMINANT_7_SHARP5_FLAT9: ChordRecipe =
    recipe("Dominant 7'th #5 b9", "7#5b9", &[4, 4, 2, 3]);
static DOMINANT_7_SHARP11: ChordRecipe = recipe("Dominant 7'th #11", "7#11", &[4, 3, 3, 8]);
static DOMINANT_7_ADD9_FLAT5: ChordRecipe =
    recipe("Dominant 7'th add9 b5", "7add9b5", &[4, 2, 4, 4]);
static DOMINANT_7_ADD9_SHARP11: ChordRecipe =
    recipe("Dominant 7'th add9 #11", "7add9#11", &[4, 3, 3, 4, 4]);
static DOMINANT_7_ADD13: ChordRecipe = recipe("Dominant 7'th add13", "7add13", &[4, 3, 3, 11]);
static DOMINANT_7_SHARP9_FLAT13: ChordRecipe =
    recipe("Dominant 7'th #9 b13", "7#9b13", &[4, 3, 3, 5, 5]);
static DOMINANT_7_SHARP11_ADD13: ChordRecipe =
    recipe("Dominant 7'th #11 add13", "7#11add13", &[4, 3, 3, 8, 3]);
static DIMINISHED: ChordRecipe = recipe("Diminished", "dim", &[3, 3]);
static DIMINISHED_7: ChordRecipe = recipe("Diminished 7", "dim7", &[3, 3, 3]);
static MINOR_7_FLAT5: ChordRecipe = recipe("Minor 7 b5", "0", &[3, 3, 4]);
static AUGMENTED: ChordRecipe = recipe("Augmented", "+", &[4, 4]);
static SUS4: ChordRecipe = recipe("Suspended 4'th", "sus4", &[5, 2]);
static SUS2: ChordRecipe = recipe("Suspended 2'nd", "sus2", &[2, 5]);

impl ChordQuality {
    pub const ALL: [ChordQuality; 30] = [
        Self::Major,
        Self::Major6,
        Self::Major7,
        Self::Major9,
        Self::Major7Sharp11,
        Self::Minor,
        Self::Minor6,
        Self::MinorFlat6,
        Self::Minor7,
        Self::Minor9,
        Self::MinorMajor7,
        Self::Dominant7,
        Self::Dominant7Flat5,
        Self::Dominant7Sharp5,
        Self::Dominant7Sus4,
        Self::Dominant7Flat9,
        Self::Dominant7Sharp9,
        Self::Dominant7Sharp5Flat9,
        Self::Dominant7Sharp11,
        Self::Dominant7Add9Flat5,
        Self::Dominant7Add9Sharp11,
        Self::Dominant7Add13,
        Self::Dominant7Sharp9Flat13,
        Self::Dominant7Sharp11Add13,
        Self::Diminished,
        Self::Diminished7,
        Self::Minor7Flat5,
        Self::Augmented,
        Self::Sus4,
        Self::Sus2,
    ];

    pub fn recipe(&self) -> &'static ChordRecipe {
        match self {
            Self::Major => &MAJOR,
            Self::Major6 => &MAJOR_6,
            Self::Major7 => &MAJOR_7,
            Self::Major9 => &MAJOR_9,
            Self::Major7Sharp11 => &MAJOR_7_SHARP11,
            Self::Minor => &MINOR,
            Self::Minor6 => &MINOR_6,
            Self::MinorFlat6 => &MINOR_FLAT6,
            Self::Minor7 => &MINOR_7,
            Self::Minor9 => &MINOR_9,
            Self::MinorMajor7 => &MINOR_MAJOR_7,
            Self::Dominant7 => &DOMINANT_7,
            Self::Dominant7Flat5 => &DOMINANT_7_FLAT5,
            Self::Dominant7Sharp5 => &DOMINANT_7_SHARP5,
            Self::Dominant7Sus4 => &DOMINANT_7_SUS4,
            Self::Dominant7Flat9 => &DOMINANT_7_FLAT9,
            Self::Dominant7Sharp9 => &DOMINANT_7_SHARP9,
            Self::Dominant7Sharp5Flat9 => &DOMINANT_7_SHARP5_FLAT9,
            Self::Dominant7Sharp11 => &DOMINANT_7_SHARP11,
            Self::Dominant7Add9Flat5 => &DOMINANT_7_ADD9_FLAT5,
            Self::Dominant7Add9Sharp11 => &DOMINANT_7_ADD9_SHARP11,
            Self::Dominant7Add13 => &DOMINANT_7_ADD13,
            Self::Dominant7Sharp9Flat13 => &DOMINANT_7_SHARP9_FLAT13,
            Self::Dominant7Sharp11Add13 => &DOMINANT_7_SHARP11_ADD13,
            Self::Diminished => &DIMINISHED,
            Self::Diminished7 => &DIMINISHED_7,
            Self::Minor7Flat5 => &MINOR_7_FLAT5,
            Self::Augmented => &AUGMENTED,
            Self::Sus4 => &SUS4,
            Self::Sus2 => &SUS2,
        }
    }

    pub fn label(&self) -> &'static str {
        self.recipe().label
    }

    pub fn symbol(&self) -> &'static str {
        self.recipe().symbol
    }

    pub fn steps(&self) -> &'static [u8] {
        self.recipe().steps
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ChordQuality {
    type Err = HarmonyError;

    /// Accepts the variant name in any case with optional separators
    /// ("dominant7", "DOMINANT_7", "minor-7-flat5") or the exact chord symbol
    /// ("m7", "7#9", "maj7").
    fn from_str(s: &str) -> Result<Self> {
        let squashed = normalize_label(s).replace('_', "");
        Self::ALL
            .into_iter()
            .find(|q| format!("{q:?}").to_ascii_uppercase() == squashed)
            .or_else(|| {
                let symbol = s.trim();
                Self::ALL.into_iter().find(|q| !symbol.is_empty() && q.symbol() == symbol)
            })
            .ok_or_else(|| HarmonyError::InvalidArgument(format!("Unknown chord quality: {s}")))
    }
}

impl TryFrom<u8> for ChordQuality {
    type Error = HarmonyError;

    fn try_from(index: u8) -> Result<Self> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| {
                HarmonyError::InvalidArgument(format!("Unknown chord quality index: {index}"))
            })
    }
}

/// Drop voicings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VoicingType {
    /// Highest voice down an octave
    Drop1,
    /// Two highest voices down an octave
    Drop2,
}

impl FromStr for VoicingType {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self> {
        match normalize_label(s).replace('_', "").as_str() {
            "DROP1" => Ok(Self::Drop1),
            "DROP2" => Ok(Self::Drop2),
            _ => Err(HarmonyError::InvalidArgument(format!("Unknown voicing: {s}"))),
        }
    }
}

/// A chord in root position plus a separately rearranged voicing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chord {
    pub quality: ChordQuality,
    pub root: u8,
    /// Stored for inversions; no voicing reads it yet
    pub bass: u8,
    /// Root position, from `root` upward
    pub notes: Vec<Note>,
    /// Same length as `notes`, rearranged by [`Chord::set_voicing`]
    pub voicing: Vec<Note>,
}

impl Chord {
    /// Stack `quality` on `root`. Root and bass above 127 are clamped.
    pub fn new(quality: ChordQuality, bass: u8, root: u8) -> Self {
        let root = clamp_code("root", root);
        let bass = clamp_code("bass", bass);
        let notes = stack_intervals(root, quality.steps());

        tracing::trace!(
            "Chord {}{} notes {:?}",
            Note::to_text(root, false, false),
            quality.symbol(),
            notes.iter().map(|n| n.number).collect::<Vec<_>>()
        );

        Self {
            quality,
            root,
            bass,
            voicing: notes.clone(),
            notes,
        }
    }

    /// Rearrange `voicing` in place.
    ///
    /// With `drop_root`, the voiced root becomes the root-position root an
    /// octave lower. Drop2 leaves the former top note last, so the result is
    /// not pitch-sorted; use [`Chord::sorted_voicing`] if that matters.
    /// Notes below one octave are never dropped.
    pub fn set_voicing(&mut self, voicing: VoicingType, drop_root: bool) {
        if drop_root {
            let lowered = self.notes.first().and_then(Note::octave_down);
            if let (Some(lowered), Some(first)) = (lowered, self.voicing.first_mut()) {
                *first = lowered;
            }
        }

        match voicing {
            VoicingType::Drop1 => {
                drop_last(&mut self.voicing);
            }
            VoicingType::Drop2 => {
                drop_last(&mut self.voicing);
                if let Some(top) = self.voicing.pop() {
                    drop_last(&mut self.voicing);
                    self.voicing.push(top);
                }
            }
        }

        tracing::trace!(
            "{:?} voicing of {}: {:?}",
            voicing,
            self.short_text(),
            self.voicing_codes()
        );
    }

    /// Root name followed by the long label, e.g. "C Dominant 7'th"
    pub fn text(&self) -> String {
        format!("{} {}", Note::to_text(self.root, false, false), self.quality.label())
    }

    /// Root name followed by the symbol, e.g. "C7"
    pub fn short_text(&self) -> String {
        format!("{}{}", Note::to_text(self.root, false, false), self.quality.symbol())
    }

    pub fn codes(&self) -> Vec<u8> {
        self.notes.iter().map(|n| n.number).collect()
    }

    pub fn voicing_codes(&self) -> Vec<u8> {
        self.voicing.iter().map(|n| n.number).collect()
    }

    /// Voicing reordered low to high
    pub fn sorted_voicing(&self) -> Vec<Note> {
        let mut sorted = self.voicing.clone();
        sorted.sort_by_key(|n| n.number);
        sorted
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_text())
    }
}

fn clamp_code(what: &str, code: u8) -> u8 {
    if code > MAX_CODE {
        tracing::warn!("Chord {} {} out of range, clamped to {}", what, code, MAX_CODE);
        MAX_CODE
    } else {
        code
    }
}

fn drop_last(notes: &mut [Note]) {
    if let Some(last) = notes.last_mut() {
        if last.number >= OCTAVE {
            last.number -= OCTAVE;
        }
    }
}

/// Build a root-position chord
pub fn build_chord(quality: ChordQuality, bass: u8, root: u8) -> Chord {
    Chord::new(quality, bass, root)
}

/// Copy of `chord` with the voicing applied; `chord` is left as is
pub fn apply_voicing(chord: &Chord, voicing: VoicingType, drop_root: bool) -> Chord {
    let mut voiced = chord.clone();
    voiced.set_voicing(voicing, drop_root);
    voiced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chord_scenarios() {
        assert_eq!(build_chord(ChordQuality::Major, 60, 60).codes(), vec![60, 64, 67]);
        assert_eq!(build_chord(ChordQuality::Dominant7, 60, 60).codes(), vec![60, 64, 67, 70]);
        assert_eq!(build_chord(ChordQuality::Minor7Flat5, 60, 59).codes(), vec![59, 62, 65, 69]);
    }

    #[test]
    fn test_every_quality_follows_its_recipe() {
        for quality in ChordQuality::ALL {
            for root in [0u8, 36, 60, 100] {
                let chord = build_chord(quality, root, root);
                assert_eq!(chord.notes[0].number, root);
                assert_eq!(chord.notes.len(), quality.steps().len() + 1);
                let deltas: Vec<u8> =
                    chord.notes.windows(2).map(|p| p[1].number - p[0].number).collect();
                assert_eq!(deltas, quality.steps(), "{quality:?}");
                assert_eq!(chord.voicing, chord.notes);
            }
        }
    }

    #[test]
    fn test_drop1() {
        let chord = build_chord(ChordQuality::Major7, 60, 60);
        let voiced = apply_voicing(&chord, VoicingType::Drop1, false);
        assert_eq!(voiced.voicing_codes(), vec![60, 64, 67, 59]);
        assert_eq!(chord.voicing_codes(), vec![60, 64, 67, 71]);

        let voiced = apply_voicing(&chord, VoicingType::Drop1, true);
        assert_eq!(voiced.voicing_codes(), vec![48, 64, 67, 59]);
        assert_eq!(voiced.notes, chord.notes);
    }

    #[test]
    fn test_drop1_changes_only_droppable_notes() {
        for quality in ChordQuality::ALL {
            for root in 0..=MAX_CODE {
                let chord = build_chord(quality, root, root);
                let voiced = apply_voicing(&chord, VoicingType::Drop1, true);
                assert_eq!(voiced.voicing.len(), chord.notes.len());

                let last = chord.notes.len() - 1;
                for (k, (before, after)) in chord.notes.iter().zip(&voiced.voicing).enumerate() {
                    let droppable = (k == 0 || k == last) && before.number >= OCTAVE;
                    let expected = if droppable { before.number - OCTAVE } else { before.number };
                    assert_eq!(after.number, expected, "{quality:?} root {root} note {k}");
                }
            }
        }
    }

    #[test]
    fn test_drop2_keeps_former_top_last() {
        let chord = build_chord(ChordQuality::Dominant7, 60, 60);
        let voiced = apply_voicing(&chord, VoicingType::Drop2, false);
        assert_eq!(voiced.voicing_codes(), vec![60, 64, 55, 58]);
        let sorted: Vec<u8> = voiced.sorted_voicing().iter().map(|n| n.number).collect();
        assert_eq!(sorted, vec![55, 58, 60, 64]);

        let voiced = apply_voicing(&chord, VoicingType::Drop2, true);
        assert_eq!(voiced.voicing_codes(), vec![48, 64, 55, 58]);

        for quality in ChordQuality::ALL {
            let chord = build_chord(quality, 72, 72);
            let voiced = apply_voicing(&chord, VoicingType::Drop2, false);
            let n = chord.notes.len();
            assert_eq!(voiced.voicing.len(), n);
            assert_eq!(voiced.voicing[n - 1].number, chord.notes[n - 1].number - OCTAVE);
            assert_eq!(voiced.voicing[n - 2].number, chord.notes[n - 2].number - OCTAVE);
        }
    }

    #[test]
    fn test_low_notes_are_not_dropped() {
        let chord = build_chord(ChordQuality::Sus2, 0, 0);
        let voiced = apply_voicing(&chord, VoicingType::Drop2, true);
        assert_eq!(voiced.voicing_codes(), vec![0, 2, 7]);
    }

    #[test]
    fn test_text() {
        let chord = build_chord(ChordQuality::Dominant7, 60, 61);
        assert_eq!(chord.text(), "C# Dominant 7'th");
        assert_eq!(chord.short_text(), "C#7");
        assert_eq!(build_chord(ChordQuality::Major, 60, 60).short_text(), "C");
    }

    #[test]
    fn test_parse_quality() {
        assert_eq!("dominant7".parse::<ChordQuality>().ok(), Some(ChordQuality::Dominant7));
        assert_eq!("MINOR_7_FLAT5".parse::<ChordQuality>().ok(), Some(ChordQuality::Minor7Flat5));
        assert_eq!("m7".parse::<ChordQuality>().ok(), Some(ChordQuality::Minor7));
        assert_eq!("7#9".parse::<ChordQuality>().ok(), Some(ChordQuality::Dominant7Sharp9));
        assert!(matches!("power".parse::<ChordQuality>(), Err(HarmonyError::InvalidArgument(_))));
        assert!(matches!(ChordQuality::try_from(30), Err(HarmonyError::InvalidArgument(_))));
        assert_eq!("drop-2".parse::<VoicingType>().ok(), Some(VoicingType::Drop2));
    }

    #[test]
    fn test_out_of_range_root_is_clamped() {
        let chord = build_chord(ChordQuality::Minor, 255, 255);
        assert_eq!(chord.root, 127);
        assert_eq!(chord.bass, 127);
        assert_eq!(chord.codes(), vec![127, 130, 134]);
    }
}
