//! Scales: every rotation of a scale type built from one root

use serde::{Deserialize, Serialize};

use crate::error::{HarmonyError, Result};
use crate::mode::Mode;
use crate::note::{Note, MAX_CODE, MIDDLE_C};
use crate::scale_type::{ScaleFamily, ScaleType};

/// A scale with one [`Mode`] per rotation, all sharing root and type.
///
/// Not `Copy`; cloning copies the whole mode collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub family: ScaleFamily,
    pub scale_type: ScaleType,
    pub root: u8,
    pub note_count: usize,
    pub mode_count: usize,
    pub modes: Vec<Mode>,
}

impl Default for Scale {
    /// Major scale on middle C with all seven rotations
    fn default() -> Self {
        let spec = ScaleType::Major.spec();
        Self {
            family: spec.family,
            scale_type: ScaleType::Major,
            root: MIDDLE_C,
            note_count: spec.note_count,
            mode_count: spec.mode_count,
            modes: spec
                .table
                .iter()
                .enumerate()
                .map(|(rotation, row)| Mode {
                    scale_type: ScaleType::Major,
                    rotation,
                    root: MIDDLE_C,
                    notes: crate::mode::stack_intervals(MIDDLE_C, &row[..spec.note_count - 1]),
                })
                .collect(),
        }
    }
}

impl Scale {
    /// Build every rotation of `scale_type` from `root`. Roots above 127 are
    /// clamped to 127.
    pub fn new(scale_type: ScaleType, root: u8) -> Result<Self> {
        let spec = scale_type.spec();
        let root = if root > MAX_CODE {
            tracing::warn!("Scale root {} out of range, clamped to {}", root, MAX_CODE);
            MAX_CODE
        } else {
            root
        };

        let modes = (0..spec.mode_count)
            .map(|rotation| Mode::new(root, scale_type, rotation, spec.note_count))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Built {} scale on {} with {} modes of {} notes",
            scale_type,
            Note::to_text(root, false, true),
            spec.mode_count,
            spec.note_count
        );

        Ok(Self {
            family: spec.family,
            scale_type,
            root,
            note_count: spec.note_count,
            mode_count: spec.mode_count,
            modes,
        })
    }

    /// Like [`Scale::new`], with the type given by name ("MAJOR", "blues minor")
    pub fn from_name(name: &str, root: u8) -> Result<Self> {
        Self::new(name.parse()?, root)
    }

    /// Mode for `rotation`
    pub fn mode(&self, rotation: usize) -> Result<&Mode> {
        self.modes.get(rotation).ok_or_else(|| {
            HarmonyError::InvalidArgument(format!(
                "{} has {} modes, mode {} requested",
                self.scale_type, self.mode_count, rotation
            ))
        })
    }

    pub fn text(&self) -> String {
        format!("Scale::{}", self.scale_type.label())
    }
}

/// Build a scale from a type selector and root
pub fn build_scale(scale_type: ScaleType, root: u8) -> Result<Scale> {
    Scale::new(scale_type, root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_scenario() {
        let scale = build_scale(ScaleType::Major, 60).unwrap();
        assert_eq!(scale.modes[0].codes(), vec![60, 62, 64, 65, 67, 69, 71]);
        assert_eq!(scale.modes[1].codes(), vec![60, 62, 63, 65, 67, 69, 70]);
        assert_eq!(scale.text(), "Scale::MAJOR");
    }

    #[test]
    fn test_default_is_major_on_middle_c() {
        let scale = Scale::default();
        assert_eq!(scale, build_scale(ScaleType::Major, 60).unwrap());
        assert_eq!(scale.mode_count, 7);
        assert_eq!(scale.family, ScaleFamily::Heptatonic);
    }

    #[test]
    fn test_every_type_and_root() {
        for ty in ScaleType::ALL {
            for root in 0..=MAX_CODE {
                let scale = build_scale(ty, root).unwrap();
                assert_eq!(scale.modes.len(), scale.mode_count);
                for (rotation, mode) in scale.modes.iter().enumerate() {
                    assert_eq!(mode.rotation, rotation);
                    assert_eq!(mode.scale_type, ty);
                    assert_eq!(mode.note_count(), scale.note_count);
                    assert_eq!(mode.notes[0].number, root);
                }
            }
        }
    }

    #[test]
    fn test_root_is_clamped() {
        let scale = build_scale(ScaleType::Pentatonic, 200).unwrap();
        assert_eq!(scale.root, 127);
        assert_eq!(scale.modes[0].notes[0].number, 127);
    }

    #[test]
    fn test_unknown_type_name_is_an_error() {
        assert!(matches!(Scale::from_name("klingon", 60), Err(HarmonyError::InvalidArgument(_))));
        let blues = Scale::from_name("blues minor", 57).unwrap();
        assert_eq!(blues.mode_count, 6);
    }

    #[test]
    fn test_mode_lookup() {
        let scale = build_scale(ScaleType::Octatonic, 60).unwrap();
        assert_eq!(scale.mode(1).unwrap().codes(), vec![60, 62, 63, 65, 66, 68, 69, 71]);
        assert!(matches!(scale.mode(2), Err(HarmonyError::InvalidArgument(_))));
    }
}
