//! Engine selections supplied by the control loop

use serde::{Deserialize, Serialize};

use crate::chord::{apply_voicing, build_chord, Chord, ChordQuality, VoicingType};
use crate::error::Result;
use crate::mode::Mode;
use crate::note::{Note, MAX_CODE, MIDDLE_C};
use crate::scale::{build_scale, Scale};
use crate::scale_type::ScaleType;

/// Current scale/chord selection and display preferences.
///
/// Deserializes from TOML; missing keys fall back to the defaults (C major,
/// middle C, sharps, octave shown).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub root: u8,
    pub scale: ScaleType,
    /// Rotation used by [`EngineConfig::selected_mode`]
    pub mode: usize,
    pub chord: ChordQuality,
    pub voicing: Option<VoicingType>,
    pub drop_root: bool,
    pub prefer_flats: bool,
    pub show_octave: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root: MIDDLE_C,
            scale: ScaleType::Major,
            mode: 0,
            chord: ChordQuality::Major,
            voicing: None,
            drop_root: false,
            prefer_flats: false,
            show_octave: true,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document. A root above 127 is clamped.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(text)?;
        if config.root > MAX_CODE {
            tracing::warn!("Configured root {} out of range, clamped to {}", config.root, MAX_CODE);
            config.root = MAX_CODE;
        }
        tracing::debug!(
            "Engine config: {} on {}, chord {}",
            config.scale,
            config.note_name(config.root),
            config.chord.symbol()
        );
        Ok(config)
    }

    pub fn build_scale(&self) -> Result<Scale> {
        build_scale(self.scale, self.root)
    }

    /// The configured rotation of the configured scale
    pub fn selected_mode(&self) -> Result<Mode> {
        self.build_scale()?.mode(self.mode).cloned()
    }

    /// Chord on the configured root with the configured voicing applied
    pub fn build_chord(&self) -> Chord {
        let chord = build_chord(self.chord, self.root, self.root);
        match self.voicing {
            Some(voicing) => apply_voicing(&chord, voicing, self.drop_root),
            None => chord,
        }
    }

    /// Render a pitch code with the configured display preferences
    pub fn note_name(&self, code: u8) -> String {
        Note::to_text(code, self.prefer_flats, self.show_octave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarmonyError;

    #[test]
    fn test_empty_document_gives_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.build_scale().unwrap(), Scale::default());
    }

    #[test]
    fn test_full_document() {
        let config = EngineConfig::from_toml_str(
            r#"
            root = 61
            scale = "HarmonicMinor"
            mode = 4
            chord = "Dominant7"
            voicing = "Drop2"
            drop_root = true
            prefer_flats = true
            show_octave = false
            "#,
        )
        .unwrap();

        assert_eq!(config.note_name(61), "Db");
        assert_eq!(config.selected_mode().unwrap().name(), "Phrygian Dominant");

        let chord = config.build_chord();
        assert_eq!(chord.codes(), vec![61, 65, 68, 71]);
        assert_eq!(chord.voicing_codes(), vec![49, 65, 56, 59]);
    }

    #[test]
    fn test_root_is_clamped() {
        let config = EngineConfig::from_toml_str("root = 200").unwrap();
        assert_eq!(config.root, 127);
    }

    #[test]
    fn test_bad_documents() {
        assert!(matches!(
            EngineConfig::from_toml_str(r#"scale = "Lydian""#),
            Err(HarmonyError::Config(_))
        ));
        assert!(matches!(EngineConfig::from_toml_str("root = 300"), Err(HarmonyError::Config(_))));
        assert!(matches!(EngineConfig::from_toml_str("root = "), Err(HarmonyError::Config(_))));

        let config = EngineConfig::from_toml_str("mode = 9").unwrap();
        assert!(matches!(config.selected_mode(), Err(HarmonyError::InvalidArgument(_))));
    }
}
