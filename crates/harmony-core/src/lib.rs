//! harmony-core: note, scale, mode and chord computation for synth controllers
//!
//! Everything here is a bounded, deterministic computation over a handful of
//! notes. Failures come back as [`HarmonyError`] values; nothing panics.

pub mod chord;
pub mod config;
mod error;
pub mod mode;
pub mod note;
pub mod progression;
pub mod scale;
pub mod scale_type;

pub use chord::{apply_voicing, build_chord, Chord, ChordQuality, ChordRecipe, VoicingType};
pub use config::EngineConfig;
pub use error::{HarmonyError, Result};
pub use mode::{Mode, NoteOrder};
pub use note::{note_from_name, note_name, Note};
pub use progression::{progression_stacks, ChordProgression, Degree, DegreeStack, ProgressionType};
pub use scale::{build_scale, Scale};
pub use scale_type::{ScaleFamily, ScaleSpec, ScaleType};
