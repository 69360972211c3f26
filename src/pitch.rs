//! Pitch-class arithmetic over the 12-tone chromatic scale.
//!
//! Only the sharp spellings are recognized here. Flat roots are mapped to
//! their sharp equivalents by the chord parser before they reach this module.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{FretError, Result};

/// Chromatic note names, index = semitones above C
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// A pitch class in `0..12`.
///
/// Serialized as its sharp note name ("C#", not 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PitchClass(u8);

impl PitchClass {
    /// Build a pitch class from any integer, wrapping with floor-mod 12
    pub fn new(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    /// Look up a sharp-spelled note name ("C", "F#", ...).
    pub fn from_name(name: &str) -> Result<Self> {
        NOTE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| PitchClass(i as u8))
            .ok_or_else(|| FretError::UnknownNote(name.to_string()))
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn name(self) -> &'static str {
        NOTE_NAMES[self.0 as usize]
    }

    /// Pitch class `semitones` above this one (negative goes down)
    pub fn transpose(self, semitones: i32) -> Self {
        PitchClass::new(self.0 as i32 + semitones)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for PitchClass {
    type Error = FretError;

    fn try_from(name: String) -> Result<Self> {
        PitchClass::from_name(name.trim())
    }
}

impl From<PitchClass> for String {
    fn from(pc: PitchClass) -> Self {
        pc.name().to_string()
    }
}

/// Index of a sharp-spelled note name.
///
/// # Examples
/// ```
/// use fretwise::pitch::note_index;
///
/// assert_eq!(note_index("A").unwrap().index(), 9);
/// assert!(note_index("Bb").is_err());
/// ```
pub fn note_index(name: &str) -> Result<PitchClass> {
    PitchClass::from_name(name)
}

/// Note name for any integer, wrapped into the octave first.
///
/// # Examples
/// ```
/// use fretwise::pitch::note_by_index;
///
/// assert_eq!(note_by_index(13), "C#");
/// assert_eq!(note_by_index(-1), "B");
/// ```
pub fn note_by_index(index: i32) -> &'static str {
    PitchClass::new(index).name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_index_table() {
        for (i, name) in NOTE_NAMES.iter().enumerate() {
            assert_eq!(note_index(name).unwrap().index() as usize, i);
        }
    }

    #[test]
    fn test_unknown_note() {
        assert!(matches!(note_index("H"), Err(FretError::UnknownNote(n)) if n == "H"));
        assert!(note_index("Db").is_err());
        assert!(note_index("").is_err());
    }

    #[test]
    fn test_floor_mod_wrapping() {
        assert_eq!(note_by_index(0), "C");
        assert_eq!(note_by_index(12), "C");
        assert_eq!(note_by_index(-12), "C");
        assert_eq!(note_by_index(-13), "B");
        assert_eq!(note_by_index(4 + 7), "B");
        assert_eq!(PitchClass::new(-25), PitchClass::new(11));
    }

    #[test]
    fn test_transpose() {
        let e = note_index("E").unwrap();
        assert_eq!(e.transpose(3).name(), "G");
        assert_eq!(e.transpose(-5).name(), "B");
        assert_eq!(e.transpose(12), e);
    }

    #[test]
    fn test_serde_as_name() {
        let pcs: Vec<PitchClass> = serde_yaml::from_str("[E, A, \"F#\"]").unwrap();
        assert_eq!(pcs, vec![PitchClass::new(4), PitchClass::new(9), PitchClass::new(6)]);
        let out = serde_json::to_string(&pcs).unwrap();
        assert_eq!(out, r#"["E","A","F#"]"#);
        assert!(serde_yaml::from_str::<Vec<PitchClass>>("[Fb]").is_err());
    }
}
