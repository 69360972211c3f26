//! # Chord Model
//!
//! Static chord-quality table and the chord descriptor produced by the parser.
//!
//! ## Quality Table
//! | Quality | Intervals      | Suffix |
//! |---------|----------------|--------|
//! | major   | 0, 4, 7        |        |
//! | minor   | 0, 3, 7        | m      |
//! | dom7    | 0, 4, 7, 10    | 7      |
//! | maj7    | 0, 4, 7, 11    | maj7   |
//! | min7    | 0, 3, 7, 10    | m7     |
//! | sus2    | 0, 2, 7        | sus2   |
//! | sus4    | 0, 5, 7        | sus4   |
//! | dim     | 0, 3, 6        | dim    |
//! | aug     | 0, 4, 8        | aug    |
//!
//! ## Related Modules
//! - `chord_parser` - Builds `ChordDescriptor`s from text
//! - `fingering` - Searches for shapes sounding a `ChordTones` set

use serde::Serialize;
use std::fmt;

use crate::pitch::PitchClass;

/// Chord qualities known to the parser
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordQuality {
    Major,
    Minor,
    Dom7,
    Maj7,
    Min7,
    Sus2,
    Sus4,
    Dim,
    Aug,
}

impl ChordQuality {
    pub const ALL: [ChordQuality; 9] = [
        ChordQuality::Major,
        ChordQuality::Minor,
        ChordQuality::Dom7,
        ChordQuality::Maj7,
        ChordQuality::Min7,
        ChordQuality::Sus2,
        ChordQuality::Sus4,
        ChordQuality::Dim,
        ChordQuality::Aug,
    ];

    /// Semitones above the root, root first
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordQuality::Major => &[0, 4, 7],
            ChordQuality::Minor => &[0, 3, 7],
            ChordQuality::Dom7 => &[0, 4, 7, 10],
            ChordQuality::Maj7 => &[0, 4, 7, 11],
            ChordQuality::Min7 => &[0, 3, 7, 10],
            ChordQuality::Sus2 => &[0, 2, 7],
            ChordQuality::Sus4 => &[0, 5, 7],
            ChordQuality::Dim => &[0, 3, 6],
            ChordQuality::Aug => &[0, 4, 8],
        }
    }

    /// Suffix appended to the root name in a chord symbol
    pub fn suffix(self) -> &'static str {
        match self {
            ChordQuality::Major => "",
            ChordQuality::Minor => "m",
            ChordQuality::Dom7 => "7",
            ChordQuality::Maj7 => "maj7",
            ChordQuality::Min7 => "m7",
            ChordQuality::Sus2 => "sus2",
            ChordQuality::Sus4 => "sus4",
            ChordQuality::Dim => "dim",
            ChordQuality::Aug => "aug",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Dom7 => "Dominant seventh",
            ChordQuality::Maj7 => "Major seventh",
            ChordQuality::Min7 => "Minor seventh",
            ChordQuality::Sus2 => "Suspended second",
            ChordQuality::Sus4 => "Suspended fourth",
            ChordQuality::Dim => "Diminished",
            ChordQuality::Aug => "Augmented",
        }
    }

    /// Exact suffix lookup
    pub fn from_suffix(suffix: &str) -> Option<Self> {
        ChordQuality::ALL.into_iter().find(|q| q.suffix() == suffix)
    }

    /// Suffix lookup that falls back to major for anything unrecognized.
    ///
    /// This permissive default is kept for compatibility with existing chord
    /// charts; callers wanting strictness should use [`ChordQuality::from_suffix`].
    pub fn from_suffix_or_major(suffix: &str) -> Self {
        Self::from_suffix(suffix).unwrap_or(ChordQuality::Major)
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The pitch classes a chord requires.
///
/// Set semantics (no duplicates) but ordered: the root comes first, followed by
/// the remaining tones in interval order. Scoring reads the root from here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChordTones(Vec<PitchClass>);

impl ChordTones {
    /// Collect tones, dropping repeats while keeping first-seen order
    pub fn new<I: IntoIterator<Item = PitchClass>>(tones: I) -> Self {
        let mut out: Vec<PitchClass> = Vec::new();
        for pc in tones {
            if !out.contains(&pc) {
                out.push(pc);
            }
        }
        ChordTones(out)
    }

    pub fn root(&self) -> Option<PitchClass> {
        self.0.first().copied()
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.0.contains(&pc)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PitchClass> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[PitchClass] {
        &self.0
    }

    /// Same tones regardless of order
    pub fn same_set(&self, other: &ChordTones) -> bool {
        self.len() == other.len() && self.iter().all(|pc| other.contains(pc))
    }
}

/// Pitch classes of `quality` built on `root`, each wrapped mod 12.
///
/// # Examples
/// ```
/// use fretwise::chord::{chord_notes, ChordQuality};
/// use fretwise::pitch::PitchClass;
///
/// let a = PitchClass::from_name("A").unwrap();
/// let names: Vec<&str> = chord_notes(a, ChordQuality::Min7).iter().map(|p| p.name()).collect();
/// assert_eq!(names, vec!["A", "C", "E", "G"]);
/// ```
pub fn chord_notes(root: PitchClass, quality: ChordQuality) -> ChordTones {
    ChordTones::new(
        quality
            .intervals()
            .iter()
            .map(|interval| root.transpose(*interval as i32)),
    )
}

/// A parsed chord symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordDescriptor {
    pub root: PitchClass,
    pub quality: ChordQuality,
    pub required_notes: ChordTones,
    pub symbol: String,
}

impl ChordDescriptor {
    pub fn new(root: PitchClass, quality: ChordQuality) -> Self {
        ChordDescriptor {
            root,
            quality,
            required_notes: chord_notes(root, quality),
            symbol: format!("{}{}", root.name(), quality.suffix()),
        }
    }
}

impl fmt::Display for ChordDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pc(name: &str) -> PitchClass {
        PitchClass::from_name(name).unwrap()
    }

    #[test]
    fn test_chord_notes_wrap() {
        let b_aug = chord_notes(pc("B"), ChordQuality::Aug);
        assert_eq!(b_aug.as_slice(), &[pc("B"), pc("D#"), pc("G")]);
    }

    #[test]
    fn test_root_first() {
        for quality in ChordQuality::ALL {
            let tones = chord_notes(pc("F#"), quality);
            assert_eq!(tones.root(), Some(pc("F#")));
            assert_eq!(tones.len(), quality.intervals().len());
        }
    }

    #[test]
    fn test_tones_dedupe() {
        let tones = ChordTones::new([pc("C"), pc("E"), pc("C"), pc("G"), pc("E")]);
        assert_eq!(tones.as_slice(), &[pc("C"), pc("E"), pc("G")]);
        let reordered = ChordTones::new([pc("G"), pc("C"), pc("E")]);
        assert!(tones.same_set(&reordered));
        assert_ne!(tones, reordered);
    }

    #[test]
    fn test_suffix_lookup() {
        assert_eq!(ChordQuality::from_suffix("m7"), Some(ChordQuality::Min7));
        assert_eq!(ChordQuality::from_suffix(""), Some(ChordQuality::Major));
        assert_eq!(ChordQuality::from_suffix("9"), None);
        assert_eq!(ChordQuality::from_suffix_or_major("9"), ChordQuality::Major);
    }

    #[test]
    fn test_descriptor_symbol() {
        let chord = ChordDescriptor::new(pc("C#"), ChordQuality::Sus4);
        assert_eq!(chord.symbol, "C#sus4");
        assert_eq!(chord.to_string(), "C#sus4");
        assert_eq!(chord.required_notes.as_slice(), &[pc("C#"), pc("F#"), pc("G#")]);
    }
}
