//! Fingering data type definitions
//!
//! This module defines the per-string fret choices, barres and finished
//! fingerings produced by the search.

use serde::ser::Serializer;
use serde::Serialize;
use std::fmt;

use crate::pitch::PitchClass;

/// Finger number: 1 = index, 2 = middle, 3 = ring, 4 = little
pub type Finger = u8;

/// What one string does in a fingering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FretChoice {
    /// Not played
    Muted,
    /// Played without pressing a fret
    Open,
    /// Pressed at fret `n` (1-based)
    Fretted(u8),
}

impl FretChoice {
    pub fn is_muted(self) -> bool {
        matches!(self, FretChoice::Muted)
    }

    pub fn is_open(self) -> bool {
        matches!(self, FretChoice::Open)
    }

    /// Fret number of a sounded string (open = 0), `None` when muted
    pub fn fret(self) -> Option<u8> {
        match self {
            FretChoice::Muted => None,
            FretChoice::Open => Some(0),
            FretChoice::Fretted(n) => Some(n),
        }
    }

    /// Fret number of a pressed string, `None` when open or muted
    pub fn pressed(self) -> Option<u8> {
        match self {
            FretChoice::Fretted(n) => Some(n),
            _ => None,
        }
    }

    /// Pitch class this string sounds when tuned to `open`
    pub fn sounding(self, open: PitchClass) -> Option<PitchClass> {
        self.fret().map(|fret| open.transpose(fret as i32))
    }
}

/// Muted strings serialize as `"x"`, sounded strings as their fret number
impl Serialize for FretChoice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.fret() {
            None => serializer.serialize_str("x"),
            Some(fret) => serializer.serialize_u8(fret),
        }
    }
}

impl fmt::Display for FretChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fret() {
            None => f.write_str("x"),
            Some(fret) if fret < 10 => write!(f, "{}", fret),
            Some(fret) => write!(f, "({})", fret),
        }
    }
}

/// One fret choice per string, before fingers are assigned
pub type RawFingering = Vec<FretChoice>;

/// Index finger laid across several strings at one fret.
///
/// Covers every string in `from_string..=to_string` that is pressed at `fret`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Barre {
    pub fret: u8,
    pub from_string: usize,
    pub to_string: usize,
}

/// A finished, fingered chord shape
///
/// # Fields
/// - `frets`: one choice per string, in the instrument's string order
/// - `barre`: the barre, if finger 1 lies across several strings
/// - `fingers`: finger pressing each string, parallel to `frets`
///   (`None` for open and muted strings)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Fingering {
    pub frets: RawFingering,
    pub barre: Option<Barre>,
    pub fingers: Vec<Option<Finger>>,
}

impl Fingering {
    /// Number of strings that sound
    pub fn sounded_count(&self) -> usize {
        self.frets.iter().filter(|f| !f.is_muted()).count()
    }

    /// Index of the first sounded string
    pub fn bass_string(&self) -> Option<usize> {
        self.frets.iter().position(|f| !f.is_muted())
    }

    /// Highest fret used by a sounded string (0 when all are open or muted)
    pub fn highest_fret(&self) -> u8 {
        self.frets.iter().filter_map(|f| f.fret()).max().unwrap_or(0)
    }

    /// Pitch class each string sounds under `tuning`, `None` for muted strings
    pub fn sounded_notes(&self, tuning: &[PitchClass]) -> Vec<Option<PitchClass>> {
        self.frets
            .iter()
            .zip(tuning)
            .map(|(choice, open)| choice.sounding(*open))
            .collect()
    }

    /// Distinct fingers in use
    pub fn fingers_used(&self) -> Vec<Finger> {
        let mut used: Vec<Finger> = self.fingers.iter().flatten().copied().collect();
        used.sort_unstable();
        used.dedup();
        used
    }
}

/// Tab-style frets, lowest-index string first: `x32010`
impl fmt::Display for Fingering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for choice in &self.frets {
            write!(f, "{}", choice)?;
        }
        Ok(())
    }
}

/// Counters from one exhaustive search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// Complete per-string combinations reached
    pub generated: usize,
    /// Combinations missing a chord tone or sounding fewer than three strings
    pub rejected_by_validity: usize,
    /// Combinations that could not be fingered or failed the hand-shape checks
    pub rejected_by_playability: usize,
    /// Fingerings that survived every filter, before the top-K cut
    pub playable: usize,
}

/// Search parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchOptions {
    /// Highest fret considered (frets `1..=max_fret`)
    pub max_fret: u8,
    /// Number of ranked fingerings to keep
    pub limit: usize,
}

pub const DEFAULT_MAX_FRET: u8 = 5;
pub const DEFAULT_LIMIT: usize = 6;

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_fret: DEFAULT_MAX_FRET,
            limit: DEFAULT_LIMIT,
        }
    }
}
