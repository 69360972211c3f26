//! Exhaustive enumeration of per-string fret choices
//!
//! Every string independently offers the choices that sound a chord tone
//! (open first, then frets `1..=max_fret` ascending) followed by muting it.
//! The cartesian product of those lists, first string most significant, is
//! the full candidate set in depth-first discovery order.

use crate::chord::ChordTones;
use crate::pitch::PitchClass;

use super::types::{FretChoice, RawFingering};

/// Strings that must sound for a shape to count as a chord
pub const MIN_SOUNDED_STRINGS: usize = 3;

/// Choices for one string, in search order
pub fn string_choices(open: PitchClass, tones: &ChordTones, max_fret: u8) -> Vec<FretChoice> {
    let mut choices = Vec::new();
    if tones.contains(open) {
        choices.push(FretChoice::Open);
    }
    for fret in 1..=max_fret {
        if tones.contains(open.transpose(fret as i32)) {
            choices.push(FretChoice::Fretted(fret));
        }
    }
    choices.push(FretChoice::Muted);
    choices
}

/// Lazy cartesian product of per-string choice lists, in depth-first order.
///
/// Holds one position per string and advances the last string first, so
/// only the current candidate is ever in memory.
#[derive(Debug, Clone)]
pub struct Combinations {
    choices: Vec<Vec<FretChoice>>,
    positions: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    pub fn new(choices: Vec<Vec<FretChoice>>) -> Self {
        Combinations {
            positions: vec![0; choices.len()],
            exhausted: choices.iter().any(Vec::is_empty),
            choices,
        }
    }
}

impl Iterator for Combinations {
    type Item = RawFingering;

    fn next(&mut self) -> Option<RawFingering> {
        if self.exhausted {
            return None;
        }
        let current: RawFingering = self
            .positions
            .iter()
            .zip(&self.choices)
            .map(|(&pos, choices)| choices[pos])
            .collect();

        self.exhausted = true;
        for (pos, choices) in self.positions.iter_mut().zip(&self.choices).rev() {
            *pos += 1;
            if *pos < choices.len() {
                self.exhausted = false;
                break;
            }
            *pos = 0;
        }
        Some(current)
    }
}

/// Every raw fingering of `tuning` whose sounded strings are all chord tones
pub fn enumerate(tuning: &[PitchClass], tones: &ChordTones, max_fret: u8) -> Combinations {
    Combinations::new(
        tuning
            .iter()
            .map(|open| string_choices(*open, tones, max_fret))
            .collect(),
    )
}

/// A raw fingering sounds every chord tone on at least three strings
pub fn is_valid(frets: &[FretChoice], tuning: &[PitchClass], tones: &ChordTones) -> bool {
    let sounded: Vec<PitchClass> = frets
        .iter()
        .zip(tuning)
        .filter_map(|(choice, open)| choice.sounding(*open))
        .collect();
    sounded.len() >= MIN_SOUNDED_STRINGS && tones.iter().all(|tone| sounded.contains(&tone))
}
