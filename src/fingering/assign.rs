//! Barre detection and finger assignment
//!
//! Turns a valid raw fingering into a [`Fingering`] by deciding whether the
//! index finger lies across several strings and numbering the fingers that
//! press the remaining frets.

use thiserror::Error;
use tracing::trace;

use super::types::{Barre, Finger, Fingering, FretChoice};

/// Fingers available to the fretting hand
const ALL_FINGERS: [Finger; 4] = [1, 2, 3, 4];

/// Finger that holds a barre
const BARRE_FINGER: Finger = 1;

/// Most extra fingers a barre shape may use besides the index finger
const MAX_FINGERS_WITH_BARRE: usize = 3;

/// A pressed string had no free finger left
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("no finger left for string {string} at fret {fret}")]
pub struct AssignmentFailure {
    pub string: usize,
    pub fret: u8,
}

/// No sounded string comes before a muted one
pub fn muted_strings_lead(frets: &[FretChoice]) -> bool {
    let first_sounded = frets.iter().position(|f| !f.is_muted()).unwrap_or(frets.len());
    frets[first_sounded..].iter().all(|f| !f.is_muted())
}

/// Barre the shape calls for, if any.
///
/// A barre needs no open strings, mutes only at the start, at least two
/// pressed strings, and at least two strings on the lowest pressed fret. It
/// spans from the first to the last string on that fret.
pub fn find_barre(frets: &[FretChoice]) -> Option<Barre> {
    if frets.iter().any(|f| f.is_open()) || !muted_strings_lead(frets) {
        return None;
    }

    let pressed: Vec<u8> = frets.iter().filter_map(|f| f.pressed()).collect();
    if pressed.len() < 2 {
        return None;
    }
    let min_fret = *pressed.iter().min()?;

    let on_min_fret: Vec<usize> = frets
        .iter()
        .enumerate()
        .filter(|(_, f)| f.pressed() == Some(min_fret))
        .map(|(i, _)| i)
        .collect();
    if on_min_fret.len() < 2 {
        return None;
    }

    Some(Barre {
        fret: min_fret,
        from_string: *on_min_fret.first()?,
        to_string: *on_min_fret.last()?,
    })
}

/// Number the fingers pressing each fret.
///
/// With a barre, finger 1 takes every string in its range sitting on the
/// barre fret. The remaining pressed strings are taken in ascending fret
/// order (string order on ties) and handed the next free finger.
pub fn assign_fingers(
    frets: &[FretChoice],
    barre: Option<&Barre>,
) -> Result<Vec<Option<Finger>>, AssignmentFailure> {
    let mut fingers: Vec<Option<Finger>> = vec![None; frets.len()];

    if let Some(barre) = barre {
        for (i, fret) in frets.iter().enumerate() {
            if (barre.from_string..=barre.to_string).contains(&i) && fret.pressed() == Some(barre.fret) {
                fingers[i] = Some(BARRE_FINGER);
            }
        }
    }

    let mut available = ALL_FINGERS
        .iter()
        .copied()
        .filter(|f| barre.is_none() || *f != BARRE_FINGER);

    let mut pressed: Vec<(usize, u8)> = frets
        .iter()
        .enumerate()
        .filter_map(|(i, f)| f.pressed().map(|fret| (i, fret)))
        .collect();
    // Stable: equal frets keep string order
    pressed.sort_by_key(|(_, fret)| *fret);

    for (string, fret) in pressed {
        if fingers[string].is_some() {
            continue;
        }
        match available.next() {
            Some(finger) => fingers[string] = Some(finger),
            None => return Err(AssignmentFailure { string, fret }),
        }
    }

    Ok(fingers)
}

/// Build the fingered shape for a valid raw fingering.
///
/// Tries a barre first and falls back to plain fingering when the barre
/// can't be fingered or needs too many extra fingers. Returns `None` when even
/// the plain fingering runs out of fingers.
pub fn process_fingering(frets: &[FretChoice]) -> Option<Fingering> {
    if let Some(barre) = find_barre(frets) {
        match assign_fingers(frets, Some(&barre)) {
            Ok(fingers) => {
                let mut extra: Vec<Finger> = frets
                    .iter()
                    .zip(&fingers)
                    .filter(|(f, _)| f.pressed().is_some_and(|fret| fret > barre.fret))
                    .filter_map(|(_, finger)| *finger)
                    .filter(|finger| *finger != BARRE_FINGER)
                    .collect();
                extra.sort_unstable();
                extra.dedup();
                // Always true with the current pools: the barre leaves only
                // fingers 2-4. Likewise a shape the barre can't finger has too
                // many pressed strings for the plain fallback below.
                if extra.len() <= MAX_FINGERS_WITH_BARRE {
                    return Some(Fingering {
                        frets: frets.to_vec(),
                        barre: Some(barre),
                        fingers,
                    });
                }
                trace!(fingers = extra.len(), "barre needs too many fingers");
            }
            Err(e) => trace!(error = %e, "barre fingering failed"),
        }
    }

    match assign_fingers(frets, None) {
        Ok(fingers) => Some(Fingering {
            frets: frets.to_vec(),
            barre: None,
            fingers,
        }),
        Err(e) => {
            trace!(error = %e, "discarding unfingerable shape");
            None
        }
    }
}
