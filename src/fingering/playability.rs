//! Hand-shape checks for fingered chords

use super::assign::muted_strings_lead;
use super::types::{Finger, Fingering};

/// Widest fret span the hand covers
pub const MAX_FRET_SPAN: u8 = 3;

/// Largest combined string + fret distance between neighbouring fingers
/// when they are apart in both directions
const MAX_NEIGHBOUR_STRETCH: usize = 4;

/// Any two fingers may not be further apart than this in both directions at once
const MAX_PAIR_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy)]
struct Placement {
    string: usize,
    fret: u8,
    finger: Finger,
}

impl Placement {
    fn distances(&self, other: &Placement) -> (usize, usize) {
        (
            self.string.abs_diff(other.string),
            self.fret.abs_diff(other.fret) as usize,
        )
    }
}

/// Whether a hand can actually play the fingering.
///
/// Rejects shapes where:
/// 1. a muted string follows a sounded one
/// 2. an open string sits at or after the start of the barre
/// 3. a pressed string has no finger
/// 4. the pressed frets span more than three frets
/// 5. two neighbouring fingers (n, n+1) are apart in both string and fret and
///    the sum of those distances exceeds four
/// 6. any two fingers are more than three strings and three frets apart
///
/// Strings held by the barre itself are left out of checks 5 and 6.
pub fn is_playable(fingering: &Fingering) -> bool {
    let Fingering {
        frets,
        barre,
        fingers,
    } = fingering;

    if !muted_strings_lead(frets) {
        return false;
    }

    if let Some(barre) = barre {
        if frets
            .iter()
            .enumerate()
            .any(|(i, f)| f.is_open() && i >= barre.from_string)
        {
            return false;
        }
    }

    let all_fingered = frets
        .iter()
        .zip(fingers)
        .all(|(f, finger)| f.pressed().is_none() || finger.is_some());
    if !all_fingered {
        return false;
    }

    let pressed: Vec<u8> = frets.iter().filter_map(|f| f.pressed()).collect();
    if let (Some(lo), Some(hi)) = (pressed.iter().min(), pressed.iter().max()) {
        if hi - lo > MAX_FRET_SPAN {
            return false;
        }
    }

    let mut placements: Vec<Placement> = frets
        .iter()
        .zip(fingers)
        .enumerate()
        .filter_map(|(string, (f, finger))| {
            let fret = f.pressed()?;
            let finger = (*finger)?;
            let on_barre = barre.is_some_and(|b| finger == 1 && fret == b.fret);
            (!on_barre).then_some(Placement {
                string,
                fret,
                finger,
            })
        })
        .collect();
    placements.sort_by_key(|p| p.finger);

    for pair in placements.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.finger == prev.finger + 1 {
            let (strings, frets) = curr.distances(prev);
            if strings > 0 && frets > 0 && strings + frets > MAX_NEIGHBOUR_STRETCH {
                return false;
            }
        }
    }

    for (i, a) in placements.iter().enumerate() {
        for b in &placements[i + 1..] {
            let (strings, frets) = a.distances(b);
            if strings > MAX_PAIR_DISTANCE && frets > MAX_PAIR_DISTANCE {
                return false;
            }
        }
    }

    true
}
